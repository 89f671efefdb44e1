//! In-memory element tree built from a quick-xml event stream
//!
//! Tags are stored in Clark notation: `{namespace-uri}LocalName` when the
//! element is in a namespace, plain `LocalName` otherwise. Attributes keep
//! their qualified name as written; namespace declarations are dropped.

use crate::error::ExtractorError;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::collections::HashMap;

/// A parsed markup element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag in Clark notation
    pub tag: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Concatenated character data directly inside this element
    pub text: String,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Tag without its namespace part
    pub fn local_name(&self) -> &str {
        match self.tag.strip_prefix('{').and_then(|t| t.split_once('}')) {
            Some((_, local)) => local,
            None => &self.tag,
        }
    }

    /// Whether this element's tag is `local` in namespace `ns` (or bare if `None`)
    pub fn has_name(&self, ns: Option<&str>, local: &str) -> bool {
        match ns {
            Some(ns) => {
                self.tag
                    .strip_prefix('{')
                    .and_then(|t| t.strip_prefix(ns))
                    .and_then(|t| t.strip_prefix('}'))
                    == Some(local)
            }
            None => self.tag == local,
        }
    }

    /// Attribute value by qualified name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Non-empty attribute value by qualified name
    pub fn attr_nonempty(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.trim().is_empty())
    }

    /// Character data, or `None` if there is none
    pub fn text(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// All descendants in document (pre-)order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// General entities declared in a document's internal DTD subset
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
    /// Collect `<!ENTITY name "value">` declarations from DOCTYPE content
    ///
    /// Parameter entities and external (SYSTEM / PUBLIC) entities are
    /// skipped. The first declaration of a name wins.
    fn from_doctype(doctype: &str) -> Self {
        let mut entities = HashMap::new();
        let mut rest = doctype;
        while let Some(pos) = rest.find("<!ENTITY") {
            rest = rest[pos + "<!ENTITY".len()..].trim_start();
            if rest.starts_with('%') {
                continue;
            }
            let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (name, tail) = rest.split_at(name_end);
            let tail = tail.trim_start();
            let Some(quote) = tail.chars().next().filter(|c| *c == '"' || *c == '\'') else {
                continue;
            };
            let Some(end) = tail[1..].find(quote) else {
                break;
            };
            let raw = &tail[1..1 + end];
            let value = unescape(raw).map_or_else(|_| raw.to_string(), |v| v.into_owned());
            entities.entry(name.to_string()).or_insert(value);
            rest = &tail[1 + end..];
        }
        Self(entities)
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .or_else(|| resolve_predefined_entity(name))
    }
}

/// Parse markup text into its root element
///
/// Entities declared in an internal DTD subset are expanded in text and
/// attribute values.
///
/// # Errors
///
/// Returns `ExtractorError::Structural` when the text is not well-formed:
/// mismatched or unclosed tags, no root, more than one root, character data
/// outside the root, undeclared prefixes, undeclared entities or bad
/// attributes.
pub fn parse_tree(xml: &str, trim_text: bool) -> Result<Element, ExtractorError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(trim_text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut entities = Entities::default();

    loop {
        let result = reader
            .read_resolved_event()
            .map(|(resolved, event)| (resolve_namespace(resolved), event));
        let (ns, event) = match result {
            Ok(pair) => pair,
            Err(e) => {
                return Err(ExtractorError::Structural(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(ref e) => {
                let element = element_from_start(e, ns?, &entities)?;
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots(&element));
                }
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e, ns?, &entities)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ExtractorError::Structural(
                        "closing tag without matching opening tag".to_string(),
                    )
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref t) => {
                let text = t.unescape_with(|name| entities.resolve(name))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(c) => {
                let bytes = c.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::DocType(ref d) => {
                entities = Entities::from_doctype(&String::from_utf8_lossy(d));
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ExtractorError::Structural(format!(
            "unexpected end of document: <{}> is not closed",
            open.local_name()
        )));
    }

    root.ok_or_else(|| ExtractorError::Structural("document has no root element".to_string()))
}

/// Owned namespace URI of a resolved name; an undeclared prefix is an error
fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, ExtractorError> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ExtractorError::Structural(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn element_from_start(
    e: &BytesStart<'_>,
    ns: Option<String>,
    entities: &Entities,
) -> Result<Element, ExtractorError> {
    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let tag = match ns {
        Some(uri) => format!("{{{}}}{}", uri, local),
        None => local,
    };

    let mut element = Element::new(tag);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value_with(|name| entities.resolve(name))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ExtractorError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(multiple_roots(&element)),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), ExtractorError> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(ExtractorError::Structural(
                "character data outside the root element".to_string(),
            ))
        }
    }
    Ok(())
}

fn multiple_roots(element: &Element) -> ExtractorError {
    ExtractorError::Structural(format!(
        "more than one root element (found <{}>)",
        element.local_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced_tree() {
        let xml = r#"<?xml version="1.0"?>
<Research xmlns="http://www.rixml.org/2005/3/RIXML" researchID="R1">
  <Product><Content><Title>Q2 Preview</Title></Content></Product>
</Research>"#;
        let root = parse_tree(xml, true).unwrap();
        assert_eq!(root.tag, "{http://www.rixml.org/2005/3/RIXML}Research");
        assert_eq!(root.local_name(), "Research");
        assert_eq!(root.attr("researchID"), Some("R1"));
        assert!(root.attr("xmlns").is_none());

        let title = root.descendants().find(|e| e.local_name() == "Title").unwrap();
        assert_eq!(title.text(), Some("Q2 Preview"));
    }

    #[test]
    fn test_parse_bare_tree() {
        let root = parse_tree("<Research><Product/></Research>", true).unwrap();
        assert_eq!(root.tag, "Research");
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].has_name(None, "Product"));
        assert!(!root.children[0].has_name(Some("urn:x"), "Product"));
    }

    #[test]
    fn test_prefixed_namespace() {
        let xml = r#"<r:Research xmlns:r="urn:rixml"><r:Product/></r:Research>"#;
        let root = parse_tree(xml, true).unwrap();
        assert!(root.has_name(Some("urn:rixml"), "Research"));
        assert!(root.children[0].has_name(Some("urn:rixml"), "Product"));
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = "<a><b>AT&amp;T</b><c><![CDATA[x < y]]></c></a>";
        let root = parse_tree(xml, true).unwrap();
        assert_eq!(root.children[0].text(), Some("AT&T"));
        assert_eq!(root.children[1].text(), Some("x < y"));
    }

    #[test]
    fn test_internal_entities_are_expanded() {
        let xml = r#"<!DOCTYPE Research [
  <!ENTITY co "Acme">
  <!ENTITY full 'Acme &amp; Sons'>
  <!ENTITY % param "ignored">
  <!ENTITY logo SYSTEM "logo.png">
]>
<Research broker="&co;"><Title>&co; note</Title><Name>&full;</Name></Research>"#;
        let root = parse_tree(xml, true).unwrap();
        assert_eq!(root.attr("broker"), Some("Acme"));
        assert_eq!(root.children[0].text(), Some("Acme note"));
        assert_eq!(root.children[1].text(), Some("Acme & Sons"));
    }

    #[test]
    fn test_undeclared_entity_fails() {
        let err = parse_tree("<a>&nope;</a>", true).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_untrimmed_tree_keeps_whitespace() {
        let root = parse_tree("<a><b>\n  Acme\n</b></a>", false).unwrap();
        assert_eq!(root.children[0].text, "\n  Acme\n");
        assert_eq!(root.children[0].text(), Some("\n  Acme\n"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = parse_tree("<a><b><c/></b><d/></a>", true).unwrap();
        let names: Vec<&str> = root.descendants().map(Element::local_name).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let err = parse_tree("<a><b></a>", true).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_unclosed_root_fails() {
        let err = parse_tree("<a><b/>", true).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_plain_text_fails() {
        assert!(parse_tree("this is not markup", true).unwrap_err().is_structural());
        assert!(parse_tree("", true).unwrap_err().is_structural());
    }

    #[test]
    fn test_multiple_roots_fail() {
        assert!(parse_tree("<a/><b/>", true).unwrap_err().is_structural());
    }

    #[test]
    fn test_undeclared_prefix_fails() {
        assert!(parse_tree("<x:a/>", true).unwrap_err().is_structural());
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let root = parse_tree("\u{feff}<a/>", true).unwrap();
        assert_eq!(root.tag, "a");
    }
}
