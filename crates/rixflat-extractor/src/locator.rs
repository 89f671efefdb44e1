//! Path Locator: namespace-tolerant element lookup
//!
//! Every lookup takes a logical path written with bare tag names and tries
//! each name variant in priority order:
//!
//! 1. the namespaced form, if the document declares a namespace
//! 2. the bare form
//!
//! The first variant that matches anything wins. Lookups never fail; a miss
//! is `None` or an empty `Vec`.
//!
//! # Path syntax
//!
//! A small ElementTree-style subset:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `A/B` | child `B` of child `A` |
//! | `.//A`, `//A`, `A//B` | descendant at any depth |
//! | `A[@k='v']` | `A` whose attribute `k` equals `v` |
//!
//! Predicate values may not contain `/`.

use crate::namespace;
use crate::xml::Element;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step<'p> {
    axis: Axis,
    name: &'p str,
    predicate: Option<(&'p str, &'p str)>,
}

impl<'p> Step<'p> {
    fn parse(axis: Axis, segment: &'p str) -> Self {
        let (name, predicate) = match segment.split_once('[') {
            Some((name, pred)) => (name, parse_predicate(pred)),
            None => (segment, None),
        };
        Self { axis, name, predicate }
    }

    fn matches(&self, element: &Element, ns: Option<&str>) -> bool {
        if !element.has_name(ns, self.name) {
            return false;
        }
        match self.predicate {
            Some((key, value)) => element.attr(key) == Some(value),
            None => true,
        }
    }
}

/// Parse `@key='value']` (single or double quotes)
fn parse_predicate(pred: &str) -> Option<(&str, &str)> {
    let body = pred.strip_suffix(']')?.strip_prefix('@')?;
    let (key, quoted) = body.split_once('=')?;
    let value = quoted
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| quoted.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
    Some((key.trim(), value))
}

fn parse_path(path: &str) -> Vec<Step<'_>> {
    let mut rest = path.trim();
    let mut axis = Axis::Child;
    if let Some(r) = rest.strip_prefix(".//").or_else(|| rest.strip_prefix("//")) {
        axis = Axis::Descendant;
        rest = r;
    } else if let Some(r) = rest.strip_prefix("./") {
        rest = r;
    }

    let mut steps = Vec::new();
    for segment in rest.split('/') {
        if segment.is_empty() {
            axis = Axis::Descendant;
            continue;
        }
        steps.push(Step::parse(axis, segment));
        axis = Axis::Child;
    }
    steps
}

/// Evaluate parsed steps from `node` with one namespace variant
fn evaluate<'a>(node: &'a Element, steps: &[Step<'_>], ns: Option<&str>) -> Vec<&'a Element> {
    let mut current = vec![node];
    for step in steps {
        let mut next: Vec<&'a Element> = Vec::new();
        // Nested parents can reach the same descendant twice
        let mut seen: HashSet<*const Element> = HashSet::new();
        let dedupe = step.axis == Axis::Descendant && current.len() > 1;
        for parent in current.iter().copied() {
            match step.axis {
                Axis::Child => next.extend(parent.children.iter().filter(|c| step.matches(c, ns))),
                Axis::Descendant if dedupe => next.extend(
                    parent
                        .descendants()
                        .filter(|d| step.matches(d, ns))
                        .filter(|d| seen.insert(*d as *const Element)),
                ),
                Axis::Descendant => {
                    next.extend(parent.descendants().filter(|d| step.matches(d, ns)))
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

/// Namespace-aware lookup bound to one document's active namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    namespace: Option<String>,
}

impl Locator {
    /// Create a locator for an explicit namespace
    pub fn new(namespace: Option<String>) -> Self {
        Self { namespace }
    }

    /// Create a locator using the namespace of a document root
    pub fn for_root(root: &Element) -> Self {
        Self::new(namespace::resolve(root))
    }

    /// The active namespace, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name variants in lookup priority order
    pub fn variants(&self) -> Vec<Option<&str>> {
        match self.namespace.as_deref() {
            Some(ns) => vec![Some(ns), None],
            None => vec![None],
        }
    }

    /// All elements matching `path` under `node`
    pub fn find_all<'a>(&self, node: &'a Element, path: &str) -> Vec<&'a Element> {
        let steps = parse_path(path);
        if steps.is_empty() {
            return Vec::new();
        }
        for ns in self.variants() {
            let found = evaluate(node, &steps, ns);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// First element matching `path` under `node`
    pub fn find_first<'a>(&self, node: &'a Element, path: &str) -> Option<&'a Element> {
        self.find_all(node, path).into_iter().next()
    }

    /// First element matching any of `paths`, tried in order
    pub fn find_first_of<'a>(&self, node: &'a Element, paths: &[&str]) -> Option<&'a Element> {
        paths.iter().find_map(|p| self.find_first(node, p))
    }

    /// Trimmed text of the first element matching `path`
    pub fn find_text<'a>(&self, node: &'a Element, path: &str) -> Option<&'a str> {
        self.find_first(node, path).and_then(Element::text).map(str::trim)
    }

    /// Attribute of the first element matching `path`
    pub fn find_attr<'a>(&self, node: &'a Element, path: &str, attr: &str) -> Option<&'a str> {
        self.find_first(node, path).and_then(|e| e.attr_nonempty(attr))
    }
}
