//! Command implementations.

pub mod config;
pub mod inspect;
pub mod parse;

pub use self::config::execute_config;
pub use self::inspect::execute_inspect;
pub use self::parse::execute_parse;
