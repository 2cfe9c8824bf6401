//! Adapters turning schema-language documents of third-party parsers into
//! [`Definition`]s.
//!
//! [`Definition`]: crate::ast::Definition

#[cfg(feature = "schema-language")]
pub mod graphql_parser;
