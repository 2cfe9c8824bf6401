//! Source locations of schema definitions
//!
//! Parsing schema-definition-language text is left to an external parser, but
//! every definition handed to a [`TypeDefinitionRegistry`] keeps the position it
//! was read from, so that conflicts can point back at the offending source.
//!
//! [`TypeDefinitionRegistry`]: crate::TypeDefinitionRegistry

mod utils;

pub use self::utils::SourcePosition;
