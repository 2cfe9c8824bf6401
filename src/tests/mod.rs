//! Library tests and fixtures

mod assembly_tests;
mod fixtures;
mod registry_tests;
