//! Registering definitions, wiring resolvers and assembling them into a
//! [`TypeGraph`](crate::TypeGraph)

pub mod factory;
pub mod generator;
pub mod meta;
pub mod model;
pub mod registry;
pub mod resolvers;
pub mod scalars;
pub mod translate;
pub mod wiring;
