//! # dpia-schema
//!
//! JSON Schema generation, validation, and registry for DPIA types.
//!
//! Entity and report types are defined in `dpia-core` with
//! `#[derive(JsonSchema)]`. This crate builds the registry from them and
//! validates arbitrary JSON (catalog documents, answer files, exported reports)
//! against the registered schemas.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
