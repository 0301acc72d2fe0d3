//! # dpia-core
//!
//! Core types, ID generation, and error types for the DPIA risk engine.
//!
//! This crate provides the foundational types shared across all DPIA crates:
//! - Entity structs for catalog questions, assessment headers, responses,
//!   mitigations, risk reviews, and GDPR article references
//! - Level, status, and priority enums (with the mitigation status cycle)
//! - ID prefix constants and generation helpers
//! - Cross-cutting error types
//! - Summary, diagnostics, and report shapes consumed by export collaborators

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod report;
