//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields are applied; a nested `Option` distinguishes "clear" from "keep".

pub mod assessment;
pub mod mitigation;
