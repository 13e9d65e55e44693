//! Program text handling for the N1-5A.
//!
//! This module provides:
//! - The loader (program text → instruction memory)
//! - The listing renderer (instruction memory → annotated text)

pub mod listing;
pub mod loader;

pub use listing::{listing, mnemonic};
pub use loader::{load, LoadDiagnostic};
