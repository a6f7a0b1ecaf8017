//! Error types and error handling for the front end.
//!
//! This module defines the errors reported while lexing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each parse failure
//! - Error naming and suggestion tips for diagnostics

pub mod errors;
