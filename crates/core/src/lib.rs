//! Core types and utilities for the oracle price reader
//!
//! This crate provides shared types used across all components:
//! - Symbol, raw and normalized quote definitions
//! - Per-symbol query outcomes and batch summaries
//! - Fixed-point price normalization and timestamp conversion
//! - Reader configuration

pub mod types;
pub mod normalize;
pub mod config;
pub mod errors;

pub use types::*;
pub use normalize::*;
pub use config::*;
pub use errors::*;
