//! Oracle price feed client
//!
//! Features:
//! - Typed read interface over the oracle contract
//! - Alloy HTTP adapter supporting both latest-price call shapes
//! - Concurrent batch queries with positional result assembly
//! - Per-symbol failure isolation and per-call timeouts

pub mod client;
pub mod contract;
pub mod memory;
pub mod source;

pub use client::PriceFeedClient;
pub use contract::AlloyOracle;
pub use memory::{FeedEntry, InMemoryOracle};
pub use source::OracleReader;
