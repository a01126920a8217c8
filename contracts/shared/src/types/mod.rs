//! # Shared Types
//!
//! Data structures shared between the accounting library and the contract.

mod errors;
mod config;
mod pool;
mod storage;

pub use errors::*;
pub use config::*;
pub use pool::*;
pub use storage::*;
