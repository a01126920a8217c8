//! # Farm Shared Library
//!
//! Reward accounting, shared types, asset interfaces and events for the
//! multi-pool staking contract.
//!
//! ## Modules
//! - `math` - Fixed-point accumulator and checked arithmetic
//! - `accrual` - Lazy reward-per-share accrual for a single pool
//! - `ledger` - Position settlement and reward-debt bookkeeping
//! - `types` - Pools, positions, configuration and errors
//! - `interfaces` - Stake custody and reward issuance over token contracts
//! - `events` - Standard event definitions
//!
//! ## Usage
//! ```rust,ignore
//! use farm_shared::{accrual, ledger, PoolState, Position};
//!
//! accrual::accrue(&mut state, now, reward_per_block)?;
//! let reward = ledger::settle_harvest(&mut state, &mut position)?;
//! ```

#![no_std]

pub mod types;
pub mod math;
pub mod accrual;
pub mod ledger;
pub mod interfaces;
pub mod events;

// Re-export commonly used items
pub use types::*;
pub use math::*;
pub use interfaces::*;
pub use events::*;
