//! # Configuration Types
//!
//! Configuration consumed once at initialization and immutable afterwards.

use soroban_sdk::{contracttype, Address};

/// How reward payouts reach stakers
#[contracttype]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RewardSource {
    /// Staking contract is the reward asset admin and mints each payout
    Mint = 0,
    /// Payouts are transferred out of the contract's pre-funded balance
    Treasury = 1,
}

/// Farm-wide configuration
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FarmConfig {
    /// Reward asset paid to stakers
    pub reward_asset: Address,
    /// Reward emitted per ledger, independently for every pool
    pub reward_per_block: i128,
    /// Where payouts come from
    pub reward_source: RewardSource,
}

impl FarmConfig {
    /// Validate configuration
    pub fn is_valid(&self) -> bool {
        self.reward_per_block > 0
    }
}
