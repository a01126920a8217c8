//! # Pool & Position Types
//!
//! Accounting records for pools and per-account positions.

use soroban_sdk::{contracttype, Address};

/// Accrual state of a pool, mutated only by the accrual engine and the ledger
#[contracttype]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolState {
    /// Sum of all position amounts in the pool
    pub total_staked: i128,
    /// Reward earned per staked unit since creation, scaled by `REWARD_SCALE`
    pub acc_reward_per_share: i128,
    /// Ledger sequence of the last accumulator update
    pub last_accrual_ledger: u32,
}

impl PoolState {
    pub fn new(ledger: u32) -> Self {
        Self {
            total_staked: 0,
            acc_reward_per_share: 0,
            last_accrual_ledger: ledger,
        }
    }
}

/// A registered staking pool
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    /// Dense index assigned at creation
    pub id: u32,
    /// Token deposited into this pool
    pub stake_asset: Address,
    /// Accrual state
    pub state: PoolState,
}

/// Stake held by one account in one pool
#[contracttype]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Currently staked balance
    pub amount: i128,
    /// `amount * acc_reward_per_share` at the last touch (scaled)
    pub reward_debt: i128,
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// Receipt returned by every settlement operation
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Pool the operation settled against
    pub pool_id: u32,
    /// Stake asset moved in (deposit) or out (withdrawals)
    pub moved: i128,
    /// Reward paid out by this operation
    pub reward: i128,
    /// Position amount after the operation
    pub staked: i128,
}
