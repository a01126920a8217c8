//! Storage layout and typed accessors for the staking contract.

use farm_shared::{extend_persistent_ttl, FarmConfig, Pool, Position, StakingError};
use soroban_sdk::{contracttype, Address, Env};

// ════════════════════════════════════════════════════════════════════════════
// Storage Keys
// ════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Farm configuration
    Config,
    /// Whether contract is initialized
    Initialized,
    /// Whether contract is paused
    Paused,
    /// Number of pools created so far
    PoolCount,
    /// Pool by id (u32 -> Pool)
    Pool(u32),
    /// Pool id registered for a stake asset (Address -> u32)
    PoolByAsset(Address),
    /// Position of an account in a pool ((u32, Address) -> Position)
    Position(u32, Address),
}

// ────────────────────────────────────────────────────────────────────────────
// Instance storage
// ────────────────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_admin(env: &Env) -> Result<Address, StakingError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(StakingError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_config(env: &Env) -> Result<FarmConfig, StakingError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(StakingError::NotInitialized)
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Pool registry
// ────────────────────────────────────────────────────────────────────────────

pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, StakingError> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(StakingError::InvalidPool)
}

pub fn set_pool(env: &Env, pool: &Pool) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    extend_persistent_ttl(env, &key);
}

pub fn has_pool_for_asset(env: &Env, stake_asset: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::PoolByAsset(stake_asset.clone()))
}

/// Append a pool at the next dense id
pub fn push_pool(env: &Env, pool: &Pool) {
    set_pool(env, pool);

    let asset_key = DataKey::PoolByAsset(pool.stake_asset.clone());
    env.storage().persistent().set(&asset_key, &pool.id);
    extend_persistent_ttl(env, &asset_key);

    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &(pool.id + 1));
}

// ────────────────────────────────────────────────────────────────────────────
// Positions
// ────────────────────────────────────────────────────────────────────────────

pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool_id, user.clone()))
        .unwrap_or_default()
}

/// Persist a position; empty positions are dropped from storage
pub fn set_position(env: &Env, pool_id: u32, user: &Address, position: &Position) {
    let key = DataKey::Position(pool_id, user.clone());
    if position.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}
