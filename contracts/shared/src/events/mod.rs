//! # Standard Events
//!
//! Event emission helpers for the staking contract. Events are notifications
//! for off-chain indexers; nothing in the accounting reads them back.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ════════════════════════════════════════════════════════════════════════════
// Event Topics (short symbols for gas efficiency)
// ════════════════════════════════════════════════════════════════════════════

/// Initialize event
pub const TOPIC_INIT: Symbol = symbol_short!("init");
/// Pool created event
pub const TOPIC_POOL: Symbol = symbol_short!("pool");
/// Deposit event
pub const TOPIC_DEPOSIT: Symbol = symbol_short!("deposit");
/// Withdraw event
pub const TOPIC_WITHDRAW: Symbol = symbol_short!("withdraw");
/// Harvest event
pub const TOPIC_HARVEST: Symbol = symbol_short!("harvest");
/// Emergency withdraw event
pub const TOPIC_EMERGENCY: Symbol = symbol_short!("emergency");
/// Treasury funding event
pub const TOPIC_FUND: Symbol = symbol_short!("fund");
/// Admin event
pub const TOPIC_ADMIN: Symbol = symbol_short!("admin");
/// Pause event
pub const TOPIC_PAUSE: Symbol = symbol_short!("pause");

// ════════════════════════════════════════════════════════════════════════════
// Event Emitters
// ════════════════════════════════════════════════════════════════════════════

/// Emit initialization event
pub fn emit_initialized(env: &Env, admin: &Address, reward_asset: &Address, reward_per_block: i128) {
    let topics = (TOPIC_INIT, admin.clone());
    let data = (reward_asset.clone(), reward_per_block, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit pool created event
pub fn emit_pool_created(env: &Env, pool_id: u32, stake_asset: &Address) {
    let topics = (TOPIC_POOL, pool_id);
    let data = (stake_asset.clone(), env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit deposit event
pub fn emit_deposit(env: &Env, user: &Address, pool_id: u32, amount: i128, reward: i128) {
    let topics = (TOPIC_DEPOSIT, user.clone(), pool_id);
    let data = (amount, reward, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit withdraw event
pub fn emit_withdraw(env: &Env, user: &Address, pool_id: u32, amount: i128, reward: i128) {
    let topics = (TOPIC_WITHDRAW, user.clone(), pool_id);
    let data = (amount, reward, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit harvest event
pub fn emit_harvest(env: &Env, user: &Address, pool_id: u32, reward: i128) {
    let topics = (TOPIC_HARVEST, user.clone(), pool_id);
    let data = (reward, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit emergency withdraw event
pub fn emit_emergency_withdraw(env: &Env, user: &Address, pool_id: u32, amount: i128) {
    let topics = (TOPIC_EMERGENCY, user.clone(), pool_id);
    let data = (amount, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit treasury funding event
pub fn emit_rewards_funded(env: &Env, funder: &Address, amount: i128) {
    let topics = (TOPIC_FUND, funder.clone());
    let data = (amount, env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit admin change event
pub fn emit_admin_changed(env: &Env, old_admin: &Address, new_admin: &Address) {
    let topics = (TOPIC_ADMIN, Symbol::new(env, "changed"));
    let data = (old_admin.clone(), new_admin.clone(), env.ledger().sequence());
    env.events().publish(topics, data);
}

/// Emit pause event
pub fn emit_paused(env: &Env, paused: bool, by: &Address) {
    let topics = (TOPIC_PAUSE, by.clone());
    let data = (paused, env.ledger().sequence());
    env.events().publish(topics, data);
}

// ════════════════════════════════════════════════════════════════════════════
// Custom Event Builder (for ad-hoc events)
// ════════════════════════════════════════════════════════════════════════════

/// Builder for custom events
pub struct EventBuilder<'a> {
    env: &'a Env,
}

impl<'a> EventBuilder<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Publish a custom event with symbol topic
    pub fn publish<
        T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
        D: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
    >(
        &self,
        topic: &str,
        sub_topic: T,
        data: D,
    ) {
        let topics = (Symbol::new(self.env, topic), sub_topic);
        self.env.events().publish(topics, data);
    }
}
