//! # Storage TTL
//!
//! TTL constants and extension helpers for contract storage.

/// TTL constants for storage management
pub mod ttl {
    /// Threshold to trigger TTL extension for instance storage
    pub const INSTANCE_TTL_THRESHOLD: u32 = 100;
    /// TTL extension amount for instance storage
    pub const INSTANCE_TTL_EXTEND: u32 = 100_000;

    /// Threshold to trigger TTL extension for persistent storage
    pub const PERSISTENT_TTL_THRESHOLD: u32 = 1_000;
    /// TTL extension amount for persistent storage
    pub const PERSISTENT_TTL_EXTEND: u32 = 200_000;
}

/// Extend instance storage TTL (config, admin, pool count)
pub fn extend_instance_ttl(env: &soroban_sdk::Env) {
    env.storage().instance().extend_ttl(
        ttl::INSTANCE_TTL_THRESHOLD,
        ttl::INSTANCE_TTL_EXTEND,
    );
}

/// Extend persistent storage TTL for a pool or position entry
pub fn extend_persistent_ttl<K: soroban_sdk::TryFromVal<soroban_sdk::Env, soroban_sdk::Val> + soroban_sdk::IntoVal<soroban_sdk::Env, soroban_sdk::Val>>(
    env: &soroban_sdk::Env,
    key: &K,
) {
    env.storage().persistent().extend_ttl(
        key,
        ttl::PERSISTENT_TTL_THRESHOLD,
        ttl::PERSISTENT_TTL_EXTEND,
    );
}
