#![no_std]

//! # Multi-Pool Staking Contract
//!
//! Users stake a pool's stake asset and earn a single reward asset emitted at
//! a fixed rate per ledger. Each pool receives the full rate and splits it
//! among its stakers pro rata, using reward-per-share accounting.
//!
//! ## Features
//! - Append-only pool registry with dense ids
//! - Deposit (with implicit harvest), full and partial withdrawal, harvest
//! - Emergency exit that forfeits pending reward
//! - Rewards minted by the contract or paid from a pre-funded treasury
//!
//! Every settlement accrues the pool, computes the next state in memory,
//! performs all asset movements, and only then commits storage. An error
//! returned after an earlier transfer succeeded rolls back the invocation.

mod storage;


use farm_shared::{
    accrual, ledger,
    events::{
        emit_admin_changed, emit_deposit, emit_emergency_withdraw, emit_harvest,
        emit_initialized, emit_paused, emit_pool_created, emit_rewards_funded, emit_withdraw,
        EventBuilder,
    },
    interfaces::{AssetCustody, RewardIssuer},
    types::{
        extend_instance_ttl, FarmConfig, Pool, PoolState, Position, RewardSource, Settlement,
        StakingError,
    },
};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env};

use storage::DataKey;

// ════════════════════════════════════════════════════════════════════════════
// Contract Implementation
// ════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct MultiPoolStaking;

#[contractimpl]
impl MultiPoolStaking {
    // ────────────────────────────────────────────────────────────────────────
    // Initialization
    // ────────────────────────────────────────────────────────────────────────

    /// Initialize the farm with its reward asset and emission rate
    pub fn initialize(env: Env, admin: Address, config: FarmConfig) -> Result<(), StakingError> {
        if storage::is_initialized(&env) {
            return Err(StakingError::AlreadyInitialized);
        }
        admin.require_auth();

        if !config.is_valid() {
            return Err(StakingError::InvalidConfig);
        }

        storage::set_admin(&env, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::PoolCount, &0_u32);
        storage::set_paused(&env, false);

        extend_instance_ttl(&env);
        emit_initialized(&env, &admin, &config.reward_asset, config.reward_per_block);

        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Pool Registry
    // ────────────────────────────────────────────────────────────────────────

    /// Register a new pool for `stake_asset` and return its id
    pub fn create_pool(env: Env, stake_asset: Address) -> Result<u32, StakingError> {
        Self::require_initialized(&env)?;
        Self::require_admin(&env)?;

        let config = storage::get_config(&env)?;
        if stake_asset == env.current_contract_address()
            || storage::has_pool_for_asset(&env, &stake_asset)
        {
            return Err(StakingError::InvalidStakeAsset);
        }
        // Treasury payouts would otherwise be drawn from staked principal
        if config.reward_source == RewardSource::Treasury && stake_asset == config.reward_asset {
            return Err(StakingError::InvalidStakeAsset);
        }

        let pool = Pool {
            id: storage::pool_count(&env),
            stake_asset,
            state: PoolState::new(env.ledger().sequence()),
        };
        storage::push_pool(&env, &pool);

        emit_pool_created(&env, pool.id, &pool.stake_asset);
        extend_instance_ttl(&env);

        Ok(pool.id)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Settlement
    // ────────────────────────────────────────────────────────────────────────

    /// Stake `amount` into a pool, paying out any pending reward first
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<Settlement, StakingError> {
        user.require_auth();
        Self::require_initialized(&env)?;
        Self::require_not_paused(&env)?;

        if amount <= 0 {
            return Err(StakingError::InvalidAmount);
        }

        let config = storage::get_config(&env)?;
        let mut pool = Self::load_accrued_pool(&env, pool_id, &config)?;
        let mut position = storage::get_position(&env, pool_id, &user);

        let reward = ledger::settle_deposit(&mut pool.state, &mut position, amount)?;

        AssetCustody::new(&env, &pool.stake_asset).transfer_in(&user, amount)?;
        RewardIssuer::new(&env, &config).issue(&user, reward)?;

        Self::commit(&env, &pool, &user, &position);
        emit_deposit(&env, &user, pool_id, amount, reward);
        log!(&env, "deposit", pool_id, amount, reward);

        Ok(Settlement {
            pool_id,
            moved: amount,
            reward,
            staked: position.amount,
        })
    }

    /// Withdraw the caller's entire stake together with pending reward
    pub fn withdraw(env: Env, user: Address, pool_id: u32) -> Result<Settlement, StakingError> {
        user.require_auth();
        Self::withdraw_from(&env, &user, pool_id, None)
    }

    /// Withdraw part of the caller's stake together with pending reward
    pub fn withdraw_amount(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<Settlement, StakingError> {
        user.require_auth();
        Self::withdraw_from(&env, &user, pool_id, Some(amount))
    }

    /// Claim pending reward without changing the staked amount
    pub fn harvest_reward(
        env: Env,
        user: Address,
        pool_id: u32,
    ) -> Result<Settlement, StakingError> {
        user.require_auth();
        Self::require_initialized(&env)?;
        Self::require_not_paused(&env)?;

        let config = storage::get_config(&env)?;
        let pool = Self::load_accrued_pool(&env, pool_id, &config)?;
        let mut position = storage::get_position(&env, pool_id, &user);

        let reward = ledger::settle_harvest(&pool.state, &mut position)?;

        RewardIssuer::new(&env, &config).issue(&user, reward)?;

        Self::commit(&env, &pool, &user, &position);
        emit_harvest(&env, &user, pool_id, reward);

        Ok(Settlement {
            pool_id,
            moved: 0,
            reward,
            staked: position.amount,
        })
    }

    /// Return the caller's whole stake without paying reward
    ///
    /// Available while paused, and when reward payouts cannot be made.
    pub fn emergency_withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
    ) -> Result<Settlement, StakingError> {
        user.require_auth();
        Self::require_initialized(&env)?;

        let config = storage::get_config(&env)?;
        let mut pool = Self::load_accrued_pool(&env, pool_id, &config)?;
        let mut position = storage::get_position(&env, pool_id, &user);

        let released = ledger::settle_emergency_exit(&mut pool.state, &mut position)?;

        AssetCustody::new(&env, &pool.stake_asset).transfer_out(&user, released)?;

        Self::commit(&env, &pool, &user, &position);
        emit_emergency_withdraw(&env, &user, pool_id, released);
        log!(&env, "emergency withdraw", pool_id, released);

        Ok(Settlement {
            pool_id,
            moved: released,
            reward: 0,
            staked: 0,
        })
    }

    /// Top up the reward treasury (treasury payouts only)
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<i128, StakingError> {
        funder.require_auth();
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(StakingError::InvalidAmount);
        }

        let config = storage::get_config(&env)?;
        if config.reward_source != RewardSource::Treasury {
            return Err(StakingError::InvalidRewardSource);
        }

        AssetCustody::new(&env, &config.reward_asset).transfer_in(&funder, amount)?;

        emit_rewards_funded(&env, &funder, amount);
        extend_instance_ttl(&env);

        Ok(RewardIssuer::new(&env, &config).treasury_balance())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Admin Functions
    // ────────────────────────────────────────────────────────────────────────

    /// Set admin address
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), StakingError> {
        let old_admin = Self::require_admin(&env)?;

        storage::set_admin(&env, &new_admin);
        emit_admin_changed(&env, &old_admin, &new_admin);
        extend_instance_ttl(&env);

        Ok(())
    }

    /// Pause/unpause deposits, withdrawals and harvests
    pub fn set_paused(env: Env, paused: bool) -> Result<(), StakingError> {
        let admin = Self::require_admin(&env)?;

        storage::set_paused(&env, paused);
        emit_paused(&env, paused, &admin);
        extend_instance_ttl(&env);

        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Query Functions
    // ────────────────────────────────────────────────────────────────────────

    /// Number of pools created so far
    pub fn pool_length(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    /// Get a pool by id
    pub fn pool(env: Env, pool_id: u32) -> Result<Pool, StakingError> {
        storage::get_pool(&env, pool_id)
    }

    /// Get a user's position in a pool
    pub fn position(env: Env, user: Address, pool_id: u32) -> Position {
        storage::get_position(&env, pool_id, &user)
    }

    /// Reward the user would receive by harvesting at the current ledger
    pub fn pending_reward(env: Env, user: Address, pool_id: u32) -> Result<i128, StakingError> {
        let config = storage::get_config(&env)?;
        let pool = storage::get_pool(&env, pool_id)?;
        let position = storage::get_position(&env, pool_id, &user);

        if position.is_empty() {
            return Ok(0);
        }

        let acc = accrual::preview_acc_reward_per_share(
            &pool.state,
            env.ledger().sequence(),
            config.reward_per_block,
        )?;
        ledger::pending_reward(&position, acc)
    }

    /// Get farm configuration
    pub fn config(env: Env) -> Result<FarmConfig, StakingError> {
        storage::get_config(&env)
    }

    /// Reward emitted per ledger for every pool
    pub fn reward_per_block(env: Env) -> Result<i128, StakingError> {
        Ok(storage::get_config(&env)?.reward_per_block)
    }

    /// Reward asset address
    pub fn reward_asset(env: Env) -> Result<Address, StakingError> {
        Ok(storage::get_config(&env)?.reward_asset)
    }

    /// Reward asset balance held by the contract (treasury mode only)
    ///
    /// In mint mode the contract may hold the reward asset as staked
    /// principal, so there is no treasury to report.
    pub fn treasury_balance(env: Env) -> Result<i128, StakingError> {
        let config = storage::get_config(&env)?;
        if config.reward_source != RewardSource::Treasury {
            return Err(StakingError::InvalidRewardSource);
        }
        Ok(RewardIssuer::new(&env, &config).treasury_balance())
    }

    /// Get admin address
    pub fn admin(env: Env) -> Result<Address, StakingError> {
        storage::get_admin(&env)
    }

    /// Check if contract is paused
    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Internal Helpers
    // ────────────────────────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), StakingError> {
        if !storage::is_initialized(env) {
            return Err(StakingError::NotInitialized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), StakingError> {
        if storage::is_paused(env) {
            return Err(StakingError::ContractPaused);
        }
        Ok(())
    }

    fn require_admin(env: &Env) -> Result<Address, StakingError> {
        let admin = storage::get_admin(env)?;
        admin.require_auth();
        Ok(admin)
    }

    /// Load a pool and bring its accumulator up to the current ledger
    ///
    /// The accrued pool lives in memory until `commit`.
    fn load_accrued_pool(
        env: &Env,
        pool_id: u32,
        config: &FarmConfig,
    ) -> Result<Pool, StakingError> {
        let mut pool = storage::get_pool(env, pool_id)?;
        let step = accrual::accrue(
            &mut pool.state,
            env.ledger().sequence(),
            config.reward_per_block,
        )?;

        if step.emitted > 0 {
            log!(env, "pool accrued", pool_id, step.elapsed, step.emitted);
            EventBuilder::new(env).publish(
                "staking",
                symbol_short!("accrued"),
                (pool_id, step.elapsed, step.emitted),
            );
        }

        Ok(pool)
    }

    fn withdraw_from(
        env: &Env,
        user: &Address,
        pool_id: u32,
        requested: Option<i128>,
    ) -> Result<Settlement, StakingError> {
        Self::require_initialized(env)?;
        Self::require_not_paused(env)?;

        if matches!(requested, Some(amount) if amount <= 0) {
            return Err(StakingError::InvalidAmount);
        }

        let config = storage::get_config(env)?;
        let mut pool = Self::load_accrued_pool(env, pool_id, &config)?;
        let mut position = storage::get_position(env, pool_id, user);

        if position.is_empty() {
            return Err(StakingError::InsufficientStake);
        }
        let amount = requested.unwrap_or(position.amount);

        let reward = ledger::settle_withdraw(&mut pool.state, &mut position, amount)?;

        AssetCustody::new(env, &pool.stake_asset).transfer_out(user, amount)?;
        RewardIssuer::new(env, &config).issue(user, reward)?;

        Self::commit(env, &pool, user, &position);
        emit_withdraw(env, user, pool_id, amount, reward);
        log!(env, "withdraw", pool_id, amount, reward);

        Ok(Settlement {
            pool_id,
            moved: amount,
            reward,
            staked: position.amount,
        })
    }

    /// Persist pool and position after every asset movement succeeded
    fn commit(env: &Env, pool: &Pool, user: &Address, position: &Position) {
        storage::set_pool(env, pool);
        storage::set_position(env, pool.id, user, position);
        extend_instance_ttl(env);
    }
}
