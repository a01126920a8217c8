//! # Position Ledger
//!
//! Pending-reward computation and the balance transitions of a position.
//!
//! Every transition assumes the pool was accrued to the current ledger just
//! before, and always runs in the same order: compute pending from the current
//! state, apply the balance change, then rebase `reward_debt` on the new
//! amount. Rebasing on the new amount is what keeps past emission from being
//! credited to freshly added stake.
//!
//! `reward_debt` is held in reward units, `amount × acc` already divided by
//! `REWARD_SCALE`. The product itself can exceed `i128` long before the
//! quotient does (a dust staker alone in a pool drives the accumulator up
//! fast), so both sides go through `mul_div_down`.
//!
//! Transitions update `PoolState::total_staked` together with the position,
//! so the pool total always equals the sum of its position amounts.

use crate::math::{mul_div_down, safe_add, safe_sub, REWARD_SCALE};
use crate::types::{PoolState, Position, StakingError};

/// Baseline for `amount` at accumulator `acc_reward_per_share`, floored
#[inline]
pub fn reward_debt_for(amount: i128, acc_reward_per_share: i128) -> Result<i128, StakingError> {
    // The accumulator goes first: mul_div_down splits its first operand by the
    // divisor, and only the sub-scale remainder is multiplied by the amount.
    mul_div_down(acc_reward_per_share, amount, REWARD_SCALE)
}

/// Reward earned by `position` since its last touch
pub fn pending_reward(position: &Position, acc_reward_per_share: i128) -> Result<i128, StakingError> {
    let accumulated = reward_debt_for(position.amount, acc_reward_per_share)?;
    safe_sub(accumulated, position.reward_debt)
}

/// Pay out pending reward, then add `amount` to the position
///
/// Returns the reward owed to the depositor.
pub fn settle_deposit(
    pool: &mut PoolState,
    position: &mut Position,
    amount: i128,
) -> Result<i128, StakingError> {
    if amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }

    let reward = pending_reward(position, pool.acc_reward_per_share)?;

    let new_amount = safe_add(position.amount, amount)?;
    let new_total = safe_add(pool.total_staked, amount)?;
    let new_debt = reward_debt_for(new_amount, pool.acc_reward_per_share)?;

    position.amount = new_amount;
    position.reward_debt = new_debt;
    pool.total_staked = new_total;

    Ok(reward)
}

/// Pay out pending reward, then remove `amount` from the position
///
/// Withdrawing the full amount leaves an empty position with zero debt.
pub fn settle_withdraw(
    pool: &mut PoolState,
    position: &mut Position,
    amount: i128,
) -> Result<i128, StakingError> {
    if amount <= 0 {
        return Err(StakingError::InvalidAmount);
    }
    if position.amount < amount {
        return Err(StakingError::InsufficientStake);
    }

    let reward = pending_reward(position, pool.acc_reward_per_share)?;

    let remaining = safe_sub(position.amount, amount)?;
    let new_total = safe_sub(pool.total_staked, amount)?;
    let new_debt = reward_debt_for(remaining, pool.acc_reward_per_share)?;

    position.amount = remaining;
    position.reward_debt = new_debt;
    pool.total_staked = new_total;

    Ok(reward)
}

/// Pay out pending reward without touching the staked amount
pub fn settle_harvest(pool: &PoolState, position: &mut Position) -> Result<i128, StakingError> {
    if position.is_empty() {
        return Err(StakingError::InsufficientStake);
    }

    let reward = pending_reward(position, pool.acc_reward_per_share)?;
    position.reward_debt = reward_debt_for(position.amount, pool.acc_reward_per_share)?;

    Ok(reward)
}

/// Return the whole stake and forfeit pending reward
///
/// Returns the stake amount released.
pub fn settle_emergency_exit(
    pool: &mut PoolState,
    position: &mut Position,
) -> Result<i128, StakingError> {
    if position.is_empty() {
        return Err(StakingError::InsufficientStake);
    }

    let released = position.amount;
    pool.total_staked = safe_sub(pool.total_staked, released)?;
    *position = Position::default();

    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accrual::accrue;

    const RATE: i128 = 20;

    #[test]
    fn single_staker_earns_full_emission() {
        let mut pool = PoolState::new(0);
        let mut position = Position::default();

        assert_eq!(settle_deposit(&mut pool, &mut position, 500).unwrap(), 0);
        accrue(&mut pool, 2, RATE).unwrap();

        let reward = settle_withdraw(&mut pool, &mut position, 500).unwrap();
        assert_eq!(reward, 40);
        assert_eq!(position, Position::default());
        assert_eq!(pool.total_staked, 0);
    }

    #[test]
    fn deposit_pays_out_before_topping_up() {
        let mut pool = PoolState::new(0);
        let mut position = Position::default();

        settle_deposit(&mut pool, &mut position, 100).unwrap();
        accrue(&mut pool, 3, RATE).unwrap();

        // Everything accrued so far belongs to the original 100
        let paid = settle_deposit(&mut pool, &mut position, 900).unwrap();
        assert_eq!(paid, 60);
        assert_eq!(pending_reward(&position, pool.acc_reward_per_share).unwrap(), 0);

        accrue(&mut pool, 4, RATE).unwrap();
        assert_eq!(pending_reward(&position, pool.acc_reward_per_share).unwrap(), 20);
    }

    #[test]
    fn harvest_twice_same_ledger_pays_once() {
        let mut pool = PoolState::new(0);
        let mut position = Position::default();
        settle_deposit(&mut pool, &mut position, 10).unwrap();
        accrue(&mut pool, 5, RATE).unwrap();

        assert_eq!(settle_harvest(&pool, &mut position).unwrap(), 100);
        accrue(&mut pool, 5, RATE).unwrap();
        assert_eq!(settle_harvest(&pool, &mut position).unwrap(), 0);
        assert_eq!(position.amount, 10);
    }

    #[test]
    fn harvest_empty_position_is_rejected() {
        let pool = PoolState::new(0);
        let mut position = Position::default();
        assert_eq!(
            settle_harvest(&pool, &mut position),
            Err(StakingError::InsufficientStake)
        );
    }

    #[test]
    fn partial_withdraw_keeps_remaining_baseline() {
        let mut pool = PoolState::new(0);
        let mut position = Position::default();
        settle_deposit(&mut pool, &mut position, 200).unwrap();
        accrue(&mut pool, 1, RATE).unwrap();

        assert_eq!(settle_withdraw(&mut pool, &mut position, 100).unwrap(), 20);
        assert_eq!(position.amount, 100);
        assert_eq!(pool.total_staked, 100);

        accrue(&mut pool, 2, RATE).unwrap();
        assert_eq!(pending_reward(&position, pool.acc_reward_per_share).unwrap(), 20);
    }

    #[test]
    fn withdraw_more_than_staked_is_rejected() {
        let mut pool = PoolState::new(0);
        let mut position = Position::default();
        settle_deposit(&mut pool, &mut position, 10).unwrap();

        assert_eq!(
            settle_withdraw(&mut pool, &mut position, 11),
            Err(StakingError::InsufficientStake)
        );
        assert_eq!(
            settle_withdraw(&mut pool, &mut position, 0),
            Err(StakingError::InvalidAmount)
        );
        assert_eq!(position.amount, 10);
    }

    #[test]
    fn emergency_exit_forfeits_reward() {
        let mut pool = PoolState::new(0);
        let mut alice = Position::default();
        let mut bob = Position::default();
        settle_deposit(&mut pool, &mut alice, 50).unwrap();
        settle_deposit(&mut pool, &mut bob, 50).unwrap();
        accrue(&mut pool, 1, RATE).unwrap();

        assert_eq!(settle_emergency_exit(&mut pool, &mut alice).unwrap(), 50);
        assert_eq!(alice, Position::default());
        assert_eq!(pool.total_staked, 50);
        // Bob keeps his half of the first ledger
        assert_eq!(pending_reward(&bob, pool.acc_reward_per_share).unwrap(), 10);
    }

    #[test]
    fn dust_staker_does_not_block_large_deposits() {
        let mut pool = PoolState::new(0);
        let mut dust = Position::default();
        let mut whale = Position::default();

        // 1 token per ledger (7 decimals) into a pool holding a single unit
        let rate = 10_000_000;
        settle_deposit(&mut pool, &mut dust, 1).unwrap();
        accrue(&mut pool, 1_000_000, rate).unwrap();
        assert_eq!(pool.acc_reward_per_share, 10_i128.pow(25));

        // 1e14 × 1e25 does not fit in i128
        assert!(100_000_000_000_000_i128.checked_mul(pool.acc_reward_per_share).is_none());
        assert_eq!(settle_deposit(&mut pool, &mut whale, 100_000_000_000_000).unwrap(), 0);
        assert_eq!(whale.reward_debt, 10_i128.pow(27));
        assert_eq!(pool.total_staked, 100_000_000_000_001);

        accrue(&mut pool, 1_000_001, rate).unwrap();
        assert_eq!(pending_reward(&dust, pool.acc_reward_per_share).unwrap(), 10_000_000_000_000);
        assert_eq!(
            settle_withdraw(&mut pool, &mut whale, 100_000_000_000_000).unwrap(),
            9_999_900
        );
        assert_eq!(whale, Position::default());
        assert_eq!(pool.total_staked, 1);
    }
}
