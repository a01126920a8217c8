//! # Accrual Engine
//!
//! Lazily advances a pool's reward-per-share accumulator. There is no
//! background process: the contract calls [`accrue`] at the start of every
//! settlement touching the pool, so an idle pool catches up in one O(1) step.
//!
//! ```text
//! elapsed = now - last_accrual_ledger
//! acc    += elapsed * reward_per_block * REWARD_SCALE / total_staked
//! ```
//!
//! Every pool accrues at the full global rate; emission is not shared between
//! pools.

use crate::math::{reward_per_share, safe_add, safe_mul};
use crate::types::{PoolState, StakingError};

/// Outcome of a single accrual step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accrual {
    /// Ledgers credited by this step
    pub elapsed: u32,
    /// Reward distributed over current stakers by this step
    pub emitted: i128,
}

/// Bring `state` up to ledger `now`
///
/// Repeated calls within the same ledger are no-ops. Ledgers during which the
/// pool was empty are skipped: the checkpoint moves forward and nothing is
/// distributed for that interval.
pub fn accrue(
    state: &mut PoolState,
    now: u32,
    reward_per_block: i128,
) -> Result<Accrual, StakingError> {
    if now <= state.last_accrual_ledger {
        return Ok(Accrual::default());
    }

    if state.total_staked == 0 {
        state.last_accrual_ledger = now;
        return Ok(Accrual::default());
    }

    let elapsed = now - state.last_accrual_ledger;
    let emitted = safe_mul(elapsed as i128, reward_per_block)?;
    let delta = reward_per_share(emitted, state.total_staked)?;

    state.acc_reward_per_share = safe_add(state.acc_reward_per_share, delta)?;
    state.last_accrual_ledger = now;

    Ok(Accrual { elapsed, emitted })
}

/// Accumulator value the pool would have at `now`, without mutating it
///
/// Backs read-only pending-reward queries.
pub fn preview_acc_reward_per_share(
    state: &PoolState,
    now: u32,
    reward_per_block: i128,
) -> Result<i128, StakingError> {
    let mut preview = state.clone();
    accrue(&mut preview, now, reward_per_block)?;
    Ok(preview.acc_reward_per_share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::REWARD_SCALE;

    fn staked(total: i128, acc: i128, last: u32) -> PoolState {
        PoolState {
            total_staked: total,
            acc_reward_per_share: acc,
            last_accrual_ledger: last,
        }
    }

    #[test]
    fn accrues_elapsed_emission_per_share() {
        let mut state = staked(500, 0, 10);
        let accrual = accrue(&mut state, 12, 20).unwrap();

        assert_eq!(accrual, Accrual { elapsed: 2, emitted: 40 });
        // 40 reward over 500 units = 0.08 per unit
        assert_eq!(state.acc_reward_per_share, 8 * REWARD_SCALE / 100);
        assert_eq!(state.last_accrual_ledger, 12);
    }

    #[test]
    fn same_ledger_is_idempotent() {
        let mut state = staked(100, 0, 5);
        accrue(&mut state, 7, 10).unwrap();
        let snapshot = state.clone();

        let second = accrue(&mut state, 7, 10).unwrap();
        assert_eq!(second, Accrual::default());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn checkpoint_never_moves_backwards() {
        let mut state = staked(100, 42, 9);
        accrue(&mut state, 3, 10).unwrap();
        assert_eq!(state, staked(100, 42, 9));
    }

    #[test]
    fn empty_pool_skips_interval() {
        let mut state = staked(0, 0, 1);
        let accrual = accrue(&mut state, 50, 10).unwrap();

        assert_eq!(accrual.emitted, 0);
        assert_eq!(state.acc_reward_per_share, 0);
        assert_eq!(state.last_accrual_ledger, 50);
    }

    #[test]
    fn emission_overflow_is_reported() {
        let mut state = staked(1, 0, 0);
        assert_eq!(
            accrue(&mut state, 2, i128::MAX),
            Err(StakingError::ArithmeticOverflow)
        );
        // Failed step leaves the checkpoint alone
        assert_eq!(state.last_accrual_ledger, 0);
    }

    #[test]
    fn preview_matches_accrue_without_mutation() {
        let state = staked(80, 3 * REWARD_SCALE, 4);
        let preview = preview_acc_reward_per_share(&state, 6, 40).unwrap();

        let mut advanced = state.clone();
        accrue(&mut advanced, 6, 40).unwrap();

        assert_eq!(preview, advanced.acc_reward_per_share);
        assert_eq!(state.last_accrual_ledger, 4);
    }
}
