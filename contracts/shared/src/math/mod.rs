//! # Fixed-Point Math
//!
//! Checked arithmetic and the scaled accumulator primitives used by the
//! reward accounting. Every operation returns a `Result` so overflow surfaces
//! as a `StakingError` instead of a trap.

use crate::types::StakingError;

/// Accumulator scale (1e12)
///
/// `acc_reward_per_share` is stored multiplied by this constant. Products of
/// the accumulator with a stake amount are divided back down right away.
pub const REWARD_SCALE: i128 = 1_000_000_000_000;

// ════════════════════════════════════════════════════════════════════════════
// Safe Arithmetic Operations
// ════════════════════════════════════════════════════════════════════════════

/// Safe addition with overflow check
#[inline]
pub fn safe_add(a: i128, b: i128) -> Result<i128, StakingError> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow)
}

/// Safe subtraction; rejects negative results as well as wrap-around
#[inline]
pub fn safe_sub(a: i128, b: i128) -> Result<i128, StakingError> {
    let result = a.checked_sub(b).ok_or(StakingError::ArithmeticUnderflow)?;
    if result < 0 {
        return Err(StakingError::ArithmeticUnderflow);
    }
    Ok(result)
}

/// Safe multiplication with overflow check
#[inline]
pub fn safe_mul(a: i128, b: i128) -> Result<i128, StakingError> {
    a.checked_mul(b).ok_or(StakingError::ArithmeticOverflow)
}

/// Safe division with zero check
#[inline]
pub fn safe_div(a: i128, b: i128) -> Result<i128, StakingError> {
    if b == 0 {
        return Err(StakingError::DivisionByZero);
    }
    a.checked_div(b).ok_or(StakingError::ArithmeticOverflow)
}

// ════════════════════════════════════════════════════════════════════════════
// Phantom Overflow Safe Arithmetic
// ════════════════════════════════════════════════════════════════════════════

/// `(a * b) / c`, rounded down
///
/// Handles phantom overflow where `a * b` overflows but the quotient fits,
/// by decomposing `a*b/c = (a/c)*b + (a%c)*b/c` in u128.
#[inline]
pub fn mul_div_down(a: i128, b: i128, c: i128) -> Result<i128, StakingError> {
    if c == 0 {
        return Err(StakingError::DivisionByZero);
    }
    if a == 0 || b == 0 {
        return Ok(0);
    }

    // Reward math only ever sees non-negative operands
    if a < 0 || b < 0 || c < 0 {
        return Err(StakingError::ArithmeticUnderflow);
    }

    if let Some(product) = a.checked_mul(b) {
        return product.checked_div(c).ok_or(StakingError::ArithmeticOverflow);
    }

    let a_u = a as u128;
    let b_u = b as u128;
    let c_u = c as u128;

    let quotient = a_u / c_u;
    let remainder = a_u % c_u;

    let term1 = quotient
        .checked_mul(b_u)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let term2_num = remainder
        .checked_mul(b_u)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let term2 = term2_num / c_u;

    let result = term1
        .checked_add(term2)
        .ok_or(StakingError::ArithmeticOverflow)?;

    if result > i128::MAX as u128 {
        return Err(StakingError::ArithmeticOverflow);
    }

    Ok(result as i128)
}

// ════════════════════════════════════════════════════════════════════════════
// Scaled Accumulator
// ════════════════════════════════════════════════════════════════════════════

/// Lift a raw amount into accumulator precision
#[inline]
pub fn to_scaled(amount: i128) -> Result<i128, StakingError> {
    safe_mul(amount, REWARD_SCALE)
}

/// Bring a scaled value back to a real token quantity (floor)
#[inline]
pub fn from_scaled(scaled: i128) -> Result<i128, StakingError> {
    safe_div(scaled, REWARD_SCALE)
}

/// Per-share increment for distributing `reward` over `total_staked` units
///
/// Equivalent to `to_scaled(reward) / total_staked` but survives rewards large
/// enough that the scaled numerator alone would overflow.
#[inline]
pub fn reward_per_share(reward: i128, total_staked: i128) -> Result<i128, StakingError> {
    mul_div_down(reward, REWARD_SCALE, total_staked)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
