//! # Staking Errors
//!
//! Every failure the settlement API can report. Using `contracterror` so the
//! codes survive the contract boundary.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    // ════════════════════════════════════════════════════════════════
    // Initialization Errors (1-99)
    // ════════════════════════════════════════════════════════════════
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Configuration rejected at initialization
    InvalidConfig = 3,

    // ════════════════════════════════════════════════════════════════
    // Authorization & State Errors (100-199)
    // ════════════════════════════════════════════════════════════════
    /// Caller is not allowed to perform this operation
    Unauthorized = 100,
    /// Contract is paused
    ContractPaused = 101,

    // ════════════════════════════════════════════════════════════════
    // Validation Errors (200-299)
    // ════════════════════════════════════════════════════════════════
    /// Unknown pool id
    InvalidPool = 200,
    /// Zero or negative amount
    InvalidAmount = 201,
    /// Stake asset cannot back a pool
    InvalidStakeAsset = 202,
    /// Operation does not apply to the configured reward source
    InvalidRewardSource = 203,

    // ════════════════════════════════════════════════════════════════
    // Position Errors (300-399)
    // ════════════════════════════════════════════════════════════════
    /// Withdraw or harvest without enough staked balance
    InsufficientStake = 300,

    // ════════════════════════════════════════════════════════════════
    // Asset Errors (400-499)
    // ════════════════════════════════════════════════════════════════
    /// Token transfer or mint reported failure
    TransferFailure = 400,

    // ════════════════════════════════════════════════════════════════
    // Math Errors (500-599)
    // ════════════════════════════════════════════════════════════════
    /// Arithmetic overflow
    ArithmeticOverflow = 500,
    /// Arithmetic underflow or negative result
    ArithmeticUnderflow = 501,
    /// Division by zero
    DivisionByZero = 502,
}
