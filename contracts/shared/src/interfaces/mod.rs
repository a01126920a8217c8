//! # Asset Interfaces
//!
//! Wrappers over the token contracts the staking contract moves value
//! through. All calls go through the `try_` client variants so a failing
//! transfer comes back as `StakingError::TransferFailure` instead of trapping,
//! and never moves a partial amount.

use crate::types::{FarmConfig, RewardSource, StakingError};
use soroban_sdk::{token, Address, Env};

// ════════════════════════════════════════════════════════════════════════════
// Stake Custody
// ════════════════════════════════════════════════════════════════════════════

/// Moves a pool's stake asset between accounts and the contract
pub struct AssetCustody<'a> {
    env: &'a Env,
    asset: Address,
}

impl<'a> AssetCustody<'a> {
    pub fn new(env: &'a Env, asset: &Address) -> Self {
        Self {
            env,
            asset: asset.clone(),
        }
    }

    /// Pull `amount` from `from` into the contract
    pub fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), StakingError> {
        let client = token::Client::new(self.env, &self.asset);
        match client.try_transfer(from, &self.env.current_contract_address(), &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(StakingError::TransferFailure),
        }
    }

    /// Send `amount` held by the contract to `to`
    pub fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), StakingError> {
        let client = token::Client::new(self.env, &self.asset);
        match client.try_transfer(&self.env.current_contract_address(), to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(StakingError::TransferFailure),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Reward Issuance
// ════════════════════════════════════════════════════════════════════════════

/// Pays rewards by minting or from the contract's treasury balance
pub struct RewardIssuer<'a> {
    env: &'a Env,
    asset: Address,
    source: RewardSource,
}

impl<'a> RewardIssuer<'a> {
    pub fn new(env: &'a Env, config: &FarmConfig) -> Self {
        Self {
            env,
            asset: config.reward_asset.clone(),
            source: config.reward_source,
        }
    }

    /// Deliver `amount` of the reward asset to `to`; zero is a no-op
    pub fn issue(&self, to: &Address, amount: i128) -> Result<(), StakingError> {
        if amount == 0 {
            return Ok(());
        }

        match self.source {
            RewardSource::Mint => {
                let admin = token::StellarAssetClient::new(self.env, &self.asset);
                match admin.try_mint(to, &amount) {
                    Ok(Ok(())) => Ok(()),
                    _ => Err(StakingError::TransferFailure),
                }
            }
            RewardSource::Treasury => AssetCustody::new(self.env, &self.asset).transfer_out(to, amount),
        }
    }

    /// Reward asset balance held by the contract
    pub fn treasury_balance(&self) -> i128 {
        token::Client::new(self.env, &self.asset).balance(&self.env.current_contract_address())
    }
}
