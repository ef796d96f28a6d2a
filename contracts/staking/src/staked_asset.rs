// staking/src/staked_asset.rs

use ink::primitives::AccountId;
use scale::{Decode, Encode};

/// Ledger record for one staked asset. Created on stake, consumed at
/// reward settlement; the asset moves strictly forward through
/// staked → unbonding → withdrawn → settled.
#[derive(Debug, Encode, Decode, Clone)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout))]
pub struct StakedAsset {
    /// Block at which custody began
    pub staked_at: u32,
    /// Block at which unstake was requested (0 while staked)
    pub unstaked_at: u32,
    /// Block after which withdrawal is permitted
    pub unbonding_ends_at: u32,
    /// Block after which reward settlement is permitted
    pub settlement_ends_at: u32,
    /// Participant that staked the asset
    pub owner: AccountId,
    /// Whether unstake has been requested
    pub is_unstaked: bool,
    /// Whether custody has been returned to the owner
    pub is_withdrawn: bool,
}
