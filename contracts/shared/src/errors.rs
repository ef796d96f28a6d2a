// shared/src/errors.rs

use scale::{Decode, Encode};

/// Common error types shared between contracts.
#[derive(Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Batch operation called with an empty asset list.
    EmptyBatch,
    /// A wired address is the zero address.
    ZeroAddress,
    /// Reward rate must be strictly positive.
    InvalidRewardRate,
    /// Caller is not the privileged identity.
    Unauthorized,
    /// Caller does not own the asset record.
    NotOwner,
    /// Caller is not approved to move the asset.
    NotApproved,
    /// Staking is paused.
    ContractPaused,
    /// No record exists for the asset identifier.
    AssetNotFound,
    /// Unstake was already requested for the asset.
    AlreadyUnstaked,
    /// Caller has no pending assets eligible for withdrawal.
    NoPendingAssets,
    /// The unbonding window has not elapsed for a pending asset.
    UnbondingNotElapsed,
    /// Caller has no unstaked assets to settle.
    NoUnstakedAssets,
    /// A pending asset has not been withdrawn yet.
    NotWithdrawn,
    /// The settlement window has not elapsed for a pending asset.
    SettlementNotElapsed,
    /// Computed reward is zero.
    NothingToClaim,
    /// Nested re-entry into a state-mutating operation.
    ReentrantCall,
    /// Balance too low for the requested transfer.
    InsufficientBalance,
    /// Allowance too low for the requested transfer.
    InsufficientAllowance,
    /// The asset registry rejected a custody transfer.
    CustodyTransferDenied,
    /// The reward token rejected a disbursement.
    TransferFailed,
}

/// Retry class of an error, following the ledger's handling policy:
/// validation and authorization failures need a corrected resubmission,
/// precondition failures clear up on their own, external-call failures
/// abort the whole operation without partial state.
#[derive(Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum ErrorKind {
    Validation,
    Authorization,
    PreconditionNotMet,
    ExternalCall,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyBatch | Self::ZeroAddress | Self::InvalidRewardRate => {
                ErrorKind::Validation
            }
            Self::Unauthorized | Self::NotOwner | Self::NotApproved => ErrorKind::Authorization,
            Self::ContractPaused
            | Self::AssetNotFound
            | Self::AlreadyUnstaked
            | Self::NoPendingAssets
            | Self::UnbondingNotElapsed
            | Self::NoUnstakedAssets
            | Self::NotWithdrawn
            | Self::SettlementNotElapsed
            | Self::NothingToClaim
            | Self::ReentrantCall
            | Self::InsufficientBalance
            | Self::InsufficientAllowance => ErrorKind::PreconditionNotMet,
            Self::CustodyTransferDenied | Self::TransferFailed => ErrorKind::ExternalCall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_retry_policy() {
        assert_eq!(Error::EmptyBatch.kind(), ErrorKind::Validation);
        assert_eq!(Error::NotOwner.kind(), ErrorKind::Authorization);
        assert_eq!(Error::UnbondingNotElapsed.kind(), ErrorKind::PreconditionNotMet);
        assert_eq!(Error::CustodyTransferDenied.kind(), ErrorKind::ExternalCall);
        assert_eq!(Error::TransferFailed.kind(), ErrorKind::ExternalCall);
    }
}
