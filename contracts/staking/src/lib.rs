// staking/src/lib.rs

#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod staked_asset;

#[ink::contract]
mod nft_staking {
    use crate::staked_asset::StakedAsset;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;
    use shared::errors::Error;
    use shared::non_reentrant;
    use shared::utils::reentrancy_guard::ReentrancyGuard;
    use shared::TokenId;

    // Constants

    /// Blocks between an unstake request and withdrawal eligibility
    pub const UNBONDING_WINDOW: u32 = 20;
    /// Blocks between withdrawal and reward settlement eligibility
    pub const SETTLEMENT_WINDOW: u32 = 30;

    // Events

    /// Event emitted when a batch of assets is staked
    #[ink(event)]
    pub struct Staked {
        #[ink(topic)]
        pub account: AccountId,
        pub asset_ids: Vec<TokenId>,
    }

    /// Event emitted when unstaking is requested for a batch of assets
    #[ink(event)]
    pub struct Unstaked {
        #[ink(topic)]
        pub account: AccountId,
        pub asset_ids: Vec<TokenId>,
        pub unbonding_ends_at: u32,
    }

    /// Event emitted when unbonded assets are returned to their owner
    #[ink(event)]
    pub struct Withdrawn {
        #[ink(topic)]
        pub account: AccountId,
        pub asset_ids: Vec<TokenId>,
        pub settlement_ends_at: u32,
    }

    /// Event emitted when rewards are settled and records consumed
    #[ink(event)]
    pub struct RewardsClaimed {
        #[ink(topic)]
        pub account: AccountId,
        pub asset_ids: Vec<TokenId>,
        pub amount: Balance,
    }

    /// Event emitted when the reward rate changes
    #[ink(event)]
    pub struct RewardRateUpdated {
        pub old_rate: Balance,
        pub new_rate: Balance,
    }

    /// Event emitted when staking is paused
    #[ink(event)]
    pub struct ContractPaused {
        #[ink(topic)]
        pub by: AccountId,
    }

    /// Event emitted when staking is unpaused
    #[ink(event)]
    pub struct ContractUnpaused {
        #[ink(topic)]
        pub by: AccountId,
    }

    /// Staking ledger storage
    #[ink(storage)]
    pub struct NftStaking {
        /// The asset registry contract address
        asset_registry: AccountId,
        /// The reward token contract address
        reward_token: AccountId,
        /// Privileged identity for admin operations
        owner: AccountId,
        /// Pause state, gates `stake` only
        paused: bool,
        /// Reward paid per asset per block of the rewarded span
        reward_rate: Balance,
        /// Ledger record per asset under custody
        staked_assets: Mapping<TokenId, StakedAsset>,
        /// Unstaked-but-not-settled asset ids per participant,
        /// in unstake order
        pending_assets: Mapping<AccountId, Vec<TokenId>>,
        /// Number of assets currently in escrow
        total_staked: u64,
        /// Reentrancy guard
        reentrancy_guard: ReentrancyGuard,
    }

    impl NftStaking {
        /// Constructor that wires the collaborator contracts and the
        /// privileged identity. Deployment happens exactly once; there is
        /// no separate initialization entry point.
        #[ink(constructor)]
        pub fn new(
            admin: AccountId,
            asset_registry: AccountId,
            reward_token: AccountId,
            initial_rate: Balance,
        ) -> Result<Self, Error> {
            let zero = Self::zero_address();
            if admin == zero || asset_registry == zero || reward_token == zero {
                return Err(Error::ZeroAddress);
            }
            if initial_rate == 0 {
                return Err(Error::InvalidRewardRate);
            }

            Ok(Self {
                asset_registry,
                reward_token,
                owner: admin,
                paused: false,
                reward_rate: initial_rate,
                staked_assets: Mapping::default(),
                pending_assets: Mapping::default(),
                total_staked: 0,
                reentrancy_guard: ReentrancyGuard::new(),
            })
        }

        /// Ensure staking is not paused
        fn ensure_not_paused(&self) -> Result<(), Error> {
            if self.paused {
                return Err(Error::ContractPaused);
            }
            Ok(())
        }

        /// Ensure the caller is the privileged identity
        fn ensure_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }

        fn zero_address() -> AccountId {
            AccountId::from([0u8; 32])
        }

        /// Move custody of an asset through the registry.
        ///
        /// The off-chain test environment cannot dispatch cross-contract
        /// calls, so custody movement is a no-op under `cfg(test)`.
        fn transfer_asset_custody(
            &self,
            from: AccountId,
            to: AccountId,
            asset_id: TokenId,
        ) -> Result<(), Error> {
            #[cfg(test)]
            {
                let _ = (from, to, asset_id);
                Ok(())
            }
            #[cfg(not(test))]
            {
                use ink::env::call::{build_call, ExecutionInput, Selector};
                use ink::env::DefaultEnvironment;

                build_call::<DefaultEnvironment>()
                    .call(self.asset_registry)
                    .exec_input(
                        ExecutionInput::new(Selector::new(ink::selector_bytes!("transfer_from")))
                            .push_arg(from)
                            .push_arg(to)
                            .push_arg(asset_id),
                    )
                    .returns::<Result<(), Error>>()
                    .try_invoke()
                    .map_err(|_| Error::CustodyTransferDenied)? // dispatch failure
                    .map_err(|_| Error::CustodyTransferDenied)? // lang error
                    .map_err(|_| Error::CustodyTransferDenied) // registry rejection
            }
        }

        /// Disburse settled rewards through the token contract. The
        /// token's answer is checked; a rejected transfer aborts the
        /// settlement.
        ///
        /// No-op under `cfg(test)`, as above.
        fn disburse_reward(&self, to: AccountId, amount: Balance) -> Result<(), Error> {
            #[cfg(test)]
            {
                let _ = (to, amount);
                Ok(())
            }
            #[cfg(not(test))]
            {
                use ink::env::call::{build_call, ExecutionInput, Selector};
                use ink::env::DefaultEnvironment;

                build_call::<DefaultEnvironment>()
                    .call(self.reward_token)
                    .exec_input(
                        ExecutionInput::new(Selector::new(ink::selector_bytes!("transfer")))
                            .push_arg(to)
                            .push_arg(amount),
                    )
                    .returns::<Result<(), Error>>()
                    .try_invoke()
                    .map_err(|_| Error::TransferFailed)? // dispatch failure
                    .map_err(|_| Error::TransferFailed)? // lang error
                    .map_err(|_| Error::TransferFailed) // token rejection
            }
        }

        /// Reward accrued by one record: the full staked-to-unbonding-end
        /// span at the current rate. The unbonding wait is rewarded too.
        fn record_reward(&self, record: &StakedAsset) -> Balance {
            let span = record.unbonding_ends_at.saturating_sub(record.staked_at);
            Balance::from(span).saturating_mul(self.reward_rate)
        }

        /// Stake a batch of assets. Custody of every listed asset moves
        /// to the contract; one record is created per asset.
        #[ink(message)]
        pub fn stake(&mut self, asset_ids: Vec<TokenId>) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_not_paused()?;

                let caller = self.env().caller();
                let current = self.env().block_number();

                if asset_ids.is_empty() {
                    return Err(Error::EmptyBatch);
                }

                let escrow = self.env().account_id();
                for asset_id in &asset_ids {
                    self.transfer_asset_custody(caller, escrow, *asset_id)?;

                    let record = StakedAsset {
                        staked_at: current,
                        unstaked_at: 0,
                        unbonding_ends_at: 0,
                        settlement_ends_at: 0,
                        owner: caller,
                        is_unstaked: false,
                        is_withdrawn: false,
                    };
                    self.staked_assets.insert(*asset_id, &record);
                }

                self.total_staked = self.total_staked.saturating_add(asset_ids.len() as u64);

                self.env().emit_event(Staked {
                    account: caller,
                    asset_ids,
                });

                Ok(())
            })
        }

        /// Request unstaking for a batch of assets, starting their
        /// unbonding window. A single bad id aborts the whole batch.
        #[ink(message)]
        pub fn unstake(&mut self, asset_ids: Vec<TokenId>) -> Result<(), Error> {
            non_reentrant!(self, {
                let caller = self.env().caller();
                let current = self.env().block_number();

                if asset_ids.is_empty() {
                    return Err(Error::EmptyBatch);
                }

                let unbonding_ends_at = current.saturating_add(UNBONDING_WINDOW);
                let mut updated: Vec<(TokenId, StakedAsset)> = Vec::new();

                for asset_id in &asset_ids {
                    // an unknown asset has no owner the caller could match
                    let mut record = self.staked_assets.get(*asset_id).ok_or(Error::NotOwner)?;
                    if record.owner != caller {
                        return Err(Error::NotOwner);
                    }
                    if record.is_unstaked || updated.iter().any(|(id, _)| id == asset_id) {
                        return Err(Error::AlreadyUnstaked);
                    }

                    record.unstaked_at = current;
                    record.is_unstaked = true;
                    record.unbonding_ends_at = unbonding_ends_at;
                    updated.push((*asset_id, record));
                }

                let mut pending = self.pending_assets.get(caller).unwrap_or_default();
                for (asset_id, record) in &updated {
                    self.staked_assets.insert(*asset_id, record);
                    pending.push(*asset_id);
                }
                self.pending_assets.insert(caller, &pending);

                self.env().emit_event(Unstaked {
                    account: caller,
                    asset_ids,
                    unbonding_ends_at,
                });

                Ok(())
            })
        }

        /// Return custody of every unbonded pending asset to the caller
        /// and start its settlement window. The unbonding check is
        /// all-or-nothing across the pending set; assets already
        /// withdrawn and awaiting settlement are skipped.
        #[ink(message)]
        pub fn withdraw(&mut self) -> Result<(), Error> {
            non_reentrant!(self, {
                let caller = self.env().caller();
                let current = self.env().block_number();

                let pending = self.pending_assets.get(caller).unwrap_or_default();
                if pending.is_empty() {
                    return Err(Error::NoPendingAssets);
                }

                let settlement_ends_at = current.saturating_add(SETTLEMENT_WINDOW);
                let mut withdrawn: Vec<(TokenId, StakedAsset)> = Vec::new();

                for asset_id in &pending {
                    let mut record = self
                        .staked_assets
                        .get(*asset_id)
                        .ok_or(Error::AssetNotFound)?;
                    if record.is_withdrawn {
                        continue;
                    }
                    // strictly greater, the boundary block is not enough
                    if current <= record.unbonding_ends_at {
                        return Err(Error::UnbondingNotElapsed);
                    }

                    record.is_withdrawn = true;
                    record.settlement_ends_at = settlement_ends_at;
                    withdrawn.push((*asset_id, record));
                }

                if withdrawn.is_empty() {
                    return Err(Error::NoPendingAssets);
                }

                let escrow = self.env().account_id();
                for (asset_id, record) in &withdrawn {
                    self.staked_assets.insert(*asset_id, record);
                    self.transfer_asset_custody(escrow, caller, *asset_id)?;
                }

                self.total_staked = self.total_staked.saturating_sub(withdrawn.len() as u64);

                let asset_ids: Vec<TokenId> = withdrawn.iter().map(|(id, _)| *id).collect();
                self.env().emit_event(Withdrawn {
                    account: caller,
                    asset_ids,
                    settlement_ends_at,
                });

                Ok(())
            })
        }

        /// Settle the caller's pending set: disburse the accrued reward,
        /// then consume every record and clear the set. Eligibility is
        /// all-or-nothing across the pending set.
        #[ink(message)]
        pub fn claim_rewards(&mut self) -> Result<Balance, Error> {
            non_reentrant!(self, {
                let caller = self.env().caller();
                let current = self.env().block_number();

                let pending = self.pending_assets.get(caller).unwrap_or_default();
                if pending.is_empty() {
                    return Err(Error::NoUnstakedAssets);
                }

                let mut total: Balance = 0;
                for asset_id in &pending {
                    let record = self
                        .staked_assets
                        .get(*asset_id)
                        .ok_or(Error::AssetNotFound)?;
                    if !record.is_withdrawn {
                        return Err(Error::NotWithdrawn);
                    }
                    if current <= record.settlement_ends_at {
                        return Err(Error::SettlementNotElapsed);
                    }

                    total = total.saturating_add(self.record_reward(&record));
                }

                if total == 0 {
                    return Err(Error::NothingToClaim);
                }

                // records are consumed only once disbursement is confirmed
                self.disburse_reward(caller, total)?;

                for asset_id in &pending {
                    self.staked_assets.remove(*asset_id);
                }
                self.pending_assets.remove(caller);

                self.env().emit_event(RewardsClaimed {
                    account: caller,
                    asset_ids: pending,
                    amount: total,
                });

                Ok(total)
            })
        }

        /// Update the per-block reward rate (owner only). The new rate
        /// applies at calculation time, including to spans already
        /// unbonded but not yet claimed.
        #[ink(message)]
        pub fn update_reward_rate(&mut self, new_rate: Balance) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_owner()?;
                if new_rate == 0 {
                    return Err(Error::InvalidRewardRate);
                }

                let old_rate = self.reward_rate;
                self.reward_rate = new_rate;

                self.env().emit_event(RewardRateUpdated { old_rate, new_rate });

                Ok(())
            })
        }

        /// Pause staking (owner only). Unstaking, withdrawal and
        /// settlement stay open so a pause cannot trap user assets.
        #[ink(message)]
        pub fn pause(&mut self) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_owner()?;
                if self.paused {
                    return Ok(());
                }
                self.paused = true;
                self.env().emit_event(ContractPaused {
                    by: self.env().caller(),
                });
                Ok(())
            })
        }

        /// Unpause staking (owner only)
        #[ink(message)]
        pub fn unpause(&mut self) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_owner()?;
                if !self.paused {
                    return Ok(());
                }
                self.paused = false;
                self.env().emit_event(ContractUnpaused {
                    by: self.env().caller(),
                });
                Ok(())
            })
        }

        /// Update the asset registry address (owner only)
        #[ink(message)]
        pub fn set_asset_registry(&mut self, new_registry: AccountId) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_owner()?;
                if new_registry == Self::zero_address() {
                    return Err(Error::ZeroAddress);
                }
                self.asset_registry = new_registry;
                Ok(())
            })
        }

        /// Update the reward token address (owner only)
        #[ink(message)]
        pub fn set_reward_token(&mut self, new_token: AccountId) -> Result<(), Error> {
            non_reentrant!(self, {
                self.ensure_owner()?;
                if new_token == Self::zero_address() {
                    return Err(Error::ZeroAddress);
                }
                self.reward_token = new_token;
                Ok(())
            })
        }

        /// View function to get the ledger record of an asset
        #[ink(message)]
        pub fn get_staked_asset(&self, asset_id: TokenId) -> Option<StakedAsset> {
            self.staked_assets.get(asset_id)
        }

        /// View function to get an account's pending asset ids
        #[ink(message)]
        pub fn get_pending_assets(&self, account: AccountId) -> Vec<TokenId> {
            self.pending_assets.get(account).unwrap_or_default()
        }

        /// View function to get the reward an account's pending set
        /// would settle for at the current rate
        #[ink(message)]
        pub fn get_claimable_rewards(&self, account: AccountId) -> Balance {
            let pending = self.pending_assets.get(account).unwrap_or_default();
            let mut total: Balance = 0;
            for asset_id in &pending {
                if let Some(record) = self.staked_assets.get(*asset_id) {
                    total = total.saturating_add(self.record_reward(&record));
                }
            }
            total
        }

        /// View function to get the current reward rate
        #[ink(message)]
        pub fn get_reward_rate(&self) -> Balance {
            self.reward_rate
        }

        /// View function to get the number of assets in escrow
        #[ink(message)]
        pub fn get_total_staked(&self) -> u64 {
            self.total_staked
        }

        /// View function to get the pause state
        #[ink(message)]
        pub fn is_paused(&self) -> bool {
            self.paused
        }

        /// View function to get the privileged identity
        #[ink(message)]
        pub fn get_owner(&self) -> AccountId {
            self.owner
        }
    }
}
