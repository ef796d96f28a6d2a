// nftstake/contracts/registry/src/lib.rs

#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[ink::contract]
mod asset_registry {
    use ink::prelude::string::String;
    use ink::storage::Mapping;
    use shared::errors::Error;
    use shared::TokenId;

    #[ink(storage)]
    pub struct AssetRegistry {
        /// Mapping from asset ID to current holder
        holders: Mapping<TokenId, AccountId>,
        /// Mapping from asset ID to its metadata URI
        metadata: Mapping<TokenId, String>,
        /// Per-asset transfer approval, cleared on every transfer
        approvals: Mapping<TokenId, AccountId>,
        /// Operator approvals: (holder, operator)
        operators: Mapping<(AccountId, AccountId), ()>,
        /// Next available asset ID
        next_asset_id: TokenId,
    }

    #[ink(event)]
    pub struct AssetMinted {
        #[ink(topic)]
        asset_id: TokenId,
        owner: AccountId,
        metadata_uri: String,
    }

    #[ink(event)]
    pub struct AssetTransferred {
        #[ink(topic)]
        asset_id: TokenId,
        from: AccountId,
        to: AccountId,
    }

    #[ink(event)]
    pub struct AssetApproved {
        #[ink(topic)]
        asset_id: TokenId,
        approved: AccountId,
    }

    #[ink(event)]
    pub struct OperatorSet {
        #[ink(topic)]
        holder: AccountId,
        operator: AccountId,
        approved: bool,
    }

    impl Default for AssetRegistry {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AssetRegistry {
        /// Constructor
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                holders: Mapping::default(),
                metadata: Mapping::default(),
                approvals: Mapping::default(),
                operators: Mapping::default(),
                next_asset_id: 1,
            }
        }

        fn zero_address() -> AccountId {
            AccountId::from([0u8; 32])
        }

        /// Whether `caller` may move `asset_id` on behalf of `holder`.
        fn is_authorized(&self, caller: AccountId, holder: AccountId, asset_id: TokenId) -> bool {
            caller == holder
                || self.approvals.get(asset_id) == Some(caller)
                || self.operators.contains((holder, caller))
        }

        /// Mint a new asset to the caller and return its ID.
        #[ink(message)]
        pub fn mint(&mut self, metadata_uri: String) -> TokenId {
            let caller = self.env().caller();
            let asset_id = self.next_asset_id;

            self.holders.insert(asset_id, &caller);
            self.metadata.insert(asset_id, &metadata_uri);
            self.next_asset_id = self.next_asset_id.saturating_add(1);

            self.env().emit_event(AssetMinted {
                asset_id,
                owner: caller,
                metadata_uri,
            });

            asset_id
        }

        /// Transfer custody of an asset. The caller must be the holder,
        /// approved for this asset, or an approved operator of the holder.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            asset_id: TokenId,
        ) -> Result<(), Error> {
            let holder = self.holders.get(asset_id).ok_or(Error::AssetNotFound)?;
            if holder != from {
                return Err(Error::NotOwner);
            }
            if to == Self::zero_address() {
                return Err(Error::ZeroAddress);
            }

            let caller = self.env().caller();
            if !self.is_authorized(caller, holder, asset_id) {
                return Err(Error::NotApproved);
            }

            self.approvals.remove(asset_id);
            self.holders.insert(asset_id, &to);

            self.env().emit_event(AssetTransferred { asset_id, from, to });

            Ok(())
        }

        /// Approve `to` to move a single asset held by the caller.
        #[ink(message)]
        pub fn approve(&mut self, to: AccountId, asset_id: TokenId) -> Result<(), Error> {
            let holder = self.holders.get(asset_id).ok_or(Error::AssetNotFound)?;
            let caller = self.env().caller();
            if caller != holder && !self.operators.contains((holder, caller)) {
                return Err(Error::NotOwner);
            }

            self.approvals.insert(asset_id, &to);

            self.env().emit_event(AssetApproved {
                asset_id,
                approved: to,
            });

            Ok(())
        }

        /// Grant or revoke `operator` the right to move any asset the
        /// caller holds.
        #[ink(message)]
        pub fn set_approval_for_all(&mut self, operator: AccountId, approved: bool) {
            let caller = self.env().caller();
            if approved {
                self.operators.insert((caller, operator), &());
            } else {
                self.operators.remove((caller, operator));
            }

            self.env().emit_event(OperatorSet {
                holder: caller,
                operator,
                approved,
            });
        }

        /// Get the current holder of an asset
        #[ink(message)]
        pub fn owner_of(&self, asset_id: TokenId) -> Option<AccountId> {
            self.holders.get(asset_id)
        }

        /// Get the account approved for a single asset, if any
        #[ink(message)]
        pub fn get_approved(&self, asset_id: TokenId) -> Option<AccountId> {
            self.approvals.get(asset_id)
        }

        /// Check whether `operator` may move any asset of `holder`
        #[ink(message)]
        pub fn is_approved_for_all(&self, holder: AccountId, operator: AccountId) -> bool {
            self.operators.contains((holder, operator))
        }

        /// Get the metadata URI of an asset
        #[ink(message)]
        pub fn metadata_of(&self, asset_id: TokenId) -> Option<String> {
            self.metadata.get(asset_id)
        }

        /// Check if an asset exists
        #[ink(message)]
        pub fn asset_exists(&self, asset_id: TokenId) -> bool {
            self.holders.contains(asset_id)
        }

        /// Get total number of minted assets
        #[ink(message)]
        pub fn total_minted(&self) -> TokenId {
            self.next_asset_id.saturating_sub(1)
        }
    }

}
