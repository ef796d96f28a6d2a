// nftstake/contracts/token/src/lib.rs

#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[ink::contract]
mod reward_token {
    use ink::storage::Mapping;
    use shared::errors::Error;

    #[ink(storage)]
    pub struct RewardToken {
        /// Total token supply
        total_supply: Balance,
        /// Balance per account
        balances: Mapping<AccountId, Balance>,
        /// Spending allowances: (owner, spender) -> amount
        allowances: Mapping<(AccountId, AccountId), Balance>,
        /// Account allowed to mint new supply
        minter: AccountId,
    }

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        to: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner: AccountId,
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to: AccountId,
        value: Balance,
    }

    impl RewardToken {
        /// Constructor that credits the initial supply to the deployer.
        #[ink(constructor)]
        pub fn new(initial_supply: Balance) -> Self {
            let caller = Self::env().caller();
            let mut balances = Mapping::default();
            balances.insert(caller, &initial_supply);

            Self {
                total_supply: initial_supply,
                balances,
                allowances: Mapping::default(),
                minter: caller,
            }
        }

        fn transfer_impl(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let from_balance = self.balances.get(from).unwrap_or(0);
            if from_balance < value {
                return Err(Error::InsufficientBalance);
            }

            self.balances.insert(from, &(from_balance.saturating_sub(value)));
            let to_balance = self.balances.get(to).unwrap_or(0);
            self.balances.insert(to, &(to_balance.saturating_add(value)));

            self.env().emit_event(Transferred { from, to, value });

            Ok(())
        }

        /// Transfer tokens from the caller to `to`.
        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.transfer_impl(from, to, value)
        }

        /// Transfer tokens on behalf of `from`, consuming the caller's
        /// allowance.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let caller = self.env().caller();
            let allowance = self.allowances.get((from, caller)).unwrap_or(0);
            if allowance < value {
                return Err(Error::InsufficientAllowance);
            }

            self.transfer_impl(from, to, value)?;
            self.allowances
                .insert((from, caller), &(allowance.saturating_sub(value)));

            Ok(())
        }

        /// Allow `spender` to transfer up to `value` from the caller.
        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);

            self.env().emit_event(Approved {
                owner,
                spender,
                value,
            });
        }

        /// Mint new supply to `to` (minter only).
        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            if self.env().caller() != self.minter {
                return Err(Error::Unauthorized);
            }

            let balance = self.balances.get(to).unwrap_or(0);
            self.balances.insert(to, &balance.saturating_add(value));
            self.total_supply = self.total_supply.saturating_add(value);

            self.env().emit_event(Minted { to, value });

            Ok(())
        }

        /// Get the total supply
        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        /// Get the balance of an account
        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        /// Get the remaining allowance of a spender
        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }
    }

}
