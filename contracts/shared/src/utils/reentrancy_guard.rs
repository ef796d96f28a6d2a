// shared/src/utils/reentrancy_guard.rs

use crate::errors::Error;
use scale::{Decode, Encode};

/// Storage-embeddable guard against nested re-entry into state-mutating
/// messages. A contract holds one guard in its storage struct (field name
/// `reentrancy_guard`) and wraps each message body in [`non_reentrant!`].
#[derive(Debug, Default, Clone, Encode, Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct ReentrancyGuard {
    entered: bool,
}

impl ReentrancyGuard {
    #[must_use]
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Mark the guard as entered, failing if it already is.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.entered {
            return Err(Error::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    /// Release the guard. Must run on every exit path, including errors,
    /// so that a failed call does not lock the contract.
    pub fn exit(&mut self) {
        self.entered = false;
    }

    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

/// Wrap a message body so it cannot be re-entered through a cross-contract
/// callback. The guard is released whether the body returns `Ok` or `Err`.
#[macro_export]
macro_rules! non_reentrant {
    ($self:ident, $body:block) => {{
        $self.reentrancy_guard.enter()?;
        let result = (|| $body)();
        $self.reentrancy_guard.exit();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nested_entry() {
        let mut guard = ReentrancyGuard::new();
        assert!(guard.enter().is_ok());
        assert_eq!(guard.enter(), Err(Error::ReentrantCall));
    }

    #[test]
    fn reusable_after_exit() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        guard.exit();
        assert!(!guard.is_entered());
        assert!(guard.enter().is_ok());
    }
}
