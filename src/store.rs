//! Balance persistence.
//!
//! The table keeps its balance in a [`Ledger`], which writes every committed
//! value through to a [`BalanceStore`].

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;

/// A keyed integer store that survives restarts.
pub trait BalanceStore {
    /// Loads the value for `key`, or `default` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or holds a malformed value.
    fn load(&self, key: &str, default: u64) -> Result<u64, StoreError>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// An in-process store. Values live as long as the store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one value.
    #[must_use]
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut values = HashMap::new();
        values.insert(String::from(key), value);
        Self { values }
    }

    /// Returns the stored value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }
}

impl BalanceStore for MemoryStore {
    fn load(&self, key: &str, default: u64) -> Result<u64, StoreError> {
        Ok(self.get(key).unwrap_or(default))
    }

    fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(String::from(key), value);
        Ok(())
    }
}

/// The result of a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    /// Balance after the mutation.
    pub balance: u64,
    /// Whether the balance reached the store.
    pub saved: bool,
}

/// The authoritative balance, written through to a store.
///
/// A failed save never rolls back the in-memory balance. The ledger stays
/// marked unsaved and the next mutation or [`Ledger::flush`] retries.
pub struct Ledger {
    store: Box<dyn BalanceStore>,
    key: String,
    balance: u64,
    unsaved: bool,
}

impl Ledger {
    /// Opens the ledger, loading the stored balance.
    ///
    /// Falls back to `default` if the store cannot be read.
    #[must_use]
    pub fn open(store: Box<dyn BalanceStore>, key: &str, default: u64) -> Self {
        let balance = store.load(key, default).unwrap_or_else(|err| {
            log::warn!("failed to load balance for {key}, using {default}: {err}");
            default
        });

        Self {
            store,
            key: String::from(key),
            balance,
            unsaved: false,
        }
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns whether the last committed balance has not reached the store.
    #[must_use]
    pub const fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Returns whether `amount` can be debited.
    #[must_use]
    pub const fn covers(&self, amount: u64) -> bool {
        amount <= self.balance
    }

    /// Removes `amount` from the balance.
    ///
    /// Returns `None` and leaves the balance untouched if it does not cover
    /// the amount.
    pub fn debit(&mut self, amount: u64) -> Option<Commit> {
        let balance = self.balance.checked_sub(amount)?;
        Some(self.commit(balance))
    }

    /// Adds `amount` to the balance.
    pub fn credit(&mut self, amount: u64) -> Commit {
        self.commit(self.balance.saturating_add(amount))
    }

    /// Retries a failed save. Does nothing if the balance is already saved.
    ///
    /// # Errors
    ///
    /// Returns the store error if the balance still cannot be saved.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.unsaved {
            return Ok(());
        }
        self.store
            .save(&self.key, self.balance)
            .inspect_err(|err| log::warn!("retrying save for {} failed: {err}", self.key))?;
        self.unsaved = false;
        Ok(())
    }

    fn commit(&mut self, balance: u64) -> Commit {
        self.balance = balance;
        let saved = match self.store.save(&self.key, balance) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save balance {balance} for {}: {err}", self.key);
                false
            }
        };
        self.unsaved = !saved;
        Commit { balance, saved }
    }
}

#[cfg(feature = "json-store")]
pub use json::JsonFileStore;

#[cfg(feature = "json-store")]
mod json {
    use alloc::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use crate::error::StoreError;

    use super::BalanceStore;

    /// A store backed by a JSON object of key to integer on disk.
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        /// Uses the file at `path`. The file is created on first save.
        ///
        /// A file that does not parse is reported by `load` and replaced by
        /// the next `save`, which then holds only the saved key.
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Returns the backing file path.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
            let bytes = match fs::read(&self.path) {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
                Err(err) => return Err(StoreError::Unavailable(err.to_string())),
            };

            serde_json::from_slice(&bytes).map_err(|err| StoreError::Corrupted {
                key: self.path.display().to_string(),
                reason: err.to_string(),
            })
        }
    }

    impl BalanceStore for JsonFileStore {
        fn load(&self, key: &str, default: u64) -> Result<u64, StoreError> {
            Ok(self.read_all()?.get(key).copied().unwrap_or(default))
        }

        fn save(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
            let mut values = match self.read_all() {
                Ok(values) => values,
                Err(StoreError::Corrupted { reason, .. }) => {
                    log::warn!(
                        "replacing unreadable balance file {}: {reason}",
                        self.path.display()
                    );
                    BTreeMap::new()
                }
                Err(err) => return Err(err),
            };
            values.insert(key.to_owned(), value);

            let bytes = serde_json::to_vec_pretty(&values).map_err(|err| {
                StoreError::Unavailable(format!("failed to encode balances: {err}"))
            })?;

            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, bytes).map_err(|err| StoreError::Unavailable(err.to_string()))?;
            fs::rename(&tmp, &self.path).map_err(|err| StoreError::Unavailable(err.to_string()))
        }
    }
}
