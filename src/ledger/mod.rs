//! The transaction list and budget map, plus their persistence.
//!
//! A [`Ledger`] is the single owner of both collections. Every mutation is
//! validated before it touches memory, then written through to the
//! [`KeyValueStore`]. If that write fails the change stays in memory and the
//! ledger is marked dirty; the next write flushes everything.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::db::KeyValueStore;
use crate::error::{LedgerError, StorageError};
use crate::models::{category, Budget, NewTransaction, Transaction, TransactionDraft};
use crate::reports::Snapshot;

pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
pub(crate) const BUDGETS_KEY: &str = "budgets";

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Hands out millisecond-timestamp ids that never repeat, even when several
/// are requested within the same millisecond.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn resume_after(last: i64) -> Self {
        Self { last }
    }

    fn next(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

pub(crate) struct Ledger<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    budgets: BTreeMap<String, Decimal>,
    ids: IdGenerator,
    dirty: bool,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Read both collections from `store`. Missing, unreadable or malformed
    /// data loads as empty; this never fails.
    pub(crate) fn load(store: S) -> Self {
        let transactions = load_transactions(&store);
        let budgets = load_budgets(&store);
        let last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "ledger loaded"
        );
        Self {
            store,
            transactions,
            budgets,
            ids: IdGenerator::resume_after(last_id),
            dirty: false,
        }
    }

    /// Stored transactions in insertion order.
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budgets(&self) -> &BTreeMap<String, Decimal> {
        &self.budgets
    }

    /// Borrow the current state for aggregation.
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.transactions, &self.budgets)
    }

    /// Whether some in-memory change has not reached storage yet.
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn add_transaction(
        &mut self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, LedgerError> {
        let new = draft.validate()?;
        note_off_catalog(&new);
        let txn = Transaction::new(self.next_id(), new);
        self.transactions.push(txn.clone());
        info!(id = txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        self.save(TRANSACTIONS_KEY)?;
        Ok(txn)
    }

    /// Insert or overwrite the limit for a category.
    pub(crate) fn set_budget(&mut self, category: &str, limit: Decimal) -> Result<Budget, LedgerError> {
        let budget = Budget::new(category, limit)?;
        self.budgets.insert(budget.category.clone(), budget.limit);
        info!(category = %budget.category, limit = %budget.limit, "budget set");
        self.save(BUDGETS_KEY)?;
        Ok(budget)
    }

    /// Remove a category's budget. Returns whether one existed; a missing
    /// category is not an error.
    pub(crate) fn delete_budget(&mut self, category: &str) -> Result<bool, LedgerError> {
        let removed = self.budgets.remove(category.trim()).is_some();
        if removed {
            info!(category = category.trim(), "budget deleted");
        }
        self.save(BUDGETS_KEY)?;
        Ok(removed)
    }

    /// Validate each candidate on its own and append the valid ones as one
    /// batch. Invalid candidates are counted and skipped.
    pub(crate) fn import_transactions<I>(&mut self, candidates: I) -> Result<ImportSummary, LedgerError>
    where
        I: IntoIterator<Item = TransactionDraft>,
    {
        let mut summary = ImportSummary::default();
        let mut batch: Vec<NewTransaction> = Vec::new();
        for draft in candidates {
            match draft.validate() {
                Ok(new) => batch.push(new),
                Err(e) => {
                    debug!(error = %e, "import candidate rejected");
                    summary.rejected += 1;
                }
            }
        }

        summary.accepted = batch.len();
        if batch.is_empty() {
            return Ok(summary);
        }

        self.transactions.reserve(batch.len());
        for new in batch {
            note_off_catalog(&new);
            let id = self.next_id();
            self.transactions.push(Transaction::new(id, new));
        }
        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "transactions imported"
        );
        self.save(TRANSACTIONS_KEY)?;
        Ok(summary)
    }

    /// Write both collections to storage.
    pub(crate) fn persist(&mut self) -> Result<(), StorageError> {
        let result = self
            .write(TRANSACTIONS_KEY)
            .and_then(|()| self.write(BUDGETS_KEY));
        self.track(result)
    }

    #[cfg(test)]
    pub(crate) fn into_store(self) -> S {
        self.store
    }

    fn next_id(&mut self) -> i64 {
        self.ids.next(Utc::now().timestamp_millis())
    }

    /// Write one key, or everything if an earlier write was lost.
    fn save(&mut self, key: &'static str) -> Result<(), StorageError> {
        if self.dirty {
            return self.persist();
        }
        let result = self.write(key);
        self.track(result)
    }

    fn track(&mut self, result: Result<(), StorageError>) -> Result<(), StorageError> {
        match result {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to persist ledger; keeping changes in memory");
                self.dirty = true;
                Err(e)
            }
        }
    }

    fn write(&mut self, key: &'static str) -> Result<(), StorageError> {
        let json = match key {
            BUDGETS_KEY => encode(key, &self.budgets)?,
            _ => encode(key, &self.transactions)?,
        };
        self.store.set(key, &json)
    }
}

fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })
}

fn note_off_catalog(txn: &NewTransaction) {
    if category::find_by_name(txn.kind, &txn.category).is_none() {
        debug!(category = %txn.category, kind = %txn.kind, "category is not in the catalog");
    }
}

fn read_key<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "could not read from storage; starting empty");
            None
        }
    }
}

fn load_transactions<S: KeyValueStore>(store: &S) -> Vec<Transaction> {
    let Some(raw) = read_key(store, TRANSACTIONS_KEY) else {
        return Vec::new();
    };
    let entries: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "stored transactions are not a JSON array; starting empty");
            return Vec::new();
        }
    };

    let total = entries.len();
    let transactions: Vec<Transaction> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Transaction>(entry).ok())
        .filter(Transaction::is_valid)
        .collect();
    if transactions.len() < total {
        warn!(
            dropped = total - transactions.len(),
            "dropped malformed stored transactions"
        );
    }
    transactions
}

fn load_budgets<S: KeyValueStore>(store: &S) -> BTreeMap<String, Decimal> {
    let Some(raw) = read_key(store, BUDGETS_KEY) else {
        return BTreeMap::new();
    };
    let entries: serde_json::Map<String, Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "stored budgets are not a JSON object; starting empty");
            return BTreeMap::new();
        }
    };

    let total = entries.len();
    let budgets: BTreeMap<String, Decimal> = entries
        .into_iter()
        .filter_map(|(category, value)| {
            let limit: Decimal = serde_json::from_value(value).ok()?;
            (limit > Decimal::ZERO && !category.trim().is_empty()).then_some((category, limit))
        })
        .collect();
    if budgets.len() < total {
        warn!(dropped = total - budgets.len(), "dropped malformed stored budgets");
    }
    budgets
}
