// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Process-local ledger store.
//!
//! Accounts live in a [`DashMap`]; each [`Account`] carries its own row
//! mutex. A lookup clones the row's `Arc` and releases the map shard before
//! the row is locked, so a slow posting on one account never blocks the
//! shard for its neighbours.

use super::{LedgerStore, SEED_ACCOUNTS};
use crate::account::{Account, AccountSnapshot, Balance};
use crate::base::{AccountId, TransactionId};
use crate::statement::{Statement, STATEMENT_SIZE};
use crate::transaction::NewTransaction;
use crate::LedgerError;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Ledger store backed by process memory.
///
/// Holds the same guarantees as [`PostgresStore`](super::PostgresStore) for a
/// single process. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryStore {
    accounts: DashMap<AccountId, Arc<Account>>,
    /// Last transaction id handed out.
    last_transaction_id: AtomicI64,
}

impl InMemoryStore {
    /// Creates a store with no accounts.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            last_transaction_id: AtomicI64::new(0),
        }
    }

    /// Creates a store holding the [`SEED_ACCOUNTS`].
    pub fn seeded() -> Self {
        Self::with_accounts(SEED_ACCOUNTS)
    }

    /// Creates a store holding the given `(id, limit)` accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (AccountId, u32)>) -> Self {
        let store = Self::new();
        for (id, limit) in accounts {
            store.open_account(id, limit);
        }
        store
    }

    /// Opens an account with a zero balance.
    ///
    /// Returns `false` and leaves the existing row untouched if the id is
    /// already taken.
    pub fn open_account(&self, id: AccountId, limit: u32) -> bool {
        match self.accounts.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Account::new(id, limit)));
                true
            }
        }
    }

    /// Number of committed entries for an account, or `None` if it does not
    /// exist.
    pub fn entry_count(&self, id: AccountId) -> Option<usize> {
        self.row(id).ok().map(|account| account.entry_count())
    }

    fn row(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.accounts
            .get(&id)
            .map(|account| Arc::clone(account.value()))
            .ok_or(LedgerError::AccountNotFound)
    }

    fn next_transaction_id(&self) -> TransactionId {
        TransactionId(self.last_transaction_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn account(&self, account_id: AccountId) -> Result<AccountSnapshot, LedgerError> {
        Ok(self.row(account_id)?.snapshot())
    }

    async fn post(
        &self,
        account_id: AccountId,
        transaction: NewTransaction,
    ) -> Result<Balance, LedgerError> {
        let account = self.row(account_id)?;
        let (balance, _) = account.post(transaction, || self.next_transaction_id())?;
        Ok(balance)
    }

    async fn statement(&self, account_id: AccountId) -> Result<Statement, LedgerError> {
        Ok(self.row(account_id)?.statement(STATEMENT_SIZE))
    }
}
