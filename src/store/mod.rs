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

//! Ledger storage boundary.
//!
//! A [`LedgerStore`] owns account rows and their ledger entries. Every
//! implementation must uphold the same contract:
//!
//! - `balance + limit >= 0` holds in every committed state.
//! - A posting is checked against the balance at write time, never against a
//!   value read earlier, and the check and the write are indivisible with
//!   respect to other writers on the same account.
//! - The balance change and the ledger entry commit together or not at all.
//!   Dropping an in-flight future leaves no partial effect.
//! - Postings on different accounts do not contend.
//!
//! Stores never retry and never log; both are left to the caller.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{PoolConfig, PostgresStore};

use crate::account::{AccountSnapshot, Balance};
use crate::base::AccountId;
use crate::statement::Statement;
use crate::transaction::NewTransaction;
use crate::LedgerError;
use async_trait::async_trait;

/// Accounts provisioned by the bundled schema, as `(id, limit)`.
pub const SEED_ACCOUNTS: [(AccountId, u32); 5] = [
    (AccountId(1), 100_000),
    (AccountId(2), 80_000),
    (AccountId(3), 1_000_000),
    (AccountId(4), 10_000_000),
    (AccountId(5), 500_000),
];

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Looks up an account's current limit and balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - no account with this id.
    /// - [`LedgerError::Store`] - the store could not be reached.
    async fn account(&self, account_id: AccountId) -> Result<AccountSnapshot, LedgerError>;

    /// Applies `transaction` to the account and appends it to the ledger.
    ///
    /// A zero amount is accepted: the balance does not move but the entry is
    /// still recorded.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - no account with this id.
    /// - [`LedgerError::LimitExceeded`] - the new balance would fall below
    ///   `-limit`. Nothing is written.
    /// - [`LedgerError::Store`] - nothing was committed.
    async fn post(
        &self,
        account_id: AccountId,
        transaction: NewTransaction,
    ) -> Result<Balance, LedgerError>;

    /// Returns the balance and the most recent entries of an account, read
    /// from a single consistent snapshot.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - no account with this id.
    /// - [`LedgerError::Store`] - the store could not be reached.
    async fn statement(&self, account_id: AccountId) -> Result<Statement, LedgerError>;
}
