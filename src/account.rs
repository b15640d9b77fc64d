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

//! Account management.
//!
//! [`AccountSnapshot`] is the read-only view every store hands out.
//! [`Account`] is the in-process account row used by
//! [`InMemoryStore`](crate::InMemoryStore): balance and ledger entries live
//! behind one mutex, so the limit check and both writes happen in a single
//! critical section. Only the newest [`STATEMENT_SIZE`] entries are kept;
//! older ones are counted but dropped.
//!
//! # Example
//!
//! ```
//! use credit_ledger_rs::{Account, AccountId, NewTransaction, TransactionId};
//!
//! let account = Account::new(AccountId(1), 1000);
//! let (balance, _) = account
//!     .post(NewTransaction::debit(400, "rent"), || TransactionId(1))
//!     .unwrap();
//! assert_eq!(balance.balance, -400);
//! assert_eq!(account.snapshot().limit, 1000);
//! ```

use crate::base::{AccountId, TransactionId};
use crate::statement::{STATEMENT_SIZE, Statement, StatementEntry};
use crate::transaction::{NewTransaction, Transaction};
use crate::LedgerError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Point-in-time view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub limit: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Limit and balance right after a successful post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub limit: i64,
    pub balance: i64,
}

#[derive(Debug)]
struct AccountData {
    id: AccountId,
    limit: i64,
    balance: i64,
    created_at: DateTime<Utc>,
    /// Newest committed entries in commit order, at most `STATEMENT_SIZE`.
    recent: VecDeque<Transaction>,
    /// Entries ever committed, including those no longer in `recent`.
    entry_count: usize,
}

impl AccountData {
    fn new(id: AccountId, limit: u32) -> Self {
        Self {
            id,
            limit: i64::from(limit),
            balance: 0,
            created_at: Utc::now(),
            recent: VecDeque::with_capacity(STATEMENT_SIZE),
            entry_count: 0,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance + self.limit >= 0,
            "Invariant violated: balance {} is below -limit {}",
            self.balance,
            self.limit
        );
    }

    /// Balance after applying `delta`, if the limit allows it.
    fn checked_balance(&self, delta: i64) -> Result<i64, LedgerError> {
        let balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::store("post", "balance out of range"))?;
        if balance < -self.limit {
            return Err(LedgerError::LimitExceeded);
        }
        Ok(balance)
    }

    /// Commit timestamp that never goes backwards for this account.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.recent.back() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        }
    }
}

/// In-process account row.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    /// Opens an account with a zero balance.
    pub fn new(id: AccountId, limit: u32) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(id, limit)),
        }
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        let data = self.inner.lock();
        AccountSnapshot {
            id: data.id,
            limit: data.limit,
            balance: data.balance,
            created_at: data.created_at,
        }
    }

    /// Applies `transaction` if the resulting balance stays within the limit.
    ///
    /// The check and both writes run under the row lock. `next_id` is only
    /// called once the posting has been accepted, so rejected postings never
    /// consume an id.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::LimitExceeded`] - nothing is written.
    /// - [`LedgerError::Store`] - the balance would overflow `i64`.
    pub fn post(
        &self,
        transaction: NewTransaction,
        next_id: impl FnOnce() -> TransactionId,
    ) -> Result<(Balance, Transaction), LedgerError> {
        let mut data = self.inner.lock();
        let balance = data.checked_balance(transaction.delta())?;

        let entry = Transaction {
            id: next_id(),
            account_id: data.id,
            amount: transaction.amount,
            kind: transaction.kind,
            description: transaction.description,
            created_at: data.next_timestamp(),
        };

        data.balance = balance;
        data.recent.push_back(entry.clone());
        if data.recent.len() > STATEMENT_SIZE {
            data.recent.pop_front();
        }
        data.entry_count += 1;
        data.assert_invariants();

        Ok((
            Balance {
                limit: data.limit,
                balance: data.balance,
            },
            entry,
        ))
    }

    /// Balance plus the `size` most recent entries, newest first, read
    /// under one lock acquisition. `size` is capped at [`STATEMENT_SIZE`].
    pub fn statement(&self, size: usize) -> Statement {
        let data = self.inner.lock();
        let transactions = data
            .recent
            .iter()
            .rev()
            .take(size)
            .map(StatementEntry::from)
            .collect();

        Statement {
            limit: data.limit,
            balance: data.balance,
            as_of: Utc::now(),
            transactions,
        }
    }

    /// Number of committed entries.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().entry_count
    }
}
