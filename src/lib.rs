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

//! # Credit Ledger
//!
//! This library provides an account ledger where every account has a fixed
//! credit limit. Credits and debits are posted against an account; a posting
//! that would push the balance below `-limit` is rejected, even when many
//! postings race on the same account.
//!
//! ## Core Components
//!
//! - [`LedgerStore`]: Storage contract with atomic post and statement reads
//! - [`PostgresStore`]: Production store on PostgreSQL
//! - [`InMemoryStore`]: Process-local store with the same guarantees
//! - [`Ledger`]: Validating front door used by the HTTP layer
//! - [`LedgerError`]: Error types for ledger operations
//!
//! ## Example
//!
//! ```
//! use credit_ledger_rs::{AccountId, InMemoryStore, Ledger, LedgerError, NewTransaction};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let ledger = Ledger::new(InMemoryStore::with_accounts([(AccountId(1), 1000)]));
//!
//! let balance = ledger.post(AccountId(1), NewTransaction::debit(500, "rent")).await.unwrap();
//! assert_eq!((balance.limit, balance.balance), (1000, -500));
//!
//! let rejected = ledger.post(AccountId(1), NewTransaction::debit(600, "tv")).await;
//! assert_eq!(rejected, Err(LedgerError::LimitExceeded));
//!
//! let statement = ledger.statement(AccountId(1)).await.unwrap();
//! assert_eq!(statement.transactions.len(), 1);
//! # });
//! ```
//!
//! ## Thread Safety
//!
//! No component keeps shared mutable state outside the store. Postings on the
//! same account are serialised by the store's row lock; postings on
//! different accounts proceed in parallel.

pub mod account;
mod base;
pub mod error;
mod ledger;
pub mod server;
mod statement;
pub mod store;
mod transaction;

pub use account::{Account, AccountSnapshot, Balance};
pub use base::{AccountId, TransactionId};
pub use error::LedgerError;
pub use ledger::{Ledger, MAX_DESCRIPTION_CHARS};
pub use statement::{STATEMENT_SIZE, Statement, StatementEntry};
pub use store::{InMemoryStore, LedgerStore, PoolConfig, PostgresStore, SEED_ACCOUNTS};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
