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

//! Account statements.

use crate::transaction::{Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries returned in a statement.
pub const STATEMENT_SIZE: usize = 10;

/// Balance of an account together with its most recent entries.
///
/// `transactions` is ordered newest first (by commit time, then by
/// transaction id) and holds at most [`STATEMENT_SIZE`] entries. The balance
/// and the entries always come from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub limit: i64,
    pub balance: i64,
    /// When the snapshot was taken.
    pub as_of: DateTime<Utc>,
    pub transactions: Vec<StatementEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub amount: u32,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for StatementEntry {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount,
            kind: transaction.kind,
            description: transaction.description.clone(),
            created_at: transaction.created_at,
        }
    }
}

impl From<Transaction> for StatementEntry {
    fn from(transaction: Transaction) -> Self {
        Self {
            amount: transaction.amount,
            kind: transaction.kind,
            description: transaction.description,
            created_at: transaction.created_at,
        }
    }
}
