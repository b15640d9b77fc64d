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

//! Ledger entries.
//!
//! A [`NewTransaction`] is what a caller asks to post; a [`Transaction`] is
//! the immutable record the store appends once the balance change commits.

use crate::base::{AccountId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a posting.
///
/// Serialized with the single-letter codes stored in the `transactions.kind`
/// column (`"c"` / `"d"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "c")]
    Credit,
    #[serde(rename = "d")]
    Debit,
}

impl TransactionKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Credit => "c",
            Self::Debit => "d",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(Self::Credit),
            "d" => Some(Self::Debit),
            _ => None,
        }
    }

    /// Signed balance delta for `amount` in this direction.
    pub fn signed(&self, amount: u32) -> i64 {
        match self {
            Self::Credit => i64::from(amount),
            Self::Debit => -i64::from(amount),
        }
    }
}

/// A posting request, before the store has accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: u32,
    pub kind: TransactionKind,
    pub description: String,
}

impl NewTransaction {
    pub fn new(amount: u32, kind: TransactionKind, description: impl Into<String>) -> Self {
        Self {
            amount,
            kind,
            description: description.into(),
        }
    }

    pub fn credit(amount: u32, description: impl Into<String>) -> Self {
        Self::new(amount, TransactionKind::Credit, description)
    }

    pub fn debit(amount: u32, description: impl Into<String>) -> Self {
        Self::new(amount, TransactionKind::Debit, description)
    }

    pub fn delta(&self) -> i64 {
        self.kind.signed(self.amount)
    }
}

/// A committed ledger entry. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub amount: u32,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
