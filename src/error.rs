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

//! Error types for ledger operations.

use thiserror::Error;

/// Ledger operation errors.
///
/// `AccountNotFound`, `LimitExceeded` and `Store` are the outcomes a
/// [`LedgerStore`](crate::LedgerStore) can return. The validation variants are
/// raised by [`Ledger`](crate::Ledger) before a request reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Referenced account has no row
    #[error("account not found")]
    AccountNotFound,

    /// Posting would push the balance below `-limit`
    #[error("transaction would exceed the account limit")]
    LimitExceeded,

    /// Connectivity or transaction failure in the backing store.
    /// Nothing was committed, so the request can be retried.
    #[error("store failure during {operation}: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    /// Amount is outside `1..=u32::MAX`
    #[error("invalid amount (must be a positive integer)")]
    InvalidAmount,

    /// Description is empty, too long, or holds control characters
    #[error("invalid description (must be 1 to {max} printable characters)")]
    InvalidDescription { max: usize },
}

impl LedgerError {
    pub fn store(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Store {
            operation,
            message: message.into(),
        }
    }

    /// Returns `true` for outcomes caused by the request itself rather than
    /// by the store; these are final and never worth retrying.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store { .. })
    }
}
