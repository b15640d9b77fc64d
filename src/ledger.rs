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

//! Ledger front door.
//!
//! The [`Ledger`] is what request handlers talk to. It validates postings,
//! then hands them to a [`LedgerStore`], which does the actual work:
//!
//! - **Credits** raise the balance.
//! - **Debits** lower it, and are rejected if the balance would fall below
//!   `-limit`.
//! - **Statements** return the balance with the ten most recent entries.
//!
//! # Thread Safety
//!
//! A `Ledger` holds no mutable state of its own. Share it behind an `Arc`;
//! all coordination between concurrent requests happens in the store.

use crate::account::{AccountSnapshot, Balance};
use crate::base::AccountId;
use crate::statement::Statement;
use crate::store::LedgerStore;
use crate::transaction::NewTransaction;
use crate::LedgerError;
use tracing::instrument;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 10;

/// Validating facade over a [`LedgerStore`].
///
/// # Invariants
///
/// - Only postings with a positive amount and a 1 to
///   [`MAX_DESCRIPTION_CHARS`] character description without control
///   characters reach the store.
/// - Every account's balance stays at or above `-limit` (enforced by the
///   store).
pub struct Ledger<S> {
    store: S,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Ledger { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Posts a credit or debit against an account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] - amount is zero.
    /// - [`LedgerError::InvalidDescription`] - description is empty, too long
    ///   or contains a control character.
    /// - [`LedgerError::AccountNotFound`] - unknown account.
    /// - [`LedgerError::LimitExceeded`] - the debit would break the limit.
    /// - [`LedgerError::Store`] - the store failed; nothing was committed.
    #[instrument(
        level = "debug",
        skip(self, transaction),
        fields(
            account_id = %account_id,
            amount = transaction.amount,
            kind = transaction.kind.code()
        )
    )]
    pub async fn post(
        &self,
        account_id: AccountId,
        transaction: NewTransaction,
    ) -> Result<Balance, LedgerError> {
        validate(&transaction)?;
        self.store.post(account_id, transaction).await
    }

    /// Returns the account's balance and its most recent entries.
    #[instrument(level = "debug", skip(self), fields(account_id = %account_id))]
    pub async fn statement(&self, account_id: AccountId) -> Result<Statement, LedgerError> {
        self.store.statement(account_id).await
    }

    /// Returns the account's limit and balance.
    #[instrument(level = "debug", skip(self), fields(account_id = %account_id))]
    pub async fn account(&self, account_id: AccountId) -> Result<AccountSnapshot, LedgerError> {
        self.store.account(account_id).await
    }
}

/// Checks a posting before it is sent to the store.
pub fn validate(transaction: &NewTransaction) -> Result<(), LedgerError> {
    if transaction.amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }

    let description = &transaction.description;
    let chars = description.chars().count();
    // Postgres text cannot hold NUL.
    let printable = !description.chars().any(char::is_control);
    if chars == 0 || chars > MAX_DESCRIPTION_CHARS || !printable {
        return Err(LedgerError::InvalidDescription {
            max: MAX_DESCRIPTION_CHARS,
        });
    }

    Ok(())
}
