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

//! Store contract checks shared by the in-memory and Postgres test suites.
//!
//! Each check expects a freshly opened account with the stated limit and a
//! zero balance.

#![allow(dead_code)]

use credit_ledger_rs::{
    AccountId, Balance, LedgerError, LedgerStore, NewTransaction, TransactionKind,
};
use std::sync::Arc;

/// Limit the scenario checks expect.
pub const SCENARIO_LIMIT: u32 = 1000;

/// debit 500, debit 600 (rejected), credit 2000, statement.
pub async fn limit_scenario<S: LedgerStore>(store: &S, account: AccountId) {
    let balance = store
        .post(account, NewTransaction::debit(500, "rent"))
        .await
        .unwrap();
    assert_eq!(balance, Balance { limit: 1000, balance: -500 });

    let rejected = store.post(account, NewTransaction::debit(600, "tv")).await;
    assert_eq!(rejected, Err(LedgerError::LimitExceeded));
    assert_eq!(store.account(account).await.unwrap().balance, -500);

    let balance = store
        .post(account, NewTransaction::credit(2000, "salary"))
        .await
        .unwrap();
    assert_eq!(balance, Balance { limit: 1000, balance: 1500 });

    let statement = store.statement(account).await.unwrap();
    assert_eq!(statement.balance, 1500);
    assert_eq!(statement.limit, 1000);
    let entries: Vec<(u32, TransactionKind)> = statement
        .transactions
        .iter()
        .map(|t| (t.amount, t.kind))
        .collect();
    assert_eq!(
        entries,
        vec![(2000, TransactionKind::Credit), (500, TransactionKind::Debit)]
    );
}

/// T1 credit 100, T2 debit 30, T3 credit 5 come back as [T3, T2, T1].
pub async fn newest_first<S: LedgerStore>(store: &S, account: AccountId) {
    store.post(account, NewTransaction::credit(100, "t1")).await.unwrap();
    store.post(account, NewTransaction::debit(30, "t2")).await.unwrap();
    store.post(account, NewTransaction::credit(5, "t3")).await.unwrap();

    let statement = store.statement(account).await.unwrap();
    let descriptions: Vec<&str> = statement
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["t3", "t2", "t1"]);
    assert_eq!(statement.balance, 75);
}

/// Statements carry at most ten entries.
pub async fn statement_is_capped<S: LedgerStore>(store: &S, account: AccountId) {
    for amount in 1..=15u32 {
        store
            .post(account, NewTransaction::credit(amount, format!("c{amount}")))
            .await
            .unwrap();
    }

    let statement = store.statement(account).await.unwrap();
    assert_eq!(statement.transactions.len(), 10);
    assert_eq!(statement.transactions[0].description, "c15");
    assert_eq!(statement.transactions[9].description, "c6");
    assert_eq!(statement.balance, (1..=15).sum::<i64>());
}

pub async fn empty_statement<S: LedgerStore>(store: &S, account: AccountId) {
    let statement = store.statement(account).await.unwrap();
    assert!(statement.transactions.is_empty());
    assert_eq!(statement.balance, 0);
}

pub async fn repeated_statements_match<S: LedgerStore>(store: &S, account: AccountId) {
    store.post(account, NewTransaction::debit(10, "a")).await.unwrap();
    store.post(account, NewTransaction::credit(3, "b")).await.unwrap();

    let first = store.statement(account).await.unwrap();
    let second = store.statement(account).await.unwrap();
    assert_eq!(first.balance, second.balance);
    assert_eq!(first.limit, second.limit);
    assert_eq!(first.transactions, second.transactions);
}

pub async fn zero_amount_is_a_noop<S: LedgerStore>(store: &S, account: AccountId) {
    let balance = store
        .post(account, NewTransaction::debit(0, "noop"))
        .await
        .unwrap();
    assert_eq!(balance, Balance { limit: 1000, balance: 0 });

    let statement = store.statement(account).await.unwrap();
    assert_eq!(statement.transactions.len(), 1);
    assert_eq!(statement.transactions[0].amount, 0);
}

pub async fn unknown_account<S: LedgerStore>(store: &S, missing: AccountId) {
    assert_eq!(
        store.post(missing, NewTransaction::credit(10, "x")).await,
        Err(LedgerError::AccountNotFound)
    );
    assert_eq!(store.statement(missing).await.unwrap_err(), LedgerError::AccountNotFound);
    assert_eq!(store.account(missing).await.unwrap_err(), LedgerError::AccountNotFound);
}

/// `tasks` concurrent debits of `debit` against a fresh account with
/// `limit`; exactly `limit / debit` must succeed.
pub async fn concurrent_debits<S: LedgerStore + 'static>(
    store: Arc<S>,
    account: AccountId,
    limit: u32,
    debit: u32,
    tasks: usize,
) {
    let handles: Vec<_> = (0..tasks)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .post(account, NewTransaction::debit(debit, format!("d{}", i % 100)))
                    .await
            })
        })
        .collect();

    let mut accepted = 0i64;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(balance) => {
                assert!(balance.balance + balance.limit >= 0);
                accepted += 1;
            }
            Err(LedgerError::LimitExceeded) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let expected = i64::from(limit / debit).min(tasks as i64);
    assert_eq!(accepted, expected);

    let snapshot = store.account(account).await.unwrap();
    assert_eq!(snapshot.balance, -i64::from(debit) * accepted);
}
