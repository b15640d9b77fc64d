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

//! Account row public API tests.

use credit_ledger_rs::{
    Account, AccountId, Balance, LedgerError, NewTransaction, TransactionId, TransactionKind,
};
use std::cell::Cell;

fn counter() -> impl FnMut() -> TransactionId {
    let mut next = 0;
    move || {
        next += 1;
        TransactionId(next)
    }
}

// === Basic Account Tests ===

#[test]
fn new_account_has_zero_balance() {
    let account = Account::new(AccountId(1), 1000);
    let snapshot = account.snapshot();
    assert_eq!(snapshot.balance, 0);
    assert_eq!(snapshot.limit, 1000);
    assert_eq!(account.entry_count(), 0);
}

#[test]
fn credit_increases_balance() {
    let account = Account::new(AccountId(1), 0);
    let (balance, entry) = account
        .post(NewTransaction::credit(50, "deposit"), counter())
        .unwrap();
    assert_eq!(balance, Balance { limit: 0, balance: 50 });
    assert_eq!(entry.kind, TransactionKind::Credit);
    assert_eq!(entry.account_id, AccountId(1));
}

#[test]
fn postings_accumulate() {
    let account = Account::new(AccountId(1), 100);
    let mut ids = counter();
    account.post(NewTransaction::credit(100, "a"), &mut ids).unwrap();
    account.post(NewTransaction::debit(150, "b"), &mut ids).unwrap();
    account.post(NewTransaction::credit(25, "c"), &mut ids).unwrap();
    assert_eq!(account.snapshot().balance, -25);
    assert_eq!(account.entry_count(), 3);
}

#[test]
fn debit_uses_the_credit_limit() {
    let account = Account::new(AccountId(1), 500);
    let (balance, _) = account
        .post(NewTransaction::debit(500, "all in"), counter())
        .unwrap();
    assert_eq!(balance.balance, -500);
}

#[test]
fn debit_beyond_limit_is_rejected() {
    let account = Account::new(AccountId(1), 500);
    let result = account.post(NewTransaction::debit(501, "too much"), counter());
    assert_eq!(result.unwrap_err(), LedgerError::LimitExceeded);
    assert_eq!(account.snapshot().balance, 0);
    assert_eq!(account.entry_count(), 0);
}

#[test]
fn credit_restores_room_for_debits() {
    let account = Account::new(AccountId(1), 100);
    let mut ids = counter();
    account.post(NewTransaction::debit(100, "a"), &mut ids).unwrap();
    assert!(account.post(NewTransaction::debit(1, "b"), &mut ids).is_err());
    account.post(NewTransaction::credit(40, "c"), &mut ids).unwrap();
    let (balance, _) = account.post(NewTransaction::debit(40, "d"), &mut ids).unwrap();
    assert_eq!(balance.balance, -100);
}

#[test]
fn entries_keep_the_posted_fields() {
    let account = Account::new(AccountId(3), 0);
    let (_, entry) = account
        .post(NewTransaction::credit(77, "bonus"), || TransactionId(9))
        .unwrap();
    assert_eq!(entry.id, TransactionId(9));
    assert_eq!(entry.account_id, AccountId(3));
    assert_eq!(entry.amount, 77);
    assert_eq!(entry.description, "bonus");
}

#[test]
fn ids_are_only_drawn_for_accepted_postings() {
    let account = Account::new(AccountId(1), 10);
    let drawn = Cell::new(0);
    let draw = || {
        drawn.set(drawn.get() + 1);
        TransactionId(drawn.get())
    };

    account.post(NewTransaction::debit(10, "ok"), draw).unwrap();
    let _ = account.post(NewTransaction::debit(1, "no"), draw);
    assert_eq!(drawn.get(), 1);
}

// === Statement Tests ===

#[test]
fn statement_lists_newest_first() {
    let account = Account::new(AccountId(1), 1000);
    let mut ids = counter();
    account.post(NewTransaction::credit(100, "t1"), &mut ids).unwrap();
    account.post(NewTransaction::debit(30, "t2"), &mut ids).unwrap();
    account.post(NewTransaction::credit(5, "t3"), &mut ids).unwrap();

    let statement = account.statement(10);
    let descriptions: Vec<&str> = statement
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["t3", "t2", "t1"]);
    assert_eq!(statement.balance, 75);
    assert_eq!(statement.limit, 1000);
}

#[test]
fn statement_timestamps_are_non_increasing() {
    let account = Account::new(AccountId(1), 0);
    let mut ids = counter();
    for i in 0..20 {
        account.post(NewTransaction::credit(i, "c"), &mut ids).unwrap();
    }
    let statement = account.statement(10);
    assert!(
        statement
            .transactions
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
}

#[test]
fn statement_of_fresh_account_is_empty() {
    let account = Account::new(AccountId(1), 0);
    assert!(account.statement(10).transactions.is_empty());
}

#[test]
fn snapshot_serializes_with_plain_field_names() {
    let account = Account::new(AccountId(8), 250);
    let json = serde_json::to_value(account.snapshot()).unwrap();
    assert_eq!(json["id"], 8);
    assert_eq!(json["limit"], 250);
    assert_eq!(json["balance"], 0);
}
