// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::models::CategoryKind;
use ledgerline::{db, engine, store};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn kind_strategy() -> impl Strategy<Value = CategoryKind> {
    prop_oneof![Just(CategoryKind::Income), Just(CategoryKind::Expense)]
}

proptest! {
    #[test]
    fn normalized_sign_matches_kind(
        cents in -10_000_000i64..10_000_000i64,
        kind in kind_strategy(),
    ) {
        let amount = Decimal::new(cents, 2);
        let stored = engine::normalize_amount(kind, amount);
        prop_assert_eq!(stored.abs(), amount.abs());
        match kind {
            CategoryKind::Expense => prop_assert!(stored <= Decimal::ZERO),
            CategoryKind::Income => prop_assert!(stored >= Decimal::ZERO),
        }
    }

    #[test]
    fn stored_amounts_always_match_kind(
        amounts in prop::collection::vec((-100_000i64..100_000i64, any::<bool>()), 1..20),
    ) {
        let mut conn = db::open_in_memory().unwrap();
        let user = store::create_user(&mut conn, "P", "p@example.com", "$argon2id$test").unwrap();
        let acct =
            store::create_account(&mut conn, user.id, "A", "checking", Decimal::ZERO).unwrap();
        let expense = store::create_category(&mut conn, "E", CategoryKind::Expense).unwrap();
        let income = store::create_category(&mut conn, "I", CategoryKind::Income).unwrap();

        let mut expected = Decimal::ZERO;
        for (cents, is_expense) in amounts {
            let amount = Decimal::new(cents, 2);
            let category = if is_expense { expense.id } else { income.id };
            let t = engine::add_transaction(&mut conn, acct.id, category, amount, "p", None)
                .unwrap();
            if is_expense {
                prop_assert!(t.amount <= Decimal::ZERO);
                expected -= amount.abs();
            } else {
                prop_assert!(t.amount >= Decimal::ZERO);
                expected += amount.abs();
            }
        }
        prop_assert_eq!(engine::balance(&conn, user.id).unwrap(), expected);
    }
}
