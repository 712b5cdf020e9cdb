//! Spending aggregation
//!
//! Reduces a validated transaction list into the totals every downstream
//! stage works from. Aggregates are a pure function of the input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub total_income: f64,
    pub total_expense: f64,
    /// `total_income - total_expense`, may be negative
    pub net_balance: f64,
    /// Summed expense per category, keyed in sorted order
    pub expense_by_category: BTreeMap<String, f64>,
    /// Expense incurred on Saturdays and Sundays
    pub weekend_expense: f64,
    /// Percent of income retained, 0 when there is no income
    pub savings_rate: f64,
    pub transaction_count: usize,
}

impl Aggregates {
    pub fn distinct_expense_categories(&self) -> usize {
        self.expense_by_category.len()
    }

    /// Category with the largest summed expense.
    /// Ties go to the first key in scan order.
    pub fn top_category(&self) -> Option<(&str, f64)> {
        let mut top: Option<(&str, f64)> = None;
        for (category, &amount) in &self.expense_by_category {
            match top {
                Some((_, best)) if amount <= best => {}
                _ => top = Some((category.as_str(), amount)),
            }
        }
        top
    }

    /// Positive part of the net balance
    pub fn monthly_savings(&self) -> f64 {
        self.net_balance.max(0.0)
    }
}

/// Aggregate a transaction list.
///
/// Sums are plain `f64` additions; [`crate::ingest::coerce_all`] rejects
/// batches whose income or expense total would not be finite.
pub fn aggregate(transactions: &[Transaction]) -> Aggregates {
    let mut agg = Aggregates {
        transaction_count: transactions.len(),
        ..Default::default()
    };

    for tx in transactions {
        if !tx.is_expense() {
            agg.total_income += tx.amount;
            continue;
        }

        agg.total_expense += tx.amount;
        *agg.expense_by_category
            .entry(tx.category.clone())
            .or_insert(0.0) += tx.amount;
        if tx.is_weekend() {
            agg.weekend_expense += tx.amount;
        }
    }

    agg.net_balance = agg.total_income - agg.total_expense;
    agg.savings_rate = if agg.total_income > 0.0 {
        agg.net_balance / agg.total_income * 100.0
    } else {
        0.0
    };

    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn tx(kind: TransactionType, amount: f64, category: &str, day: u32) -> Transaction {
        Transaction {
            id: None,
            kind,
            amount,
            category: category.to_string(),
            // January 2022: the 1st is a Saturday
            timestamp: NaiveDate::from_ymd_opt(2022, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let agg = aggregate(&[]);
        assert_eq!(agg, Aggregates::default());
        assert_eq!(agg.savings_rate, 0.0);
        assert!(agg.top_category().is_none());
    }

    #[test]
    fn test_totals_and_savings_rate() {
        let txs = vec![
            tx(TransactionType::Income, 5000.0, "Salary", 1),
            tx(TransactionType::Expense, 2000.0, "Food", 2),
        ];
        let agg = aggregate(&txs);

        assert_eq!(agg.total_income, 5000.0);
        assert_eq!(agg.total_expense, 2000.0);
        assert_eq!(agg.net_balance, 3000.0);
        assert_eq!(agg.savings_rate, 60.0);
        assert_eq!(agg.transaction_count, 2);
    }

    #[test]
    fn test_category_totals_only_count_expenses() {
        let txs = vec![
            tx(TransactionType::Income, 100.0, "Refund", 3),
            tx(TransactionType::Expense, 30.0, "Food", 3),
            tx(TransactionType::Expense, 20.0, "Food", 4),
            tx(TransactionType::Expense, 15.5, "Transport", 5),
        ];
        let agg = aggregate(&txs);

        assert_eq!(agg.distinct_expense_categories(), 2);
        assert_eq!(agg.expense_by_category["Food"], 50.0);
        assert!(!agg.expense_by_category.contains_key("Refund"));

        let sum: f64 = agg.expense_by_category.values().sum();
        assert_eq!(sum, agg.total_expense);
    }

    #[test]
    fn test_weekend_expense() {
        let txs = vec![
            tx(TransactionType::Expense, 40.0, "Fun", 1), // Saturday
            tx(TransactionType::Expense, 60.0, "Fun", 2), // Sunday
            tx(TransactionType::Expense, 100.0, "Rent", 3), // Monday
            tx(TransactionType::Income, 500.0, "Gift", 1),
        ];
        let agg = aggregate(&txs);
        assert_eq!(agg.weekend_expense, 100.0);
    }

    #[test]
    fn test_negative_savings_rate() {
        let txs = vec![
            tx(TransactionType::Income, 100.0, "Salary", 3),
            tx(TransactionType::Expense, 150.0, "Food", 3),
        ];
        let agg = aggregate(&txs);
        assert_eq!(agg.net_balance, -50.0);
        assert_eq!(agg.savings_rate, -50.0);
        assert_eq!(agg.monthly_savings(), 0.0);
    }

    #[test]
    fn test_top_category_ties_go_to_first_key() {
        let txs = vec![
            tx(TransactionType::Expense, 50.0, "Travel", 3),
            tx(TransactionType::Expense, 50.0, "Books", 3),
            tx(TransactionType::Expense, 10.0, "Coffee", 3),
        ];
        let agg = aggregate(&txs);
        assert_eq!(agg.top_category(), Some(("Books", 50.0)));
    }
}
