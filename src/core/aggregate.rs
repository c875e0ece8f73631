use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::model::{
    AnalyticsBundle, DailyTrendRow, Transaction, TypeSummaryRow, UserSummaryRow,
};

const TOP_USERS_LIMIT: usize = 10;

struct Accumulator {
    max: f64,
    min: f64,
    sum: f64,
    count: u64,
}

impl Accumulator {
    fn new(amount: f64) -> Self {
        Self {
            max: amount,
            min: amount,
            sum: amount,
            count: 1,
        }
    }

    fn add(&mut self, amount: f64) {
        self.max = self.max.max(amount);
        self.min = self.min.min(amount);
        self.sum += amount;
        self.count += 1;
    }
}

fn accumulate<'a, K: Ord>(
    transactions: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> K,
) -> BTreeMap<K, Accumulator> {
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for transaction in transactions {
        groups
            .entry(key(transaction))
            .and_modify(|acc| acc.add(transaction.amount_double))
            .or_insert_with(|| Accumulator::new(transaction.amount_double));
    }
    groups
}

/// One row per distinct user, in user id order.
pub fn user_summary(transactions: &[Transaction]) -> Vec<UserSummaryRow> {
    accumulate(transactions, |t| t.user_id.as_str())
        .into_iter()
        .map(|(user_id, acc)| UserSummaryRow {
            user_id: user_id.to_string(),
            max_amount: acc.max,
            min_amount: acc.min,
            average_amount: acc.sum / acc.count as f64,
            total_amount: acc.sum,
            transaction_count: acc.count,
        })
        .collect()
}

/// One row per distinct calendar date of `timestamp`, in date order.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailyTrendRow> {
    accumulate(transactions, |t| t.timestamp.date_naive())
        .into_iter()
        .map(|(date, acc): (NaiveDate, Accumulator)| DailyTrendRow {
            date,
            total_amount: acc.sum,
            transaction_count: acc.count,
        })
        .collect()
}

/// One row per distinct transaction type, in type order.
pub fn type_summary(transactions: &[Transaction]) -> Vec<TypeSummaryRow> {
    accumulate(transactions, |t| t.transaction_type.as_str())
        .into_iter()
        .map(|(transaction_type, acc)| TypeSummaryRow {
            transaction_type: transaction_type.to_string(),
            total_amount: acc.sum,
            count: acc.count,
        })
        .collect()
}

/// User summary rows ordered by total amount descending. Ties are broken by
/// user id ascending so the ordering is total.
pub fn order_by_total_desc(rows: &[UserSummaryRow]) -> Vec<UserSummaryRow> {
    let mut ordered = rows.to_vec();
    ordered.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    ordered
}

/// The ten users with the greatest total amount; all of them when fewer
/// than ten exist.
pub fn top_users(rows: &[UserSummaryRow]) -> Vec<UserSummaryRow> {
    let mut ordered = order_by_total_desc(rows);
    ordered.truncate(TOP_USERS_LIMIT);
    ordered
}

/// Computes all four aggregate views from one normalized table.
pub fn aggregate(transactions: &[Transaction]) -> AnalyticsBundle {
    let user_summary = user_summary(transactions);
    let top_users = top_users(&user_summary);
    AnalyticsBundle {
        daily_trend: daily_trend(transactions),
        type_summary: type_summary(transactions),
        user_summary,
        top_users,
    }
}
