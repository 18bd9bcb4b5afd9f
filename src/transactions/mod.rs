//! Transactions screen: list parameters, ordering and checkout.

pub mod checkout;

use std::cmp::Ordering;

use crate::api::{Transaction, TransactionQuery};
use crate::view::query::{SEARCH_PARAM, SORT_BY_PARAM};
use crate::view::sorting::{compare_text, contains_ignoring_case};
use crate::view::{ListView, ViewQuery};

pub use checkout::{Cart, CartLine, PricedCart, PricedLine};

/// Page size used when the location does not set `pageSize`.
pub const DEFAULT_TRANSACTION_PAGE_SIZE: u32 = 10;

/// Field the transaction list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionSortField {
    /// Transaction identifier; numeric identifiers compare by value.
    #[default]
    Id,
    /// Total amount.
    Total,
    /// Average unit price across lines.
    Price,
    /// Creation time; undated transactions sort first.
    Date,
}

impl TransactionSortField {
    /// Parses a `sortBy` value; unknown values fall back to the identifier.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("total" | "totalAmount") => Self::Total,
            Some("price") => Self::Price,
            Some("date" | "created_at") => Self::Date,
            _ => Self::Id,
        }
    }

    /// Returns the query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Total => "total",
            Self::Price => "price",
            Self::Date => "date",
        }
    }
}

/// Transaction list parameters read from the location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionListParams {
    /// Search term; sent to the server and matched against the identifier.
    pub search: Option<String>,
    /// Sort field.
    pub sort: TransactionSortField,
}

/// The `/transactions` list view.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionList;

impl ListView for TransactionList {
    type Item = Transaction;
    type Params = TransactionListParams;
    type Scope = TransactionQuery;

    fn name(&self) -> &'static str {
        "transactions"
    }

    fn default_page_size(&self) -> u32 {
        DEFAULT_TRANSACTION_PAGE_SIZE
    }

    fn params(&self, query: &ViewQuery) -> TransactionListParams {
        TransactionListParams {
            search: query.text(SEARCH_PARAM).map(ToOwned::to_owned),
            sort: TransactionSortField::parse(query.get(SORT_BY_PARAM)),
        }
    }

    fn scope(&self, params: &TransactionListParams) -> TransactionQuery {
        TransactionQuery {
            search: params.search.clone(),
        }
    }

    fn matches(&self, params: &TransactionListParams, transaction: &Transaction) -> bool {
        params
            .search
            .as_deref()
            .is_none_or(|term| contains_ignoring_case(transaction.id.as_str(), term))
    }

    fn compare(
        &self,
        params: &TransactionListParams,
        left: &Transaction,
        right: &Transaction,
    ) -> Ordering {
        match params.sort {
            TransactionSortField::Id => compare_ids(left.id.as_str(), right.id.as_str()),
            TransactionSortField::Total => left.total_amount.cmp(&right.total_amount),
            TransactionSortField::Price => compare_average_price(left, right),
            TransactionSortField::Date => left.created_at.cmp(&right.created_at),
        }
    }
}

fn compare_ids(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(left_number), Ok(right_number)) => left_number.cmp(&right_number),
        _ => compare_text(left, right),
    }
}

/// Compares `sum / count` averages without dividing.
fn compare_average_price(left: &Transaction, right: &Transaction) -> Ordering {
    let (left_sum, left_count) = left.unit_price_totals();
    let (right_sum, right_count) = right.unit_price_totals();
    let left_scaled = u128::from(left_sum) * u128::from(right_count.max(1));
    let right_scaled = u128::from(right_sum) * u128::from(left_count.max(1));
    left_scaled.cmp(&right_scaled)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::{TransactionList, TransactionSortField};
    use crate::api::models::test_support::transaction;
    use crate::api::{OrderItem, Transaction, TransactionQuery};
    use crate::view::{History, ListView, ListViewSynchronizer, Location, ViewQuery};

    fn ids(raw: &str, transactions: Vec<Transaction>) -> Vec<String> {
        let location = Location::parse(raw).expect("location should parse");
        let mut sync = ListViewSynchronizer::new(TransactionList, History::new(location));
        let ticket = sync.begin_fetch();
        sync.complete_fetch(ticket, Ok(transactions));
        sync.visible()
            .items
            .iter()
            .map(|transaction| transaction.id.to_string())
            .collect()
    }

    fn with_lines(id: &str, prices: &[u64]) -> Transaction {
        let mut sample = transaction(id, 1, 0);
        sample.items = prices
            .iter()
            .map(|price| OrderItem {
                book_id: None,
                title: None,
                quantity: 1,
                unit_price: *price,
            })
            .collect();
        sample
    }

    #[test]
    fn numeric_ids_sort_by_value() {
        let sample = vec![transaction("10", 1, 1), transaction("9", 1, 1), transaction("100", 1, 1)];
        assert_eq!(ids("/transactions", sample), ["9", "10", "100"]);
    }

    #[test]
    fn total_sort_descending() {
        let sample = vec![
            transaction("a", 1, 30_000),
            transaction("b", 3, 30_000),
            transaction("c", 2, 30_000),
        ];
        assert_eq!(
            ids("/transactions?sortBy=total&order=desc", sample),
            ["b", "c", "a"]
        );
    }

    #[test]
    fn price_sort_uses_average_unit_price() {
        let sample = vec![
            with_lines("a", &[100, 200]),
            with_lines("b", &[149]),
            with_lines("c", &[]),
        ];
        assert_eq!(ids("/transactions?sortBy=price", sample), ["c", "b", "a"]);
    }

    #[test]
    fn date_sort_puts_undated_first() {
        let mut early = transaction("early", 1, 1);
        early.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let mut late = transaction("late", 1, 1);
        late.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();
        let undated = transaction("undated", 1, 1);

        assert_eq!(
            ids("/transactions?sortBy=date", vec![late, undated, early]),
            ["undated", "early", "late"]
        );
    }

    #[test]
    fn search_matches_identifier_and_is_server_scope() {
        let sample = vec![transaction("ord-abc", 1, 1), transaction("ord-xyz", 1, 1)];
        assert_eq!(ids("/transactions?q=ABC", sample), ["ord-abc"]);

        let params = TransactionList.params(&ViewQuery::parse("q=abc&sortBy=price"));
        assert_eq!(
            TransactionList.scope(&params),
            TransactionQuery {
                search: Some("abc".to_owned())
            }
        );
    }

    #[test]
    fn default_page_size_is_ten() {
        let sample: Vec<Transaction> = (1..=12)
            .map(|index| transaction(&index.to_string(), 1, 1))
            .collect();
        assert_eq!(ids("/transactions?page=2", sample), ["11", "12"]);
    }

    #[rstest]
    #[case(Some("totalAmount"), TransactionSortField::Total)]
    #[case(Some("price"), TransactionSortField::Price)]
    #[case(Some("newest"), TransactionSortField::Id)]
    #[case(None, TransactionSortField::Id)]
    fn sort_field_parsing(#[case] raw: Option<&str>, #[case] expected: TransactionSortField) {
        assert_eq!(TransactionSortField::parse(raw), expected);
    }
}
