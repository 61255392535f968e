//! Per-computation account lookup

use std::collections::HashMap;

use crate::accounts::NET_INCOME_NAMES;
use crate::model::{LineItem, Period, StatementType};

/// Rows keyed by account name; the first row seen for a name wins
#[derive(Debug, Default)]
pub struct AccountIndex<'a> {
    by_name: HashMap<&'a str, &'a LineItem>,
}

impl<'a> AccountIndex<'a> {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let mut by_name = HashMap::new();
        for item in items {
            by_name.entry(item.account_name.as_str()).or_insert(item);
        }
        Self { by_name }
    }

    /// Index over consolidated rows only
    pub fn consolidated(items: &'a [LineItem]) -> Self {
        Self::new(items.iter().filter(|item| item.is_consolidated()))
    }

    /// Index over consolidated rows of one statement
    pub fn consolidated_statement(items: &'a [LineItem], statement: StatementType) -> Self {
        Self::new(
            items
                .iter()
                .filter(|item| item.is_consolidated() && item.statement == statement),
        )
    }

    pub fn get(&self, account: &str) -> Option<&'a LineItem> {
        self.by_name.get(account).copied()
    }

    /// Decoded amount, `0` when the account is missing
    pub fn amount(&self, account: &str, period: Period) -> i64 {
        self.get(account).map(|item| item.amount(period)).unwrap_or(0)
    }

    /// First non-zero amount among alternative spellings
    pub fn first_nonzero(&self, accounts: &[&str], period: Period) -> i64 {
        accounts
            .iter()
            .map(|account| self.amount(account, period))
            .find(|amount| *amount != 0)
            .unwrap_or(0)
    }

    pub fn net_income(&self, period: Period) -> i64 {
        self.first_nonzero(&NET_INCOME_NAMES, period)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ==================== Tests ====================
