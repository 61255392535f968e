//! Balance sheet composition

use serde::{Deserialize, Serialize};

use crate::accounts;
use crate::index::AccountIndex;
use crate::model::{LineItem, Period, StatementType};

/// Share of `part` in `total`, in percent; `0.0` unless `total` is positive
pub fn share(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Component totals of a balance sheet and their share of total assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceComposition {
    pub period: Period,
    pub total_assets: i64,
    pub current_assets: i64,
    pub non_current_assets: i64,
    pub total_liabilities: i64,
    pub current_liabilities: i64,
    pub non_current_liabilities: i64,
    pub total_equity: i64,
    /// Denominator for every percentage (equals total assets)
    pub total: i64,
    pub current_assets_pct: f64,
    pub non_current_assets_pct: f64,
    pub current_liabilities_pct: f64,
    pub non_current_liabilities_pct: f64,
    pub equity_pct: f64,
}

impl BalanceComposition {
    pub fn liabilities_and_equity(&self) -> i64 {
        self.total_liabilities.saturating_add(self.total_equity)
    }

    /// Total assets minus liabilities and equity; non-zero means the source is inconsistent
    pub fn imbalance(&self) -> i64 {
        self.total_assets.saturating_sub(self.liabilities_and_equity())
    }

    pub fn is_balanced(&self) -> bool {
        self.imbalance() == 0
    }
}

/// Decompose the consolidated balance sheet for one period
pub fn decompose_balance_sheet(items: &[LineItem], period: Period) -> BalanceComposition {
    let index = AccountIndex::consolidated_statement(items, StatementType::BalanceSheet);
    let amount = |account: &str| index.amount(account, period);

    let total_assets = amount(accounts::TOTAL_ASSETS);
    let current_assets = amount(accounts::CURRENT_ASSETS);
    let non_current_assets = amount(accounts::NON_CURRENT_ASSETS);
    let current_liabilities = amount(accounts::CURRENT_LIABILITIES);
    let non_current_liabilities = amount(accounts::NON_CURRENT_LIABILITIES);
    let total_equity = amount(accounts::TOTAL_EQUITY);
    let total = total_assets;

    let composition = BalanceComposition {
        period,
        total_assets,
        current_assets,
        non_current_assets,
        total_liabilities: amount(accounts::TOTAL_LIABILITIES),
        current_liabilities,
        non_current_liabilities,
        total_equity,
        total,
        current_assets_pct: share(current_assets, total),
        non_current_assets_pct: share(non_current_assets, total),
        current_liabilities_pct: share(current_liabilities, total),
        non_current_liabilities_pct: share(non_current_liabilities, total),
        equity_pct: share(total_equity, total),
    };

    if !composition.is_balanced() {
        log::debug!(
            "balance sheet for {} does not reconcile: assets {} vs liabilities+equity {}",
            period,
            composition.total_assets,
            composition.liabilities_and_equity()
        );
    }

    composition
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConsolidationScope;

    fn bs(name: &str, current: &str, prior: &str) -> LineItem {
        LineItem::new(ConsolidationScope::Consolidated, StatementType::BalanceSheet, name)
            .with_amounts(current, prior, "")
    }

    fn sample() -> Vec<LineItem> {
        vec![
            bs("자산총계", "1,000", "800"),
            bs("유동자산", "400", "300"),
            bs("비유동자산", "600", "500"),
            bs("부채총계", "300", "200"),
            bs("유동부채", "200", "150"),
            bs("비유동부채", "100", "50"),
            bs("자본총계", "700", "600"),
        ]
    }

    #[test]
    fn test_percentages_of_total_assets() {
        let composition = decompose_balance_sheet(&sample(), Period::Current);

        assert_eq!(composition.total, 1_000);
        assert_eq!(composition.current_assets_pct, 40.0);
        assert_eq!(composition.non_current_assets_pct, 60.0);
        assert_eq!(composition.current_liabilities_pct, 20.0);
        assert_eq!(composition.non_current_liabilities_pct, 10.0);
        assert_eq!(composition.equity_pct, 70.0);
        assert!(composition.is_balanced());
    }

    #[test]
    fn test_percentage_bounds_when_consistent() {
        let composition = decompose_balance_sheet(&sample(), Period::Prior);
        for pct in [
            composition.current_assets_pct,
            composition.non_current_assets_pct,
            composition.current_liabilities_pct,
            composition.non_current_liabilities_pct,
            composition.equity_pct,
        ] {
            assert!((0.0..=100.0).contains(&pct));
        }
        let assets = composition.current_assets_pct + composition.non_current_assets_pct;
        assert!((assets - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_total_zeroes_percentages() {
        let items = vec![bs("자산총계", "0", ""), bs("유동자산", "400", "")];
        let composition = decompose_balance_sheet(&items, Period::Current);

        assert_eq!(composition.current_assets, 400);
        assert_eq!(composition.current_assets_pct, 0.0);
        assert_eq!(composition.equity_pct, 0.0);
    }

    #[test]
    fn test_imbalance_is_reported_not_fixed() {
        let mut items = sample();
        items[6] = bs("자본총계", "650", "600");
        let composition = decompose_balance_sheet(&items, Period::Current);

        assert_eq!(composition.total_equity, 650);
        assert_eq!(composition.imbalance(), 50);
        assert!(!composition.is_balanced());
    }

    #[test]
    fn test_income_rows_are_ignored() {
        let items = vec![LineItem::new(
            ConsolidationScope::Consolidated,
            StatementType::IncomeStatement,
            "자산총계",
        )
        .with_amounts("999", "", "")];
        let composition = decompose_balance_sheet(&items, Period::Current);
        assert_eq!(composition.total_assets, 0);
    }
}
