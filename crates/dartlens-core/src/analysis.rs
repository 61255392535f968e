//! Full statement analysis for one selected period

use serde::{Deserialize, Serialize};

use dartlens_config::AnalysisConfig;
use dartlens_utils::to_trillions;

use crate::accounts;
use crate::balance::{decompose_balance_sheet, BalanceComposition};
use crate::model::{LineItem, Period, PeriodLabels, StatementType};
use crate::ratios::{calculate_ratios, RatioReport};
use crate::waterfall::{build_waterfall, WaterfallStep};

/// Balance sheet accounts charted across periods
pub const BALANCE_CHART_ACCOUNTS: [&str; 3] = [
    accounts::TOTAL_ASSETS,
    accounts::TOTAL_LIABILITIES,
    accounts::TOTAL_EQUITY,
];

/// Income statement accounts charted across periods
pub const INCOME_CHART_ACCOUNTS: [&str; 3] = [
    accounts::REVENUE,
    accounts::OPERATING_INCOME,
    accounts::NET_INCOME_OR_LOSS,
];

/// One account across the three periods, in trillions of KRW
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAccountRow {
    pub account: String,
    pub current: f64,
    pub prior: f64,
    pub prior_prior: f64,
}

impl KeyAccountRow {
    fn from_item(item: &LineItem) -> Self {
        Self {
            account: item.account_name.clone(),
            current: to_trillions(item.amount(Period::Current)),
            prior: to_trillions(item.amount(Period::Prior)),
            prior_prior: to_trillions(item.amount(Period::PriorPrior)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAccountChart {
    pub balance_sheet: Vec<KeyAccountRow>,
    pub income_statement: Vec<KeyAccountRow>,
}

fn chart_rows(items: &[LineItem], statement: StatementType, names: &[&str]) -> Vec<KeyAccountRow> {
    items
        .iter()
        .filter(|item| {
            item.is_consolidated()
                && item.statement == statement
                && names.contains(&item.account_name.as_str())
        })
        .map(KeyAccountRow::from_item)
        .collect()
}

/// Consolidated key accounts in input order
pub fn key_account_chart(items: &[LineItem]) -> KeyAccountChart {
    KeyAccountChart {
        balance_sheet: chart_rows(items, StatementType::BalanceSheet, &BALANCE_CHART_ACCOUNTS),
        income_statement: chart_rows(items, StatementType::IncomeStatement, &INCOME_CHART_ACCOUNTS),
    }
}

/// One summary line per consolidated row among the first `limit` rows
pub fn financial_digest(items: &[LineItem], limit: usize) -> Vec<String> {
    items
        .iter()
        .take(limit)
        .filter(|item| item.is_consolidated())
        .map(|item| {
            format!(
                "{} - {}: 당기 {}, 전기 {}",
                item.statement_name.as_deref().unwrap_or(""),
                item.account_name,
                item.current_amount.as_deref().unwrap_or("0"),
                item.prior_amount.as_deref().unwrap_or("0"),
            )
        })
        .collect()
}

/// Everything derived from a statement for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub period: Period,
    pub labels: PeriodLabels,
    pub ratios: RatioReport,
    pub balance: BalanceComposition,
    pub waterfall: Vec<WaterfallStep>,
    pub key_accounts: KeyAccountChart,
}

pub fn analyze(items: &[LineItem], period: Period) -> FinancialAnalysis {
    FinancialAnalysis {
        period,
        labels: PeriodLabels::from_items(items),
        ratios: calculate_ratios(items),
        balance: decompose_balance_sheet(items, period),
        waterfall: build_waterfall(items, period),
        key_accounts: key_account_chart(items),
    }
}

/// Analysis entry point carrying the configured defaults
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Configured default period; `Current` if the setting does not parse
    pub fn default_period(&self) -> Period {
        self.config.default_period.parse().unwrap_or_else(|e| {
            log::warn!("{}, falling back to current", e);
            Period::Current
        })
    }

    pub fn analyze(&self, items: &[LineItem], period: Option<Period>) -> FinancialAnalysis {
        let period = period.unwrap_or_else(|| self.default_period());
        log::debug!("analyzing {} rows for period {}", items.len(), period);
        analyze(items, period)
    }

    pub fn digest(&self, items: &[LineItem]) -> Vec<String> {
        financial_digest(items, self.config.digest_limit)
    }
}

// ==================== Tests ====================
