//! Financial ratios over the three comparative periods

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accounts;
use crate::index::AccountIndex;
use crate::model::{LineItem, Period};

/// `numerator / denominator * 100`, or `0.0` for a zero denominator
pub fn percent(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// The five tracked ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    DebtRatio,
    ReturnOnEquity,
    CurrentRatio,
    OperatingMargin,
    NetMargin,
}

impl RatioKind {
    /// Chart series order
    pub const ALL: [RatioKind; 5] = [
        RatioKind::DebtRatio,
        RatioKind::ReturnOnEquity,
        RatioKind::CurrentRatio,
        RatioKind::OperatingMargin,
        RatioKind::NetMargin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RatioKind::DebtRatio => "부채비율(%)",
            RatioKind::ReturnOnEquity => "ROE(%)",
            RatioKind::CurrentRatio => "유동비율(%)",
            RatioKind::OperatingMargin => "영업이익률(%)",
            RatioKind::NetMargin => "순이익률(%)",
        }
    }
}

/// Ratios for one period, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    pub debt_ratio: f64,
    pub return_on_equity: f64,
    pub current_ratio: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
}

impl RatioSet {
    /// Compute from an index over consolidated rows
    pub fn from_index(index: &AccountIndex<'_>, period: Period) -> Self {
        let liabilities = index.amount(accounts::TOTAL_LIABILITIES, period);
        let equity = index.amount(accounts::TOTAL_EQUITY, period);
        let current_assets = index.amount(accounts::CURRENT_ASSETS, period);
        let current_liabilities = index.amount(accounts::CURRENT_LIABILITIES, period);
        let revenue = index.amount(accounts::REVENUE, period);
        let operating_income = index.amount(accounts::OPERATING_INCOME, period);
        let net_income = index.net_income(period);

        Self {
            debt_ratio: percent(liabilities, equity),
            return_on_equity: percent(net_income, equity),
            current_ratio: percent(current_assets, current_liabilities),
            operating_margin: percent(operating_income, revenue),
            net_margin: percent(net_income, revenue),
        }
    }

    pub fn get(&self, kind: RatioKind) -> f64 {
        match kind {
            RatioKind::DebtRatio => self.debt_ratio,
            RatioKind::ReturnOnEquity => self.return_on_equity,
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::OperatingMargin => self.operating_margin,
            RatioKind::NetMargin => self.net_margin,
        }
    }
}

/// One chart series: a ratio across the three periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    pub name: String,
    pub kind: RatioKind,
    pub current: f64,
    pub prior: f64,
    pub prior_prior: f64,
}

/// Per-period ratio sets plus chart series in fixed order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioReport {
    pub by_period: BTreeMap<Period, RatioSet>,
    pub series: Vec<RatioSeries>,
}

impl RatioReport {
    pub fn get(&self, period: Period) -> RatioSet {
        self.by_period.get(&period).copied().unwrap_or_default()
    }
}

/// Ratios over consolidated rows for every period
pub fn calculate_ratios(items: &[LineItem]) -> RatioReport {
    let index = AccountIndex::consolidated(items);
    let by_period: BTreeMap<Period, RatioSet> = Period::ALL
        .iter()
        .map(|period| (*period, RatioSet::from_index(&index, *period)))
        .collect();

    let value = |period: Period, kind: RatioKind| {
        by_period.get(&period).map(|set| set.get(kind)).unwrap_or(0.0)
    };
    let series = RatioKind::ALL
        .iter()
        .map(|kind| RatioSeries {
            name: kind.label().to_string(),
            kind: *kind,
            current: value(Period::Current, *kind),
            prior: value(Period::Prior, *kind),
            prior_prior: value(Period::PriorPrior, *kind),
        })
        .collect();

    RatioReport { by_period, series }
}

// ==================== Tests ====================
