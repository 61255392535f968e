//! Income statement waterfall: revenue down to net income in ten steps

use serde::{Deserialize, Serialize};

use crate::accounts;
use crate::index::AccountIndex;
use crate::model::{LineItem, Period, StatementType};

/// Visual role of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Revenue,
    Expense,
    Profit,
}

/// Operator shown before a step's amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "")]
    Start,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "=")]
    Equals,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Start => "",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Equals => "=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub amount: i64,
    pub kind: StepKind,
    pub operator: Operator,
    /// Amount computed from the other steps rather than read from a row
    pub derived: bool,
}

impl WaterfallStep {
    fn new(label: &str, amount: i64, kind: StepKind, operator: Operator) -> Self {
        Self {
            label: label.to_string(),
            amount,
            kind,
            operator,
            derived: false,
        }
    }

    fn derived(mut self, derived: bool) -> Self {
        self.derived = derived;
        self
    }
}

/// Looked-up value, or the fallback when it is absent or zero
fn or_derive(looked_up: i64, fallback: impl FnOnce() -> i64) -> (i64, bool) {
    if looked_up != 0 {
        (looked_up, false)
    } else {
        (fallback(), true)
    }
}

/// Resolved income statement figures for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncomeFigures {
    pub revenue: i64,
    pub cost_of_sales: i64,
    pub gross_profit: (i64, bool),
    pub selling_and_admin: i64,
    pub operating_income: (i64, bool),
    pub non_operating_income: i64,
    pub non_operating_expense: i64,
    pub pretax_income: (i64, bool),
    pub income_tax: i64,
    pub net_income: (i64, bool),
}

impl IncomeFigures {
    pub fn resolve(index: &AccountIndex<'_>, period: Period) -> Self {
        let amount = |account: &str| index.amount(account, period);

        let revenue = amount(accounts::REVENUE);
        let cost_of_sales = amount(accounts::COST_OF_SALES);
        let selling_and_admin = amount(accounts::SELLING_AND_ADMIN);
        let non_operating_income = amount(accounts::NON_OPERATING_INCOME);
        let non_operating_expense = amount(accounts::NON_OPERATING_EXPENSE);
        let income_tax = amount(accounts::INCOME_TAX);

        let gross_profit = or_derive(amount(accounts::GROSS_PROFIT), || {
            revenue.saturating_sub(cost_of_sales)
        });
        let operating_income = or_derive(amount(accounts::OPERATING_INCOME), || {
            gross_profit.0.saturating_sub(selling_and_admin)
        });
        let pretax_income = or_derive(amount(accounts::PRETAX_INCOME), || {
            operating_income
                .0
                .saturating_add(non_operating_income)
                .saturating_sub(non_operating_expense)
        });
        let net_income = or_derive(index.net_income(period), || {
            pretax_income.0.saturating_sub(income_tax.saturating_abs())
        });

        Self {
            revenue,
            cost_of_sales,
            gross_profit,
            selling_and_admin,
            operating_income,
            non_operating_income,
            non_operating_expense,
            pretax_income,
            income_tax,
            net_income,
        }
    }

    pub fn steps(&self) -> Vec<WaterfallStep> {
        use Operator::*;
        use StepKind::*;

        vec![
            WaterfallStep::new("매출액", self.revenue, Revenue, Start),
            WaterfallStep::new("매출원가", self.cost_of_sales, Expense, Minus),
            WaterfallStep::new("매출총이익", self.gross_profit.0, Profit, Equals)
                .derived(self.gross_profit.1),
            WaterfallStep::new("판매관리비", self.selling_and_admin, Expense, Minus),
            WaterfallStep::new("영업이익", self.operating_income.0, Profit, Equals)
                .derived(self.operating_income.1),
            WaterfallStep::new("영업외수익", self.non_operating_income, Revenue, Plus),
            WaterfallStep::new("영업외비용", self.non_operating_expense, Expense, Minus),
            WaterfallStep::new("법인세차감전순이익", self.pretax_income.0, Profit, Equals)
                .derived(self.pretax_income.1),
            WaterfallStep::new("법인세", self.income_tax.saturating_abs(), Expense, Minus),
            WaterfallStep::new("당기순이익", self.net_income.0, Profit, Equals)
                .derived(self.net_income.1),
        ]
    }
}

/// Build the ten-step waterfall from consolidated income statement rows
pub fn build_waterfall(items: &[LineItem], period: Period) -> Vec<WaterfallStep> {
    let index = AccountIndex::consolidated_statement(items, StatementType::IncomeStatement);
    let figures = IncomeFigures::resolve(&index, period);
    let steps = figures.steps();

    let derived: Vec<&str> = steps
        .iter()
        .filter(|step| step.derived)
        .map(|step| step.label.as_str())
        .collect();
    if !derived.is_empty() {
        log::debug!("waterfall for {} derived steps: {}", period, derived.join(", "));
    }

    steps
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConsolidationScope;

    fn is_row(name: &str, current: &str) -> LineItem {
        LineItem::new(ConsolidationScope::Consolidated, StatementType::IncomeStatement, name)
            .with_amounts(current, "", "")
    }

    fn step<'a>(steps: &'a [WaterfallStep], label: &str) -> &'a WaterfallStep {
        steps.iter().find(|s| s.label == label).unwrap()
    }

    #[test]
    fn test_fixed_structure() {
        let steps = build_waterfall(&[], Period::Current);
        let labels: Vec<&str> = steps.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "매출액",
                "매출원가",
                "매출총이익",
                "판매관리비",
                "영업이익",
                "영업외수익",
                "영업외비용",
                "법인세차감전순이익",
                "법인세",
                "당기순이익",
            ]
        );
        let operators: String = steps.iter().map(|s| s.operator.symbol()).collect();
        assert_eq!(operators, "-=-=+-=-=");
        assert!(steps.iter().all(|s| s.amount == 0));
    }

    #[test]
    fn test_gross_profit_fallback() {
        let items = vec![is_row("매출액", "1000"), is_row("매출원가", "600")];
        let steps = build_waterfall(&items, Period::Current);

        let gross = step(&steps, "매출총이익");
        assert_eq!(gross.amount, 400);
        assert!(gross.derived);
        assert!(!step(&steps, "매출액").derived);
    }

    #[test]
    fn test_full_derivation_chain() {
        let items = vec![
            is_row("매출액", "1,000"),
            is_row("매출원가", "600"),
            is_row("판매비와관리비", "150"),
            is_row("영업외수익", "30"),
            is_row("영업외비용", "80"),
            is_row("법인세비용", "-40"),
        ];
        let steps = build_waterfall(&items, Period::Current);

        assert_eq!(step(&steps, "영업이익").amount, 250);
        assert_eq!(step(&steps, "법인세차감전순이익").amount, 200);
        assert_eq!(step(&steps, "법인세").amount, 40);
        assert_eq!(step(&steps, "당기순이익").amount, 160);
    }

    #[test]
    fn test_lookups_take_precedence() {
        let items = vec![
            is_row("매출액", "1000"),
            is_row("매출원가", "600"),
            is_row("매출총이익", "420"),
            is_row("영업이익", "300"),
        ];
        let steps = build_waterfall(&items, Period::Current);

        assert_eq!(step(&steps, "매출총이익").amount, 420);
        assert!(!step(&steps, "매출총이익").derived);
        assert_eq!(step(&steps, "영업이익").amount, 300);
    }

    #[test]
    fn test_net_income_variant_resolution() {
        let items = vec![is_row("당기순이익(손실)", "500"), is_row("당기순이익", "300")];
        let steps = build_waterfall(&items, Period::Current);
        assert_eq!(step(&steps, "당기순이익").amount, 500);

        let items = vec![is_row("당기순이익", "300")];
        let steps = build_waterfall(&items, Period::Current);
        assert_eq!(step(&steps, "당기순이익").amount, 300);
        assert!(!step(&steps, "당기순이익").derived);
    }

    #[test]
    fn test_operator_serialization() {
        let json = serde_json::to_string(&Operator::Start).unwrap();
        assert_eq!(json, "\"\"");
        let step = WaterfallStep::new("매출원가", 600, StepKind::Expense, Operator::Minus);
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["operator"], "-");
        assert_eq!(value["kind"], "expense");
    }
}
