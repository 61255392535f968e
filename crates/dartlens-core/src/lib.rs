//! Core financial statement derivations
//!
//! Works on the raw rows of a company's statements as published by the DART
//! filings API: ratios across the three comparative periods, balance sheet
//! composition, the income statement waterfall, key-account chart rows and
//! the digest handed to report generation. All derivations are pure and
//! degrade to zero instead of failing.

pub mod accounts;
pub mod analysis;
pub mod balance;
pub mod error;
pub mod index;
pub mod model;
pub mod ratios;
pub mod source;
pub mod waterfall;

pub use analysis::{
    analyze, financial_digest, key_account_chart, Analyzer, FinancialAnalysis, KeyAccountChart,
    KeyAccountRow,
};
pub use balance::{decompose_balance_sheet, BalanceComposition};
pub use error::{
    CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger,
    ErrorSeverity,
};
pub use index::AccountIndex;
pub use model::{ConsolidationScope, LineItem, Period, PeriodLabels, StatementType};
pub use ratios::{calculate_ratios, RatioKind, RatioReport, RatioSeries, RatioSet};
pub use source::{load_statement_file, parse_statement_json, StatementPayload, StatementResponse};
pub use waterfall::{build_waterfall, Operator, StepKind, WaterfallStep};
