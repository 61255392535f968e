//! Account names as they appear in `account_nm`

pub const TOTAL_ASSETS: &str = "자산총계";
pub const CURRENT_ASSETS: &str = "유동자산";
pub const NON_CURRENT_ASSETS: &str = "비유동자산";
pub const TOTAL_LIABILITIES: &str = "부채총계";
pub const CURRENT_LIABILITIES: &str = "유동부채";
pub const NON_CURRENT_LIABILITIES: &str = "비유동부채";
pub const TOTAL_EQUITY: &str = "자본총계";

pub const REVENUE: &str = "매출액";
pub const COST_OF_SALES: &str = "매출원가";
pub const GROSS_PROFIT: &str = "매출총이익";
pub const SELLING_AND_ADMIN: &str = "판매비와관리비";
pub const OPERATING_INCOME: &str = "영업이익";
pub const NON_OPERATING_INCOME: &str = "영업외수익";
pub const NON_OPERATING_EXPENSE: &str = "영업외비용";
pub const PRETAX_INCOME: &str = "법인세비용차감전순이익";
pub const INCOME_TAX: &str = "법인세비용";
pub const NET_INCOME_OR_LOSS: &str = "당기순이익(손실)";
pub const NET_INCOME: &str = "당기순이익";

/// Net income spellings in lookup order
pub const NET_INCOME_NAMES: [&str; 2] = [NET_INCOME_OR_LOSS, NET_INCOME];
