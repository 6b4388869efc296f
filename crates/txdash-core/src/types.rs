//! Enumerations shared by the data model and the view engine

use serde::{Deserialize, Serialize};

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money received
    CashIn,
    /// Money withdrawn or sent
    CashOut,
    /// Utility bill
    Utility,
    /// Merchant payment
    Payment,
}

impl TransactionType {
    /// All transaction types, in wire order
    pub const ALL: [TransactionType; 4] = [
        TransactionType::CashOut,
        TransactionType::Utility,
        TransactionType::CashIn,
        TransactionType::Payment,
    ];

    /// Whether the transaction brings money in. Every other type is an outflow.
    pub fn is_inflow(&self) -> bool {
        matches!(self, TransactionType::CashIn)
    }

    /// Payment channel shown next to the amount
    pub fn payment_method(&self) -> &'static str {
        match self {
            TransactionType::CashIn => "Bank Transfer",
            _ => "Mobile Money",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash_in" => Ok(TransactionType::CashIn),
            "cash_out" => Ok(TransactionType::CashOut),
            "utility" => Ok(TransactionType::Utility),
            "payment" => Ok(TransactionType::Payment),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::CashIn => write!(f, "cash_in"),
            TransactionType::CashOut => write!(f, "cash_out"),
            TransactionType::Utility => write!(f, "utility"),
            TransactionType::Payment => write!(f, "payment"),
        }
    }
}

/// Transaction status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(TransactionStatus::Success),
            "pending" => Ok(TransactionStatus::Pending),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "success"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Type tab of the transaction list
///
/// `CashOut` groups every outflow type (cash_out, utility, payment), not just
/// the literal `cash_out` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTab {
    #[default]
    All,
    CashIn,
    CashOut,
}

impl TypeTab {
    /// Tabs in display order
    pub const ALL: [TypeTab; 3] = [TypeTab::All, TypeTab::CashIn, TypeTab::CashOut];

    /// Check whether a transaction type belongs to this tab
    pub fn matches(&self, tx_type: TransactionType) -> bool {
        match self {
            TypeTab::All => true,
            TypeTab::CashIn => tx_type.is_inflow(),
            TypeTab::CashOut => !tx_type.is_inflow(),
        }
    }

    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            TypeTab::All => "All Transactions",
            TypeTab::CashIn => "Income",
            TypeTab::CashOut => "Expenses",
        }
    }
}

impl std::str::FromStr for TypeTab {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(TypeTab::All),
            "cash_in" | "income" => Ok(TypeTab::CashIn),
            "cash_out" | "expenses" => Ok(TypeTab::CashOut),
            _ => Err(format!("Invalid type tab: {}", s)),
        }
    }
}

impl std::fmt::Display for TypeTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTab::All => write!(f, "all"),
            TypeTab::CashIn => write!(f, "cash_in"),
            TypeTab::CashOut => write!(f, "cash_out"),
        }
    }
}

/// Status filter of the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Success,
    Pending,
    Failed,
}

impl StatusFilter {
    /// Filter options in display order
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Success,
        StatusFilter::Pending,
        StatusFilter::Failed,
    ];

    /// Check whether a transaction status passes this filter
    pub fn matches(&self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Success => status == TransactionStatus::Success,
            StatusFilter::Pending => status == TransactionStatus::Pending,
            StatusFilter::Failed => status == TransactionStatus::Failed,
        }
    }

    /// Option caption
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Success => "Success",
            StatusFilter::Pending => "Pending",
            StatusFilter::Failed => "Failed",
        }
    }
}

impl From<TransactionStatus> for StatusFilter {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Success => StatusFilter::Success,
            TransactionStatus::Pending => StatusFilter::Pending,
            TransactionStatus::Failed => StatusFilter::Failed,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            other => other
                .parse::<TransactionStatus>()
                .map(StatusFilter::from)
                .map_err(|_| format!("Invalid status filter: {}", s)),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Success => write!(f, "success"),
            StatusFilter::Pending => write!(f, "pending"),
            StatusFilter::Failed => write!(f, "failed"),
        }
    }
}
