//! Core data models for the transaction snapshot

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::types::{TransactionStatus, TransactionType};

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Receipt / reference number
    pub id: String,
    /// ISO-8601 timestamp
    pub date: String,
    /// Counterparty name
    pub recipient: String,
    /// Non-negative magnitude; direction comes from `tx_type`
    pub amount: f64,
    /// Currency code
    pub currency: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Parse the timestamp.
    ///
    /// Accepts RFC 3339 date-times, naive `YYYY-MM-DDTHH:MM:SS` date-times
    /// and plain `YYYY-MM-DD` dates.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Date for display, falling back to the raw string
    pub fn display_date(&self) -> String {
        self.parsed_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    /// Whether this transaction counts as income
    pub fn is_inflow(&self) -> bool {
        self.tx_type.is_inflow()
    }

    /// Case-insensitive match of an already lowercased query against recipient or id
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.recipient.to_lowercase().contains(query_lower)
            || self.id.to_lowercase().contains(query_lower)
    }
}

/// Fetched transaction snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    /// Server-authoritative net balance
    pub total_balance: f64,
    /// Currency of the whole snapshot
    pub currency: String,
    /// Transactions in server order
    pub transactions: Vec<Transaction>,
}

impl TransactionData {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Envelope status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// API response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub status: ResponseStatus,
    pub data: TransactionData,
}
