//! Core transaction processing: the upstream client, the derived view engine
//! and the dashboard state container.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod queries;
pub mod types;
pub mod view;

pub use client::{HttpTransactionClient, SourceRef, StaticSource, TransactionSource};
pub use dashboard::{Dashboard, DashboardState, LoadState};
pub use error::{ClientError, ClientResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{Transaction, TransactionData, TransactionResponse};
pub use queries::TransactionQueries;
pub use types::{StatusFilter, TransactionStatus, TransactionType, TypeTab};
pub use view::{TransactionStats, TransactionView, ViewParams};
