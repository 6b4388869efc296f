//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration, exports and shared query parsing
//! - api.rs: JSON API endpoints and HTMX fragments
//! - page.rs: Full page rendering

pub mod transactions;
