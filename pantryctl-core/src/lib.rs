//! pantryctl-core: purchase ledger and grocery assistant actions
//!
//! - [`Ledger`]: in-memory, append-only purchase history
//! - [`advisor`]: precondition-checked actions rendered by an [`Advisor`]
//! - [`PantryConfig`]: TOML configuration with env overrides

pub mod advisor;
pub mod category;
pub mod config;
pub mod error;
pub mod ledger;
pub mod purchase;
pub mod validation;

pub use advisor::{ActionKind, ActionRequest, Advisor, PreparedAction, Suggestion, TemplateAdvisor};
pub use category::Category;
pub use config::{AdvisorConfig, LedgerConfig, LoggingConfig, PantryConfig};
pub use error::{PantryError, Result};
pub use ledger::{Ledger, LedgerStats, SpendingSummary};
pub use purchase::{Freshness, ItemName, NewPurchase, PurchaseRecord, MAX_EXPIRY_DAYS};
pub use validation::ValidationError;
