//! Assistant actions
//!
//! Every action runs in two phases:
//! - `ActionRequest::prepare` checks the precondition synchronously against
//!   the ledger and captures what the action needs
//! - `Advisor::respond` produces the suggestion asynchronously
//!
//! A failed precondition never reaches the advisor, so callers can show the
//! error immediately instead of a loading indicator.

mod template;
pub mod templates;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AdvisorConfig;
use crate::error::{PantryError, Result};
use crate::ledger::{Ledger, SpendingSummary};
use crate::purchase::{ItemName, PurchaseRecord};
use crate::validation::ValidationError;

pub use template::TemplateAdvisor;

const EMPTY_LEDGER: &str = "Please add some purchases first!";
const NO_PRICES: &str =
    "No spending data available. Add prices when logging purchases to get budget analysis!";

/// Which assistant action; also identifies its result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    PredictMissing,
    HealthyAlternatives,
    ExpiringItems,
    ShoppingList,
    MealIdeas,
    SpendingAnalysis,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::PredictMissing,
        ActionKind::HealthyAlternatives,
        ActionKind::ExpiringItems,
        ActionKind::ShoppingList,
        ActionKind::MealIdeas,
        ActionKind::SpendingAnalysis,
    ];

    /// Stable identifier used in logs and JSON output
    pub fn slug(&self) -> &'static str {
        match self {
            ActionKind::PredictMissing => "predict-missing",
            ActionKind::HealthyAlternatives => "healthy-alternatives",
            ActionKind::ExpiringItems => "expiring-items",
            ActionKind::ShoppingList => "shopping-list",
            ActionKind::MealIdeas => "meal-ideas",
            ActionKind::SpendingAnalysis => "spending-analysis",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActionKind::PredictMissing => "Predict Missing Items",
            ActionKind::HealthyAlternatives => "Healthy Alternatives",
            ActionKind::ExpiringItems => "Expiring Items",
            ActionKind::ShoppingList => "Smart Shopping List",
            ActionKind::MealIdeas => "Meal Ideas",
            ActionKind::SpendingAnalysis => "Spending Analysis",
        }
    }

    /// Text shown while the suggestion is pending
    pub fn loading_message(&self) -> &'static str {
        match self {
            ActionKind::PredictMissing => "🤖 AI is analyzing your purchase patterns...",
            ActionKind::HealthyAlternatives => "🤖 Finding healthier alternatives...",
            ActionKind::ExpiringItems => "🤖 Checking expiration dates...",
            ActionKind::ShoppingList => "🤖 Organizing your shopping list...",
            ActionKind::MealIdeas => "🤖 Generating meal ideas from your groceries...",
            ActionKind::SpendingAnalysis => "🤖 Reviewing your grocery spending...",
        }
    }

    /// Position in `ALL`, used for panel indexing
    pub fn index(&self) -> usize {
        match self {
            ActionKind::PredictMissing => 0,
            ActionKind::HealthyAlternatives => 1,
            ActionKind::ExpiringItems => 2,
            ActionKind::ShoppingList => 3,
            ActionKind::MealIdeas => 4,
            ActionKind::SpendingAnalysis => 5,
        }
    }
}

/// What the user asked for, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    PredictMissing,
    HealthyAlternatives { item: String },
    ExpiringItems,
    /// Comma- or newline-separated items
    ShoppingList { items: String },
    MealIdeas,
    SpendingAnalysis,
}

/// A request that passed its precondition, carrying everything needed to
/// render without going back to the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedAction {
    PredictMissing,
    HealthyAlternatives { item: ItemName },
    ExpiringItems { records: Vec<PurchaseRecord>, threshold_days: u32 },
    ShoppingList { items: Vec<String> },
    MealIdeas { records: Vec<PurchaseRecord>, ingredient_limit: usize },
    SpendingAnalysis { summary: SpendingSummary },
}

/// Rendered assistant output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: ActionKind,
    pub text: String,
    pub rendered_at: DateTime<Utc>,
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::PredictMissing => ActionKind::PredictMissing,
            ActionRequest::HealthyAlternatives { .. } => ActionKind::HealthyAlternatives,
            ActionRequest::ExpiringItems => ActionKind::ExpiringItems,
            ActionRequest::ShoppingList { .. } => ActionKind::ShoppingList,
            ActionRequest::MealIdeas => ActionKind::MealIdeas,
            ActionRequest::SpendingAnalysis => ActionKind::SpendingAnalysis,
        }
    }

    /// Check the precondition and capture a snapshot of what the action reads.
    ///
    /// Never modifies the ledger.
    pub fn prepare(&self, ledger: &Ledger, config: &AdvisorConfig) -> Result<PreparedAction> {
        let kind = self.kind();
        match self {
            ActionRequest::PredictMissing => {
                require_history(ledger, kind)?;
                Ok(PreparedAction::PredictMissing)
            }
            ActionRequest::HealthyAlternatives { item } => {
                let item = ItemName::new(item).map_err(|_| ValidationError::Empty {
                    field: "an item to find alternatives for",
                })?;
                Ok(PreparedAction::HealthyAlternatives { item })
            }
            ActionRequest::ExpiringItems => {
                require_history(ledger, kind)?;
                Ok(PreparedAction::ExpiringItems {
                    records: ledger.snapshot(),
                    threshold_days: config.expiring_threshold_days,
                })
            }
            ActionRequest::ShoppingList { items } => {
                let items = split_items(items);
                if items.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "items for your shopping list",
                    }
                    .into());
                }
                Ok(PreparedAction::ShoppingList { items })
            }
            ActionRequest::MealIdeas => {
                require_history(ledger, kind)?;
                Ok(PreparedAction::MealIdeas {
                    records: ledger.snapshot(),
                    ingredient_limit: config.meal_ingredient_limit,
                })
            }
            ActionRequest::SpendingAnalysis => {
                let summary = ledger
                    .spending_by_category()
                    .ok_or_else(|| PantryError::precondition(kind.slug(), NO_PRICES))?;
                Ok(PreparedAction::SpendingAnalysis { summary })
            }
        }
    }
}

impl PreparedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PreparedAction::PredictMissing => ActionKind::PredictMissing,
            PreparedAction::HealthyAlternatives { .. } => ActionKind::HealthyAlternatives,
            PreparedAction::ExpiringItems { .. } => ActionKind::ExpiringItems,
            PreparedAction::ShoppingList { .. } => ActionKind::ShoppingList,
            PreparedAction::MealIdeas { .. } => ActionKind::MealIdeas,
            PreparedAction::SpendingAnalysis { .. } => ActionKind::SpendingAnalysis,
        }
    }
}

fn require_history(ledger: &Ledger, kind: ActionKind) -> Result<()> {
    if ledger.is_empty() {
        return Err(PantryError::precondition(kind.slug(), EMPTY_LEDGER));
    }
    Ok(())
}

/// Split free text on commas and newlines, dropping blanks
pub fn split_items(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Request/response contract behind every assistant action
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn respond(&self, action: PreparedAction) -> Result<Suggestion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdvisorConfig {
        AdvisorConfig::default()
    }

    #[test]
    fn history_actions_need_purchases() {
        let ledger = Ledger::new();
        for request in [
            ActionRequest::PredictMissing,
            ActionRequest::ExpiringItems,
            ActionRequest::MealIdeas,
        ] {
            let err = request.prepare(&ledger, &config()).unwrap_err();
            assert!(matches!(err, PantryError::Precondition { .. }));
            assert_eq!(err.to_string(), "Please add some purchases first!");
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn alternatives_need_an_item() {
        let ledger = Ledger::new();
        let err = ActionRequest::HealthyAlternatives { item: "  ".into() }
            .prepare(&ledger, &config())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter an item to find alternatives for");

        // Works without any purchase history
        let prepared = ActionRequest::HealthyAlternatives { item: " soda ".into() }
            .prepare(&ledger, &config())
            .unwrap();
        assert_eq!(
            prepared,
            PreparedAction::HealthyAlternatives {
                item: ItemName::new("soda").unwrap()
            }
        );
    }

    #[test]
    fn shopping_list_needs_items() {
        let ledger = Ledger::new();
        let err = ActionRequest::ShoppingList { items: " , \n ".into() }
            .prepare(&ledger, &config())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter items for your shopping list");
    }

    #[test]
    fn spending_needs_prices() {
        let mut ledger = Ledger::new();
        ledger.record("Milk", 1, 5).unwrap();
        let err = ActionRequest::SpendingAnalysis
            .prepare(&ledger, &config())
            .unwrap_err();
        assert!(matches!(
            err,
            PantryError::Precondition {
                action: "spending-analysis",
                ..
            }
        ));
    }

    #[test]
    fn expiring_captures_snapshot_and_threshold() {
        let mut ledger = Ledger::new();
        ledger.record("Milk", 1, 5).unwrap();
        let mut cfg = config();
        cfg.expiring_threshold_days = 4;

        let prepared = ActionRequest::ExpiringItems.prepare(&ledger, &cfg).unwrap();
        match prepared {
            PreparedAction::ExpiringItems {
                records,
                threshold_days,
            } => {
                assert_eq!(records.len(), 1);
                assert_eq!(threshold_days, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn split_items_handles_commas_and_newlines() {
        assert_eq!(
            split_items("Apples, milk\nbread,, \n chicken "),
            ["Apples", "milk", "bread", "chicken"]
        );
    }

    #[test]
    fn kind_indices_match_all() {
        for (i, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
