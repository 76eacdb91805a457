//! Template-backed advisor: waits, then renders canned text

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{templates, Advisor, PreparedAction, Suggestion};
use crate::config::AdvisorConfig;
use crate::error::Result;

/// Advisor that renders templates after a fixed delay
pub struct TemplateAdvisor {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl TemplateAdvisor {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::new(Duration::from_millis(config.response_delay_ms))
    }

    /// Deterministic pseudo-random output, for tests and reproducible demos
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn days_ago(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(1..=7)
    }

    /// Render immediately, without the delay
    pub fn render(&self, action: &PreparedAction) -> String {
        let now = Utc::now();
        match action {
            PreparedAction::PredictMissing => templates::predict_missing(self.days_ago()),
            PreparedAction::HealthyAlternatives { item } => {
                templates::healthy_alternatives(item.as_str())
            }
            PreparedAction::ExpiringItems {
                records,
                threshold_days,
            } => templates::expiring_items(records, *threshold_days, now),
            PreparedAction::ShoppingList { items } => templates::shopping_list(items),
            PreparedAction::MealIdeas {
                records,
                ingredient_limit,
            } => templates::meal_ideas(records, *ingredient_limit, now),
            PreparedAction::SpendingAnalysis { summary } => templates::spending_analysis(summary),
        }
    }
}

#[async_trait]
impl Advisor for TemplateAdvisor {
    async fn respond(&self, action: PreparedAction) -> Result<Suggestion> {
        let kind = action.kind();
        debug!(action = kind.slug(), delay_ms = self.delay.as_millis() as u64, "suggestion pending");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let text = self.render(&action);
        debug!(action = kind.slug(), chars = text.len(), "suggestion rendered");

        Ok(Suggestion {
            kind,
            text,
            rendered_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{ActionKind, ActionRequest};
    use crate::ledger::Ledger;

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_configured_delay() {
        let advisor = TemplateAdvisor::new(Duration::from_millis(2000)).with_seed(7);
        let start = tokio::time::Instant::now();

        let suggestion = advisor.respond(PreparedAction::PredictMissing).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(suggestion.kind, ActionKind::PredictMissing);
        assert!(suggestion.text.contains("you might need"));
    }

    #[tokio::test]
    async fn zero_delay_renders_immediately() {
        let mut ledger = Ledger::new();
        ledger.record("Milk", 2, 5).unwrap();
        let config = AdvisorConfig {
            response_delay_ms: 0,
            ..AdvisorConfig::default()
        };
        let advisor = TemplateAdvisor::from_config(&config);

        let prepared = ActionRequest::ExpiringItems.prepare(&ledger, &config).unwrap();
        let suggestion = advisor.respond(prepared).await.unwrap();
        assert_eq!(
            suggestion.text,
            "✓ Great news! No items expiring in the next 3 days."
        );
    }

    #[test]
    fn predicted_days_stay_in_range() {
        let advisor = TemplateAdvisor::new(Duration::ZERO).with_seed(42);
        for _ in 0..200 {
            let days = advisor.days_ago();
            assert!((1..=7).contains(&days));
        }
    }

    #[test]
    fn same_seed_same_text() {
        let a = TemplateAdvisor::new(Duration::ZERO).with_seed(3);
        let b = TemplateAdvisor::new(Duration::ZERO).with_seed(3);
        assert_eq!(
            a.render(&PreparedAction::PredictMissing),
            b.render(&PreparedAction::PredictMissing)
        );
    }
}
