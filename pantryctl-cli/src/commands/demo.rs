//! `pantryctl demo`: seed sample purchases and run every assistant action

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use pantryctl_core::{
    ActionKind, ActionRequest, Advisor, AdvisorConfig, Ledger, LedgerStats, NewPurchase,
    PantryConfig, PurchaseRecord, Suggestion, TemplateAdvisor,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Assistant response delay in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Seed for reproducible suggestions
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One action's result, tagged by `type` (`ai_response` or `error`)
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Outcome {
    AiResponse { action: ActionKind, result: String },
    Error { action: ActionKind, error: String },
}

impl Outcome {
    fn from_suggestion(suggestion: Suggestion) -> Self {
        Outcome::AiResponse {
            action: suggestion.kind,
            result: suggestion.text,
        }
    }
}

#[derive(Debug, Serialize)]
struct DemoReport<'a> {
    purchases: &'a [PurchaseRecord],
    stats: LedgerStats,
    results: Vec<Outcome>,
}

/// Sample purchases: milk, bread and a dozen eggs, all bought at `at`
fn seed_ledger(at: DateTime<Utc>) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for purchase in [
        NewPurchase::new("whole milk", 1, 5).with_unit_price(3.99),
        NewPurchase::new("white bread", 1, 7).with_unit_price(2.49),
        NewPurchase::new("organic eggs", 12, 2).with_unit_price(5.99),
    ] {
        ledger
            .record_at(purchase, at)
            .context("Failed to seed demo purchase")?;
    }
    Ok(ledger)
}

fn demo_requests() -> Vec<ActionRequest> {
    vec![
        ActionRequest::PredictMissing,
        ActionRequest::HealthyAlternatives {
            item: "white bread".to_string(),
        },
        ActionRequest::ExpiringItems,
        ActionRequest::ShoppingList {
            items: "apples, milk, white bread, chicken".to_string(),
        },
        ActionRequest::MealIdeas,
        ActionRequest::SpendingAnalysis,
    ]
}

enum Pending {
    Done(Outcome),
    Running(JoinHandle<pantryctl_core::Result<Suggestion>>),
}

/// Dispatch all actions at once, then collect them in request order
async fn run_actions(
    ledger: &Ledger,
    config: &AdvisorConfig,
    advisor: Arc<dyn Advisor>,
    requests: Vec<ActionRequest>,
) -> Result<Vec<Outcome>> {
    let mut pending = Vec::with_capacity(requests.len());
    for request in &requests {
        let kind = request.kind();
        match request.prepare(ledger, config) {
            Ok(prepared) => {
                let advisor = Arc::clone(&advisor);
                pending.push(Pending::Running(tokio::spawn(async move {
                    advisor.respond(prepared).await
                })));
            }
            Err(err) => {
                warn!(action = kind.slug(), "{}", err);
                pending.push(Pending::Done(Outcome::Error {
                    action: kind,
                    error: err.to_string(),
                }));
            }
        }
    }

    let mut outcomes = Vec::with_capacity(pending.len());
    for (request, slot) in requests.iter().zip(pending) {
        let outcome = match slot {
            Pending::Done(outcome) => outcome,
            Pending::Running(handle) => {
                let kind = request.kind();
                match handle
                    .await
                    .with_context(|| format!("{} task failed", kind.slug()))?
                {
                    Ok(suggestion) => Outcome::from_suggestion(suggestion),
                    Err(err) => Outcome::Error {
                        action: kind,
                        error: err.to_string(),
                    },
                }
            }
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

pub async fn run_demo(args: DemoArgs, mut config: PantryConfig) -> Result<()> {
    if let Some(delay_ms) = args.delay_ms {
        config.advisor.response_delay_ms = delay_ms;
    }

    let ledger = seed_ledger(Utc::now())?;
    let mut advisor = TemplateAdvisor::from_config(&config.advisor);
    if let Some(seed) = args.seed {
        advisor = advisor.with_seed(seed);
    }

    let requests = demo_requests();
    info!(
        actions = requests.len(),
        delay_ms = config.advisor.response_delay_ms,
        "running assistant actions"
    );
    let results = run_actions(&ledger, &config.advisor, Arc::new(advisor), requests).await?;

    let now = Utc::now();
    let threshold = config.advisor.expiring_threshold_days;
    let report = DemoReport {
        purchases: ledger.list(),
        stats: ledger.statistics(threshold, now),
        results,
    };

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_text(&report, threshold, now)),
    }
    Ok(())
}

fn render_text(report: &DemoReport<'_>, threshold: u32, now: DateTime<Utc>) -> String {
    let mut out = format!("🛒 Purchase History ({})\n", report.purchases.len());
    for record in report.purchases {
        let price = record
            .unit_price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {} (x{})  added {}  {}  {}  {}\n",
            record.name,
            record.quantity,
            record.purchased_at.format("%Y-%m-%d"),
            record.category,
            price,
            record.freshness(now, threshold).badge()
        ));
    }

    let stats = &report.stats;
    out.push_str(&format!(
        "\n📊 {} purchases, {} items, {} categories ({} fresh, {} expiring, {} expired)\n",
        stats.total_records,
        stats.total_quantity,
        stats.categories,
        stats.fresh,
        stats.expiring,
        stats.expired
    ));

    for outcome in &report.results {
        let (kind, body) = match outcome {
            Outcome::AiResponse { action, result } => (action, result.clone()),
            Outcome::Error { action, error } => (action, format!("⚠️ {}", error)),
        };
        out.push_str(&format!("\n━━ {} ━━\n{}\n", kind.title(), body));
    }
    out
}
