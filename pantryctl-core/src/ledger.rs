//! In-memory purchase ledger
//!
//! Append-only: records are never edited or removed, and insertion order is
//! display order. The ledger is owned by whoever drives the session (the TUI
//! app or the demo runner) and lent out by reference; assistant actions work
//! on a cloned snapshot.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::category::Category;
use crate::error::Result;
use crate::purchase::{ItemName, NewPurchase, PurchaseRecord, MAX_EXPIRY_DAYS};
use crate::validation::ValidationError;

/// Ordered, append-only collection of purchases for one session
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<PurchaseRecord>,
    next_id: u64,
}

/// Counts shown by `/stats` and the demo header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub total_records: usize,
    pub total_quantity: u64,
    pub categories: usize,
    pub fresh: usize,
    pub expiring: usize,
    pub expired: usize,
}

/// Per-category spend over priced purchases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub by_category: Vec<(Category, f64)>,
    pub priced_items: usize,
    pub total: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Record a purchase made now.
    pub fn record(&mut self, name: &str, quantity: u32, expiry_days: u32) -> Result<&PurchaseRecord> {
        self.record_purchase(NewPurchase::new(name, quantity, expiry_days))
    }

    /// Record a purchase with optional category and price, made now.
    pub fn record_purchase(&mut self, purchase: NewPurchase) -> Result<&PurchaseRecord> {
        self.record_at(purchase, Utc::now())
    }

    /// Record a purchase with an explicit purchase time.
    ///
    /// Validation happens before anything is appended, so a rejected
    /// purchase leaves the ledger untouched.
    pub fn record_at(&mut self, purchase: NewPurchase, at: DateTime<Utc>) -> Result<&PurchaseRecord> {
        let name = ItemName::new(&purchase.name)?;

        if purchase.quantity == 0 {
            return Err(ValidationError::InvalidFormat {
                field: "quantity",
                reason: "must be at least 1",
            }
            .into());
        }

        if purchase.expiry_days > MAX_EXPIRY_DAYS {
            return Err(ValidationError::InvalidFormat {
                field: "expiry days",
                reason: "must be at most 36500 (about 100 years)",
            }
            .into());
        }

        if let Some(price) = purchase.unit_price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::InvalidFormat {
                    field: "price",
                    reason: "must be a non-negative amount",
                }
                .into());
            }
        }

        let category = purchase
            .category
            .unwrap_or_else(|| Category::guess(name.as_str()));

        // Default-constructed ledgers start at 0; ids are 1-based.
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        let record = PurchaseRecord::new(
            id,
            name,
            purchase.quantity,
            category,
            purchase.unit_price,
            at,
            purchase.expiry_days,
        );
        info!(
            id = record.id,
            item = %record.name,
            quantity = record.quantity,
            category = %record.category,
            expiry_days = record.expiry_days,
            "purchase recorded"
        );
        self.records.push(record);

        Ok(&self.records[self.records.len() - 1])
    }

    /// Every record, in insertion order
    pub fn list(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with 0..=threshold whole days left, as of now
    pub fn expiring_within(&self, threshold_days: u32) -> Vec<&PurchaseRecord> {
        self.expiring_within_at(threshold_days, Utc::now())
    }

    /// Records with 0..=threshold whole days left at `now`, in insertion order
    pub fn expiring_within_at(&self, threshold_days: u32, now: DateTime<Utc>) -> Vec<&PurchaseRecord> {
        expiring_within(&self.records, threshold_days, now)
    }

    /// Names of unexpired records, oldest first, capped at `limit`
    pub fn fresh_items(&self, now: DateTime<Utc>, limit: usize) -> Vec<&str> {
        fresh_items(&self.records, now, limit)
    }

    pub fn statistics(&self, threshold_days: u32, now: DateTime<Utc>) -> LedgerStats {
        let categories: BTreeSet<Category> = self.records.iter().map(|r| r.category).collect();
        let mut fresh = 0;
        let mut expiring = 0;
        let mut expired = 0;
        for record in &self.records {
            let days = record.days_remaining(now);
            if days < 0 {
                expired += 1;
            } else if days <= i64::from(threshold_days) {
                expiring += 1;
            } else {
                fresh += 1;
            }
        }

        LedgerStats {
            total_records: self.records.len(),
            total_quantity: self.records.iter().map(|r| u64::from(r.quantity)).sum(),
            categories: categories.len(),
            fresh,
            expiring,
            expired,
        }
    }

    /// Spend per category; `None` when no purchase carries a price
    pub fn spending_by_category(&self) -> Option<SpendingSummary> {
        spending_by_category(&self.records)
    }

    /// Owned copy of the records for work that outlives the borrow
    pub fn snapshot(&self) -> Vec<PurchaseRecord> {
        self.records.clone()
    }
}

pub(crate) fn expiring_within(
    records: &[PurchaseRecord],
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Vec<&PurchaseRecord> {
    records
        .iter()
        .filter(|r| (0..=i64::from(threshold_days)).contains(&r.days_remaining(now)))
        .collect()
}

pub(crate) fn fresh_items(records: &[PurchaseRecord], now: DateTime<Utc>, limit: usize) -> Vec<&str> {
    records
        .iter()
        .filter(|r| !r.is_expired(now))
        .map(|r| r.name.as_str())
        .take(limit)
        .collect()
}

pub(crate) fn spending_by_category(records: &[PurchaseRecord]) -> Option<SpendingSummary> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
    let mut priced_items = 0;
    for record in records {
        if let Some(line) = record.line_total() {
            *totals.entry(record.category).or_insert(0.0) += line;
            priced_items += 1;
        }
    }

    if priced_items == 0 {
        return None;
    }

    let total = totals.values().sum();
    Some(SpendingSummary {
        by_category: totals.into_iter().collect(),
        priced_items,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PantryError;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn record_appends_one() {
        let mut ledger = Ledger::new();
        let record = ledger.record("Milk", 2, 5).unwrap();
        assert_eq!(record.name.as_str(), "Milk");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.expires_at - record.purchased_at, Duration::days(5));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected_without_state_change() {
        let mut ledger = Ledger::new();
        ledger.record("Bread", 1, 7).unwrap();

        let err = ledger.record("   ", 1, 7).unwrap_err();
        assert!(matches!(
            err,
            PantryError::Validation(ValidationError::Empty { .. })
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn huge_expiry_is_rejected_without_state_change() {
        let mut ledger = Ledger::new();
        ledger.record("Rice", 1, MAX_EXPIRY_DAYS).unwrap();

        for days in [MAX_EXPIRY_DAYS + 1, 100_000_000, u32::MAX] {
            let err = ledger.record("Rice", 1, days).unwrap_err();
            assert!(matches!(
                err,
                PantryError::Validation(ValidationError::InvalidFormat {
                    field: "expiry days",
                    ..
                })
            ));
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger.record("Eggs", 0, 7).unwrap_err();
        assert!(err.is_user_facing());
        assert!(ledger.is_empty());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .record_purchase(NewPurchase::new("Eggs", 1, 7).with_unit_price(-1.0))
            .unwrap_err();
        assert!(err.is_user_facing());
        assert!(ledger.is_empty());
    }

    #[test]
    fn ids_increase_and_default_ledger_starts_at_one() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.record("a", 1, 1).unwrap().id, 1);
        assert_eq!(ledger.record("b", 1, 1).unwrap().id, 2);
        assert_eq!(ledger.record("c", 1, 1).unwrap().id, 3);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        for name in ["Milk", "Eggs", "Bread"] {
            ledger.record(name, 1, 7).unwrap();
        }
        let names: Vec<_> = ledger.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn category_is_guessed_unless_given() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.record("whole milk", 1, 5).unwrap().category, Category::Dairy);
        let explicit = ledger
            .record_purchase(NewPurchase::new("whole milk", 1, 5).with_category(Category::Other))
            .unwrap();
        assert_eq!(explicit.category, Category::Other);
    }

    #[test]
    fn expiring_window_is_inclusive() {
        let mut ledger = Ledger::new();
        ledger.record_at(NewPurchase::new("ten", 1, 10), t0()).unwrap();
        ledger.record_at(NewPurchase::new("two", 1, 2), t0()).unwrap();
        ledger.record_at(NewPurchase::new("three", 1, 3), t0()).unwrap();
        ledger.record_at(NewPurchase::new("zero", 1, 0), t0()).unwrap();

        let names: Vec<_> = ledger
            .expiring_within_at(3, t0())
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["two", "three", "zero"]);

        // One minute later "zero" has expired and "three" has 2 days left
        let later = t0() + Duration::minutes(1);
        let names: Vec<_> = ledger
            .expiring_within_at(3, later)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["two", "three"]);
    }

    #[test]
    fn milk_with_five_days_is_not_expiring_immediately() {
        let mut ledger = Ledger::new();
        ledger.record("Milk", 2, 5).unwrap();
        assert!(ledger.expiring_within(3).is_empty());
    }

    #[test]
    fn statistics_buckets() {
        let mut ledger = Ledger::new();
        ledger.record_at(NewPurchase::new("whole milk", 1, 5), t0()).unwrap();
        ledger.record_at(NewPurchase::new("white bread", 2, 1), t0()).unwrap();
        ledger
            .record_at(NewPurchase::new("organic eggs", 12, 1), t0() - Duration::days(3))
            .unwrap();

        let stats = ledger.statistics(3, t0());
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.total_quantity, 15);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.fresh, 1);
        assert_eq!(stats.expiring, 1);
        assert_eq!(stats.expired, 1);
    }

    #[test]
    fn spending_groups_priced_lines() {
        let mut ledger = Ledger::new();
        assert!(ledger.spending_by_category().is_none());

        ledger
            .record_purchase(NewPurchase::new("whole milk", 2, 5).with_unit_price(2.0))
            .unwrap();
        ledger
            .record_purchase(NewPurchase::new("cheese", 1, 5).with_unit_price(4.5))
            .unwrap();
        ledger
            .record_purchase(NewPurchase::new("bread", 1, 5).with_unit_price(3.0))
            .unwrap();
        ledger.record("apples", 6, 10).unwrap();

        let summary = ledger.spending_by_category().unwrap();
        assert_eq!(summary.priced_items, 3);
        assert_eq!(summary.total, 11.5);
        assert_eq!(
            summary.by_category,
            vec![(Category::Dairy, 8.5), (Category::Bakery, 3.0)]
        );
    }

    #[test]
    fn fresh_items_skips_expired() {
        let mut ledger = Ledger::new();
        ledger
            .record_at(NewPurchase::new("old", 1, 1), t0() - Duration::days(2))
            .unwrap();
        ledger.record_at(NewPurchase::new("new", 1, 4), t0()).unwrap();
        assert_eq!(ledger.fresh_items(t0(), 10), ["new"]);
    }
}
