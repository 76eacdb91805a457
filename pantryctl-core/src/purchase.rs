//! Purchase records and the input used to create them

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::validation::ValidationError;

/// Maximum length for item names
const MAX_ITEM_NAME_LEN: usize = 128;

const SECONDS_PER_DAY: i64 = 86_400;

/// Validated, trimmed item name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Create an item name, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use pantryctl_core::ItemName;
    ///
    /// assert_eq!(ItemName::new("  Milk ").unwrap().as_str(), "Milk");
    /// assert!(ItemName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "an item name",
            });
        }

        if trimmed.chars().count() > MAX_ITEM_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "item name",
                max: MAX_ITEM_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest shelf life accepted for a purchase (about a century)
pub const MAX_EXPIRY_DAYS: u32 = 36_500;

/// Raw user input for a purchase, validated by the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub name: String,
    pub quantity: u32,
    pub expiry_days: u32,
    pub category: Option<Category>,
    pub unit_price: Option<f64>,
}

impl NewPurchase {
    pub fn new(name: impl Into<String>, quantity: u32, expiry_days: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            expiry_days,
            category: None,
            unit_price: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }
}

/// One logged grocery purchase. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: u64,
    pub name: ItemName,
    pub quantity: u32,
    pub category: Category,
    pub unit_price: Option<f64>,
    pub purchased_at: DateTime<Utc>,
    pub expiry_days: u32,
    pub expires_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Build a record from validated parts; `expires_at` is derived here only.
    pub(crate) fn new(
        id: u64,
        name: ItemName,
        quantity: u32,
        category: Category,
        unit_price: Option<f64>,
        purchased_at: DateTime<Utc>,
        expiry_days: u32,
    ) -> Self {
        let expires_at = purchased_at + Duration::days(i64::from(expiry_days));
        Self {
            id,
            name,
            quantity,
            category,
            unit_price,
            purchased_at,
            expiry_days,
            expires_at,
        }
    }

    /// Whole days until expiry, floored (half a day past expiry is -1).
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }

    /// Whole days since purchase, floored
    pub fn days_since_purchase(&self, now: DateTime<Utc>) -> i64 {
        (now - self.purchased_at)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Total spent on this line, if priced
    pub fn line_total(&self) -> Option<f64> {
        self.unit_price.map(|p| p * f64::from(self.quantity))
    }

    /// Badge state for the history view
    pub fn freshness(&self, now: DateTime<Utc>, threshold_days: u32) -> Freshness {
        let days = self.days_remaining(now);
        if days <= i64::from(threshold_days) {
            Freshness::Expiring { days }
        } else {
            Freshness::Fresh
        }
    }
}

/// Badge shown next to a purchase in the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// Within the threshold; negative once already expired
    Expiring { days: i64 },
}

impl Freshness {
    pub fn badge(&self) -> String {
        match self {
            Freshness::Fresh => "Fresh".to_string(),
            Freshness::Expiring { days } => format!("Expires in {}d", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn record(expiry_days: u32) -> PurchaseRecord {
        PurchaseRecord::new(
            1,
            ItemName::new("Milk").unwrap(),
            2,
            Category::Dairy,
            Some(1.5),
            at(1, 12),
            expiry_days,
        )
    }

    #[test]
    fn item_name_rejects_blank() {
        assert!(matches!(
            ItemName::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
        assert!(matches!(
            ItemName::new(" \t ").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn item_name_max_length() {
        assert!(ItemName::new(&"a".repeat(128)).is_ok());
        let err = ItemName::new(&"a".repeat(129)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn expiry_is_derived_from_days() {
        let r = record(5);
        assert_eq!(r.expires_at, at(6, 12));
        assert_eq!(r.expires_at - r.purchased_at, Duration::days(5));
    }

    #[test]
    fn days_remaining_floors() {
        let r = record(5);
        assert_eq!(r.days_remaining(at(1, 12)), 5);
        // One hour later: 4 days 23 hours left
        assert_eq!(r.days_remaining(at(1, 13)), 4);
        // Half a day past expiry
        assert_eq!(r.days_remaining(at(7, 0)), -1);
    }

    #[test]
    fn freshness_badge() {
        let r = record(5);
        assert_eq!(r.freshness(at(1, 13), 3), Freshness::Fresh);
        assert_eq!(r.freshness(at(3, 13), 3), Freshness::Expiring { days: 2 });
        assert_eq!(Freshness::Expiring { days: 2 }.badge(), "Expires in 2d");
        assert_eq!(Freshness::Fresh.badge(), "Fresh");
    }

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(record(1).line_total(), Some(3.0));
    }

    #[test]
    fn record_serializes_with_plain_name_and_lowercase_category() {
        let json = serde_json::to_value(record(5)).unwrap();
        assert_eq!(json["name"], "Milk");
        assert_eq!(json["category"], "dairy");
        assert_eq!(json["quantity"], 2);
    }
}
