//! Text templates for assistant suggestions
//!
//! Pure functions: inputs in, text out. Time and randomness are passed in
//! by the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::category::Category;
use crate::ledger::{self, SpendingSummary};
use crate::purchase::PurchaseRecord;

/// Known healthier swaps, matched as substrings of the lowercased item
const COMMON_SWAPS: &[(&str, &[&str])] = &[
    ("white rice", &["brown rice", "quinoa", "cauliflower rice"]),
    ("bread", &["whole grain bread", "multigrain bread", "sourdough"]),
    ("milk", &["almond milk", "oat milk", "low-fat milk"]),
    ("sugar", &["honey", "stevia", "maple syrup"]),
    ("soda", &["sparkling water", "coconut water", "herbal tea"]),
    ("chips", &["veggie chips", "popcorn", "nuts"]),
];

pub fn predict_missing(milk_days_ago: u32) -> String {
    format!(
        "Based on your purchase history, you might need:

• Milk - Last purchased {} days ago
• Eggs - Commonly purchased weekly item
• Bread - Running low based on typical consumption
• Fresh vegetables - Good time to restock

Would you like to add these to your shopping list?",
        milk_days_ago
    )
}

pub fn healthy_alternatives(item: &str) -> String {
    let lowered = item.to_lowercase();
    if let Some((_, swaps)) = COMMON_SWAPS.iter().find(|(key, _)| lowered.contains(key)) {
        let bullets: Vec<String> = swaps.iter().map(|s| format!("• {}", s)).collect();
        return format!(
            "🥗 HEALTHIER ALTERNATIVES FOR '{}':

Consider these options:
{}

These alternatives typically offer better nutrition with more fiber, vitamins, or less processing.",
            item,
            bullets.join("\n")
        );
    }

    format!(
        "Healthier alternatives for \"{}\":

• Whole grain bread
  → More fiber, vitamins, and minerals than white bread

• Almond milk
  → Lower calories, lactose-free, rich in vitamin E

• Quinoa pasta
  → Higher protein content, gluten-free option

These alternatives offer better nutritional value while maintaining great taste!",
        item
    )
}

pub fn expiring_items(records: &[PurchaseRecord], threshold_days: u32, now: DateTime<Utc>) -> String {
    let expiring = ledger::expiring_within(records, threshold_days, now);
    if expiring.is_empty() {
        return format!(
            "✓ Great news! No items expiring in the next {} days.",
            threshold_days
        );
    }

    let entries: Vec<String> = expiring
        .iter()
        .map(|r| {
            format!(
                "• {}: {} day(s) left\n  Try: Make a smoothie or stir-fry",
                r.name,
                r.days_remaining(now)
            )
        })
        .collect();

    format!(
        "⚠️ Items expiring soon:

{}

Use these items soon to avoid waste!",
        entries.join("\n\n")
    )
}

pub fn shopping_list(items: &[String]) -> String {
    let mut sections: BTreeMap<usize, (Category, Vec<&str>)> = BTreeMap::new();
    for item in items {
        let category = Category::guess(item);
        let order = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(Category::ALL.len());
        sections
            .entry(order)
            .or_insert_with(|| (category, Vec::new()))
            .1
            .push(item.as_str());
    }

    let mut out = String::from("📝 Organized Shopping List:\n");
    for (category, entries) in sections.values() {
        out.push('\n');
        out.push_str(category.section_heading());
        out.push('\n');
        for entry in entries {
            out.push_str(&format!("• {}\n", entry));
        }
    }

    out.push_str(&format!("\nTotal items: {}\n", items.len()));
    out.push_str("\n💡 Tip: Don't forget reusable bags!");
    if items.iter().any(|i| i.to_lowercase().contains("white bread")) {
        out.push_str("\n⚠️ Health Note: Consider whole grain bread instead of white bread");
    }
    out
}

pub fn meal_ideas(records: &[PurchaseRecord], ingredient_limit: usize, now: DateTime<Utc>) -> String {
    let available = ledger::fresh_items(records, now, ingredient_limit);
    let pantry_line = if available.is_empty() {
        "Nothing fresh on hand right now, so these use staples.".to_string()
    } else {
        format!("Your available ingredients: {}", available.join(", "))
    };

    format!(
        "🍳 Meal Ideas Based on Your Groceries:

{}

MEAL 1: Quick Breakfast Bowl
Ingredients: Eggs, milk, bread
Steps: Scramble eggs with milk, serve with toasted bread

MEAL 2: Healthy Salad
Ingredients: Spinach, chicken, olive oil
Steps: Grill chicken, toss with fresh spinach and light dressing

MEAL 3: Protein Smoothie
Ingredients: Yogurt, milk, any fruits
Steps: Blend all ingredients until smooth

Enjoy your meals! 😋",
        pantry_line
    )
}

pub fn spending_analysis(summary: &SpendingSummary) -> String {
    let lines: Vec<String> = summary
        .by_category
        .iter()
        .map(|(category, total)| format!("- {}: ${:.2}", category, total))
        .collect();

    format!(
        "💰 SPENDING SUMMARY:

{}

Total Items: {}
Total Spent: ${:.2}

💡 Consider tracking prices to find better deals and identify overspending categories.",
        lines.join("\n"),
        summary.priced_items,
        summary.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::purchase::NewPurchase;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 0).unwrap()
    }

    #[test]
    fn predict_mentions_day_count() {
        assert!(predict_missing(4).contains("Milk - Last purchased 4 days ago"));
    }

    #[test]
    fn alternatives_use_swap_table() {
        let text = healthy_alternatives("White Rice");
        assert!(text.starts_with("🥗 HEALTHIER ALTERNATIVES FOR 'White Rice':"));
        assert!(text.contains("• brown rice\n• quinoa\n• cauliflower rice"));
    }

    #[test]
    fn alternatives_fall_back_to_generic() {
        let text = healthy_alternatives("granola");
        assert!(text.starts_with("Healthier alternatives for \"granola\":"));
        assert!(text.contains("Quinoa pasta"));
    }

    #[test]
    fn expiring_lists_days_left() {
        let mut ledger = Ledger::new();
        ledger.record_at(NewPurchase::new("Spinach", 1, 2), t0()).unwrap();
        ledger.record_at(NewPurchase::new("Rice", 1, 30), t0()).unwrap();

        let now = t0() + Duration::hours(1);
        let text = expiring_items(ledger.list(), 3, now);
        assert!(text.starts_with("⚠️ Items expiring soon:"));
        assert!(text.contains("• Spinach: 1 day(s) left\n  Try: Make a smoothie or stir-fry"));
        assert!(!text.contains("Rice"));
        assert!(text.ends_with("Use these items soon to avoid waste!"));
    }

    #[test]
    fn expiring_none() {
        let mut ledger = Ledger::new();
        ledger.record_at(NewPurchase::new("Rice", 1, 30), t0()).unwrap();
        assert_eq!(
            expiring_items(ledger.list(), 3, t0()),
            "✓ Great news! No items expiring in the next 3 days."
        );
    }

    #[test]
    fn shopping_list_groups_sections_in_order() {
        let items: Vec<String> = ["chicken", "Apples", "milk", "bread", "dish soap"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let text = shopping_list(&items);

        let produce = text.find("🥬 PRODUCE:\n• Apples").unwrap();
        let dairy = text.find("🥛 DAIRY:\n• milk").unwrap();
        let bakery = text.find("🍞 BAKERY:\n• bread").unwrap();
        let meat = text.find("🍗 MEAT & POULTRY:\n• chicken").unwrap();
        let other = text.find("🛒 OTHER:\n• dish soap").unwrap();
        assert!(produce < dairy && dairy < bakery && bakery < meat && meat < other);
        assert!(text.contains("Total items: 5"));
        assert!(!text.contains("Health Note"));
    }

    #[test]
    fn shopping_list_health_note_for_white_bread() {
        let text = shopping_list(&["White Bread".to_string()]);
        assert!(text.contains("Consider whole grain bread instead of white bread"));
    }

    #[test]
    fn meal_ideas_list_fresh_ingredients() {
        let mut ledger = Ledger::new();
        ledger.record_at(NewPurchase::new("eggs", 12, 7), t0()).unwrap();
        ledger
            .record_at(NewPurchase::new("old milk", 1, 1), t0() - Duration::days(5))
            .unwrap();
        ledger.record_at(NewPurchase::new("spinach", 1, 3), t0()).unwrap();

        let text = meal_ideas(ledger.list(), 10, t0());
        assert!(text.contains("Your available ingredients: eggs, spinach"));
        assert!(text.contains("MEAL 3: Protein Smoothie"));
    }

    #[test]
    fn spending_formats_money() {
        let mut ledger = Ledger::new();
        ledger
            .record_purchase(NewPurchase::new("organic eggs", 12, 2).with_unit_price(5.99))
            .unwrap();
        let summary = ledger.spending_by_category().unwrap();
        let text = spending_analysis(&summary);
        assert!(text.contains("- Dairy: $71.88"));
        assert!(text.contains("Total Items: 1"));
        assert!(text.contains("Total Spent: $71.88"));
    }
}
