//! Grocery categories and the keyword table used to guess them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Store section a purchase belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Bakery,
    Pantry,
    Beverages,
    Snacks,
    Frozen,
    Other,
}

/// Keyword → category, checked in order; first substring hit wins.
///
/// Multi-word and more specific keywords come before the generic ones
/// ("ice cream" before "cream", "coconut water" before "water").
const KEYWORDS: &[(&str, Category)] = &[
    ("ice cream", Category::Frozen),
    ("peanut butter", Category::Pantry),
    ("watermelon", Category::Produce),
    ("eggplant", Category::Produce),
    ("steak", Category::Meat),
    ("frozen", Category::Frozen),
    ("coconut water", Category::Beverages),
    ("almond milk", Category::Dairy),
    ("oat milk", Category::Dairy),
    ("milk", Category::Dairy),
    ("cheese", Category::Dairy),
    ("yogurt", Category::Dairy),
    ("butter", Category::Dairy),
    ("cream", Category::Dairy),
    ("egg", Category::Dairy),
    ("chicken", Category::Meat),
    ("beef", Category::Meat),
    ("pork", Category::Meat),
    ("turkey", Category::Meat),
    ("bacon", Category::Meat),
    ("sausage", Category::Meat),
    ("fish", Category::Meat),
    ("salmon", Category::Meat),
    ("bread", Category::Bakery),
    ("bagel", Category::Bakery),
    ("croissant", Category::Bakery),
    ("muffin", Category::Bakery),
    ("sourdough", Category::Bakery),
    ("apple", Category::Produce),
    ("banana", Category::Produce),
    ("orange", Category::Produce),
    ("berr", Category::Produce),
    ("grape", Category::Produce),
    ("lettuce", Category::Produce),
    ("spinach", Category::Produce),
    ("tomato", Category::Produce),
    ("potato", Category::Produce),
    ("onion", Category::Produce),
    ("carrot", Category::Produce),
    ("pepper", Category::Produce),
    ("avocado", Category::Produce),
    ("vegetable", Category::Produce),
    ("fruit", Category::Produce),
    ("juice", Category::Beverages),
    ("soda", Category::Beverages),
    ("coffee", Category::Beverages),
    ("tea", Category::Beverages),
    ("water", Category::Beverages),
    ("chips", Category::Snacks),
    ("cookie", Category::Snacks),
    ("popcorn", Category::Snacks),
    ("chocolate", Category::Snacks),
    ("cracker", Category::Snacks),
    ("nuts", Category::Snacks),
    ("rice", Category::Pantry),
    ("pasta", Category::Pantry),
    ("flour", Category::Pantry),
    ("sugar", Category::Pantry),
    ("oil", Category::Pantry),
    ("cereal", Category::Pantry),
    ("oat", Category::Pantry),
    ("bean", Category::Pantry),
    ("sauce", Category::Pantry),
    ("salt", Category::Pantry),
];

impl Category {
    /// All categories, in shopping-list section order
    pub const ALL: [Category; 9] = [
        Category::Produce,
        Category::Dairy,
        Category::Bakery,
        Category::Meat,
        Category::Pantry,
        Category::Beverages,
        Category::Snacks,
        Category::Frozen,
        Category::Other,
    ];

    /// Guess a category from an item name, falling back to `Other`
    pub fn guess(item_name: &str) -> Self {
        let lowered = item_name.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    /// Display name ("Produce")
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Frozen => "Frozen",
            Category::Other => "Other",
        }
    }

    /// Section heading used in the organized shopping list
    pub fn section_heading(&self) -> &'static str {
        match self {
            Category::Produce => "🥬 PRODUCE:",
            Category::Dairy => "🥛 DAIRY:",
            Category::Meat => "🍗 MEAT & POULTRY:",
            Category::Bakery => "🍞 BAKERY:",
            Category::Pantry => "🥫 PANTRY:",
            Category::Beverages => "🧃 BEVERAGES:",
            Category::Snacks => "🍿 SNACKS:",
            Category::Frozen => "🧊 FROZEN:",
            Category::Other => "🛒 OTHER:",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "category",
                value: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_items() {
        assert_eq!(Category::guess("whole milk"), Category::Dairy);
        assert_eq!(Category::guess("White Bread"), Category::Bakery);
        assert_eq!(Category::guess("organic eggs"), Category::Dairy);
        assert_eq!(Category::guess("Apples"), Category::Produce);
        assert_eq!(Category::guess("chicken thighs"), Category::Meat);
        assert_eq!(Category::guess("vanilla ice cream"), Category::Frozen);
        assert_eq!(Category::guess("coconut water"), Category::Beverages);
    }

    #[test]
    fn unknown_items_are_other() {
        assert_eq!(Category::guess("dish soap"), Category::Other);
        assert_eq!(Category::guess(""), Category::Other);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("dairy".parse::<Category>().unwrap(), Category::Dairy);
        assert_eq!(" FROZEN ".parse::<Category>().unwrap(), Category::Frozen);

        let err = "deli".parse::<Category>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));
    }
}
