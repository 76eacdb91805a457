//! Scratch pane command parsing
//!
//! Commands start with `/`. Plain text is treated as `/add <text>`.
//!
//! Supported commands:
//! - `/add <name> [qty] [days] [@category] [$price]` - Log a purchase
//! - `/alt <item>` - Healthier alternatives for an item
//! - `/shop <a, b, c>` - Organize a shopping list
//! - `/predict`, `/expiring`, `/meals`, `/spending` - History-based suggestions
//! - `/stats` - Purchase statistics
//! - `/help`, `/clear`, `/quit`

use pantryctl_core::{ActionKind, Category, LedgerConfig, NewPurchase, ValidationError};

/// Arguments of `/add`, still unvalidated
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddArgs {
    pub name: String,
    pub quantity: Option<u32>,
    pub expiry_days: Option<u32>,
    pub category: Option<String>,
    pub price: Option<String>,
}

/// A parsed command from scratch input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Log a purchase
    Add(AddArgs),
    /// Healthier alternatives for one item
    Alternatives { item: String },
    /// Organize a comma separated list
    Shop { items: String },
    /// Run a history-based action
    Action(ActionKind),
    /// Show ledger statistics
    Stats,
    /// Show help
    Help,
    /// Clear scratch content
    Clear,
    /// Quit the application
    Quit,
    /// Unknown command
    Unknown { cmd: String, args: String },
}

/// Result of parsing scratch content
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// A valid command was found
    Command(Command),
    /// Not a command (regular text or empty)
    Text(String),
    /// Incomplete command (ends with / but no command yet)
    Incomplete,
}

/// Parse scratch content to extract commands
pub fn parse_scratch(input: &str) -> ParseResult {
    let trimmed = input.trim();

    let Some(without_slash) = trimmed.strip_prefix('/') else {
        return ParseResult::Text(trimmed.to_string());
    };

    if without_slash.is_empty() {
        return ParseResult::Incomplete;
    }

    // Split into command and args
    let (cmd, args) = match without_slash.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd.to_lowercase(), args.trim()),
        None => (without_slash.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "add" | "a" => Command::Add(AddArgs::parse(args)),
        "alt" | "alternatives" | "swap" => Command::Alternatives {
            item: args.to_string(),
        },
        "shop" | "list" | "s" => Command::Shop {
            items: args.to_string(),
        },
        "predict" | "p" => Command::Action(ActionKind::PredictMissing),
        "expiring" | "e" => Command::Action(ActionKind::ExpiringItems),
        "meals" | "meal" | "m" => Command::Action(ActionKind::MealIdeas),
        "spending" | "spend" => Command::Action(ActionKind::SpendingAnalysis),
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "clear" | "c" => Command::Clear,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown {
            cmd,
            args: args.to_string(),
        },
    };

    ParseResult::Command(command)
}

impl AddArgs {
    /// Split `/add` arguments.
    ///
    /// `@word` sets the category and `$number` the unit price, anywhere on
    /// the line. Up to two trailing numbers are quantity then days; whatever
    /// remains is the item name.
    pub fn parse(args: &str) -> Self {
        let mut parsed = AddArgs::default();
        let mut words = Vec::new();

        for token in args.split_whitespace() {
            if let Some(category) = token.strip_prefix('@').filter(|c| !c.is_empty()) {
                parsed.category = Some(category.to_string());
            } else if let Some(price) = token.strip_prefix('$').filter(|p| !p.is_empty()) {
                parsed.price = Some(price.to_string());
            } else {
                words.push(token);
            }
        }

        let mut numbers = Vec::new();
        while numbers.len() < 2 {
            match words.last().and_then(|w| w.parse::<u32>().ok()) {
                Some(n) => {
                    numbers.push(n);
                    words.pop();
                }
                None => break,
            }
        }
        numbers.reverse();
        match numbers[..] {
            [quantity, days] => {
                parsed.quantity = Some(quantity);
                parsed.expiry_days = Some(days);
            }
            [quantity] => parsed.quantity = Some(quantity),
            _ => {}
        }

        parsed.name = words.join(" ");
        parsed
    }

    /// Fill defaults and check the pieces the ledger does not see as text
    pub fn into_purchase(self, defaults: &LedgerConfig) -> Result<NewPurchase, ValidationError> {
        let mut purchase = NewPurchase::new(
            self.name,
            self.quantity.unwrap_or(defaults.default_quantity),
            self.expiry_days.unwrap_or(defaults.default_expiry_days),
        );
        if let Some(raw) = self.category {
            purchase = purchase.with_category(raw.parse::<Category>()?);
        }
        if let Some(raw) = self.price {
            let price = raw.parse::<f64>().map_err(|_| ValidationError::InvalidFormat {
                field: "price",
                reason: "expected a number like 3.99",
            })?;
            purchase = purchase.with_unit_price(price);
        }
        Ok(purchase)
    }
}

/// Get command completions for partial input
pub fn get_completions(partial: &str) -> Vec<&'static str> {
    let commands = [
        "/add", "/alt", "/shop", "/predict", "/expiring", "/meals", "/spending", "/stats",
        "/help", "/clear", "/quit",
    ];

    if partial.is_empty() || partial == "/" {
        return commands.to_vec();
    }

    let partial_lower = partial.to_lowercase();
    commands
        .into_iter()
        .filter(|cmd| cmd.starts_with(&partial_lower))
        .collect()
}

/// Get help text for commands
pub fn get_help_text() -> &'static str {
    r#"Scratch Commands (i to edit, Enter to run):
  /add <name> [qty] [days] [@category] [$price]
                     - Log a purchase (plain text works too)
  /alt <item>        - Healthier alternatives for an item
  /shop <a, b, c>    - Organize a shopping list by section
  /predict           - Predict items you may be missing
  /expiring          - Items expiring soon
  /meals             - Meal ideas from your groceries
  /spending          - Spending by category
  /stats             - Purchase statistics
  /clear             - Clear scratch content
  /quit              - Quit the application

Hotkeys (normal mode):
  a / h / s          - Start /add, /alt, /shop
  p / e / m / $      - Predict, expiring, meals, spending
  1-6                - Show result panel
  j/k                - Move through purchase history
  ?                  - This help
  q                  - Quit

Example: /add whole milk 2 5 $3.99"#
}
