//! Output formatting for the CLI.

use console::style;
use lustre_commerce::catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a product card as one table row.
    pub fn product_row(&self, product: &Product) {
        let price = price_label(product);
        let material = product.material().unwrap_or("-");
        let badges = badges(product);
        self.table_row(
            &[
                product.id.as_str(),
                product.name.as_str(),
                price.as_str(),
                material,
                badges.as_str(),
            ],
            &PRODUCT_WIDTHS,
        );
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Column widths of [`Output::product_row`].
pub const PRODUCT_WIDTHS: [usize; 5] = [10, 28, 20, 16, 12];

/// Display price, with the strike-through price in brackets when there are
/// savings.
pub fn price_label(product: &Product) -> String {
    let price = product.display_price().display();
    match (product.old_price, product.savings()) {
        (Some(old), Some(_)) => format!("{} (was {})", price, old.display()),
        _ => price,
    }
}

fn badges(product: &Product) -> String {
    let mut badges = Vec::new();
    if product.is_new {
        badges.push("new".to_string());
    }
    if product.has_discount() {
        badges.push(format!("-{}%", product.discount));
    }
    badges.join(" ")
}
