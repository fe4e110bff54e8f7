//! # Inventory Command
//!
//! Command-line front end over the [`Inventory`] handle.
//!
//! ## Usage
//! ```bash
//! # Show the catalog
//! cargo run -p mebel-storage --bin inventory -- list
//!
//! # Sell two sofas
//! cargo run -p mebel-storage --bin inventory -- sell SF001 2
//!
//! # Use a specific data directory
//! cargo run -p mebel-storage --bin inventory -- --data-dir ./data report --json
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use std::env;
use std::path::PathBuf;

use mebel_core::{
    CategoryTable, InventoryReport, LedgerSummary, Money, NewProduct, ProductRecord,
    ProductUpdate, TransactionRecord, UpdateOutcome,
};
use mebel_storage::{Inventory, StorageConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const USAGE: &str = "\
Mebel Inventory

Usage: inventory [--data-dir PATH] <COMMAND>

Commands:
  list                                   Show every product
  search CODE                            Show one product
  add CODE NAME CATEGORY PRICE STOCK     Add a product
  update CODE [--name N] [--category C] [--price P] [--stock S]
                                         Change some fields of a product
  delete CODE                            Remove a product
  sell CODE QTY                          Record a sale
  history                                Show every recorded sale
  report [--json]                        Stock and sales summary
  categories                             Show the category table

Options:
  -d, --data-dir <PATH>  Data directory (default: MEBEL_DATA_DIR or the platform data dir)
  -h, --help             Show this help message";

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - ERROR: Failures that abort a command
/// - WARN: Recoverable issues (unknown category in the snapshot)
/// - INFO: Loads, seeding, recorded sales
/// - DEBUG: Every store and file operation
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mebel=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    init_tracing();

    // Parse global options, then the command
    let args: Vec<String> = env::args().skip(1).collect();
    let mut data_dir: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" if rest.is_empty() => {
                let dir = args.get(i + 1).ok_or("--data-dir needs a path")?;
                data_dir = Some(PathBuf::from(dir));
                i += 1;
            }
            "--help" | "-h" if rest.is_empty() => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    let Some((command, params)) = rest.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = StorageConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    let mut inventory = Inventory::open(config)?;

    match command.as_str() {
        "list" => print_products(inventory.products().iter(), inventory.categories()),
        "search" => {
            let code = arg(params, 0, "CODE")?;
            match inventory.find_product(code) {
                Some(product) => print_products([product], inventory.categories()),
                None => println!("Product {} not found", code),
            }
        }
        "add" => {
            let input = NewProduct {
                code: arg(params, 0, "CODE")?.to_string(),
                name: arg(params, 1, "NAME")?.to_string(),
                category_key: arg(params, 2, "CATEGORY")?.trim().to_uppercase(),
                unit_price: arg(params, 3, "PRICE")?.parse::<Money>()?,
                stock_quantity: arg(params, 4, "STOCK")?.parse()?,
            };
            let product = inventory.add_product(input)?;
            println!("✓ Added {} ({})", product.code, product.name);
        }
        "update" => {
            let code = arg(params, 0, "CODE")?;
            let update = parse_update(&params[1..])?;
            match inventory.update_product(code, update)? {
                UpdateOutcome::Updated => println!("✓ Updated {}", code),
                UpdateOutcome::NoChanges => println!("No changes for {}", code),
                UpdateOutcome::NotFound => println!("Product {} not found", code),
            }
        }
        "delete" => {
            let code = arg(params, 0, "CODE")?;
            if inventory.delete_product(code)? {
                println!("✓ Deleted {}", code);
            } else {
                println!("Product {} not found", code);
            }
        }
        "sell" => {
            let code = arg(params, 0, "CODE")?;
            let quantity: i64 = arg(params, 1, "QTY")?.parse()?;
            let txn = inventory.sell(code, quantity)?;
            println!(
                "✓ {}  {} x {} @ {} = {}",
                txn.transaction_id, txn.quantity, txn.product_name, txn.unit_price, txn.total
            );
        }
        "history" => print_history(&inventory.history()?),
        "report" => {
            let report = inventory.report(inventory.config().low_stock_threshold)?;
            let sales = inventory.ledger_summary()?;
            if params.iter().any(|p| p == "--json") {
                let output = ReportOutput {
                    inventory: &report,
                    sales: &sales,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&report, &sales);
            }
        }
        "categories" => {
            for entry in inventory.categories().entries() {
                println!("{:<14} {}", entry.key, entry.label);
            }
        }
        other => return Err(format!("unknown command '{}'\n\n{}", other, USAGE).into()),
    }

    Ok(())
}

// =============================================================================
// Argument Helpers
// =============================================================================

fn arg<'a>(params: &'a [String], index: usize, name: &str) -> CliResult<&'a str> {
    params
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument {}", name).into())
}

fn parse_update(flags: &[String]) -> CliResult<ProductUpdate> {
    let mut update = ProductUpdate::default();

    let mut i = 0;
    while i < flags.len() {
        let value = flags
            .get(i + 1)
            .ok_or_else(|| format!("{} needs a value", flags[i]))?;
        update = match flags[i].as_str() {
            "--name" => update.name(value.as_str()),
            "--category" => update.category_key(value.trim().to_uppercase()),
            "--price" => update.unit_price(value.parse::<Money>()?),
            "--stock" => update.stock_quantity(value.parse()?),
            other => return Err(format!("unknown update flag '{}'", other).into()),
        };
        i += 2;
    }

    Ok(update)
}

// =============================================================================
// Output
// =============================================================================

#[derive(Serialize)]
struct ReportOutput<'a> {
    inventory: &'a InventoryReport,
    sales: &'a LedgerSummary,
}

fn print_products<'a>(
    products: impl IntoIterator<Item = &'a ProductRecord>,
    categories: &CategoryTable,
) {
    println!(
        "{:<8} {:<32} {:<24} {:>14} {:>6}",
        "CODE", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for p in products {
        println!(
            "{:<8} {:<32} {:<24} {:>14} {:>6}",
            p.code,
            p.name,
            categories.label_or_key(&p.category_key),
            p.unit_price.to_string(),
            p.stock_quantity
        );
    }
}

fn print_history(transactions: &[TransactionRecord]) {
    if transactions.is_empty() {
        println!("No transactions yet");
        return;
    }

    println!(
        "{:<22} {:<19} {:<8} {:<28} {:>4} {:>14}",
        "ID", "TIME", "CODE", "PRODUCT", "QTY", "TOTAL"
    );
    for t in transactions {
        println!(
            "{:<22} {:<19} {:<8} {:<28} {:>4} {:>14}",
            t.transaction_id,
            t.timestamp,
            t.product_code,
            t.product_name,
            t.quantity,
            t.total.to_string()
        );
    }
}

fn print_report(report: &InventoryReport, sales: &LedgerSummary) {
    println!("Inventory Report");
    println!("================");
    println!("Products:        {}", report.total_products);
    println!("Inventory value: {}", report.total_value);
    println!();

    println!("By category:");
    for c in &report.by_category {
        println!("  {:<24} {:>6} units {:>16}", c.label, c.units, c.value.to_string());
    }
    println!();

    println!("Low stock (< {}):", report.low_stock_threshold);
    if report.low_stock.is_empty() {
        println!("  none");
    }
    for p in &report.low_stock {
        println!("  {:<8} {:<32} {:>6}", p.code, p.name, p.stock_quantity);
    }
    println!();

    println!("Sales:");
    println!("  Transactions: {}", sales.transaction_count);
    println!("  Units sold:   {}", sales.units_sold);
    println!("  Revenue:      {}", sales.total_revenue);
}
