use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::exit,
};

use clap::Parser;

use bankview::{
    Config, PAYMENTS_ENV_VAR, PageNavigation, Transaction, TransactionRow,
    count_transaction_categories, init_logging, page_count, page_slice,
};

/// Print the top categories and a page of formatted transactions from a JSON
/// export of an account's transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON array of transactions.
    transactions_path: PathBuf,

    /// The page of transactions to print.
    #[arg(short, long)]
    page: Option<String>,

    /// The number of transactions per page. Overrides `ROWS_PER_PAGE`.
    #[arg(long)]
    rows_per_page: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Nothing here talks to the payments network.
    let mut config = Config::from_lookup(|key| {
        env::var(key)
            .ok()
            .or_else(|| (key == PAYMENTS_ENV_VAR).then(|| "sandbox".to_owned()))
    })?;
    init_logging(&config);

    if let Some(rows_per_page) = args.rows_per_page {
        if rows_per_page == 0 {
            print_error("--rows-per-page must be at least 1.");
            exit(1);
        }

        config.pagination.rows_per_page = rows_per_page;
    }

    let transactions = load_transactions(&args.transactions_path)?;
    tracing::info!(
        "Loaded {} transactions from {:#?}",
        transactions.len(),
        args.transactions_path
    );

    print_top_categories(&transactions);
    println!();
    print_page(&transactions, &config, args.page.as_deref());

    Ok(())
}

fn load_transactions(path: &Path) -> Result<Vec<Transaction>, Box<dyn Error>> {
    if !path.is_file() {
        print_error(format!("File does not exist at {path:#?}!"));
        exit(1);
    }

    let json = fs::read_to_string(path)?;
    let transactions = serde_json::from_str(&json)?;

    Ok(transactions)
}

fn print_top_categories(transactions: &[Transaction]) {
    println!("Top Categories");

    let summary = count_transaction_categories(Some(transactions));
    if summary.is_empty() {
        println!("  (no transactions)");
    }

    for category in summary {
        println!(
            "  {:<30} {:>4}/{:<4} {:>3}%",
            category.label.as_str(),
            category.count,
            category.total_count,
            category.percent()
        );
    }
}

fn print_page(transactions: &[Transaction], config: &Config, page: Option<&str>) {
    let pagination = &config.pagination;
    let current_page = pagination.parse_page(page);
    let total_pages = page_count(transactions.len(), pagination.rows_per_page);
    let navigation = PageNavigation::new(current_page, total_pages);

    println!("Transactions (page {} of {})", navigation.current, navigation.total);

    for transaction in page_slice(transactions, current_page, pagination.rows_per_page) {
        let row = TransactionRow::new(transaction);
        println!(
            "  {:<24} {:>12}  {:<10} {:<24} {:<8} {}",
            row.truncated_name(20),
            row.amount,
            row.status.as_str(),
            row.date,
            row.channel,
            row.category.as_str()
        );
    }

    if navigation.is_visible() {
        let previous = navigation
            .previous
            .map_or_else(|| "-".to_owned(), |page| page.to_string());
        let next = navigation
            .next
            .map_or_else(|| "-".to_owned(), |page| page.to_string());
        println!("  Prev: {previous}  Next: {next}");
    }
}

fn print_error(message: impl std::fmt::Display) {
    eprintln!("\x1b[31;1mError:\x1b[0m {message}");
}
