use clap::{Parser, Subcommand};

pub fn parse_frequency(value: &str) -> Result<String, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "d" | "day" | "daily" => Ok("daily".to_string()),
        "w" | "week" | "weekly" => Ok("weekly".to_string()),
        "m" | "month" | "monthly" => Ok("monthly".to_string()),
        _ => Err("frequency must be one of: daily, weekly, monthly".to_string()),
    }
}

pub fn parse_report_kind(value: &str) -> Result<String, String> {
    match value {
        "trend" | "categories" | "weekdays" => Ok(value.to_string()),
        _ => Err("report must be one of: trend, categories, weekdays".to_string()),
    }
}

pub fn parse_positive_days(value: &str) -> Result<i64, String> {
    match value.parse::<i64>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err("days must be a whole number greater than zero".to_string()),
    }
}

/// Extended help shown after `smartspends import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
How bank import works:
  Point smartspends at a CSV statement exported by your bank.
  The date, debit amount and description columns are found by header name:
    amount       first header containing debit, withdraw or amount
    date         first header containing date
    description  first header containing desc, narration or details
  Use --date-column, --amount-column and --note-column when your bank uses
  different header names.

  Only debit rows are kept. Rows with an empty debit cell, an unreadable date
  or an unreadable amount are skipped and counted in the summary.
  Every imported row is stored under the category `Bank Debit`.

  <path> is a local file path. Use `-` to read the statement from stdin.
  Example: cat statement.csv | smartspends import --dry-run -

What to do next:
  1. Run `smartspends import --dry-run <path>` and check the detected columns.
  2. Run `smartspends import <path>` to save the debits.
  3. Run `smartspends dash` to see your weekly picture.
";

#[derive(Debug, Parser)]
#[command(
    name = "smartspends",
    version,
    about = "personal spending tracker and insight engine",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Profile to read and write (defaults to $SMARTSPENDS_USER, then `guest`)
    #[arg(long, global = true)]
    pub user: Option<String>,
    /// Evaluate as of this instant (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, global = true)]
    pub as_of: Option<String>,
    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record and review individual expenses
    #[command(arg_required_else_help = true)]
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Import debit rows from a bank statement CSV
    #[command(after_long_help = IMPORT_AFTER_HELP)]
    Import {
        /// Parse the statement and report what would be imported without saving
        #[arg(long)]
        dry_run: bool,
        /// Header of the transaction date column
        #[arg(long)]
        date_column: Option<String>,
        /// Header of the debit amount column
        #[arg(long)]
        amount_column: Option<String>,
        /// Header of the description column
        #[arg(long)]
        note_column: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a bank statement CSV (use `-` for stdin)
        path: String,
    },
    /// Show or change the weekly spending limit
    #[command(arg_required_else_help = true)]
    Limit {
        #[command(subcommand)]
        command: LimitCommand,
    },
    /// Weekly spend against your limit, plus current insights
    Dash {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Spending totals per day, week or month
    Trend {
        /// Bucket size: daily, weekly or monthly
        #[arg(long = "freq", value_parser = parse_frequency)]
        frequency: Option<String>,
        /// How many months to look back
        #[arg(long)]
        months: Option<u32>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Spending per category, largest first
    Categories {
        /// Trailing window in days
        #[arg(long, value_parser = parse_positive_days)]
        days: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Spending per day of the week
    Weekdays {
        /// Trailing window in days
        #[arg(long, value_parser = parse_positive_days)]
        days: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Find payments that repeat with the same description
    Recurring {
        /// Minimum number of payments before a description counts as recurring
        #[arg(long)]
        min_occurrences: Option<usize>,
        /// Trailing window in days
        #[arg(long, value_parser = parse_positive_days)]
        days: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Compare the latest period with the one before it
    Change {
        /// Period length in days
        #[arg(long, value_parser = parse_positive_days)]
        days: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Short observations about your recent spending
    Insights {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Ask a plain-language question about your spending
    Ask {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// The question, e.g. "where am I overspending?"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Write chart data to CSV files
    #[command(arg_required_else_help = true)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExpenseCommand {
    /// Record one expense
    Add {
        /// Amount spent (greater than zero)
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Category label, e.g. food or travel
        #[arg(long)]
        category: String,
        /// Free-text description; identical notes are grouped as recurring
        #[arg(long)]
        note: Option<String>,
        /// Date of the expense (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List recent expenses
    List {
        /// Show every stored expense instead of the last 7 days
        #[arg(long)]
        all: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum LimitCommand {
    /// Show the current weekly limit
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Set a new weekly limit
    Set {
        /// New weekly limit
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Export one chart as CSV into the reports directory
    Export {
        /// Which chart: trend, categories or weekdays
        #[arg(value_parser = parse_report_kind)]
        chart: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
