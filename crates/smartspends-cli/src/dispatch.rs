use smartspends_client::commands;
use smartspends_client::commands::categories::CategoriesRunOptions;
use smartspends_client::commands::change::ChangeRunOptions;
use smartspends_client::commands::common::ProfileScope;
use smartspends_client::commands::expense::{ExpenseAddOptions, ExpenseListOptions};
use smartspends_client::commands::import::{ColumnOverrides, ImportRunOptions};
use smartspends_client::commands::recurring::RecurringRunOptions;
use smartspends_client::commands::trend::TrendRunOptions;
use smartspends_client::commands::weekdays::WeekdaysRunOptions;
use smartspends_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ExpenseCommand, LimitCommand, ReportCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let scope = ProfileScope {
        user: cli.user.as_deref(),
        as_of: cli.as_of.as_deref(),
        home_override: None,
    };

    match &cli.command {
        Commands::Expense { command } => match command {
            ExpenseCommand::Add {
                amount,
                category,
                note,
                date,
                json: _,
            } => commands::expense::add_with_options(ExpenseAddOptions {
                scope,
                amount: *amount,
                category: category.clone(),
                note: note.clone(),
                date: date.clone(),
            }),
            ExpenseCommand::List { all, .. } => {
                commands::expense::list_with_options(ExpenseListOptions { scope, all: *all })
            }
        },
        Commands::Import {
            dry_run,
            date_column,
            amount_column,
            note_column,
            path,
            json: _,
        } => commands::import::run_with_options(ImportRunOptions {
            scope,
            path: path.clone(),
            dry_run: *dry_run,
            columns: ColumnOverrides {
                date: date_column.clone(),
                amount: amount_column.clone(),
                note: note_column.clone(),
            },
            stdin_override: None,
        }),
        Commands::Limit { command } => match command {
            LimitCommand::Show { .. } => commands::limit::show_with_options(scope),
            LimitCommand::Set { amount, .. } => commands::limit::set_with_options(scope, *amount),
        },
        Commands::Dash { .. } => commands::dash::run_with_options(scope),
        Commands::Trend {
            frequency, months, ..
        } => commands::trend::run_with_options(TrendRunOptions {
            scope,
            frequency: frequency.as_deref(),
            months: *months,
        }),
        Commands::Categories { days, .. } => {
            commands::categories::run_with_options(CategoriesRunOptions { scope, days: *days })
        }
        Commands::Weekdays { days, .. } => {
            commands::weekdays::run_with_options(WeekdaysRunOptions { scope, days: *days })
        }
        Commands::Recurring {
            min_occurrences,
            days,
            ..
        } => commands::recurring::run_with_options(RecurringRunOptions {
            scope,
            min_occurrences: *min_occurrences,
            days: *days,
        }),
        Commands::Change { days, .. } => {
            commands::change::run_with_options(ChangeRunOptions { scope, days: *days })
        }
        Commands::Insights { .. } => commands::insights::run_with_options(scope),
        Commands::Ask { question, .. } => {
            commands::ask::run_with_options(scope, &question.join(" "))
        }
        Commands::Report { command } => match command {
            ReportCommand::Export { chart, .. } => {
                commands::report::export_with_options(scope, chart)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use smartspends_client::commands;
    use smartspends_client::commands::common::ProfileScope;

    use crate::cli::parse_from;

    static HOME_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn unique_home() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|value| value.as_nanos())
            .unwrap_or(0);
        let count = HOME_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "smartspends-dispatch-{}-{nanos}-{count}",
            std::process::id()
        ))
    }

    #[test]
    fn parse_errors_never_reach_dispatch() {
        let parsed = parse_from(["smartspends", "trend", "--freq", "yearly"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_question_is_rejected_before_touching_the_store() {
        let parsed = parse_from(["smartspends", "ask", "   "]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = super::dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }

    #[test]
    fn command_names_match_the_client_envelopes() {
        let home = unique_home();
        let scope = ProfileScope {
            user: Some("dispatch"),
            as_of: Some("2026-09-10"),
            home_override: Some(&home),
        };

        let added = commands::expense::add_with_options(
            commands::expense::ExpenseAddOptions {
                scope,
                amount: 120.0,
                category: "food".to_string(),
                note: Some("Swiggy".to_string()),
                date: Some("2026-09-09".to_string()),
            },
        );
        assert!(added.is_ok());
        if let Ok(success) = added {
            assert_eq!(success.command, "expense add");
        }

        let limit = commands::limit::show_with_options(scope);
        assert!(limit.is_ok());
        if let Ok(success) = limit {
            assert_eq!(success.command, "limit show");
        }

        let report = commands::report::export_with_options(scope, "categories");
        assert!(report.is_ok());
        if let Ok(success) = report {
            assert_eq!(success.command, "report export");
        }

        let _ = std::fs::remove_dir_all(&home);
    }
}
