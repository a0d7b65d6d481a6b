use crate::cli::{Commands, ExpenseCommand, LimitCommand, ReportCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    if json_requested(command) {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

fn json_requested(command: &Commands) -> bool {
    match command {
        Commands::Expense { command } => match command {
            ExpenseCommand::Add { json, .. } | ExpenseCommand::List { json, .. } => *json,
        },
        Commands::Limit { command } => match command {
            LimitCommand::Show { json } | LimitCommand::Set { json, .. } => *json,
        },
        Commands::Report { command } => match command {
            ReportCommand::Export { json, .. } => *json,
        },
        Commands::Import { json, .. }
        | Commands::Dash { json }
        | Commands::Trend { json, .. }
        | Commands::Categories { json, .. }
        | Commands::Weekdays { json, .. }
        | Commands::Recurring { json, .. }
        | Commands::Change { json, .. }
        | Commands::Insights { json }
        | Commands::Ask { json, .. } => *json,
    }
}
