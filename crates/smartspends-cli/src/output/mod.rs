mod analytics_text;
mod error_text;
mod expense_text;
mod format;
mod json;
mod mode;

use std::io;

use smartspends_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let data = &success.data;
    match success.command.as_str() {
        "expense add" => expense_text::render_expense_add(data),
        "expense list" => expense_text::render_expense_list(data),
        "import" => expense_text::render_import(data),
        "limit show" | "limit set" => expense_text::render_limit(&success.command, data),
        "dash" => analytics_text::render_dash(data),
        "trend" => analytics_text::render_trend(data),
        "categories" => analytics_text::render_categories(data),
        "weekdays" => analytics_text::render_weekdays(data),
        "recurring" => analytics_text::render_recurring(data),
        "change" => analytics_text::render_change(data),
        "insights" => analytics_text::render_insights(data),
        "ask" => analytics_text::render_ask(data),
        "report export" => analytics_text::render_report_export(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
