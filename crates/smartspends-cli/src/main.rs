mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use smartspends_client::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const ROOT_HELP: &str = "smartspends - personal spending tracker and insight engine

Usage:
  smartspends <command>

Start here:
  smartspends expense add --amount 250 --category food --note Swiggy
  smartspends dash
  smartspends ask \"Where am I overspending?\"

Run `smartspends --help` for every command.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    init_tracing(cli.verbose);
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides `--verbose`, which overrides `warn`.
fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Drops clap's trailing usage lines so the recovery steps are the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}

const GLOBAL_VALUE_FLAGS: [&str; 2] = ["--user", "--as-of"];

/// Maps raw arguments to the closest known command path, e.g. "report export".
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let mut non_flags: Vec<&str> = Vec::new();
    let mut skip_value = false;
    for value in raw_args.iter().skip(1) {
        if skip_value {
            skip_value = false;
        } else if GLOBAL_VALUE_FLAGS.contains(&value.as_str()) {
            skip_value = true;
        } else if !value.starts_with('-') {
            non_flags.push(value);
        }
    }

    let hint = match non_flags.as_slice() {
        ["expense", "add", ..] => "expense add",
        ["expense", "list", ..] => "expense list",
        ["expense", ..] => "expense",
        ["limit", "set", ..] => "limit set",
        ["limit", "show", ..] => "limit show",
        ["limit", ..] => "limit",
        ["report", "export", ..] => "report export",
        ["report", ..] => "report",
        [
            command @ ("import" | "dash" | "trend" | "categories" | "weekdays" | "recurring"
            | "change" | "insights" | "ask"),
            ..,
        ] => *command,
        _ => return None,
    };
    Some(hint.to_string())
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, infer_requested_output_mode, strip_clap_boilerplate};
    use crate::output::OutputMode;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn command_hint_prefers_the_deepest_known_path() {
        let cases: [(&[&str], Option<&str>); 6] = [
            (&["smartspends", "expense", "add", "--amount", "x"], Some("expense add")),
            (&["smartspends", "report", "export", "pie"], Some("report export")),
            (&["smartspends", "limit"], Some("limit")),
            (&["smartspends", "--json", "trend", "--freq", "yearly"], Some("trend")),
            (&["smartspends", "--user", "asha", "ask"], Some("ask")),
            (&["smartspends", "budget"], None),
        ];

        for (raw, expected) in cases {
            assert_eq!(command_path_from_args(&args(raw)).as_deref(), expected);
        }
    }

    #[test]
    fn clap_usage_lines_are_stripped() {
        let message = "error: unexpected argument '--foo' found\n\nUsage: smartspends dash [OPTIONS]\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "unexpected argument '--foo' found"
        );
    }

    #[test]
    fn json_flag_anywhere_selects_json_errors() {
        assert_eq!(
            infer_requested_output_mode(&args(&["smartspends", "dash", "--json", "--bogus"])),
            OutputMode::Json
        );
        assert_eq!(
            infer_requested_output_mode(&args(&["smartspends", "dash", "--bogus"])),
            OutputMode::Text
        );
    }
}
