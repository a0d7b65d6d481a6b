use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const IMPORT_HELP_COMMAND: &str = "smartspends import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `smartspends {cmd} --help` for usage."),
            None => "Run `smartspends --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn import_invalid_format(message: &str) -> Self {
        Self::new(
            "import_invalid_format",
            message,
            vec![
                "Provide a bank statement exported as CSV with a header row.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to review column detection rules."),
            ],
        )
        .with_data(json!({
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn import_column_missing(role: &str, headers: Vec<String>) -> Self {
        Self::new(
            "import_column_missing",
            &format!("Could not find a {role} column in the statement headers."),
            vec![
                format!("Pass `--{role}-column <header>` to pick the column explicitly."),
                "Rerun `smartspends import --dry-run <path>` to confirm the mapping.".to_string(),
            ],
        )
        .with_data(json!({
            "role": role,
            "headers": headers,
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn report_export_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "report_export_failed",
            &format!("Could not write report to `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `SMARTSPENDS_HOME` to a writable directory."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot initialize expense store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `SMARTSPENDS_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Expense store is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Expense store appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Expense store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Expense store initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || self.code.starts_with("store_")
            || self.code == "migration_failed"
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
