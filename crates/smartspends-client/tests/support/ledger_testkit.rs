use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use smartspends_client::commands::common::ProfileScope;
use smartspends_client::commands::expense::{self, ExpenseAddOptions};
use smartspends_client::{ClientResult, SuccessEnvelope};
use tempfile::{Builder, TempDir};

pub const AS_OF: &str = "2026-09-10T12:00:00";
pub const TODAY: &str = "2026-09-10";

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("smartspends-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn scope<'a>(home: &'a Path, user: &'a str) -> ProfileScope<'a> {
    ProfileScope {
        user: Some(user),
        as_of: Some(AS_OF),
        home_override: Some(home),
    }
}

pub fn add_expense(home: &Path, user: &str, date: &str, amount: f64, category: &str, note: &str) {
    let result = expense::add_with_options(ExpenseAddOptions {
        scope: scope(home, user),
        amount,
        category: category.to_string(),
        note: Some(note.to_string()),
        date: Some(date.to_string()),
    });
    assert!(result.is_ok());
}

pub fn seed(home: &Path, user: &str, rows: &[(&str, f64, &str, &str)]) {
    for (date, amount, category, note) in rows {
        add_expense(home, user, date, *amount, category, note);
    }
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}
