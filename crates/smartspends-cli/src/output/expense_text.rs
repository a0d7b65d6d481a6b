use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, money, number_field, rows_field, text_field};

pub fn render_expense_add(data: &Value) -> io::Result<String> {
    let expense = data
        .get("expense")
        .ok_or_else(|| io::Error::other("expense add output requires expense"))?;
    let note = text_field(expense, "note");

    let mut lines = vec![format!(
        "Saved {} for {} on {}{}.",
        money(number_field(expense, "amount")),
        text_field(expense, "category"),
        text_field(expense, "date"),
        if note.is_empty() {
            String::new()
        } else {
            format!(" ({note})")
        },
    )];
    lines.push(String::new());
    lines.extend(format::key_value_rows(
        &[
            ("This week:", money(number_field(data, "weekly_total"))),
            ("Weekly limit:", money(number_field(data, "weekly_limit"))),
        ],
        2,
    ));

    if data.get("over_limit").and_then(Value::as_bool) == Some(true) {
        lines.push(String::new());
        lines.push("You are over your weekly limit.".to_string());
    }

    Ok(lines.join("\n"))
}

pub fn render_expense_list(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "expense list")?;
    let heading = if text_field(data, "scope") == "all" {
        "All expenses"
    } else {
        "Expenses in the last 7 days"
    };

    if rows.is_empty() {
        return Ok(format!(
            "{heading}: none yet.\n\nRecord one with `smartspends expense add --amount <n> --category <name>`."
        ));
    }

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Note",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "date").to_string(),
                text_field(row, "category").to_string(),
                money(number_field(row, "amount")),
                text_field(row, "note").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("{heading} ({}):", rows.len()), String::new()];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Expense",
    ));
    lines.push(String::new());
    lines.push(format!("Total: {}", money(number_field(data, "total"))));
    Ok(lines.join("\n"))
}

pub fn render_import(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("import output requires summary"))?;
    let columns = data
        .get("columns")
        .ok_or_else(|| io::Error::other("import output requires columns"))?;
    let count = |key: &str| {
        summary
            .get(key)
            .and_then(Value::as_u64)
            .unwrap_or(0)
            .to_string()
    };

    let mut lines = vec![text_field(data, "message").to_string(), String::new()];
    lines.push("Columns:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Date:", text_field(columns, "date").to_string()),
            ("Amount:", text_field(columns, "amount").to_string()),
            ("Note:", text_field(columns, "note").to_string()),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Rows read:", count("rows_read")),
            ("Debits:", count("debits")),
            ("Non-debit rows:", count("non_debit_rows")),
            ("Invalid dates:", count("invalid_date_rows")),
            ("Invalid amounts:", count("invalid_amount_rows")),
            ("Imported:", count("imported")),
            ("Expenses stored:", count("collection_size")),
        ],
        2,
    ));

    if data.get("dry_run").and_then(Value::as_bool) == Some(true) {
        lines.push(String::new());
        lines.push("Dry run: rerun without --dry-run to save these debits.".to_string());
    } else {
        lines.push(String::new());
        lines.push(format!(
            "Imported rows use the category `{}`.",
            text_field(data, "category")
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_limit(command: &str, data: &Value) -> io::Result<String> {
    let limit = data
        .get("weekly_limit")
        .and_then(Value::as_f64)
        .ok_or_else(|| io::Error::other(format!("{command} output requires weekly_limit")))?;

    if data.get("updated").and_then(Value::as_bool) == Some(true) {
        return Ok(format!("Weekly limit set to {}.", money(limit)));
    }
    Ok(format!("Weekly limit: {}", money(limit)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_expense_add, render_expense_list, render_import, render_limit};

    #[test]
    fn expense_add_flags_limit_breach() {
        let data = json!({
            "user": "guest",
            "expense": {"date": "2026-09-10", "amount": 1200.0, "category": "travel", "note": "Flight"},
            "weekly_total": 1200.0,
            "weekly_limit": 1000.0,
            "over_limit": true
        });

        let rendered = render_expense_add(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Saved ₹1200.00 for travel on 2026-09-10 (Flight)."));
            assert!(text.contains("You are over your weekly limit."));
        }
    }

    #[test]
    fn empty_expense_list_suggests_adding_one() {
        let data = json!({"scope": "last_7_days", "rows": [], "total": 0.0});

        let rendered = render_expense_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Expenses in the last 7 days: none yet."));
        }
    }

    #[test]
    fn expense_list_shows_rows_and_total() {
        let data = json!({
            "scope": "all",
            "rows": [
                {"date": "2026-09-01", "amount": 200.0, "category": "food", "note": ""},
                {"date": "2026-09-02", "amount": 150.0, "category": "food", "note": "Lunch"}
            ],
            "total": 350.0
        });

        let rendered = render_expense_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("All expenses (2):"));
            assert!(text.contains("Lunch"));
            assert!(text.ends_with("Total: ₹350.00"));
        }
    }

    #[test]
    fn dry_run_import_explains_how_to_commit() {
        let data = json!({
            "dry_run": true,
            "category": "Bank Debit",
            "message": "Found 2 debits. No rows were written.",
            "columns": {"date": "Date", "amount": "Debit", "note": "Narration"},
            "summary": {
                "rows_read": 3, "debits": 2, "non_debit_rows": 1,
                "invalid_date_rows": 0, "invalid_amount_rows": 0,
                "imported": 0, "collection_size": 0
            }
        });

        let rendered = render_import(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Found 2 debits. No rows were written."));
            assert!(text.contains("Narration"));
            assert!(text.contains("Dry run:"));
        }
    }

    #[test]
    fn limit_text_distinguishes_show_and_set() {
        let shown = render_limit("limit show", &json!({"weekly_limit": 1000.0, "updated": false}));
        assert!(matches!(shown.as_deref(), Ok("Weekly limit: ₹1000.00")));

        let set = render_limit("limit set", &json!({"weekly_limit": 750.0, "updated": true}));
        assert!(matches!(set.as_deref(), Ok("Weekly limit set to ₹750.00.")));

        assert!(render_limit("limit show", &json!({})).is_err());
    }
}
