use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, money, number_field, rows_field, text_field};

const NO_EXPENSES_HINT: &str =
    "Record an expense with `smartspends expense add` or import a statement with `smartspends import`.";

pub fn render_dash(data: &Value) -> io::Result<String> {
    let spent = number_field(data, "weekly_spent");
    let limit = number_field(data, "weekly_limit");

    let mut lines = vec![
        format!("Dashboard for {} as of {}", text_field(data, "user"), text_field(data, "as_of")),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Spent this week:", money(spent)),
            ("Weekly limit:", money(limit)),
            ("Remaining:", money(number_field(data, "remaining"))),
            ("Progress:", progress_bar(spent, limit)),
            (
                "Expenses stored:",
                data.get("transaction_count")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
            ),
        ],
        2,
    ));

    if data.get("over_limit").and_then(Value::as_bool) == Some(true) {
        lines.push(String::new());
        lines.push("You are over your weekly limit.".to_string());
    }

    lines.push(String::new());
    lines.push("Insights:".to_string());
    lines.extend(insight_lines(data));
    Ok(lines.join("\n"))
}

pub fn render_trend(data: &Value) -> io::Result<String> {
    let points = rows_field(data, "points", "trend")?;
    let mut lines = vec![format!(
        "{} spending over the last {} month(s):",
        capitalize(text_field(data, "frequency")),
        data.get("lookback_months").and_then(Value::as_u64).unwrap_or(0)
    )];

    if points.is_empty() {
        lines.push(String::new());
        lines.push(format!("No spending recorded in this period. {NO_EXPENSES_HINT}"));
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Bucket",
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];
    let table_rows = points
        .iter()
        .map(|point| {
            vec![
                text_field(point, "bucket").to_string(),
                money(number_field(point, "total")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Bucket",
    ));
    lines.push(String::new());
    lines.push(format!("Total: {}", money(number_field(data, "total"))));
    Ok(lines.join("\n"))
}

pub fn render_categories(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "categories")?;
    let heading = format!("Spending by category, last {} days:", window_days(data));
    if rows.is_empty() {
        return Ok(format!("{heading}\n\nNo category data found. {NO_EXPENSES_HINT}"));
    }

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "category").to_string(),
                money(number_field(row, "total")),
                format!("{:.1}%", number_field(row, "share_percent")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![heading, String::new()];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Category",
    ));
    lines.push(String::new());
    lines.push(format!("Total: {}", money(number_field(data, "total"))));
    Ok(lines.join("\n"))
}

pub fn render_weekdays(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "weekdays")?;
    let columns = [
        Column {
            name: "Weekday",
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "weekday").to_string(),
                money(number_field(row, "total")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Spending by weekday, last {} days:", window_days(data)),
        String::new(),
    ];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Weekday",
    ));
    Ok(lines.join("\n"))
}

pub fn render_recurring(data: &Value) -> io::Result<String> {
    let rows = rows_field(data, "rows", "recurring")?;
    if rows.is_empty() {
        return Ok(format!(
            "No recurring payments found in the last {} days.\n\nPayments count as recurring once the same note appears at least {} times.",
            window_days(data),
            data.get("min_occurrences").and_then(Value::as_u64).unwrap_or(0)
        ));
    }

    let columns = [
        Column {
            name: "Note",
            align: Align::Left,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Average",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "note").to_string(),
                row.get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
                money(number_field(row, "avg")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!(
            "Found {} recurring payment(s) in the last {} days:",
            rows.len(),
            window_days(data)
        ),
        String::new(),
    ];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Payment",
    ));
    Ok(lines.join("\n"))
}

pub fn render_change(data: &Value) -> io::Result<String> {
    let period = data.get("period_days").and_then(Value::as_i64).unwrap_or(0);
    let mut lines = format::key_value_rows(
        &[
            (
                "Last period:",
                format!("{} (last {period} days)", money(number_field(data, "recent"))),
            ),
            (
                "Period before:",
                format!("{} ({period} days before that)", money(number_field(data, "previous"))),
            ),
        ],
        0,
    );
    lines.push(String::new());

    let percent = data.get("percent_change").and_then(Value::as_f64);
    let summary = match (text_field(data, "trend"), percent) {
        ("increase", Some(value)) => format!("Spending rose by {value:.0}%."),
        ("decrease", Some(value)) => format!("Spending fell by {:.0}%.", value.abs()),
        ("stable", Some(value)) => format!("Spending is stable ({value:+.0}%)."),
        _ => "No spending in the earlier period to compare against.".to_string(),
    };
    lines.push(summary);
    Ok(lines.join("\n"))
}

pub fn render_insights(data: &Value) -> io::Result<String> {
    if data.get("insights").and_then(Value::as_array).is_none() {
        return Err(io::Error::other("insights output requires insights"));
    }
    Ok(insight_lines(data).join("\n"))
}

pub fn render_ask(data: &Value) -> io::Result<String> {
    data.get("answer")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| io::Error::other("ask output requires answer"))
}

pub fn render_report_export(data: &Value) -> io::Result<String> {
    let path = text_field(data, "path");
    if path.is_empty() {
        return Err(io::Error::other("report export output requires path"));
    }

    let mut lines = vec![format!("Exported {} chart data.", text_field(data, "chart")), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("File:", path.to_string()),
            (
                "Rows:",
                data.get("rows").and_then(Value::as_u64).unwrap_or(0).to_string(),
            ),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

fn insight_lines(data: &Value) -> Vec<String> {
    data.get("insights")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|line| format!("  - {line}"))
                .collect()
        })
        .unwrap_or_default()
}

fn progress_bar(spent: f64, limit: f64) -> String {
    const SLOTS: usize = 20;
    if limit <= 0.0 {
        return "no limit set".to_string();
    }
    let ratio = spent / limit;
    let filled = ((ratio.min(1.0) * SLOTS as f64).round() as usize).min(SLOTS);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(SLOTS - filled),
        ratio * 100.0
    )
}

fn window_days(data: &Value) -> i64 {
    data.get("window_days").and_then(Value::as_i64).unwrap_or(0)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        progress_bar, render_ask, render_categories, render_change, render_dash, render_recurring,
        render_report_export, render_trend,
    };

    #[test]
    fn dash_shows_progress_and_insights() {
        let data = json!({
            "user": "asha",
            "as_of": "2026-09-10T12:00:00",
            "weekly_spent": 500.0,
            "weekly_limit": 1000.0,
            "remaining": 500.0,
            "over_limit": false,
            "transaction_count": 4,
            "policy_version": "v1",
            "insights": ["Top category: food (₹350.00)."]
        });

        let rendered = render_dash(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Dashboard for asha as of 2026-09-10T12:00:00"));
            assert!(text.contains("[##########----------] 50%"));
            assert!(text.contains("  - Top category: food (₹350.00)."));
            assert!(!text.contains("over your weekly limit"));
        }
    }

    #[test]
    fn progress_bar_caps_at_full_width() {
        assert_eq!(progress_bar(1500.0, 1000.0), "[####################] 150%");
        assert_eq!(progress_bar(10.0, 0.0), "no limit set");
    }

    #[test]
    fn trend_lists_buckets_with_total() {
        let data = json!({
            "frequency": "weekly",
            "lookback_months": 3,
            "points": [
                {"bucket": "2026-08-30", "total": 120.0},
                {"bucket": "2026-09-06", "total": 80.5}
            ],
            "total": 200.5
        });

        let rendered = render_trend(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Weekly spending over the last 3 month(s):"));
            assert!(text.contains("2026-09-06"));
            assert!(text.ends_with("Total: ₹200.50"));
        }
    }

    #[test]
    fn empty_categories_explain_next_step() {
        let data = json!({"window_days": 30, "rows": [], "total": 0.0});

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No category data found."));
            assert!(text.contains("smartspends expense add"));
        }
    }

    #[test]
    fn categories_show_share_percentages() {
        let data = json!({
            "window_days": 30,
            "rows": [
                {"category": "food", "total": 350.0, "share_percent": 70.0},
                {"category": "travel", "total": 150.0, "share_percent": 30.0}
            ],
            "total": 500.0
        });

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("70.0%"));
            assert!(text.contains("₹150.00"));
        }
    }

    #[test]
    fn recurring_without_rows_mentions_threshold() {
        let data = json!({"window_days": 90, "min_occurrences": 3, "rows": []});

        let rendered = render_recurring(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No recurring payments found in the last 90 days."));
            assert!(text.contains("at least 3 times"));
        }
    }

    #[test]
    fn change_sentences_follow_trend() {
        let increase = render_change(&json!({
            "period_days": 30, "recent": 300.0, "previous": 200.0,
            "percent_change": 50.0, "trend": "increase"
        }));
        assert!(matches!(increase, Ok(ref text) if text.ends_with("Spending rose by 50%.")));

        let decrease = render_change(&json!({
            "period_days": 30, "recent": 100.0, "previous": 200.0,
            "percent_change": -50.0, "trend": "decrease"
        }));
        assert!(matches!(decrease, Ok(ref text) if text.ends_with("Spending fell by 50%.")));

        let no_baseline = render_change(&json!({
            "period_days": 30, "recent": 100.0, "previous": 0.0,
            "percent_change": null, "trend": "no_baseline"
        }));
        assert!(matches!(no_baseline, Ok(ref text) if text.ends_with("compare against.")));
    }

    #[test]
    fn ask_prints_answer_verbatim() {
        let rendered = render_ask(&json!({"answer": "You've spent ₹12.00 this month so far."}));
        assert!(matches!(
            rendered.as_deref(),
            Ok("You've spent ₹12.00 this month so far.")
        ));
        assert!(render_ask(&json!({})).is_err());
    }

    #[test]
    fn report_export_shows_path_and_rows() {
        let rendered = render_report_export(&json!({
            "chart": "category_comparison",
            "path": "/tmp/reports/category_comparison_guest.csv",
            "rows": 2
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Exported category_comparison chart data."));
            assert!(text.contains("/tmp/reports/category_comparison_guest.csv"));
        }
    }
}
