use std::cmp;
use std::io;

use serde_json::Value;
use smartspends_client::analytics::types::format_money;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn money(value: f64) -> String {
    format_money(value)
}

pub fn number_field(data: &Value, key: &str) -> f64 {
    data.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn text_field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn rows_field<'a>(data: &'a Value, key: &str, command: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("{command} output requires {key}")))
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, wrapping long cells. Falls back to one block
/// per row when the columns cannot fit `max_width`.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * columns.len().saturating_sub(1));
    let Some(widths) = fit_widths(columns, rows, budget) else {
        return render_blocks(columns, rows, block_label);
    };

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];

    for row in rows {
        let wrapped = widths
            .iter()
            .enumerate()
            .map(|(index, width)| wrap_cell(row.get(index).map_or("", String::as_str), *width))
            .collect::<Vec<Vec<String>>>();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line in 0..height {
            let cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_row(columns, &cells, &widths));
        }
    }

    output
}

fn fit_widths(columns: &[Column<'_>], rows: &[Vec<String>], budget: usize) -> Option<Vec<usize>> {
    let floors = columns
        .iter()
        .map(|column| cmp::max(display_width(column.name), MIN_COLUMN_WIDTH))
        .collect::<Vec<usize>>();
    if floors.iter().sum::<usize>() > budget {
        return None;
    }

    let mut widths = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| display_width(value))
                .fold(display_width(column.name), cmp::max)
        })
        .collect::<Vec<usize>>();

    let mut total = widths.iter().sum::<usize>();
    while total > budget {
        // Shrink the widest column that is still above its floor.
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > floors[*index])
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)?;
        widths[candidate] -= 1;
        total -= 1;
    }

    Some(widths)
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map_or("", String::as_str);
            let pad = " ".repeat(width.saturating_sub(display_width(value)));
            match column.align {
                Align::Left => format!("{value}{pad}"),
                Align::Right => format!("{pad}{value}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(value) <= width {
        return vec![value.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        let needed = if current.is_empty() {
            display_width(word)
        } else {
            display_width(&current) + 1 + display_width(word)
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let mut chunks = split_chars(word, width);
        if let Some(last) = chunks.pop() {
            lines.extend(chunks);
            current = last;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_chars(token: &str, width: usize) -> Vec<String> {
    token
        .chars()
        .collect::<Vec<char>>()
        .chunks(cmp::max(width, 1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_width(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map_or("", String::as_str);
            output.push(format!("    {label:<label_width$}  {value}"));
        }
    }
    output
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        Align, Column, key_value_rows, money, render_table_or_blocks, rows_field, split_chars,
        wrap_cell,
    };

    fn columns() -> [Column<'static>; 2] {
        [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Total",
                align: Align::Right,
            },
        ]
    }

    #[test]
    fn money_uses_rupee_symbol_and_two_decimals() {
        assert_eq!(money(350.0), "₹350.00");
        assert_eq!(money(12.5), "₹12.50");
        assert!(money(1.0).starts_with(smartspends_client::analytics::types::CURRENCY_SYMBOL));
    }

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Spent:", "₹10.00".to_string()),
                ("Remaining:", "₹990.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Spent:      ₹10.00");
        assert_eq!(rows[1], "  Remaining:  ₹990.00");
    }

    #[test]
    fn table_aligns_amounts_to_the_right() {
        let rows = vec![
            vec!["food".to_string(), "₹350.00".to_string()],
            vec!["entertainment".to_string(), "₹9.00".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns(), &rows, 80, "Row");
        assert_eq!(rendered[0], "  Category         Total");
        assert_eq!(rendered[1], "  food           ₹350.00");
        assert_eq!(rendered[2], "  entertainment    ₹9.00");
    }

    #[test]
    fn long_cells_wrap_instead_of_truncating() {
        let rows = vec![vec![
            "monthly streaming subscription bundle".to_string(),
            "₹649.00".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns(), &rows, 30, "Row");
        assert!(rendered.len() > 2);
        assert!(rendered.iter().any(|line| line.contains("monthly")));
        assert!(rendered.iter().any(|line| line.contains("bundle")));
        assert!(rendered.iter().any(|line| line.contains("₹649.00")));
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let rows = vec![vec!["food".to_string(), "₹350.00".to_string()]];

        let rendered = render_table_or_blocks(&columns(), &rows, 12, "Category");
        assert_eq!(rendered[0], "  Category 1:");
        assert!(rendered[1].contains("Category:"));
        assert!(rendered[2].contains("Total:"));
    }

    #[test]
    fn wrapping_splits_long_tokens_by_character() {
        assert_eq!(
            wrap_cell("abcdefgh", 3),
            vec!["abc".to_string(), "def".to_string(), "gh".to_string()]
        );
        assert_eq!(split_chars("₹₹₹₹", 3), vec!["₹₹₹".to_string(), "₹".to_string()]);
    }

    #[test]
    fn missing_rows_field_is_an_error() {
        let data = json!({"total": 1.0});
        assert!(rows_field(&data, "rows", "categories").is_err());
    }
}
