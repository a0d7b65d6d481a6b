use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::state::ensure_directory;
use crate::{ClientError, ClientResult};

/// Chart names written by `report export`.
pub const SPENDING_TREND_CHART: &str = "spending_trend";
pub const CATEGORY_COMPARISON_CHART: &str = "category_comparison";
pub const WEEKDAY_SPENDING_CHART: &str = "weekday_spending";

/// A rendered chart. The exporter only needs to know the file suffix and how
/// to stream the bytes out.
pub trait ChartArtifact {
    fn file_extension(&self) -> &str;

    fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// A labelled series written out as a two-column CSV.
#[derive(Debug, Clone)]
pub struct TabularChart {
    label_header: String,
    value_header: String,
    rows: Vec<(String, f64)>,
}

impl TabularChart {
    pub fn new(label_header: &str, value_header: &str, rows: Vec<(String, f64)>) -> Self {
        Self {
            label_header: label_header.to_string(),
            value_header: value_header.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ChartArtifact for TabularChart {
    fn file_extension(&self) -> &str {
        "csv"
    }

    fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([self.label_header.as_str(), self.value_header.as_str()])?;
        for (label, value) in &self.rows {
            csv_writer.write_record([label.clone(), format!("{value:.2}")])?;
        }
        csv_writer.flush()
    }
}

/// `<user>_<chart_name>.<ext>`, or just `<chart_name>.<ext>` without a user.
pub fn chart_file_name(chart_name: &str, user_id: &str, extension: &str) -> String {
    if user_id.is_empty() {
        format!("{chart_name}.{extension}")
    } else {
        format!("{user_id}_{chart_name}.{extension}")
    }
}

pub fn export_chart(
    reports_dir: &Path,
    chart_name: &str,
    user_id: &str,
    artifact: &dyn ChartArtifact,
) -> ClientResult<PathBuf> {
    ensure_directory(reports_dir)?;
    let path = reports_dir.join(chart_file_name(chart_name, user_id, artifact.file_extension()));

    let file = File::create(&path)
        .map_err(|error| ClientError::report_export_failed(&path, &error.to_string()))?;
    let mut writer = BufWriter::new(file);
    artifact
        .write_to(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|error| ClientError::report_export_failed(&path, &error.to_string()))?;

    tracing::info!(path = %path.display(), chart = chart_name, "exported chart");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{TabularChart, chart_file_name, export_chart};

    #[test]
    fn file_name_is_prefixed_by_user() {
        assert_eq!(chart_file_name("spending_trend", "asha", "png"), "asha_spending_trend.png");
        assert_eq!(chart_file_name("spending_trend", "", "png"), "spending_trend.png");
    }

    #[test]
    fn tabular_chart_is_written_as_csv() {
        let temp_dir = tempfile::tempdir();
        assert!(temp_dir.is_ok());
        let Ok(temp_dir) = temp_dir else {
            return;
        };

        let chart = TabularChart::new(
            "category",
            "total",
            vec![("fuel".to_string(), 200.0), ("food".to_string(), 150.0)],
        );
        let reports = temp_dir.path().join("reports");
        let exported = export_chart(&reports, "category_comparison", "asha", &chart);
        assert!(exported.is_ok());
        if let Ok(path) = exported {
            assert!(path.ends_with("asha_category_comparison.csv"));
            let body = std::fs::read_to_string(&path);
            assert!(body.is_ok());
            if let Ok(body) = body {
                assert_eq!(body, "category,total\nfuel,200.00\nfood,150.00\n");
            }
        }
    }
}
