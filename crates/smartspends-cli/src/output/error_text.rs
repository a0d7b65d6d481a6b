use smartspends_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    if let Some(headers) = error
        .data
        .as_ref()
        .and_then(|data| data.get("headers"))
        .and_then(|headers| headers.as_array())
    {
        let names = headers
            .iter()
            .filter_map(|header| header.as_str())
            .collect::<Vec<&str>>();
        lines.push(format!("  Headers:  {}", names.join(", ")));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use smartspends_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run smartspends --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run smartspends --help"));
        assert!(!rendered.contains("Headers:"));
    }

    #[test]
    fn missing_column_errors_list_the_headers_seen() {
        let error = ClientError::import_column_missing(
            "date",
            vec!["Txn".to_string(), "Debit".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.contains("  Error:    import_column_missing"));
        assert!(rendered.contains("  Headers:  Txn, Debit"));
    }

    #[test]
    fn empty_recovery_falls_back_to_retry() {
        let error = ClientError::new("internal_serialization", "boom", Vec::new());
        assert!(render_error(&error).contains("  1. Retry the command."));
    }
}
