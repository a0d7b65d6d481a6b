use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

/// `-` reads the statement from stdin; anything else is a file path.
pub(crate) fn resolve_source(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    if path == "-" {
        let Some(stdin_value) = read_stdin(stdin_override)? else {
            return Err(ClientError::invalid_argument_with_recovery(
                "Path `-` means stdin input, but stdin was empty.",
                vec![
                    "Pipe a bank statement CSV into `smartspends import -`.".to_string(),
                    "Or pass the statement file path instead.".to_string(),
                ],
            ));
        };
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            source_ref: None,
            content: stdin_value,
        });
    }

    let file_body = fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read statement file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun `smartspends import <path>`.".to_string(),
            ],
        )
    })?;

    Ok(ResolvedSource {
        source_kind: SourceKind::File,
        source_ref: Some(path.to_string()),
        content: file_body,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value).filter(|body| !body.trim().is_empty()));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec!["Retry with an explicit file path argument.".to_string()],
            )
        })?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}
