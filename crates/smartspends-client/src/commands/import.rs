use crate::ClientResult;
use crate::commands::common::{ProfileScope, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::import::{ImportRequest, execute};

pub use crate::import::ColumnOverrides;

#[derive(Debug, Clone, Default)]
pub struct ImportRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    /// Statement path, or `-` for stdin.
    pub path: String,
    pub dry_run: bool,
    pub columns: ColumnOverrides,
    pub stdin_override: Option<String>,
}

pub fn run(path: &str, dry_run: bool) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportRunOptions {
        path: path.to_string(),
        dry_run,
        ..ImportRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut context = open_context(options.scope)?;
    let data = execute(
        &mut context.store,
        ImportRequest {
            user_id: &context.user,
            path: &options.path,
            overrides: &options.columns,
            dry_run: options.dry_run,
            stdin_override: options.stdin_override,
        },
    )?;
    success("import", data)
}
