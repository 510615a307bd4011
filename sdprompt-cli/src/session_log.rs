use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::assembler::PromptPair;
use crate::error::AppError;

pub const SEPARATOR_WIDTH: usize = 60;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Formats one log record for `pair` stamped with `at`.
pub fn format_record(pair: &PromptPair, at: &DateTime<Local>) -> String {
    format!(
        "\n[{stamp}]\nPositive Prompt:\n{positive}\nNegative Prompt:\n{negative}\n{rule}\n",
        stamp = at.format(TIMESTAMP_FORMAT),
        positive = pair.positive,
        negative = pair.negative,
        rule = "-".repeat(SEPARATOR_WIDTH),
    )
}

/// Appends a record for `pair` to the log at `path`, creating the file if needed.
pub fn append_record(path: &Path, pair: &PromptPair) -> Result<(), AppError> {
    let record = format_record(pair, &Local::now());
    let log_error = |source| AppError::Log {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_error)?;
    file.write_all(record.as_bytes()).map_err(log_error)?;
    tracing::debug!(log = %path.display(), "appended prompt record");
    Ok(())
}
