//! Line codec for the task file.
//!
//! One task per line, five `|`-separated fields:
//!
//! ```text
//! id|title|description|isCompleted|createdAt
//! 1|Buy milk||false|2024-05-01T10:20:30.123456789Z
//! ```
//!
//! Backslash, `|`, and line breaks inside text fields are escaped as `\\`,
//! `\|`, `\n` and `\r`. A file written without any of those characters is
//! byte-for-byte the plain pipe format.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Result, TaskerError};
use crate::task::{Task, TaskId};

/// Field separator.
pub const DELIMITER: char = '|';

const ESCAPE: char = '\\';
const FIELD_COUNT: usize = 5;

/// Encode a single task as one line, without the trailing newline.
#[must_use]
pub fn encode_task(task: &Task) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}",
        task.id,
        escape_field(&task.title),
        escape_field(&task.description),
        task.is_completed,
        task.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        d = DELIMITER,
    )
}

/// Render a whole collection, one line per task, each terminated by `\n`.
#[must_use]
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&encode_task(task));
        out.push('\n');
    }
    out
}

/// Decode one line. `line_no` is 1-based and only used for error messages.
pub fn decode_line(line: &str, line_no: usize) -> Result<Task> {
    let fields = split_fields(line);
    let found = fields.len();
    let [id, title, description, is_completed, created_at]: [String; FIELD_COUNT] =
        fields.try_into().map_err(|_| {
            TaskerError::corrupt(line_no, format!("expected {FIELD_COUNT} fields, found {found}"))
        })?;

    let id = id
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(TaskId::new)
        .ok_or_else(|| TaskerError::corrupt(line_no, format!("invalid id '{id}'")))?;

    let is_completed = parse_bool(&is_completed).ok_or_else(|| {
        TaskerError::corrupt(line_no, format!("invalid boolean '{is_completed}'"))
    })?;

    let created_at = DateTime::parse_from_rfc3339(created_at.trim())
        .map_err(|e| {
            TaskerError::corrupt(line_no, format!("invalid timestamp '{created_at}': {e}"))
        })?
        .with_timezone(&Utc);

    Ok(Task {
        id,
        title,
        description,
        is_completed,
        created_at,
    })
}

/// Parse the contents of a task file.
///
/// Blank lines are skipped. Any malformed line or a repeated id fails the
/// whole parse; there is no partial result.
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut seen = HashSet::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let task = decode_line(line, idx + 1)?;
        if !seen.insert(task.id) {
            return Err(TaskerError::corrupt(
                idx + 1,
                format!("duplicate id {}", task.id),
            ));
        }
        tasks.push(task);
    }

    Ok(tasks)
}

fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ESCAPE => out.push_str("\\\\"),
            DELIMITER => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Split on unescaped delimiters and unescape each field.
///
/// An unknown escape sequence keeps the character after the backslash; a
/// trailing lone backslash is kept as-is.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(other) => current.push(other),
                None => current.push(ESCAPE),
            },
            DELIMITER => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
