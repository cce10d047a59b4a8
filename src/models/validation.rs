// Field checks shared by the request payloads. Lengths count chars, not bytes.
use crate::errors::{AppError, AppResult};

pub(crate) fn check_length(
    problems: &mut Vec<String>,
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.chars().count();
    match max {
        Some(max) if len < min || len > max => {
            problems.push(format!("{}: must be between {} and {} characters", field, min, max));
        }
        None if len < min => {
            problems.push(format!("{}: must be at least {} characters", field, min));
        }
        _ => {}
    }
}

pub(crate) fn check_email(problems: &mut Vec<String>, field: &str, value: &str) {
    if !is_email(value) {
        problems.push(format!("{}: value is not a valid email address", field));
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

pub(crate) fn finish(problems: Vec<String>) -> AppResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}
