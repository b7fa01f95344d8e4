//! Assertion helpers for scenario steps.

use anyhow::Result;

use crate::demo::describe_submission;
use crate::page::Page;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_field(page: &Page, field: &str, expected: &str) -> Result<AssertionResult> {
    let value = page.field_value(field)?;
    Ok(if value == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "value_mismatch",
            format!("{field}: expected value '{expected}', got '{value}'"),
        )
    })
}

pub fn evaluate_assert_label(page: &Page, field: &str, expected: &str) -> Result<AssertionResult> {
    let label = page.trigger_label(field)?;
    Ok(if label == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "label_mismatch",
            format!("{field}: expected label '{expected}', got '{label}'"),
        )
    })
}

pub fn evaluate_assert_open(page: &Page, field: &str, expected: bool) -> Result<AssertionResult> {
    let open = page.is_open(field)?;
    let state = |open: bool| if open { "open" } else { "closed" };
    Ok(if open == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "state_mismatch",
            format!("{field}: expected dropdown {}, got {}", state(expected), state(open)),
        )
    })
}

pub fn evaluate_assert_submitted(page: &Page, expected: &str) -> AssertionResult {
    let submissions = page.submissions();
    let Some(last) = submissions.last() else {
        return AssertionResult::failed("no_submission", "nothing has been submitted".to_string());
    };
    let message = describe_submission(&last.record);
    if message.contains(expected) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "submission_mismatch",
            format!("{}: expected substring '{expected}', got '{message}'", last.form),
        )
    }
}
