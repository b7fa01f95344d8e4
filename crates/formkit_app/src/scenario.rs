//! Scenario definition for headless form runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::page::DispatchOrder;

/// Sequence of steps played against the demo page.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Order in which each click reaches widgets and the document.
    #[serde(default)]
    pub dispatch: DispatchOrder,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Type characters one keystroke at a time.
    Type { field: String, text: String },
    /// Replace the whole value in one input event.
    Input { field: String, value: String },
    Backspace {
        field: String,
        #[serde(default = "one")]
        count: usize,
    },
    ClickTrigger { field: String },
    ClickOption { field: String, option: String },
    ClickOutside,
    /// Click at a raw page coordinate.
    Click { x: f32, y: f32 },
    Submit { form: String },
    AssertField { field: String, value: String },
    AssertLabel { field: String, label: String },
    AssertOpen { field: String, open: bool },
    /// Check the most recent submission's rendered message.
    AssertSubmitted { contains: String },
}

fn one() -> usize {
    1
}

impl ScenarioStep {
    /// Assertion name used in reports; `None` for actions.
    pub fn assertion(&self) -> Option<&'static str> {
        match self {
            ScenarioStep::AssertField { .. } => Some("assert_field"),
            ScenarioStep::AssertLabel { .. } => Some("assert_label"),
            ScenarioStep::AssertOpen { .. } => Some("assert_open"),
            ScenarioStep::AssertSubmitted { .. } => Some("assert_submitted"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tagged_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "pick a brand",
                "steps": [
                    { "type": "type", "field": "phone", "text": "2175551234" },
                    { "type": "backspace", "field": "phone" },
                    { "type": "click_trigger", "field": "brand" },
                    { "type": "click_option", "field": "brand", "option": "WPGU" },
                    { "type": "click_outside" },
                    { "type": "click", "x": 4.0, "y": 8.5 },
                    { "type": "assert_open", "field": "brand", "open": false }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.name.as_deref(), Some("pick a brand"));
        assert_eq!(scenario.dispatch, DispatchOrder::TargetFirst);
        assert_eq!(
            scenario.steps[1],
            ScenarioStep::Backspace {
                field: "phone".into(),
                count: 1
            }
        );
        assert_eq!(scenario.steps[4], ScenarioStep::ClickOutside);
        assert_eq!(scenario.steps[6].assertion(), Some("assert_open"));
        assert_eq!(scenario.steps[0].assertion(), None);
    }

    #[test]
    fn test_dispatch_order_is_configurable() {
        let scenario = Scenario::from_json(r#"{ "dispatch": "document_first", "steps": [] }"#).unwrap();
        assert_eq!(scenario.dispatch, DispatchOrder::DocumentFirst);
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(Scenario::from_json(r#"{ "steps": [{ "type": "hover" }] }"#).is_err());
    }
}
