//! Report output model for scenario runs.

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Component, Path};

use crate::page::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Option<String>,
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub steps_run: usize,
    pub submissions: Vec<Submission>,
}

impl ScenarioReport {
    pub fn passed(scenario: Option<String>, steps_run: usize, submissions: Vec<Submission>) -> Self {
        Self {
            scenario,
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            steps_run,
            submissions,
        }
    }

    pub fn failed(
        scenario: Option<String>,
        assertion: &str,
        failed_step_index: usize,
        message: String,
        submissions: Vec<Submission>,
    ) -> Self {
        Self {
            scenario,
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            steps_run: failed_step_index + 1,
            submissions,
        }
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_report_serializes_details() {
        let report = ScenarioReport::failed(
            Some("brand".into()),
            "assert_label",
            3,
            "brand: expected label 'WPGU', got 'Select...'".into(),
            Vec::new(),
        );

        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["failed_step_index"], 3);
        assert_eq!(json["steps_run"], 4);
        assert_eq!(json["assertion"], "assert_label");
    }

    #[test]
    fn test_rejects_escaping_report_paths() {
        let report = ScenarioReport::passed(None, 0, Vec::new());
        assert!(report.write_to_path(Path::new("/tmp/report.json")).is_err());
        assert!(report.write_to_path(Path::new("../report.json")).is_err());
    }
}
