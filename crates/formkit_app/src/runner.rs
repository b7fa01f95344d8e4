//! Scenario runner that plays steps against a page of forms.

use anyhow::{Context, Result};
use formkit_core::Point;
use formkit_widgets::FormsConfig;

use crate::assert::{
    evaluate_assert_field, evaluate_assert_label, evaluate_assert_open, evaluate_assert_submitted,
    AssertionResult,
};
use crate::demo::demo_page;
use crate::page::Page;
use crate::report::ScenarioReport;
use crate::scenario::{Scenario, ScenarioStep};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: ScenarioReport },
    Failed { report: ScenarioReport },
}

impl RunOutcome {
    pub fn report(&self) -> &ScenarioReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON against the demo page.
pub fn run_scenario(input: &str, config: FormsConfig) -> Result<RunOutcome> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, config)
}

/// Execute a pre-loaded scenario against the demo page.
pub fn run_loaded_scenario(scenario: &Scenario, config: FormsConfig) -> Result<RunOutcome> {
    let mut page = demo_page(config);
    run_on_page(scenario, &mut page)
}

/// Execute a pre-loaded scenario against any page.
///
/// Steps that name missing fields or forms are errors; assertions that do
/// not hold end the run with a failed report.
pub fn run_on_page(scenario: &Scenario, page: &mut Page) -> Result<RunOutcome> {
    page.set_dispatch_order(scenario.dispatch);
    let name = scenario.name.clone();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, ?step, "scenario step");
        let result = run_step(page, step).with_context(|| format!("step {step_index} ({step:?}) failed"))?;

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!(step_index, code = %code, "{message}");
            let assertion = step.assertion().unwrap_or("step");
            let report = ScenarioReport::failed(name, assertion, step_index, message, page.submissions());
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: ScenarioReport::passed(name, scenario.steps.len(), page.submissions()),
    })
}

fn run_step(page: &mut Page, step: &ScenarioStep) -> Result<AssertionResult> {
    match step {
        ScenarioStep::Type { field, text } => page.type_text(field, text)?,
        ScenarioStep::Input { field, value } => page.input(field, value)?,
        ScenarioStep::Backspace { field, count } => page.backspace(field, *count)?,
        ScenarioStep::ClickTrigger { field } => page.click_trigger(field)?,
        ScenarioStep::ClickOption { field, option } => page.click_option(field, option)?,
        ScenarioStep::ClickOutside => page.click_outside(),
        ScenarioStep::Click { x, y } => {
            page.click(Point::new(*x, *y));
        }
        ScenarioStep::Submit { form } => page.submit(form)?,
        ScenarioStep::AssertField { field, value } => return evaluate_assert_field(page, field, value),
        ScenarioStep::AssertLabel { field, label } => return evaluate_assert_label(page, field, label),
        ScenarioStep::AssertOpen { field, open } => return evaluate_assert_open(page, field, *open),
        ScenarioStep::AssertSubmitted { contains } => return Ok(evaluate_assert_submitted(page, contains)),
    }
    Ok(AssertionResult::Passed)
}
