use std::path::PathBuf;

use formkit_app::report::ReportStatus;
use formkit_app::{demo_page, run_loaded_scenario, run_on_page, run_scenario, DispatchOrder, Scenario};
use formkit_widgets::FormsConfig;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn run_file(name: &str) -> formkit_app::RunOutcome {
    let scenario = Scenario::from_path(&scenario_path(name)).unwrap();
    run_loaded_scenario(&scenario, FormsConfig::default()).unwrap()
}

#[test]
fn add_employee_scenario_passes() {
    let outcome = run_file("add_employee.json");
    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);

    let record = &report.submissions[0].record;
    let keys: Vec<&str> = record.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["last-name", "first-name", "imc-email", "phone", "hire-date"]);
}

#[test]
fn add_position_scenario_passes() {
    let outcome = run_file("add_position.json");
    assert!(!outcome.is_failed(), "{:?}", outcome.report().message);
    assert_eq!(outcome.report().submissions.len(), 1);
}

#[test]
fn document_first_scenario_passes() {
    let scenario = Scenario::from_path(&scenario_path("document_first.json")).unwrap();
    assert_eq!(scenario.dispatch, DispatchOrder::DocumentFirst);

    let outcome = run_loaded_scenario(&scenario, FormsConfig::default()).unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report().message);
}

#[test]
fn dispatch_order_does_not_change_results() {
    let scenario = Scenario::from_path(&scenario_path("add_position.json")).unwrap();
    for order in [DispatchOrder::TargetFirst, DispatchOrder::DocumentFirst] {
        let mut page = demo_page(FormsConfig::default());
        let mut scenario = scenario.clone();
        scenario.dispatch = order;

        let outcome = run_on_page(&scenario, &mut page).unwrap();
        assert!(!outcome.is_failed(), "{order:?}: {:?}", outcome.report().message);
        assert_eq!(page.trigger_label("pay_status").unwrap(), "Stipend");
    }
}

#[test]
fn form_keeps_values_after_submit() {
    let outcome = run_scenario(
        r#"{ "steps": [
            { "type": "input", "field": "first-name", "value": "Ada" },
            { "type": "submit", "form": "Add Employee" },
            { "type": "submit", "form": "Add Employee" },
            { "type": "assert_field", "field": "first-name", "value": "Ada" }
        ] }"#,
        FormsConfig::default(),
    )
    .unwrap();

    assert!(!outcome.is_failed());
    let submissions = &outcome.report().submissions;
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0], submissions[1]);
}

#[test]
fn configured_placeholder_reaches_the_page() {
    let config = FormsConfig::from_toml_str("[placeholders]\nselect = \"Choose...\"").unwrap();
    let outcome = run_scenario(
        r#"{ "steps": [{ "type": "assert_label", "field": "brand", "label": "Choose..." }] }"#,
        config,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report().message);
}

#[test]
fn failing_scenario_reports_the_step() {
    let outcome = run_scenario(
        r#"{ "name": "wrong mask", "steps": [
            { "type": "type", "field": "phone", "text": "217555" },
            { "type": "assert_field", "field": "phone", "value": "217-555" }
        ] }"#,
        FormsConfig::default(),
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.scenario.as_deref(), Some("wrong mask"));
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(
        report.message.as_deref(),
        Some("phone: expected value '217-555', got '(217) 555'")
    );
}

#[test]
fn typing_into_a_select_is_an_error() {
    let error = run_scenario(
        r#"{ "steps": [{ "type": "type", "field": "brand", "text": "Volunteer" }] }"#,
        FormsConfig::default(),
    )
    .unwrap_err();

    assert!(format!("{error:#}").contains("field 'brand' rejected keystroke 'V'"), "{error:#}");
}
