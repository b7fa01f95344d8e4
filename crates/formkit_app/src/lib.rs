//! Formkit application layer
//!
//! Hosts the staff-management demo forms on a headless [`Page`] and plays
//! JSON scenarios against it:
//!
//! - [`demo`]: the "Add Employee" and "Add Position" forms
//! - [`page`]: click delivery, keystrokes and form lookup
//! - [`scenario`], [`runner`], [`report`]: scripted runs with a JSON report
//!
//! # Example
//!
//! ```rust
//! use formkit_app::runner::run_scenario;
//! use formkit_widgets::FormsConfig;
//!
//! let outcome = run_scenario(
//!     r#"{ "steps": [
//!         { "type": "click_trigger", "field": "pay_status" },
//!         { "type": "click_option", "field": "pay_status", "option": "Stipend" },
//!         { "type": "assert_label", "field": "pay_status", "label": "Stipend" }
//!     ] }"#,
//!     FormsConfig::default(),
//! )
//! .unwrap();
//! assert!(!outcome.is_failed());
//! ```

pub mod assert;
pub mod demo;
pub mod page;
pub mod report;
pub mod runner;
pub mod scenario;

pub use demo::{demo_page, describe_submission};
pub use page::{DispatchOrder, Page, Submission};
pub use report::{ReportStatus, ScenarioReport};
pub use runner::{run_loaded_scenario, run_on_page, run_scenario, RunOutcome};
pub use scenario::{Scenario, ScenarioStep};
