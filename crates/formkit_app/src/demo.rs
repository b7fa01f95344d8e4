//! The staff-management demo: an employee form and a position form.

use formkit_core::FormRecord;
use formkit_widgets::{form, Form, FormsConfig};

use crate::page::Page;

pub const EMPLOYEE_FORM: &str = "Add Employee";
pub const POSITION_FORM: &str = "Add Position";

pub const BRANDS: [&str; 6] = [
    "Illini Media",
    "The Daily Illini",
    "WPGU",
    "Illio Yearbook",
    "Chambana Eats",
    "Illini Content Studio",
];

pub const PAY_STATUSES: [&str; 4] = ["Unpaid", "Hourly", "Salary", "Stipend"];

/// Page holding both demo forms, with submissions logged on the page.
pub fn demo_page(config: FormsConfig) -> Page {
    let mut page = Page::new(config);
    let employee = employee_form(&page);
    let position = position_form(&page);
    page.add_form(employee);
    page.add_form(position);
    page
}

fn employee_form(page: &Page) -> Form {
    form(page.document())
        .title(EMPLOYEE_FORM)
        .config(page.config().clone())
        .on_submit(announce(page, EMPLOYEE_FORM))
        .text("last-name", "Last Name")
        .text("first-name", "First Name")
        .email("imc-email", "IMC Email")
        .phone("phone", "Phone Number")
        .email("personal-email", "Personal Email")
        .date("hire-date", "Hire Date")
        .build()
}

fn position_form(page: &Page) -> Form {
    form(page.document())
        .title(POSITION_FORM)
        .config(page.config().clone())
        .on_submit(announce(page, POSITION_FORM))
        .text("title", "Title")
        .select("brand", "Brand", BRANDS)
        .select("pay_status", "Pay Status", PAY_STATUSES)
        .build()
}

fn announce(page: &Page, title: &'static str) -> impl Fn(&FormRecord) + 'static {
    let record_submission = page.recorder(title);
    move |record| {
        tracing::info!(form = title, "{}", describe_submission(record));
        record_submission(record);
    }
}

/// Text shown to the user after a submission.
pub fn describe_submission(record: &FormRecord) -> String {
    let lines: Vec<String> = record
        .iter()
        .map(|(key, value)| format!("{key} - {value}"))
        .collect();
    format!("You submitted:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::FieldValue;

    #[test]
    fn test_demo_page_layout() {
        let page = demo_page(FormsConfig::default());
        let titles: Vec<&str> = page.forms().iter().map(Form::title).collect();
        assert_eq!(titles, [EMPLOYEE_FORM, POSITION_FORM]);
        assert_eq!(page.forms()[0].fields().count(), 6);
        assert_eq!(page.document().listener_count(), 2);
    }

    #[test]
    fn test_describe_submission_keeps_write_order() {
        let record = FormRecord::new()
            .with_field("title", FieldValue::from("Photo Editor"))
            .with_field("brand", FieldValue::from("WPGU"));

        assert_eq!(
            describe_submission(&record),
            "You submitted:\ntitle - Photo Editor\nbrand - WPGU"
        );
    }

    #[test]
    fn test_describe_empty_submission() {
        assert_eq!(describe_submission(&FormRecord::new()), "You submitted:\n");
    }
}
