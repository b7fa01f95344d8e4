//! Select field
//!
//! A single-choice field rendered as a [`Dropdown`] with one plain item per
//! option. The field keeps its own displayed selection, initialized from
//! the record, and writes every choice through to the form. The dropdown
//! itself never sees the record; it only runs the item actions built here.

use std::cell::RefCell;
use std::rc::Rc;

use formkit_core::context::{use_document, use_form};
use formkit_core::{Document, FormHandle, PointerEvent, Rect};

use crate::config::{FormsConfig, LayoutConfig};
use crate::dropdown::{Dropdown, DropdownItem};
use crate::field::{Field, FieldView};

/// Trigger label shown before anything is chosen
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// Labeled single-choice field
#[derive(Debug)]
pub struct SelectField {
    name: String,
    label: String,
    options: Vec<String>,
    placeholder: Option<String>,
    selected: Rc<RefCell<String>>,
    dropdown: Dropdown,
}

impl SelectField {
    pub fn new<I, S>(
        form: &FormHandle,
        document: &Document,
        name: impl Into<String>,
        label: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let selected = Rc::new(RefCell::new(form.get_field(&name).to_string()));

        let items = options
            .iter()
            .map(|option| choice_item(form, &name, option, &selected))
            .collect();
        let dropdown = Dropdown::new(String::new(), items, document);

        let mut field = Self {
            name,
            label: label.into(),
            options,
            placeholder: None,
            selected,
            dropdown,
        };
        field.sync_trigger_label();
        field
    }

    /// Trigger label shown while nothing is chosen; overrides the configured one
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self.sync_trigger_label();
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Current choice, if any
    pub fn selected(&self) -> Option<String> {
        let selected = self.selected.borrow();
        (!selected.is_empty()).then(|| selected.clone())
    }

    /// The selection, or the placeholder when nothing is chosen
    pub fn trigger_label(&self) -> String {
        self.selected().unwrap_or_else(|| self.placeholder_text().to_string())
    }

    /// Choose `option` as if its item were clicked
    ///
    /// Returns false when `option` is not one of this field's options.
    pub fn choose(&mut self, option: &str) -> bool {
        let Some(index) = self.options.iter().position(|candidate| candidate == option) else {
            tracing::debug!(field = %self.name, option, "unknown option ignored");
            return false;
        };
        let chosen = self.dropdown.select(index);
        self.sync_trigger_label();
        chosen
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut Dropdown {
        &mut self.dropdown
    }

    fn placeholder_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    fn sync_trigger_label(&mut self) {
        let label = self.trigger_label();
        self.dropdown.set_trigger_label(label);
    }
}

fn choice_item(
    form: &FormHandle,
    name: &str,
    option: &str,
    selected: &Rc<RefCell<String>>,
) -> DropdownItem {
    let form = form.clone();
    let name = name.to_string();
    let value = option.to_string();
    let selected = Rc::clone(selected);

    DropdownItem::plain(option).on_select(move || {
        selected.replace(value.clone());
        form.update_field(&name, value.as_str());
    })
}

impl Field for SelectField {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn configure(&mut self, config: &FormsConfig) {
        if self.placeholder.is_none() {
            self.placeholder = Some(config.placeholders.select.clone());
            self.sync_trigger_label();
        }
    }

    fn layout(&mut self, row: Rect, config: &LayoutConfig) {
        self.dropdown.layout(row, config.item_height);
    }

    fn display_value(&self) -> String {
        self.selected.borrow().clone()
    }

    fn handle_input(&mut self, raw: &str) -> bool {
        self.choose(raw)
    }

    fn handle_click(&mut self, event: &PointerEvent) -> bool {
        let consumed = self.dropdown.handle_click(event);
        self.sync_trigger_label();
        consumed
    }

    fn view(&self) -> FieldView {
        FieldView {
            name: self.name.clone(),
            label: self.label.clone(),
            value: self.display_value(),
            placeholder: Some(self.placeholder_text().to_string()),
            input_type: None,
            dropdown: Some(self.dropdown.view()),
        }
    }

    fn as_select(&self) -> Option<&SelectField> {
        Some(self)
    }

    fn as_select_mut(&mut self) -> Option<&mut SelectField> {
        Some(self)
    }
}

/// Select field bound to the form being built
///
/// # Panics
///
/// Panics when called outside `formkit_core::provide_form`.
pub fn select_field<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> SelectField
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectField::new(&use_form(), &use_document(), name, label, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{provide_form, FieldValue};

    const PAY_STATUSES: [&str; 4] = ["Unpaid", "Hourly", "Salary", "Stipend"];
    const ROW: Rect = Rect::new(0.0, 0.0, 320.0, 40.0);

    fn pay_status(form: &FormHandle, document: &Document) -> SelectField {
        let mut field = SelectField::new(form, document, "pay_status", "Pay Status", PAY_STATUSES);
        field.layout(ROW, &LayoutConfig::default());
        field
    }

    fn click_option(field: &mut SelectField, index: usize) {
        let trigger = PointerEvent::at(field.dropdown().trigger_bounds().unwrap().center());
        field.handle_click(&trigger);
        let item = field.dropdown().item_bounds(index).unwrap();
        field.handle_click(&PointerEvent::at(item.center()));
    }

    #[test]
    fn test_starts_with_placeholder() {
        let form = FormHandle::new();
        let document = Document::new();
        let field = pay_status(&form, &document);

        assert_eq!(field.selected(), None);
        assert_eq!(field.trigger_label(), "Select...");
        assert_eq!(field.dropdown().trigger_label(), "Select...");
        assert!(!form.snapshot().contains("pay_status"));
    }

    #[test]
    fn test_choosing_updates_label_and_record() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = pay_status(&form, &document);

        click_option(&mut field, 2);

        assert_eq!(field.trigger_label(), "Salary");
        assert_eq!(field.dropdown().trigger_label(), "Salary");
        assert_eq!(form.get_field("pay_status"), FieldValue::from("Salary"));
        assert!(!field.dropdown().is_open());
    }

    #[test]
    fn test_every_option_round_trips_through_record() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = pay_status(&form, &document);

        for option in PAY_STATUSES {
            assert!(field.choose(option));
            assert_eq!(field.view().dropdown.unwrap().trigger_label, option);
            assert_eq!(form.get_field("pay_status"), FieldValue::from(option));
        }
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = pay_status(&form, &document);

        assert!(!field.choose("Volunteer"));
        assert!(!field.handle_input("Volunteer"));
        assert_eq!(field.selected(), None);
        assert!(form.snapshot().is_empty());
    }

    #[test]
    fn test_initialized_from_record() {
        let form = FormHandle::new();
        form.update_field("brand", "WPGU");
        let document = Document::new();
        let field = SelectField::new(&form, &document, "brand", "Brand", ["Illio Yearbook", "WPGU"]);

        assert_eq!(field.selected().as_deref(), Some("WPGU"));
        assert_eq!(field.trigger_label(), "WPGU");
    }

    #[test]
    fn test_empty_options_is_degenerate_not_an_error() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = SelectField::new(&form, &document, "brand", "Brand", Vec::<String>::new());
        field.layout(ROW, &LayoutConfig::default());

        assert!(field.handle_click(&PointerEvent::at(ROW.center())));
        let view = field.view();
        let dropdown = view.dropdown.unwrap();
        assert!(dropdown.open);
        assert!(dropdown.items.is_empty());
        assert_eq!(dropdown.trigger_label, "Select...");
    }

    #[test]
    fn test_configured_placeholder() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut config = FormsConfig::default();
        config.placeholders.select = "Choose one".to_string();

        let mut configured = pay_status(&form, &document);
        configured.configure(&config);
        assert_eq!(configured.trigger_label(), "Choose one");

        let mut explicit = pay_status(&form, &document).placeholder("Pick a status");
        explicit.configure(&config);
        assert_eq!(explicit.trigger_label(), "Pick a status");
    }

    #[test]
    fn test_outside_click_closes_without_choosing() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = pay_status(&form, &document);

        field.handle_click(&PointerEvent::at(ROW.center()));
        assert!(field.dropdown().is_open());

        document.dispatch_click(&PointerEvent::click(-1.0, -1.0));
        assert!(!field.dropdown().is_open());
        assert_eq!(field.selected(), None);
    }

    #[test]
    fn test_free_builder_uses_enclosing_form_and_document() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut field = provide_form(&form, &document, || select_field("pay_status", "Pay Status", PAY_STATUSES));

        assert_eq!(document.listener_count(), 1);
        field.choose("Stipend");
        assert_eq!(form.get_field("pay_status"), FieldValue::from("Stipend"));

        drop(field);
        assert_eq!(document.listener_count(), 0);
    }
}
