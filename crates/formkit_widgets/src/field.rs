//! Field components
//!
//! A field is bound to one key of its form's record. It renders the value
//! stored under that key and turns raw input into the next stored value,
//! writing it back through the form handle. No validation happens here;
//! partial or malformed input is stored as typed.

use formkit_core::context::use_form;
use formkit_core::{FormHandle, PointerEvent, Rect};
use serde::Serialize;

use crate::config::{FormsConfig, LayoutConfig};
use crate::dropdown::DropdownView;
use crate::format::Mask;
use crate::select::SelectField;

/// Kind of native input a text field stands for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Tel,
    Password,
    Number,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Tel => "tel",
            InputType::Password => "password",
            InputType::Number => "number",
        }
    }
}

/// Rendered state of one field
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub value: String,
    pub placeholder: Option<String>,
    /// `None` for fields that are not text inputs
    pub input_type: Option<InputType>,
    pub dropdown: Option<DropdownView>,
}

/// A form control bound to one record key
pub trait Field {
    /// Record key this field reads and writes
    fn name(&self) -> &str;

    fn label(&self) -> &str;

    /// Apply widget configuration; called when the field joins a form
    fn configure(&mut self, config: &FormsConfig) {
        let _ = config;
    }

    /// Place the field in `row`
    fn layout(&mut self, row: Rect, config: &LayoutConfig) {
        let _ = (row, config);
    }

    /// Text currently shown by the field
    fn display_value(&self) -> String;

    /// Handle the full raw value of the input; returns false if ignored
    fn handle_input(&mut self, raw: &str) -> bool;

    /// Target-phase click handling; returns true if the click was consumed
    fn handle_click(&mut self, event: &PointerEvent) -> bool {
        let _ = event;
        false
    }

    fn view(&self) -> FieldView;

    fn as_select(&self) -> Option<&SelectField> {
        None
    }

    fn as_select_mut(&mut self) -> Option<&mut SelectField> {
        None
    }
}

/// Labeled text input, optionally masked
#[derive(Debug)]
pub struct TextField {
    name: String,
    label: String,
    input_type: InputType,
    mask: Mask,
    placeholder: Option<String>,
    form: FormHandle,
    bounds: Rect,
}

impl TextField {
    /// Plain text input that stores what is typed
    pub fn new(form: &FormHandle, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input_type: InputType::Text,
            mask: Mask::None,
            placeholder: None,
            form: form.clone(),
            bounds: Rect::ZERO,
        }
    }

    /// Phone input masked as `(AAA) BBB-CCCC`
    pub fn phone(form: &FormHandle, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(form, name, label)
            .input_type(InputType::Tel)
            .mask(Mask::Phone)
    }

    /// Date input masked as `MM/DD/YYYY`
    pub fn date(form: &FormHandle, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(form, name, label).mask(Mask::Date)
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// Placeholder shown while empty; overrides the configured one
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Field for TextField {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn configure(&mut self, config: &FormsConfig) {
        if self.placeholder.is_some() {
            return;
        }
        self.placeholder = match self.mask {
            Mask::None => None,
            Mask::Phone => Some(config.placeholders.phone.clone()),
            Mask::Date => Some(config.placeholders.date.clone()),
        };
    }

    fn layout(&mut self, row: Rect, _config: &LayoutConfig) {
        self.bounds = row;
    }

    fn display_value(&self) -> String {
        self.form.get_field(&self.name).to_string()
    }

    fn handle_click(&mut self, event: &PointerEvent) -> bool {
        self.bounds.contains(event.position)
    }

    fn handle_input(&mut self, raw: &str) -> bool {
        let next = self.mask.apply(raw);
        tracing::trace!(field = %self.name, raw, next = %next, "input");
        self.form.update_field(&self.name, next);
        true
    }

    fn view(&self) -> FieldView {
        FieldView {
            name: self.name.clone(),
            label: self.label.clone(),
            value: self.display_value(),
            placeholder: self.placeholder.clone(),
            input_type: Some(self.input_type),
            dropdown: None,
        }
    }
}

/// Text field bound to the form being built
///
/// # Panics
///
/// Panics when called outside `formkit_core::provide_form`.
pub fn text_field(name: impl Into<String>, label: impl Into<String>) -> TextField {
    TextField::new(&use_form(), name, label)
}

/// Phone field bound to the form being built
///
/// # Panics
///
/// Panics when called outside `formkit_core::provide_form`.
pub fn phone_field(name: impl Into<String>, label: impl Into<String>) -> TextField {
    TextField::phone(&use_form(), name, label)
}

/// Date field bound to the form being built
///
/// # Panics
///
/// Panics when called outside `formkit_core::provide_form`.
pub fn date_field(name: impl Into<String>, label: impl Into<String>) -> TextField {
    TextField::date(&use_form(), name, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{provide_form, Document, FieldValue};

    #[test]
    fn test_text_field_stores_input_verbatim() {
        let form = FormHandle::new();
        let mut field = TextField::new(&form, "imc-email", "IMC Email").input_type(InputType::Email);

        assert_eq!(field.display_value(), "");
        assert!(field.handle_input("  ada@illinimedia.com "));
        assert_eq!(form.get_field("imc-email"), FieldValue::from("  ada@illinimedia.com "));
        assert_eq!(field.view().input_type, Some(InputType::Email));
    }

    #[test]
    fn test_phone_field_masks_each_keystroke() {
        let form = FormHandle::new();
        let mut field = TextField::phone(&form, "phone", "Phone Number");

        for ch in "2175551234".chars() {
            let raw = format!("{}{}", field.display_value(), ch);
            field.handle_input(&raw);
        }
        assert_eq!(field.display_value(), "(217) 555-1234");

        // backspace from the end
        let mut shown = field.display_value();
        shown.pop();
        field.handle_input(&shown);
        assert_eq!(field.display_value(), "(217) 555-123");
    }

    #[test]
    fn test_date_field_masks_input() {
        let form = FormHandle::new();
        let mut field = TextField::date(&form, "hire-date", "Hire Date");

        field.handle_input("0101");
        assert_eq!(field.display_value(), "01/01");
        field.handle_input("01/01/2025");
        assert_eq!(form.get_field("hire-date"), FieldValue::from("01/01/2025"));
    }

    #[test]
    fn test_configure_sets_mask_placeholders() {
        let form = FormHandle::new();
        let config = FormsConfig::default();

        let mut phone = TextField::phone(&form, "phone", "Phone");
        let mut date = TextField::date(&form, "date", "Date");
        let mut plain = TextField::new(&form, "name", "Name");
        let mut custom = TextField::date(&form, "dob", "Birthday").placeholder("MM/DD");
        for field in [&mut phone, &mut date, &mut plain, &mut custom] {
            field.configure(&config);
        }

        assert_eq!(phone.view().placeholder.as_deref(), Some("(123) 456-7890"));
        assert_eq!(phone.view().input_type, Some(InputType::Tel));
        assert_eq!(date.view().placeholder.as_deref(), Some("MM/DD/YYYY"));
        assert_eq!(plain.view().placeholder, None);
        assert_eq!(custom.view().placeholder.as_deref(), Some("MM/DD"));
    }

    #[test]
    fn test_fields_share_one_record_without_coupling() {
        let form = FormHandle::new();
        let mut first = TextField::new(&form, "first-name", "First Name");
        let mut last = TextField::new(&form, "last-name", "Last Name");

        first.handle_input("Ada");
        last.handle_input("Lovelace");

        let record = form.snapshot();
        assert_eq!(record.len(), 2);
        assert_eq!(record.value("first-name"), FieldValue::from("Ada"));
        assert_eq!(record.value("last-name"), FieldValue::from("Lovelace"));
    }

    #[test]
    fn test_free_builders_use_enclosing_form() {
        let form = FormHandle::new();
        let document = Document::new();
        let mut fields = provide_form(&form, &document, || {
            vec![text_field("title", "Title"), phone_field("phone", "Phone"), date_field("d", "Date")]
        });

        fields[1].handle_input("217555");
        assert_eq!(form.get_field("phone"), FieldValue::from("(217) 555"));
    }

    #[test]
    #[should_panic(expected = "outside of provide_form")]
    fn test_free_builder_outside_form_panics() {
        let _ = text_field("title", "Title");
    }
}
