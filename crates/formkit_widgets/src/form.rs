//! Form container
//!
//! Owns one [`FormHandle`], the fields built against it and a submit
//! button. Fields are laid out as stacked rows in insertion order with the
//! submit button after the last row.
//!
//! # Example
//!
//! ```rust
//! use formkit_core::{Document, Point, PointerEvent};
//! use formkit_widgets::form::form;
//!
//! let document = Document::new();
//! let mut employee = form(&document)
//!     .title("Add Employee")
//!     .text("first-name", "First Name")
//!     .phone("phone", "Phone Number")
//!     .build();
//! employee.layout(Point::new(0.0, 0.0));
//!
//! employee.input("phone", "2175551234");
//! let event = employee.submit();
//! assert!(event.is_default_prevented());
//! assert_eq!(employee.record().value("phone").to_string(), "(217) 555-1234");
//! ```

use std::sync::Arc;

use formkit_core::context::provide_form;
use formkit_core::{Document, FormHandle, FormRecord, Point, PointerEvent, Rect, SubmitEvent};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::FormsConfig;
use crate::field::{Field, FieldView, InputType, TextField};
use crate::select::SelectField;

/// Rendered form
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub submit_label: String,
}

/// Form container widget
pub struct Form {
    handle: FormHandle,
    document: Document,
    config: FormsConfig,
    title: String,
    fields: Vec<Box<dyn Field>>,
    submit_bounds: Rect,
    bounds: Rect,
}

impl Form {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn handle(&self) -> &FormHandle {
        &self.handle
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &FormsConfig {
        &self.config
    }

    /// Snapshot of the current record
    pub fn record(&self) -> Arc<FormRecord> {
        self.handle.snapshot()
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn Field> {
        self.fields.iter().map(|field| field.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields().find(|field| field.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut (dyn Field + 'static)> {
        self.fields
            .iter_mut()
            .find(|field| field.name() == name)
            .map(|field| field.as_mut())
    }

    pub fn select(&self, name: &str) -> Option<&SelectField> {
        self.field(name).and_then(|field| field.as_select())
    }

    pub fn select_mut(&mut self, name: &str) -> Option<&mut SelectField> {
        self.field_mut(name).and_then(|field| field.as_select_mut())
    }

    pub fn field_view(&self, name: &str) -> Option<FieldView> {
        self.field(name).map(|field| field.view())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn submit_bounds(&self) -> Rect {
        self.submit_bounds
    }

    /// Stack the rows from `origin`; returns the height taken
    pub fn layout(&mut self, origin: Point) -> f32 {
        let layout = &self.config.layout;
        let mut y = origin.y;
        for field in &mut self.fields {
            field.layout(Rect::new(origin.x, y, layout.width, layout.row_height), layout);
            y += layout.row_height + layout.gap;
        }

        self.submit_bounds = Rect::new(origin.x, y, layout.width, layout.row_height);
        self.bounds = Rect::new(origin.x, origin.y, layout.width, self.submit_bounds.bottom() - origin.y);
        self.bounds.height()
    }

    /// Route the full raw value of an input to the named field
    pub fn input(&mut self, name: &str, raw: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => field.handle_input(raw),
            None => {
                tracing::debug!(form = %self.title, field = name, "input for unknown field");
                false
            }
        }
    }

    /// Choose an option of the named select field
    pub fn choose(&mut self, name: &str, option: &str) -> bool {
        self.select_mut(name)
            .is_some_and(|select| select.choose(option))
    }

    /// Target-phase click routing
    ///
    /// An open dropdown panel sits above the rows it overlaps, so it gets
    /// the first look. A click on the submit button submits the form.
    pub fn click(&mut self, event: &PointerEvent) -> bool {
        let overlay = self.fields.iter().position(|field| {
            field.as_select().is_some_and(|select| {
                let dropdown = select.dropdown();
                dropdown.is_open() && dropdown.contains(event.position)
            })
        });
        if let Some(index) = overlay {
            return self.fields[index].handle_click(event);
        }

        for field in &mut self.fields {
            if field.handle_click(event) {
                return true;
            }
        }

        if self.submit_bounds.contains(event.position) {
            self.submit();
            return true;
        }
        false
    }

    /// Submit the current record to the form's handler
    ///
    /// The record is left as it is afterwards.
    pub fn submit(&mut self) -> SubmitEvent {
        let mut event = SubmitEvent::new();
        let record = self.handle.submit(&mut event);
        tracing::debug!(form = %self.title, fields = record.len(), "form submitted");
        event
    }

    pub fn view(&self) -> FormView {
        FormView {
            title: self.title.clone(),
            fields: self.fields().map(|field| field.view()).collect(),
            submit_label: self.config.submit_label.clone(),
        }
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("title", &self.title)
            .field("fields", &self.fields.iter().map(|field| field.name()).collect::<Vec<_>>())
            .field("record", &self.handle.snapshot())
            .finish()
    }
}

/// Builder for [`Form`]
pub struct FormBuilder {
    handle: FormHandle,
    document: Document,
    config: FormsConfig,
    title: String,
    fields: Vec<Box<dyn Field>>,
}

impl FormBuilder {
    pub fn new(document: &Document) -> Self {
        Self {
            handle: FormHandle::new(),
            document: document.clone(),
            config: FormsConfig::default(),
            title: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn config(mut self, config: FormsConfig) -> Self {
        self.config = config;
        self
    }

    /// Handler called with the record on every submission
    pub fn on_submit<F>(self, handler: F) -> Self
    where
        F: Fn(&FormRecord) + 'static,
    {
        self.handle.set_on_submit(handler);
        self
    }

    pub fn text(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let field = TextField::new(&self.handle, name, label);
        self.field(field)
    }

    pub fn email(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let field = TextField::new(&self.handle, name, label).input_type(InputType::Email);
        self.field(field)
    }

    pub fn phone(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let field = TextField::phone(&self.handle, name, label);
        self.field(field)
    }

    pub fn date(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let field = TextField::date(&self.handle, name, label);
        self.field(field)
    }

    pub fn select<I, S>(self, name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field = SelectField::new(&self.handle, &self.document, name, label, options);
        self.field(field)
    }

    /// Add a field built against this form's handle
    pub fn field(mut self, field: impl Field + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    /// Build fields with the free constructors (`text_field`, `select_field`, ...)
    pub fn children<F>(mut self, build: F) -> Self
    where
        F: FnOnce() -> Vec<Box<dyn Field>>,
    {
        let fields = provide_form(&self.handle, &self.document, build);
        self.fields.extend(fields);
        self
    }

    pub fn handle(&self) -> &FormHandle {
        &self.handle
    }

    pub fn build(self) -> Form {
        let FormBuilder {
            handle,
            document,
            config,
            title,
            mut fields,
        } = self;

        let mut seen = FxHashSet::default();
        for field in &mut fields {
            if !seen.insert(field.name().to_string()) {
                tracing::warn!(form = %title, field = field.name(), "duplicate field name shares one record key");
            }
            field.configure(&config);
        }

        Form {
            handle,
            document,
            config,
            title,
            fields,
            submit_bounds: Rect::ZERO,
            bounds: Rect::ZERO,
        }
    }
}

/// Start building a form whose dropdowns listen on `document`
pub fn form(document: &Document) -> FormBuilder {
    FormBuilder::new(document)
}
