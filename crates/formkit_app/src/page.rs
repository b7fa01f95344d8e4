//! Headless page hosting a column of forms.
//!
//! The page plays the part of the browser: it owns the document, stacks the
//! forms vertically, and delivers every click twice (target phase to the
//! forms, then document phase to the registered listeners, or the other way
//! around).

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use formkit_core::{Document, FormRecord, Point, PointerEvent};
use formkit_widgets::{Form, FormView, FormsConfig};
use serde::{Deserialize, Serialize};

/// Point guaranteed to lie outside every widget on the page.
pub const OUTSIDE: Point = Point::new(-1.0, -1.0);

/// Which delivery of a click happens first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOrder {
    #[default]
    TargetFirst,
    DocumentFirst,
}

/// A record handed to a submit handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub form: String,
    pub record: FormRecord,
}

/// Shared log of submissions made on a page.
pub type SubmissionLog = Rc<RefCell<Vec<Submission>>>;

pub struct Page {
    document: Document,
    config: FormsConfig,
    dispatch: DispatchOrder,
    forms: Vec<Form>,
    submissions: SubmissionLog,
}

impl Page {
    pub fn new(config: FormsConfig) -> Self {
        Self {
            document: Document::new(),
            config,
            dispatch: DispatchOrder::default(),
            forms: Vec::new(),
            submissions: SubmissionLog::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &FormsConfig {
        &self.config
    }

    pub fn set_dispatch_order(&mut self, dispatch: DispatchOrder) {
        self.dispatch = dispatch;
    }

    /// Submit handler that appends to this page's submission log.
    pub fn recorder(&self, form: &str) -> impl Fn(&FormRecord) + 'static {
        let log = Rc::clone(&self.submissions);
        let form = form.to_string();
        move |record| {
            log.borrow_mut().push(Submission {
                form: form.clone(),
                record: record.clone(),
            });
        }
    }

    /// Place `form` below the forms already on the page.
    pub fn add_form(&mut self, mut form: Form) {
        let layout = &self.config.layout;
        let y = match self.forms.last() {
            Some(last) => last.bounds().bottom() + layout.gap,
            None => layout.y,
        };
        form.layout(Point::new(layout.x, y));
        tracing::debug!(form = form.title(), y, "form added to page");
        self.forms.push(form);
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn form(&self, title: &str) -> Option<&Form> {
        self.forms.iter().find(|form| form.title() == title)
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }

    pub fn views(&self) -> Vec<FormView> {
        self.forms.iter().map(Form::view).collect()
    }

    /// Deliver one click; returns whether a widget consumed it.
    pub fn click(&mut self, point: Point) -> bool {
        let event = PointerEvent::at(point);
        tracing::trace!(x = point.x, y = point.y, order = ?self.dispatch, "click");

        match self.dispatch {
            DispatchOrder::TargetFirst => {
                let consumed = self.dispatch_target(&event);
                self.document.dispatch_click(&event);
                consumed
            }
            DispatchOrder::DocumentFirst => {
                self.document.dispatch_click(&event);
                self.dispatch_target(&event)
            }
        }
    }

    fn dispatch_target(&mut self, event: &PointerEvent) -> bool {
        self.forms.iter_mut().any(|form| form.click(event))
    }

    pub fn click_outside(&mut self) {
        self.click(OUTSIDE);
    }

    /// Type `text` one keystroke at a time.
    pub fn type_text(&mut self, field: &str, text: &str) -> Result<()> {
        let form = self.form_with_field(field)?;
        for ch in text.chars() {
            let mut raw = displayed(form, field)?;
            raw.push(ch);
            if !form.input(field, &raw) {
                bail!("field '{field}' rejected keystroke '{ch}'");
            }
        }
        Ok(())
    }

    /// Replace the whole input value at once.
    pub fn input(&mut self, field: &str, value: &str) -> Result<()> {
        let form = self.form_with_field(field)?;
        if !form.input(field, value) {
            bail!("field '{field}' rejected input '{value}'");
        }
        Ok(())
    }

    /// Delete `count` characters from the end of the displayed value.
    pub fn backspace(&mut self, field: &str, count: usize) -> Result<()> {
        let form = self.form_with_field(field)?;
        for _ in 0..count {
            let mut raw = displayed(form, field)?;
            if raw.pop().is_none() {
                break;
            }
            if !form.input(field, &raw) {
                bail!("field '{field}' rejected backspace");
            }
        }
        Ok(())
    }

    pub fn click_trigger(&mut self, field: &str) -> Result<()> {
        let trigger = self
            .select(field)?
            .dropdown()
            .trigger_bounds()
            .ok_or_else(|| anyhow!("field '{field}' has not been laid out"))?;
        self.click(trigger.center());
        Ok(())
    }

    /// Click the rendered item for `option`; the dropdown must be open.
    pub fn click_option(&mut self, field: &str, option: &str) -> Result<()> {
        let select = self.select(field)?;
        let index = select
            .options()
            .iter()
            .position(|candidate| candidate == option)
            .ok_or_else(|| anyhow!("field '{field}' has no option '{option}'"))?;
        if !select.dropdown().is_open() {
            bail!("cannot click '{option}': dropdown for '{field}' is closed");
        }
        let item = select
            .dropdown()
            .item_bounds(index)
            .ok_or_else(|| anyhow!("option '{option}' of '{field}' has not been laid out"))?;

        self.click(item.center());
        Ok(())
    }

    /// Click the submit button of the form titled `title`.
    pub fn submit(&mut self, title: &str) -> Result<()> {
        let button = self
            .form(title)
            .ok_or_else(|| anyhow!("no form titled '{title}'"))?
            .submit_bounds();
        self.click(button.center());
        Ok(())
    }

    pub fn field_value(&self, field: &str) -> Result<String> {
        let form = self.form_containing(field)?;
        displayed(form, field)
    }

    pub fn trigger_label(&self, field: &str) -> Result<String> {
        Ok(self.select(field)?.trigger_label())
    }

    pub fn is_open(&self, field: &str) -> Result<bool> {
        Ok(self.select(field)?.dropdown().is_open())
    }

    fn select(&self, field: &str) -> Result<&formkit_widgets::SelectField> {
        self.form_containing(field)?
            .select(field)
            .ok_or_else(|| anyhow!("field '{field}' is not a select field"))
    }

    fn form_containing(&self, field: &str) -> Result<&Form> {
        self.forms
            .iter()
            .find(|form| form.field(field).is_some())
            .ok_or_else(|| anyhow!("no field named '{field}' on the page"))
    }

    fn form_with_field(&mut self, field: &str) -> Result<&mut Form> {
        self.forms
            .iter_mut()
            .find(|form| form.field(field).is_some())
            .ok_or_else(|| anyhow!("no field named '{field}' on the page"))
    }
}

fn displayed(form: &Form, field: &str) -> Result<String> {
    form.field(field)
        .map(|field| field.display_value())
        .ok_or_else(|| anyhow!("no field named '{field}'"))
}
