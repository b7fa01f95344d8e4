//! Form state container
//!
//! A [`FormHandle`] owns one [`FormRecord`] for the lifetime of a form.
//! Fields hold clones of the handle and write through
//! [`FormHandle::update_field`]; every write publishes a fresh immutable
//! snapshot, so a record handed to a submit handler never changes afterwards.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::events::SubmitEvent;

/// Value stored for one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// Several choices, e.g. from checkbox items
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Field name to value mapping, in first-write order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormRecord {
    fields: IndexMap<String, FieldValue>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Value for `name`, or the empty default when it was never written
    pub fn value(&self, name: &str) -> FieldValue {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// A new record equal to this one with `name` set to `value`
    ///
    /// An existing key keeps its position.
    pub fn with_field(&self, name: impl Into<String>, value: FieldValue) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), value);
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a FormRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Callback receiving the submitted record
pub type SubmitHandler = Rc<dyn Fn(&FormRecord)>;

struct FormInner {
    record: RefCell<Arc<FormRecord>>,
    on_submit: RefCell<Option<SubmitHandler>>,
}

/// Shared handle to one form's record
///
/// Clones refer to the same record. The handle is single-threaded; the
/// snapshots it hands out are `Arc`s and may be sent elsewhere.
#[derive(Clone)]
pub struct FormHandle {
    inner: Rc<FormInner>,
}

impl FormHandle {
    /// Create a form with an empty record and no submit handler
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FormInner {
                record: RefCell::new(Arc::new(FormRecord::new())),
                on_submit: RefCell::new(None),
            }),
        }
    }

    /// Create a form that reports submissions to `handler`
    pub fn with_submit<F>(handler: F) -> Self
    where
        F: Fn(&FormRecord) + 'static,
    {
        let form = Self::new();
        form.set_on_submit(handler);
        form
    }

    pub fn set_on_submit<F>(&self, handler: F)
    where
        F: Fn(&FormRecord) + 'static,
    {
        *self.inner.on_submit.borrow_mut() = Some(Rc::new(handler));
    }

    /// Set `name` to `value`, creating the key on first write
    pub fn update_field(&self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        tracing::debug!(field = name, value = %value, "field updated");
        let next = Arc::new(self.inner.record.borrow().with_field(name, value));
        *self.inner.record.borrow_mut() = next;
    }

    /// Current value of `name`, or the empty default
    pub fn get_field(&self, name: &str) -> FieldValue {
        self.inner.record.borrow().value(name)
    }

    /// The current immutable snapshot of the record
    pub fn snapshot(&self) -> Arc<FormRecord> {
        self.inner.record.borrow().clone()
    }

    /// Submit the form
    ///
    /// Prevents the event's default action, then passes a snapshot of the
    /// record to the submit handler. The record is left as it is.
    pub fn submit(&self, event: &mut SubmitEvent) -> Arc<FormRecord> {
        event.prevent_default();
        let snapshot = self.snapshot();
        let handler = self.inner.on_submit.borrow().clone();
        tracing::info!(fields = snapshot.len(), "form submitted");
        if let Some(handler) = handler {
            handler(&snapshot);
        }
        snapshot
    }

    /// Whether two handles refer to the same form
    pub fn ptr_eq(&self, other: &FormHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for FormHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormHandle")
            .field("record", &self.inner.record.borrow())
            .field("has_submit_handler", &self.inner.on_submit.borrow().is_some())
            .finish()
    }
}
