//! Scoped form context
//!
//! Field builders deep inside a form can reach the enclosing form without
//! the handle being threaded through every layer:
//!
//! ```rust
//! use formkit_core::context::{provide_form, use_form};
//! use formkit_core::{Document, FormHandle};
//!
//! let form = FormHandle::new();
//! let document = Document::new();
//!
//! provide_form(&form, &document, || {
//!     // somewhere inside a field builder
//!     use_form().update_field("title", "Editor");
//! });
//!
//! assert_eq!(form.get_field("title").to_string(), "Editor");
//! ```
//!
//! The context only exists for the duration of the `provide_form` call on
//! the current thread. Scopes nest; the innermost form wins.

use std::cell::RefCell;

use crate::events::Document;
use crate::form::FormHandle;

#[derive(Clone)]
struct FormScope {
    form: FormHandle,
    document: Document,
}

thread_local! {
    static FORM_SCOPES: RefCell<Vec<FormScope>> = const { RefCell::new(Vec::new()) };
}

/// Pops the scope even if the builder panics
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        FORM_SCOPES.with(|scopes| {
            scopes.borrow_mut().pop();
        });
    }
}

/// Run `build` with `form` and `document` as the active form context
pub fn provide_form<R>(form: &FormHandle, document: &Document, build: impl FnOnce() -> R) -> R {
    FORM_SCOPES.with(|scopes| {
        scopes.borrow_mut().push(FormScope {
            form: form.clone(),
            document: document.clone(),
        })
    });
    let _guard = ScopeGuard;
    build()
}

/// The innermost active form, if any
pub fn try_use_form() -> Option<FormHandle> {
    FORM_SCOPES.with(|scopes| scopes.borrow().last().map(|scope| scope.form.clone()))
}

/// The innermost active form
///
/// # Panics
///
/// Panics when called outside [`provide_form`]. A field built without a form
/// is a programming error.
pub fn use_form() -> FormHandle {
    match try_use_form() {
        Some(form) => form,
        None => panic!("use_form() called outside of provide_form(); fields must be built inside a form"),
    }
}

/// The document of the innermost active form
///
/// # Panics
///
/// Panics when called outside [`provide_form`].
pub fn use_document() -> Document {
    FORM_SCOPES
        .with(|scopes| scopes.borrow().last().map(|scope| scope.document.clone()))
        .unwrap_or_else(|| {
            panic!("use_document() called outside of provide_form(); widgets must be built inside a form")
        })
}
