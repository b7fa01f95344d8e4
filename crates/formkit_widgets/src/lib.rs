//! Formkit Widget Library
//!
//! Form controls built on `formkit_core`: text and masked inputs, a
//! dropdown with outside-click dismissal, a select field, and the form
//! container that ties them to one record.
//!
//! Widgets are headless. They keep their own interaction state, take their
//! geometry from [`Form::layout`], and render to plain view structs that a
//! host can draw however it likes.
//!
//! # Example
//!
//! ```rust
//! use formkit_core::{Document, PointerEvent};
//! use formkit_widgets::prelude::*;
//!
//! let document = Document::new();
//! let mut position = form(&document)
//!     .title("Add Position")
//!     .on_submit(|record| println!("{} fields", record.len()))
//!     .text("title", "Title")
//!     .select("pay_status", "Pay Status", ["Unpaid", "Hourly", "Salary", "Stipend"])
//!     .build();
//! position.layout(formkit_core::Point::new(0.0, 0.0));
//!
//! position.input("title", "Photo Editor");
//! assert!(position.choose("pay_status", "Hourly"));
//! assert_eq!(position.record().value("pay_status").to_string(), "Hourly");
//! ```

pub mod config;
pub mod dropdown;
pub mod error;
pub mod field;
pub mod form;
pub mod format;
pub mod select;

pub use config::FormsConfig;
pub use dropdown::{Chevron, Dropdown, DropdownItem, DropdownView, ItemView};
pub use error::ConfigError;
pub use field::{date_field, phone_field, text_field, Field, FieldView, InputType, TextField};
pub use form::{form, Form, FormBuilder, FormView};
pub use format::{format_date, format_phone, Mask};
pub use select::{select_field, SelectField};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::FormsConfig;
    pub use crate::dropdown::{Dropdown, DropdownItem};
    pub use crate::field::{date_field, phone_field, text_field, Field, TextField};
    pub use crate::form::{form, Form};
    pub use crate::select::{select_field, SelectField};
}
