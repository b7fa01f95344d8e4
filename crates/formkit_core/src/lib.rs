//! Formkit Core Runtime
//!
//! This crate provides the foundational primitives for the formkit widgets:
//!
//! - **Form State**: one shared record per form, written through a cloneable handle
//! - **State Machines**: flat statecharts for widget open/close states
//! - **Event Dispatch**: document-wide click listeners for outside-click detection
//!
//! # Example
//!
//! ```rust
//! use formkit_core::events::SubmitEvent;
//! use formkit_core::form::{FieldValue, FormHandle};
//!
//! let form = FormHandle::new();
//! form.update_field("first-name", "Ada");
//!
//! assert_eq!(form.get_field("first-name"), FieldValue::from("Ada"));
//! assert_eq!(form.get_field("last-name"), FieldValue::default());
//!
//! let mut event = SubmitEvent::new();
//! let snapshot = form.submit(&mut event);
//! assert!(event.is_default_prevented());
//! assert_eq!(snapshot.len(), 1);
//! ```

pub mod context;
pub mod events;
pub mod form;
pub mod fsm;
pub mod geometry;

pub use context::{provide_form, try_use_form, use_document, use_form};
pub use events::{Document, ListenerId, PointerEvent, SubmitEvent};
pub use form::{FieldValue, FormHandle, FormRecord};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
