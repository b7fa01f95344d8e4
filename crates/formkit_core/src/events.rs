//! Event dispatch
//!
//! A pointer click is delivered twice by the host: once to the widget under
//! the pointer (the target phase, routed by the widgets themselves) and once
//! to every document-wide listener registered here. Widgets use the second
//! delivery for outside-click dismissal. The two deliveries may happen in
//! either order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Point;

/// A pointer press delivered by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: u8,
}

impl PointerEvent {
    /// Primary-button click at a point
    pub fn at(position: Point) -> Self {
        Self {
            position,
            button: 0,
        }
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::at(Point::new(x, y))
    }
}

/// Submission of a form
///
/// Submitting a form never navigates; the container marks the default
/// action prevented before it calls the submit handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

new_key_type! {
    /// Handle for a registered document listener
    pub struct ListenerId;
}

type ClickListener = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

/// Document-wide click listener registry
///
/// Cloning a `Document` yields another handle to the same registry.
#[derive(Clone)]
pub struct Document {
    listeners: Rc<RefCell<SlotMap<ListenerId, ClickListener>>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Register a listener that sees every click in the document
    pub fn add_click_listener<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        let listener: ClickListener = Rc::new(RefCell::new(listener));
        let id = self.listeners.borrow_mut().insert(listener);
        tracing::trace!(?id, "click listener registered");
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn remove_click_listener(&self, id: ListenerId) -> bool {
        let removed = self.listeners.borrow_mut().remove(id).is_some();
        if removed {
            tracing::trace!(?id, "click listener removed");
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver a click to every registered listener
    ///
    /// The registry is not borrowed while listeners run, so a listener may
    /// add or remove listeners (including itself). A listener that is
    /// already running further up the stack is skipped.
    pub fn dispatch_click(&self, event: &PointerEvent) {
        let listeners: Vec<ClickListener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (&mut *listener)(event);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
