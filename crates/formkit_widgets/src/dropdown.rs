//! Dropdown widget
//!
//! A trigger button plus a content panel of items, with two states:
//! Closed (initial) and Open.
//!
//! - Closed -> Open: the trigger is clicked
//! - Open -> Closed: the trigger is clicked again, a click lands outside
//!   the widget, a plain item is chosen, or the widget is dropped
//!
//! Checkbox items never close the menu, so several can be toggled in one
//! open session.
//!
//! Outside clicks are seen through a listener on the [`Document`],
//! registered for exactly as long as the widget exists. "Outside" means the
//! click point is not contained in the widget's boundary: the trigger rect,
//! plus the content rect while open. A widget that was never laid out has
//! no boundary, so every click is outside it.
//!
//! # Example
//!
//! ```rust
//! use formkit_core::{Document, PointerEvent, Rect};
//! use formkit_widgets::dropdown::{Dropdown, DropdownItem};
//!
//! let document = Document::new();
//! let mut menu = Dropdown::new(
//!     "Sections",
//!     vec![
//!         DropdownItem::checkbox("News", false),
//!         DropdownItem::plain("Done").on_select(|| println!("done")),
//!     ],
//!     &document,
//! );
//! menu.layout(Rect::new(0.0, 0.0, 200.0, 40.0), 32.0);
//!
//! menu.handle_click(&PointerEvent::click(10.0, 10.0));
//! assert!(menu.is_open());
//!
//! document.dispatch_click(&PointerEvent::click(500.0, 500.0));
//! assert!(!menu.is_open());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use formkit_core::fsm::{EventId, StateId, StateMachine, Transition};
use formkit_core::{Document, ListenerId, Point, PointerEvent, Rect};
use serde::Serialize;

/// Dropdown states
pub mod states {
    use formkit_core::fsm::StateId;

    pub const CLOSED: StateId = 0;
    pub const OPEN: StateId = 1;
}

/// Dropdown events
pub mod events {
    use formkit_core::fsm::EventId;

    pub const TRIGGER_CLICK: EventId = 1;
    pub const OUTSIDE_CLICK: EventId = 2;
    pub const ITEM_SELECTED: EventId = 3;
    pub const UNMOUNT: EventId = 4;
    pub const CLOSE: EventId = 5;
}

/// Action run when a plain item is chosen
pub type SelectAction = Box<dyn FnMut()>;

/// Action run when a checkbox item is toggled; receives the new checked flag
pub type ToggleAction = Box<dyn FnMut(bool)>;

/// One entry of a dropdown's content panel
pub enum DropdownItem {
    /// Closes the menu after its action runs
    Plain {
        content: String,
        on_select: Option<SelectAction>,
    },
    /// Leaves the menu open
    Checkbox {
        label: String,
        checked: bool,
        on_toggle: Option<ToggleAction>,
    },
}

impl DropdownItem {
    pub fn plain(content: impl Into<String>) -> Self {
        DropdownItem::Plain {
            content: content.into(),
            on_select: None,
        }
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        DropdownItem::Checkbox {
            label: label.into(),
            checked,
            on_toggle: None,
        }
    }

    /// Set the action of a plain item; checkbox items are returned unchanged
    pub fn on_select<F: FnMut() + 'static>(self, action: F) -> Self {
        match self {
            DropdownItem::Plain { content, .. } => DropdownItem::Plain {
                content,
                on_select: Some(Box::new(action)),
            },
            checkbox => checkbox,
        }
    }

    /// Set the action of a checkbox item; plain items are returned unchanged
    pub fn on_toggle<F: FnMut(bool) + 'static>(self, action: F) -> Self {
        match self {
            DropdownItem::Checkbox { label, checked, .. } => DropdownItem::Checkbox {
                label,
                checked,
                on_toggle: Some(Box::new(action)),
            },
            plain => plain,
        }
    }

    /// Whether choosing this item closes the parent dropdown
    pub fn closes_menu(&self) -> bool {
        match self {
            DropdownItem::Plain { .. } => true,
            DropdownItem::Checkbox { .. } => false,
        }
    }

    /// Content of a plain item or label of a checkbox item
    pub fn text(&self) -> &str {
        match self {
            DropdownItem::Plain { content, .. } => content,
            DropdownItem::Checkbox { label, .. } => label,
        }
    }

    pub fn is_checked(&self) -> Option<bool> {
        match self {
            DropdownItem::Plain { .. } => None,
            DropdownItem::Checkbox { checked, .. } => Some(*checked),
        }
    }

    fn activate(&mut self) {
        match self {
            DropdownItem::Plain { on_select, .. } => {
                if let Some(action) = on_select {
                    action();
                }
            }
            DropdownItem::Checkbox {
                checked, on_toggle, ..
            } => {
                *checked = !*checked;
                if let Some(action) = on_toggle {
                    action(*checked);
                }
            }
        }
    }

    pub fn view(&self) -> ItemView {
        match self {
            DropdownItem::Plain { content, .. } => ItemView::Plain {
                content: content.clone(),
            },
            DropdownItem::Checkbox { label, checked, .. } => ItemView::Checkbox {
                label: label.clone(),
                checked: *checked,
            },
        }
    }
}

impl fmt::Debug for DropdownItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropdownItem::Plain { content, on_select } => f
                .debug_struct("Plain")
                .field("content", content)
                .field("has_action", &on_select.is_some())
                .finish(),
            DropdownItem::Checkbox {
                label,
                checked,
                on_toggle,
            } => f
                .debug_struct("Checkbox")
                .field("label", label)
                .field("checked", checked)
                .field("has_action", &on_toggle.is_some())
                .finish(),
        }
    }
}

/// Rendered item
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemView {
    Plain { content: String },
    Checkbox { label: String, checked: bool },
}

/// Direction of the trigger's chevron icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chevron {
    Up,
    Down,
}

/// Rendered dropdown
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub trigger_label: String,
    pub open: bool,
    pub chevron: Chevron,
    /// Empty while closed
    pub items: Vec<ItemView>,
}

/// Trigger and content rects assigned by `layout`
#[derive(Clone, Copy, Debug)]
struct Boundary {
    trigger: Rect,
    content: Rect,
}

/// Open state and boundary, shared with the document listener
struct DropdownState {
    fsm: StateMachine,
    boundary: Option<Boundary>,
}

impl DropdownState {
    fn new() -> Self {
        Self {
            fsm: menu_fsm(),
            boundary: None,
        }
    }

    fn is_open(&self) -> bool {
        self.fsm.is_in(states::OPEN)
    }

    fn contains(&self, point: Point) -> bool {
        let open = self.is_open();
        self.boundary.is_some_and(|boundary| {
            boundary.trigger.contains(point) || (open && boundary.content.contains(point))
        })
    }

    fn send(&mut self, event: EventId) -> StateId {
        self.fsm.send(event)
    }
}

fn menu_fsm() -> StateMachine {
    use events::*;
    use states::*;

    StateMachine::builder(CLOSED)
        .on(CLOSED, TRIGGER_CLICK, OPEN)
        .on(OPEN, TRIGGER_CLICK, CLOSED)
        .on(OPEN, OUTSIDE_CLICK, CLOSED)
        .on(OPEN, ITEM_SELECTED, CLOSED)
        .on(OPEN, UNMOUNT, CLOSED)
        .on(OPEN, CLOSE, CLOSED)
        .on_enter(OPEN, || tracing::debug!("dropdown opened"))
        .on_exit(OPEN, || tracing::debug!("dropdown closed"))
        .build()
}

fn outside_click_listener(state: Weak<RefCell<DropdownState>>) -> impl FnMut(&PointerEvent) {
    move |event| {
        let Some(state) = state.upgrade() else {
            return;
        };
        let Ok(mut state) = state.try_borrow_mut() else {
            return;
        };
        if state.is_open() && !state.contains(event.position) {
            tracing::debug!(x = event.position.x, y = event.position.y, "outside click closes dropdown");
            state.send(events::OUTSIDE_CLICK);
        }
    }
}

/// Read-only view of a dropdown's open state
///
/// Stays valid after the dropdown is dropped and then reports closed.
#[derive(Clone)]
pub struct OpenFlag {
    state: Weak<RefCell<DropdownState>>,
}

impl OpenFlag {
    pub fn is_open(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().is_open())
    }
}

/// Dropdown widget
pub struct Dropdown {
    trigger_label: String,
    items: Vec<DropdownItem>,
    item_bounds: Vec<Rect>,
    state: Rc<RefCell<DropdownState>>,
    document: Document,
    listener: ListenerId,
}

impl Dropdown {
    /// Create a closed dropdown and register its outside-click listener
    pub fn new(
        trigger_label: impl Into<String>,
        items: Vec<DropdownItem>,
        document: &Document,
    ) -> Self {
        let state = Rc::new(RefCell::new(DropdownState::new()));
        let listener = document.add_click_listener(outside_click_listener(Rc::downgrade(&state)));

        Self {
            trigger_label: trigger_label.into(),
            items,
            item_bounds: Vec::new(),
            state,
            document: document.clone(),
            listener,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn open_flag(&self) -> OpenFlag {
        OpenFlag {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn trigger_label(&self) -> &str {
        &self.trigger_label
    }

    pub fn set_trigger_label(&mut self, label: impl Into<String>) {
        self.trigger_label = label.into();
    }

    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    /// Place the trigger at `trigger` and stack the items below it
    pub fn layout(&mut self, trigger: Rect, item_height: f32) {
        let content = trigger.below(item_height * self.items.len() as f32);
        self.item_bounds = (0..self.items.len())
            .map(|index| {
                Rect::new(
                    content.x(),
                    content.y() + item_height * index as f32,
                    content.width(),
                    item_height,
                )
            })
            .collect();

        self.state.borrow_mut().boundary = Some(Boundary { trigger, content });
    }

    /// `None` until the widget is laid out
    pub fn trigger_bounds(&self) -> Option<Rect> {
        self.state.borrow().boundary.map(|boundary| boundary.trigger)
    }

    pub fn content_bounds(&self) -> Option<Rect> {
        self.state.borrow().boundary.map(|boundary| boundary.content)
    }

    pub fn item_bounds(&self, index: usize) -> Option<Rect> {
        self.item_bounds.get(index).copied()
    }

    /// Whether `point` lies within the widget's current boundary
    pub fn contains(&self, point: Point) -> bool {
        self.state.borrow().contains(point)
    }

    pub fn toggle(&mut self) {
        tracing::trace!(label = %self.trigger_label, "dropdown toggle");
        self.state.borrow_mut().send(events::TRIGGER_CLICK);
    }

    /// Close the menu; closing a closed menu does nothing
    pub fn close(&mut self) {
        self.state.borrow_mut().send(events::CLOSE);
    }

    /// Open/close transitions taken so far, oldest first
    pub fn history(&self) -> Vec<Transition> {
        self.state.borrow().fsm.history().to_vec()
    }

    /// Target-phase click handling
    ///
    /// Returns true when the click hit the trigger or the open content
    /// panel.
    pub fn handle_click(&mut self, event: &PointerEvent) -> bool {
        let point = event.position;
        let (on_trigger, open, in_content) = {
            let state = self.state.borrow();
            let Some(boundary) = state.boundary else {
                return false;
            };
            (
                boundary.trigger.contains(point),
                state.is_open(),
                boundary.content.contains(point),
            )
        };

        if on_trigger {
            self.toggle();
            return true;
        }
        if !open {
            return false;
        }
        let hit = self.item_bounds.iter().position(|bounds| bounds.contains(point));
        match hit {
            Some(index) => self.select(index),
            None => in_content,
        }
    }

    /// Choose the item at `index`
    ///
    /// The item's own action runs first. Plain items then close the menu;
    /// checkbox items leave it as it is.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        let closes = item.closes_menu();
        tracing::debug!(index, item = item.text(), closes, "dropdown item chosen");

        item.activate();
        if closes {
            self.state.borrow_mut().send(events::ITEM_SELECTED);
        }
        true
    }

    pub fn view(&self) -> DropdownView {
        let open = self.is_open();
        DropdownView {
            trigger_label: self.trigger_label.clone(),
            open,
            chevron: if open { Chevron::Up } else { Chevron::Down },
            items: if open {
                self.items.iter().map(DropdownItem::view).collect()
            } else {
                Vec::new()
            },
        }
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        self.document.remove_click_listener(self.listener);
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.send(events::UNMOUNT);
        }
    }
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("trigger_label", &self.trigger_label)
            .field("open", &self.is_open())
            .field("items", &self.items)
            .finish()
    }
}
