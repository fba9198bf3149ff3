//! Per-event callback slots.
//!
//! Each event kind has one slot with two independent call shapes: a handler
//! that receives the engine identifier, and a no-argument handler. When both
//! are installed, both run on every occurrence, identifier-style first.

/// Event kinds delivered to user callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Press,
    Hold,
    Release,
}

/// Handler that receives the engine identifier.
pub type IdHandler<'a, Id> = &'a dyn Fn(Id);

/// Handler that takes no arguments.
pub type PlainHandler<'a> = &'a dyn Fn();

/// Callback slot for a single event kind.
pub struct CallbackSlot<'a, Id> {
    with_id: Option<IdHandler<'a, Id>>,
    plain: Option<PlainHandler<'a>>,
}

impl<Id> Default for CallbackSlot<'_, Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, Id> CallbackSlot<'a, Id> {
    pub const fn new() -> Self {
        Self {
            with_id: None,
            plain: None,
        }
    }

    /// Installs or, with `None`, removes the identifier-style handler.
    pub fn set_with_id(&mut self, handler: Option<IdHandler<'a, Id>>) {
        self.with_id = handler;
    }

    /// Installs or, with `None`, removes the no-argument handler.
    pub fn set_plain(&mut self, handler: Option<PlainHandler<'a>>) {
        self.plain = handler;
    }

    /// Removes both handlers.
    pub fn clear(&mut self) {
        self.with_id = None;
        self.plain = None;
    }

    /// True if any handler is installed.
    pub fn is_enabled(&self) -> bool {
        self.with_id.is_some() || self.plain.is_some()
    }
}

impl<Id: Copy> CallbackSlot<'_, Id> {
    /// Runs whichever handlers are installed.
    pub fn fire(&self, id: Id) {
        if let Some(handler) = self.with_id {
            handler(id);
        }
        if let Some(handler) = self.plain {
            handler();
        }
    }
}

/// The three slots of an engine.
pub struct Callbacks<'a, Id> {
    press: CallbackSlot<'a, Id>,
    hold: CallbackSlot<'a, Id>,
    release: CallbackSlot<'a, Id>,
}

impl<Id> Default for Callbacks<'_, Id> {
    fn default() -> Self {
        Self {
            press: CallbackSlot::new(),
            hold: CallbackSlot::new(),
            release: CallbackSlot::new(),
        }
    }
}

impl<'a, Id> Callbacks<'a, Id> {
    pub fn slot(&self, kind: EventKind) -> &CallbackSlot<'a, Id> {
        match kind {
            EventKind::Press => &self.press,
            EventKind::Hold => &self.hold,
            EventKind::Release => &self.release,
        }
    }

    pub fn slot_mut(&mut self, kind: EventKind) -> &mut CallbackSlot<'a, Id> {
        match kind {
            EventKind::Press => &mut self.press,
            EventKind::Hold => &mut self.hold,
            EventKind::Release => &mut self.release,
        }
    }
}

impl<Id: Copy> Callbacks<'_, Id> {
    pub fn fire(&self, kind: EventKind, id: Id) {
        self.slot(kind).fire(id);
    }
}
