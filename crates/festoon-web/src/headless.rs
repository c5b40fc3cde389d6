#![forbid(unsafe_code)]

//! In-memory page backend for native hosts and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use festoon_core::host::Detach;
use festoon_fx::headless::{RecordingMount, RecordingSurface, RecordingText};

use crate::celebration::PageBackend;
use crate::embellish::{PageChrome, StyleTarget};

/// Chrome that counts pulses and tracks flash overlays.
#[derive(Debug, Clone, Default)]
pub struct RecordingChrome {
    pulses: Rc<Cell<u32>>,
    flashes_shown: Rc<Cell<u32>>,
    flashes_live: Rc<Cell<u32>>,
}

impl RecordingChrome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pulses(&self) -> u32 {
        self.pulses.get()
    }

    #[must_use]
    pub fn flashes_shown(&self) -> u32 {
        self.flashes_shown.get()
    }

    /// Flash overlays currently on screen.
    #[must_use]
    pub fn flashes_live(&self) -> u32 {
        self.flashes_live.get()
    }
}

/// Handle to a recorded flash overlay.
#[derive(Debug)]
pub struct RecordedFlash {
    live: Rc<Cell<u32>>,
}

impl Detach for RecordedFlash {
    fn detach(self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

impl PageChrome for RecordingChrome {
    type Flash = RecordedFlash;

    fn pulse_body(&self) {
        self.pulses.set(self.pulses.get() + 1);
    }

    fn show_flash(&self) -> RecordedFlash {
        self.flashes_shown.set(self.flashes_shown.get() + 1);
        self.flashes_live.set(self.flashes_live.get() + 1);
        RecordedFlash {
            live: Rc::clone(&self.flashes_live),
        }
    }
}

impl PageBackend for RecordingChrome {
    type Surface = RecordingSurface;
    type Mount = RecordingMount;
    type Text = RecordingText;
}

/// Style target that keeps every `(property, value)` written. Clones share
/// the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingStyle {
    writes: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value written for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<String> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }
}

impl StyleTarget for RecordingStyle {
    fn set_style(&self, property: &str, value: &str) {
        self.writes
            .borrow_mut()
            .push((property.to_owned(), value.to_owned()));
    }
}
