#![forbid(unsafe_code)]

//! In-memory collaborators.
//!
//! Recording implementations of [`Surface`], [`MountPoint`] and
//! [`TextTarget`] that keep what they were asked to do instead of touching a
//! page. They back the test suites and let native hosts run the effects
//! without a browser.

use std::cell::RefCell;
use std::rc::Rc;

use festoon_core::color::Color;
use festoon_core::geometry::{Point, Size};
use festoon_core::host::Detach;

use crate::confetti::{ConfettiPiece, MountPoint};
use crate::counter::TextTarget;
use crate::particles::Surface;

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle {
        center: Point,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    ResetAlpha,
}

/// Surface that logs the current frame's commands.
///
/// `clear()` starts a new frame, so [`ops`](Self::ops) always shows the
/// latest frame from its `Clear` onwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    global_alpha: f64,
    clears: u64,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
            global_alpha: 1.0,
            clears: 0,
        }
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    #[must_use]
    pub fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    /// Number of frames started.
    #[must_use]
    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.ops.clear();
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        self.global_alpha = alpha;
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn reset_alpha(&mut self) {
        self.global_alpha = 1.0;
        self.ops.push(DrawOp::ResetAlpha);
    }
}

#[derive(Debug, Default)]
struct MountLog {
    pieces: Vec<ConfettiPiece>,
    attached: Vec<bool>,
}

/// Mount point that remembers every piece and whether it is still attached.
#[derive(Debug, Clone, Default)]
pub struct RecordingMount {
    log: Rc<RefCell<MountLog>>,
}

impl RecordingMount {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pieces currently attached.
    #[must_use]
    pub fn live(&self) -> usize {
        self.log.borrow().attached.iter().filter(|a| **a).count()
    }

    /// Pieces ever mounted.
    #[must_use]
    pub fn total_mounted(&self) -> usize {
        self.log.borrow().pieces.len()
    }

    /// Every piece ever mounted, in mount order.
    #[must_use]
    pub fn mounted(&self) -> Vec<ConfettiPiece> {
        self.log.borrow().pieces.clone()
    }
}

/// Handle to a piece held by a [`RecordingMount`].
#[derive(Debug)]
pub struct RecordedPiece {
    index: usize,
    log: Rc<RefCell<MountLog>>,
}

impl Detach for RecordedPiece {
    fn detach(self) {
        if let Some(slot) = self.log.borrow_mut().attached.get_mut(self.index) {
            *slot = false;
        }
    }
}

impl MountPoint for RecordingMount {
    type Handle = RecordedPiece;

    fn mount(&self, piece: &ConfettiPiece) -> RecordedPiece {
        let mut log = self.log.borrow_mut();
        log.pieces.push(*piece);
        log.attached.push(true);
        RecordedPiece {
            index: log.pieces.len() - 1,
            log: Rc::clone(&self.log),
        }
    }
}

/// Text target that keeps every value written to it. Clones share history.
#[derive(Debug, Clone, Default)]
pub struct RecordingText {
    history: Rc<RefCell<Vec<String>>>,
}

impl RecordingText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest text, or empty if never written.
    #[must_use]
    pub fn text(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl TextTarget for RecordingText {
    fn set_text(&self, text: &str) {
        self.history.borrow_mut().push(text.to_owned());
    }
}
