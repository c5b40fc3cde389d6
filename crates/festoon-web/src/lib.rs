#![forbid(unsafe_code)]

//! Celebration page for Festoon effects.
//!
//! [`Celebration`] composes the particle field, confetti and stat counters
//! with the page embellishments. It is host-agnostic: the browser binding
//! (wasm32 only) supplies DOM-backed collaborators, and [`headless`] supplies
//! recording ones for native hosts and tests.

pub mod celebration;
pub mod config;
pub mod embellish;
pub mod error;
pub mod headless;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use celebration::{Celebration, Collaborators, PageBackend};
pub use config::PageConfig;
pub use embellish::{PageChrome, StyleTarget, Theme};
pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use wasm::CelebrationPage;

/// Native builds compile the browser binding as a stub so workspace checks
/// stay green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct CelebrationPage;

#[cfg(not(target_arch = "wasm32"))]
impl CelebrationPage {
    pub fn new() -> Self {
        Self
    }
}
