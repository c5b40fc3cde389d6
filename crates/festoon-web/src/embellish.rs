#![forbid(unsafe_code)]

//! Page embellishments: card tilt, parallax, theme toggle, button press,
//! section fade-in and the birthday flash.
//!
//! Everything here is either a pure function from pointer or scroll input to
//! a CSS value, or a tiny state holder. The browser binding applies the
//! results to the page.

use std::collections::HashSet;
use std::fmt;

use festoon_core::geometry::{Point, Size};
use festoon_core::host::Detach;

/// Inline transform of a pressed button.
pub const PRESS_TRANSFORM: &str = "scale(0.95)";
/// Inline transform once the press is released.
pub const RELEASE_TRANSFORM: &str = "scale(1)";

/// Card transform while the pointer is outside.
pub const REST_TRANSFORM: &str =
    "perspective(1000px) rotateX(0) rotateY(0) translateY(-20px) scale(1.05)";

/// Body animation played when birthday mode starts.
pub const BODY_PULSE_ANIMATION: &str = "pulse-all 0.5s ease-out";
pub const BODY_PULSE_KEYFRAMES: &str =
    "@keyframes pulse-all { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.02); } }";

/// Inline style of the full-screen flash overlay.
pub const FLASH_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     background: white; z-index: 999; pointer-events: none; animation: flashAnimation 0.5s ease-out;";
pub const FLASH_KEYFRAMES: &str =
    "@keyframes flashAnimation { 0% { opacity: 1; } 100% { opacity: 0; } }";

/// Class toggled on `<body>` for the light theme.
pub const LIGHT_MODE_CLASS: &str = "light-mode";

/// Greeting logged shortly after startup.
pub const WELCOME_MESSAGE: &str =
    "🎉 Happy 18th Birthday! Press the Celebrate button or use the Konami Code! 🎉";

/// Divisor from pointer offset (px) to tilt (deg).
const TILT_DIVISOR: f64 = 10.0;

/// CSS number text. Negative zero prints as `0`.
fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

/// Rotation of a card for a pointer at `pointer` (card-relative px).
///
/// Returns `(rotate_x, rotate_y)` in degrees: the card leans toward the
/// pointer, one degree per ten pixels from its center.
#[must_use]
pub fn tilt_angles(pointer: Point, card: Size) -> (f64, f64) {
    let center_x = card.width_f64() / 2.0;
    let center_y = card.height_f64() / 2.0;
    (
        (pointer.y - center_y) / TILT_DIVISOR,
        (center_x - pointer.x) / TILT_DIVISOR,
    )
}

/// Full inline transform for a tilted card.
///
/// ```
/// use festoon_core::geometry::{Point, Size};
/// use festoon_web::embellish::tilt_transform;
///
/// assert_eq!(
///     tilt_transform(Point::new(0.0, 0.0), Size::new(200, 100)),
///     "perspective(1000px) rotateX(-5deg) rotateY(10deg) translateY(-20px) scale(1.05)"
/// );
/// ```
#[must_use]
pub fn tilt_transform(pointer: Point, card: Size) -> String {
    let (rx, ry) = tilt_angles(pointer, card);
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-20px) scale(1.05)",
        css_number(rx),
        css_number(ry)
    )
}

/// `background-position` for a page scrolled by `scroll_y` pixels.
#[must_use]
pub fn parallax_position(scroll_y: f64, factor: f64) -> String {
    let offset = css_number(scroll_y * factor);
    format!("{offset}px {offset}px")
}

/// Links that scroll within the page.
pub const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// Selector to smooth-scroll to when an in-page link with `href` is clicked.
///
/// A bare `#` is left to the browser.
#[must_use]
pub fn in_page_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href != "#").then_some(href)
}

/// Page color theme. Dark is the initial look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Whether [`LIGHT_MODE_CLASS`] belongs on `<body>`.
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Label for the toggle button: it offers the other theme.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "💡 Light Mode",
            Self::Light => "🌙 Dark Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

/// One-way fade-in bookkeeping for page sections.
#[derive(Debug, Clone, Default)]
pub struct SectionReveal {
    revealed: HashSet<String>,
}

impl SectionReveal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` intersected. Returns `true` the first time only.
    pub fn reveal(&mut self, id: &str) -> bool {
        if self.revealed.contains(id) {
            return false;
        }
        self.revealed.insert(id.to_owned())
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Opacity a section should show.
    #[must_use]
    pub fn opacity(&self, id: &str, rest: f64) -> f64 {
        if self.is_revealed(id) { 1.0 } else { rest }
    }
}

/// An element whose inline style can be written.
pub trait StyleTarget {
    fn set_style(&self, property: &str, value: &str);
}

/// Page-wide decorations that are not tied to one effect.
pub trait PageChrome {
    /// Handle to the flash overlay.
    type Flash: Detach + 'static;

    /// Start the body pulse animation.
    fn pulse_body(&self);

    /// Cover the page with the white flash overlay.
    fn show_flash(&self) -> Self::Flash;
}
