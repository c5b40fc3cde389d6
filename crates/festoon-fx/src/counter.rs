#![forbid(unsafe_code)]

//! Count-up animation for statistics.
//!
//! A [`ValueCounter`] shows a number climbing from zero to its target over a
//! fixed duration, formatted with the locale's thousands separator. Progress
//! is measured on the host clock, not by counting frames, so dropped frames
//! only make the animation coarser, never longer.
//!
//! Targets that are not numbers are shown verbatim and never animate.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use festoon_core::animation::Timeline;
use festoon_core::host::{Clock, FrameScheduler};
use festoon_core::locale::Locale;

/// Default frame length assumed by the per-frame increment hint.
pub const NOMINAL_FRAME: Duration = Duration::from_millis(16);

/// Count-up length used by [`ValueCounter::animate_default`].
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// What a counter counts up to, decided once from the raw attribute text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterTarget {
    Numeric(i64),
    Literal(String),
}

impl CounterTarget {
    /// Classify raw text.
    ///
    /// Text counts as a number when the whole of it, trimmed, reads as a
    /// numeric literal: decimal with optional sign, fraction and exponent, or
    /// unsigned `0x`/`0o`/`0b` radix form. The value is then the leading
    /// integer of the text (`"1e3"` counts to 1, `"0x10"` to 16), saturating
    /// at the `i64` bounds. Text that is numeric but has no leading integer
    /// (empty, `".5"`, `"Infinity"`) stays literal, as does everything else.
    ///
    /// ```
    /// use festoon_fx::counter::CounterTarget;
    ///
    /// assert_eq!(CounterTarget::parse(" 42 "), CounterTarget::Numeric(42));
    /// assert_eq!(CounterTarget::parse("9.9"), CounterTarget::Numeric(9));
    /// assert_eq!(CounterTarget::parse("N/A"), CounterTarget::Literal("N/A".into()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_numeric_literal(trimmed)
            && let Some(value) = leading_integer(trimmed)
        {
            return Self::Numeric(value);
        }
        Self::Literal(raw.to_owned())
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

fn all_digits(text: &str, radix: u32) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_digit(radix))
}

fn radix_prefix(text: &str) -> Option<(u32, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

/// Whole-text numeric literal check. `text` is already trimmed.
fn is_numeric_literal(text: &str) -> bool {
    if let Some((radix, digits)) = radix_prefix(text) {
        return all_digits(digits, radix);
    }
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return true;
    }
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    if let Some(exponent) = exponent {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if !all_digits(exponent, 10) {
            return false;
        }
    }
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    (!whole.is_empty() || !fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

/// Leading integer of `text`: optional sign, then decimal digits, or hex
/// digits after `0x`. Stops at the first other character.
fn leading_integer(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match radix_prefix(unsigned) {
        Some((16, rest)) => (16, rest),
        _ => (10, unsigned),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen = true;
        let digit = i64::from(digit);
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(if negative { -digit } else { digit });
    }
    seen.then_some(value)
}

impl From<&str> for CounterTarget {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<i64> for CounterTarget {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

/// Where the counter writes its text.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

impl<T: TextTarget + ?Sized> TextTarget for Rc<T> {
    fn set_text(&self, text: &str) {
        (**self).set_text(text);
    }
}

/// Lifecycle of a counter. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

struct CounterState<T> {
    display: T,
    target: CounterTarget,
    locale: Locale,
    phase: CounterPhase,
    current: i64,
    increment: f64,
    frame_hint: Duration,
    timeline: Option<Timeline>,
}

impl<T: TextTarget> CounterState<T> {
    /// Render the value for `now`. Returns `true` once the target is shown.
    fn update(&mut self, now: Duration) -> bool {
        let (CounterTarget::Numeric(target), Some(timeline)) = (&self.target, self.timeline) else {
            return true;
        };
        let target = *target;
        let progress = timeline.progress_at(now).clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.current = target;
            self.display.set_text(&self.locale.format_integer(target));
            self.phase = CounterPhase::Finished;
            tracing::debug!(value = target, "counter finished");
            return true;
        }
        self.current = (target as f64 * progress).floor() as i64;
        self.display.set_text(&self.locale.format_integer(self.current));
        false
    }
}

/// One-shot count-up bound to a text target. Cheap to clone.
pub struct ValueCounter<T> {
    state: Rc<RefCell<CounterState<T>>>,
    frames: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
}

impl<T> Clone for ValueCounter<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            frames: Rc::clone(&self.frames),
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<T> fmt::Debug for ValueCounter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ValueCounter")
            .field("target", &state.target)
            .field("phase", &state.phase)
            .field("current", &state.current)
            .finish_non_exhaustive()
    }
}

impl<T: TextTarget + 'static> ValueCounter<T> {
    pub fn new(
        display: T,
        target: impl Into<CounterTarget>,
        locale: Locale,
        frames: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(CounterState {
                display,
                target: target.into(),
                locale,
                phase: CounterPhase::Idle,
                current: 0,
                increment: 0.0,
                frame_hint: NOMINAL_FRAME,
                timeline: None,
            })),
            frames,
            clock,
        }
    }

    /// Assume `frame` pacing when computing [`frame_increment`](Self::frame_increment).
    #[must_use]
    pub fn with_frame_hint(self, frame: Duration) -> Self {
        self.state.borrow_mut().frame_hint = frame;
        self
    }

    #[must_use]
    pub fn target(&self) -> CounterTarget {
        self.state.borrow().target.clone()
    }

    #[must_use]
    pub fn phase(&self) -> CounterPhase {
        self.state.borrow().phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == CounterPhase::Running
    }

    /// Last value written to the display.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.state.borrow().current
    }

    /// Expected per-frame step at the hinted frame pacing. Informational.
    #[must_use]
    pub fn frame_increment(&self) -> f64 {
        self.state.borrow().increment
    }

    /// [`animate`](Self::animate) over [`DEFAULT_DURATION`].
    pub fn animate_default(&self) {
        self.animate(DEFAULT_DURATION);
    }

    /// Count up to the target over `duration`.
    ///
    /// Literal targets are displayed at once and schedule nothing. A counter
    /// that is running or has finished ignores the call.
    pub fn animate(&self, duration: Duration) {
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            if state.phase != CounterPhase::Idle {
                return;
            }
            let target = match &state.target {
                CounterTarget::Literal(text) => {
                    state.display.set_text(text);
                    state.phase = CounterPhase::Finished;
                    return;
                }
                CounterTarget::Numeric(value) => *value,
            };

            let hint = state.frame_hint.as_secs_f64();
            let frames = if hint > 0.0 { duration.as_secs_f64() / hint } else { 0.0 };
            state.increment = if frames > 0.0 {
                target as f64 / frames
            } else {
                target as f64
            };
            state.timeline = Some(Timeline::starting_at(self.clock.now(), duration));
            state.phase = CounterPhase::Running;
            tracing::trace!(
                value = target,
                duration_ms = duration.as_millis() as u64,
                "counter started"
            );
        }
        schedule_update(
            Rc::clone(&self.state),
            Rc::clone(&self.frames),
            Rc::clone(&self.clock),
        );
    }
}

fn schedule_update<T: TextTarget + 'static>(
    state: Rc<RefCell<CounterState<T>>>,
    frames: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
) {
    let scheduler = Rc::clone(&frames);
    frames.request_frame(Box::new(move || {
        let done = state.borrow_mut().update(clock.now());
        if !done {
            schedule_update(state, scheduler, clock);
        }
    }));
}
