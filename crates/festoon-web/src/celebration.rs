#![forbid(unsafe_code)]

//! The celebration page as one owner.
//!
//! [`Celebration`] is built once when the page is ready. It owns the particle
//! field, the confetti emitter, one counter per statistic, and the small bits
//! of page state (theme, revealed sections, key-sequence progress). Input
//! handlers call into it; it never reaches for globals.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use festoon_core::geometry::Point;
use festoon_core::host::{Detach, HostServices, Viewport};
use festoon_core::key_sequence::{KONAMI_CODE, KeySequenceMatcher};
use festoon_core::locale::{Locale, detect_system_locale};
use festoon_fx::{
    BurstEmitter, ConfigError, MountPoint, ParticleField, Surface, TextTarget, ValueCounter,
};

use crate::config::PageConfig;
use crate::embellish::{
    PRESS_TRANSFORM, PageChrome, RELEASE_TRANSFORM, SectionReveal, StyleTarget, Theme,
    WELCOME_MESSAGE, parallax_position,
};

/// Concrete collaborator types for one host.
pub trait PageBackend: PageChrome + 'static {
    type Surface: Surface + 'static;
    type Mount: MountPoint + 'static;
    type Text: TextTarget + 'static;
}

/// Everything a [`Celebration`] is built from.
pub struct Collaborators<B: PageBackend> {
    pub chrome: B,
    pub surface: B::Surface,
    pub mount: B::Mount,
    pub services: HostServices,
    pub viewport: Rc<dyn Viewport>,
}

pub struct Celebration<B: PageBackend> {
    config: PageConfig,
    locale: Locale,
    chrome: B,
    services: HostServices,
    viewport: Rc<dyn Viewport>,
    field: Rc<RefCell<ParticleField<B::Surface>>>,
    confetti: BurstEmitter<B::Mount>,
    counters: RefCell<HashMap<String, ValueCounter<B::Text>>>,
    sections: RefCell<SectionReveal>,
    konami: RefCell<KeySequenceMatcher>,
    theme: Cell<Theme>,
    birthdays: Cell<u32>,
    started: Cell<bool>,
}

impl<B: PageBackend> fmt::Debug for Celebration<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Celebration")
            .field("locale", &self.locale)
            .field("theme", &self.theme.get())
            .field("stats", &self.counters.borrow().len())
            .field("birthdays", &self.birthdays.get())
            .finish_non_exhaustive()
    }
}

impl<B: PageBackend> Celebration<B> {
    /// Validate `config` and assemble the page.
    ///
    /// The surface is sized to the viewport before the particles are placed.
    pub fn new(parts: Collaborators<B>, config: PageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let Collaborators {
            chrome,
            mut surface,
            mount,
            services,
            viewport,
        } = parts;

        let locale = config
            .locale
            .as_deref()
            .map_or_else(detect_system_locale, Locale::new);

        surface.set_size(viewport.size());
        let field = ParticleField::new(surface, &*services.random, &config.effects.particles);
        let confetti = BurstEmitter::new(
            mount,
            services.clone(),
            Rc::clone(&viewport),
            config.effects.burst.clone(),
        );

        Ok(Self {
            config,
            locale,
            chrome,
            services,
            viewport,
            field: Rc::new(RefCell::new(field)),
            confetti,
            counters: RefCell::new(HashMap::new()),
            sections: RefCell::new(SectionReveal::new()),
            konami: RefCell::new(KeySequenceMatcher::new(KONAMI_CODE)),
            theme: Cell::new(Theme::default()),
            birthdays: Cell::new(0),
            started: Cell::new(false),
        })
    }

    /// Start the particle loop and queue the welcome greeting. Idempotent.
    pub fn start(&self) {
        if self.started.replace(true) {
            return;
        }
        ParticleField::start(&self.field, Rc::clone(&self.services.frames));
        self.services.timers.after(
            self.config.welcome_delay(),
            Box::new(|| tracing::info!("{WELCOME_MESSAGE}")),
        );
        tracing::info!(locale = %self.locale, "celebration started");
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn chrome(&self) -> &B {
        &self.chrome
    }

    #[must_use]
    pub fn field(&self) -> &Rc<RefCell<ParticleField<B::Surface>>> {
        &self.field
    }

    #[must_use]
    pub fn confetti(&self) -> &BurstEmitter<B::Mount> {
        &self.confetti
    }

    /// Times the key sequence has been completed.
    #[must_use]
    pub fn birthdays(&self) -> u32 {
        self.birthdays.get()
    }

    /// Follow a viewport resize.
    pub fn resize(&self) {
        self.field.borrow_mut().resize(self.viewport.size());
    }

    /// Celebrate button: a fullscreen shower. Returns the vibration pattern
    /// for the host to forward.
    pub fn celebrate(&self) -> &[u32] {
        self.confetti.fullscreen(self.config.celebrate_count);
        &self.config.vibration_ms
    }

    pub fn burst(&self, at: Point, count: usize) -> usize {
        self.confetti.burst(at, count)
    }

    pub fn fullscreen(&self, count: usize) -> usize {
        self.confetti.fullscreen(count)
    }

    /// Shrink `button`, then restore it after the release delay.
    pub fn press<S: StyleTarget + 'static>(&self, button: S) {
        button.set_style("transform", PRESS_TRANSFORM);
        self.services.timers.after(
            self.config.press_release(),
            Box::new(move || button.set_style("transform", RELEASE_TRANSFORM)),
        );
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme.get().toggled();
        self.theme.set(theme);
        tracing::debug!(%theme, "theme toggled");
        theme
    }

    /// A statistic scrolled into view.
    ///
    /// The first sighting of `id` builds a counter from `raw` and starts it;
    /// later sightings are ignored. Returns `true` when a counter was started.
    pub fn stat_visible(&self, id: &str, display: B::Text, raw: &str) -> bool {
        let mut counters = self.counters.borrow_mut();
        if counters.contains_key(id) {
            return false;
        }
        let counter = ValueCounter::new(
            display,
            raw,
            self.locale.clone(),
            Rc::clone(&self.services.frames),
            Rc::clone(&self.services.clock),
        )
        .with_frame_hint(self.config.effects.counter.frame_hint());
        counter.animate(self.config.effects.counter.duration());
        counters.insert(id.to_owned(), counter);
        true
    }

    /// The counter for `id`, if it has been seen.
    #[must_use]
    pub fn stat(&self, id: &str) -> Option<ValueCounter<B::Text>> {
        self.counters.borrow().get(id).cloned()
    }

    /// A section scrolled into view. Returns `true` the first time.
    pub fn section_visible(&self, id: &str) -> bool {
        self.sections.borrow_mut().reveal(id)
    }

    #[must_use]
    pub fn section_opacity(&self, id: &str) -> f64 {
        self.sections
            .borrow()
            .opacity(id, self.config.section_rest_opacity)
    }

    /// `background-position` for the gradient layer at `scroll_y`.
    #[must_use]
    pub fn parallax(&self, scroll_y: f64) -> String {
        parallax_position(scroll_y, self.config.parallax_factor)
    }

    /// Feed one key press to the easter-egg matcher.
    ///
    /// Returns `true` if this key completed the sequence.
    pub fn key_down(&self, key: &str) -> bool {
        let action = self.konami.borrow_mut().feed(key);
        if action.is_complete() {
            self.birthday_mode();
            return true;
        }
        false
    }

    /// Confetti, a body pulse and a brief white flash.
    pub fn birthday_mode(&self) {
        self.confetti.fullscreen(self.config.birthday_count);
        self.chrome.pulse_body();
        let flash = self.chrome.show_flash();
        self.services
            .timers
            .after(self.config.flash(), Box::new(move || flash.detach()));
        self.birthdays.set(self.birthdays.get() + 1);
        tracing::info!(count = self.birthdays.get(), "birthday mode");
    }
}
