#![forbid(unsafe_code)]

//! Browser binding.
//!
//! DOM-backed collaborators for [`Celebration`] and the `wasm-bindgen`
//! entry point that wires page events to it. Element ids and class names
//! follow the celebration page markup: `#particleCanvas`,
//! `#confettiContainer`, `#confettiBtn`, `#lightBtn`, `.stat-card`,
//! `.stat-number[data-target]`, `.feature-card`, `.gradient-bg`, `section`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use festoon_core::color::Color;
use festoon_core::geometry::{Point, Size};
use festoon_core::host::{
    Clock, DelayScheduler, Detach, FrameScheduler, HostServices, Task, Viewport,
};
use festoon_core::random::{RandomSource, SeededRandom};
use festoon_fx::confetti::PIECE_CLASS;
use festoon_fx::{ConfettiPiece, MountPoint, Surface, TextTarget};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent, Performance, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::celebration::{Celebration, Collaborators, PageBackend};
use crate::config::PageConfig;
use crate::embellish::{
    BODY_PULSE_ANIMATION, BODY_PULSE_KEYFRAMES, FLASH_KEYFRAMES, FLASH_STYLE,
    IN_PAGE_LINK_SELECTOR, LIGHT_MODE_CLASS, PageChrome, REST_TRANSFORM, StyleTarget,
    in_page_target, tilt_transform,
};
use crate::error::WebError;

const STAT_ID_ATTR: &str = "data-festoon-stat";
const SECTION_ID_ATTR: &str = "data-festoon-section";

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn js_error(err: JsValue) -> WebError {
    WebError::Js(format!("{err:?}"))
}

// ---------------------------------------------------------------------------
// Scheduling, time, entropy, viewport
// ---------------------------------------------------------------------------

struct BrowserHost {
    window: Window,
    performance: Option<Performance>,
}

impl FrameScheduler for BrowserHost {
    fn request_frame(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            tracing::warn!(?err, "requestAnimationFrame failed");
        }
    }
}

impl DelayScheduler for BrowserHost {
    fn after(&self, delay: Duration, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        {
            tracing::warn!(?err, "setTimeout failed");
        }
    }
}

impl Clock for BrowserHost {
    fn now(&self) -> Duration {
        let ms = self
            .performance
            .as_ref()
            .map_or_else(js_sys::Date::now, Performance::now);
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
    }
}

impl Viewport for BrowserHost {
    fn size(&self) -> Size {
        let dim = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        Size::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }
}

/// `Math.random()`.
struct MathRandom;

impl RandomSource for MathRandom {
    fn next_unit(&self) -> f64 {
        js_sys::Math::random()
    }
}

// ---------------------------------------------------------------------------
// DOM collaborators
// ---------------------------------------------------------------------------

/// `<canvas>` 2D context as a particle surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, WebError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(WebError::Unsupported("canvas 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WebError::Unsupported("canvas 2d context"))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, size: Size) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width_f64(), size.height_f64());
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.set_global_alpha(alpha);
        self.ctx.fill();
    }

    fn reset_alpha(&mut self) {
        self.ctx.set_global_alpha(1.0);
    }
}

/// An element that removes itself on detach. Empty if creation failed.
pub struct DomNode(Option<Element>);

impl Detach for DomNode {
    fn detach(self) {
        if let Some(element) = self.0 {
            element.remove();
        }
    }
}

/// The confetti container.
pub struct DomMount {
    document: Document,
    container: Element,
}

impl MountPoint for DomMount {
    type Handle = DomNode;

    fn mount(&self, piece: &ConfettiPiece) -> DomNode {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(err) => {
                tracing::warn!(?err, "confetti element not created");
                return DomNode(None);
            }
        };
        element.set_class_name(PIECE_CLASS);
        if element.set_attribute("style", &piece.inline_style()).is_err()
            || self.container.append_child(&element).is_err()
        {
            return DomNode(None);
        }
        DomNode(Some(element))
    }
}

/// A stat number's text.
pub struct DomText(Element);

impl TextTarget for DomText {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// Inline style of one element.
pub struct DomStyle(HtmlElement);

impl StyleTarget for DomStyle {
    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.0.style().set_property(property, value) {
            tracing::trace!(?err, property, "style not applied");
        }
    }
}

/// Body pulse and flash overlay.
pub struct BrowserChrome {
    document: Document,
    pulse_keyframes: Cell<bool>,
    flash_keyframes: Cell<bool>,
}

impl BrowserChrome {
    fn install_keyframes(&self, installed: &Cell<bool>, css: &str) {
        if installed.get() {
            return;
        }
        let Some(head) = self.document.head() else {
            return;
        };
        if let Ok(style) = self.document.create_element("style") {
            style.set_text_content(Some(css));
            if head.append_child(&style).is_ok() {
                installed.set(true);
            }
        }
    }
}

impl PageChrome for BrowserChrome {
    type Flash = DomNode;

    fn pulse_body(&self) {
        self.install_keyframes(&self.pulse_keyframes, BODY_PULSE_KEYFRAMES);
        if let Some(body) = self.document.body() {
            DomStyle(body).set_style("animation", BODY_PULSE_ANIMATION);
        }
    }

    fn show_flash(&self) -> DomNode {
        self.install_keyframes(&self.flash_keyframes, FLASH_KEYFRAMES);
        let (Some(body), Ok(flash)) = (self.document.body(), self.document.create_element("div"))
        else {
            return DomNode(None);
        };
        if flash.set_attribute("style", FLASH_STYLE).is_err() || body.append_child(&flash).is_err() {
            return DomNode(None);
        }
        DomNode(Some(flash))
    }
}

impl PageBackend for BrowserChrome {
    type Surface = CanvasSurface;
    type Mount = DomMount;
    type Text = DomText;
}

type Page = Celebration<BrowserChrome>;

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, WebError> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn observe(
    elements: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_visible: impl FnMut(&Element) -> bool + 'static,
) -> Result<(), WebError> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    if on_visible(&target) {
                        observer.unobserve(&target);
                    }
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(js_error)?;
    callback.forget();
    for element in elements {
        observer.observe(element);
    }
    Ok(())
}

fn install_listeners(page: &Rc<Page>, window: &Window, document: &Document) -> Result<(), WebError> {
    let p = Rc::clone(page);
    listen(window, "resize", move |_| p.resize())?;

    let p = Rc::clone(page);
    listen(document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            p.key_down(&key.key());
        }
    })?;

    if let Ok(Some(gradient)) = document.query_selector(".gradient-bg")
        && let Ok(gradient) = gradient.dyn_into::<HtmlElement>()
    {
        let p = Rc::clone(page);
        let w = window.clone();
        listen(window, "scroll", move |_| {
            let scroll_y = w.scroll_y().unwrap_or(0.0);
            DomStyle(gradient.clone()).set_style("background-position", &p.parallax(scroll_y));
        })?;
    }

    if let Some(button) = document.get_element_by_id("confettiBtn") {
        let p = Rc::clone(page);
        let navigator = window.navigator();
        listen(&button, "click", move |_| {
            let pattern: js_sys::Array = p
                .celebrate()
                .iter()
                .map(|ms| JsValue::from(*ms))
                .collect();
            navigator.vibrate_with_pattern(&pattern);
        })?;
    }

    if let Some(button) = document.get_element_by_id("lightBtn")
        && let Ok(button) = button.dyn_into::<HtmlElement>()
    {
        let p = Rc::clone(page);
        let body = document.body();
        let target = button.clone();
        listen(&button, "click", move |_| {
            let theme = p.toggle_theme();
            if let Some(body) = &body
                && let Err(err) = body
                    .class_list()
                    .toggle_with_force(LIGHT_MODE_CLASS, theme.is_light())
            {
                tracing::trace!(?err, "theme class not toggled");
            }
            target.set_text_content(Some(theme.toggle_label()));
            p.press(DomStyle(target.clone()));
        })?;
    }

    for link in query_all(document, IN_PAGE_LINK_SELECTOR)? {
        let target = link.clone();
        let doc = document.clone();
        listen(&link, "click", move |event| {
            let href = target.get_attribute("href").unwrap_or_default();
            let Some(selector) = in_page_target(&href) else {
                return;
            };
            event.prevent_default();
            match doc.query_selector(selector) {
                Ok(Some(section)) => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    section.scroll_into_view_with_scroll_into_view_options(&options);
                }
                Ok(None) => {}
                Err(err) => tracing::trace!(?err, selector, "in-page link target not queried"),
            }
        })?;
    }

    for card in query_all(document, ".feature-card")? {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let target = card.clone();
        listen(&card, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            let pointer = Point::new(
                f64::from(mouse.client_x()) - rect.left(),
                f64::from(mouse.client_y()) - rect.top(),
            );
            let size = Size::new(rect.width().max(0.0) as u32, rect.height().max(0.0) as u32);
            DomStyle(target.clone()).set_style("transform", &tilt_transform(pointer, size));
        })?;
        let target = card.clone();
        listen(&card, "mouseleave", move |_| {
            DomStyle(target.clone()).set_style("transform", REST_TRANSFORM);
        })?;
    }

    let stat_cards = query_all(document, ".stat-card")?;
    for (i, card) in stat_cards.iter().enumerate() {
        card.set_attribute(STAT_ID_ATTR, &i.to_string())
            .map_err(js_error)?;
    }
    let p = Rc::clone(page);
    observe(&stat_cards, 0.5, Some("0px 0px -50px 0px"), move |card| {
        let Ok(Some(number)) = card.query_selector(".stat-number") else {
            return false;
        };
        let id = card.get_attribute(STAT_ID_ATTR).unwrap_or_default();
        let raw = number.get_attribute("data-target").unwrap_or_default();
        p.stat_visible(&id, DomText(number), &raw);
        true
    })?;

    let sections = query_all(document, "section")?;
    let rest = page.config().section_rest_opacity.to_string();
    for (i, section) in sections.iter().enumerate() {
        section
            .set_attribute(SECTION_ID_ATTR, &i.to_string())
            .map_err(js_error)?;
        if let Some(section) = section.dyn_ref::<HtmlElement>() {
            DomStyle(section.clone()).set_style("opacity", &rest);
        }
    }
    let p = Rc::clone(page);
    observe(&sections, 0.1, None, move |section| {
        let id = section.get_attribute(SECTION_ID_ATTR).unwrap_or_default();
        if p.section_visible(&id)
            && let Some(section) = section.dyn_ref::<HtmlElement>()
        {
            DomStyle(section.clone()).set_style("opacity", "1");
        }
        false
    })?;

    Ok(())
}

// ---------------------------------------------------------------------------
// JS entry point
// ---------------------------------------------------------------------------

/// The celebration page, exported to JavaScript.
#[wasm_bindgen]
pub struct CelebrationPage {
    page: Rc<Page>,
}

#[wasm_bindgen]
impl CelebrationPage {
    /// Bring the page up: build every effect, start the particle loop and
    /// attach event listeners. `config` is an optional JSON object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<CelebrationPage, JsValue> {
        let mut config = match config {
            Some(json) => PageConfig::from_json(&json).map_err(WebError::from)?,
            None => PageConfig::default(),
        };
        let window = web_sys::window().ok_or(WebError::Unsupported("window"))?;
        let document = window.document().ok_or(WebError::Unsupported("document"))?;
        if config.locale.is_none() {
            config.locale = window.navigator().language();
        }

        let canvas = document
            .get_element_by_id("particleCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(WebError::MissingElement("particleCanvas"))?;
        let container = document
            .get_element_by_id("confettiContainer")
            .ok_or(WebError::MissingElement("confettiContainer"))?;

        let host = Rc::new(BrowserHost {
            performance: window.performance(),
            window: window.clone(),
        });
        let random: Rc<dyn RandomSource> = match config.seed {
            Some(seed) => Rc::new(SeededRandom::new(seed)),
            None => Rc::new(MathRandom),
        };
        let parts = Collaborators {
            chrome: BrowserChrome {
                document: document.clone(),
                pulse_keyframes: Cell::new(false),
                flash_keyframes: Cell::new(false),
            },
            surface: CanvasSurface::new(canvas)?,
            mount: DomMount {
                document: document.clone(),
                container,
            },
            services: HostServices::from_host(Rc::clone(&host), random),
            viewport: host,
        };

        let page = Rc::new(Celebration::new(parts, config).map_err(WebError::from)?);
        page.start();
        install_listeners(&page, &window, &document)?;
        Ok(Self { page })
    }

    /// Fullscreen shower; returns the vibration pattern.
    pub fn celebrate(&self) -> Vec<u32> {
        self.page.celebrate().to_vec()
    }

    /// Burst of `count` pieces at `(x, y)`. Negative counts do nothing.
    pub fn burst(&self, x: f64, y: f64, count: i32) -> u32 {
        let count = usize::try_from(count).unwrap_or(0);
        self.page.burst(Point::new(x, y), count) as u32
    }

    /// Fullscreen shower of `count` pieces. Negative counts do nothing.
    pub fn fullscreen(&self, count: i32) -> u32 {
        let count = usize::try_from(count).unwrap_or(0);
        self.page.fullscreen(count) as u32
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> bool {
        self.page.key_down(key)
    }

    #[wasm_bindgen(js_name = birthdayMode)]
    pub fn birthday_mode(&self) {
        self.page.birthday_mode();
    }

    pub fn resize(&self) {
        self.page.resize();
    }
}
