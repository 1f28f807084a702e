//! Position engine for the tour card carousels.
//!
//! Tracks which slide is at the left edge, the pixel translation of the
//! strip, drag gestures and the arrow/dot navigation state. Rendering is the
//! host's job: it feeds pointer, keyboard and resize events in and reads
//! `translate()`, `arrows()` and `dots()` back out.

use std::time::Instant;

/// Viewport breakpoints and the card geometry used at each of them.
pub mod layout {
    pub const MOBILE_MAX_WIDTH: f64 = 768.0;
    pub const TABLET_MAX_WIDTH: f64 = 1024.0;
    pub const LAPTOP_MAX_WIDTH: f64 = 1200.0;

    /// Widest card on mobile; narrower screens lose this much to padding.
    pub const MOBILE_CARD_WIDTH: f64 = 280.0;
    pub const MOBILE_SIDE_PADDING: f64 = 40.0;
    pub const MOBILE_GAP: f64 = 16.0;

    pub const TABLET_CARD_WIDTH: f64 = 260.0;
    pub const TABLET_GAP: f64 = 20.0;

    pub const DESKTOP_CARD_WIDTH: f64 = 285.0;
    pub const DESKTOP_GAP: f64 = 24.0;
}

/// Drag and snap tuning.
pub mod motion {
    use std::time::Duration;

    /// Pointer travel before a press becomes a drag instead of a click.
    pub const DRAG_THRESHOLD_PX: f64 = 10.0;
    /// Fraction of overscroll applied past the first or last slide.
    pub const EDGE_RESISTANCE: f64 = 0.1;
    /// Lock after a programmatic move while the transition plays.
    pub const ANIMATION_LOCK: Duration = Duration::from_millis(300);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayout {
    pub slides_per_view: usize,
    pub slide_width: f64,
    pub slide_gap: f64,
}

impl SlideLayout {
    pub fn for_viewport(viewport_width: f64) -> Self {
        if viewport_width <= layout::MOBILE_MAX_WIDTH {
            Self {
                slides_per_view: 1,
                slide_width: layout::MOBILE_CARD_WIDTH
                    .min(viewport_width - layout::MOBILE_SIDE_PADDING)
                    .max(0.0),
                slide_gap: layout::MOBILE_GAP,
            }
        } else if viewport_width <= layout::TABLET_MAX_WIDTH {
            Self {
                slides_per_view: 2,
                slide_width: layout::TABLET_CARD_WIDTH,
                slide_gap: layout::TABLET_GAP,
            }
        } else if viewport_width <= layout::LAPTOP_MAX_WIDTH {
            Self {
                slides_per_view: 3,
                slide_width: layout::DESKTOP_CARD_WIDTH,
                slide_gap: layout::DESKTOP_GAP,
            }
        } else {
            Self {
                slides_per_view: 4,
                slide_width: layout::DESKTOP_CARD_WIDTH,
                slide_gap: layout::DESKTOP_GAP,
            }
        }
    }

    /// Distance between the left edges of neighbouring slides
    pub fn step(&self) -> f64 {
        self.slide_width + self.slide_gap
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Dragging,
    Animating { until: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKey {
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// No drag was in progress
    Ignored,
    /// The pointer never crossed the drag threshold; let the click through
    Click,
    /// The strip snapped to this index
    Snapped(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    start_x: f64,
    start_translate: f64,
    has_moved: bool,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    total_slides: usize,
    layout: SlideLayout,
    current_index: usize,
    max_index: usize,
    translate: f64,
    phase: Phase,
    drag: Option<DragState>,
    suppress_click: bool,
}

impl Carousel {
    pub fn new(total_slides: usize, viewport_width: f64) -> Self {
        let mut carousel = Self {
            total_slides,
            layout: SlideLayout::for_viewport(viewport_width),
            current_index: 0,
            max_index: 0,
            translate: 0.0,
            phase: Phase::Idle,
            drag: None,
            suppress_click: false,
        };
        carousel.relayout();
        carousel
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    pub fn translate(&self) -> f64 {
        self.translate
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// All slides fit on screen: no navigation, no offset
    pub fn is_centering(&self) -> bool {
        self.total_slides <= self.layout.slides_per_view
    }

    pub fn min_translate(&self) -> f64 {
        -(self.max_index as f64 * self.layout.step())
    }

    /// True after a real drag, until the next press. Hosts swallow clicks on
    /// slide links while this holds.
    pub fn suppresses_click(&self) -> bool {
        self.suppress_click
    }

    pub fn resize(&mut self, viewport_width: f64) {
        self.layout = SlideLayout::for_viewport(viewport_width);
        self.relayout();
    }

    pub fn set_total_slides(&mut self, total_slides: usize) {
        self.total_slides = total_slides;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.max_index = self
            .total_slides
            .saturating_sub(self.layout.slides_per_view);
        self.current_index = self.current_index.min(self.max_index);

        if self.is_centering() {
            self.current_index = 0;
            self.drag = None;
            self.phase = Phase::Idle;
            self.translate = 0.0;
        } else if self.drag.is_none() {
            self.translate = self.rest_translate();
        }
    }

    fn rest_translate(&self) -> f64 {
        -(self.current_index as f64 * self.layout.step())
    }

    fn settle(&mut self, now: Instant) {
        if let Phase::Animating { until } = self.phase {
            if now >= until {
                self.phase = Phase::Idle;
            }
        }
    }

    pub fn drag_start(&mut self, x: f64, on_slide: bool) -> bool {
        self.drag_start_at(x, on_slide, Instant::now())
    }

    /// Begin a press at `x`. Presses on the gutter between slides, while
    /// centering, or mid-transition are ignored.
    pub fn drag_start_at(&mut self, x: f64, on_slide: bool, now: Instant) -> bool {
        self.settle(now);
        if self.is_centering() || !on_slide || self.phase != Phase::Idle {
            return false;
        }

        self.phase = Phase::Dragging;
        self.suppress_click = false;
        self.drag = Some(DragState {
            start_x: x,
            start_translate: self.translate,
            has_moved: false,
        });
        true
    }

    /// Follow the pointer. Returns the new translation once the press has
    /// turned into a drag.
    pub fn drag_move(&mut self, x: f64) -> Option<f64> {
        if self.is_centering() {
            return None;
        }
        let drag = self.drag.as_mut()?;

        let delta = x - drag.start_x;
        if !drag.has_moved && delta.abs() > motion::DRAG_THRESHOLD_PX {
            drag.has_moved = true;
        }
        if !drag.has_moved {
            return None;
        }

        let candidate = drag.start_translate + delta;
        let min_translate = self.min_translate();
        let max_translate = 0.0;

        let translate = if self.current_index >= self.max_index && delta < 0.0 {
            min_translate + (candidate - min_translate) * motion::EDGE_RESISTANCE
        } else if self.current_index == 0 && delta > 0.0 {
            max_translate + (candidate - max_translate) * motion::EDGE_RESISTANCE
        } else {
            candidate.clamp(min_translate, max_translate)
        };

        self.translate = translate;
        Some(translate)
    }

    pub fn drag_end(&mut self) -> DragEnd {
        self.drag_end_at(Instant::now())
    }

    /// Release the pointer, snapping to the nearest slide after a real drag.
    pub fn drag_end_at(&mut self, now: Instant) -> DragEnd {
        let Some(drag) = self.drag.take() else {
            return DragEnd::Ignored;
        };
        self.phase = Phase::Idle;

        if !drag.has_moved {
            return DragEnd::Click;
        }

        self.suppress_click = true;
        let nearest = (-self.translate / self.layout.step()).round().max(0.0) as usize;
        let target = nearest.min(self.max_index);

        self.current_index = target;
        self.translate = self.rest_translate();
        self.phase = Phase::Animating {
            until: now + motion::ANIMATION_LOCK,
        };
        DragEnd::Snapped(target)
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.go_to_at(index, Instant::now())
    }

    /// Move to `index`, clamped to the valid range. Returns false when
    /// nothing moved: centering, mid-transition, or already there.
    pub fn go_to_at(&mut self, index: usize, now: Instant) -> bool {
        self.settle(now);
        if self.is_centering() || matches!(self.phase, Phase::Animating { .. }) {
            return false;
        }

        let target = index.min(self.max_index);
        if target == self.current_index {
            return false;
        }

        self.current_index = target;
        self.translate = self.rest_translate();
        self.phase = Phase::Animating {
            until: now + motion::ANIMATION_LOCK,
        };
        true
    }

    pub fn next(&mut self) -> bool {
        self.next_at(Instant::now())
    }

    pub fn next_at(&mut self, now: Instant) -> bool {
        if self.current_index >= self.max_index {
            return false;
        }
        self.go_to_at(self.current_index + 1, now)
    }

    pub fn prev(&mut self) -> bool {
        self.prev_at(Instant::now())
    }

    pub fn prev_at(&mut self, now: Instant) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.go_to_at(self.current_index - 1, now)
    }

    pub fn key(&mut self, key: CarouselKey) -> bool {
        self.key_at(key, Instant::now())
    }

    pub fn key_at(&mut self, key: CarouselKey, now: Instant) -> bool {
        match key {
            CarouselKey::ArrowLeft => self.prev_at(now),
            CarouselKey::ArrowRight => self.next_at(now),
        }
    }

    pub fn arrows(&self) -> ArrowState {
        let navigable = !self.is_centering();
        ArrowState {
            prev_enabled: navigable && self.current_index > 0,
            next_enabled: navigable && self.current_index < self.max_index,
        }
    }

    /// One entry per reachable position, true for the active one. Empty in
    /// centering mode.
    pub fn dots(&self) -> Vec<bool> {
        if self.is_centering() {
            return Vec::new();
        }
        (0..=self.max_index)
            .map(|index| index == self.current_index)
            .collect()
    }
}
