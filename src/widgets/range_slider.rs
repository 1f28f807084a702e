use crate::models::filter::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};

/// Keyboard step, and the fine step used while Shift is held
pub const KEY_STEP: i64 = 5;
pub const FINE_KEY_STEP: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKey {
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    ArrowUp,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ThumbDrag {
    thumb: Thumb,
    start_x: f64,
    start_position: f64,
    track_width: f64,
}

type ChangeCallback = Box<dyn FnMut(i64, i64) + Send>;

/// Two-thumb price range selector.
///
/// `min < max` holds after every operation and both stay within the
/// absolute bounds. Every change is reported through the callback
/// registered with [`PriceRangeSlider::on_change`].
pub struct PriceRangeSlider {
    abs_min: i64,
    abs_max: i64,
    current_min: i64,
    current_max: i64,
    drag: Option<ThumbDrag>,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for PriceRangeSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceRangeSlider")
            .field("abs_min", &self.abs_min)
            .field("abs_max", &self.abs_max)
            .field("current_min", &self.current_min)
            .field("current_max", &self.current_max)
            .field("dragging", &self.drag.map(|drag| drag.thumb))
            .finish()
    }
}

impl Default for PriceRangeSlider {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PRICE as i64, DEFAULT_MAX_PRICE as i64)
    }
}

impl PriceRangeSlider {
    /// A slider over `[abs_min, abs_max]` with both thumbs at the bounds.
    /// A degenerate range is widened to one unit.
    pub fn new(abs_min: i64, abs_max: i64) -> Self {
        let abs_min = abs_min.min(i64::MAX - 1);
        let abs_max = abs_max.max(abs_min + 1);
        Self {
            abs_min,
            abs_max,
            current_min: abs_min,
            current_max: abs_max,
            drag: None,
            on_change: None,
        }
    }

    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(i64, i64) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    pub fn range(&self) -> (i64, i64) {
        (self.current_min, self.current_max)
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.abs_min, self.abs_max)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Thumb position along the track, in percent
    pub fn position(&self, thumb: Thumb) -> f64 {
        let value = match thumb {
            Thumb::Min => self.current_min,
            Thumb::Max => self.current_max,
        };
        value.abs_diff(self.abs_min) as f64 / self.abs_max.abs_diff(self.abs_min) as f64 * 100.0
    }

    fn value_at(&self, percent: f64) -> i64 {
        let span = self.abs_max.abs_diff(self.abs_min) as f64;
        let value = (self.abs_min as f64 + percent.clamp(0.0, 100.0) / 100.0 * span).round();
        (value as i64).clamp(self.abs_min, self.abs_max)
    }

    fn notify(&mut self) {
        let (min, max) = self.range();
        if let Some(callback) = self.on_change.as_mut() {
            callback(min, max);
        }
    }

    /// Move one thumb toward `value`, stopping one unit short of the other
    fn place(&mut self, thumb: Thumb, value: i64) {
        match thumb {
            Thumb::Min => {
                self.current_min = value.clamp(self.abs_min, self.current_max - 1);
            }
            Thumb::Max => {
                self.current_max = value.clamp(self.current_min + 1, self.abs_max);
            }
        }
    }

    pub fn set_range(&mut self, min: i64, max: i64) {
        let max = max.clamp(self.abs_min + 1, self.abs_max);
        let mut min = min.clamp(self.abs_min, self.abs_max - 1);
        if min >= max {
            min = max - 1;
        }

        self.current_min = min;
        self.current_max = max;
        self.notify();
    }

    pub fn start_drag(&mut self, thumb: Thumb, x: f64, track_width: f64) {
        if track_width <= 0.0 {
            return;
        }
        self.drag = Some(ThumbDrag {
            thumb,
            start_x: x,
            start_position: self.position(thumb),
            track_width,
        });
    }

    pub fn drag_to(&mut self, x: f64) {
        let Some(drag) = self.drag else {
            return;
        };

        let percent = drag.start_position + (x - drag.start_x) / drag.track_width * 100.0;
        let value = self.value_at(percent);
        self.place(drag.thumb, value);
        self.notify();
    }

    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.notify();
        }
    }

    /// A click at `x` pixels into a track `track_width` wide moves the
    /// closer thumb there. Ties go to the max thumb.
    pub fn click_track(&mut self, x: f64, track_width: f64) -> Option<Thumb> {
        if self.drag.is_some() || track_width <= 0.0 {
            return None;
        }

        let percent = (x / track_width * 100.0).clamp(0.0, 100.0);
        let min_distance = (percent - self.position(Thumb::Min)).abs();
        let max_distance = (percent - self.position(Thumb::Max)).abs();
        let thumb = if min_distance < max_distance {
            Thumb::Min
        } else {
            Thumb::Max
        };

        let value = self.value_at(percent);
        self.place(thumb, value);
        self.notify();
        Some(thumb)
    }

    pub fn key(&mut self, thumb: Thumb, key: SliderKey, shift: bool) {
        let step = if shift { FINE_KEY_STEP } else { KEY_STEP };
        let current = match thumb {
            Thumb::Min => self.current_min,
            Thumb::Max => self.current_max,
        };

        let target = match key {
            SliderKey::ArrowLeft | SliderKey::ArrowDown => current.saturating_sub(step),
            SliderKey::ArrowRight | SliderKey::ArrowUp => current.saturating_add(step),
            SliderKey::Home => i64::MIN,
            SliderKey::End => i64::MAX,
        };

        self.place(thumb, target);
        self.notify();
    }

    /// Typed value from one of the number inputs. Unparseable text counts
    /// as zero.
    pub fn set_input(&mut self, thumb: Thumb, raw: &str) {
        let value = raw.trim().parse::<i64>().unwrap_or(0);
        self.place(thumb, value);
        self.notify();
    }
}
