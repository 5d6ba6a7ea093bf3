//! Encoder switch press classification.

use super::InputEvent;
use crate::config::{CLICK_MAX_MS, LONG_PRESS_MS, ULTRA_LONG_PRESS_MS};

/// Turns debounced press/release timestamps into click and hold events.
///
/// An ultra-long press fires while the switch is still held (see
/// [`poll`](Self::poll)) and is not repeated on release.
#[derive(Clone, Debug, Default)]
pub struct PressClassifier {
    pressed_at: Option<u64>,
    ultra_fired: bool,
}

impl PressClassifier {
    pub const fn new() -> Self {
        Self {
            pressed_at: None,
            ultra_fired: false,
        }
    }

    /// `true` while the switch is held.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Record a press edge. Repeated press edges keep the first timestamp.
    pub fn press(&mut self, now_ms: u64) {
        if self.pressed_at.is_none() {
            self.pressed_at = Some(now_ms);
            self.ultra_fired = false;
        }
    }

    /// Record a release edge and classify the completed press.
    pub fn release(&mut self, now_ms: u64) -> Option<InputEvent> {
        let start = self.pressed_at.take()?;
        if self.ultra_fired {
            return None;
        }
        classify(held_ms(start, now_ms))
    }

    /// Check a held switch; fires [`InputEvent::UltraLongPress`] once when
    /// the ultra-long threshold is crossed.
    pub fn poll(&mut self, now_ms: u64) -> Option<InputEvent> {
        let start = self.pressed_at?;
        let held = held_ms(start, now_ms);
        if !self.ultra_fired && held >= ULTRA_LONG_PRESS_MS {
            self.ultra_fired = true;
            return Some(InputEvent::UltraLongPress(held));
        }
        None
    }
}

/// Classify a completed press by its duration.
///
/// Presses between the click limit and the long-press threshold are
/// ambiguous and produce nothing.
pub fn classify(duration_ms: u32) -> Option<InputEvent> {
    if duration_ms >= ULTRA_LONG_PRESS_MS {
        Some(InputEvent::UltraLongPress(duration_ms))
    } else if duration_ms >= LONG_PRESS_MS {
        Some(InputEvent::LongPress(duration_ms))
    } else if duration_ms < CLICK_MAX_MS {
        Some(InputEvent::Click)
    } else {
        None
    }
}

fn held_ms(start: u64, now: u64) -> u32 {
    u32::try_from(now.saturating_sub(start)).unwrap_or(u32::MAX)
}
