//! Encoder input - events and the pure decoding logic behind them.
//!
//! The firmware feeds pin levels and timestamps into [`QuadratureDecoder`]
//! and [`PressClassifier`]; both are plain state machines so they can be
//! tested on the host.

pub mod press;
pub mod quadrature;

pub use press::PressClassifier;
pub use quadrature::QuadratureDecoder;

/// Events delivered by the encoder to the control loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Knob turned by the given number of detents (positive = clockwise).
    Rotation(i32),
    /// Short press of the encoder switch.
    Click,
    /// Press held for at least the long-press threshold (duration in ms).
    LongPress(u32),
    /// Press held for at least the ultra-long threshold (duration in ms).
    UltraLongPress(u32),
}

impl InputEvent {
    /// `true` for a rotation with positive direction.
    pub fn is_clockwise(&self) -> bool {
        matches!(self, InputEvent::Rotation(delta) if *delta > 0)
    }

    /// Press duration for long and ultra-long presses.
    pub fn press_duration_ms(&self) -> Option<u32> {
        match self {
            InputEvent::LongPress(ms) | InputEvent::UltraLongPress(ms) => Some(*ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_only_for_positive_rotation() {
        assert!(InputEvent::Rotation(2).is_clockwise());
        assert!(!InputEvent::Rotation(-1).is_clockwise());
        assert!(!InputEvent::Rotation(0).is_clockwise());
        assert!(!InputEvent::Click.is_clockwise());
    }

    #[test]
    fn press_duration_only_for_held_presses() {
        assert_eq!(InputEvent::LongPress(1200).press_duration_ms(), Some(1200));
        assert_eq!(
            InputEvent::UltraLongPress(3000).press_duration_ms(),
            Some(3000)
        );
        assert_eq!(InputEvent::Click.press_duration_ms(), None);
        assert_eq!(InputEvent::Rotation(1).press_duration_ms(), None);
    }
}
