//! Encoder event → consumer key mapping.

use crate::hid::ConsumerUsage;
use crate::input::InputEvent;

/// Map an input event to the consumer key it produces, if any.
///
/// Rotation sign selects volume up/down (magnitude is ignored, one key per
/// event), a click toggles mute, everything else is dropped.
pub fn translate(event: &InputEvent) -> Option<ConsumerUsage> {
    match *event {
        InputEvent::Rotation(delta) if delta > 0 => Some(ConsumerUsage::VolumeUp),
        InputEvent::Rotation(delta) if delta < 0 => Some(ConsumerUsage::VolumeDown),
        InputEvent::Click => Some(ConsumerUsage::Mute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_direction_selects_volume_key() {
        assert_eq!(
            translate(&InputEvent::Rotation(5)),
            Some(ConsumerUsage::VolumeUp)
        );
        assert_eq!(
            translate(&InputEvent::Rotation(-3)),
            Some(ConsumerUsage::VolumeDown)
        );
    }

    #[test]
    fn zero_rotation_maps_to_nothing() {
        assert_eq!(translate(&InputEvent::Rotation(0)), None);
    }

    #[test]
    fn click_toggles_mute() {
        assert_eq!(translate(&InputEvent::Click), Some(ConsumerUsage::Mute));
    }

    #[test]
    fn held_presses_are_ignored() {
        assert_eq!(translate(&InputEvent::LongPress(1500)), None);
        assert_eq!(translate(&InputEvent::UltraLongPress(4000)), None);
    }

    #[test]
    fn magnitude_does_not_matter() {
        assert_eq!(
            translate(&InputEvent::Rotation(i32::MAX)),
            translate(&InputEvent::Rotation(1))
        );
        assert_eq!(
            translate(&InputEvent::Rotation(i32::MIN)),
            translate(&InputEvent::Rotation(-1))
        );
    }
}
