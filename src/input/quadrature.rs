//! Quadrature decoding for the rotary encoder.

use super::InputEvent;
use crate::config::ENCODER_COUNTS_PER_DETENT;

/// Count delta indexed by `(previous_state << 2) | current_state`, where a
/// state is `(a << 1) | b`. Zero entries are either "no change" or an
/// invalid double step (both pins flipped), which is dropped.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Gray-code state machine turning A/B pin levels into detent movement.
///
/// Channel A leading channel B counts positive (clockwise).
#[derive(Clone, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    counts: i32,
    detents: i32,
}

impl QuadratureDecoder {
    /// Start from the current pin levels.
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: encode(a, b),
            counts: 0,
            detents: 0,
        }
    }

    /// Feed new pin levels. Returns the count delta (-1, 0 or 1).
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let next = encode(a, b);
        let delta = TRANSITIONS[((self.state << 2) | next) as usize];
        self.state = next;

        self.counts += i32::from(delta);
        while self.counts >= ENCODER_COUNTS_PER_DETENT {
            self.counts -= ENCODER_COUNTS_PER_DETENT;
            self.detents += 1;
        }
        while self.counts <= -ENCODER_COUNTS_PER_DETENT {
            self.counts += ENCODER_COUNTS_PER_DETENT;
            self.detents -= 1;
        }
        delta
    }

    /// Return and clear the accumulated detent movement.
    pub fn take_detents(&mut self) -> i32 {
        core::mem::take(&mut self.detents)
    }

    /// Drain accumulated movement as a rotation event, if any.
    pub fn take_event(&mut self) -> Option<InputEvent> {
        match self.take_detents() {
            0 => None,
            delta => Some(InputEvent::Rotation(delta)),
        }
    }
}

fn encode(a: bool, b: bool) -> u8 {
    (u8::from(a) << 1) | u8::from(b)
}
