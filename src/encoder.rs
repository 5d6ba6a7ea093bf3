//! Rotary encoder input tasks.
//!
//! Two tasks feed [`INPUT_EVENTS`]:
//!   - rotation - decodes the A/B quadrature pair into detent events
//!   - switch   - debounces the push switch and classifies each press
//!
//! The control loop drains the channel at its own pace; a full channel
//! drops the event rather than stalling the decoder.

use cloudmouse_ble::config::{BUTTON_DEBOUNCE_MS, INPUT_EVENT_QUEUE_DEPTH};
use cloudmouse_ble::input::{PressClassifier, QuadratureDecoder};
use cloudmouse_ble::InputEvent;
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};

/// Encoder events waiting for the control loop.
pub static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_EVENT_QUEUE_DEPTH> =
    Channel::new();

/// How often a held switch is re-checked for the ultra-long threshold.
const HOLD_POLL_MS: u64 = 100;

fn publish(event: InputEvent) {
    info!("Encoder: {}", event);
    if INPUT_EVENTS.try_send(event).is_err() {
        warn!("Input queue full - event dropped");
    }
}

#[embassy_executor::task]
pub async fn rotation_task(pin_a: AnyPin, pin_b: AnyPin) -> ! {
    let mut a = Input::new(pin_a, Pull::Up);
    let mut b = Input::new(pin_b, Pull::Up);
    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        decoder.update(a.is_high(), b.is_high());
        if let Some(event) = decoder.take_event() {
            publish(event);
        }
    }
}

#[embassy_executor::task]
pub async fn switch_task(pin: AnyPin) -> ! {
    let mut sw = Input::new(pin, Pull::Up);
    let mut classifier = PressClassifier::new();

    loop {
        // Wait for falling edge (switch pressed, active-low).
        sw.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if sw.is_high() {
            continue;
        }
        classifier.press(Instant::now().as_millis());

        loop {
            match select(
                sw.wait_for_rising_edge(),
                Timer::after(Duration::from_millis(HOLD_POLL_MS)),
            )
            .await
            {
                Either::First(()) => {
                    Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
                    if sw.is_high() {
                        break;
                    }
                }
                Either::Second(()) => {
                    if let Some(event) = classifier.poll(Instant::now().as_millis()) {
                        publish(event);
                    }
                }
            }
        }

        if let Some(event) = classifier.release(Instant::now().as_millis()) {
            publish(event);
        }
    }
}
