//! Application-wide constants and compile-time configuration.
//!
//! Naming, timing, and input-decoding parameters live here so they can be
//! tuned in one place.

// BLE identity

/// Prefix of the advertised device name. The device identity string follows
/// directly, with no separator (`CM-1a2b3c4d`).
pub const DEVICE_NAME_PREFIX: &str = "CM-";

/// Manufacturer string handed to the transport and exposed through the
/// Device Information service.
pub const DEVICE_MANUFACTURER: &str = "Cloudmouse";

/// Capacity of the advertised name buffer (bytes). Longer identities are
/// truncated at this boundary.
pub const DEVICE_NAME_CAPACITY: usize = 32;

/// Capacity of the device identity string (bytes).
pub const DEVICE_ID_CAPACITY: usize = 16;

// Link polling

/// Interval between two `update()` calls of the control loop (ms).
/// 50 ms = 20 Hz.
pub const LINK_UPDATE_INTERVAL_MS: u64 = 50;

/// Back-off before re-advertising after an advertising error (ms).
pub const ADVERTISE_RETRY_MS: u64 = 1000;

// HID

/// Report ID of the consumer-control input report in the report map.
pub const CONSUMER_REPORT_ID: u8 = 1;

/// Depth of the queue between the transport and the BLE notification pump.
pub const REPORT_QUEUE_DEPTH: usize = 8;

/// Depth of the start/stop command queue to the BLE link task. Holds a
/// stop and the following start when the link is restarted within one tick.
pub const LINK_COMMAND_QUEUE_DEPTH: usize = 4;

// Encoder input
//
// Logical names; the actual `embassy_nrf::peripherals::*` pins are selected
// in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A (CLK) → P0.03
//   Encoder B (DT)  → P0.04
//   Encoder SW      → P0.28 (active-low)

/// Quadrature counts produced by one mechanical detent.
pub const ENCODER_COUNTS_PER_DETENT: i32 = 4;

/// Switch debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

/// Presses shorter than this are clicks (ms).
pub const CLICK_MAX_MS: u32 = 500;

/// Presses at least this long are long presses (ms).
pub const LONG_PRESS_MS: u32 = 1000;

/// Presses at least this long are ultra-long presses (ms).
pub const ULTRA_LONG_PRESS_MS: u32 = 3000;

/// Depth of the encoder → control loop event channel.
pub const INPUT_EVENT_QUEUE_DEPTH: usize = 8;
