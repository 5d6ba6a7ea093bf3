//! BLE HID media-control link for the CloudMouse encoder.
//!
//! This library holds everything that does not touch the radio or GPIO,
//! so it can be tested on the host:
//!
//! - [`lifecycle`] - the connection lifecycle manager (init / update /
//!   shutdown / status) over an abstract transport
//! - [`translator`] - encoder event → consumer key mapping
//! - [`input`] - encoder events, quadrature decoding, press classification
//! - [`hid`] - consumer-control reports and the BLE HID report map
//! - [`identity`] - device identity and advertised-name derivation
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and provides the SoftDevice-backed transport.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod hid;
pub mod identity;
pub mod input;
pub mod lifecycle;
pub mod translator;
pub mod transport;

pub use error::{Error, TransportError};
pub use hid::{ConsumerReport, ConsumerUsage};
pub use identity::{device_name, format_device_id, DeviceId, DeviceName};
pub use input::InputEvent;
pub use lifecycle::{LinkManager, LinkObserver, LinkState, LogObserver};
pub use transport::{HidTransport, TransportFactory};
