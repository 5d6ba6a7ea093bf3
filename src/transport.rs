//! BLE-HID transport seam.
//!
//! The link manager never talks to the radio directly. It asks a
//! [`TransportFactory`] for a transport when the link comes up and drops the
//! transport when the link goes down; dropping is the only release path, so
//! the handle can neither dangle nor be released twice.

use crate::error::TransportError;
use crate::hid::{ConsumerReport, ConsumerUsage};

/// A started (or startable) BLE HID peripheral.
pub trait HidTransport {
    /// Start the HID service and begin advertising.
    fn begin(&mut self) -> Result<(), TransportError>;

    /// Live connection level: `true` while a host is connected.
    fn is_connected(&self) -> bool;

    /// Send an all-keys-released report.
    fn release_all(&mut self);

    /// Press and release one consumer key.
    fn write(&mut self, usage: ConsumerUsage) -> Result<(), TransportError>;
}

/// Creates transports bound to a device name and manufacturer.
pub trait TransportFactory {
    /// The transport type handed to the link manager.
    type Transport: HidTransport;

    /// Construct a transport. Nothing is advertised until
    /// [`HidTransport::begin`] is called.
    fn create(
        &mut self,
        name: &str,
        manufacturer: &str,
    ) -> Result<Self::Transport, TransportError>;
}

/// Reports that make up one keystroke: press, then release.
pub const KEYSTROKE_REPORTS: usize = 2;

/// Queue a full keystroke for `usage` through `push`, or nothing at all.
///
/// `free` is the queue's free capacity; with fewer than
/// [`KEYSTROKE_REPORTS`] slots the keystroke is refused up front so a press
/// can never be queued without its release.
pub fn queue_keystroke<E>(
    usage: ConsumerUsage,
    free: usize,
    mut push: impl FnMut(ConsumerReport) -> Result<(), E>,
) -> Result<(), TransportError> {
    if free < KEYSTROKE_REPORTS {
        return Err(TransportError::WriteFailed);
    }
    push(ConsumerReport::new(usage)).map_err(|_| TransportError::WriteFailed)?;
    push(ConsumerReport::released()).map_err(|_| TransportError::WriteFailed)
}
