//! Device identity and advertised-name derivation.
//!
//! The identity string is stable across power cycles on the same chip and
//! is shared with every other subsystem that names the device.

use core::fmt::Write;

use heapless::String;

use crate::config::{DEVICE_ID_CAPACITY, DEVICE_NAME_CAPACITY, DEVICE_NAME_PREFIX};

/// Advertised BLE device name (`CM-` + identity).
pub type DeviceName = String<DEVICE_NAME_CAPACITY>;

/// Device identity string.
pub type DeviceId = String<DEVICE_ID_CAPACITY>;

/// Render the low 32 bits of a chip identifier as eight lowercase,
/// zero-padded hex digits.
pub fn format_device_id(raw: u32) -> DeviceId {
    let mut id = DeviceId::new();
    // 8 hex digits always fit in DEVICE_ID_CAPACITY.
    let _ = write!(id, "{:08x}", raw);
    id
}

/// Build the advertised name from an identity string.
///
/// No separator is inserted. An identity that would overflow
/// [`DEVICE_NAME_CAPACITY`] is truncated at the buffer boundary.
pub fn device_name(device_id: &str) -> DeviceName {
    let mut name = DeviceName::new();
    for c in DEVICE_NAME_PREFIX.chars().chain(device_id.chars()) {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}
