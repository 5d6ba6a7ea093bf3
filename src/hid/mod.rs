//! HID report types and the BLE HID report map.

pub mod consumer;

pub use consumer::{ConsumerReport, ConsumerUsage, CONSUMER_REPORT_SIZE};

use crate::config::CONSUMER_REPORT_ID;

/// HID Information characteristic value (0x2A4A):
/// bcdHID 1.11, country code 0, flags = RemoteWake | NormallyConnectable.
pub const HID_INFORMATION: [u8; 4] = [0x11, 0x01, 0x00, 0x03];

/// Protocol Mode value for Report Protocol (0x2A4E).
pub const PROTOCOL_MODE_REPORT: u8 = 0x01;

/// Report Reference descriptor (0x2908) value for the consumer input
/// report: `[report id, report type = Input]`.
pub const CONSUMER_REPORT_REFERENCE: [u8; 2] = [CONSUMER_REPORT_ID, 0x01];

/// Length of [`REPORT_MAP`].
pub const REPORT_MAP_LEN: usize = 25;

/// BLE HID Report Map (0x2A4B) for a single 16-bit consumer usage.
pub const REPORT_MAP: [u8; REPORT_MAP_LEN] = [
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, CONSUMER_REPORT_ID, //   Report ID
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];
