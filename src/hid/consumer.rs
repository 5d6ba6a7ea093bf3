//! Consumer Control HID support - volume and mute keys.
//!
//! Consumer Control is a separate HID usage page (0x0C). The encoder only
//! ever drives three of its usages; everything else decodes to
//! [`ConsumerUsage::None`].

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Consumer control usage codes (Usage Page 0x0C) written to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    /// No action (all keys released).
    None = 0x0000,
    /// Volume up.
    VolumeUp = 0x00E9,
    /// Volume down.
    VolumeDown = 0x00EA,
    /// Mute toggle.
    Mute = 0x00E2,
}

impl From<u16> for ConsumerUsage {
    fn from(code: u16) -> Self {
        match code {
            0x00E9 => ConsumerUsage::VolumeUp,
            0x00EA => ConsumerUsage::VolumeDown,
            0x00E2 => ConsumerUsage::Mute,
            _ => ConsumerUsage::None,
        }
    }
}

impl ConsumerUsage {
    /// Raw 16-bit usage code.
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Consumer Control HID report.
///
/// Simple 2-byte report containing a single usage code.
/// Multiple simultaneous keys are not supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16 on the wire).
    pub usage: u16,
}

impl ConsumerReport {
    /// Create a report with a single usage pressed.
    pub const fn new(usage: ConsumerUsage) -> Self {
        Self {
            usage: usage as u16,
        }
    }

    /// Report with every key released.
    pub const fn released() -> Self {
        Self { usage: 0 }
    }

    /// Wire representation (little-endian usage).
    pub const fn to_bytes(&self) -> [u8; CONSUMER_REPORT_SIZE] {
        self.usage.to_le_bytes()
    }

    /// Serialize into `buf`, returning the number of bytes written
    /// (0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..CONSUMER_REPORT_SIZE].copy_from_slice(&self.to_bytes());
        CONSUMER_REPORT_SIZE
    }
}
