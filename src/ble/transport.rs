//! SoftDevice-backed [`HidTransport`].
//!
//! The transport never touches the radio itself: `begin` and `Drop` post
//! commands to the link task, `is_connected` reads the published level,
//! and reports are queued for the notification pump.

use core::sync::atomic::Ordering;

use cloudmouse_ble::transport::queue_keystroke;
use cloudmouse_ble::{
    ConsumerReport, ConsumerUsage, DeviceName, HidTransport, TransportError, TransportFactory,
};
use defmt::{info, warn};

use super::gatt::Server;
use super::link::{LinkCommand, CONNECTED, LINK_COMMAND, REPORTS};

/// Builds [`SoftdeviceTransport`]s on top of the registered GATT server.
pub struct SoftdeviceFactory {
    server: &'static Server,
}

impl SoftdeviceFactory {
    pub fn new(server: &'static Server) -> Self {
        Self { server }
    }
}

impl TransportFactory for SoftdeviceFactory {
    type Transport = SoftdeviceTransport;

    fn create(&mut self, name: &str, manufacturer: &str) -> Result<Self::Transport, TransportError> {
        let mut manufacturer_name = heapless::String::<32>::new();
        manufacturer_name
            .push_str(manufacturer)
            .map_err(|_| TransportError::CreateFailed)?;
        self.server
            .device_info
            .manufacturer_name_set(&manufacturer_name)
            .map_err(|_| TransportError::CreateFailed)?;
        self.server
            .load_static_values()
            .map_err(|_| TransportError::CreateFailed)?;

        let mut device_name = DeviceName::new();
        device_name
            .push_str(name)
            .map_err(|_| TransportError::CreateFailed)?;

        Ok(SoftdeviceTransport {
            name: device_name,
            started: false,
        })
    }
}

/// HID transport whose lifetime bounds the advertising session.
pub struct SoftdeviceTransport {
    name: DeviceName,
    started: bool,
}

impl HidTransport for SoftdeviceTransport {
    fn begin(&mut self) -> Result<(), TransportError> {
        if self.started {
            return Ok(());
        }
        info!("Starting BLE HID as {}", self.name.as_str());
        LINK_COMMAND
            .try_send(LinkCommand::Start(self.name.clone()))
            .map_err(|_| TransportError::StartFailed)?;
        self.started = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.started && CONNECTED.load(Ordering::Acquire)
    }

    fn release_all(&mut self) {
        if !self.is_connected() {
            return;
        }
        if REPORTS.try_send(ConsumerReport::released()).is_err() {
            warn!("Report queue full - release dropped");
        }
    }

    fn write(&mut self, usage: ConsumerUsage) -> Result<(), TransportError> {
        // Only the control loop fills REPORTS, so the free count cannot
        // shrink between the check and the two sends.
        queue_keystroke(usage, REPORTS.free_capacity(), |report| REPORTS.try_send(report))
    }
}

impl Drop for SoftdeviceTransport {
    fn drop(&mut self) {
        if self.started {
            if LINK_COMMAND.try_send(LinkCommand::Stop).is_err() {
                warn!("Link command queue full - stop dropped");
            }
        }
    }
}
