//! GATT server: HID-over-GATT (consumer control) and Device Information.

use cloudmouse_ble::hid::{
    CONSUMER_REPORT_REFERENCE, CONSUMER_REPORT_SIZE, HID_INFORMATION, PROTOCOL_MODE_REPORT,
    REPORT_MAP, REPORT_MAP_LEN,
};
use defmt::{info, unwrap};
use nrf_softdevice::ble::gatt_server::{self, SetValueError};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

const FW_VERSION: &str = env!("CARGO_PKG_VERSION");
const _: () = assert!(FW_VERSION.len() <= 16, "version does not fit the revision characteristic");

/// HID Service (UUID: 0x1812) exposing a single consumer-control input
/// report (report id 1).
#[nrf_softdevice::gatt_service(uuid = "1812")]
pub struct HidService {
    /// HID Information (UUID: 0x2A4A)
    #[characteristic(uuid = "2a4a", read)]
    pub hid_info: [u8; 4],

    /// Report Map (UUID: 0x2A4B)
    #[characteristic(uuid = "2a4b", read)]
    pub report_map: [u8; REPORT_MAP_LEN],

    /// HID Control Point (UUID: 0x2A4C) - suspend / exit suspend.
    #[characteristic(uuid = "2a4c", write_without_response)]
    pub control_point: u8,

    /// Protocol Mode (UUID: 0x2A4E)
    #[characteristic(uuid = "2a4e", read, write_without_response)]
    pub protocol_mode: u8,

    /// Report (UUID: 0x2A4D) - consumer input, with its Report Reference.
    #[characteristic(uuid = "2a4d", read, notify)]
    #[descriptor(uuid = "2908", value = "CONSUMER_REPORT_REFERENCE")]
    pub consumer_report: [u8; CONSUMER_REPORT_SIZE],
}

/// Device Information Service (UUID: 0x180A)
#[nrf_softdevice::gatt_service(uuid = "180a")]
pub struct DeviceInfoService {
    /// Manufacturer Name String (UUID: 0x2A29)
    #[characteristic(uuid = "2a29", read)]
    pub manufacturer_name: heapless::String<32>,

    /// Firmware Revision String (UUID: 0x2A26)
    #[characteristic(uuid = "2a26", read)]
    pub firmware_revision: heapless::String<16>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub hid: HidService,
    pub device_info: DeviceInfoService,
}

impl Server {
    /// Register the services and publish the firmware revision.
    pub fn start(sd: &mut Softdevice) -> Result<Self, gatt_server::RegisterError> {
        let server = Server::new(sd)?;
        info!("GATT server registered");

        let revision: heapless::String<16> = unwrap!(heapless::String::try_from(FW_VERSION));
        unwrap!(server.device_info.firmware_revision_set(&revision));
        Ok(server)
    }

    /// Load constant HID values.
    pub fn load_static_values(&self) -> Result<(), SetValueError> {
        self.hid.hid_info_set(&HID_INFORMATION)?;
        self.hid.report_map_set(&REPORT_MAP)?;
        self.hid.protocol_mode_set(&PROTOCOL_MODE_REPORT)
    }
}

/// Process GATT events for `conn` until it drops.
pub async fn run(server: &Server, conn: &Connection) {
    let _ = gatt_server::run(conn, server, |e| match e {
        ServerEvent::Hid(HidServiceEvent::ControlPointWrite(cmd)) => {
            info!("HID control point: {}", cmd);
        }
        ServerEvent::Hid(HidServiceEvent::ProtocolModeWrite(mode)) => {
            info!("HID protocol mode: {}", mode);
        }
        ServerEvent::Hid(HidServiceEvent::ConsumerReportCccdWrite { notifications }) => {
            info!("Consumer report notifications = {}", notifications);
        }
        ServerEvent::DeviceInfo(_) => {}
    })
    .await;
}
