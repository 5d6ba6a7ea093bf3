//! Connectable advertising under the device name.

use cloudmouse_ble::DeviceName;
use defmt::info;
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementBuilder, AdvertisementDataType, AdvertisementPayload, Flag, ServiceList,
    ServiceUuid16,
};
use nrf_softdevice::ble::peripheral::{self, AdvertiseError};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

/// GAP Appearance: Generic HID (0x03C0).
const APPEARANCE_HID: u16 = 0x03C0;

/// Longest name that still fits the legacy advertising payload next to the
/// flags, service list and appearance.
const MAX_ADV_NAME_LEN: usize = 15;

/// BLE advertiser bound to one device name.
pub struct Advertiser {
    adv_data: AdvertisementPayload<31>,
    scan_data: AdvertisementPayload<4>,
}

impl Advertiser {
    /// Build the advertising payload for `name`.
    pub fn new(name: &DeviceName) -> Self {
        let mut name = name.as_str();
        if name.len() > MAX_ADV_NAME_LEN {
            let mut end = MAX_ADV_NAME_LEN;
            while !name.is_char_boundary(end) {
                end -= 1;
            }
            name = &name[..end];
            info!("Name truncated to {}", name);
        }

        let adv_data = AdvertisementBuilder::new()
            .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
            .services_16(ServiceList::Complete, &[ServiceUuid16::HUMAN_INTERFACE_DEVICE])
            .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE_HID.to_le_bytes())
            .full_name(name)
            .build();

        let scan_data = AdvertisementBuilder::new().build();

        Self { adv_data, scan_data }
    }

    /// Advertise until a host connects.
    pub async fn advertise(&self, sd: &'static Softdevice) -> Result<Connection, AdvertiseError> {
        let config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &self.adv_data,
            scan_data: &self.scan_data,
        };
        info!("advertising");
        let conn = peripheral::advertise_connectable(sd, adv, &config).await;
        info!("connection established");
        conn
    }
}
