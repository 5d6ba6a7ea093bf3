//! CloudMouse BLE firmware entry point.
//!
//! Brings up the SoftDevice and GATT server, spawns the BLE link and
//! encoder tasks, then runs the 20 Hz control loop that owns the
//! [`LinkManager`].

#![no_std]
#![no_main]

mod ble;
mod encoder;

use cloudmouse_ble::config::LINK_UPDATE_INTERVAL_MS;
use cloudmouse_ble::{device_name, format_device_id, DeviceName, LinkManager};
use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::Priority;
use embassy_time::{Duration, Ticker};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};

use crate::ble::gatt::Server;
use crate::ble::SoftdeviceFactory;
use crate::encoder::INPUT_EVENTS;

static NAME: StaticCell<DeviceName> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CloudMouse BLE starting");

    // SoftDevice reserves the highest interrupt priorities.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    // Low 32 bits of the factory device identifier.
    let device_id = format_device_id(embassy_nrf::pac::FICR.deviceid(0).read());
    info!("Device ID: {}", device_id.as_str());
    let name: &'static DeviceName = NAME.init(device_name(device_id.as_str()));

    let sd = ble::enable_softdevice(name.as_str());
    let server: &'static Server = SERVER.init(unwrap!(Server::start(sd)));
    let sd: &'static Softdevice = sd;

    unwrap!(spawner.spawn(ble::softdevice_task(sd)));
    unwrap!(spawner.spawn(ble::link::ble_task(sd, server)));
    unwrap!(spawner.spawn(encoder::rotation_task(
        p.P0_03.degrade(),
        p.P0_04.degrade()
    )));
    unwrap!(spawner.spawn(encoder::switch_task(p.P0_28.degrade())));

    let mut link = LinkManager::new(SoftdeviceFactory::new(server), device_id.as_str());
    if let Err(e) = link.init() {
        error!("Bluetooth link failed to start: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(LINK_UPDATE_INTERVAL_MS));
    loop {
        while let Ok(event) = INPUT_EVENTS.try_receive() {
            link.handle_encoder_event(&event);
            // Let the link task notify queued reports before the next event.
            yield_now().await;
        }
        link.update();
        ticker.next().await;
    }
}
