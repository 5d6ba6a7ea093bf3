//! BLE link task and the statics it shares with the transport.
//!
//! The link manager runs on a synchronous 20 Hz loop while the SoftDevice
//! is async, so the two meet here:
//!
//! - [`LINK_COMMAND`] - start advertising under a name / stop and drop
//!   the connection, delivered in order
//! - [`CONNECTED`] - live connection level, read by the transport
//! - [`REPORTS`] - consumer reports waiting to be notified to the host

use core::pin::pin;
use core::sync::atomic::{AtomicBool, Ordering};

use cloudmouse_ble::config::{
    ADVERTISE_RETRY_MS, LINK_COMMAND_QUEUE_DEPTH, REPORT_QUEUE_DEPTH,
};
use cloudmouse_ble::{ConsumerReport, DeviceName};
use defmt::{info, warn, Format};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

use super::advertiser::Advertiser;
use super::gatt::{self, Server};

/// Commands the transport sends to the link task.
#[derive(Clone, Format)]
pub enum LinkCommand {
    /// Begin advertising under the given name.
    Start(DeviceName),
    /// Stop advertising and drop any connection.
    Stop,
}

pub static LINK_COMMAND: Channel<CriticalSectionRawMutex, LinkCommand, LINK_COMMAND_QUEUE_DEPTH> =
    Channel::new();

pub static CONNECTED: AtomicBool = AtomicBool::new(false);

pub static REPORTS: Channel<CriticalSectionRawMutex, ConsumerReport, REPORT_QUEUE_DEPTH> =
    Channel::new();

#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    info!("BLE link task started - waiting for start command");

    let mut restart: Option<DeviceName> = None;
    loop {
        let name = match restart.take() {
            Some(name) => name,
            None => match LINK_COMMAND.receive().await {
                LinkCommand::Start(name) => name,
                LinkCommand::Stop => continue,
            },
        };
        restart = run_link(sd, server, &name).await;
        info!("BLE link stopped");
    }
}

/// Advertise and serve connections until the next command arrives.
///
/// Every command ends the session. Returns the name to restart under when
/// that command was a `Start`.
async fn run_link(
    sd: &'static Softdevice,
    server: &Server,
    name: &DeviceName,
) -> Option<DeviceName> {
    let advertiser = Advertiser::new(name);

    loop {
        let conn = match select(advertiser.advertise(sd), LINK_COMMAND.receive()).await {
            Either::First(Ok(conn)) => conn,
            Either::First(Err(e)) => {
                warn!("Advertising failed: {}", e);
                match select(
                    Timer::after(Duration::from_millis(ADVERTISE_RETRY_MS)),
                    LINK_COMMAND.receive(),
                )
                .await
                {
                    Either::First(()) => continue,
                    Either::Second(cmd) => return restart_name(cmd),
                }
            }
            Either::Second(cmd) => return restart_name(cmd),
        };

        CONNECTED.store(true, Ordering::Release);
        let command = match select(serve(server, &conn), LINK_COMMAND.receive()).await {
            Either::First(()) => None,
            Either::Second(cmd) => Some(cmd),
        };
        CONNECTED.store(false, Ordering::Release);

        // Reports queued for a dead link are never replayed.
        while REPORTS.try_receive().is_ok() {}

        if let Some(cmd) = command {
            if let Err(e) = conn.disconnect() {
                warn!("Disconnect failed: {}", e);
            }
            return restart_name(cmd);
        }
        info!("host disconnected - advertising again");
    }
}

fn restart_name(cmd: LinkCommand) -> Option<DeviceName> {
    match cmd {
        LinkCommand::Stop => None,
        LinkCommand::Start(name) => Some(name),
    }
}

/// Run the GATT server and the report pump until the connection drops.
async fn serve(server: &Server, conn: &Connection) {
    let gatt = pin!(gatt::run(server, conn));
    let pump = pin!(pump_reports(server, conn));
    select(gatt, pump).await;
}

async fn pump_reports(server: &Server, conn: &Connection) {
    loop {
        let report = REPORTS.receive().await;
        if let Err(e) = server.hid.consumer_report_notify(conn, &report.to_bytes()) {
            warn!("Consumer report notify failed: {}", e);
        }
    }
}
