//! BLE link lifecycle manager.
//!
//! Owns the HID transport and walks it through
//! `Idle → Initializing → Advertising ⇄ Connected`. Connection changes are
//! detected by polling: every [`LinkManager::update`] compares the
//! transport's live connection level with the recorded state.
//!
//! ```text
//!   Idle ──init──► Initializing ──► Advertising ◄──────────┐
//!                       │                │                 │
//!                 (start failed)     live = true     (same update)
//!                       ▼                ▼                 │
//!                     Error          Connected ──live = false──► Disconnected
//! ```

use crate::config::DEVICE_MANUFACTURER;
use crate::error::{Error, TransportError};
use crate::identity::{self, DeviceName};
use crate::input::InputEvent;
use crate::transport::{HidTransport, TransportFactory};
use crate::translator;

/// Link lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Transport not created.
    Idle,
    /// Transport being created and started.
    Initializing,
    /// Advertising, waiting for a host.
    Advertising,
    /// A host is connected.
    Connected,
    /// The host just dropped. Only passed through inside a single
    /// `update()`; the manager re-advertises immediately.
    Disconnected,
    /// The transport could not be created or started.
    Error,
}

impl LinkState {
    /// Upper-case name used in status lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            LinkState::Idle => "IDLE",
            LinkState::Initializing => "INITIALIZING",
            LinkState::Advertising => "ADVERTISING",
            LinkState::Connected => "CONNECTED",
            LinkState::Disconnected => "DISCONNECTED",
            LinkState::Error => "ERROR",
        }
    }
}

/// Receives every effective state transition of a [`LinkManager`].
pub trait LinkObserver {
    fn on_transition(&mut self, from: LinkState, to: LinkState);
}

/// Default observer: one status line per transition on the platform log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl LinkObserver for LogObserver {
    fn on_transition(&mut self, _from: LinkState, to: LinkState) {
        info!("Bluetooth state: {}", to.as_str());
    }
}

/// Connection lifecycle manager for one BLE HID link.
///
/// Not internally synchronized: `update` and `handle_encoder_event` take
/// `&mut self` and are meant to be driven from a single control loop.
pub struct LinkManager<F: TransportFactory, O: LinkObserver = LogObserver> {
    device_name: DeviceName,
    manufacturer: &'static str,
    factory: F,
    transport: Option<F::Transport>,
    state: LinkState,
    initialized: bool,
    observer: O,
}

impl<F: TransportFactory> LinkManager<F, LogObserver> {
    /// Create a manager whose advertised name is derived from `device_id`.
    /// Nothing is started until [`init`](Self::init).
    pub fn new(factory: F, device_id: &str) -> Self {
        Self::with_observer(factory, device_id, LogObserver)
    }
}

impl<F: TransportFactory, O: LinkObserver> LinkManager<F, O> {
    /// Like [`new`](LinkManager::new), reporting transitions to `observer`.
    pub fn with_observer(factory: F, device_id: &str, observer: O) -> Self {
        Self {
            device_name: identity::device_name(device_id),
            manufacturer: DEVICE_MANUFACTURER,
            factory,
            transport: None,
            state: LinkState::Idle,
            initialized: false,
            observer,
        }
    }

    // Lifecycle

    /// Create and start the transport, then advertise.
    ///
    /// Does nothing if the link is already up. On failure the partially
    /// built transport is dropped, the link stays uninitialized and the
    /// state becomes [`LinkState::Error`]; calling `init` again retries.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.initialized {
            return Ok(());
        }

        info!("Initializing Bluetooth link...");
        self.set_state(LinkState::Initializing);

        match self.start_transport() {
            Ok(transport) => {
                self.transport = Some(transport);
                self.initialized = true;
                self.set_state(LinkState::Advertising);
                info!("Bluetooth initialized: {}", self.device_name.as_str());
                info!("Advertising... waiting for connection");
                Ok(())
            }
            Err(e) => {
                warn!("Bluetooth init failed: {}", e);
                self.set_state(LinkState::Error);
                Err(e.into())
            }
        }
    }

    fn start_transport(&mut self) -> Result<F::Transport, TransportError> {
        let mut transport = self
            .factory
            .create(self.device_name.as_str(), self.manufacturer)?;
        transport.begin()?;
        Ok(transport)
    }

    /// Poll the transport once and apply any connect/disconnect edge.
    ///
    /// A drop is handled entirely within this call: the state passes
    /// through `Disconnected` and comes to rest in `Advertising`.
    pub fn update(&mut self) {
        if !self.initialized {
            return;
        }
        let connected = match &self.transport {
            Some(transport) => transport.is_connected(),
            None => return,
        };

        if connected && self.state != LinkState::Connected {
            self.set_state(LinkState::Connected);
            info!("Host connected");
            // Benign nudge that syncs the host's key state.
            if let Some(transport) = self.transport.as_mut() {
                transport.release_all();
            }
        } else if !connected && self.state == LinkState::Connected {
            self.set_state(LinkState::Disconnected);
            info!("Host disconnected");
            self.set_state(LinkState::Advertising);
            info!("Advertising... waiting for reconnection");
        }
    }

    /// Drop the transport and return to `Idle`. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        info!("Shutting down Bluetooth...");
        self.transport = None;
        self.initialized = false;
        self.set_state(LinkState::Idle);
        info!("Bluetooth shutdown complete");
    }

    // Status

    /// `true` if the link is up and the transport reports a connected host.
    pub fn is_connected(&self) -> bool {
        self.initialized
            && self
                .transport
                .as_ref()
                .is_some_and(|transport| transport.is_connected())
    }

    /// `true` if the link is up and waiting for a host.
    pub fn is_advertising(&self) -> bool {
        self.initialized && self.state == LinkState::Advertising
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Advertised device name.
    pub fn device_name(&self) -> &str {
        self.device_name.as_str()
    }

    pub fn manufacturer(&self) -> &'static str {
        self.manufacturer
    }

    /// Application-layer access to the transport while the link is up.
    pub fn transport_mut(&mut self) -> Option<&mut F::Transport> {
        self.transport.as_mut()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    // Input

    /// Translate an encoder event into a consumer key and send it.
    ///
    /// Events arriving while no host is connected are dropped, not queued.
    /// Delivery is best effort: a failed write is logged and forgotten.
    pub fn handle_encoder_event(&mut self, event: &InputEvent) {
        if !self.is_connected() {
            return;
        }
        let Some(usage) = translator::translate(event) else {
            return;
        };
        if let Some(transport) = self.transport.as_mut() {
            match transport.write(usage) {
                Ok(()) => debug!("Sent consumer key {}", usage.code()),
                Err(e) => warn!("HID write failed: {}", e),
            }
        }
    }

    fn set_state(&mut self, next: LinkState) {
        if self.state == next {
            return;
        }
        let prev = core::mem::replace(&mut self.state, next);
        self.observer.on_transition(prev, next);
    }
}
