//! Integration tests for the link manager through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use cloudmouse_ble::{
    ConsumerUsage, HidTransport, InputEvent, LinkManager, LinkObserver, LinkState,
    TransportError, TransportFactory,
};

// ---------------------------------------------------------------------------
// Mock transport
// ---------------------------------------------------------------------------

/// Everything the mock transport was asked to do.
#[derive(Default)]
struct Wire {
    connected: bool,
    created_with: Vec<(String, String)>,
    begun: usize,
    dropped: usize,
    releases: usize,
    keys: Vec<ConsumerUsage>,
    fail_create: bool,
    /// Transport calls in the order they happened.
    calls: Vec<&'static str>,
}

impl Wire {
    /// Any interaction at all with a transport.
    fn touched(&self) -> bool {
        !self.created_with.is_empty() || self.begun > 0 || self.releases > 0 || !self.keys.is_empty()
    }
}

type Shared = Rc<RefCell<Wire>>;

struct FakeHid(Shared);

impl HidTransport for FakeHid {
    fn begin(&mut self) -> Result<(), TransportError> {
        let mut wire = self.0.borrow_mut();
        wire.begun += 1;
        wire.calls.push("begin");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }

    fn release_all(&mut self) {
        self.0.borrow_mut().releases += 1;
    }

    fn write(&mut self, usage: ConsumerUsage) -> Result<(), TransportError> {
        self.0.borrow_mut().keys.push(usage);
        Ok(())
    }
}

impl Drop for FakeHid {
    fn drop(&mut self) {
        let mut wire = self.0.borrow_mut();
        wire.dropped += 1;
        wire.calls.push("drop");
    }
}

struct FakeFactory(Shared);

impl TransportFactory for FakeFactory {
    type Transport = FakeHid;

    fn create(&mut self, name: &str, manufacturer: &str) -> Result<FakeHid, TransportError> {
        let mut wire = self.0.borrow_mut();
        if wire.fail_create {
            return Err(TransportError::CreateFailed);
        }
        wire.created_with.push((name.to_string(), manufacturer.to_string()));
        wire.calls.push("create");
        Ok(FakeHid(self.0.clone()))
    }
}

/// Records every transition the manager reports.
#[derive(Default)]
struct Transitions(Vec<LinkState>);

impl LinkObserver for Transitions {
    fn on_transition(&mut self, _from: LinkState, to: LinkState) {
        self.0.push(to);
    }
}

fn link() -> (LinkManager<FakeFactory, Transitions>, Shared) {
    let wire = Shared::default();
    let mgr = LinkManager::with_observer(FakeFactory(wire.clone()), "AABBCCDD", Transitions::default());
    (mgr, wire)
}

fn set_live(wire: &Shared, connected: bool) {
    wire.borrow_mut().connected = connected;
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn device_name_is_prefixed_identity() {
    let (mgr, _) = link();
    assert_eq!(mgr.device_name(), "CM-AABBCCDD");
    assert_eq!(mgr.state(), LinkState::Idle);
}

#[test]
fn init_builds_transport_with_name_and_manufacturer() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");

    assert_eq!(
        wire.borrow().created_with,
        vec![("CM-AABBCCDD".to_string(), "Cloudmouse".to_string())]
    );
    assert_eq!(wire.borrow().begun, 1);
    assert_eq!(mgr.state(), LinkState::Advertising);
    assert!(mgr.is_advertising());
    assert!(!mgr.is_connected());
}

#[test]
fn calls_before_init_are_noops() {
    let (mut mgr, wire) = link();
    set_live(&wire, true);

    mgr.update();
    mgr.handle_encoder_event(&InputEvent::Rotation(5));
    mgr.handle_encoder_event(&InputEvent::Click);

    assert_eq!(mgr.state(), LinkState::Idle);
    assert!(mgr.observer().0.is_empty());
    assert!(!wire.borrow().touched());
    assert!(!mgr.is_connected());
    assert!(!mgr.is_advertising());
}

#[test]
fn shutdown_is_idempotent() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");

    mgr.shutdown();
    let after_first = mgr.observer().0.len();
    mgr.shutdown();

    assert_eq!(mgr.state(), LinkState::Idle);
    assert!(!mgr.is_initialized());
    assert_eq!(mgr.observer().0.len(), after_first);
    assert_eq!(wire.borrow().dropped, 1);
    assert!(mgr.transport_mut().is_none());
}

#[test]
fn shutdown_before_init_does_nothing() {
    let (mut mgr, wire) = link();
    mgr.shutdown();
    assert_eq!(mgr.state(), LinkState::Idle);
    assert!(mgr.observer().0.is_empty());
    assert_eq!(wire.borrow().dropped, 0);
}

#[test]
fn failed_construction_surfaces_error_state() {
    let (mut mgr, wire) = link();
    wire.borrow_mut().fail_create = true;

    assert!(mgr.init().is_err());
    assert_eq!(mgr.state(), LinkState::Error);
    assert!(!mgr.is_initialized());

    // Still inert afterwards.
    set_live(&wire, true);
    mgr.update();
    assert_eq!(mgr.state(), LinkState::Error);
}

#[test]
fn disconnect_passes_through_disconnected_and_rests_advertising() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    set_live(&wire, true);
    mgr.update();
    assert_eq!(mgr.state(), LinkState::Connected);

    let before = mgr.observer().0.len();
    set_live(&wire, false);
    mgr.update();

    assert_eq!(mgr.state(), LinkState::Advertising);
    assert_eq!(
        &mgr.observer().0[before..],
        &[LinkState::Disconnected, LinkState::Advertising]
    );
}

#[test]
fn release_all_fires_once_per_rising_edge() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    assert_eq!(mgr.state(), LinkState::Advertising);

    for live in [false, true, true, false, true] {
        set_live(&wire, live);
        mgr.update();
    }

    assert_eq!(wire.borrow().releases, 2);
    assert_eq!(mgr.state(), LinkState::Connected);
}

#[test]
fn steady_states_emit_nothing() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    let settled = mgr.observer().0.len();

    for _ in 0..5 {
        mgr.update();
    }
    assert_eq!(mgr.observer().0.len(), settled);

    set_live(&wire, true);
    mgr.update();
    let connected = mgr.observer().0.len();
    for _ in 0..5 {
        mgr.update();
    }
    assert_eq!(mgr.observer().0.len(), connected);
}

#[test]
fn reinit_after_shutdown_starts_a_fresh_transport() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    mgr.shutdown();
    mgr.init().expect("re-init");

    assert_eq!(wire.borrow().created_with.len(), 2);
    assert_eq!(wire.borrow().dropped, 1);
    assert!(mgr.is_advertising());
}

#[test]
fn restart_in_one_tick_stops_old_session_before_starting_new() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    set_live(&wire, true);
    mgr.update();

    mgr.shutdown();
    mgr.init().expect("re-init");

    assert_eq!(
        wire.borrow().calls,
        vec!["create", "begin", "drop", "create", "begin"]
    );
    assert!(mgr.is_initialized());
}

// ---------------------------------------------------------------------------
// Event translation
// ---------------------------------------------------------------------------

fn connected_link() -> (LinkManager<FakeFactory, Transitions>, Shared) {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");
    set_live(&wire, true);
    mgr.update();
    (mgr, wire)
}

#[test]
fn rotation_is_gated_on_connection() {
    let (mut mgr, wire) = link();
    mgr.init().expect("init");

    mgr.handle_encoder_event(&InputEvent::Rotation(5));
    assert!(wire.borrow().keys.is_empty());

    set_live(&wire, true);
    mgr.update();
    mgr.handle_encoder_event(&InputEvent::Rotation(5));
    assert_eq!(wire.borrow().keys, vec![ConsumerUsage::VolumeUp]);
}

#[test]
fn gating_follows_live_level_not_recorded_state() {
    let (mut mgr, wire) = connected_link();
    // Link dropped but update() has not run yet.
    set_live(&wire, false);
    mgr.handle_encoder_event(&InputEvent::Click);
    assert!(wire.borrow().keys.is_empty());
}

#[test]
fn events_map_to_expected_keys() {
    let (mut mgr, wire) = connected_link();

    mgr.handle_encoder_event(&InputEvent::Rotation(-3));
    mgr.handle_encoder_event(&InputEvent::Rotation(0));
    mgr.handle_encoder_event(&InputEvent::Click);
    mgr.handle_encoder_event(&InputEvent::LongPress(1500));
    mgr.handle_encoder_event(&InputEvent::UltraLongPress(3200));

    assert_eq!(
        wire.borrow().keys,
        vec![ConsumerUsage::VolumeDown, ConsumerUsage::Mute]
    );
}

#[test]
fn events_during_disconnect_are_not_replayed() {
    let (mut mgr, wire) = connected_link();
    set_live(&wire, false);
    mgr.update();
    mgr.handle_encoder_event(&InputEvent::Rotation(1));
    mgr.handle_encoder_event(&InputEvent::Click);

    set_live(&wire, true);
    mgr.update();
    assert!(wire.borrow().keys.is_empty());

    mgr.handle_encoder_event(&InputEvent::Rotation(2));
    assert_eq!(wire.borrow().keys, vec![ConsumerUsage::VolumeUp]);
}
