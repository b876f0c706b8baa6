//! Audio manager - handles media playback outside of the component render
//! cycle. A pure transport state machine holds all playback state; thin
//! per-platform controllers poll the media handle and reconcile against it.

mod transport;

pub use transport::{
    LoadDecision, MediaObservation, PlayerPhase, PollEffect, PollReconciler, Transport,
};

// Shared imports, controller context type, and browser-only helpers.
include!("shared.rs");
// Desktop-webview JavaScript bridge for native (non-wasm) targets.
include!("native_bridge.rs");
// Native (non-wasm) audio controller component.
include!("controller_native.rs");
// Web (wasm) audio controller component.
include!("controller_web.rs");
// Public playback API consumed by UI components.
include!("playback_api.rs");
