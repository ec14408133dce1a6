//! OpenXR host for vantage applications.
//!
//! The host owns everything between the platform shell and the scene:
//! instance/system/session bootstrap, extension negotiation, the session
//! lifecycle state machine, controller input with per-vendor binding
//! tables, the frame pipeline, and layer composition. Graphics-API work
//! is delegated through [`GraphicsBackend`]; scene content through
//! [`RenderSession`].

pub mod app;
pub mod backend;
pub mod bindings;
pub mod caps;
pub mod composition;
pub mod error;
pub mod features;
pub mod headset;
pub mod input;
pub mod session;
pub mod views;

pub use app::{XrApp, MAX_EVENTS_PER_POLL};
pub use backend::{DeviceHandoff, GraphicsBackend, RenderPass, RenderSession};
pub use bindings::{ActionId, ActionKind, ControllerProfile};
pub use caps::{negotiate, Capabilities, ExtensionNeed, Negotiated};
pub use error::{Result, XrError};
pub use features::{
    HandTrackingFeature, LayerSettingsFeature, PassthroughFeature, RefreshRateFeature,
};
pub use headset::HeadsetModel;
pub use input::{ControllerState, InputSnapshot, XrInput};
pub use session::{SessionControl, SessionLifecycle, SessionPhase};

pub use openxr;
