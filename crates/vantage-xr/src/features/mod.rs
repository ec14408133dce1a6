//! Optional features, each gated by the negotiated capability set and
//! independently owned. A feature that fails to initialize is logged and
//! left disabled for the session's lifetime; bootstrap continues.

pub mod hand_tracking;
pub mod layer_settings;
pub mod passthrough;
pub mod refresh_rate;

pub use hand_tracking::HandTrackingFeature;
pub use layer_settings::LayerSettingsFeature;
pub use passthrough::PassthroughFeature;
pub use refresh_rate::RefreshRateFeature;
