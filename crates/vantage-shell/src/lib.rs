#![forbid(unsafe_code)]

pub mod platform;
pub mod status;
pub mod types;

pub use platform::{ImageData, IntentEvent, Platform, QueuedPlatform};
pub use status::{HostStatus, StatusCell};
pub use types::{
    Eye, Fov, HandFrame, HandJointPose, InitParams, LayerBlendMode, Pose, QuadLayerParams,
    QuadPlacement, RefreshRateMode, RenderMode, ViewParams, HAND_JOINT_COUNT, VIEW_COUNT,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("platform unavailable: {0}")]
    Unavailable(String),
    #[error("platform io failure: {0}")]
    Io(String),
    #[error("render session error: {0}")]
    Render(String),
}

pub type ShellResult<T> = Result<T, ShellError>;
