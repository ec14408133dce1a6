//! Camera-feed passthrough compositing. The reconstruction layer starts
//! running at creation; enabling/disabling only controls whether the
//! layer is injected into the submitted list, so a disabled feature
//! costs nothing at submit time.

use log::info;
use openxr as xr;

use crate::error::{runtime_err, Result};

pub struct PassthroughFeature {
    _passthrough: xr::Passthrough,
    layer: xr::PassthroughLayerFB,
    enabled: bool,
}

impl PassthroughFeature {
    pub fn new<G: xr::Graphics>(session: &xr::Session<G>) -> Result<Self> {
        let flags = xr::PassthroughFlagsFB::IS_RUNNING_AT_CREATION;
        let passthrough = session
            .create_passthrough(flags)
            .map_err(|e| runtime_err("create_passthrough", e))?;
        let layer = session
            .create_passthrough_layer(&passthrough, flags, xr::PassthroughLayerPurposeFB::RECONSTRUCTION)
            .map_err(|e| runtime_err("create_passthrough_layer", e))?;
        info!("passthrough layer created");
        Ok(Self {
            _passthrough: passthrough,
            layer,
            enabled: true,
        })
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!("passthrough {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Layer handle to prepend to the submission, when enabled.
    pub fn layer_handle(&self) -> Option<xr::sys::PassthroughLayerFB> {
        if self.enabled {
            Some(*self.layer.inner())
        } else {
            None
        }
    }
}
