//! Extension negotiation. The runtime's advertised extension set is
//! intersected with what the backend adapter requires and what the host's
//! optional features can use; the result is an immutable capability set
//! that gates every optional code path for the rest of the session.

use std::collections::BTreeSet;

use log::{debug, info};
use openxr as xr;

use crate::error::{Result, XrError};

/// Canonical extension name strings, as the runtime reports them.
pub mod ext {
    pub const FB_PASSTHROUGH: &str = "XR_FB_passthrough";
    pub const EXT_HAND_TRACKING: &str = "XR_EXT_hand_tracking";
    pub const FB_DISPLAY_REFRESH_RATE: &str = "XR_FB_display_refresh_rate";
    pub const FB_COMPOSITION_LAYER_SETTINGS: &str = "XR_FB_composition_layer_settings";
    pub const FB_COMPOSITION_LAYER_ALPHA_BLEND: &str = "XR_FB_composition_layer_alpha_blend";
    pub const KHR_COMPOSITION_LAYER_DEPTH: &str = "XR_KHR_composition_layer_depth";
    pub const FB_TOUCH_CONTROLLER_PRO: &str = "XR_FB_touch_controller_pro";
    pub const HTC_VIVE_FOCUS3_CONTROLLER: &str = "XR_HTC_vive_focus3_controller_interaction";
    pub const BD_CONTROLLER_INTERACTION: &str = "XR_BD_controller_interaction";
}

/// One extension the host or a backend adapter can make use of.
///
/// `probe` reads the runtime's advertised set; `enable` flips the same
/// flag on the set handed to instance creation. Expressing both as plain
/// function pointers keeps the negotiation loop generic over any mix of
/// host and backend needs.
#[derive(Clone, Copy)]
pub struct ExtensionNeed {
    pub name: &'static str,
    pub probe: fn(&xr::ExtensionSet) -> bool,
    pub enable: fn(&mut xr::ExtensionSet),
}

impl std::fmt::Debug for ExtensionNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionNeed").field("name", &self.name).finish()
    }
}

/// Optional extensions the host itself knows how to use, independent of
/// the graphics backend.
pub const HOST_OPTIONAL: &[ExtensionNeed] = &[
    ExtensionNeed {
        name: ext::FB_PASSTHROUGH,
        probe: |e| e.fb_passthrough,
        enable: |e| e.fb_passthrough = true,
    },
    ExtensionNeed {
        name: ext::EXT_HAND_TRACKING,
        probe: |e| e.ext_hand_tracking,
        enable: |e| e.ext_hand_tracking = true,
    },
    ExtensionNeed {
        name: ext::FB_DISPLAY_REFRESH_RATE,
        probe: |e| e.fb_display_refresh_rate,
        enable: |e| e.fb_display_refresh_rate = true,
    },
    ExtensionNeed {
        name: ext::FB_COMPOSITION_LAYER_SETTINGS,
        probe: |e| e.fb_composition_layer_settings,
        enable: |e| e.fb_composition_layer_settings = true,
    },
    ExtensionNeed {
        name: ext::FB_COMPOSITION_LAYER_ALPHA_BLEND,
        probe: |e| e.fb_composition_layer_alpha_blend,
        enable: |e| e.fb_composition_layer_alpha_blend = true,
    },
    ExtensionNeed {
        name: ext::KHR_COMPOSITION_LAYER_DEPTH,
        probe: |e| e.khr_composition_layer_depth,
        enable: |e| e.khr_composition_layer_depth = true,
    },
    ExtensionNeed {
        name: ext::FB_TOUCH_CONTROLLER_PRO,
        probe: |e| e.fb_touch_controller_pro,
        enable: |e| e.fb_touch_controller_pro = true,
    },
    ExtensionNeed {
        name: ext::HTC_VIVE_FOCUS3_CONTROLLER,
        probe: |e| e.htc_vive_focus3_controller_interaction,
        enable: |e| e.htc_vive_focus3_controller_interaction = true,
    },
    ExtensionNeed {
        name: ext::BD_CONTROLLER_INTERACTION,
        probe: |e| e.bd_controller_interaction,
        enable: |e| e.bd_controller_interaction = true,
    },
];

/// Negotiated capability set. Write-once at bootstrap, read-only after;
/// safe to share with auxiliary threads by reference.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    names: BTreeSet<&'static str>,
}

impl Capabilities {
    pub fn supports(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn passthrough(&self) -> bool {
        self.supports(ext::FB_PASSTHROUGH)
    }

    pub fn hand_tracking(&self) -> bool {
        self.supports(ext::EXT_HAND_TRACKING)
    }

    pub fn refresh_rate(&self) -> bool {
        self.supports(ext::FB_DISPLAY_REFRESH_RATE)
    }

    pub fn layer_settings(&self) -> bool {
        self.supports(ext::FB_COMPOSITION_LAYER_SETTINGS)
    }

    pub fn alpha_blend_layers(&self) -> bool {
        self.supports(ext::FB_COMPOSITION_LAYER_ALPHA_BLEND)
    }

    pub fn depth_layers(&self) -> bool {
        self.supports(ext::KHR_COMPOSITION_LAYER_DEPTH)
    }

    pub fn touch_controller_pro(&self) -> bool {
        self.supports(ext::FB_TOUCH_CONTROLLER_PRO)
    }

    pub fn vive_focus3_controller(&self) -> bool {
        self.supports(ext::HTC_VIVE_FOCUS3_CONTROLLER)
    }

    pub fn pico_controller(&self) -> bool {
        self.supports(ext::BD_CONTROLLER_INTERACTION)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

/// Result of negotiation: the capability set plus the extension set to
/// request at instance creation.
#[derive(Debug, Clone)]
pub struct Negotiated {
    pub caps: Capabilities,
    pub enabled: xr::ExtensionSet,
}

/// Intersects runtime-advertised extensions with the backend's required
/// and optional lists plus [`HOST_OPTIONAL`]. A missing required
/// extension fails negotiation; missing optional extensions are logged
/// and skipped.
pub fn negotiate(
    available: &xr::ExtensionSet,
    required: &[ExtensionNeed],
    optional: &[ExtensionNeed],
) -> Result<Negotiated> {
    let mut enabled = xr::ExtensionSet::default();
    let mut names = BTreeSet::new();

    for need in required {
        if !(need.probe)(available) {
            return Err(XrError::MissingExtension(need.name));
        }
        (need.enable)(&mut enabled);
        names.insert(need.name);
    }

    for need in optional.iter().chain(HOST_OPTIONAL) {
        if (need.probe)(available) {
            (need.enable)(&mut enabled);
            names.insert(need.name);
        } else {
            debug!("optional extension {} not available", need.name);
        }
    }

    let caps = Capabilities { names };
    info!(
        "negotiated extensions: {}",
        caps.names().collect::<Vec<_>>().join(", ")
    );
    Ok(Negotiated { caps, enabled })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAKE_REQUIRED: &[ExtensionNeed] = &[ExtensionNeed {
        name: "XR_KHR_vulkan_enable2",
        probe: |e| e.khr_vulkan_enable2,
        enable: |e| e.khr_vulkan_enable2 = true,
    }];

    fn sample_runtime_exts() -> xr::ExtensionSet {
        let mut exts = xr::ExtensionSet::default();
        exts.khr_vulkan_enable2 = true;
        exts.fb_passthrough = true;
        exts.fb_display_refresh_rate = true;
        exts.ext_hand_tracking = true;
        exts
    }

    #[test]
    fn test_missing_required_extension_is_fatal() {
        let available = xr::ExtensionSet::default();
        let err = negotiate(&available, FAKE_REQUIRED, &[]).unwrap_err();
        assert!(matches!(err, XrError::MissingExtension(name) if name.contains("vulkan")));
    }

    #[test]
    fn test_optional_extensions_gate_capabilities() {
        let negotiated = negotiate(&sample_runtime_exts(), FAKE_REQUIRED, &[]).unwrap();
        assert!(negotiated.caps.passthrough());
        assert!(negotiated.caps.refresh_rate());
        assert!(negotiated.caps.hand_tracking());
        // Not advertised by the runtime, so not negotiated.
        assert!(!negotiated.caps.layer_settings());
        assert!(!negotiated.caps.touch_controller_pro());
        assert!(!negotiated.caps.pico_controller());
    }

    #[test]
    fn test_enabled_set_matches_capabilities() {
        let negotiated = negotiate(&sample_runtime_exts(), FAKE_REQUIRED, &[]).unwrap();
        assert!(negotiated.enabled.khr_vulkan_enable2);
        assert!(negotiated.enabled.fb_passthrough);
        assert!(negotiated.enabled.ext_hand_tracking);
        assert!(!negotiated.enabled.fb_composition_layer_settings);
    }

    #[test]
    fn test_missing_optional_is_not_fatal() {
        let mut available = xr::ExtensionSet::default();
        available.khr_vulkan_enable2 = true;
        let negotiated = negotiate(&available, FAKE_REQUIRED, &[]).unwrap();
        assert!(!negotiated.caps.passthrough());
        assert!(!negotiated.caps.hand_tracking());
    }
}
