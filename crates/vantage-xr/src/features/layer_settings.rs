//! Composition-layer sharpening via the layer-settings chain on the
//! projection layer.

use log::info;
use openxr::sys as xrsys;

#[derive(Default)]
pub struct LayerSettingsFeature {
    sharpening: bool,
}

impl LayerSettingsFeature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sharpening(&mut self, enabled: bool) {
        if self.sharpening != enabled {
            info!("layer sharpening {}", if enabled { "on" } else { "off" });
        }
        self.sharpening = enabled;
    }

    pub fn sharpening(&self) -> bool {
        self.sharpening
    }

    /// Flags to chain onto the projection layer this frame.
    pub fn flags(&self) -> xrsys::CompositionLayerSettingsFlagsFB {
        if self.sharpening {
            xrsys::CompositionLayerSettingsFlagsFB::QUALITY_SHARPENING
        } else {
            xrsys::CompositionLayerSettingsFlagsFB::EMPTY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_toggle() {
        let mut feature = LayerSettingsFeature::new();
        assert_eq!(feature.flags(), xrsys::CompositionLayerSettingsFlagsFB::EMPTY);
        feature.set_sharpening(true);
        assert_eq!(
            feature.flags(),
            xrsys::CompositionLayerSettingsFlagsFB::QUALITY_SHARPENING
        );
        feature.set_sharpening(false);
        assert_eq!(feature.flags(), xrsys::CompositionLayerSettingsFlagsFB::EMPTY);
    }
}
