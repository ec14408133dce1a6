//! Headset identity derived once at bootstrap from the runtime's system
//! properties. Used only to pick which interaction-profile bindings to
//! suggest.

/// USB vendor id Meta/Oculus runtimes report in system properties.
pub const META_VENDOR_ID: u32 = 10291;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadsetModel {
    MetaQuest,
    MetaQuest2,
    MetaQuest3,
    MetaQuestPro,
    ViveFocus3,
    PicoNeo3,
    Pico4,
    Unknown,
}

impl HeadsetModel {
    pub fn detect(system_name: &str, vendor_id: u32) -> Self {
        let name = system_name.to_ascii_lowercase();
        if vendor_id == META_VENDOR_ID || name.contains("quest") || name.contains("oculus") {
            if name.contains("quest 3") || name.contains("quest3") {
                return HeadsetModel::MetaQuest3;
            }
            if name.contains("quest pro") {
                return HeadsetModel::MetaQuestPro;
            }
            if name.contains("quest 2") || name.contains("quest2") {
                return HeadsetModel::MetaQuest2;
            }
            if name.contains("quest") {
                return HeadsetModel::MetaQuest;
            }
            return HeadsetModel::Unknown;
        }
        if name.contains("focus 3") || name.contains("focus3") {
            return HeadsetModel::ViveFocus3;
        }
        if name.contains("neo 3") || name.contains("neo3") {
            return HeadsetModel::PicoNeo3;
        }
        if name.contains("pico 4") || name.contains("pico4") {
            return HeadsetModel::Pico4;
        }
        HeadsetModel::Unknown
    }

    pub fn is_quest_family(self) -> bool {
        matches!(
            self,
            HeadsetModel::MetaQuest
                | HeadsetModel::MetaQuest2
                | HeadsetModel::MetaQuest3
                | HeadsetModel::MetaQuestPro
        )
    }

    pub fn is_pico(self) -> bool {
        matches!(self, HeadsetModel::PicoNeo3 | HeadsetModel::Pico4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_quest3_by_name_and_vendor() {
        let model = HeadsetModel::detect("Meta Quest 3", META_VENDOR_ID);
        assert_eq!(model, HeadsetModel::MetaQuest3);
        assert!(model.is_quest_family());
        assert!(!model.is_pico());
    }

    #[test]
    fn test_detect_quest2_legacy_name() {
        assert_eq!(
            HeadsetModel::detect("Oculus Quest2", META_VENDOR_ID),
            HeadsetModel::MetaQuest2
        );
    }

    #[test]
    fn test_detect_vendor_without_model_name() {
        assert_eq!(
            HeadsetModel::detect("Monado Simulator", META_VENDOR_ID),
            HeadsetModel::Unknown
        );
    }

    #[test]
    fn test_detect_non_meta_devices() {
        assert_eq!(
            HeadsetModel::detect("VIVE Focus 3", 0x0BB4),
            HeadsetModel::ViveFocus3
        );
        assert_eq!(
            HeadsetModel::detect("Pico Neo 3", 0x2D40),
            HeadsetModel::PicoNeo3
        );
        assert_eq!(
            HeadsetModel::detect("PICO 4", 0x2D40),
            HeadsetModel::Pico4
        );
        assert_eq!(HeadsetModel::detect("Index", 10462), HeadsetModel::Unknown);
    }
}
