//! Controller interaction profiles as data.
//!
//! Every profile is a static table of (action, hardware path) pairs; the
//! suggestion loop in `input` iterates these generically. An action with
//! no entry in a table means the profile does not expose that
//! affordance. Profile selection is gated by the negotiated capability
//! set and, for the Pico variants, by the detected headset model.

use crate::caps::Capabilities;
use crate::headset::HeadsetModel;

/// The fixed action superset the host creates regardless of hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    GripPose,
    AimPose,
    TriggerValue,
    TriggerClick,
    TriggerTouch,
    SqueezeValue,
    SqueezeClick,
    SqueezeTouch,
    Thumbstick,
    ThumbstickClick,
    ThumbstickTouch,
    Trackpad,
    TrackpadClick,
    ThumbrestTouch,
    /// Created for completeness; no current profile table binds it.
    ThumbrestClick,
    ThumbrestForce,
    ThumbProximity,
    PinchValue,
    PinchForce,
    PrimaryClick,
    PrimaryTouch,
    SecondaryClick,
    SecondaryTouch,
    MenuClick,
    Grab,
    Haptic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Pose,
    Float,
    Bool,
    Vec2,
    Haptic,
}

impl ActionId {
    pub const ALL: &'static [ActionId] = &[
        ActionId::GripPose,
        ActionId::AimPose,
        ActionId::TriggerValue,
        ActionId::TriggerClick,
        ActionId::TriggerTouch,
        ActionId::SqueezeValue,
        ActionId::SqueezeClick,
        ActionId::SqueezeTouch,
        ActionId::Thumbstick,
        ActionId::ThumbstickClick,
        ActionId::ThumbstickTouch,
        ActionId::Trackpad,
        ActionId::TrackpadClick,
        ActionId::ThumbrestTouch,
        ActionId::ThumbrestClick,
        ActionId::ThumbrestForce,
        ActionId::ThumbProximity,
        ActionId::PinchValue,
        ActionId::PinchForce,
        ActionId::PrimaryClick,
        ActionId::PrimaryTouch,
        ActionId::SecondaryClick,
        ActionId::SecondaryTouch,
        ActionId::MenuClick,
        ActionId::Grab,
        ActionId::Haptic,
    ];

    pub fn kind(self) -> ActionKind {
        match self {
            ActionId::GripPose | ActionId::AimPose => ActionKind::Pose,
            ActionId::TriggerValue
            | ActionId::SqueezeValue
            | ActionId::ThumbrestForce
            | ActionId::PinchValue
            | ActionId::PinchForce
            | ActionId::Grab => ActionKind::Float,
            ActionId::Thumbstick | ActionId::Trackpad => ActionKind::Vec2,
            ActionId::Haptic => ActionKind::Haptic,
            _ => ActionKind::Bool,
        }
    }

    /// Runtime-facing action name (lowercase, no spaces).
    pub fn name(self) -> &'static str {
        match self {
            ActionId::GripPose => "grip_pose",
            ActionId::AimPose => "aim_pose",
            ActionId::TriggerValue => "trigger_value",
            ActionId::TriggerClick => "trigger_click",
            ActionId::TriggerTouch => "trigger_touch",
            ActionId::SqueezeValue => "squeeze_value",
            ActionId::SqueezeClick => "squeeze_click",
            ActionId::SqueezeTouch => "squeeze_touch",
            ActionId::Thumbstick => "thumbstick",
            ActionId::ThumbstickClick => "thumbstick_click",
            ActionId::ThumbstickTouch => "thumbstick_touch",
            ActionId::Trackpad => "trackpad",
            ActionId::TrackpadClick => "trackpad_click",
            ActionId::ThumbrestTouch => "thumbrest_touch",
            ActionId::ThumbrestClick => "thumbrest_click",
            ActionId::ThumbrestForce => "thumbrest_force",
            ActionId::ThumbProximity => "thumb_proximity",
            ActionId::PinchValue => "pinch_value",
            ActionId::PinchForce => "pinch_force",
            ActionId::PrimaryClick => "primary_click",
            ActionId::PrimaryTouch => "primary_touch",
            ActionId::SecondaryClick => "secondary_click",
            ActionId::SecondaryTouch => "secondary_touch",
            ActionId::MenuClick => "menu_click",
            ActionId::Grab => "grab",
            ActionId::Haptic => "haptic",
        }
    }

    pub fn localized_name(self) -> &'static str {
        match self {
            ActionId::GripPose => "Grip Pose",
            ActionId::AimPose => "Aim Pose",
            ActionId::TriggerValue => "Trigger Value",
            ActionId::TriggerClick => "Trigger Click",
            ActionId::TriggerTouch => "Trigger Touch",
            ActionId::SqueezeValue => "Squeeze Value",
            ActionId::SqueezeClick => "Squeeze Click",
            ActionId::SqueezeTouch => "Squeeze Touch",
            ActionId::Thumbstick => "Thumbstick",
            ActionId::ThumbstickClick => "Thumbstick Click",
            ActionId::ThumbstickTouch => "Thumbstick Touch",
            ActionId::Trackpad => "Trackpad",
            ActionId::TrackpadClick => "Trackpad Click",
            ActionId::ThumbrestTouch => "Thumbrest Touch",
            ActionId::ThumbrestClick => "Thumbrest Click",
            ActionId::ThumbrestForce => "Thumbrest Force",
            ActionId::ThumbProximity => "Thumb Proximity",
            ActionId::PinchValue => "Pinch Value",
            ActionId::PinchForce => "Pinch Force",
            ActionId::PrimaryClick => "Primary Click",
            ActionId::PrimaryTouch => "Primary Touch",
            ActionId::SecondaryClick => "Secondary Click",
            ActionId::SecondaryTouch => "Secondary Touch",
            ActionId::MenuClick => "Menu Click",
            ActionId::Grab => "Grab",
            ActionId::Haptic => "Haptic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerProfile {
    KhrSimple,
    OculusTouch,
    TouchPro,
    ViveFocus3,
    PicoNeo3,
    Pico4,
}

impl ControllerProfile {
    pub fn path(self) -> &'static str {
        match self {
            ControllerProfile::KhrSimple => "/interaction_profiles/khr/simple_controller",
            ControllerProfile::OculusTouch => "/interaction_profiles/oculus/touch_controller",
            ControllerProfile::TouchPro => "/interaction_profiles/facebook/touch_controller_pro",
            ControllerProfile::ViveFocus3 => "/interaction_profiles/htc/vive_focus3_controller",
            ControllerProfile::PicoNeo3 => "/interaction_profiles/pico/neo3_controller",
            ControllerProfile::Pico4 => "/interaction_profiles/bytedance/pico4_controller",
        }
    }
}

pub type BindingEntry = (ActionId, &'static str);

const KHR_SIMPLE: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerClick, "/user/hand/left/input/select/click"),
    (ActionId::TriggerClick, "/user/hand/right/input/select/click"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::MenuClick, "/user/hand/right/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

const OCULUS_TOUCH: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerValue, "/user/hand/left/input/trigger/value"),
    (ActionId::TriggerValue, "/user/hand/right/input/trigger/value"),
    (ActionId::TriggerTouch, "/user/hand/left/input/trigger/touch"),
    (ActionId::TriggerTouch, "/user/hand/right/input/trigger/touch"),
    (ActionId::SqueezeValue, "/user/hand/left/input/squeeze/value"),
    (ActionId::SqueezeValue, "/user/hand/right/input/squeeze/value"),
    (ActionId::Grab, "/user/hand/left/input/squeeze/value"),
    (ActionId::Grab, "/user/hand/right/input/squeeze/value"),
    (ActionId::Thumbstick, "/user/hand/left/input/thumbstick"),
    (ActionId::Thumbstick, "/user/hand/right/input/thumbstick"),
    (ActionId::ThumbstickClick, "/user/hand/left/input/thumbstick/click"),
    (ActionId::ThumbstickClick, "/user/hand/right/input/thumbstick/click"),
    (ActionId::ThumbstickTouch, "/user/hand/left/input/thumbstick/touch"),
    (ActionId::ThumbstickTouch, "/user/hand/right/input/thumbstick/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/left/input/thumbrest/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/right/input/thumbrest/touch"),
    (ActionId::PrimaryClick, "/user/hand/left/input/x/click"),
    (ActionId::PrimaryClick, "/user/hand/right/input/a/click"),
    (ActionId::PrimaryTouch, "/user/hand/left/input/x/touch"),
    (ActionId::PrimaryTouch, "/user/hand/right/input/a/touch"),
    (ActionId::SecondaryClick, "/user/hand/left/input/y/click"),
    (ActionId::SecondaryClick, "/user/hand/right/input/b/click"),
    (ActionId::SecondaryTouch, "/user/hand/left/input/y/touch"),
    (ActionId::SecondaryTouch, "/user/hand/right/input/b/touch"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

const TOUCH_PRO: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerValue, "/user/hand/left/input/trigger/value"),
    (ActionId::TriggerValue, "/user/hand/right/input/trigger/value"),
    (ActionId::TriggerTouch, "/user/hand/left/input/trigger/touch"),
    (ActionId::TriggerTouch, "/user/hand/right/input/trigger/touch"),
    (ActionId::SqueezeValue, "/user/hand/left/input/squeeze/value"),
    (ActionId::SqueezeValue, "/user/hand/right/input/squeeze/value"),
    (ActionId::Grab, "/user/hand/left/input/squeeze/value"),
    (ActionId::Grab, "/user/hand/right/input/squeeze/value"),
    (ActionId::Thumbstick, "/user/hand/left/input/thumbstick"),
    (ActionId::Thumbstick, "/user/hand/right/input/thumbstick"),
    (ActionId::ThumbstickClick, "/user/hand/left/input/thumbstick/click"),
    (ActionId::ThumbstickClick, "/user/hand/right/input/thumbstick/click"),
    (ActionId::ThumbstickTouch, "/user/hand/left/input/thumbstick/touch"),
    (ActionId::ThumbstickTouch, "/user/hand/right/input/thumbstick/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/left/input/thumbrest/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/right/input/thumbrest/touch"),
    (ActionId::ThumbrestForce, "/user/hand/left/input/thumbrest/force"),
    (ActionId::ThumbrestForce, "/user/hand/right/input/thumbrest/force"),
    (ActionId::ThumbProximity, "/user/hand/left/input/thumb_fb/proximity_fb"),
    (ActionId::ThumbProximity, "/user/hand/right/input/thumb_fb/proximity_fb"),
    (ActionId::PrimaryClick, "/user/hand/left/input/x/click"),
    (ActionId::PrimaryClick, "/user/hand/right/input/a/click"),
    (ActionId::PrimaryTouch, "/user/hand/left/input/x/touch"),
    (ActionId::PrimaryTouch, "/user/hand/right/input/a/touch"),
    (ActionId::SecondaryClick, "/user/hand/left/input/y/click"),
    (ActionId::SecondaryClick, "/user/hand/right/input/b/click"),
    (ActionId::SecondaryTouch, "/user/hand/left/input/y/touch"),
    (ActionId::SecondaryTouch, "/user/hand/right/input/b/touch"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

const VIVE_FOCUS3: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerValue, "/user/hand/left/input/trigger/value"),
    (ActionId::TriggerValue, "/user/hand/right/input/trigger/value"),
    (ActionId::TriggerClick, "/user/hand/left/input/trigger/click"),
    (ActionId::TriggerClick, "/user/hand/right/input/trigger/click"),
    (ActionId::TriggerTouch, "/user/hand/left/input/trigger/touch"),
    (ActionId::TriggerTouch, "/user/hand/right/input/trigger/touch"),
    (ActionId::SqueezeClick, "/user/hand/left/input/squeeze/click"),
    (ActionId::SqueezeClick, "/user/hand/right/input/squeeze/click"),
    (ActionId::SqueezeTouch, "/user/hand/left/input/squeeze/touch"),
    (ActionId::SqueezeTouch, "/user/hand/right/input/squeeze/touch"),
    (ActionId::Thumbstick, "/user/hand/left/input/thumbstick"),
    (ActionId::Thumbstick, "/user/hand/right/input/thumbstick"),
    (ActionId::ThumbstickClick, "/user/hand/left/input/thumbstick/click"),
    (ActionId::ThumbstickClick, "/user/hand/right/input/thumbstick/click"),
    (ActionId::ThumbstickTouch, "/user/hand/left/input/thumbstick/touch"),
    (ActionId::ThumbstickTouch, "/user/hand/right/input/thumbstick/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/left/input/thumbrest/touch"),
    (ActionId::ThumbrestTouch, "/user/hand/right/input/thumbrest/touch"),
    (ActionId::PrimaryClick, "/user/hand/left/input/x/click"),
    (ActionId::PrimaryClick, "/user/hand/right/input/a/click"),
    (ActionId::SecondaryClick, "/user/hand/left/input/y/click"),
    (ActionId::SecondaryClick, "/user/hand/right/input/b/click"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

const PICO_NEO3: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerValue, "/user/hand/left/input/trigger/value"),
    (ActionId::TriggerValue, "/user/hand/right/input/trigger/value"),
    (ActionId::TriggerClick, "/user/hand/left/input/trigger/click"),
    (ActionId::TriggerClick, "/user/hand/right/input/trigger/click"),
    (ActionId::TriggerTouch, "/user/hand/left/input/trigger/touch"),
    (ActionId::TriggerTouch, "/user/hand/right/input/trigger/touch"),
    (ActionId::SqueezeValue, "/user/hand/left/input/squeeze/value"),
    (ActionId::SqueezeValue, "/user/hand/right/input/squeeze/value"),
    (ActionId::SqueezeClick, "/user/hand/left/input/squeeze/click"),
    (ActionId::SqueezeClick, "/user/hand/right/input/squeeze/click"),
    (ActionId::Thumbstick, "/user/hand/left/input/thumbstick"),
    (ActionId::Thumbstick, "/user/hand/right/input/thumbstick"),
    (ActionId::ThumbstickClick, "/user/hand/left/input/thumbstick/click"),
    (ActionId::ThumbstickClick, "/user/hand/right/input/thumbstick/click"),
    (ActionId::ThumbstickTouch, "/user/hand/left/input/thumbstick/touch"),
    (ActionId::ThumbstickTouch, "/user/hand/right/input/thumbstick/touch"),
    (ActionId::PrimaryClick, "/user/hand/left/input/x/click"),
    (ActionId::PrimaryClick, "/user/hand/right/input/a/click"),
    (ActionId::PrimaryTouch, "/user/hand/left/input/x/touch"),
    (ActionId::PrimaryTouch, "/user/hand/right/input/a/touch"),
    (ActionId::SecondaryClick, "/user/hand/left/input/y/click"),
    (ActionId::SecondaryClick, "/user/hand/right/input/b/click"),
    (ActionId::SecondaryTouch, "/user/hand/left/input/y/touch"),
    (ActionId::SecondaryTouch, "/user/hand/right/input/b/touch"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::MenuClick, "/user/hand/right/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

const PICO4: &[BindingEntry] = &[
    (ActionId::GripPose, "/user/hand/left/input/grip/pose"),
    (ActionId::GripPose, "/user/hand/right/input/grip/pose"),
    (ActionId::AimPose, "/user/hand/left/input/aim/pose"),
    (ActionId::AimPose, "/user/hand/right/input/aim/pose"),
    (ActionId::TriggerValue, "/user/hand/left/input/trigger/value"),
    (ActionId::TriggerValue, "/user/hand/right/input/trigger/value"),
    (ActionId::TriggerTouch, "/user/hand/left/input/trigger/touch"),
    (ActionId::TriggerTouch, "/user/hand/right/input/trigger/touch"),
    (ActionId::SqueezeValue, "/user/hand/left/input/squeeze/value"),
    (ActionId::SqueezeValue, "/user/hand/right/input/squeeze/value"),
    (ActionId::SqueezeClick, "/user/hand/left/input/squeeze/click"),
    (ActionId::SqueezeClick, "/user/hand/right/input/squeeze/click"),
    (ActionId::Thumbstick, "/user/hand/left/input/thumbstick"),
    (ActionId::Thumbstick, "/user/hand/right/input/thumbstick"),
    (ActionId::ThumbstickClick, "/user/hand/left/input/thumbstick/click"),
    (ActionId::ThumbstickClick, "/user/hand/right/input/thumbstick/click"),
    (ActionId::ThumbstickTouch, "/user/hand/left/input/thumbstick/touch"),
    (ActionId::ThumbstickTouch, "/user/hand/right/input/thumbstick/touch"),
    (ActionId::PrimaryClick, "/user/hand/left/input/x/click"),
    (ActionId::PrimaryClick, "/user/hand/right/input/a/click"),
    (ActionId::PrimaryTouch, "/user/hand/left/input/x/touch"),
    (ActionId::PrimaryTouch, "/user/hand/right/input/a/touch"),
    (ActionId::SecondaryClick, "/user/hand/left/input/y/click"),
    (ActionId::SecondaryClick, "/user/hand/right/input/b/click"),
    (ActionId::SecondaryTouch, "/user/hand/left/input/y/touch"),
    (ActionId::SecondaryTouch, "/user/hand/right/input/b/touch"),
    (ActionId::MenuClick, "/user/hand/left/input/menu/click"),
    (ActionId::Haptic, "/user/hand/left/output/haptic"),
    (ActionId::Haptic, "/user/hand/right/output/haptic"),
];

pub fn profile_bindings(profile: ControllerProfile) -> &'static [BindingEntry] {
    match profile {
        ControllerProfile::KhrSimple => KHR_SIMPLE,
        ControllerProfile::OculusTouch => OCULUS_TOUCH,
        ControllerProfile::TouchPro => TOUCH_PRO,
        ControllerProfile::ViveFocus3 => VIVE_FOCUS3,
        ControllerProfile::PicoNeo3 => PICO_NEO3,
        ControllerProfile::Pico4 => PICO4,
    }
}

/// Profiles worth suggesting for this runtime and headset. The runtime
/// ultimately picks whichever profile matches connected hardware; the
/// host only declares what it is prepared to support.
pub fn suggested_profiles(caps: &Capabilities, headset: HeadsetModel) -> Vec<ControllerProfile> {
    let mut profiles = vec![ControllerProfile::KhrSimple, ControllerProfile::OculusTouch];
    if caps.touch_controller_pro() {
        profiles.push(ControllerProfile::TouchPro);
    }
    if caps.vive_focus3_controller() {
        profiles.push(ControllerProfile::ViveFocus3);
    }
    if caps.pico_controller() {
        match headset {
            HeadsetModel::PicoNeo3 => profiles.push(ControllerProfile::PicoNeo3),
            HeadsetModel::Pico4 => profiles.push(ControllerProfile::Pico4),
            _ => {}
        }
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{negotiate, Capabilities};
    use openxr as xr;

    fn caps_with(f: impl Fn(&mut xr::ExtensionSet)) -> Capabilities {
        let mut available = xr::ExtensionSet::default();
        f(&mut available);
        negotiate(&available, &[], &[]).unwrap().caps
    }

    #[test]
    fn test_quest3_selects_touch_not_vendor_profiles() {
        let caps = caps_with(|_| {});
        let headset = HeadsetModel::detect("Meta Quest 3", crate::headset::META_VENDOR_ID);
        assert_eq!(headset, HeadsetModel::MetaQuest3);
        let profiles = suggested_profiles(&caps, headset);
        assert!(profiles.contains(&ControllerProfile::OculusTouch));
        assert!(profiles.contains(&ControllerProfile::KhrSimple));
        assert!(!profiles.contains(&ControllerProfile::ViveFocus3));
        assert!(!profiles.contains(&ControllerProfile::PicoNeo3));
        assert!(!profiles.contains(&ControllerProfile::Pico4));
    }

    #[test]
    fn test_touch_pro_requires_capability() {
        let without = suggested_profiles(&caps_with(|_| {}), HeadsetModel::MetaQuestPro);
        assert!(!without.contains(&ControllerProfile::TouchPro));
        let with = suggested_profiles(
            &caps_with(|e| e.fb_touch_controller_pro = true),
            HeadsetModel::MetaQuestPro,
        );
        assert!(with.contains(&ControllerProfile::TouchPro));
    }

    #[test]
    fn test_pico_profiles_gated_by_model() {
        let caps = caps_with(|e| e.bd_controller_interaction = true);
        let neo3 = suggested_profiles(&caps, HeadsetModel::PicoNeo3);
        assert!(neo3.contains(&ControllerProfile::PicoNeo3));
        assert!(!neo3.contains(&ControllerProfile::Pico4));
        let pico4 = suggested_profiles(&caps, HeadsetModel::Pico4);
        assert!(pico4.contains(&ControllerProfile::Pico4));
        assert!(!pico4.contains(&ControllerProfile::PicoNeo3));
        // Capability present but a non-Pico headset: neither variant.
        let quest = suggested_profiles(&caps, HeadsetModel::MetaQuest3);
        assert!(!quest.contains(&ControllerProfile::PicoNeo3));
        assert!(!quest.contains(&ControllerProfile::Pico4));
    }

    #[test]
    fn test_tables_only_reference_matching_hand_paths() {
        for profile in [
            ControllerProfile::KhrSimple,
            ControllerProfile::OculusTouch,
            ControllerProfile::TouchPro,
            ControllerProfile::ViveFocus3,
            ControllerProfile::PicoNeo3,
            ControllerProfile::Pico4,
        ] {
            for (action, path) in profile_bindings(profile) {
                assert!(
                    path.starts_with("/user/hand/left/") || path.starts_with("/user/hand/right/"),
                    "{profile:?} {action:?} has non-hand path {path}"
                );
                if *action == ActionId::Haptic {
                    assert!(path.contains("/output/"), "haptic must be an output path");
                } else {
                    assert!(path.contains("/input/"));
                }
            }
        }
    }

    #[test]
    fn test_superset_includes_every_thumbrest_affordance() {
        for id in [
            ActionId::ThumbrestTouch,
            ActionId::ThumbrestClick,
            ActionId::ThumbrestForce,
        ] {
            assert!(ActionId::ALL.contains(&id));
        }
        assert_eq!(ActionId::ThumbrestClick.kind(), ActionKind::Bool);
        assert_eq!(ActionId::ThumbrestClick.name(), "thumbrest_click");
        // No shipping profile exposes a thumbrest click input; the
        // action exists but stays unbound everywhere.
        for profile in [
            ControllerProfile::KhrSimple,
            ControllerProfile::OculusTouch,
            ControllerProfile::TouchPro,
            ControllerProfile::ViveFocus3,
            ControllerProfile::PicoNeo3,
            ControllerProfile::Pico4,
        ] {
            for (action, _) in profile_bindings(profile) {
                assert_ne!(*action, ActionId::ThumbrestClick);
            }
        }
    }

    #[test]
    fn test_simple_profile_has_no_analog_bindings() {
        for (action, _) in profile_bindings(ControllerProfile::KhrSimple) {
            assert_ne!(action.kind(), ActionKind::Vec2);
            assert_ne!(*action, ActionId::TriggerValue);
        }
    }
}
