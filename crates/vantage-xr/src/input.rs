//! Action-set creation, binding suggestion, and input polling.
//!
//! One action set covers the whole action superset with left/right
//! subaction paths; per-profile binding tables come from `bindings` and
//! are suggested before the one-time attach. A rejected suggestion for a
//! single profile is logged and skipped, never fatal.

use log::{info, warn};
use openxr as xr;
use serde::{Deserialize, Serialize};
use vantage_shell::Pose;

use crate::bindings::{profile_bindings, suggested_profiles, ActionId, ActionKind, ControllerProfile};
use crate::caps::Capabilities;
use crate::error::{runtime_err, Result};
use crate::headset::HeadsetModel;
use crate::views::{location_valid, pose_from_xr};

pub const LEFT_HAND: usize = 0;
pub const RIGHT_HAND: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    pub active: bool,
    pub trigger: f32,
    pub trigger_click: bool,
    pub squeeze: f32,
    pub squeeze_click: bool,
    pub thumbstick: [f32; 2],
    pub thumbstick_click: bool,
    pub primary_click: bool,
    pub secondary_click: bool,
    pub menu_click: bool,
    pub grip: Option<Pose>,
    pub aim: Option<Pose>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub controllers: [ControllerState; 2],
}

pub struct XrInput {
    action_set: xr::ActionSet,
    hands: [xr::Path; 2],
    bools: Vec<(ActionId, xr::Action<bool>)>,
    floats: Vec<(ActionId, xr::Action<f32>)>,
    vec2s: Vec<(ActionId, xr::Action<xr::Vector2f>)>,
    grip_pose: xr::Action<xr::Posef>,
    aim_pose: xr::Action<xr::Posef>,
    haptic: xr::Action<xr::Haptic>,
    grip_spaces: [xr::Space; 2],
    aim_spaces: [xr::Space; 2],
}

impl XrInput {
    pub fn new<G: xr::Graphics>(
        instance: &xr::Instance,
        session: &xr::Session<G>,
        caps: &Capabilities,
        headset: HeadsetModel,
    ) -> Result<Self> {
        let action_set = instance
            .create_action_set("vantage", "Vantage", 0)
            .map_err(|e| runtime_err("create_action_set", e))?;

        let left = instance
            .string_to_path("/user/hand/left")
            .map_err(|e| runtime_err("path left", e))?;
        let right = instance
            .string_to_path("/user/hand/right")
            .map_err(|e| runtime_err("path right", e))?;
        let subaction_paths = [left, right];

        let mut bools = Vec::new();
        let mut floats = Vec::new();
        let mut vec2s = Vec::new();
        for &id in ActionId::ALL {
            match id.kind() {
                ActionKind::Bool => {
                    let action = action_set
                        .create_action::<bool>(id.name(), id.localized_name(), &subaction_paths)
                        .map_err(|e| runtime_err(id.name(), e))?;
                    bools.push((id, action));
                }
                ActionKind::Float => {
                    let action = action_set
                        .create_action::<f32>(id.name(), id.localized_name(), &subaction_paths)
                        .map_err(|e| runtime_err(id.name(), e))?;
                    floats.push((id, action));
                }
                ActionKind::Vec2 => {
                    let action = action_set
                        .create_action::<xr::Vector2f>(
                            id.name(),
                            id.localized_name(),
                            &subaction_paths,
                        )
                        .map_err(|e| runtime_err(id.name(), e))?;
                    vec2s.push((id, action));
                }
                ActionKind::Pose | ActionKind::Haptic => {}
            }
        }

        let grip_pose = action_set
            .create_action::<xr::Posef>("grip_pose", "Grip Pose", &subaction_paths)
            .map_err(|e| runtime_err("grip_pose", e))?;
        let aim_pose = action_set
            .create_action::<xr::Posef>("aim_pose", "Aim Pose", &subaction_paths)
            .map_err(|e| runtime_err("aim_pose", e))?;
        let haptic = action_set
            .create_action::<xr::Haptic>("haptic", "Haptic", &subaction_paths)
            .map_err(|e| runtime_err("haptic", e))?;

        let grip_spaces = [
            grip_pose
                .create_space(session,left, xr::Posef::IDENTITY)
                .map_err(|e| runtime_err("grip space left", e))?,
            grip_pose
                .create_space(session,right, xr::Posef::IDENTITY)
                .map_err(|e| runtime_err("grip space right", e))?,
        ];
        let aim_spaces = [
            aim_pose
                .create_space(session,left, xr::Posef::IDENTITY)
                .map_err(|e| runtime_err("aim space left", e))?,
            aim_pose
                .create_space(session,right, xr::Posef::IDENTITY)
                .map_err(|e| runtime_err("aim space right", e))?,
        ];

        let input = Self {
            action_set,
            hands: [left, right],
            bools,
            floats,
            vec2s,
            grip_pose,
            aim_pose,
            haptic,
            grip_spaces,
            aim_spaces,
        };

        for profile in suggested_profiles(caps, headset) {
            input.suggest_profile(instance, profile);
        }

        // One-time finalization; no further suggestions are valid after
        // this call.
        session
            .attach_action_sets(&[&input.action_set])
            .map_err(|e| runtime_err("attach_action_sets", e))?;

        Ok(input)
    }

    fn suggest_profile(&self, instance: &xr::Instance, profile: ControllerProfile) {
        let profile_path = match instance.string_to_path(profile.path()) {
            Ok(path) => path,
            Err(e) => {
                warn!("profile path {} rejected: {e:?}", profile.path());
                return;
            }
        };

        let table = profile_bindings(profile);
        let mut suggested = Vec::with_capacity(table.len());
        for (id, path_str) in table {
            let Ok(path) = instance.string_to_path(path_str) else {
                continue;
            };
            match id.kind() {
                ActionKind::Bool => {
                    if let Some((_, action)) = self.bools.iter().find(|(b, _)| b == id) {
                        suggested.push(xr::Binding::new(action, path));
                    }
                }
                ActionKind::Float => {
                    if let Some((_, action)) = self.floats.iter().find(|(f, _)| f == id) {
                        suggested.push(xr::Binding::new(action, path));
                    }
                }
                ActionKind::Vec2 => {
                    if let Some((_, action)) = self.vec2s.iter().find(|(v, _)| v == id) {
                        suggested.push(xr::Binding::new(action, path));
                    }
                }
                ActionKind::Pose => {
                    let action = if *id == ActionId::GripPose {
                        &self.grip_pose
                    } else {
                        &self.aim_pose
                    };
                    suggested.push(xr::Binding::new(action, path));
                }
                ActionKind::Haptic => {
                    suggested.push(xr::Binding::new(&self.haptic, path));
                }
            }
        }

        if let Err(e) = instance.suggest_interaction_profile_bindings(profile_path, &suggested) {
            warn!("binding suggestion rejected for {}: {e:?}", profile.path());
        }
    }

    /// The single runtime sync call covering every action. Safe to call
    /// from the main frame thread or an auxiliary polling thread; the
    /// runtime serializes it.
    pub fn sync<G: xr::Graphics>(&self, session: &xr::Session<G>) -> Result<()> {
        session
            .sync_actions(&[xr::ActiveActionSet::new(&self.action_set)])
            .map_err(|e| runtime_err("sync_actions", e))
    }

    fn boolean(&self, id: ActionId) -> Option<&xr::Action<bool>> {
        self.bools.iter().find(|(b, _)| *b == id).map(|(_, a)| a)
    }

    fn float(&self, id: ActionId) -> Option<&xr::Action<f32>> {
        self.floats.iter().find(|(f, _)| *f == id).map(|(_, a)| a)
    }

    fn vec2(&self, id: ActionId) -> Option<&xr::Action<xr::Vector2f>> {
        self.vec2s.iter().find(|(v, _)| *v == id).map(|(_, a)| a)
    }

    /// Syncs and reads the current controller states, locating grip/aim
    /// poses in `base` at the frame's predicted display time.
    pub fn poll<G: xr::Graphics>(
        &self,
        session: &xr::Session<G>,
        base: &xr::Space,
        time: xr::Time,
    ) -> Result<InputSnapshot> {
        self.sync(session)?;

        let mut snapshot = InputSnapshot::default();
        for (hand, &path) in self.hands.iter().enumerate() {
            let state = &mut snapshot.controllers[hand];

            let mut any_active = false;
            let mut read_f32 = |id: ActionId| -> f32 {
                match self.float(id).and_then(|a| a.state(session, path).ok()) {
                    Some(s) => {
                        any_active |= s.is_active;
                        s.current_state
                    }
                    None => 0.0,
                }
            };
            state.trigger = read_f32(ActionId::TriggerValue);
            state.squeeze = read_f32(ActionId::SqueezeValue);

            let mut read_bool = |id: ActionId| -> bool {
                match self.boolean(id).and_then(|a| a.state(session, path).ok()) {
                    Some(s) => {
                        any_active |= s.is_active;
                        s.current_state
                    }
                    None => false,
                }
            };
            state.trigger_click = read_bool(ActionId::TriggerClick);
            state.squeeze_click = read_bool(ActionId::SqueezeClick);
            state.thumbstick_click = read_bool(ActionId::ThumbstickClick);
            state.primary_click = read_bool(ActionId::PrimaryClick);
            state.secondary_click = read_bool(ActionId::SecondaryClick);
            state.menu_click = read_bool(ActionId::MenuClick);

            if let Some(s) = self
                .vec2(ActionId::Thumbstick)
                .and_then(|a| a.state(session, path).ok())
            {
                any_active |= s.is_active;
                state.thumbstick = [s.current_state.x, s.current_state.y];
            }

            state.grip = self.locate_hand(&self.grip_spaces[hand], base, time);
            state.aim = self.locate_hand(&self.aim_spaces[hand], base, time);
            state.active = any_active;
        }
        Ok(snapshot)
    }

    fn locate_hand(&self, space: &xr::Space, base: &xr::Space, time: xr::Time) -> Option<Pose> {
        let location = space.locate(base, time).ok()?;
        if location_valid(location.location_flags) {
            Some(pose_from_xr(location.pose))
        } else {
            None
        }
    }

    pub fn vibrate<G: xr::Graphics>(
        &self,
        session: &xr::Session<G>,
        hand: usize,
        amplitude: f32,
        frequency: f32,
        duration_ns: i64,
    ) -> Result<()> {
        let event = xr::HapticVibration::new()
            .amplitude(amplitude)
            .frequency(frequency)
            .duration(xr::Duration::from_nanos(duration_ns));
        self.haptic
            .apply_feedback(session, self.hands[hand.min(1)], &event)
            .map_err(|e| runtime_err("apply_feedback", e))
    }

    /// Logs which interaction profile the runtime resolved per hand.
    /// Called on InteractionProfileChanged events for diagnostics.
    pub fn log_active_profiles<G: xr::Graphics>(
        &self,
        instance: &xr::Instance,
        session: &xr::Session<G>,
    ) {
        for (label, &path) in ["left", "right"].iter().zip(self.hands.iter()) {
            if let Ok(profile) = session.current_interaction_profile(path) {
                match instance.path_to_string(profile) {
                    Ok(name) => info!("{label} hand interaction profile: {name}"),
                    Err(_) => info!("{label} hand interaction profile: <none>"),
                }
            }
        }
    }
}
