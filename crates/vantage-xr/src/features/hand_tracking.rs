//! Articulated hand tracking: one tracker per hand, joint poses and
//! velocities refreshed at the frame's predicted display time.

use glam::Vec3;
use openxr as xr;
use vantage_shell::{HandFrame, HandJointPose, HAND_JOINT_COUNT};

use crate::error::{runtime_err, Result};
use crate::views::pose_from_xr;

/// Joint query order, matching the shell's joint array layout.
const JOINTS: [xr::HandJoint; HAND_JOINT_COUNT] = [
    xr::HandJoint::PALM,
    xr::HandJoint::WRIST,
    xr::HandJoint::THUMB_METACARPAL,
    xr::HandJoint::THUMB_PROXIMAL,
    xr::HandJoint::THUMB_DISTAL,
    xr::HandJoint::THUMB_TIP,
    xr::HandJoint::INDEX_METACARPAL,
    xr::HandJoint::INDEX_PROXIMAL,
    xr::HandJoint::INDEX_INTERMEDIATE,
    xr::HandJoint::INDEX_DISTAL,
    xr::HandJoint::INDEX_TIP,
    xr::HandJoint::MIDDLE_METACARPAL,
    xr::HandJoint::MIDDLE_PROXIMAL,
    xr::HandJoint::MIDDLE_INTERMEDIATE,
    xr::HandJoint::MIDDLE_DISTAL,
    xr::HandJoint::MIDDLE_TIP,
    xr::HandJoint::RING_METACARPAL,
    xr::HandJoint::RING_PROXIMAL,
    xr::HandJoint::RING_INTERMEDIATE,
    xr::HandJoint::RING_DISTAL,
    xr::HandJoint::RING_TIP,
    xr::HandJoint::LITTLE_METACARPAL,
    xr::HandJoint::LITTLE_PROXIMAL,
    xr::HandJoint::LITTLE_INTERMEDIATE,
    xr::HandJoint::LITTLE_DISTAL,
    xr::HandJoint::LITTLE_TIP,
];

pub struct HandTrackingFeature {
    left: xr::HandTracker,
    right: xr::HandTracker,
}

impl HandTrackingFeature {
    pub fn new<G: xr::Graphics>(session: &xr::Session<G>) -> Result<Self> {
        let left = session
            .create_hand_tracker(xr::Hand::LEFT)
            .map_err(|e| runtime_err("create_hand_tracker left", e))?;
        let right = session
            .create_hand_tracker(xr::Hand::RIGHT)
            .map_err(|e| runtime_err("create_hand_tracker right", e))?;
        Ok(Self { left, right })
    }

    /// Joint poses and velocities for both hands at `time`, relative to
    /// `space`. `None` per hand when the runtime has no data for it.
    pub fn update(&self, space: &xr::Space, time: xr::Time) -> [Option<HandFrame>; 2] {
        [
            Self::frame_for(space, &self.left, time),
            Self::frame_for(space, &self.right, time),
        ]
    }

    fn frame_for(space: &xr::Space, tracker: &xr::HandTracker, time: xr::Time) -> Option<HandFrame> {
        let (locations, velocities) = space.relate_hand_joints(tracker, time).ok()??;

        let mut frame = HandFrame::default();
        for (slot, &joint) in JOINTS.iter().enumerate() {
            let location = locations[joint];
            let velocity = velocities[joint];

            let tracked = location
                .location_flags
                .contains(xr::SpaceLocationFlags::POSITION_VALID)
                && location
                    .location_flags
                    .contains(xr::SpaceLocationFlags::ORIENTATION_VALID);

            let linear_velocity = if velocity
                .velocity_flags
                .contains(xr::SpaceVelocityFlags::LINEAR_VALID)
            {
                Vec3::new(
                    velocity.linear_velocity.x,
                    velocity.linear_velocity.y,
                    velocity.linear_velocity.z,
                )
            } else {
                Vec3::ZERO
            };
            let angular_velocity = if velocity
                .velocity_flags
                .contains(xr::SpaceVelocityFlags::ANGULAR_VALID)
            {
                Vec3::new(
                    velocity.angular_velocity.x,
                    velocity.angular_velocity.y,
                    velocity.angular_velocity.z,
                )
            } else {
                Vec3::ZERO
            };

            frame.joints[slot] = HandJointPose {
                pose: pose_from_xr(location.pose),
                radius: location.radius,
                linear_velocity,
                angular_velocity,
                tracked,
            };
        }

        if frame.any_tracked() {
            Some(frame)
        } else {
            None
        }
    }
}
