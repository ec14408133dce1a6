//! Per-frame view math: composing the head pose in the rendering space
//! with per-eye poses in head space, and converting between runtime and
//! renderer types.

use glam::{Quat, Vec3};
use openxr as xr;
use vantage_shell::{Fov, Pose, ViewParams, VIEW_COUNT};

use crate::error::{Result, XrError};

pub fn pose_from_xr(p: xr::Posef) -> Pose {
    Pose {
        position: Vec3::new(p.position.x, p.position.y, p.position.z),
        orientation: Quat::from_xyzw(
            p.orientation.x,
            p.orientation.y,
            p.orientation.z,
            p.orientation.w,
        ),
    }
}

pub fn pose_to_xr(p: &Pose) -> xr::Posef {
    xr::Posef {
        orientation: xr::Quaternionf {
            x: p.orientation.x,
            y: p.orientation.y,
            z: p.orientation.z,
            w: p.orientation.w,
        },
        position: xr::Vector3f {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
        },
    }
}

pub fn fov_from_xr(f: xr::Fovf) -> Fov {
    Fov {
        angle_left: f.angle_left,
        angle_right: f.angle_right,
        angle_up: f.angle_up,
        angle_down: f.angle_down,
    }
}

/// The stereo view count is a hard protocol assumption; anything else
/// fails bootstrap.
pub fn validate_view_count(count: usize) -> Result<()> {
    if count == VIEW_COUNT {
        Ok(())
    } else {
        Err(XrError::ViewCount(count))
    }
}

pub fn location_valid(flags: xr::SpaceLocationFlags) -> bool {
    flags.contains(xr::SpaceLocationFlags::POSITION_VALID)
        && flags.contains(xr::SpaceLocationFlags::ORIENTATION_VALID)
}

/// Derives per-eye parameters from the head pose (in the current space)
/// and the eye views located in head space, all at one predicted display
/// time. The eye world pose is head ∘ eye; the view matrix its inverse.
pub fn view_params(head: &Pose, views: &[xr::View]) -> Result<[ViewParams; VIEW_COUNT]> {
    validate_view_count(views.len())?;
    let mut out = [ViewParams::from_pose(Pose::default(), Fov::default()); VIEW_COUNT];
    for (i, view) in views.iter().enumerate() {
        let eye_world = head.compose(&pose_from_xr(view.pose));
        out[i] = ViewParams::from_pose(eye_world, fov_from_xr(view.fov));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sample_view(x: f32) -> xr::View {
        xr::View {
            pose: xr::Posef {
                orientation: xr::Quaternionf {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                    w: 1.0,
                },
                position: xr::Vector3f { x, y: 0.0, z: 0.0 },
            },
            fov: xr::Fovf {
                angle_left: -0.8,
                angle_right: 0.7,
                angle_up: 0.75,
                angle_down: -0.75,
            },
        }
    }

    #[test]
    fn test_view_count_must_be_two() {
        assert!(validate_view_count(2).is_ok());
        for count in [0, 1, 3, 4] {
            assert!(matches!(
                validate_view_count(count),
                Err(XrError::ViewCount(c)) if c == count
            ));
        }
    }

    #[test]
    fn test_identity_head_passes_eye_through() {
        let head = Pose::default();
        let params = view_params(&head, &[sample_view(-0.032), sample_view(0.032)]).unwrap();
        assert!((params[0].camera_position.x + 0.032).abs() < 1e-6);
        assert!((params[1].camera_position.x - 0.032).abs() < 1e-6);
        assert_eq!(params[0].fov.angle_left, -0.8);
    }

    #[test]
    fn test_translated_head_offsets_eyes() {
        let head = Pose::new(Vec3::new(0.0, 1.6, 0.5), Quat::IDENTITY);
        let params = view_params(&head, &[sample_view(-0.032), sample_view(0.032)]).unwrap();
        assert!((params[0].camera_position.y - 1.6).abs() < 1e-6);
        assert!((params[0].camera_position.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotated_head_rotates_eye_offsets() {
        // Head yawed 90 degrees: the eye baseline along X maps onto Z.
        let head = Pose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        let params = view_params(&head, &[sample_view(-0.032), sample_view(0.032)]).unwrap();
        assert!(params[0].camera_position.x.abs() < 1e-6);
        assert!((params[0].camera_position.z - 0.032).abs() < 1e-6);
        assert!((params[1].camera_position.z + 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_view_count_rejected() {
        let head = Pose::default();
        assert!(view_params(&head, &[sample_view(0.0)]).is_err());
    }
}
