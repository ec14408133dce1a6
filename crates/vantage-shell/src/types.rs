use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Stereo view count for the primary view configuration. The host refuses
/// to start against runtimes reporting anything else.
pub const VIEW_COUNT: usize = 2;

pub const HAND_JOINT_COUNT: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Eye::Left
        } else {
            Eye::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// World-from-local transform for this pose.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation.normalize(), self.position)
    }

    /// Composes `self` (outer frame) with `local` (inner frame).
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.position + self.orientation * local.position,
            orientation: (self.orientation * local.orientation).normalize(),
        }
    }
}

/// Asymmetric field of view, half-angles in radians. Left/down are
/// typically negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fov {
    pub angle_left: f32,
    pub angle_right: f32,
    pub angle_up: f32,
    pub angle_down: f32,
}

impl Fov {
    pub fn symmetric(half_angle: f32) -> Self {
        Self {
            angle_left: -half_angle,
            angle_right: half_angle,
            angle_up: half_angle,
            angle_down: -half_angle,
        }
    }

    /// Asymmetric perspective projection with reversed-range-free 0..1
    /// depth, right-handed, looking down -Z.
    pub fn projection(&self, near: f32, far: f32) -> Mat4 {
        let tan_left = self.angle_left.tan();
        let tan_right = self.angle_right.tan();
        let tan_up = self.angle_up.tan();
        let tan_down = self.angle_down.tan();
        let tan_width = tan_right - tan_left;
        let tan_height = tan_up - tan_down;

        Mat4::from_cols(
            Vec4::new(2.0 / tan_width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / tan_height, 0.0, 0.0),
            Vec4::new(
                (tan_right + tan_left) / tan_width,
                (tan_up + tan_down) / tan_height,
                -far / (far - near),
                -1.0,
            ),
            Vec4::new(0.0, 0.0, -(far * near) / (far - near), 0.0),
        )
    }
}

/// Per-eye parameters handed to the render session each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Eye pose in world (current-space) coordinates.
    pub pose: Pose,
    pub fov: Fov,
    /// View matrix: inverse of the eye's world transform.
    pub view: Mat4,
    pub camera_position: Vec3,
}

impl ViewParams {
    /// Derives the view matrix and camera position from a world-space eye
    /// pose.
    pub fn from_pose(pose: Pose, fov: Fov) -> Self {
        Self {
            pose,
            fov,
            view: pose.to_matrix().inverse(),
            camera_position: pose.position,
        }
    }

    pub fn projection(&self, near: f32, far: f32) -> Mat4 {
        self.fov.projection(near, far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Both eyes rendered in one multiview pass into a layered swapchain.
    SinglePass,
    /// One pass per eye into separate swapchains.
    DualPass,
}

impl RenderMode {
    pub fn passes(&self) -> usize {
        match self {
            RenderMode::SinglePass => 1,
            RenderMode::DualPass => VIEW_COUNT,
        }
    }

    pub fn views_per_pass(&self) -> usize {
        match self {
            RenderMode::SinglePass => VIEW_COUNT,
            RenderMode::DualPass => 1,
        }
    }

    pub fn array_size(&self) -> u32 {
        self.views_per_pass() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerBlendMode {
    Opaque,
    AlphaBlend,
    Additive,
}

/// Placement of one quad layer in the current space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadPlacement {
    pub pose: Pose,
    /// Width/height of the quad in meters.
    pub size: Vec2,
    pub blend: LayerBlendMode,
}

impl Default for QuadPlacement {
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            size: Vec2::new(1.0, 1.0),
            blend: LayerBlendMode::AlphaBlend,
        }
    }
}

/// Quad-layer configuration a render session may request. The host
/// re-reads this every frame and resizes its layer list when the
/// placement count or image size changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadLayerParams {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<QuadPlacement>,
}

impl QuadLayerParams {
    pub fn count(&self) -> usize {
        self.placements.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RefreshRateMode {
    /// Leave the runtime's default rate untouched.
    Default,
    /// Request the highest rate the runtime reports.
    Max,
    /// Request a specific rate in Hz.
    Explicit(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitParams {
    pub app_name: String,
    pub refresh_rate: RefreshRateMode,
    /// Compose quad layers instead of a projection layer.
    pub quad_composition: bool,
    pub sharpening: bool,
    /// Near/far planes reported with depth sub-images.
    pub near_z: f32,
    pub far_z: f32,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            app_name: "vantage".to_string(),
            refresh_rate: RefreshRateMode::Default,
            quad_composition: false,
            sharpening: false,
            near_z: 0.1,
            far_z: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandJointPose {
    pub pose: Pose,
    pub radius: f32,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub tracked: bool,
}

impl Default for HandJointPose {
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            radius: 0.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            tracked: false,
        }
    }
}

/// One hand's joint set for a single predicted display time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandFrame {
    pub joints: [HandJointPose; HAND_JOINT_COUNT],
}

impl HandFrame {
    pub fn any_tracked(&self) -> bool {
        self.joints.iter().any(|j| j.tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn sample_pose() -> Pose {
        Pose::new(
            Vec3::new(1.0, 2.0, -3.0),
            Quat::from_rotation_y(FRAC_PI_4),
        )
    }

    #[test]
    fn test_pose_compose_identity() {
        let pose = sample_pose();
        let composed = pose.compose(&Pose::default());
        assert!((composed.position - pose.position).length() < 1e-6);
        assert!(composed.orientation.dot(pose.orientation).abs() > 0.999);
    }

    #[test]
    fn test_view_matrix_inverts_pose() {
        let params = ViewParams::from_pose(sample_pose(), Fov::symmetric(FRAC_PI_4));
        // The view matrix maps the eye position to the origin.
        let origin = params.view * params.pose.position.extend(1.0);
        assert!(origin.truncate().length() < 1e-5);
        assert_eq!(params.camera_position, params.pose.position);
    }

    #[test]
    fn test_symmetric_projection_centered() {
        let proj = Fov::symmetric(FRAC_PI_4).projection(0.1, 100.0);
        // Symmetric fov has no off-center terms.
        assert!(proj.z_axis.x.abs() < 1e-6);
        assert!(proj.z_axis.y.abs() < 1e-6);
        assert!((proj.x_axis.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_render_mode_pass_shape() {
        assert_eq!(RenderMode::SinglePass.passes(), 1);
        assert_eq!(RenderMode::SinglePass.views_per_pass(), 2);
        assert_eq!(RenderMode::DualPass.passes(), 2);
        assert_eq!(RenderMode::DualPass.views_per_pass(), 1);
    }
}
