//! Seams to the two external collaborators: the graphics backend that
//! owns device/session creation, and the application render session that
//! owns scene content. The host never embeds GPU-API calls directly.

use openxr as xr;
use vantage_shell::{QuadLayerParams, ShellResult, ViewParams};

use crate::caps::ExtensionNeed;
use crate::error::Result;

/// What the backend hands back from device creation.
pub struct DeviceHandoff<A: xr::Graphics> {
    /// Graphics binding passed to session creation.
    pub session_create_info: A::SessionCreateInfo,
    /// Whether the device can render both eyes in one multiview pass.
    /// When false the host demotes to dual-pass rendering.
    pub supports_multiview: bool,
}

/// One implementation per GPU API. Extension lists feed capability
/// negotiation; `create_device` runs between system selection and
/// session creation.
pub trait GraphicsBackend {
    type Api: xr::Graphics;

    /// Extensions without which this backend cannot create a session.
    /// Any of these missing fails bootstrap.
    fn required_extensions(&self) -> &'static [ExtensionNeed];

    fn optional_extensions(&self) -> &'static [ExtensionNeed] {
        &[]
    }

    fn create_device(
        &mut self,
        instance: &xr::Instance,
        system: xr::SystemId,
    ) -> Result<DeviceHandoff<Self::Api>>;

    /// Picks the color format to render into from the runtime's offer.
    fn select_color_format(
        &self,
        formats: &[<Self::Api as xr::Graphics>::Format],
    ) -> Option<<Self::Api as xr::Graphics>::Format>;

    /// Depth format for depth-layer submission; `None` disables depth
    /// sub-images even when the runtime supports them.
    fn select_depth_format(
        &self,
        formats: &[<Self::Api as xr::Graphics>::Format],
    ) -> Option<<Self::Api as xr::Graphics>::Format> {
        let _ = formats;
        None
    }
}

/// One render pass worth of work handed to the render session. Swapchain
/// images are acquired immediately before `update` and released
/// immediately after it returns.
pub struct RenderPass<'a, A: xr::Graphics> {
    /// One view per pass in dual-pass mode, both views in single-pass.
    pub views: &'a [ViewParams],
    pub color_image: &'a A::SwapchainImage,
    pub depth_image: Option<&'a A::SwapchainImage>,
    pub width: u32,
    pub height: u32,
    /// Texture array layers in the color image (2 in single-pass).
    pub array_size: u32,
    /// Which composition layer this pass renders into.
    pub layer_index: usize,
    pub clear_color: [f32; 4],
}

/// Application-supplied scene owner.
pub trait RenderSession<A: xr::Graphics> {
    fn initialize(&mut self) -> ShellResult<()>;

    /// Requested quad-layer configuration, re-read every frame. `None`
    /// keeps projection composition.
    fn quad_layers(&self) -> Option<QuadLayerParams> {
        None
    }

    fn passthrough_enabled(&self) -> bool {
        false
    }

    fn set_current_quad_layer(&mut self, index: usize) {
        let _ = index;
    }

    fn pre_update(&mut self) {}

    fn update(&mut self, pass: &RenderPass<'_, A>) -> ShellResult<()>;

    fn post_update(&mut self) {}
}
