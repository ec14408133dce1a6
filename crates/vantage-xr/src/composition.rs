//! Swapchain-backed composition layers and frame submission.
//!
//! Planning (how many swapchain rings a configuration needs, which ring
//! and array slice an eye renders into, what a config change requires)
//! is pure; the raw layer structures are assembled immediately before
//! `FrameStream::end` and chained through `next` pointers for depth,
//! sharpening and alpha-blend information.

use log::debug;
use openxr as xr;
use openxr::sys as xrsys;
use openxr::sys::Handle as _;
use vantage_shell::{LayerBlendMode, RenderMode, VIEW_COUNT};

use crate::error::{runtime_err, Result};

/// Acquired-image wait budget, same order as a compositor period.
const IMAGE_WAIT_NS: i64 = 5_000_000;

/// Geometry of one swapchain ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSpec {
    pub width: u32,
    pub height: u32,
    pub array_size: u32,
    pub sample_count: u32,
}

/// Requested composition shape, compared frame to frame.
/// `quad_count == 0` means a single projection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerConfig {
    pub quad_count: usize,
    pub width: u32,
    pub height: u32,
}

impl LayerConfig {
    pub fn projection(width: u32, height: u32) -> Self {
        Self {
            quad_count: 0,
            width,
            height,
        }
    }

    pub fn is_projection(&self) -> bool {
        self.quad_count == 0
    }

    /// Number of composition-layer slots this config occupies.
    pub fn layer_count(&self) -> usize {
        if self.is_projection() {
            1
        } else {
            self.quad_count
        }
    }
}

/// What a config change requires of the layer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDelta {
    Keep,
    /// Same image size and composition kind; only the quad count moved.
    Resize { destroy: usize, create: usize },
    /// Size or kind changed; every ring is recreated.
    Rebuild,
}

pub fn plan_layer_delta(current: &LayerConfig, requested: &LayerConfig) -> LayerDelta {
    if current == requested {
        return LayerDelta::Keep;
    }
    let same_kind = current.is_projection() == requested.is_projection();
    if same_kind && current.width == requested.width && current.height == requested.height {
        let (cur, req) = (current.layer_count(), requested.layer_count());
        if req < cur {
            return LayerDelta::Resize {
                destroy: cur - req,
                create: 0,
            };
        }
        return LayerDelta::Resize {
            destroy: 0,
            create: req - cur,
        };
    }
    LayerDelta::Rebuild
}

/// Ring index within a layer and texture-array slice for one eye.
pub fn view_slot(mode: RenderMode, eye: usize) -> (usize, u32) {
    match mode {
        RenderMode::SinglePass => (0, eye as u32),
        RenderMode::DualPass => (eye, 0),
    }
}

/// Color swapchain plus optional depth swapchain of matching geometry,
/// with cached image lists.
pub struct SwapchainRing<A: xr::Graphics> {
    color: xr::Swapchain<A>,
    color_images: Vec<A::SwapchainImage>,
    depth: Option<(xr::Swapchain<A>, Vec<A::SwapchainImage>)>,
    spec: RingSpec,
}

#[derive(Debug, Clone, Copy)]
pub struct AcquiredImages {
    pub color: u32,
    pub depth: Option<u32>,
}

impl<A: xr::Graphics> SwapchainRing<A> {
    pub fn new(
        session: &xr::Session<A>,
        spec: RingSpec,
        color_format: A::Format,
        depth_format: Option<A::Format>,
    ) -> Result<Self> {
        let color_info = xr::SwapchainCreateInfo {
            create_flags: xr::SwapchainCreateFlags::EMPTY,
            usage_flags: xr::SwapchainUsageFlags::COLOR_ATTACHMENT
                | xr::SwapchainUsageFlags::SAMPLED,
            format: color_format,
            sample_count: spec.sample_count,
            width: spec.width,
            height: spec.height,
            face_count: 1,
            array_size: spec.array_size,
            mip_count: 1,
        };
        let color = session
            .create_swapchain(&color_info)
            .map_err(|e| runtime_err("create_swapchain color", e))?;
        let color_images = color
            .enumerate_images()
            .map_err(|e| runtime_err("enumerate color images", e))?;

        let depth = match depth_format {
            Some(format) => {
                let depth_info = xr::SwapchainCreateInfo {
                    create_flags: xr::SwapchainCreateFlags::EMPTY,
                    usage_flags: xr::SwapchainUsageFlags::DEPTH_STENCIL_ATTACHMENT,
                    format,
                    sample_count: spec.sample_count,
                    width: spec.width,
                    height: spec.height,
                    face_count: 1,
                    array_size: spec.array_size,
                    mip_count: 1,
                };
                let swapchain = session
                    .create_swapchain(&depth_info)
                    .map_err(|e| runtime_err("create_swapchain depth", e))?;
                let images = swapchain
                    .enumerate_images()
                    .map_err(|e| runtime_err("enumerate depth images", e))?;
                Some((swapchain, images))
            }
            None => None,
        };

        debug!(
            "swapchain ring {}x{} array={} depth={}",
            spec.width,
            spec.height,
            spec.array_size,
            depth.is_some()
        );
        Ok(Self {
            color,
            color_images,
            depth,
            spec,
        })
    }

    pub fn spec(&self) -> &RingSpec {
        &self.spec
    }

    pub fn acquire(&mut self) -> Result<AcquiredImages> {
        let color = self
            .color
            .acquire_image()
            .map_err(|e| runtime_err("acquire_image", e))?;
        self.color
            .wait_image(xr::Duration::from_nanos(IMAGE_WAIT_NS))
            .map_err(|e| runtime_err("wait_image", e))?;
        let depth = match &mut self.depth {
            Some((swapchain, _)) => {
                let index = swapchain
                    .acquire_image()
                    .map_err(|e| runtime_err("acquire depth image", e))?;
                swapchain
                    .wait_image(xr::Duration::from_nanos(IMAGE_WAIT_NS))
                    .map_err(|e| runtime_err("wait depth image", e))?;
                Some(index)
            }
            None => None,
        };
        Ok(AcquiredImages { color, depth })
    }

    pub fn release(&mut self) -> Result<()> {
        self.color
            .release_image()
            .map_err(|e| runtime_err("release_image", e))?;
        if let Some((swapchain, _)) = &mut self.depth {
            swapchain
                .release_image()
                .map_err(|e| runtime_err("release depth image", e))?;
        }
        Ok(())
    }

    pub fn color_image(&self, index: u32) -> &A::SwapchainImage {
        &self.color_images[index as usize]
    }

    pub fn depth_image(&self, index: u32) -> Option<&A::SwapchainImage> {
        self.depth
            .as_ref()
            .map(|(_, images)| &images[index as usize])
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    pub fn sub_image(&self, array_index: u32) -> xrsys::SwapchainSubImage {
        xrsys::SwapchainSubImage {
            swapchain: self.color.as_raw(),
            image_rect: xr::Rect2Di {
                offset: xr::Offset2Di { x: 0, y: 0 },
                extent: xr::Extent2Di {
                    width: self.spec.width as i32,
                    height: self.spec.height as i32,
                },
            },
            image_array_index: array_index,
        }
    }

    pub fn depth_sub_image(&self, array_index: u32) -> Option<xrsys::SwapchainSubImage> {
        self.depth.as_ref().map(|(swapchain, _)| xrsys::SwapchainSubImage {
            swapchain: swapchain.as_raw(),
            image_rect: xr::Rect2Di {
                offset: xr::Offset2Di { x: 0, y: 0 },
                extent: xr::Extent2Di {
                    width: self.spec.width as i32,
                    height: self.spec.height as i32,
                },
            },
            image_array_index: array_index,
        })
    }
}

#[derive(Clone, Copy)]
pub struct DepthInfo {
    pub sub_image: xrsys::SwapchainSubImage,
    pub near_z: f32,
    pub far_z: f32,
}

#[derive(Clone, Copy)]
pub struct ProjectionViewDraw {
    pub pose: xr::Posef,
    pub fov: xr::Fovf,
    pub sub_image: xrsys::SwapchainSubImage,
    pub depth: Option<DepthInfo>,
}

#[derive(Clone, Copy)]
pub struct QuadDraw {
    /// 0 = left, 1 = right; one quad structure is submitted per eye.
    pub eye: usize,
    pub pose: xr::Posef,
    /// Quad extent in meters.
    pub size: [f32; 2],
    pub sub_image: xrsys::SwapchainSubImage,
    pub blend: LayerBlendMode,
}

pub enum ComposedLayer {
    Projection {
        views: Vec<ProjectionViewDraw>,
        /// Sharpening/supersampling request chained when non-empty.
        settings: xrsys::CompositionLayerSettingsFlagsFB,
        /// Blend scene alpha against the passthrough feed behind it.
        over_passthrough: bool,
    },
    Quad(QuadDraw),
}

#[derive(Default)]
pub struct FrameSubmission {
    pub layers: Vec<ComposedLayer>,
    /// Prepended before all content layers when passthrough is enabled.
    pub passthrough: Option<xrsys::PassthroughLayerFB>,
}

impl FrameSubmission {
    pub fn empty() -> Self {
        Self::default()
    }
}

pub fn quad_visibility(eye: usize) -> xrsys::EyeVisibility {
    if eye == 0 {
        xrsys::EyeVisibility::LEFT
    } else {
        xrsys::EyeVisibility::RIGHT
    }
}

/// Assembles the raw layer structures and submits them. All chained
/// structures live in local stores until `end` returns.
pub fn submit<A: xr::Graphics>(
    frame_stream: &mut xr::FrameStream<A>,
    time: xr::Time,
    blend: xr::EnvironmentBlendMode,
    space: &xr::Space,
    submission: &FrameSubmission,
    alpha_blend_ext: bool,
) -> Result<()> {
    let mut depth_store: Vec<Box<[xrsys::CompositionLayerDepthInfoKHR]>> = Vec::new();
    let mut view_store: Vec<Box<[xrsys::CompositionLayerProjectionView]>> = Vec::new();
    let mut settings_store: Vec<Box<xrsys::CompositionLayerSettingsFB>> = Vec::new();
    let mut proj_store: Vec<Box<xrsys::CompositionLayerProjection>> = Vec::new();
    let mut alpha_store: Vec<Box<xrsys::CompositionLayerAlphaBlendFB>> = Vec::new();
    let mut quad_store: Vec<Box<xrsys::CompositionLayerQuad>> = Vec::new();
    let mut raw_layers: Vec<*const xrsys::CompositionLayerBaseHeader> = Vec::new();

    for layer in &submission.layers {
        match layer {
            ComposedLayer::Projection {
                views,
                settings,
                over_passthrough,
            } => {
                let depths: Box<[xrsys::CompositionLayerDepthInfoKHR]> = views
                    .iter()
                    .map(|view| {
                        let info = view.depth.unwrap_or(DepthInfo {
                            sub_image: view.sub_image,
                            near_z: 0.0,
                            far_z: 0.0,
                        });
                        xrsys::CompositionLayerDepthInfoKHR {
                            ty: xrsys::CompositionLayerDepthInfoKHR::TYPE,
                            next: std::ptr::null(),
                            sub_image: info.sub_image,
                            min_depth: 0.0,
                            max_depth: 1.0,
                            near_z: info.near_z,
                            far_z: info.far_z,
                        }
                    })
                    .collect();
                depth_store.push(depths);
                let depths = depth_store.last().unwrap();

                let raw_views: Box<[xrsys::CompositionLayerProjectionView]> = views
                    .iter()
                    .enumerate()
                    .map(|(i, view)| xrsys::CompositionLayerProjectionView {
                        ty: xrsys::CompositionLayerProjectionView::TYPE,
                        next: if view.depth.is_some() {
                            &depths[i] as *const _ as *const _
                        } else {
                            std::ptr::null()
                        },
                        pose: view.pose,
                        fov: view.fov,
                        sub_image: view.sub_image,
                    })
                    .collect();
                view_store.push(raw_views);
                let raw_views = view_store.last().unwrap();

                let next = if *settings == xrsys::CompositionLayerSettingsFlagsFB::EMPTY {
                    std::ptr::null()
                } else {
                    settings_store.push(Box::new(xrsys::CompositionLayerSettingsFB {
                        ty: xrsys::CompositionLayerSettingsFB::TYPE,
                        next: std::ptr::null(),
                        layer_flags: *settings,
                    }));
                    settings_store.last().unwrap().as_ref() as *const _ as *const _
                };

                let layer_flags = if *over_passthrough {
                    xr::CompositionLayerFlags::CORRECT_CHROMATIC_ABERRATION
                        | xr::CompositionLayerFlags::BLEND_TEXTURE_SOURCE_ALPHA
                } else {
                    xr::CompositionLayerFlags::CORRECT_CHROMATIC_ABERRATION
                };

                proj_store.push(Box::new(xrsys::CompositionLayerProjection {
                    ty: xrsys::CompositionLayerProjection::TYPE,
                    next,
                    layer_flags,
                    space: space.as_raw(),
                    view_count: raw_views.len() as u32,
                    views: raw_views.as_ptr(),
                }));
                raw_layers.push(
                    proj_store.last().unwrap().as_ref() as *const xrsys::CompositionLayerProjection
                        as *const _,
                );
            }
            ComposedLayer::Quad(quad) => {
                let next = if quad.blend == LayerBlendMode::AlphaBlend && alpha_blend_ext {
                    alpha_store.push(Box::new(xrsys::CompositionLayerAlphaBlendFB {
                        ty: xrsys::CompositionLayerAlphaBlendFB::TYPE,
                        next: std::ptr::null_mut(),
                        src_factor_color: xrsys::BlendFactorFB::SRC_ALPHA,
                        dst_factor_color: xrsys::BlendFactorFB::ONE_MINUS_SRC_ALPHA,
                        src_factor_alpha: xrsys::BlendFactorFB::ONE,
                        dst_factor_alpha: xrsys::BlendFactorFB::ONE_MINUS_SRC_ALPHA,
                    }));
                    alpha_store.last().unwrap().as_ref() as *const _ as *const _
                } else {
                    std::ptr::null()
                };

                let layer_flags = match quad.blend {
                    LayerBlendMode::Opaque => xr::CompositionLayerFlags::EMPTY,
                    _ => xr::CompositionLayerFlags::BLEND_TEXTURE_SOURCE_ALPHA,
                };

                quad_store.push(Box::new(xrsys::CompositionLayerQuad {
                    ty: xrsys::CompositionLayerQuad::TYPE,
                    next,
                    layer_flags,
                    space: space.as_raw(),
                    eye_visibility: quad_visibility(quad.eye),
                    sub_image: quad.sub_image,
                    pose: quad.pose,
                    size: xr::Extent2Df {
                        width: quad.size[0],
                        height: quad.size[1],
                    },
                }));
                raw_layers.push(
                    quad_store.last().unwrap().as_ref() as *const xrsys::CompositionLayerQuad
                        as *const _,
                );
            }
        }
    }

    let passthrough_layer = submission.passthrough.map(|handle| {
        xrsys::CompositionLayerPassthroughFB {
            ty: xrsys::CompositionLayerPassthroughFB::TYPE,
            next: std::ptr::null(),
            flags: xr::CompositionLayerFlags::BLEND_TEXTURE_SOURCE_ALPHA,
            space: xrsys::Space::from_raw(0),
            layer_handle: handle,
        }
    });
    if passthrough_layer.is_some() {
        let ptr = passthrough_layer.as_ref().unwrap() as *const xrsys::CompositionLayerPassthroughFB;
        raw_layers.insert(0, ptr as *const _);
    }

    // The stores above outlive this call, so every pointer in
    // `raw_layers` is valid across `end`.
    unsafe {
        let refs: Vec<&xr::CompositionLayerBase<A>> = raw_layers
            .iter()
            .map(|&ptr| &*(ptr as *const xr::CompositionLayerBase<A>))
            .collect();
        frame_stream
            .end(time, blend, &refs)
            .map_err(|e| runtime_err("end frame", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quads(count: usize) -> LayerConfig {
        LayerConfig {
            quad_count: count,
            width: 1024,
            height: 1024,
        }
    }

    #[test]
    fn test_unchanged_config_keeps_layers() {
        assert_eq!(
            plan_layer_delta(&sample_quads(3), &sample_quads(3)),
            LayerDelta::Keep
        );
        let projection = LayerConfig::projection(1680, 1760);
        assert_eq!(plan_layer_delta(&projection, &projection), LayerDelta::Keep);
    }

    #[test]
    fn test_shrinking_quad_count_destroys_exactly_the_difference() {
        assert_eq!(
            plan_layer_delta(&sample_quads(5), &sample_quads(2)),
            LayerDelta::Resize {
                destroy: 3,
                create: 0
            }
        );
    }

    #[test]
    fn test_growing_quad_count_creates_exactly_the_difference() {
        assert_eq!(
            plan_layer_delta(&sample_quads(1), &sample_quads(4)),
            LayerDelta::Resize {
                destroy: 0,
                create: 3
            }
        );
    }

    #[test]
    fn test_size_change_rebuilds() {
        let mut bigger = sample_quads(2);
        bigger.width = 2048;
        assert_eq!(
            plan_layer_delta(&sample_quads(2), &bigger),
            LayerDelta::Rebuild
        );
    }

    #[test]
    fn test_kind_change_rebuilds() {
        let projection = LayerConfig::projection(1024, 1024);
        assert_eq!(
            plan_layer_delta(&projection, &sample_quads(2)),
            LayerDelta::Rebuild
        );
        assert_eq!(
            plan_layer_delta(&sample_quads(2), &projection),
            LayerDelta::Rebuild
        );
    }

    #[test]
    fn test_view_slots_by_render_mode() {
        assert_eq!(view_slot(RenderMode::SinglePass, 0), (0, 0));
        assert_eq!(view_slot(RenderMode::SinglePass, 1), (0, 1));
        assert_eq!(view_slot(RenderMode::DualPass, 0), (0, 0));
        assert_eq!(view_slot(RenderMode::DualPass, 1), (1, 0));
    }

    #[test]
    fn test_quad_eye_visibility() {
        assert_eq!(quad_visibility(0), xrsys::EyeVisibility::LEFT);
        assert_eq!(quad_visibility(1), xrsys::EyeVisibility::RIGHT);
    }

    #[test]
    fn test_layer_count_for_both_kinds() {
        assert_eq!(LayerConfig::projection(100, 100).layer_count(), 1);
        assert_eq!(sample_quads(4).layer_count(), 4);
        assert_eq!(VIEW_COUNT, 2);
    }
}
