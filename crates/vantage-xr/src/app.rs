//! Host orchestrator: bootstraps the OpenXR instance/system/session,
//! drains runtime events, and runs the per-frame wait/locate/render/submit
//! pipeline over a [`GraphicsBackend`] and a [`RenderSession`].

use std::sync::Arc;

use log::{debug, info, warn};
use openxr as xr;
use vantage_shell::{
    HandFrame, HostStatus, InitParams, Platform, IntentEvent, Pose, RenderMode, StatusCell,
    ViewParams, VIEW_COUNT,
};

use crate::backend::{GraphicsBackend, RenderPass, RenderSession};
use crate::bindings;
use crate::caps::{self, Capabilities};
use crate::composition::{
    self, plan_layer_delta, view_slot, ComposedLayer, DepthInfo, FrameSubmission, LayerConfig,
    LayerDelta, ProjectionViewDraw, QuadDraw, RingSpec, SwapchainRing,
};
use crate::error::{runtime_err, Result, XrError};
use crate::features::{
    HandTrackingFeature, LayerSettingsFeature, PassthroughFeature, RefreshRateFeature,
};
use crate::headset::HeadsetModel;
use crate::input::{InputSnapshot, XrInput};
use crate::session::{SessionControl, SessionLifecycle};
use crate::views;

/// Upper bound on events drained per poll pass. Keeps a misbehaving
/// runtime from starving the frame loop; the remainder is picked up next
/// pass.
pub const MAX_EVENTS_PER_POLL: usize = 32;

/// One composition layer's swapchains, one ring per render pass.
struct LayerSlot<A: xr::Graphics> {
    rings: Vec<SwapchainRing<A>>,
}

/// Everything located, once, at the start of a frame, all at the single
/// predicted display time captured from the frame wait.
struct FramePlan {
    should_render: bool,
    views: [ViewParams; VIEW_COUNT],
    raw_fovs: [xr::Fovf; VIEW_COUNT],
}

/// Adapter handing lifecycle begin/end through to the live session.
struct RuntimeControl<'a, A: xr::Graphics> {
    session: &'a xr::Session<A>,
}

impl<A: xr::Graphics> SessionControl for RuntimeControl<'_, A> {
    fn begin(&mut self) -> Result<()> {
        self.session
            .begin(xr::ViewConfigurationType::PRIMARY_STEREO)
            .map(|_| ())
            .map_err(|e| runtime_err("session begin", e))
    }

    fn end(&mut self) -> Result<()> {
        self.session
            .end()
            .map(|_| ())
            .map_err(|e| runtime_err("session end", e))
    }
}

pub struct XrApp<B: GraphicsBackend, R: RenderSession<B::Api>> {
    // Field order is drop order: layers and features go before the
    // session, the session before the instance.
    layers: Vec<LayerSlot<B::Api>>,
    layer_config: LayerConfig,
    passthrough: Option<PassthroughFeature>,
    hand_tracking: Option<HandTrackingFeature>,
    refresh_rate: Option<RefreshRateFeature>,
    layer_settings: Option<LayerSettingsFeature>,
    input: XrInput,
    head_space: xr::Space,
    current_space: xr::Space,
    frame_waiter: xr::FrameWaiter,
    frame_stream: xr::FrameStream<B::Api>,
    session: xr::Session<B::Api>,
    instance: xr::Instance,
    backend: B,
    render_session: R,
    platform: Box<dyn Platform>,
    init: InitParams,

    caps: Capabilities,
    headset: HeadsetModel,
    render_mode: RenderMode,
    view_extent: (u32, u32),
    stage_space: bool,
    additive_blend: bool,
    color_format: <B::Api as xr::Graphics>::Format,
    depth_format: Option<<B::Api as xr::Graphics>::Format>,

    lifecycle: SessionLifecycle,
    event_buffer: xr::EventDataBuffer,
    status: Arc<StatusCell>,
    initialized: bool,
    frame_index: u32,
    last_time: xr::Time,
    last_head: Pose,
    hands: [Option<HandFrame>; 2],
    last_input: InputSnapshot,
    poll_main: bool,
    poll_aux: bool,
}

impl<B, R> XrApp<B, R>
where
    B: GraphicsBackend,
    R: RenderSession<B::Api>,
    <B::Api as xr::Graphics>::Format: Copy,
{
    /// Runs the full bootstrap sequence. Every step here is fatal on
    /// failure except optional-feature construction, which downgrades to
    /// a warning and leaves the feature off.
    pub fn initialize(
        entry: &xr::Entry,
        mut backend: B,
        mut render_session: R,
        platform: Box<dyn Platform>,
        init: InitParams,
    ) -> Result<Self> {
        let available = entry
            .enumerate_extensions()
            .map_err(|e| runtime_err("enumerate_extensions", e))?;
        let negotiated = caps::negotiate(
            &available,
            backend.required_extensions(),
            backend.optional_extensions(),
        )?;

        let instance = entry
            .create_instance(
                &xr::ApplicationInfo {
                    application_name: &init.app_name,
                    application_version: 1,
                    engine_name: "vantage",
                    engine_version: 1,
                    api_version: xr::Version::new(1, 0, 0),
                },
                &negotiated.enabled,
                &[],
            )
            .map_err(|e| runtime_err("create_instance", e))?;
        if let Ok(props) = instance.properties() {
            let v = props.runtime_version;
            info!(
                "runtime {} {}.{}.{}",
                props.runtime_name,
                v.major(),
                v.minor(),
                v.patch()
            );
        }

        let system = instance
            .system(xr::FormFactor::HEAD_MOUNTED_DISPLAY)
            .map_err(|e| runtime_err("get system", e))?;
        let sys_props = instance
            .system_properties(system)
            .map_err(|e| runtime_err("system_properties", e))?;
        info!(
            "system '{}' vendor 0x{:04x} orientation={} position={}",
            sys_props.system_name,
            sys_props.vendor_id,
            sys_props.tracking_properties.orientation_tracking,
            sys_props.tracking_properties.position_tracking,
        );
        debug!(
            "max swapchain {}x{}, max layers {}",
            sys_props.graphics_properties.max_swapchain_image_width,
            sys_props.graphics_properties.max_swapchain_image_height,
            sys_props.graphics_properties.max_layer_count,
        );
        let headset = HeadsetModel::detect(&sys_props.system_name, sys_props.vendor_id);
        info!("headset model {headset:?}");

        let view_kinds = instance
            .enumerate_view_configurations(system)
            .map_err(|e| runtime_err("enumerate_view_configurations", e))?;
        if !view_kinds.contains(&xr::ViewConfigurationType::PRIMARY_STEREO) {
            return Err(XrError::Unsupported(
                "primary stereo view configuration".to_string(),
            ));
        }
        let config_views = instance
            .enumerate_view_configuration_views(system, xr::ViewConfigurationType::PRIMARY_STEREO)
            .map_err(|e| runtime_err("enumerate_view_configuration_views", e))?;
        views::validate_view_count(config_views.len())?;
        let view_extent = (
            config_views[0].recommended_image_rect_width,
            config_views[0].recommended_image_rect_height,
        );
        info!("per-eye extent {}x{}", view_extent.0, view_extent.1);

        let device = backend.create_device(&instance, system)?;
        let render_mode = if device.supports_multiview {
            RenderMode::SinglePass
        } else {
            RenderMode::DualPass
        };
        info!("render mode {render_mode:?}");

        let (session, frame_waiter, frame_stream) = unsafe {
            instance
                .create_session::<B::Api>(system, &device.session_create_info)
                .map_err(|e| runtime_err("create_session", e))?
        };

        let blend_modes = instance
            .enumerate_environment_blend_modes(system, xr::ViewConfigurationType::PRIMARY_STEREO)
            .map_err(|e| runtime_err("enumerate_environment_blend_modes", e))?;
        let additive_blend = blend_modes.contains(&xr::EnvironmentBlendMode::ADDITIVE);

        let head_space = session
            .create_reference_space(xr::ReferenceSpaceType::VIEW, xr::Posef::IDENTITY)
            .map_err(|e| runtime_err("create view space", e))?;
        let (current_space, stage_space) =
            match session.create_reference_space(xr::ReferenceSpaceType::STAGE, xr::Posef::IDENTITY)
            {
                Ok(space) => (space, true),
                Err(e) => {
                    debug!("stage space unavailable ({e:?}), falling back to local");
                    let local = session
                        .create_reference_space(xr::ReferenceSpaceType::LOCAL, xr::Posef::IDENTITY)
                        .map_err(|e| runtime_err("create local space", e))?;
                    (local, false)
                }
            };

        let input = XrInput::new(&instance, &session, &negotiated.caps, headset)?;

        let passthrough = if negotiated.caps.passthrough() {
            match PassthroughFeature::new(&session) {
                Ok(feature) => Some(feature),
                Err(e) => {
                    warn!("passthrough unavailable: {e}");
                    None
                }
            }
        } else {
            None
        };
        let hand_tracking = if negotiated.caps.hand_tracking() {
            match HandTrackingFeature::new(&session) {
                Ok(feature) => Some(feature),
                Err(e) => {
                    warn!("hand tracking unavailable: {e}");
                    None
                }
            }
        } else {
            None
        };
        let refresh_rate = if negotiated.caps.refresh_rate() {
            let feature = RefreshRateFeature;
            if let Err(e) = feature.apply_mode(&session, init.refresh_rate) {
                warn!("refresh rate request rejected: {e}");
            }
            Some(feature)
        } else {
            None
        };
        let layer_settings = if negotiated.caps.layer_settings() {
            let mut feature = LayerSettingsFeature::new();
            feature.set_sharpening(init.sharpening);
            Some(feature)
        } else {
            None
        };

        render_session.initialize()?;

        let formats = session
            .enumerate_swapchain_formats()
            .map_err(|e| runtime_err("enumerate_swapchain_formats", e))?;
        let color_format = backend
            .select_color_format(&formats)
            .ok_or_else(|| XrError::Unsupported("no usable color format".to_string()))?;
        let depth_format = if negotiated.caps.depth_layers() {
            backend.select_depth_format(&formats)
        } else {
            None
        };

        let mut app = Self {
            layers: Vec::new(),
            layer_config: LayerConfig::projection(view_extent.0, view_extent.1),
            passthrough,
            hand_tracking,
            refresh_rate,
            layer_settings,
            input,
            head_space,
            current_space,
            frame_waiter,
            frame_stream,
            session,
            instance,
            backend,
            render_session,
            platform,
            init,
            caps: negotiated.caps,
            headset,
            render_mode,
            view_extent,
            stage_space,
            additive_blend,
            color_format,
            depth_format,
            lifecycle: SessionLifecycle::new(),
            event_buffer: xr::EventDataBuffer::new(),
            status: Arc::new(StatusCell::new()),
            initialized: false,
            frame_index: 0,
            last_time: xr::Time::from_nanos(0),
            last_head: Pose::default(),
            hands: [None, None],
            last_input: InputSnapshot::default(),
            poll_main: true,
            poll_aux: false,
        };
        let requested = app.requested_config();
        app.rebuild_layers(requested)?;
        app.initialized = true;
        app.publish_status();
        info!("host initialized");
        Ok(app)
    }

    /// Drains up to [`MAX_EVENTS_PER_POLL`] runtime events. Returns
    /// `false` once the host should shut down.
    pub fn handle_events(&mut self) -> Result<bool> {
        for _ in 0..MAX_EVENTS_PER_POLL {
            let event = self
                .instance
                .poll_event(&mut self.event_buffer)
                .map_err(|e| runtime_err("poll_event", e))?;
            let Some(event) = event else {
                break;
            };
            match event {
                xr::Event::SessionStateChanged(change) => {
                    let mut control = RuntimeControl {
                        session: &self.session,
                    };
                    self.lifecycle.on_state_change(change.state(), &mut control);
                }
                // Informational; shutdown comes from the session-state
                // machine, not from here.
                xr::Event::InstanceLossPending(_) => {
                    warn!("instance loss pending");
                }
                xr::Event::EventsLost(_) => {
                    warn!("runtime event queue overflowed");
                }
                xr::Event::InteractionProfileChanged(_) => {
                    self.input.log_active_profiles(&self.instance, &self.session);
                }
                xr::Event::ReferenceSpaceChangePending(_) => {
                    debug!("reference space change pending");
                }
                xr::Event::PerfSettingsEXT(perf) => {
                    info!(
                        "perf settings: domain {:?}/{:?} level {:?} -> {:?}",
                        perf.domain(),
                        perf.sub_domain(),
                        perf.from_level(),
                        perf.to_level(),
                    );
                }
                _ => {
                    debug!("unhandled runtime event");
                }
            }
        }
        self.publish_status();
        Ok(keep_running(
            self.initialized,
            self.lifecycle.exit_requested(),
        ))
    }

    /// One frame: no-op unless initialized, resumed, and the session is
    /// active.
    pub fn update(&mut self) -> Result<()> {
        if !should_update(
            self.initialized,
            self.lifecycle.is_resumed(),
            self.lifecycle.is_active(),
        ) {
            return Ok(());
        }
        if let Some(feature) = &mut self.passthrough {
            feature.set_enabled(self.render_session.passthrough_enabled());
        }
        self.refresh_layer_config()?;

        let state = self
            .frame_waiter
            .wait()
            .map_err(|e| runtime_err("frame wait", e))?;
        self.frame_stream
            .begin()
            .map_err(|e| runtime_err("frame begin", e))?;
        let time = state.predicted_display_time;
        self.last_time = time;

        // The begun frame must be ended no matter what fails below,
        // or the wait/begin/end handshake desynchronizes.
        match self.run_frame(time, state.should_render) {
            Ok(submission) => self.end_frame(time, submission),
            Err(e) => {
                self.abandon_frame(time);
                Err(e)
            }
        }
    }

    fn run_frame(&mut self, time: xr::Time, should_render: bool) -> Result<FrameSubmission> {
        let frame = self.locate_frame(time, should_render)?;
        self.poll_actions(true)?;
        self.render(&frame)
    }

    /// Ends a frame that failed mid-flight with an empty layer list.
    fn abandon_frame(&mut self, time: xr::Time) {
        let submission = FrameSubmission::empty();
        if let Err(e) = composition::submit(
            &mut self.frame_stream,
            time,
            blend_mode(self.additive_blend, false),
            &self.current_space,
            &submission,
            false,
        ) {
            warn!("failed to end abandoned frame: {e}");
        }
    }

    fn locate_frame(&mut self, time: xr::Time, should_render: bool) -> Result<FramePlan> {
        let head = match self.head_space.locate(&self.current_space, time) {
            Ok(location) if views::location_valid(location.location_flags) => {
                views::pose_from_xr(location.pose)
            }
            _ => self.last_head,
        };
        self.last_head = head;

        let (_flags, raw_views) = self
            .session
            .locate_views(
                xr::ViewConfigurationType::PRIMARY_STEREO,
                time,
                &self.head_space,
            )
            .map_err(|e| runtime_err("locate_views", e))?;
        let view_params = views::view_params(&head, &raw_views)?;
        let raw_fovs = [raw_views[0].fov, raw_views[1].fov];

        if let Some(tracker) = &self.hand_tracking {
            self.hands = tracker.update(&self.current_space, time);
        }

        Ok(FramePlan {
            should_render,
            views: view_params,
            raw_fovs,
        })
    }

    fn render(&mut self, frame: &FramePlan) -> Result<FrameSubmission> {
        if !frame.should_render {
            return Ok(FrameSubmission::empty());
        }

        let passthrough_on = self
            .passthrough
            .as_ref()
            .map(|f| f.enabled())
            .unwrap_or(false);
        let quads = !self.layer_config.is_projection();
        let clear = clear_color(passthrough_on, quads);

        self.render_session.pre_update();
        for (layer_index, slot) in self.layers.iter_mut().enumerate() {
            if quads {
                self.render_session.set_current_quad_layer(layer_index);
            }
            for (pass, ring) in slot.rings.iter_mut().enumerate() {
                let pass_views = match self.render_mode {
                    RenderMode::SinglePass => &frame.views[..],
                    RenderMode::DualPass => std::slice::from_ref(&frame.views[pass]),
                };
                let acquired = ring.acquire()?;
                let spec = *ring.spec();
                let pass_desc = RenderPass {
                    views: pass_views,
                    color_image: ring.color_image(acquired.color),
                    depth_image: acquired.depth.and_then(|i| ring.depth_image(i)),
                    width: spec.width,
                    height: spec.height,
                    array_size: spec.array_size,
                    layer_index,
                    clear_color: clear,
                };
                // Release before propagating so a failed pass does not
                // leave the image acquired.
                let drawn = self.render_session.update(&pass_desc);
                ring.release()?;
                drawn?;
            }
        }
        self.render_session.post_update();

        let mut submission = FrameSubmission::empty();
        submission.passthrough = if passthrough_on {
            self.passthrough.as_ref().and_then(|f| f.layer_handle())
        } else {
            None
        };
        let settings = self
            .layer_settings
            .as_ref()
            .map(|f| f.flags())
            .unwrap_or(xr::sys::CompositionLayerSettingsFlagsFB::EMPTY);

        if quads {
            let placements = self
                .render_session
                .quad_layers()
                .map(|p| p.placements)
                .unwrap_or_default();
            for (quad, slot) in self.layers.iter().enumerate() {
                let placement = placements.get(quad).copied().unwrap_or_default();
                for eye in 0..VIEW_COUNT {
                    let (ring_index, array_index) = view_slot(self.render_mode, eye);
                    let ring = &slot.rings[ring_index];
                    submission.layers.push(ComposedLayer::Quad(QuadDraw {
                        eye,
                        pose: views::pose_to_xr(&placement.pose),
                        size: [placement.size.x, placement.size.y],
                        sub_image: ring.sub_image(array_index),
                        blend: placement.blend,
                    }));
                }
            }
        } else {
            let slot = &self.layers[0];
            let mut proj_views = Vec::with_capacity(VIEW_COUNT);
            for eye in 0..VIEW_COUNT {
                let (ring_index, array_index) = view_slot(self.render_mode, eye);
                let ring = &slot.rings[ring_index];
                let depth = ring.depth_sub_image(array_index).map(|sub_image| DepthInfo {
                    sub_image,
                    near_z: self.init.near_z,
                    far_z: self.init.far_z,
                });
                proj_views.push(ProjectionViewDraw {
                    pose: views::pose_to_xr(&frame.views[eye].pose),
                    fov: frame.raw_fovs[eye],
                    sub_image: ring.sub_image(array_index),
                    depth,
                });
            }
            submission.layers.push(ComposedLayer::Projection {
                views: proj_views,
                settings,
                over_passthrough: passthrough_on,
            });
        }
        Ok(submission)
    }

    fn end_frame(&mut self, time: xr::Time, submission: FrameSubmission) -> Result<()> {
        let blend = blend_mode(self.additive_blend, submission.passthrough.is_some());
        composition::submit(
            &mut self.frame_stream,
            time,
            blend,
            &self.current_space,
            &submission,
            self.caps.alpha_blend_layers(),
        )?;
        self.frame_index = self.frame_index.wrapping_add(1);
        self.publish_status();
        Ok(())
    }

    /// Re-reads the render session's layer request and applies the
    /// minimal swapchain change: identical requests keep everything, a
    /// count-only change destroys or creates only the difference, and a
    /// size or kind change rebuilds.
    fn refresh_layer_config(&mut self) -> Result<()> {
        let requested = self.requested_config();
        match plan_layer_delta(&self.layer_config, &requested) {
            LayerDelta::Keep => Ok(()),
            LayerDelta::Resize { destroy, create } => {
                for _ in 0..destroy {
                    self.layers.pop();
                }
                for _ in 0..create {
                    let slot = self.make_slot(requested)?;
                    self.layers.push(slot);
                }
                self.layer_config = requested;
                Ok(())
            }
            LayerDelta::Rebuild => self.rebuild_layers(requested),
        }
    }

    fn requested_config(&self) -> LayerConfig {
        if self.init.quad_composition {
            if let Some(params) = self.render_session.quad_layers() {
                if !params.placements.is_empty() {
                    return LayerConfig {
                        quad_count: params.count(),
                        width: params.width,
                        height: params.height,
                    };
                }
            }
        }
        LayerConfig::projection(self.view_extent.0, self.view_extent.1)
    }

    fn make_slot(&mut self, config: LayerConfig) -> Result<LayerSlot<B::Api>> {
        let spec = RingSpec {
            width: config.width,
            height: config.height,
            array_size: self.render_mode.array_size(),
            sample_count: 1,
        };
        let mut rings = Vec::with_capacity(self.render_mode.passes());
        for _ in 0..self.render_mode.passes() {
            rings.push(SwapchainRing::new(
                &self.session,
                spec,
                self.color_format,
                self.depth_format,
            )?);
        }
        Ok(LayerSlot { rings })
    }

    fn rebuild_layers(&mut self, config: LayerConfig) -> Result<()> {
        self.layers.clear();
        for _ in 0..config.layer_count() {
            let slot = self.make_slot(config)?;
            self.layers.push(slot);
        }
        self.layer_config = config;
        Ok(())
    }

    /// Syncs and reads the action state. Callable from the frame loop
    /// (`main_thread` true) or an auxiliary poller; each caller has its
    /// own enable flag so exactly one drives the runtime.
    pub fn poll_actions(&mut self, main_thread: bool) -> Result<()> {
        let enabled = if main_thread {
            self.poll_main
        } else {
            self.poll_aux
        };
        if !enabled || !self.lifecycle.is_active() {
            return Ok(());
        }
        self.last_input = self
            .input
            .poll(&self.session, &self.current_space, self.last_time)?;
        Ok(())
    }

    pub fn set_action_polling(&mut self, main_thread: bool, aux_thread: bool) {
        self.poll_main = main_thread;
        self.poll_aux = aux_thread;
    }

    /// Pause/resume edge from the platform shell. READY is only honored
    /// while resumed.
    pub fn set_resumed(&mut self, resumed: bool) {
        self.lifecycle.set_resumed(resumed);
        self.platform.queue_event(if resumed {
            IntentEvent::Resume
        } else {
            IntentEvent::Pause
        });
        self.publish_status();
    }

    fn publish_status(&self) {
        self.status.publish(HostStatus {
            initialized: self.initialized,
            resumed: self.lifecycle.is_resumed(),
            session_active: self.lifecycle.is_active(),
            frame_index: self.frame_index,
        });
    }

    pub fn status_cell(&self) -> Arc<StatusCell> {
        Arc::clone(&self.status)
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn session_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    pub fn exit_requested(&self) -> bool {
        self.lifecycle.exit_requested()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn headset(&self) -> HeadsetModel {
        self.headset
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Recommended per-eye image extent from the runtime.
    pub fn view_extent(&self) -> (u32, u32) {
        self.view_extent
    }

    /// Whether the current space is stage-anchored (false means the
    /// local-space fallback is in use).
    pub fn stage_anchored(&self) -> bool {
        self.stage_space
    }

    pub fn input_snapshot(&self) -> &InputSnapshot {
        &self.last_input
    }

    pub fn hand_frames(&self) -> &[Option<HandFrame>; 2] {
        &self.hands
    }

    pub fn set_sharpening(&mut self, enabled: bool) {
        if let Some(feature) = &mut self.layer_settings {
            feature.set_sharpening(enabled);
        }
    }

    pub fn request_refresh_rate(&self, rate: f32) -> Result<()> {
        match &self.refresh_rate {
            Some(feature) => feature.set_rate(&self.session, rate),
            None => Err(XrError::Unsupported("display refresh rate".to_string())),
        }
    }

    pub fn supported_refresh_rates(&self) -> Result<Vec<f32>> {
        match &self.refresh_rate {
            Some(feature) => feature.supported_rates(&self.session),
            None => Ok(Vec::new()),
        }
    }

    pub fn vibrate(
        &self,
        hand: usize,
        amplitude: f32,
        frequency: f32,
        duration_ns: i64,
    ) -> Result<()> {
        self.input
            .vibrate(&self.session, hand, amplitude, frequency, duration_ns)
    }

    /// Suggested binding profiles for the negotiated capabilities, for
    /// diagnostics.
    pub fn binding_profiles(&self) -> Vec<bindings::ControllerProfile> {
        bindings::suggested_profiles(&self.caps, self.headset)
    }
}

/// Frames run only when all three lifecycle gates are open.
pub fn should_update(initialized: bool, resumed: bool, session_active: bool) -> bool {
    initialized && resumed && session_active
}

/// Shutdown is driven solely by the session-state machine's exit flag;
/// informational runtime events (instance-loss-pending, events-lost,
/// perf settings) never stop the loop.
pub fn keep_running(initialized: bool, exit_requested: bool) -> bool {
    initialized && !exit_requested
}

/// Transparent clear when compositing over passthrough or between quad
/// layers, opaque clear otherwise.
pub fn clear_color(passthrough: bool, quads: bool) -> [f32; 4] {
    if passthrough || quads {
        [0.0, 0.0, 0.0, 0.0]
    } else {
        [0.0, 0.0, 0.0, 1.0]
    }
}

/// Passthrough composites its own feed, so the environment blend stays
/// opaque while it is on.
fn blend_mode(additive_supported: bool, passthrough: bool) -> xr::EnvironmentBlendMode {
    if additive_supported && !passthrough {
        xr::EnvironmentBlendMode::ADDITIVE
    } else {
        xr::EnvironmentBlendMode::OPAQUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_requires_all_gates() {
        assert!(should_update(true, true, true));
        assert!(!should_update(false, true, true));
        assert!(!should_update(true, false, true));
        assert!(!should_update(true, true, false));
        assert!(!should_update(false, false, false));
    }

    #[test]
    fn shutdown_only_on_exit_request() {
        assert!(keep_running(true, false));
        assert!(!keep_running(true, true));
        assert!(!keep_running(false, false));
    }

    #[test]
    fn abandoned_frame_carries_no_layers() {
        let submission = FrameSubmission::empty();
        assert!(submission.layers.is_empty());
        assert!(submission.passthrough.is_none());
    }

    #[test]
    fn clear_is_transparent_over_passthrough_and_quads() {
        assert_eq!(clear_color(true, false)[3], 0.0);
        assert_eq!(clear_color(false, true)[3], 0.0);
        assert_eq!(clear_color(false, false)[3], 1.0);
    }

    #[test]
    fn additive_preferred_only_without_passthrough() {
        assert_eq!(blend_mode(true, false), xr::EnvironmentBlendMode::ADDITIVE);
        assert_eq!(blend_mode(true, true), xr::EnvironmentBlendMode::OPAQUE);
        assert_eq!(blend_mode(false, false), xr::EnvironmentBlendMode::OPAQUE);
    }
}
