use crate::config::ViewportConfig;
use crate::error::ViewportError;
use crate::host::{HostPage, HostSignal};
use crate::render_loop::{LoopState, RenderLoop};
use axisview_assets::AssetStore;
use axisview_common::{EntityId, RegionId};
use axisview_gizmo::{WorldAxis, show_world_axis};
use axisview_input::CameraInput;
use axisview_render::{DrawableRegion, FrameScheduler, RenderBackend, RenderSurface};
use axisview_scene::{
    Geometry, HemisphericLight, Mesh, OrbitCamera, SceneGraph, Space, StandardMaterial,
};
use glam::Vec3;
use std::collections::BTreeSet;

/// Builds viewports. Each drawable region can be bootstrapped once.
#[derive(Debug, Default)]
pub struct SceneBootstrapper {
    config: ViewportConfig,
    assets: AssetStore,
    bootstrapped: BTreeSet<RegionId>,
}

impl SceneBootstrapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ViewportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn is_bootstrapped(&self, region: RegionId) -> bool {
        self.bootstrapped.contains(&region)
    }

    /// Bind a surface to `region` and build the scene on it.
    ///
    /// Steps run in a fixed order: bind the surface, create the scene, the
    /// camera (attached to the region), the light, the ground, the textured
    /// box with its per-frame rotation, then the world axis. The first failure
    /// is returned as is; whatever was built before it is dropped.
    pub fn bootstrap<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        region: &B::Region,
    ) -> Result<Viewport<B::Surface>, ViewportError> {
        let region_id = region.region_id();
        if self.bootstrapped.contains(&region_id) {
            return Err(ViewportError::AlreadyBootstrapped(region_id));
        }

        let surface = backend.bind(region)?;
        self.bootstrapped.insert(region_id);
        tracing::info!(region = region_id.0, "surface bound");

        let mut scene = SceneGraph::new();
        let cfg = &self.config;

        let mut camera = OrbitCamera::new(
            "camera",
            cfg.camera.alpha,
            cfg.camera.beta,
            cfg.camera.radius,
            cfg.camera.target,
        );
        camera.attach_control(region_id);
        let camera = scene.add_camera(camera);

        let mut light = HemisphericLight::new("light", cfg.light.direction);
        light.intensity = cfg.light.intensity;
        let light = scene.add_light(light);

        let ground = scene.add_mesh(Mesh::new(
            "ground",
            Geometry::Ground {
                width: cfg.ground.width,
                height: cfg.ground.height,
            },
        ))?;

        let object = &cfg.rotating_object;
        let texture = self.assets.load_texture("sun_surface", &object.texture)?;
        let texture = scene.add_texture(texture)?;
        let material = scene.add_material(StandardMaterial::new("sun_surface").with_texture(texture))?;
        let rotating_object = scene.add_mesh(
            Mesh::new("box", Geometry::Box { size: object.size })
                .with_position(Vec3::new(0.0, object.height_offset, 0.0)),
        )?;
        scene.bind_material(rotating_object, material)?;

        let step = object.rotation_step;
        scene.register_before_render(move |scene| {
            scene.mesh_mut(rotating_object)?.rotate(Vec3::Y, step, Space::Local);
            Ok(())
        });

        let axis = show_world_axis(&mut scene, cfg.axis.size)?;

        tracing::info!(summary = %scene.summary(), "scene ready");
        Ok(Viewport {
            region: region_id,
            scene,
            surface,
            scheduler: FrameScheduler::new(),
            render_loop: RenderLoop::new(),
            camera,
            light,
            ground,
            rotating_object,
            axis,
        })
    }
}

/// One bootstrapped viewport: the scene, its surface and its render loop.
#[derive(Debug)]
pub struct Viewport<S> {
    region: RegionId,
    scene: SceneGraph,
    surface: S,
    scheduler: FrameScheduler,
    render_loop: RenderLoop,
    camera: EntityId,
    light: EntityId,
    ground: EntityId,
    rotating_object: EntityId,
    axis: WorldAxis,
}

impl<S: RenderSurface> Viewport<S> {
    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn camera(&self) -> EntityId {
        self.camera
    }

    pub fn light(&self) -> EntityId {
        self.light
    }

    pub fn ground(&self) -> EntityId {
        self.ground
    }

    pub fn rotating_object(&self) -> EntityId {
        self.rotating_object
    }

    pub fn axis(&self) -> &WorldAxis {
        &self.axis
    }

    /// Start continuous rendering. See [`RenderLoop::start`].
    pub fn start_rendering(&mut self, host: &mut dyn HostPage) -> Result<LoopState, ViewportError> {
        self.render_loop.start(host, &mut self.scheduler)
    }

    pub fn handle_signal(&mut self, signal: HostSignal) {
        self.render_loop
            .on_signal(signal, &mut self.scheduler, &mut self.surface);
    }

    /// Run one display refresh. Returns `false` when no render callback is
    /// registered yet.
    pub fn frame(&mut self) -> Result<bool, ViewportError> {
        Ok(self.scheduler.tick(&mut self.scene, &mut self.surface)?)
    }

    /// Feed pointer input to the camera. Returns whether the camera moved.
    pub fn apply_camera_input(&mut self, input: CameraInput) -> Result<bool, ViewportError> {
        let camera = self.scene.camera_mut(self.camera)?;
        Ok(input.apply(camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, ReadyState};
    use axisview_common::{Color3, SurfaceSize};
    use axisview_render::{HeadlessBackend, HeadlessRegion, HeadlessSurface};
    use std::f32::consts::{PI, TAU};
    use std::path::PathBuf;

    fn sun_texture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/textures/sun.png")
    }

    fn bootstrapper() -> SceneBootstrapper {
        let mut config = ViewportConfig::default();
        config.rotating_object.texture = sun_texture();
        SceneBootstrapper::with_config(config)
    }

    fn viewport(id: u64) -> (HeadlessRegion, Viewport<HeadlessSurface>) {
        let region = HeadlessRegion::new(RegionId(id), SurfaceSize::new(800, 600));
        let viewport = bootstrapper()
            .bootstrap(&mut HeadlessBackend::new(), &region)
            .unwrap();
        (region, viewport)
    }

    /// Angle of the box about +y, in [0, 2pi).
    fn yaw(viewport: &Viewport<HeadlessSurface>) -> f32 {
        let mesh = viewport.scene().mesh(viewport.rotating_object()).unwrap();
        let (axis, angle) = mesh.transform.rotation.to_axis_angle();
        let signed = if axis.y < 0.0 { -angle } else { angle };
        signed.rem_euclid(TAU)
    }

    #[test]
    fn builds_the_reference_scene() {
        let (_, viewport) = viewport(1);
        let scene = viewport.scene();
        let summary = scene.summary();
        assert_eq!(summary.cameras, 1);
        assert_eq!(summary.lights, 1);
        // ground, box, three axis lines, three label planes
        assert_eq!(summary.meshes, 8);
        assert_eq!(summary.line_meshes, 3);
        assert_eq!(summary.materials, 4);
        assert_eq!(summary.textures, 4);
        assert_eq!(summary.before_render_handlers, 1);
        assert_eq!(viewport.axis().size, 8.0);
    }

    #[test]
    fn camera_pose_and_control() {
        let (_, viewport) = viewport(2);
        let camera = viewport.scene().camera(viewport.camera()).unwrap();
        assert_eq!(camera.alpha, -PI / 2.0);
        assert_eq!(camera.beta, PI / 2.5);
        assert_eq!(camera.radius, 3.0);
        assert_eq!(camera.target(), Vec3::ZERO);
        assert_eq!(camera.attached_region(), Some(RegionId(2)));
        assert_eq!(viewport.scene().active_camera_id(), Some(viewport.camera()));
    }

    #[test]
    fn light_ground_and_box() {
        let (_, viewport) = viewport(3);
        let scene = viewport.scene();
        let light = scene.light(viewport.light()).unwrap();
        assert_eq!(light.direction, Vec3::Y);

        let ground = scene.mesh(viewport.ground()).unwrap();
        assert_eq!(
            ground.geometry,
            Geometry::Ground {
                width: 10.0,
                height: 10.0
            }
        );
        assert_eq!(ground.transform.position, Vec3::ZERO);
        assert!(ground.material().is_none());

        let object = scene.mesh(viewport.rotating_object()).unwrap();
        assert_eq!(object.geometry, Geometry::Box { size: 1.0 });
        assert_eq!(object.transform.position.y, 0.5);
        let material = scene.material(object.material().unwrap()).unwrap();
        let texture = scene.texture(material.diffuse_texture.unwrap()).unwrap();
        assert_eq!(material.name, "sun_surface");
        assert_eq!((texture.width, texture.height), (64, 64));
        assert_eq!(material.diffuse_color, Color3::WHITE);
    }

    #[test]
    fn box_turns_a_fixed_step_per_frame() {
        let (_, mut viewport) = viewport(4);
        let mut host = HeadlessHost::new(ReadyState::Complete);
        viewport.start_rendering(&mut host).unwrap();

        // 400 steps of 0.02 pass 2pi once.
        for n in 1..=400u32 {
            assert!(viewport.frame().unwrap());
            let expected = (0.02 * n as f32).rem_euclid(TAU);
            let diff = (yaw(&viewport) - expected).abs();
            // Angles just either side of 0 and 2pi are the same pose.
            let diff = diff.min(TAU - diff);
            assert!(diff < 1e-3, "frame {n}: off by {diff}");
        }
        assert_eq!(viewport.scene().frame(), 400);
        assert_eq!(viewport.surface().draw_count(), 400);
        // Position is untouched by the rotation.
        let object = viewport.scene().mesh(viewport.rotating_object()).unwrap();
        assert_eq!(object.transform.position, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn frames_before_start_do_nothing() {
        let (_, mut viewport) = viewport(5);
        assert!(!viewport.frame().unwrap());
        assert_eq!(viewport.scene().frame(), 0);
        assert_eq!(yaw(&viewport), 0.0);
    }

    #[test]
    fn same_region_cannot_be_bootstrapped_twice() {
        let region = HeadlessRegion::new(RegionId(6), SurfaceSize::new(10, 10));
        let mut backend = HeadlessBackend::new();
        let mut bootstrapper = bootstrapper();
        bootstrapper.bootstrap(&mut backend, &region).unwrap();
        assert!(bootstrapper.is_bootstrapped(RegionId(6)));
        assert!(matches!(
            bootstrapper.bootstrap(&mut backend, &region),
            Err(ViewportError::AlreadyBootstrapped(RegionId(6)))
        ));
        assert_eq!(backend.bound_count(), 1);

        // Other regions still get their own viewport.
        let other = HeadlessRegion::new(RegionId(7), SurfaceSize::new(10, 10));
        assert!(bootstrapper.bootstrap(&mut backend, &other).is_ok());
    }

    #[test]
    fn unusable_region_is_fatal() {
        let err = bootstrapper()
            .bootstrap(&mut HeadlessBackend::new(), &HeadlessRegion::unusable(RegionId(8)))
            .unwrap_err();
        assert!(matches!(err, ViewportError::Render(_)));
    }

    #[test]
    fn missing_texture_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ViewportConfig::default();
        config.rotating_object.texture = dir.path().join("nope.jpg");
        let region = HeadlessRegion::new(RegionId(9), SurfaceSize::new(10, 10));
        let err = SceneBootstrapper::with_config(config)
            .bootstrap(&mut HeadlessBackend::new(), &region)
            .unwrap_err();
        assert!(matches!(err, ViewportError::Asset(_)));
    }

    #[test]
    fn bad_axis_size_is_fatal() {
        let mut config = ViewportConfig::default();
        config.rotating_object.texture = sun_texture();
        config.axis.size = 0.0;
        let region = HeadlessRegion::new(RegionId(10), SurfaceSize::new(10, 10));
        let err = SceneBootstrapper::with_config(config)
            .bootstrap(&mut HeadlessBackend::new(), &region)
            .unwrap_err();
        assert!(matches!(err, ViewportError::Gizmo(_)));
    }

    #[test]
    fn camera_input_moves_the_attached_camera() {
        let (_, mut viewport) = viewport(11);
        let before = viewport.scene().active_camera().unwrap().position();
        assert!(viewport
            .apply_camera_input(CameraInput::Rotate { dx: 100.0, dy: 0.0 })
            .unwrap());
        let after = viewport.scene().active_camera().unwrap().position();
        assert!((after - before).length() > 1e-3);
    }
}
