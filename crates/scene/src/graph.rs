use crate::camera::OrbitCamera;
use crate::node::{HemisphericLight, Mesh, StandardMaterial, Texture};
use axisview_common::EntityId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("entity not found: {0}")]
    NotFound(EntityId),
    #[error("mesh {0} is frozen")]
    Frozen(EntityId),
    #[error("mesh {mesh} already has material {material}")]
    MaterialAlreadyBound { mesh: EntityId, material: EntityId },
    #[error("invalid geometry for mesh '{name}': {reason}")]
    InvalidGeometry { name: String, reason: String },
    #[error("texture '{name}' has {actual} bytes, expected {expected}")]
    TextureSize {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Kind of entity a scene graph owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Camera,
    Light,
    Mesh,
    Material,
    Texture,
}

/// Record of a structural change to the graph.
///
/// Construction and binding are logged; per-frame transform changes are not
/// and show up as revision bumps instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Added { id: EntityId, kind: EntityKind },
    MaterialBound { mesh: EntityId, material: EntityId },
    Frozen { id: EntityId },
}

/// A standing per-frame mutation, run before every draw.
pub type FrameMutation = Box<dyn FnMut(&mut SceneGraph) -> Result<(), SceneError>>;

/// Container of every camera, light, mesh, material and texture of one viewport.
///
/// Storage is BTreeMap keyed by id so iteration order is stable between runs
/// of the same scene.
#[derive(Default)]
pub struct SceneGraph {
    cameras: BTreeMap<EntityId, OrbitCamera>,
    lights: BTreeMap<EntityId, HemisphericLight>,
    meshes: BTreeMap<EntityId, Mesh>,
    materials: BTreeMap<EntityId, StandardMaterial>,
    textures: BTreeMap<EntityId, Texture>,
    active_camera: Option<EntityId>,
    /// Number of mutable borrows handed out per entity.
    revisions: BTreeMap<EntityId, u64>,
    frame: u64,
    before_render: Vec<FrameMutation>,
    event_log: Vec<SceneEvent>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Mutable borrows handed out for `id` since it was added.
    pub fn revision(&self, id: EntityId) -> Option<u64> {
        self.revisions.get(&id).copied()
    }

    fn record_added(&mut self, id: EntityId, kind: EntityKind) {
        self.revisions.insert(id, 0);
        self.event_log.push(SceneEvent::Added { id, kind });
        tracing::debug!(%id, ?kind, "entity added");
    }

    fn bump(&mut self, id: EntityId) {
        if let Some(r) = self.revisions.get_mut(&id) {
            *r += 1;
        }
    }

    // --- Cameras ---

    /// Add a camera. The first camera added becomes the active one.
    pub fn add_camera(&mut self, camera: OrbitCamera) -> EntityId {
        let id = EntityId::new();
        self.cameras.insert(id, camera);
        self.active_camera.get_or_insert(id);
        self.record_added(id, EntityKind::Camera);
        id
    }

    pub fn camera(&self, id: EntityId) -> Option<&OrbitCamera> {
        self.cameras.get(&id)
    }

    pub fn camera_mut(&mut self, id: EntityId) -> Result<&mut OrbitCamera, SceneError> {
        if !self.cameras.contains_key(&id) {
            return Err(SceneError::NotFound(id));
        }
        self.bump(id);
        self.cameras.get_mut(&id).ok_or(SceneError::NotFound(id))
    }

    pub fn active_camera(&self) -> Option<&OrbitCamera> {
        self.active_camera.and_then(|id| self.cameras.get(&id))
    }

    pub fn active_camera_id(&self) -> Option<EntityId> {
        self.active_camera
    }

    // --- Lights ---

    pub fn add_light(&mut self, light: HemisphericLight) -> EntityId {
        let id = EntityId::new();
        self.lights.insert(id, light);
        self.record_added(id, EntityKind::Light);
        id
    }

    pub fn light(&self, id: EntityId) -> Option<&HemisphericLight> {
        self.lights.get(&id)
    }

    pub fn lights(&self) -> impl Iterator<Item = &HemisphericLight> {
        self.lights.values()
    }

    // --- Meshes ---

    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<EntityId, SceneError> {
        mesh.geometry
            .validate()
            .map_err(|reason| SceneError::InvalidGeometry {
                name: mesh.name.clone(),
                reason,
            })?;
        let id = EntityId::new();
        self.meshes.insert(id, mesh);
        self.record_added(id, EntityKind::Mesh);
        Ok(id)
    }

    pub fn mesh(&self, id: EntityId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    /// Borrow a mesh for mutation. Fails on frozen meshes.
    pub fn mesh_mut(&mut self, id: EntityId) -> Result<&mut Mesh, SceneError> {
        match self.meshes.get(&id) {
            None => return Err(SceneError::NotFound(id)),
            Some(m) if m.frozen => return Err(SceneError::Frozen(id)),
            Some(_) => {}
        }
        self.bump(id);
        self.meshes.get_mut(&id).ok_or(SceneError::NotFound(id))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (EntityId, &Mesh)> {
        self.meshes.iter().map(|(id, m)| (*id, m))
    }

    /// Make a mesh immutable for the rest of its life.
    pub fn freeze(&mut self, id: EntityId) -> Result<(), SceneError> {
        let mesh = self.meshes.get_mut(&id).ok_or(SceneError::NotFound(id))?;
        if !mesh.frozen {
            mesh.frozen = true;
            self.event_log.push(SceneEvent::Frozen { id });
        }
        Ok(())
    }

    /// Bind a material to a mesh. A binding cannot be replaced.
    pub fn bind_material(&mut self, mesh: EntityId, material: EntityId) -> Result<(), SceneError> {
        if !self.materials.contains_key(&material) {
            return Err(SceneError::NotFound(material));
        }
        let target = self.meshes.get_mut(&mesh).ok_or(SceneError::NotFound(mesh))?;
        if let Some(existing) = target.material {
            return Err(SceneError::MaterialAlreadyBound {
                mesh,
                material: existing,
            });
        }
        target.material = Some(material);
        self.event_log
            .push(SceneEvent::MaterialBound { mesh, material });
        Ok(())
    }

    // --- Materials & textures ---

    pub fn add_material(&mut self, material: StandardMaterial) -> Result<EntityId, SceneError> {
        if let Some(tex) = material.diffuse_texture {
            if !self.textures.contains_key(&tex) {
                return Err(SceneError::NotFound(tex));
            }
        }
        let id = EntityId::new();
        self.materials.insert(id, material);
        self.record_added(id, EntityKind::Material);
        Ok(id)
    }

    pub fn material(&self, id: EntityId) -> Option<&StandardMaterial> {
        self.materials.get(&id)
    }

    pub fn add_texture(&mut self, texture: Texture) -> Result<EntityId, SceneError> {
        let expected = texture.width as usize * texture.height as usize * 4;
        if texture.rgba.len() != expected {
            return Err(SceneError::TextureSize {
                name: texture.name,
                expected,
                actual: texture.rgba.len(),
            });
        }
        let id = EntityId::new();
        self.textures.insert(id, texture);
        self.record_added(id, EntityKind::Texture);
        Ok(id)
    }

    pub fn texture(&self, id: EntityId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    // --- Per-frame mutations ---

    /// Register a handler run once per frame before drawing. Returns its
    /// position in the run order.
    pub fn register_before_render<F>(&mut self, handler: F) -> usize
    where
        F: FnMut(&mut SceneGraph) -> Result<(), SceneError> + 'static,
    {
        self.before_render.push(Box::new(handler));
        self.before_render.len() - 1
    }

    pub fn before_render_count(&self) -> usize {
        self.before_render.len()
    }

    /// Run every per-frame handler in registration order, then count the frame.
    ///
    /// Handlers registered while this runs take effect from the next frame.
    /// The first failing handler stops the frame; the frame is not counted.
    pub fn advance_frame(&mut self) -> Result<u64, SceneError> {
        let mut handlers = std::mem::take(&mut self.before_render);
        let mut outcome = Ok(());
        for handler in handlers.iter_mut() {
            if let Err(e) = handler(self) {
                outcome = Err(e);
                break;
            }
        }
        handlers.append(&mut self.before_render);
        self.before_render = handlers;
        outcome?;
        self.frame += 1;
        Ok(self.frame)
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            frame: self.frame,
            cameras: self.cameras.len(),
            lights: self.lights.len(),
            meshes: self.meshes.len(),
            line_meshes: self.meshes.values().filter(|m| m.geometry.is_lines()).count(),
            materials: self.materials.len(),
            textures: self.textures.len(),
            before_render_handlers: self.before_render.len(),
        }
    }
}

impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("summary", &self.summary())
            .finish_non_exhaustive()
    }
}

/// Entity counts for inspection and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub cameras: usize,
    pub lights: usize,
    pub meshes: usize,
    pub line_meshes: usize,
    pub materials: usize,
    pub textures: usize,
    pub before_render_handlers: usize,
}

impl SceneSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: frame={} cameras={} lights={} meshes={} (lines={}) materials={} textures={} handlers={}",
            self.frame,
            self.cameras,
            self.lights,
            self.meshes,
            self.line_meshes,
            self.materials,
            self.textures,
            self.before_render_handlers
        )
    }
}
