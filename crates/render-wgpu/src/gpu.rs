use crate::shaders;
use axisview_common::{Color3, EntityId, SurfaceSize};
use axisview_render::RenderError;
use axisview_scene::{Geometry, Mesh, SceneGraph, StandardMaterial, Tessellation};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_diffuse: [f32; 4],
    ground_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct MeshUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    flags: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
}

/// Which pipeline a mesh goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Culled,
    DoubleSided,
    Lines,
}

/// Material state resolved for one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawStyle {
    pass: Pass,
    color: Color3,
    unlit: bool,
    texture: Option<EntityId>,
}

/// Resolve how a mesh is drawn. Meshes without a material get the default
/// one: white, lit, back faces culled. Lines always use the mesh color.
fn draw_style(mesh: &Mesh, material: Option<&StandardMaterial>) -> DrawStyle {
    if mesh.geometry.is_lines() {
        return DrawStyle {
            pass: Pass::Lines,
            color: mesh
                .color
                .or(material.map(|m| m.diffuse_color))
                .unwrap_or(Color3::WHITE),
            unlit: true,
            texture: None,
        };
    }
    match material {
        Some(m) => DrawStyle {
            pass: if m.back_face_culling {
                Pass::Culled
            } else {
                Pass::DoubleSided
            },
            color: m.diffuse_color,
            unlit: m.unlit,
            texture: m.diffuse_texture,
        },
        None => DrawStyle {
            pass: Pass::Culled,
            color: mesh.color.unwrap_or(Color3::WHITE),
            unlit: false,
            texture: None,
        },
    }
}

/// Per-frame uniforms. `None` when the scene has no active camera.
fn frame_globals(scene: &SceneGraph, aspect: f32) -> Option<Globals> {
    let camera = scene.active_camera()?;
    let (light_dir, light_diffuse, ground_color) = match scene.lights().next() {
        Some(light) => {
            let d = light.direction.normalize_or(glam::Vec3::Y);
            (
                [d.x, d.y, d.z, light.intensity],
                rgba(light.diffuse),
                rgba(light.ground_color),
            )
        }
        None => ([0.0, 1.0, 0.0, 0.0], [0.0; 4], [0.0; 4]),
    };
    Some(Globals {
        view_proj: camera.view_projection(aspect).to_cols_array_2d(),
        light_dir,
        light_diffuse,
        ground_color,
    })
}

fn mesh_uniform(mesh: &Mesh, style: &DrawStyle) -> MeshUniform {
    MeshUniform {
        model: mesh.world_matrix().to_cols_array_2d(),
        color: rgba(style.color),
        flags: [if style.unlit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
    }
}

fn rgba(color: Color3) -> [f32; 4] {
    let [r, g, b] = color.to_array();
    [r, g, b, 1.0]
}

struct GpuMesh {
    geometry: Geometry,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws a scene graph with wgpu.
///
/// Geometry and textures are uploaded the first time a mesh or texture is
/// seen and reused afterwards. Mesh transforms are rewritten every frame.
pub struct SceneRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    double_sided_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    mesh_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    default_texture: wgpu::BindGroup,
    meshes: BTreeMap<EntityId, GpuMesh>,
    textures: BTreeMap<EntityId, wgpu::BindGroup>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, surface_format: wgpu::TextureFormat, size: SurfaceSize) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_dir: [0.0, 1.0, 0.0, 0.0],
                light_diffuse: [0.0; 4],
                ground_color: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[uniform_entry],
        });
        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_layout"),
            entries: &[uniform_entry],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let mesh_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &mesh_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let line_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &mesh_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });
        let mesh_pipeline = create_mesh_pipeline(
            device,
            &mesh_pipeline_layout,
            &mesh_shader,
            surface_format,
            Some(wgpu::Face::Back),
            "mesh_pipeline",
        );
        let double_sided_pipeline = create_mesh_pipeline(
            device,
            &mesh_pipeline_layout,
            &mesh_shader,
            surface_format,
            None,
            "double_sided_pipeline",
        );

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&line_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("diffuse_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let default_texture = upload_texture(
            device,
            queue,
            &texture_layout,
            &sampler,
            "default_white",
            1,
            1,
            &[255, 255, 255, 255],
        );

        let depth_texture = create_depth_texture(device, size);

        Self {
            mesh_pipeline,
            double_sided_pipeline,
            line_pipeline,
            globals_buffer,
            globals_bind_group,
            mesh_layout,
            texture_layout,
            sampler,
            default_texture,
            meshes: BTreeMap::new(),
            textures: BTreeMap::new(),
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, size: SurfaceSize) {
        self.depth_texture = create_depth_texture(device, size);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Number of meshes and textures currently resident on the GPU.
    pub fn resident(&self) -> (usize, usize) {
        (self.meshes.len(), self.textures.len())
    }

    /// Render one frame of the scene into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &SceneGraph,
        size: SurfaceSize,
    ) -> Result<(), RenderError> {
        let globals = frame_globals(scene, size.aspect()).ok_or(RenderError::NoCamera)?;
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut draws: Vec<(EntityId, DrawStyle)> = Vec::new();
        for (id, mesh) in scene.meshes() {
            let material = mesh.material().and_then(|m| scene.material(m));
            let style = draw_style(mesh, material);
            if let Some(texture_id) = style.texture {
                self.ensure_texture(device, queue, scene, texture_id);
            }
            let uniform = mesh_uniform(mesh, &style);
            let stale = self
                .meshes
                .get(&id)
                .is_none_or(|gpu| gpu.geometry != mesh.geometry);
            if stale {
                let gpu = self.upload_mesh(device, mesh, &uniform);
                self.meshes.insert(id, gpu);
            } else if let Some(gpu) = self.meshes.get(&id) {
                queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
            }
            draws.push((id, style));
        }
        // Opaque geometry first, then lines, then double-sided alpha planes.
        draws.sort_by_key(|(_, style)| match style.pass {
            Pass::Culled => 0,
            Pass::Lines => 1,
            Pass::DoubleSided => 2,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (id, style) in &draws {
                let Some(gpu) = self.meshes.get(id) else {
                    continue;
                };
                match style.pass {
                    Pass::Lines => pass.set_pipeline(&self.line_pipeline),
                    Pass::Culled => pass.set_pipeline(&self.mesh_pipeline),
                    Pass::DoubleSided => pass.set_pipeline(&self.double_sided_pipeline),
                }
                pass.set_bind_group(1, &gpu.bind_group, &[]);
                if style.pass != Pass::Lines {
                    let texture = style
                        .texture
                        .and_then(|t| self.textures.get(&t))
                        .unwrap_or(&self.default_texture);
                    pass.set_bind_group(2, texture, &[]);
                }
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                match &gpu.index_buffer {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                        pass.draw_indexed(0..gpu.count, 0, 0..1);
                    }
                    None => pass.draw(0..gpu.count, 0..1),
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn ensure_texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &SceneGraph, id: EntityId) {
        if self.textures.contains_key(&id) {
            return;
        }
        let Some(texture) = scene.texture(id) else {
            return;
        };
        let bind_group = upload_texture(
            device,
            queue,
            &self.texture_layout,
            &self.sampler,
            &texture.name,
            texture.width,
            texture.height,
            &texture.rgba,
        );
        tracing::debug!(texture = %texture.name, width = texture.width, height = texture.height, "texture uploaded");
        self.textures.insert(id, bind_group);
    }

    fn upload_mesh(&self, device: &wgpu::Device, mesh: &Mesh, uniform: &MeshUniform) -> GpuMesh {
        let (vertex_buffer, index_buffer, count) = match mesh.geometry.tessellate() {
            Tessellation::Triangles { vertices, indices } => {
                let vertices: Vec<Vertex> = vertices
                    .iter()
                    .map(|v| Vertex {
                        position: v.position,
                        normal: v.normal,
                        uv: v.uv,
                    })
                    .collect();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(mesh.name.as_str()),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(mesh.name.as_str()),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (vertex_buffer, Some(index_buffer), indices.len() as u32)
            }
            Tessellation::LineList(points) => {
                let vertices: Vec<LineVertex> = points
                    .iter()
                    .map(|p| LineVertex { position: p.to_array() })
                    .collect();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(mesh.name.as_str()),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (vertex_buffer, None, vertices.len() as u32)
            }
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_uniform"),
            contents: bytemuck::bytes_of(uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bind_group"),
            layout: &self.mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        tracing::debug!(mesh = %mesh.name, count, "mesh uploaded");

        GpuMesh {
            geometry: mesh.geometry.clone(),
            vertex_buffer,
            index_buffer,
            count,
            uniform_buffer,
            bind_group,
        }
    }
}

fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

/// Triangle pipeline. Scene meshes wind counter-clockwise around their outward
/// normal, which the left-handed camera turns clockwise on screen.
fn create_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    cull_mode: Option<wgpu::Face>,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                    2 => Float32x2,
                ],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Cw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth_state()),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

#[allow(clippy::too_many_arguments)]
fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn create_depth_texture(device: &wgpu::Device, size: SurfaceSize) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_scene::{HemisphericLight, OrbitCamera};
    use glam::Vec3;

    #[test]
    fn default_material_is_lit_and_culled() {
        let mesh = Mesh::new("ground", Geometry::Ground { width: 10.0, height: 10.0 });
        let style = draw_style(&mesh, None);
        assert_eq!(style.pass, Pass::Culled);
        assert_eq!(style.color, Color3::WHITE);
        assert!(!style.unlit);
        assert!(style.texture.is_none());
    }

    #[test]
    fn label_material_is_double_sided_and_unlit() {
        let texture = EntityId::new();
        let mut material = StandardMaterial::new("label").with_texture(texture);
        material.back_face_culling = false;
        material.unlit = true;
        let mesh = Mesh::new("plane", Geometry::Plane { size: 0.8 });
        let style = draw_style(&mesh, Some(&material));
        assert_eq!(style.pass, Pass::DoubleSided);
        assert!(style.unlit);
        assert_eq!(style.texture, Some(texture));
    }

    #[test]
    fn lines_take_the_mesh_color() {
        let mesh = Mesh::new(
            "axisY",
            Geometry::Lines {
                points: vec![Vec3::ZERO, Vec3::Y],
            },
        )
        .with_color(Color3::GREEN);
        let style = draw_style(&mesh, None);
        assert_eq!(style.pass, Pass::Lines);
        assert_eq!(rgba(style.color), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(mesh_uniform(&mesh, &style).flags[0], 1.0);
    }

    #[test]
    fn globals_need_a_camera_and_carry_the_light() {
        let mut scene = SceneGraph::new();
        assert!(frame_globals(&scene, 1.0).is_none());

        scene.add_camera(OrbitCamera::new("camera", 0.0, 1.0, 3.0, Vec3::ZERO));
        let unlit = frame_globals(&scene, 1.0).unwrap();
        assert_eq!(unlit.light_dir[3], 0.0);

        scene.add_light(HemisphericLight::new("light", Vec3::new(0.0, 2.0, 0.0)));
        let globals = frame_globals(&scene, 1.5).unwrap();
        assert_eq!(globals.light_dir, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(globals.light_diffuse, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(globals.ground_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn uniform_layouts_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshUniform>() % 16, 0);
    }
}
