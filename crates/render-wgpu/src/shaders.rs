/// WGSL shader for textured triangle meshes under a hemispheric light.
pub const MESH_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    // xyz: direction toward the sky, w: intensity
    light_dir: vec4<f32>,
    light_diffuse: vec4<f32>,
    ground_color: vec4<f32>,
};

struct MeshUniform {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // x: unlit
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> mesh: MeshUniform;

@group(2) @binding(0)
var diffuse_texture: texture_2d<f32>;
@group(2) @binding(1)
var diffuse_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = mesh.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (mesh.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(diffuse_texture, diffuse_sampler, in.uv);
    let base = texel * mesh.color;
    if (base.a < 0.4) {
        discard;
    }
    if (mesh.flags.x > 0.5) {
        return base;
    }
    let up = dot(normalize(in.world_normal), normalize(globals.light_dir.xyz)) * 0.5 + 0.5;
    let light = mix(globals.ground_color.rgb, globals.light_diffuse.rgb, up) * globals.light_dir.w;
    return vec4<f32>(base.rgb * light, base.a);
}
"#;

/// WGSL shader for flat-colored line lists.
pub const LINE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_dir: vec4<f32>,
    light_diffuse: vec4<f32>,
    ground_color: vec4<f32>,
};

struct MeshUniform {
    model: mat4x4<f32>,
    color: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> mesh: MeshUniform;

@vertex
fn vs_line(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.view_proj * mesh.model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_line() -> @location(0) vec4<f32> {
    return mesh.color;
}
"#;
