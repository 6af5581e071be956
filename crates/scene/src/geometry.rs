use glam::Vec3;

/// Shape of a mesh, in local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned cube centered on the origin.
    Box { size: f32 },
    /// Flat rectangle in the xz plane facing +y. `width` spans x, `height` spans z.
    Ground { width: f32, height: f32 },
    /// Square in the xy plane facing -z.
    Plane { size: f32 },
    /// Open polyline through the given points.
    Lines { points: Vec<Vec3> },
}

/// A triangle-mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Geometry expanded into primitives a backend can upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Tessellation {
    Triangles {
        vertices: Vec<MeshVertex>,
        indices: Vec<u16>,
    },
    /// Independent segments, two points each.
    LineList(Vec<Vec3>),
}

impl Geometry {
    /// Check that every dimension is positive and finite and that a polyline
    /// has at least one segment.
    pub fn validate(&self) -> Result<(), String> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(format!("{name} must be positive and finite, got {v}"))
            }
        };
        match self {
            Geometry::Box { size } | Geometry::Plane { size } => positive("size", *size),
            Geometry::Ground { width, height } => {
                positive("width", *width)?;
                positive("height", *height)
            }
            Geometry::Lines { points } => {
                if points.len() < 2 {
                    return Err(format!("polyline needs at least 2 points, got {}", points.len()));
                }
                if points.iter().any(|p| !p.is_finite()) {
                    return Err("polyline contains a non-finite point".into());
                }
                Ok(())
            }
        }
    }

    /// Short lowercase name of the shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Box { .. } => "box",
            Geometry::Ground { .. } => "ground",
            Geometry::Plane { .. } => "plane",
            Geometry::Lines { .. } => "lines",
        }
    }

    pub fn is_lines(&self) -> bool {
        matches!(self, Geometry::Lines { .. })
    }

    pub fn tessellate(&self) -> Tessellation {
        match self {
            Geometry::Box { size } => box_mesh(*size),
            Geometry::Ground { width, height } => ground_mesh(*width, *height),
            Geometry::Plane { size } => plane_mesh(*size),
            Geometry::Lines { points } => Tessellation::LineList(
                points
                    .windows(2)
                    .flat_map(|pair| [pair[0], pair[1]])
                    .collect(),
            ),
        }
    }
}

fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> MeshVertex {
    MeshVertex {
        position,
        normal,
        uv,
    }
}

/// Cube with four vertices per face so each face carries its own normal and UVs.
fn box_mesh(size: f32) -> Tessellation {
    let p = size * 0.5;
    let n = -p;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v([n, n, p], [0.0, 0.0, 1.0], [0.0, 1.0]),
        v([p, n, p], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([p, p, p], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([n, p, p], [0.0, 0.0, 1.0], [0.0, 0.0]),
        // -Z face
        v([p, n, n], [0.0, 0.0, -1.0], [0.0, 1.0]),
        v([n, n, n], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([n, p, n], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([p, p, n], [0.0, 0.0, -1.0], [0.0, 0.0]),
        // +X face
        v([p, n, p], [1.0, 0.0, 0.0], [0.0, 1.0]),
        v([p, n, n], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([p, p, n], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([p, p, p], [1.0, 0.0, 0.0], [0.0, 0.0]),
        // -X face
        v([n, n, n], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        v([n, n, p], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([n, p, p], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([n, p, n], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        // +Y face
        v([n, p, p], [0.0, 1.0, 0.0], [0.0, 1.0]),
        v([p, p, p], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([p, p, n], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([n, p, n], [0.0, 1.0, 0.0], [0.0, 0.0]),
        // -Y face
        v([n, n, n], [0.0, -1.0, 0.0], [0.0, 1.0]),
        v([p, n, n], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([p, n, p], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([n, n, p], [0.0, -1.0, 0.0], [0.0, 0.0]),
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    Tessellation::Triangles { vertices, indices }
}

fn ground_mesh(width: f32, height: f32) -> Tessellation {
    let w = width * 0.5;
    let h = height * 0.5;
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        v([-w, 0.0, -h], up, [0.0, 1.0]),
        v([-w, 0.0, h], up, [0.0, 0.0]),
        v([w, 0.0, h], up, [1.0, 0.0]),
        v([w, 0.0, -h], up, [1.0, 1.0]),
    ];
    Tessellation::Triangles {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Texture row 0 maps to the top edge as seen from -z.
fn plane_mesh(size: f32) -> Tessellation {
    let h = size * 0.5;
    let back = [0.0, 0.0, -1.0];
    let vertices = vec![
        v([-h, h, 0.0], back, [0.0, 0.0]),
        v([h, h, 0.0], back, [1.0, 0.0]),
        v([h, -h, 0.0], back, [1.0, 1.0]),
        v([-h, -h, 0.0], back, [0.0, 1.0]),
    ];
    Tessellation::Triangles {
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}
