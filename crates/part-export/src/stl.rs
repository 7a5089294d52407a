//! Binary STL export from a tessellated RenderMesh.

use std::io::Write;
use std::path::Path;

use kernel_bridge::RenderMesh;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("STL export: {reason}")]
    Stl { reason: String },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a mesh as binary STL.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3xf32 normal + 3x(3xf32 vertex) + u16 attribute = 50 bytes
pub fn export_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    let tri_count = mesh.indices.len() / 3;
    if tri_count == 0 {
        return Err(ExportError::Stl {
            reason: "mesh has no triangles".to_string(),
        });
    }

    let vertex_count = mesh.vertices.len() / 3;
    for &idx in &mesh.indices {
        if idx as usize >= vertex_count {
            return Err(ExportError::Stl {
                reason: format!("index {idx} out of range (vertex count = {vertex_count})"),
            });
        }
    }

    let file_size = 80 + 4 + tri_count * 50;
    let mut buf = Vec::with_capacity(file_size);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.indices.chunks(3) {
        let (nx, ny, nz) = triangle_normal(mesh, tri);
        buf.extend_from_slice(&nx.to_le_bytes());
        buf.extend_from_slice(&ny.to_le_bytes());
        buf.extend_from_slice(&nz.to_le_bytes());

        for &idx in tri {
            let vi = idx as usize * 3;
            buf.extend_from_slice(&mesh.vertices[vi].to_le_bytes());
            buf.extend_from_slice(&mesh.vertices[vi + 1].to_le_bytes());
            buf.extend_from_slice(&mesh.vertices[vi + 2].to_le_bytes());
        }

        // Attribute byte count (unused)
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Encode and write a mesh to `path` as binary STL.
pub fn write_binary_stl(mesh: &RenderMesh, name: &str, path: &Path) -> Result<(), ExportError> {
    let bytes = export_binary_stl(mesh, name)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}

fn triangle_normal(mesh: &RenderMesh, tri: &[u32]) -> (f32, f32, f32) {
    let i0 = tri[0] as usize * 3;
    let i1 = tri[1] as usize * 3;
    let i2 = tri[2] as usize * 3;

    let (ax, ay, az) = (
        mesh.vertices[i1] - mesh.vertices[i0],
        mesh.vertices[i1 + 1] - mesh.vertices[i0 + 1],
        mesh.vertices[i1 + 2] - mesh.vertices[i0 + 2],
    );
    let (bx, by, bz) = (
        mesh.vertices[i2] - mesh.vertices[i0],
        mesh.vertices[i2 + 1] - mesh.vertices[i0 + 1],
        mesh.vertices[i2 + 2] - mesh.vertices[i0 + 2],
    );
    let nx = ay * bz - az * by;
    let ny = az * bx - ax * bz;
    let nz = ax * by - ay * bx;
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-12 {
        (nx / len, ny / len, nz / len)
    } else {
        (0.0, 0.0, 1.0)
    }
}
