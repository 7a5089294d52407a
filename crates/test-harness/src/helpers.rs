//! Mesh measurements for the scenario tests.
//!
//! Model dimensions are millimeters, so raw mesh volumes come out in mm³;
//! the volume helper converts to milliliters because that is the unit the
//! holder's capacity contract is written in.

use kernel_bridge::RenderMesh;

/// Axis-aligned bounds of a mesh, as (min, max) corners.
pub fn mesh_bounding_box(mesh: &RenderMesh) -> ([f32; 3], [f32; 3]) {
    assert!(!mesh.vertices.is_empty(), "mesh has no vertices");
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for corner in mesh.vertices.chunks_exact(3) {
        for axis in 0..3 {
            min[axis] = min[axis].min(corner[axis]);
            max[axis] = max[axis].max(corner[axis]);
        }
    }
    (min, max)
}

/// Enclosed volume of a watertight mesh, in milliliters.
///
/// Sums signed tetrahedron volumes against the origin; an open mesh gives
/// a meaningless result.
pub fn mesh_volume_ml(mesh: &RenderMesh) -> f64 {
    let point = |i: u32| {
        let at = i as usize * 3;
        [
            mesh.vertices[at] as f64,
            mesh.vertices[at + 1] as f64,
            mesh.vertices[at + 2] as f64,
        ]
    };
    let mut six_volume_mm3 = 0.0;
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
        six_volume_mm3 += a[0] * (b[1] * c[2] - c[1] * b[2])
            + b[0] * (c[1] * a[2] - a[1] * c[2])
            + c[0] * (a[1] * b[2] - b[1] * a[2]);
    }
    (six_volume_mm3 / 6.0).abs() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10 mm cube, so exactly one milliliter
    fn cube_mesh() -> RenderMesh {
        let corners: [[f32; 3]; 8] = [
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [10.0, 10.0, 0.0],
            [0.0, 10.0, 0.0],
            [0.0, 0.0, 10.0],
            [10.0, 0.0, 10.0],
            [10.0, 10.0, 10.0],
            [0.0, 10.0, 10.0],
        ];
        RenderMesh {
            vertices: corners.iter().flatten().copied().collect(),
            normals: vec![0.0; 24],
            indices: vec![
                0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6, 0, 4, 5, 0, 5, 1, 2, 6, 7, 2, 7, 3, 0, 3, 7,
                0, 7, 4, 1, 5, 6, 1, 6, 2,
            ],
            face_ranges: vec![],
        }
    }

    #[test]
    fn bounding_box_spans_the_cube() {
        let (min, max) = mesh_bounding_box(&cube_mesh());
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [10.0, 10.0, 10.0]);
    }

    #[test]
    fn ten_millimeter_cube_is_one_milliliter() {
        assert!((mesh_volume_ml(&cube_mesh()) - 1.0).abs() < 1e-10);
    }
}
