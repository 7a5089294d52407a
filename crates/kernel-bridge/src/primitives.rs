//! Primitive solid builders on top of truck's sweep API.
//!
//! truck has no built-in box or prism — everything is successive sweeps
//! from vertices through edges and faces.

use std::f64::consts::PI;

use truck_modeling::builder;
use truck_modeling::topology::{Face, Shell, Solid, Wire};
use truck_modeling::{Point3, Rad, Vector3};

use crate::traits::Plane;
use crate::types::KernelError;
use holder_types::Profile2;

/// Create a box of `size`, centered in X/Y on `base_center`, bottom at
/// `base_center[2]`.
pub fn make_box(size: [f64; 3], base_center: [f64; 3]) -> Solid {
    let origin = Point3::new(
        base_center[0] - size[0] / 2.0,
        base_center[1] - size[1] / 2.0,
        base_center[2],
    );
    let v = builder::vertex(origin);
    let edge = builder::tsweep(&v, Vector3::new(size[0], 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, size[1], 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, size[2]))
}

/// Build a planar face for a single profile laid out on `plane`.
pub fn profile_face(plane: &Plane, profile: &Profile2) -> Result<Face, KernelError> {
    let wire = match profile {
        Profile2::Rect { center, size } => {
            let (cx, cy) = (center[0], center[1]);
            let (hw, hh) = (size[0] / 2.0, size[1] / 2.0);
            let corners = [
                plane.to_world(cx - hw, cy - hh),
                plane.to_world(cx + hw, cy - hh),
                plane.to_world(cx + hw, cy + hh),
                plane.to_world(cx - hw, cy + hh),
            ];
            let verts: Vec<_> = corners
                .iter()
                .map(|p| builder::vertex(Point3::new(p[0], p[1], p[2])))
                .collect();
            let mut wire = Wire::new();
            for i in 0..4 {
                wire.push_back(builder::line(&verts[i], &verts[(i + 1) % 4]));
            }
            wire
        }
        Profile2::Circle { center, radius } => {
            let start = plane.to_world(center[0] + radius, center[1]);
            let origin = plane.to_world(center[0], center[1]);
            let v = builder::vertex(Point3::new(start[0], start[1], start[2]));
            builder::rsweep(
                &v,
                Point3::new(origin[0], origin[1], origin[2]),
                Vector3::new(plane.normal[0], plane.normal[1], plane.normal[2]),
                Rad(2.0 * PI),
            )
        }
    };

    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("profile face construction failed: {e}"),
    })
}

/// Extrude a single profile from `plane` by a signed depth along the plane
/// normal into a standalone prism solid.
pub fn prism_solid(plane: &Plane, profile: &Profile2, depth: f64) -> Result<Solid, KernelError> {
    let face = profile_face(plane, profile)?;
    let sweep = Vector3::new(
        plane.normal[0] * depth,
        plane.normal[1] * depth,
        plane.normal[2] * depth,
    );
    Ok(builder::tsweep(&face, sweep))
}

/// Extrude a rectangle from `plane` with its sides drafted inward by
/// `taper_deg`, as a standalone frustum solid.
///
/// The run is clamped just short of the apex where the profile would
/// vanish, so an over-long drafted cut still yields a valid solid.
pub fn tapered_prism_solid(
    plane: &Plane,
    profile: &Profile2,
    depth: f64,
    taper_deg: f64,
) -> Result<Solid, KernelError> {
    let Profile2::Rect { center, size } = profile else {
        return Err(KernelError::NotSupported {
            operation: "tapered circular extrusion".to_string(),
        });
    };
    let slope = taper_deg.to_radians().tan();
    if slope <= 0.0 {
        return Err(KernelError::Other {
            message: format!("taper must be in (0, 90) degrees, got {taper_deg}"),
        });
    }

    let apex = size[0].min(size[1]) / (2.0 * slope);
    let run = depth.abs().min(0.99 * apex);
    let shrink = run * slope;
    let dir = [
        plane.normal[0] * depth.signum(),
        plane.normal[1] * depth.signum(),
        plane.normal[2] * depth.signum(),
    ];

    let (cx, cy) = (center[0], center[1]);
    let (hw, hh) = (size[0] / 2.0, size[1] / 2.0);
    // Corner order is counterclockwise around the extrusion direction, so
    // the assembled shell faces outward for either depth sign.
    let mut corners = [
        [cx - hw, cy - hh],
        [cx + hw, cy - hh],
        [cx + hw, cy + hh],
        [cx - hw, cy + hh],
    ];
    if depth < 0.0 {
        corners.swap(1, 3);
    }
    let pulled = |p: [f64; 2]| {
        [
            p[0] - (p[0] - cx).signum() * shrink,
            p[1] - (p[1] - cy).signum() * shrink,
        ]
    };

    let vb: Vec<_> = corners
        .iter()
        .map(|&[x, y]| {
            let w = plane.to_world(x, y);
            builder::vertex(Point3::new(w[0], w[1], w[2]))
        })
        .collect();
    let vt: Vec<_> = corners
        .iter()
        .map(|&c| {
            let q = pulled(c);
            let w = plane.to_world(q[0], q[1]);
            builder::vertex(Point3::new(
                w[0] + dir[0] * run,
                w[1] + dir[1] * run,
                w[2] + dir[2] * run,
            ))
        })
        .collect();

    let eb: Vec<_> = (0..4).map(|i| builder::line(&vb[i], &vb[(i + 1) % 4])).collect();
    let et: Vec<_> = (0..4).map(|i| builder::line(&vt[i], &vt[(i + 1) % 4])).collect();
    let ev: Vec<_> = (0..4).map(|i| builder::line(&vb[i], &vt[i])).collect();

    let attach = |wire: Wire| {
        builder::try_attach_plane(&[wire]).map_err(|err| KernelError::Other {
            message: format!("frustum face construction failed: {err}"),
        })
    };

    let mut faces = Vec::with_capacity(6);
    for i in 0..4 {
        let mut side = Wire::new();
        side.push_back(eb[i].clone());
        side.push_back(ev[(i + 1) % 4].clone());
        side.push_back(et[i].inverse());
        side.push_back(ev[i].inverse());
        faces.push(attach(side)?);
    }
    let mut base = Wire::new();
    for i in (0..4).rev() {
        base.push_back(eb[i].inverse());
    }
    faces.push(attach(base)?);
    let mut tip = Wire::new();
    for edge in &et {
        tip.push_back(edge.clone());
    }
    faces.push(attach(tip)?);

    Solid::try_new(vec![Shell::from(faces)]).map_err(|err| KernelError::Other {
        message: format!("frustum assembly failed: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_topology() {
        let solid = make_box([2.0, 3.0, 4.0], [0.0, 0.0, 0.0]);

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "box should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();

        let mut edge_ids = std::collections::HashSet::new();
        for edge in shell.edge_iter() {
            edge_ids.insert(edge.id());
        }
        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }

        assert_eq!(faces.len(), 6);
        assert_eq!(edge_ids.len(), 12);
        assert_eq!(vert_ids.len(), 8);

        // Euler's formula: V - E + F = 2
        let (v, e, f) = (
            vert_ids.len() as i64,
            edge_ids.len() as i64,
            faces.len() as i64,
        );
        assert_eq!(v - e + f, 2);
    }

    #[test]
    fn box_is_base_centered() {
        let solid = make_box([4.0, 6.0, 2.0], [0.0, 0.0, 0.0]);
        let boundaries = solid.boundaries();
        let shell = &boundaries[0];

        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for v in shell.vertex_iter() {
            let p = v.point();
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        let eps = 1e-10;
        assert!((min[0] + 2.0).abs() < eps && (max[0] - 2.0).abs() < eps);
        assert!((min[1] + 3.0).abs() < eps && (max[1] - 3.0).abs() < eps);
        assert!(min[2].abs() < eps && (max[2] - 2.0).abs() < eps);
    }

    #[test]
    fn tapered_prism_narrows_toward_the_tip() {
        let plane = Plane::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let profile = Profile2::square(0.0, 0.0, 4.0);
        let solid = tapered_prism_solid(&plane, &profile, 2.0, 30.0).unwrap();

        let boundaries = solid.boundaries();
        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();
        let mut edge_ids = std::collections::HashSet::new();
        for edge in shell.edge_iter() {
            edge_ids.insert(edge.id());
        }
        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }
        assert_eq!(faces.len(), 6);
        assert_eq!(edge_ids.len(), 12);
        assert_eq!(vert_ids.len(), 8);

        // 30 degree draft over 2 mm pulls each side in by 2 tan(30)
        let expected_half = 2.0 - 2.0 * (30.0f64).to_radians().tan();
        for v in shell.vertex_iter() {
            let p = v.point();
            if (p[2] - 2.0).abs() < 1e-9 {
                assert!((p[0].abs() - expected_half).abs() < 1e-9);
                assert!((p[1].abs() - expected_half).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn over_long_tapered_prism_stops_short_of_the_apex() {
        let plane = Plane::new([0.0, 0.0, 5.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]);
        let profile = Profile2::square(0.0, 0.0, 4.0);
        let solid = tapered_prism_solid(&plane, &profile, 999.0, 30.0).unwrap();

        let apex = 2.0 / (30.0f64).to_radians().tan();
        let mut min_z = f64::MAX;
        for v in solid.boundaries()[0].vertex_iter() {
            min_z = min_z.min(v.point()[2]);
        }
        // Plane normal points -Z, positive depth runs downward
        let run = 5.0 - min_z;
        assert!(run < apex);
        assert!(run > 0.9 * apex);
    }

    #[test]
    fn tapered_circle_is_refused() {
        let plane = Plane::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let profile = Profile2::Circle {
            center: [0.0, 0.0],
            radius: 3.0,
        };
        let err = tapered_prism_solid(&plane, &profile, 2.0, 30.0).unwrap_err();
        assert!(matches!(err, KernelError::NotSupported { .. }));
    }

    #[test]
    fn rect_prism_sweeps_along_plane_normal() {
        let plane = Plane::new([0.0, 0.0, 5.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let profile = Profile2::square(0.0, 0.0, 2.0);
        let solid = prism_solid(&plane, &profile, -3.0).unwrap();

        let boundaries = solid.boundaries();
        let shell = &boundaries[0];
        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;
        for v in shell.vertex_iter() {
            let p = v.point();
            min_z = min_z.min(p[2]);
            max_z = max_z.max(p[2]);
        }
        assert!((max_z - 5.0).abs() < 1e-10);
        assert!((min_z - 2.0).abs() < 1e-10);
    }
}
