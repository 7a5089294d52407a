//! TruckKernel — real geometry kernel wrapping truck's API.
//!
//! Boxes and prisms come from sweeps, booleans from truck-shapeops (a cut
//! is intersection with the inverted tool), open shells from subtracting an
//! inset cavity box, and tapered extrusions from a frustum solid. Fillet
//! and chamfer are not provided by truck and report `NotSupported`; the op
//! layer downgrades those to diagnostics so a build still completes.

use std::collections::HashSet;

use crate::tessellation;
use crate::traits::{BooleanMode, Kernel, KernelIntrospect, Plane};
use crate::types::*;
use crate::primitives;

use holder_types::Profile2;
use truck_modeling::builder;
use truck_modeling::geometry::Surface;
use truck_modeling::topology::Solid;
use truck_modeling::Vector3;

/// Entity ids are derived from the owning handle: faces are
/// `handle * ID_STRIDE + index`, edges `handle * ID_STRIDE + EDGE_BASE + index`.
const ID_STRIDE: u64 = 100_000;
const EDGE_BASE: u64 = 10_000;

/// Tolerance handed to truck-shapeops for every boolean.
const SHAPEOPS_TOL: f64 = 0.05;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    solids: std::collections::HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: std::collections::HashMap::new(),
        }
    }

    fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }

    /// Collect deduplicated edges in a deterministic order.
    fn ordered_edges(solid: &Solid) -> Vec<truck_modeling::topology::Edge> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for shell in solid.boundaries().iter() {
            for edge in shell.edge_iter() {
                if seen.insert(edge.id()) {
                    edges.push(edge.clone());
                }
            }
        }
        edges
    }

    fn faces(solid: &Solid) -> Vec<truck_modeling::topology::Face> {
        let mut faces = Vec::new();
        for shell in solid.boundaries().iter() {
            for face in shell.face_iter() {
                faces.push(face.clone());
            }
        }
        faces
    }

    /// Boolean difference: intersect the base with the inverted tool.
    /// truck-shapeops only exports `and` and `or`.
    fn subtract(base: &Solid, tool: &Solid) -> Option<Solid> {
        let mut complement = tool.clone();
        complement.not();
        truck_shapeops::and(base, &complement, SHAPEOPS_TOL)
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_box(
        &mut self,
        size: [f64; 3],
        base_center: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        if size.iter().any(|&s| s <= 0.0) {
            return Err(KernelError::Other {
                message: format!("box size must be positive, got {size:?}"),
            });
        }
        Ok(self.store_solid(primitives::make_box(size, base_center)))
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        let moved = builder::translated(
            truck_solid,
            Vector3::new(offset[0], offset[1], offset[2]),
        );
        Ok(self.store_solid(moved))
    }

    /// Hollow a box-like solid by subtracting its bounding box inset by
    /// `thickness` on every side, pushed out through the open face.
    fn shell_open(
        &mut self,
        solid: &KernelSolidHandle,
        open_face: KernelId,
        thickness: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        if thickness <= 0.0 {
            return Err(KernelError::ShellFailed {
                reason: format!("thickness must be positive, got {thickness}"),
            });
        }
        let normal = self
            .compute_signature(open_face, TopoKind::Face)
            .normal
            .ok_or(KernelError::EntityNotFound { id: open_face })?;
        let bbox = self
            .bounding_box(solid)
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(solid.id()),
            })?;

        let mut axis = 0;
        for i in 1..3 {
            if normal[i].abs() > normal[axis].abs() {
                axis = i;
            }
        }
        let mut lo = [bbox[0] + thickness, bbox[1] + thickness, bbox[2] + thickness];
        let mut hi = [bbox[3] - thickness, bbox[4] - thickness, bbox[5] - thickness];
        if normal[axis] >= 0.0 {
            hi[axis] = bbox[3 + axis] + thickness;
        } else {
            lo[axis] = bbox[axis] - thickness;
        }
        if lo.iter().zip(&hi).any(|(l, h)| l >= h) {
            return Err(KernelError::ShellFailed {
                reason: format!("wall {thickness} leaves no interior within {bbox:?}"),
            });
        }

        let cavity = primitives::make_box(
            [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]],
            [(lo[0] + hi[0]) / 2.0, (lo[1] + hi[1]) / 2.0, lo[2]],
        );
        let current = self.get_solid(solid)?.clone();
        let hollowed = Self::subtract(&current, &cavity).ok_or(KernelError::ShellFailed {
            reason: "cavity subtraction returned no solid".to_string(),
        })?;
        Ok(self.store_solid(hollowed))
    }

    fn prism(
        &mut self,
        solid: &KernelSolidHandle,
        plane: &Plane,
        profiles: &[Profile2],
        depth: f64,
        taper_deg: f64,
        mode: BooleanMode,
    ) -> Result<KernelSolidHandle, KernelError> {
        if depth == 0.0 {
            return Err(KernelError::Other {
                message: "prism depth must be non-zero".to_string(),
            });
        }

        let mut current = self.get_solid(solid)?.clone();
        for profile in profiles {
            let tool = if taper_deg == 0.0 {
                primitives::prism_solid(plane, profile, depth)?
            } else {
                primitives::tapered_prism_solid(plane, profile, depth, taper_deg)?
            };
            let combined = match mode {
                BooleanMode::Fuse => truck_shapeops::or(&current, &tool, SHAPEOPS_TOL),
                BooleanMode::Cut => Self::subtract(&current, &tool),
            };
            current = combined.ok_or_else(|| KernelError::BooleanFailed {
                reason: format!("{mode:?} of prism profile {profile:?} returned no solid"),
            })?;
        }
        Ok(self.store_solid(current))
    }

    fn fillet_edges(
        &mut self,
        _solid: &KernelSolidHandle,
        _edges: &[KernelId],
        _radius: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        Err(KernelError::NotSupported {
            operation: "fillet".to_string(),
        })
    }

    fn chamfer_edges(
        &mut self,
        _solid: &KernelSolidHandle,
        _edges: &[KernelId],
        _distance: f64,
        _distance2: Option<f64>,
    ) -> Result<KernelSolidHandle, KernelError> {
        Err(KernelError::NotSupported {
            operation: "chamfer".to_string(),
        })
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self.get_solid(solid)?.clone();
        tessellation::tessellate_solid(&truck_solid, tolerance, &mut self.next_id)
    }
}

impl KernelIntrospect for TruckKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Ok(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        (0..Self::faces(truck_solid).len() as u64)
            .map(|i| KernelId(solid.id() * ID_STRIDE + i))
            .collect()
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Ok(truck_solid) = self.get_solid(solid) else {
            return Vec::new();
        };
        (0..Self::ordered_edges(truck_solid).len() as u64)
            .map(|i| KernelId(solid.id() * ID_STRIDE + EDGE_BASE + i))
            .collect()
    }

    fn compute_signature(&self, entity: KernelId, kind: TopoKind) -> TopoSignature {
        let handle = KernelSolidHandle(entity.0 / ID_STRIDE);
        let local = entity.0 % ID_STRIDE;
        let Ok(truck_solid) = self.get_solid(&handle) else {
            return TopoSignature::empty();
        };

        match kind {
            TopoKind::Face => Self::faces(truck_solid)
                .get(local as usize)
                .map(face_signature)
                .unwrap_or_else(TopoSignature::empty),
            TopoKind::Edge => Self::ordered_edges(truck_solid)
                .get((local - EDGE_BASE) as usize)
                .map(edge_signature)
                .unwrap_or_else(TopoSignature::empty),
            _ => TopoSignature::empty(),
        }
    }

    fn compute_all_signatures(
        &self,
        solid: &KernelSolidHandle,
        kind: TopoKind,
    ) -> Vec<(KernelId, TopoSignature)> {
        let ids = match kind {
            TopoKind::Face => self.list_faces(solid),
            TopoKind::Edge => self.list_edges(solid),
            _ => Vec::new(),
        };
        ids.into_iter()
            .map(|id| (id, self.compute_signature(id, kind)))
            .collect()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]> {
        let truck_solid = self.get_solid(solid).ok()?;
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        let mut any = false;
        for shell in truck_solid.boundaries().iter() {
            for v in shell.vertex_iter() {
                let p = v.point();
                for i in 0..3 {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
                any = true;
            }
        }
        any.then_some([min[0], min[1], min[2], max[0], max[1], max[2]])
    }
}

/// Face signature from boundary vertices: centroid by averaging, normal and
/// area by Newell's method on the outer boundary.
fn face_signature(face: &truck_modeling::topology::Face) -> TopoSignature {
    let mut points = Vec::new();
    for wire in face.boundaries().iter() {
        for v in wire.vertex_iter() {
            points.push(v.point());
        }
    }
    if points.is_empty() {
        return TopoSignature::empty();
    }

    let n = points.len() as f64;
    let centroid = [
        points.iter().map(|p| p[0]).sum::<f64>() / n,
        points.iter().map(|p| p[1]).sum::<f64>() / n,
        points.iter().map(|p| p[2]).sum::<f64>() / n,
    ];

    let mut normal = [0.0f64; 3];
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        normal[0] += (p[1] - q[1]) * (p[2] + q[2]);
        normal[1] += (p[2] - q[2]) * (p[0] + q[0]);
        normal[2] += (p[0] - q[0]) * (p[1] + q[1]);
    }
    let mag = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
    let area = mag / 2.0;
    let normal = if mag > 1e-12 {
        let sign = if face.orientation() { 1.0 } else { -1.0 };
        Some([
            sign * normal[0] / mag,
            sign * normal[1] / mag,
            sign * normal[2] / mag,
        ])
    } else {
        None
    };

    let mut bbox_min = [f64::MAX; 3];
    let mut bbox_max = [f64::MIN; 3];
    for p in &points {
        for i in 0..3 {
            bbox_min[i] = bbox_min[i].min(p[i]);
            bbox_max[i] = bbox_max[i].max(p[i]);
        }
    }

    let surface_type = match face.oriented_surface() {
        Surface::Plane(_) => "planar",
        _ => "other",
    };

    TopoSignature {
        surface_type: Some(surface_type.to_string()),
        area: Some(area),
        centroid: Some(centroid),
        normal,
        direction: None,
        bbox: Some([
            bbox_min[0], bbox_min[1], bbox_min[2], bbox_max[0], bbox_max[1], bbox_max[2],
        ]),
        length: None,
    }
}

/// Edge signature from its two endpoints; curved edges still report the
/// chord direction, which is enough for the axis-parallel filters used here.
fn edge_signature(edge: &truck_modeling::topology::Edge) -> TopoSignature {
    let p0 = edge.front().point();
    let p1 = edge.back().point();
    let d = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
    let length = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    let direction = if length > 1e-12 {
        Some([d[0] / length, d[1] / length, d[2] / length])
    } else {
        None
    };

    TopoSignature {
        surface_type: None,
        area: None,
        centroid: Some([
            (p0[0] + p1[0]) / 2.0,
            (p0[1] + p1[1]) / 2.0,
            (p0[2] + p1[2]) / 2.0,
        ]),
        normal: None,
        direction,
        bbox: Some([
            p0[0].min(p1[0]),
            p0[1].min(p1[1]),
            p0[2].min(p1[2]),
            p0[0].max(p1[0]),
            p0[1].max(p1[1]),
            p0[2].max(p1[2]),
        ]),
        length: Some(length),
    }
}
