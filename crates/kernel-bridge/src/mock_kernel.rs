//! MockKernel — deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Produces synthetic topology with predictable entity counts and signatures,
//! and keeps a journal of every operation so tests can assert pipeline
//! ordering and parameters. Unlike the truck backend it implements shell,
//! fillet, chamfer and tapered extrusion.

use std::collections::HashMap;

use crate::traits::{cross, BooleanMode, Kernel, KernelIntrospect, Plane};
use crate::types::*;
use holder_types::Profile2;

/// One executed kernel operation, as seen by the journal.
#[derive(Debug, Clone, PartialEq)]
pub enum OpRecord {
    MakeBox {
        size: [f64; 3],
        base_center: [f64; 3],
    },
    Translate {
        offset: [f64; 3],
    },
    Shell {
        thickness: f64,
    },
    Prism {
        mode: BooleanMode,
        profile_count: usize,
        depth: f64,
        taper_deg: f64,
        normal: [f64; 3],
    },
    Fillet {
        edge_count: usize,
        radius: f64,
    },
    Chamfer {
        edge_count: usize,
        distance: f64,
        distance2: Option<f64>,
    },
    Tessellate,
}

#[derive(Debug, Clone)]
struct MockVertex {
    id: KernelId,
    position: [f64; 3],
}

#[derive(Debug, Clone)]
struct MockEdge {
    id: KernelId,
    p0: [f64; 3],
    p1: [f64; 3],
}

#[derive(Debug, Clone)]
struct MockFace {
    id: KernelId,
    normal: Option<[f64; 3]>,
    centroid: [f64; 3],
    area: f64,
    surface_type: String,
}

#[derive(Debug, Clone, Default)]
struct MockSolid {
    vertices: Vec<MockVertex>,
    edges: Vec<MockEdge>,
    faces: Vec<MockFace>,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    journal: Vec<OpRecord>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// Every operation executed so far, in order.
    pub fn journal(&self) -> &[OpRecord] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn store(&mut self, solid: MockSolid) -> KernelSolidHandle {
        let handle = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn get(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }

    /// Clone a solid into a fresh result solid with fresh entity ids, so a
    /// superseded handle's entities stay distinct from the new solid's.
    fn adopt(&mut self, source: &MockSolid) -> MockSolid {
        let mut out = MockSolid::default();
        for v in &source.vertices {
            let id = self.alloc_id();
            out.vertices.push(MockVertex {
                id,
                position: v.position,
            });
        }
        for e in &source.edges {
            let id = self.alloc_id();
            out.edges.push(MockEdge {
                id,
                p0: e.p0,
                p1: e.p1,
            });
        }
        for f in &source.faces {
            let id = self.alloc_id();
            out.faces.push(MockFace {
                id,
                normal: f.normal,
                centroid: f.centroid,
                area: f.area,
                surface_type: f.surface_type.clone(),
            });
        }
        out
    }

    /// 8 vertices, 12 edges, 6 faces at known positions.
    fn box_solid(&mut self, size: [f64; 3], base_center: [f64; 3]) -> MockSolid {
        let [w, h, d] = size;
        let [cx, cy, z0] = base_center;
        let (x0, x1) = (cx - w / 2.0, cx + w / 2.0);
        let (y0, y1) = (cy - h / 2.0, cy + h / 2.0);
        let z1 = z0 + d;

        let positions = [
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ];
        let vertices: Vec<MockVertex> = positions
            .iter()
            .map(|&position| MockVertex {
                id: self.alloc_id(),
                position,
            })
            .collect();

        let edge_pairs = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let edges: Vec<MockEdge> = edge_pairs
            .iter()
            .map(|&(a, b)| MockEdge {
                id: self.alloc_id(),
                p0: positions[a],
                p1: positions[b],
            })
            .collect();

        let zc = (z0 + z1) / 2.0;
        let face_defs: [([f64; 3], [f64; 3], f64); 6] = [
            ([0.0, 0.0, -1.0], [cx, cy, z0], w * h),
            ([0.0, 0.0, 1.0], [cx, cy, z1], w * h),
            ([0.0, -1.0, 0.0], [cx, y0, zc], w * d),
            ([0.0, 1.0, 0.0], [cx, y1, zc], w * d),
            ([-1.0, 0.0, 0.0], [x0, cy, zc], h * d),
            ([1.0, 0.0, 0.0], [x1, cy, zc], h * d),
        ];
        let faces: Vec<MockFace> = face_defs
            .iter()
            .map(|&(normal, centroid, area)| MockFace {
                id: self.alloc_id(),
                normal: Some(normal),
                centroid,
                area,
                surface_type: "planar".to_string(),
            })
            .collect();

        MockSolid {
            vertices,
            edges,
            faces,
        }
    }

    fn solid_center(solid: &MockSolid) -> [f64; 3] {
        let n = solid.vertices.len().max(1) as f64;
        let mut c = [0.0; 3];
        for v in &solid.vertices {
            for i in 0..3 {
                c[i] += v.position[i] / n;
            }
        }
        c
    }

    fn profile_center_area(profile: &Profile2) -> ([f64; 2], f64) {
        match profile {
            Profile2::Rect { center, size } => (*center, size[0] * size[1]),
            Profile2::Circle { center, radius } => {
                (*center, std::f64::consts::PI * radius * radius)
            }
        }
    }

    /// Add the synthetic topology of one extruded profile.
    fn add_prism_topology(
        &mut self,
        out: &mut MockSolid,
        plane: &Plane,
        profile: &Profile2,
        depth: f64,
        mode: BooleanMode,
    ) {
        let (center, area) = Self::profile_center_area(profile);
        let y_axis = plane.y_axis();
        let base = plane.to_world(center[0], center[1]);
        let travel = [
            plane.normal[0] * depth,
            plane.normal[1] * depth,
            plane.normal[2] * depth,
        ];
        let end = [base[0] + travel[0], base[1] + travel[1], base[2] + travel[2]];
        let mid = [
            base[0] + travel[0] / 2.0,
            base[1] + travel[1] / 2.0,
            base[2] + travel[2] / 2.0,
        ];
        let sign = depth.signum();
        // For a fused boss the cap faces along the travel direction; for a
        // pocket the floor faces back against it.
        let end_normal = match mode {
            BooleanMode::Fuse => [
                plane.normal[0] * sign,
                plane.normal[1] * sign,
                plane.normal[2] * sign,
            ],
            BooleanMode::Cut => [
                -plane.normal[0] * sign,
                -plane.normal[1] * sign,
                -plane.normal[2] * sign,
            ],
        };

        match profile {
            Profile2::Rect { size, .. } => {
                let (hw, hh) = (size[0] / 2.0, size[1] / 2.0);
                // 8 vertices and 12 edges of the prism
                let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
                let mut base_pts = Vec::new();
                let mut end_pts = Vec::new();
                for (du, dv) in corners {
                    let p = plane.to_world(center[0] + du, center[1] + dv);
                    base_pts.push(p);
                    end_pts.push([p[0] + travel[0], p[1] + travel[1], p[2] + travel[2]]);
                }
                for p in base_pts.iter().chain(end_pts.iter()) {
                    let id = self.alloc_id();
                    out.vertices.push(MockVertex { id, position: *p });
                }
                for i in 0..4 {
                    let j = (i + 1) % 4;
                    for (p0, p1) in [
                        (base_pts[i], base_pts[j]),
                        (end_pts[i], end_pts[j]),
                        (base_pts[i], end_pts[i]),
                    ] {
                        let id = self.alloc_id();
                        out.edges.push(MockEdge { id, p0, p1 });
                    }
                }

                // 4 side faces
                let side_defs = [
                    (plane.x_axis, size[0], hw, [1.0, 0.0]),
                    (
                        [-plane.x_axis[0], -plane.x_axis[1], -plane.x_axis[2]],
                        size[0],
                        hw,
                        [-1.0, 0.0],
                    ),
                    (y_axis, size[1], hh, [0.0, 1.0]),
                    (
                        [-y_axis[0], -y_axis[1], -y_axis[2]],
                        size[1],
                        hh,
                        [0.0, -1.0],
                    ),
                ];
                for (outward, span, half, uv) in side_defs {
                    let offset_world = [
                        plane.x_axis[0] * uv[0] * half + y_axis[0] * uv[1] * half,
                        plane.x_axis[1] * uv[0] * half + y_axis[1] * uv[1] * half,
                        plane.x_axis[2] * uv[0] * half + y_axis[2] * uv[1] * half,
                    ];
                    let normal = match mode {
                        BooleanMode::Fuse => outward,
                        // Pocket walls face into the hole
                        BooleanMode::Cut => [-outward[0], -outward[1], -outward[2]],
                    };
                    let id = self.alloc_id();
                    out.faces.push(MockFace {
                        id,
                        normal: Some(normal),
                        centroid: [
                            mid[0] + offset_world[0],
                            mid[1] + offset_world[1],
                            mid[2] + offset_world[2],
                        ],
                        area: span * depth.abs(),
                        surface_type: "planar".to_string(),
                    });
                }
            }
            Profile2::Circle { radius, .. } => {
                for p in [base, end] {
                    let id = self.alloc_id();
                    out.vertices.push(MockVertex { id, position: p });
                }
                for (p0, p1) in [(base, base), (end, end)] {
                    let id = self.alloc_id();
                    out.edges.push(MockEdge { id, p0, p1 });
                }
                let id = self.alloc_id();
                out.faces.push(MockFace {
                    id,
                    normal: None,
                    centroid: mid,
                    area: 2.0 * std::f64::consts::PI * radius * depth.abs(),
                    surface_type: "cylindrical".to_string(),
                });
            }
        }

        // Cap (fuse) or floor (cut) face
        let id = self.alloc_id();
        out.faces.push(MockFace {
            id,
            normal: Some(end_normal),
            centroid: end,
            area,
            surface_type: "planar".to_string(),
        });
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
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
        let solid = self.box_solid(size, base_center);
        self.journal.push(OpRecord::MakeBox { size, base_center });
        Ok(self.store(solid))
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let source = self.get(solid)?.clone();
        let mut moved = self.adopt(&source);
        for v in &mut moved.vertices {
            for i in 0..3 {
                v.position[i] += offset[i];
            }
        }
        for e in &mut moved.edges {
            for i in 0..3 {
                e.p0[i] += offset[i];
                e.p1[i] += offset[i];
            }
        }
        for f in &mut moved.faces {
            for i in 0..3 {
                f.centroid[i] += offset[i];
            }
        }
        self.journal.push(OpRecord::Translate { offset });
        Ok(self.store(moved))
    }

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
        let source = self.get(solid)?.clone();
        let open = source
            .faces
            .iter()
            .position(|f| f.id == open_face)
            .ok_or(KernelError::EntityNotFound { id: open_face })?;

        let center = Self::solid_center(&source);
        let mut out = MockSolid::default();

        // Outer shell minus the opened face
        let mut kept = Vec::new();
        for (i, f) in source.faces.iter().enumerate() {
            if i != open {
                kept.push(f.clone());
            }
        }
        for v in &source.vertices {
            let id = self.alloc_id();
            out.vertices.push(MockVertex {
                id,
                position: v.position,
            });
        }
        for e in &source.edges {
            let id = self.alloc_id();
            out.edges.push(MockEdge {
                id,
                p0: e.p0,
                p1: e.p1,
            });
        }
        for f in &kept {
            let id = self.alloc_id();
            out.faces.push(MockFace { id, ..f.clone() });
        }

        // Inner offset copies: inverted normals, centroid moved inward
        let shrink = |p: [f64; 3]| {
            let mut q = p;
            for i in 0..3 {
                let d = center[i] - p[i];
                let len = d.abs().max(1e-9);
                q[i] = p[i] + d / len * thickness.min(len);
            }
            q
        };
        for v in &source.vertices {
            let id = self.alloc_id();
            out.vertices.push(MockVertex {
                id,
                position: shrink(v.position),
            });
        }
        for e in &source.edges {
            let id = self.alloc_id();
            out.edges.push(MockEdge {
                id,
                p0: shrink(e.p0),
                p1: shrink(e.p1),
            });
        }
        for f in &kept {
            let id = self.alloc_id();
            let normal = f.normal.map(|n| [-n[0], -n[1], -n[2]]);
            let centroid = f.normal.map_or(f.centroid, |n| {
                [
                    f.centroid[0] - n[0] * thickness,
                    f.centroid[1] - n[1] * thickness,
                    f.centroid[2] - n[2] * thickness,
                ]
            });
            out.faces.push(MockFace {
                id,
                normal,
                centroid,
                area: f.area,
                surface_type: f.surface_type.clone(),
            });
        }

        // Rim face where the opening was
        let open_face_def = &source.faces[open];
        let id = self.alloc_id();
        out.faces.push(MockFace {
            id,
            normal: open_face_def.normal,
            centroid: open_face_def.centroid,
            area: open_face_def.area * 0.2,
            surface_type: "planar".to_string(),
        });

        self.journal.push(OpRecord::Shell { thickness });
        Ok(self.store(out))
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
        let source = self.get(solid)?.clone();
        let mut out = self.adopt(&source);
        for profile in profiles {
            self.add_prism_topology(&mut out, plane, profile, depth, mode);
        }
        self.journal.push(OpRecord::Prism {
            mode,
            profile_count: profiles.len(),
            depth,
            taper_deg,
            normal: plane.normal,
        });
        Ok(self.store(out))
    }

    fn fillet_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        radius: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::FilletFailed {
                reason: format!("radius must be positive, got {radius}"),
            });
        }
        if edges.is_empty() {
            return Err(KernelError::FilletFailed {
                reason: "no edges given".to_string(),
            });
        }
        let source = self.get(solid)?.clone();
        let mut targets = Vec::new();
        for &eid in edges {
            let edge = source
                .edges
                .iter()
                .find(|e| e.id == eid)
                .ok_or(KernelError::EntityNotFound { id: eid })?;
            targets.push(edge.clone());
        }

        let mut out = MockSolid::default();
        for v in &source.vertices {
            let id = self.alloc_id();
            out.vertices.push(MockVertex {
                id,
                position: v.position,
            });
        }
        for e in &source.edges {
            if edges.contains(&e.id) {
                continue;
            }
            let id = self.alloc_id();
            out.edges.push(MockEdge {
                id,
                p0: e.p0,
                p1: e.p1,
            });
        }
        for f in &source.faces {
            let id = self.alloc_id();
            out.faces.push(MockFace { id, ..f.clone() });
        }
        // One cylindrical blend face per rounded edge
        for edge in &targets {
            let length = dist(edge.p0, edge.p1);
            let id = self.alloc_id();
            out.faces.push(MockFace {
                id,
                normal: None,
                centroid: [
                    (edge.p0[0] + edge.p1[0]) / 2.0,
                    (edge.p0[1] + edge.p1[1]) / 2.0,
                    (edge.p0[2] + edge.p1[2]) / 2.0,
                ],
                area: length * radius * std::f64::consts::FRAC_PI_2,
                surface_type: "cylindrical".to_string(),
            });
        }

        self.journal.push(OpRecord::Fillet {
            edge_count: edges.len(),
            radius,
        });
        Ok(self.store(out))
    }

    fn chamfer_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        distance: f64,
        distance2: Option<f64>,
    ) -> Result<KernelSolidHandle, KernelError> {
        if distance <= 0.0 || distance2.is_some_and(|d| d <= 0.0) {
            return Err(KernelError::ChamferFailed {
                reason: format!("distances must be positive, got {distance}, {distance2:?}"),
            });
        }
        if edges.is_empty() {
            return Err(KernelError::ChamferFailed {
                reason: "no edges given".to_string(),
            });
        }
        let source = self.get(solid)?.clone();
        let mut targets = Vec::new();
        for &eid in edges {
            let edge = source
                .edges
                .iter()
                .find(|e| e.id == eid)
                .ok_or(KernelError::EntityNotFound { id: eid })?;
            targets.push(edge.clone());
        }

        let mut out = MockSolid::default();
        for v in &source.vertices {
            let id = self.alloc_id();
            out.vertices.push(MockVertex {
                id,
                position: v.position,
            });
        }
        for e in &source.edges {
            if edges.contains(&e.id) {
                continue;
            }
            let id = self.alloc_id();
            out.edges.push(MockEdge {
                id,
                p0: e.p0,
                p1: e.p1,
            });
        }
        for f in &source.faces {
            let id = self.alloc_id();
            out.faces.push(MockFace { id, ..f.clone() });
        }
        // One bevel face per chamfered edge
        for edge in &targets {
            let length = dist(edge.p0, edge.p1);
            let width = (distance.powi(2) + distance2.unwrap_or(distance).powi(2)).sqrt();
            let id = self.alloc_id();
            out.faces.push(MockFace {
                id,
                normal: None,
                centroid: [
                    (edge.p0[0] + edge.p1[0]) / 2.0,
                    (edge.p0[1] + edge.p1[1]) / 2.0,
                    (edge.p0[2] + edge.p1[2]) / 2.0,
                ],
                area: length * width,
                surface_type: "planar".to_string(),
            });
        }

        self.journal.push(OpRecord::Chamfer {
            edge_count: edges.len(),
            distance,
            distance2,
        });
        Ok(self.store(out))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let source = self.get(solid)?.clone();
        self.journal.push(OpRecord::Tessellate);

        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        let mut face_ranges = Vec::new();

        // Each face becomes a centroid-anchored quad: deterministic counts,
        // plausible positions.
        for face in &source.faces {
            let start_index = indices.len() as u32;
            let base_vertex = (vertices.len() / 3) as u32;

            let n = face.normal.unwrap_or([0.0, 0.0, 1.0]);
            let (u, v) = tangent_vectors(n);
            let half = face.area.sqrt() / 2.0;
            let c = face.centroid;

            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = [
                    c[0] + (u[0] * su + v[0] * sv) * half,
                    c[1] + (u[1] * su + v[1] * sv) * half,
                    c[2] + (u[2] * su + v[2] * sv) * half,
                ];
                vertices.extend_from_slice(&[p[0] as f32, p[1] as f32, p[2] as f32]);
                normals.extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
            }
            indices.extend_from_slice(&[
                base_vertex,
                base_vertex + 1,
                base_vertex + 2,
                base_vertex,
                base_vertex + 2,
                base_vertex + 3,
            ]);

            face_ranges.push(FaceRange {
                face_id: face.id,
                start_index,
                end_index: indices.len() as u32,
            });
        }

        Ok(RenderMesh {
            vertices,
            normals,
            indices,
            face_ranges,
        })
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.get(solid)
            .map(|s| s.faces.iter().map(|f| f.id).collect())
            .unwrap_or_default()
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.get(solid)
            .map(|s| s.edges.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    fn compute_signature(&self, entity: KernelId, kind: TopoKind) -> TopoSignature {
        for solid in self.solids.values() {
            match kind {
                TopoKind::Face => {
                    if let Some(f) = solid.faces.iter().find(|f| f.id == entity) {
                        return face_signature(f);
                    }
                }
                TopoKind::Edge => {
                    if let Some(e) = solid.edges.iter().find(|e| e.id == entity) {
                        return edge_signature(e);
                    }
                }
                TopoKind::Vertex => {
                    if let Some(v) = solid.vertices.iter().find(|v| v.id == entity) {
                        return TopoSignature {
                            centroid: Some(v.position),
                            ..TopoSignature::empty()
                        };
                    }
                }
                TopoKind::Solid => {}
            }
        }
        TopoSignature::empty()
    }

    fn compute_all_signatures(
        &self,
        solid: &KernelSolidHandle,
        kind: TopoKind,
    ) -> Vec<(KernelId, TopoSignature)> {
        let Ok(s) = self.get(solid) else {
            return Vec::new();
        };
        match kind {
            TopoKind::Face => s
                .faces
                .iter()
                .map(|f| (f.id, face_signature(f)))
                .collect(),
            TopoKind::Edge => s
                .edges
                .iter()
                .map(|e| (e.id, edge_signature(e)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]> {
        let s = self.get(solid).ok()?;
        if s.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for v in &s.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }
        Some([min[0], min[1], min[2], max[0], max[1], max[2]])
    }
}

fn face_signature(f: &MockFace) -> TopoSignature {
    TopoSignature {
        surface_type: Some(f.surface_type.clone()),
        area: Some(f.area),
        centroid: Some(f.centroid),
        normal: f.normal,
        direction: None,
        bbox: None,
        length: None,
    }
}

fn edge_signature(e: &MockEdge) -> TopoSignature {
    let length = dist(e.p0, e.p1);
    let direction = if length > 1e-12 {
        Some([
            (e.p1[0] - e.p0[0]) / length,
            (e.p1[1] - e.p0[1]) / length,
            (e.p1[2] - e.p0[2]) / length,
        ])
    } else {
        None
    };
    TopoSignature {
        surface_type: None,
        area: None,
        centroid: Some([
            (e.p0[0] + e.p1[0]) / 2.0,
            (e.p0[1] + e.p1[1]) / 2.0,
            (e.p0[2] + e.p1[2]) / 2.0,
        ]),
        normal: None,
        direction,
        bbox: Some([
            e.p0[0].min(e.p1[0]),
            e.p0[1].min(e.p1[1]),
            e.p0[2].min(e.p1[2]),
            e.p0[0].max(e.p1[0]),
            e.p0[1].max(e.p1[1]),
            e.p0[2].max(e.p1[2]),
        ]),
        length: Some(length),
    }
}

fn dist(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// Two tangent vectors orthogonal to a normal.
fn tangent_vectors(n: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    let up = if n[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let u = cross(up, n);
    let len = (u[0] * u[0] + u[1] * u[1] + u[2] * u[2])
        .sqrt()
        .max(1e-12);
    let u = [u[0] / len, u[1] / len, u[2] / len];
    let v = cross(n, u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_expected_topology() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 20.0, 5.0], [0.0, 0.0, 0.0]).unwrap();
        assert_eq!(k.list_faces(&h).len(), 6);
        assert_eq!(k.list_edges(&h).len(), 12);
        assert_eq!(
            k.bounding_box(&h),
            Some([-5.0, -10.0, 0.0, 5.0, 10.0, 5.0])
        );
    }

    #[test]
    fn shell_opens_one_face() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let top = k
            .compute_all_signatures(&h, TopoKind::Face)
            .into_iter()
            .find(|(_, s)| s.normal == Some([0.0, 0.0, 1.0]))
            .map(|(id, _)| id)
            .unwrap();
        let shelled = k.shell_open(&h, top, 2.0).unwrap();
        // 5 outer + 5 inner + 1 rim
        assert_eq!(k.list_faces(&shelled).len(), 11);
        // Superseded handle keeps its own entities
        assert_eq!(k.list_faces(&h).len(), 6);
    }

    #[test]
    fn shell_rejects_unknown_face() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let err = k.shell_open(&h, KernelId(9999), 2.0).unwrap_err();
        assert!(matches!(err, KernelError::EntityNotFound { .. }));
    }

    #[test]
    fn prism_fuse_adds_cap_and_sides() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let plane = Plane::new([0.0, 0.0, 10.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let out = k
            .prism(
                &h,
                &plane,
                &[Profile2::square(0.0, 0.0, 2.0)],
                5.0,
                0.0,
                BooleanMode::Fuse,
            )
            .unwrap();
        // 6 original + 4 sides + 1 cap
        assert_eq!(k.list_faces(&out).len(), 11);
        assert_eq!(k.bounding_box(&out).unwrap()[5], 15.0);
        assert!(matches!(
            k.journal().last(),
            Some(OpRecord::Prism {
                mode: BooleanMode::Fuse,
                profile_count: 1,
                ..
            })
        ));
    }

    #[test]
    fn fillet_replaces_edges_with_blend_faces() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let edges: Vec<KernelId> = k.list_edges(&h).into_iter().take(4).collect();
        let out = k.fillet_edges(&h, &edges, 1.5).unwrap();
        assert_eq!(k.list_edges(&out).len(), 8);
        assert_eq!(k.list_faces(&out).len(), 10);
        let blend_count = k
            .compute_all_signatures(&out, TopoKind::Face)
            .iter()
            .filter(|(_, s)| s.surface_type.as_deref() == Some("cylindrical"))
            .count();
        assert_eq!(blend_count, 4);
    }

    #[test]
    fn fillet_rejects_empty_edge_set() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        assert!(matches!(
            k.fillet_edges(&h, &[], 1.0),
            Err(KernelError::FilletFailed { .. })
        ));
    }

    #[test]
    fn tessellate_emits_two_triangles_per_face() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let mesh = k.tessellate(&h, 0.01).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.face_ranges.len(), 6);
    }
}
