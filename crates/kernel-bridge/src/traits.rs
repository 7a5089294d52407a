use crate::types::*;
use holder_types::Profile2;

/// A working plane anchoring 2D profiles in space.
///
/// Profiles are laid out in (x_axis, y_axis) plane coordinates where
/// `y_axis = normal x x_axis`. Extrusion depth is signed along `normal`,
/// matching the convention that a face's working plane extrudes outward for
/// positive depth and into the material for negative depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: [f64; 3],
    pub normal: [f64; 3],
    pub x_axis: [f64; 3],
}

impl Plane {
    pub fn new(origin: [f64; 3], normal: [f64; 3], x_axis: [f64; 3]) -> Self {
        Self {
            origin,
            normal,
            x_axis,
        }
    }

    pub fn y_axis(&self) -> [f64; 3] {
        cross(self.normal, self.x_axis)
    }

    /// The plane shifted along its own normal.
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            origin: [
                self.origin[0] + self.normal[0] * distance,
                self.origin[1] + self.normal[1] * distance,
                self.origin[2] + self.normal[2] * distance,
            ],
            ..*self
        }
    }

    /// Map plane coordinates (u, v) to a world point.
    pub fn to_world(&self, u: f64, v: f64) -> [f64; 3] {
        let y = self.y_axis();
        [
            self.origin[0] + self.x_axis[0] * u + y[0] * v,
            self.origin[1] + self.x_axis[1] * u + y[1] * v,
            self.origin[2] + self.x_axis[2] * u + y[2] * v,
        ]
    }
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Whether a prism operation adds or removes material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanMode {
    Fuse,
    Cut,
}

/// Core geometry kernel trait: an opaque provider of primitive operations.
///
/// Implemented by `TruckKernel` (wraps the real truck BREP stack) and
/// `MockKernel` (deterministic test double). All operations fully
/// materialize their result before returning; a solid handle passed in is
/// superseded by the returned one.
pub trait Kernel {
    /// Create a rectangular box of `size`, centered in X/Y on `base_center`
    /// with its bottom face at `base_center[2]`.
    fn make_box(
        &mut self,
        size: [f64; 3],
        base_center: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Rigid translation.
    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Hollow a solid by removing `open_face` and offsetting the remaining
    /// faces inward by `thickness`.
    fn shell_open(
        &mut self,
        solid: &KernelSolidHandle,
        open_face: KernelId,
        thickness: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Extrude `profiles` from `plane` by a signed `depth` along the plane
    /// normal, optionally tapered by `taper_deg`, and fuse into or cut from
    /// `solid`.
    fn prism(
        &mut self,
        solid: &KernelSolidHandle,
        plane: &Plane,
        profiles: &[Profile2],
        depth: f64,
        taper_deg: f64,
        mode: BooleanMode,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Round the given edges with a constant radius.
    fn fillet_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        radius: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Bevel the given edges. `distance2` gives an asymmetric chamfer;
    /// `None` means symmetric.
    fn chamfer_edges(
        &mut self,
        solid: &KernelSolidHandle,
        edges: &[KernelId],
        distance: f64,
        distance2: Option<f64>,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;
}

/// Read-only topology queries. Selection predicates evaluate against the
/// signatures reported here, never against entity ordering.
pub trait KernelIntrospect {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    fn compute_signature(&self, entity: KernelId, kind: TopoKind) -> TopoSignature;

    fn compute_all_signatures(
        &self,
        solid: &KernelSolidHandle,
        kind: TopoKind,
    ) -> Vec<(KernelId, TopoSignature)>;

    /// Axis-aligned bounding box of the whole solid, if known.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<[f64; 6]>;
}
