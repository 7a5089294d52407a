use serde::{Deserialize, Serialize};

/// The kind of topological entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TopoKind {
    Vertex,
    Edge,
    Face,
    Solid,
}

/// A world axis, used by declarative selection filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> [f64; 3] {
        let mut v = [0.0; 3];
        v[self.index()] = 1.0;
        v
    }
}

/// Which end of an axis an extreme-selection filter refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extreme {
    Min,
    Max,
}

/// Geometric signature of a topological entity, as reported by the kernel.
/// Selection filters evaluate against these, never against entity indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopoSignature {
    /// Surface type for faces (planar, cylindrical, ...).
    pub surface_type: Option<String>,
    /// Surface area, for faces.
    pub area: Option<f64>,
    /// Centroid position [x, y, z].
    pub centroid: Option<[f64; 3]>,
    /// Outward-pointing normal at the centroid, for planar faces.
    pub normal: Option<[f64; 3]>,
    /// Unit direction, for straight edges.
    pub direction: Option<[f64; 3]>,
    /// Axis-aligned bounding box [min_x, min_y, min_z, max_x, max_y, max_z].
    pub bbox: Option<[f64; 6]>,
    /// Curve length, for edges.
    pub length: Option<f64>,
}

impl TopoSignature {
    pub fn empty() -> Self {
        Self {
            surface_type: None,
            area: None,
            centroid: None,
            normal: None,
            direction: None,
            bbox: None,
            length: None,
        }
    }
}

/// Declarative filter predicate for selecting faces or edges.
///
/// These replace ordinal selectors ("the 2nd edge from the extreme"): every
/// predicate is a geometric property of the entity itself, so selection does
/// not depend on the call order that produced the topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Filter {
    /// Entity's surface type must match.
    SurfaceType { surface_type: String },
    /// Face normal must be within `tolerance` radians of `direction`.
    NormalDirection { direction: [f64; 3], tolerance: f64 },
    /// Edge direction must be parallel to `axis` (either orientation).
    ParallelTo { axis: Axis },
    /// Entity centroid coordinate along `axis` must be extremal among the
    /// candidate set, within `tolerance`.
    AtExtreme {
        axis: Axis,
        end: Extreme,
        tolerance: f64,
    },
    /// Entity centroid coordinate along `axis` must lie in [min, max].
    CentroidRange { axis: Axis, min: f64, max: f64 },
    /// Entity centroid must be within `distance` of `point`.
    NearPoint { point: [f64; 3], distance: f64 },
    /// Face area must be in [min, max].
    AreaRange { min: f64, max: f64 },
}

/// Tie-breaking strategy when a query expects one entity but several match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TieBreak {
    /// Pick the entity with the largest area.
    LargestArea,
    /// Pick the entity nearest to the given point.
    NearestTo { point: [f64; 3] },
}
