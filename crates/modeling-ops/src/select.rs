//! Declarative face/edge selection over kernel signatures.
//!
//! Filters are geometric properties of the entities themselves, so a query
//! resolves the same way regardless of the operation order that produced the
//! topology. `AtExtreme` is evaluated against the surviving candidate set,
//! which makes filter order significant within a single query (narrow first,
//! then take the extreme).

use kernel_bridge::{KernelId, KernelIntrospect, KernelSolidHandle, TopoKind, TopoSignature};

use holder_types::{Extreme, Filter, TieBreak};
use kernel_bridge::Plane;

use crate::types::OpError;

/// All faces of `solid` matching every filter, in kernel order.
pub fn select_faces(
    intro: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    filters: &[Filter],
) -> Vec<KernelId> {
    apply_filters(intro.compute_all_signatures(solid, TopoKind::Face), filters)
}

/// All edges of `solid` matching every filter, in kernel order.
pub fn select_edges(
    intro: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    filters: &[Filter],
) -> Vec<KernelId> {
    apply_filters(intro.compute_all_signatures(solid, TopoKind::Edge), filters)
}

/// Exactly one face matching the query, with an optional tie-break.
pub fn select_one_face(
    intro: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    filters: &[Filter],
    tie_break: Option<TieBreak>,
) -> Result<KernelId, OpError> {
    let candidates: Vec<(KernelId, TopoSignature)> = intro
        .compute_all_signatures(solid, TopoKind::Face)
        .into_iter()
        .collect();
    let matched = apply_filters_sig(candidates, filters);

    match (matched.len(), tie_break) {
        (0, _) => Err(OpError::EmptySelection {
            query: format!("{filters:?}"),
        }),
        (1, _) => Ok(matched[0].0),
        (_, Some(tb)) => Ok(break_tie(matched, &tb)),
        (n, None) => Err(OpError::AmbiguousSelection {
            query: format!("{filters:?}"),
            count: n,
        }),
    }
}

/// Working plane anchored on a face: origin at the face centroid, normal
/// from the face, with the caller's choice of in-plane x axis.
pub fn face_plane(
    intro: &dyn KernelIntrospect,
    face: KernelId,
    x_axis: [f64; 3],
) -> Result<Plane, OpError> {
    let sig = intro.compute_signature(face, TopoKind::Face);
    let centroid = sig.centroid.ok_or(OpError::InvalidParameter {
        reason: format!("face {face:?} has no centroid"),
    })?;
    let normal = sig.normal.ok_or(OpError::InvalidParameter {
        reason: format!("face {face:?} is not planar"),
    })?;
    Ok(Plane::new(centroid, normal, x_axis))
}

fn apply_filters(
    candidates: Vec<(KernelId, TopoSignature)>,
    filters: &[Filter],
) -> Vec<KernelId> {
    apply_filters_sig(candidates, filters)
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}

fn apply_filters_sig(
    mut candidates: Vec<(KernelId, TopoSignature)>,
    filters: &[Filter],
) -> Vec<(KernelId, TopoSignature)> {
    for filter in filters {
        candidates = match filter {
            Filter::AtExtreme {
                axis,
                end,
                tolerance,
            } => {
                let i = axis.index();
                let coords: Vec<f64> = candidates
                    .iter()
                    .filter_map(|(_, s)| s.centroid.map(|c| c[i]))
                    .collect();
                let Some(extreme) = (match end {
                    Extreme::Min => coords.iter().cloned().reduce(f64::min),
                    Extreme::Max => coords.iter().cloned().reduce(f64::max),
                }) else {
                    return Vec::new();
                };
                candidates
                    .into_iter()
                    .filter(|(_, s)| {
                        s.centroid
                            .is_some_and(|c| (c[i] - extreme).abs() <= *tolerance)
                    })
                    .collect()
            }
            _ => candidates
                .into_iter()
                .filter(|(_, s)| matches_simple(s, filter))
                .collect(),
        };
    }
    candidates
}

fn matches_simple(sig: &TopoSignature, filter: &Filter) -> bool {
    match filter {
        Filter::SurfaceType { surface_type } => {
            sig.surface_type.as_deref() == Some(surface_type.as_str())
        }
        Filter::NormalDirection {
            direction,
            tolerance,
        } => sig.normal.is_some_and(|n| {
            let dot = n[0] * direction[0] + n[1] * direction[1] + n[2] * direction[2];
            let mag = (direction[0].powi(2) + direction[1].powi(2) + direction[2].powi(2)).sqrt();
            mag > 1e-12 && (dot / mag) >= tolerance.cos()
        }),
        Filter::ParallelTo { axis } => sig.direction.is_some_and(|d| {
            let a = axis.unit();
            (d[0] * a[0] + d[1] * a[1] + d[2] * a[2]).abs() >= 1.0 - 1e-6
        }),
        Filter::CentroidRange { axis, min, max } => sig
            .centroid
            .is_some_and(|c| (*min..=*max).contains(&c[axis.index()])),
        Filter::NearPoint { point, distance } => sig.centroid.is_some_and(|c| {
            let d2 = (c[0] - point[0]).powi(2) + (c[1] - point[1]).powi(2)
                + (c[2] - point[2]).powi(2);
            d2 <= distance * distance
        }),
        Filter::AreaRange { min, max } => sig.area.is_some_and(|a| (*min..=*max).contains(&a)),
        Filter::AtExtreme { .. } => true,
    }
}

fn break_tie(
    matched: Vec<(KernelId, TopoSignature)>,
    tie_break: &TieBreak,
) -> KernelId {
    match tie_break {
        TieBreak::LargestArea => matched
            .into_iter()
            .max_by(|a, b| {
                let aa = a.1.area.unwrap_or(0.0);
                let ab = b.1.area.unwrap_or(0.0);
                aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, _)| id)
            .unwrap_or(KernelId(0)),
        TieBreak::NearestTo { point } => matched
            .into_iter()
            .min_by(|a, b| {
                let da = dist2(a.1.centroid, *point);
                let db = dist2(b.1.centroid, *point);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, _)| id)
            .unwrap_or(KernelId(0)),
    }
}

fn dist2(centroid: Option<[f64; 3]>, point: [f64; 3]) -> f64 {
    centroid.map_or(f64::MAX, |c| {
        (c[0] - point[0]).powi(2) + (c[1] - point[1]).powi(2) + (c[2] - point[2]).powi(2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use holder_types::Axis;
    use kernel_bridge::{Kernel, MockKernel};

    fn boxed() -> (MockKernel, KernelSolidHandle) {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 20.0, 30.0], [0.0, 0.0, 0.0]).unwrap();
        (k, h)
    }

    #[test]
    fn top_face_by_normal() {
        let (k, h) = boxed();
        let id = select_one_face(
            &k,
            &h,
            &[Filter::NormalDirection {
                direction: [0.0, 0.0, 1.0],
                tolerance: 0.01,
            }],
            None,
        )
        .unwrap();
        let sig = k.compute_signature(id, TopoKind::Face);
        assert_eq!(sig.centroid, Some([0.0, 0.0, 30.0]));
    }

    #[test]
    fn extreme_filter_narrows_candidates() {
        let (k, h) = boxed();
        let faces = select_faces(
            &k,
            &h,
            &[Filter::AtExtreme {
                axis: Axis::Z,
                end: Extreme::Min,
                tolerance: 1e-6,
            }],
        );
        assert_eq!(faces.len(), 1);
        let sig = k.compute_signature(faces[0], TopoKind::Face);
        assert_eq!(sig.normal, Some([0.0, 0.0, -1.0]));
    }

    #[test]
    fn vertical_edges_by_direction() {
        let (k, h) = boxed();
        let edges = select_edges(&k, &h, &[Filter::ParallelTo { axis: Axis::Z }]);
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn empty_selection_is_an_error_for_single_select() {
        let (k, h) = boxed();
        let err = select_one_face(
            &k,
            &h,
            &[Filter::SurfaceType {
                surface_type: "toroidal".to_string(),
            }],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, OpError::EmptySelection { .. }));
    }

    #[test]
    fn ambiguity_needs_tie_break() {
        let (k, h) = boxed();
        // All six faces are planar
        let filters = [Filter::SurfaceType {
            surface_type: "planar".to_string(),
        }];
        assert!(matches!(
            select_one_face(&k, &h, &filters, None),
            Err(OpError::AmbiguousSelection { count: 6, .. })
        ));
        let id = select_one_face(&k, &h, &filters, Some(TieBreak::LargestArea)).unwrap();
        let sig = k.compute_signature(id, TopoKind::Face);
        // 20x30 side faces are the largest
        assert_eq!(sig.area, Some(600.0));
    }
}
