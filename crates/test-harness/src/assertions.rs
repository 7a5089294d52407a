//! Queries over the MockKernel op journal for ordering assertions.

use kernel_bridge::{BooleanMode, OpRecord};

/// Index of the first op matching `pred`, or a panic naming the journal.
pub fn first_index(journal: &[OpRecord], pred: impl Fn(&OpRecord) -> bool) -> usize {
    journal
        .iter()
        .position(pred)
        .unwrap_or_else(|| panic!("no matching op in journal: {journal:?}"))
}

/// Index of the last op matching `pred`, or a panic naming the journal.
pub fn last_index(journal: &[OpRecord], pred: impl Fn(&OpRecord) -> bool) -> usize {
    journal
        .iter()
        .rposition(pred)
        .unwrap_or_else(|| panic!("no matching op in journal: {journal:?}"))
}

/// Number of ops matching `pred`.
pub fn count_ops(journal: &[OpRecord], pred: impl Fn(&OpRecord) -> bool) -> usize {
    journal.iter().filter(|op| pred(op)).count()
}

pub fn is_cut(op: &OpRecord) -> bool {
    matches!(
        op,
        OpRecord::Prism {
            mode: BooleanMode::Cut,
            ..
        }
    )
}

pub fn is_fuse(op: &OpRecord) -> bool {
    matches!(
        op,
        OpRecord::Prism {
            mode: BooleanMode::Fuse,
            ..
        }
    )
}

pub fn is_fillet(op: &OpRecord) -> bool {
    matches!(op, OpRecord::Fillet { .. })
}

pub fn is_chamfer(op: &OpRecord) -> bool {
    matches!(op, OpRecord::Chamfer { .. })
}

pub fn is_shell(op: &OpRecord) -> bool {
    matches!(op, OpRecord::Shell { .. })
}

/// Cell counts of every ventilation grid cut, in journal order.
///
/// Grid cuts are untapered multi-profile cut prisms; the bottom slab cut has
/// a single profile and the mark cuts are tapered, so neither matches.
pub fn grid_cut_counts(journal: &[OpRecord]) -> Vec<usize> {
    journal
        .iter()
        .filter_map(|op| match op {
            OpRecord::Prism {
                mode: BooleanMode::Cut,
                profile_count,
                taper_deg,
                ..
            } if *profile_count > 1 && *taper_deg == 0.0 => Some(*profile_count),
            _ => None,
        })
        .collect()
}
