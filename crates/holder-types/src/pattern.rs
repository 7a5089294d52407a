use serde::{Deserialize, Serialize};

/// A 2D profile placed on a working plane, in plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Profile2 {
    /// Axis-aligned rectangle centered at `center`.
    Rect { center: [f64; 2], size: [f64; 2] },
    /// Circle centered at `center`.
    Circle { center: [f64; 2], radius: f64 },
}

impl Profile2 {
    pub fn rect(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Profile2::Rect {
            center: [cx, cy],
            size: [w, h],
        }
    }

    pub fn square(cx: f64, cy: f64, side: f64) -> Self {
        Self::rect(cx, cy, side, side)
    }
}

/// Depth policy for a patterned cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CutDepth {
    /// Cut a fixed depth into the material.
    Blind { depth: f64 },
    /// Cut through the entire solid.
    ThroughAll,
}

/// A rectangular grid of identical square cells stamped onto a face.
///
/// Counts are `floor(span / pitch)` per axis; a zero count on either axis
/// yields an empty pattern, which callers must treat as a no-op cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPattern {
    pub pitch: f64,
    pub count_x: u32,
    pub count_y: u32,
    /// Side length of the square cell profile.
    pub cell: f64,
}

impl ArrayPattern {
    /// Fit a grid of `cell`-sized squares at `pitch` spacing into the given
    /// spans. Spans smaller than one pitch produce a zero count.
    pub fn fit(span_x: f64, span_y: f64, pitch: f64, cell: f64) -> Self {
        let count = |span: f64| {
            if pitch <= 0.0 || span <= 0.0 {
                0
            } else {
                (span / pitch).floor() as u32
            }
        };
        Self {
            pitch,
            count_x: count(span_x),
            count_y: count(span_y),
            cell,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count_x == 0 || self.count_y == 0
    }

    pub fn cell_count(&self) -> u32 {
        self.count_x * self.count_y
    }

    /// Cell profiles centered on `center`, in plane coordinates.
    pub fn cells(&self, center: [f64; 2]) -> Vec<Profile2> {
        let mut out = Vec::with_capacity(self.cell_count() as usize);
        let origin_x = center[0] - self.pitch * (self.count_x as f64 - 1.0) / 2.0;
        let origin_y = center[1] - self.pitch * (self.count_y as f64 - 1.0) / 2.0;
        for iy in 0..self.count_y {
            for ix in 0..self.count_x {
                out.push(Profile2::square(
                    origin_x + self.pitch * ix as f64,
                    origin_y + self.pitch * iy as f64,
                    self.cell,
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_floor() {
        let p = ArrayPattern::fit(47.0, 55.2, 3.0, 1.9);
        assert_eq!(p.count_x, 15);
        assert_eq!(p.count_y, 18);
        assert_eq!(p.cell_count(), 270);
    }

    #[test]
    fn span_below_pitch_is_empty() {
        let p = ArrayPattern::fit(2.0, 55.2, 3.0, 1.9);
        assert!(p.is_empty());
        assert!(p.cells([0.0, 0.0]).is_empty());
    }

    #[test]
    fn negative_span_is_empty() {
        let p = ArrayPattern::fit(-5.0, 10.0, 3.0, 1.9);
        assert!(p.is_empty());
    }

    #[test]
    fn cells_are_centered() {
        let p = ArrayPattern::fit(9.0, 3.0, 3.0, 1.5);
        assert_eq!((p.count_x, p.count_y), (3, 1));
        let cells = p.cells([0.0, 0.0]);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Profile2::square(-3.0, 0.0, 1.5));
        assert_eq!(cells[1], Profile2::square(0.0, 0.0, 1.5));
        assert_eq!(cells[2], Profile2::square(3.0, 0.0, 1.5));
    }
}
