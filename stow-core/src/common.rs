pub use serde::{Deserialize, Serialize};
pub use thiserror::Error;

pub use crate::{Container, Engine, Item};

/// Identifies an [`Item`] uniquely within one [`Engine`].
pub type ItemId = String;

/// Identifies a [`Container`] uniquely within one [`Engine`].
pub type ContainerId = String;

/// A coordinate along one axis, in whole centimeters.
pub type Cm = i64;

/// A point in a container's local frame: `(width, depth, height)`.
///
/// `depth` is the retrieval axis: 0 is the open face, larger values
/// are deeper inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord3 {
    pub width: Cm,
    pub depth: Cm,
    pub height: Cm,
}

impl Coord3 {
    pub fn new(width: Cm, depth: Cm, height: Cm) -> Self {
        Self { width, depth, height }
    }
}

/// A half-open axis-aligned box `[start, end)` in a container's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxRegion {
    pub start: Coord3,
    pub end: Coord3,
}

impl BoxRegion {
    pub fn new(start: Coord3, end: Coord3) -> Self {
        Self { start, end }
    }

    pub fn from_dims(anchor: Coord3, width: Cm, depth: Cm, height: Cm) -> Self {
        Self {
            start: anchor,
            end: Coord3::new(anchor.width + width, anchor.depth + depth, anchor.height + height),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> Cm {
        self.end.width - self.start.width
    }

    #[inline(always)]
    pub fn depth(&self) -> Cm {
        self.end.depth - self.start.depth
    }

    #[inline(always)]
    pub fn height(&self) -> Cm {
        self.end.height - self.start.height
    }

    #[inline(always)]
    pub fn volume(&self) -> Cm {
        self.width() * self.depth() * self.height()
    }

    /// Half-open interval overlap on one axis: `a_start < b_end && a_end > b_start`.
    #[inline(always)]
    fn axis_overlaps(a_start: Cm, a_end: Cm, b_start: Cm, b_end: Cm) -> bool {
        a_start < b_end && a_end > b_start
    }

    /// True iff the two half-open boxes intersect on all three axes.
    #[inline(always)]
    pub fn overlaps(&self, other: &BoxRegion) -> bool {
        Self::axis_overlaps(self.start.width, self.end.width, other.start.width, other.end.width)
            && Self::axis_overlaps(self.start.depth, self.end.depth, other.start.depth, other.end.depth)
            && Self::axis_overlaps(self.start.height, self.end.height, other.start.height, other.end.height)
    }

    /// True iff `self` lies entirely within `bounds` (a box anchored at the origin).
    #[inline(always)]
    pub fn fits_within(&self, width: Cm, depth: Cm, height: Cm) -> bool {
        self.start.width >= 0
            && self.start.depth >= 0
            && self.start.height >= 0
            && self.end.width <= width
            && self.end.depth <= depth
            && self.end.height <= height
    }
}

/// Every failure the core can report. Never constructed for an `Unplaceable`
/// outcome — that is an `Ok(None)`, not an error (see [`crate::placement`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StowError {
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("unknown container: {0}")]
    UnknownContainer(ContainerId),
    #[error("no space available for the requested placement")]
    NoSpace,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type StowResult<T> = Result<T, StowError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn region(sx: Cm, sy: Cm, sz: Cm, ex: Cm, ey: Cm, ez: Cm) -> BoxRegion {
        BoxRegion::new(Coord3::new(sx, sy, sz), Coord3::new(ex, ey, ez))
    }

    #[test]
    fn half_open_boxes_touching_at_a_face_do_not_overlap() {
        let a = region(0, 0, 0, 10, 10, 10);
        let b = region(10, 0, 0, 20, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlapping_boxes_are_detected_on_every_axis() {
        let a = region(0, 0, 0, 10, 10, 10);
        let b = region(5, 5, 5, 15, 15, 15);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn fits_within_rejects_negative_origin_and_out_of_bounds_end() {
        let inside = region(0, 0, 0, 10, 10, 10);
        assert!(inside.fits_within(10, 10, 10));

        let out_of_bounds = region(0, 0, 0, 11, 10, 10);
        assert!(!out_of_bounds.fits_within(10, 10, 10));
    }

    #[test]
    fn volume_matches_dimension_product() {
        let r = BoxRegion::from_dims(Coord3::new(1, 2, 3), 4, 5, 6);
        assert_eq!(r.volume(), 4 * 5 * 6);
    }
}
