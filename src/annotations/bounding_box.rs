use serde::{Deserialize, Serialize};
use std::fmt;

/// The coordinate convention the boxes of a pipeline are declared in.
///
/// Detection models disagree on how a rectangle is written down: corner pairs, a
/// corner plus a size, or a center plus a size. Mixing conventions inside one
/// pipeline invocation silently corrupts every overlap computation, so the format is
/// declared once in the suppression config and applied to every box uniformly rather
/// than being carried per box.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingBoxFormat {
    /// Corner-based: `[left, top, right, bottom]`.
    Xyxy,
    /// Top-left corner plus size: `[left, top, width, height]`.
    Xywh,
    /// Center plus size: `[center_x, center_y, width, height]`.
    CenterXywh,
}

/// A struct representing a bounding box.
///
/// A bounding box is a rectangle around an object in an image. An ideal bounding box
/// is the smallest box that totally contains the object. Detection models propose
/// them densely, one candidate per anchor, and the four coordinates here are stored
/// exactly as the model emitted them; how they are interpreted is decided by the
/// [`BoundingBoxFormat`] the pipeline declared. Degenerate boxes (zero or negative
/// extent) are representable on purpose, since models do emit them and they must flow
/// through suppression without crashing anything.
///
/// This project uses the standard convention of the left side of the image being x=0
/// and the top of the image being y=0.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoundingBox {
    coords: [f32; 4],
}

impl BoundingBox {
    pub fn new(coords: [f32; 4]) -> Self {
        BoundingBox { coords }
    }

    pub fn coords(&self) -> [f32; 4] {
        self.coords
    }

    /// Resolves the raw coordinates into the canonical corner representation that
    /// every overlap computation runs on.
    pub fn to_corners(&self, format: BoundingBoxFormat) -> CornerBox {
        let [a, b, c, d] = self.coords;
        match format {
            BoundingBoxFormat::Xyxy => CornerBox {
                left: a,
                top: b,
                right: c,
                bottom: d,
            },
            BoundingBoxFormat::Xywh => CornerBox {
                left: a,
                top: b,
                right: a + c,
                bottom: b + d,
            },
            BoundingBoxFormat::CenterXywh => CornerBox {
                left: a - (c / 2.0),
                top: b - (d / 2.0),
                right: a + (c / 2.0),
                bottom: b + (d / 2.0),
            },
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.coords;
        write!(f, "BoundingBox {{ {}, {}, {}, {} }}", a, b, c, d)
    }
}

/// Canonical corner-based form of a box.
///
/// Suppression never compares raw coordinates directly; both sides of an overlap
/// check are first resolved to corners so the arithmetic is identical no matter what
/// convention the pipeline declared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl CornerBox {
    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Area of the box, clamped so a degenerate box reports zero rather than a
    /// negative number.
    pub fn area(&self) -> f32 {
        (self.right - self.left).max(0.0) * (self.bottom - self.top).max(0.0)
    }

    /// Intersection-over-union with another box, in [0, 1].
    ///
    /// Defined as 0 when the union is empty, which covers a pair of zero-area
    /// boxes sitting on the same spot.
    pub fn intersection_over_union(&self, other: &CornerBox) -> f32 {
        let overlap_width = (self.right.min(other.right) - self.left.max(other.left)).max(0.0);
        let overlap_height = (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0);
        let intersection = overlap_width * overlap_height;
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_identical_boxes() {
        let corners = BoundingBox::new([0.0, 0.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        assert_eq!(corners.intersection_over_union(&corners), 1.0);
    }

    #[test]
    fn iou_disjoint_boxes() {
        let a = BoundingBox::new([0.0, 0.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        let b = BoundingBox::new([20.0, 20.0, 30.0, 30.0]).to_corners(BoundingBoxFormat::Xyxy);
        assert_eq!(a.intersection_over_union(&b), 0.0);
    }

    #[test]
    fn iou_partial_overlap() {
        let a = BoundingBox::new([0.0, 0.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        let b = BoundingBox::new([1.0, 1.0, 11.0, 11.0]).to_corners(BoundingBoxFormat::Xyxy);
        // Intersection is 9x9 = 81, union is 100 + 100 - 81 = 119.
        assert!((a.intersection_over_union(&b) - 81.0 / 119.0).abs() < 1e-6);
    }

    #[test]
    fn iou_zero_area_box() {
        let degenerate = BoundingBox::new([5.0, 5.0, 5.0, 5.0]).to_corners(BoundingBoxFormat::Xyxy);
        let normal = BoundingBox::new([0.0, 0.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        assert_eq!(degenerate.intersection_over_union(&normal), 0.0);
        assert_eq!(normal.intersection_over_union(&degenerate), 0.0);
        assert_eq!(degenerate.intersection_over_union(&degenerate), 0.0);
    }

    #[test]
    fn iou_negative_extent_box() {
        let inverted = BoundingBox::new([10.0, 0.0, 5.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        let normal = BoundingBox::new([0.0, 0.0, 20.0, 20.0]).to_corners(BoundingBoxFormat::Xyxy);
        assert_eq!(inverted.area(), 0.0);
        assert_eq!(inverted.intersection_over_union(&normal), 0.0);
    }

    #[test]
    fn corners_from_xywh() {
        let corners = BoundingBox::new([2.0, 3.0, 10.0, 20.0]).to_corners(BoundingBoxFormat::Xywh);
        assert_eq!(
            (corners.left(), corners.top(), corners.right(), corners.bottom()),
            (2.0, 3.0, 12.0, 23.0)
        );
    }

    #[test]
    fn corners_from_center_xywh() {
        let corners =
            BoundingBox::new([5.0, 5.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::CenterXywh);
        assert_eq!(
            (corners.left(), corners.top(), corners.right(), corners.bottom()),
            (0.0, 0.0, 10.0, 10.0)
        );
    }

    #[test]
    fn iou_is_format_independent() {
        let as_corners =
            BoundingBox::new([0.0, 0.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::Xyxy);
        let as_center =
            BoundingBox::new([5.0, 5.0, 10.0, 10.0]).to_corners(BoundingBoxFormat::CenterXywh);
        let probe = BoundingBox::new([1.0, 1.0, 11.0, 11.0]).to_corners(BoundingBoxFormat::Xyxy);
        assert_eq!(
            as_corners.intersection_over_union(&probe),
            as_center.intersection_over_union(&probe)
        );
    }
}
