//! Multi-class non-max suppression for object detection pipelines.
//!
//! A detection model scores boxes densely across an image, so every physical object
//! shows up as a cluster of overlapping candidates. This crate takes those raw
//! per-anchor predictions (box coordinates plus per-class scores, optionally
//! logits) and prunes them to a small, bounded set of final detections, one winner
//! per object per class. Model inference upstream and rendering downstream are both
//! out of scope; the crate is the pure transform between them.

pub mod annotations;
pub mod suppression;

pub use annotations::bounding_box::{BoundingBox, BoundingBoxFormat, CornerBox};
pub use annotations::detection::Detection;
pub use annotations::prediction::Prediction;
pub use suppression::batch::DetectionBatch;
pub use suppression::config::{CapScope, NmsConfig};
pub use suppression::error::NmsError;
pub use suppression::nms::MultiClassNms;
pub use suppression::scores::{sigmoid, softmax};
