use crate::annotations::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

/// A detection is what is produced as output from the suppression pass.
///
/// A detection is a bounding box combined with the single class it was kept for and a
/// confidence score: a probability value that encodes the model's belief that the
/// detection is true. The coordinates are exactly the ones the winning prediction
/// carried, in the pipeline's declared format, so feeding detections back through
/// another pass changes nothing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub class_id: usize,
    pub confidence: f32,
}
