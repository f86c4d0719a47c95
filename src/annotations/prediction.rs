use crate::annotations::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

/// One anchor's raw output from a detection model.
///
/// A model scores every anchor against every class, so a prediction carries a full
/// score vector rather than a single class. The scores may already be confidences in
/// [0, 1] or they may be raw logits; the suppression config declares which, and
/// normalization happens inside the suppression pass, not here.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Prediction {
    pub bounding_box: BoundingBox,
    pub class_scores: Vec<f32>,
}

impl Prediction {
    pub fn new(bounding_box: BoundingBox, class_scores: Vec<f32>) -> Self {
        Prediction {
            bounding_box,
            class_scores,
        }
    }
}
