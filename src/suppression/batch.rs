use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::Detection;
use crate::annotations::prediction::Prediction;
use crate::suppression::error::NmsError;
use crate::suppression::nms::MultiClassNms;
use ndarray::{ArrayView3, Axis};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Per-anchor predictions for a batch of images.
///
/// Images in a batch never interact; the batch exists so a caller can hand over one
/// model output and get one result set back. Shape problems are caught when the
/// batch is built, so a suppressor only ever sees well-formed input.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionBatch {
    images: Vec<Vec<Prediction>>,
}

impl DetectionBatch {
    /// Builds a batch from already-assembled prediction lists, one per image.
    pub fn from_predictions(images: Vec<Vec<Prediction>>) -> Self {
        DetectionBatch { images }
    }

    /// Builds a batch from the dense tensors a detection model emits: boxes shaped
    /// `[batch, anchors, 4]` and scores shaped `[batch, anchors, classes]`.
    ///
    /// The two tensors must agree on batch size and anchor count, and boxes must
    /// have exactly four coordinates; any disagreement is a shape error rather than
    /// a truncation.
    pub fn from_tensors(
        boxes: ArrayView3<'_, f32>,
        scores: ArrayView3<'_, f32>,
    ) -> Result<Self, NmsError> {
        let (box_batch, box_anchors, coords) = boxes.dim();
        let (score_batch, score_anchors, _classes) = scores.dim();
        if coords != 4 {
            return Err(NmsError::ShapeMismatch {
                context: "coordinate count per box".to_string(),
                expected: 4,
                actual: coords,
            });
        }
        if box_batch != score_batch {
            return Err(NmsError::ShapeMismatch {
                context: "batch size of the score tensor".to_string(),
                expected: box_batch,
                actual: score_batch,
            });
        }
        if box_anchors != score_anchors {
            return Err(NmsError::ShapeMismatch {
                context: "anchor count of the score tensor".to_string(),
                expected: box_anchors,
                actual: score_anchors,
            });
        }
        let images = boxes
            .axis_iter(Axis(0))
            .zip(scores.axis_iter(Axis(0)))
            .map(|(image_boxes, image_scores)| {
                image_boxes
                    .axis_iter(Axis(0))
                    .zip(image_scores.axis_iter(Axis(0)))
                    .map(|(box_row, score_row)| {
                        let coords = [box_row[0], box_row[1], box_row[2], box_row[3]];
                        Prediction::new(BoundingBox::new(coords), score_row.to_vec())
                    })
                    .collect()
            })
            .collect();
        Ok(DetectionBatch { images })
    }

    pub fn images(&self) -> &[Vec<Prediction>] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl MultiClassNms {
    /// Runs suppression over every image in a batch.
    ///
    /// Results come back in input order, one list per image. With the `parallel`
    /// feature the images fan out across a thread pool; each image's pass is
    /// independent and returns its own list, so the output is identical at any
    /// degree of parallelism.
    pub fn suppress_batch(
        &self,
        batch: &DetectionBatch,
    ) -> Result<Vec<Vec<Detection>>, NmsError> {
        debug!(images = batch.len(), "running suppression over batch");
        #[cfg(feature = "parallel")]
        {
            batch
                .images()
                .par_iter()
                .map(|image| self.suppress(image))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            batch
                .images()
                .iter()
                .map(|image| self.suppress(image))
                .collect()
        }
    }
}
