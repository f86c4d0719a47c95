use crate::annotations::bounding_box::CornerBox;
use crate::annotations::detection::Detection;
use crate::annotations::prediction::Prediction;
use crate::suppression::config::{CapScope, NmsConfig};
use crate::suppression::error::NmsError;
use crate::suppression::scores::sigmoid;
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::debug;

/// One (box, class) pair that passed the confidence filter.
///
/// Candidates carry the anchor they came from and the pre-resolved corner form of
/// their box, so the greedy pass never re-reads the raw coordinates and the original
/// prediction can be recovered once a candidate wins.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    anchor_index: usize,
    class_id: usize,
    confidence: f32,
    corners: CornerBox,
}

/// Deterministic candidate order: confidence descending, ties broken by anchor index
/// ascending, then class id ascending. NaN confidences never reach a candidate, so
/// the `partial_cmp` fallback is dead weight rather than a hidden tie.
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.anchor_index.cmp(&b.anchor_index))
        .then_with(|| a.class_id.cmp(&b.class_id))
}

/// Non maximum suppression over multi-class anchor predictions.
///
/// A detection model proposes boxes densely, so a single physical object usually
/// arrives as a cluster of overlapping candidates. The suppressor keeps the most
/// confident box of each cluster and discards the rest, independently per class
/// unless the config asks for one cross-class pool.
///
/// The instance is a pure function of its config: it holds no other state, and the
/// config cannot change after construction. Reconfiguring means building a new
/// instance.
pub struct MultiClassNms {
    config: NmsConfig,
}

impl MultiClassNms {
    /// Builds a suppressor, rejecting an invalid config before any batch can reach
    /// it.
    pub fn new(config: NmsConfig) -> Result<Self, NmsError> {
        config.validate()?;
        Ok(MultiClassNms { config })
    }

    pub fn config(&self) -> &NmsConfig {
        &self.config
    }

    /// Runs suppression over one image's predictions.
    ///
    /// Scores are normalized if the config says they are logits, filtered against
    /// the confidence threshold, grouped per class (or pooled when class agnostic),
    /// greedily suppressed, then merged and capped. Winning boxes keep the raw
    /// coordinates they arrived with.
    pub fn suppress(&self, predictions: &[Prediction]) -> Result<Vec<Detection>, NmsError> {
        let candidates = self.collect_candidates(predictions)?;
        debug!(
            anchors = predictions.len(),
            candidates = candidates.len(),
            "filtered suppression candidates"
        );
        let mut winners: Vec<Candidate> = if self.config.class_agnostic {
            self.suppress_pool(candidates)
        } else {
            candidates
                .into_iter()
                .map(|candidate| (candidate.class_id, candidate))
                .into_group_map()
                .into_values()
                .flat_map(|class_pool| self.suppress_pool(class_pool))
                .collect()
        };
        winners.sort_by(candidate_order);
        if self.config.cap_scope == CapScope::Global {
            winners.truncate(self.config.max_detections);
        }
        debug!(survivors = winners.len(), "suppression finished");
        Ok(winners
            .into_iter()
            .map(|candidate| Detection {
                bounding_box: predictions[candidate.anchor_index].bounding_box,
                class_id: candidate.class_id,
                confidence: candidate.confidence,
            })
            .collect())
    }

    /// Normalizes and thresholds every (anchor, class) score into a candidate list.
    ///
    /// Anchors must agree on how many classes they score; a ragged batch is a shape
    /// error, never a truncation.
    fn collect_candidates(&self, predictions: &[Prediction]) -> Result<Vec<Candidate>, NmsError> {
        let class_count = predictions.first().map_or(0, |p| p.class_scores.len());
        let mut candidates = Vec::new();
        for (anchor_index, prediction) in predictions.iter().enumerate() {
            if prediction.class_scores.len() != class_count {
                return Err(NmsError::ShapeMismatch {
                    context: format!("class score count for anchor {}", anchor_index),
                    expected: class_count,
                    actual: prediction.class_scores.len(),
                });
            }
            let corners = prediction
                .bounding_box
                .to_corners(self.config.bounding_box_format);
            for (class_id, &raw_score) in prediction.class_scores.iter().enumerate() {
                let confidence = if self.config.from_logits {
                    sigmoid(raw_score)
                } else {
                    raw_score
                };
                // A NaN score fails this comparison, so the sort below only ever
                // sees totally ordered confidences.
                if confidence >= self.config.confidence_threshold {
                    candidates.push(Candidate {
                        anchor_index,
                        class_id,
                        confidence,
                        corners,
                    });
                }
            }
        }
        Ok(candidates)
    }

    /// Greedy suppression over one pool of candidates (one class, or everything in
    /// class-agnostic mode).
    fn suppress_pool(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(candidate_order);
        let keep_limit = match self.config.cap_scope {
            CapScope::PerClass => self.config.max_detections,
            CapScope::Global => usize::MAX,
        };
        // At an IoU threshold of exactly 1.0 suppression is disabled outright, so
        // the pass-through diagnostic mode keeps identical boxes (IoU = 1.0) too
        // instead of depending on a float comparison.
        let suppression_enabled = self.config.iou_threshold < 1.0;
        let mut winners: Vec<Candidate> = Vec::new();
        let mut suppressed = vec![false; candidates.len()];
        for current_index in 0..candidates.len() {
            if suppressed[current_index] {
                continue;
            }
            if winners.len() == keep_limit {
                break;
            }
            let winner = candidates[current_index];
            winners.push(winner);
            if !suppression_enabled {
                continue;
            }
            for other_index in (current_index + 1)..candidates.len() {
                if suppressed[other_index] {
                    continue;
                }
                let iou = winner
                    .corners
                    .intersection_over_union(&candidates[other_index].corners);
                if iou >= self.config.iou_threshold {
                    suppressed[other_index] = true;
                }
            }
        }
        winners
    }
}
