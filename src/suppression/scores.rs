//! Normalization for raw model logits.
//!
//! Suppression compares confidences against a threshold in [0, 1], so logits have to
//! be mapped there first. Sigmoid is the default: it treats every class as an
//! independent yes/no question, which is what multi-label detection heads produce.
//! Softmax is provided for models whose classes are mutually exclusive.

/// Maps one logit to a confidence in (0, 1).
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Normalizes a slice of logits into a distribution that sums to 1.
///
/// The logits are shifted by their maximum before exponentiation so a large logit
/// cannot overflow to infinity.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max_logit.is_finite() {
        return vec![0.0; logits.len()];
    }
    let exponentials: Vec<f32> = logits.iter().map(|&l| (l - max_logit).exp()).collect();
    let total: f32 = exponentials.iter().sum();
    exponentials.iter().map(|&e| e / total).collect()
}
