use thiserror::Error;

/// A set of custom errors for more informative error handling.
///
/// Configuration problems surface once, at construction, before any batch is
/// touched. Shape problems surface per call and leave the component untouched, so
/// the next batch starts clean.
#[derive(Debug, Error)]
pub enum NmsError {
    #[error("Failed to configure suppression, {field} = {value}: {reason}.")]
    Configuration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("Failed to read input batch, {context}: expected {expected}, got {actual}.")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_the_field() {
        let error = NmsError::Configuration {
            field: "iou_threshold",
            value: "1.5".to_string(),
            reason: "must be within [0, 1]",
        };
        let message = error.to_string();
        assert!(message.contains("iou_threshold"));
        assert!(message.contains("1.5"));
    }

    #[test]
    fn shape_error_names_both_counts() {
        let error = NmsError::ShapeMismatch {
            context: "class score count for anchor 3".to_string(),
            expected: 80,
            actual: 79,
        };
        let message = error.to_string();
        assert!(message.contains("80"));
        assert!(message.contains("79"));
        assert!(message.contains("anchor 3"));
    }
}
