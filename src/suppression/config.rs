//! Suppression configuration.

use crate::annotations::bounding_box::BoundingBoxFormat;
use crate::suppression::error::NmsError;
use serde::{Deserialize, Serialize};

/// Whether `max_detections` bounds each class separately or the whole image.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapScope {
    /// Each class may keep up to `max_detections` winners.
    PerClass,
    /// The merged result across all classes is truncated to `max_detections`.
    #[default]
    Global,
}

/// Main suppression configuration.
///
/// The config is supplied when a suppressor is constructed and is immutable for the
/// lifetime of that instance; reconfiguring means building a new instance. Every
/// field is checked by [`NmsConfig::validate`] before any batch is processed, so a
/// bad value fails loudly up front instead of corrupting a result later.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NmsConfig {
    /// Coordinate convention of every box entering and leaving the pipeline.
    pub bounding_box_format: BoundingBoxFormat,
    /// Overlap at or above which a lower-confidence box of the same class is
    /// suppressed. 1.0 disables suppression entirely.
    pub iou_threshold: f32,
    /// Minimum confidence a (box, class) pair needs to be considered at all.
    pub confidence_threshold: f32,
    /// Whether incoming scores are raw logits needing sigmoid normalization.
    pub from_logits: bool,
    /// Cap on winners, scoped by `cap_scope`.
    pub max_detections: usize,
    #[serde(default)]
    pub cap_scope: CapScope,
    /// Cross-class mode: one suppression pool ignoring class ids. Off by default;
    /// the per-class behavior is the documented standard.
    #[serde(default)]
    pub class_agnostic: bool,
}

impl NmsConfig {
    /// Checks every field before any batch is processed.
    pub fn validate(&self) -> Result<(), NmsError> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(NmsError::Configuration {
                field: "iou_threshold",
                value: self.iou_threshold.to_string(),
                reason: "must be within [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(NmsError::Configuration {
                field: "confidence_threshold",
                value: self.confidence_threshold.to_string(),
                reason: "must be within [0, 1]",
            });
        }
        if self.max_detections == 0 {
            return Err(NmsError::Configuration {
                field: "max_detections",
                value: self.max_detections.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            bounding_box_format: BoundingBoxFormat::Xyxy,
            iou_threshold: 0.5,
            confidence_threshold: 0.5,
            from_logits: false,
            max_detections: 100,
            cap_scope: CapScope::Global,
            class_agnostic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(NmsConfig::default().validate().is_ok());
    }

    #[test]
    fn iou_threshold_above_one_is_rejected() {
        let config = NmsConfig {
            iou_threshold: 1.5,
            ..NmsConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("iou_threshold"));
        assert!(message.contains("1.5"));
    }

    #[test]
    fn nan_iou_threshold_is_rejected() {
        let config = NmsConfig {
            iou_threshold: f32::NAN,
            ..NmsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_confidence_threshold_is_rejected() {
        let config = NmsConfig {
            confidence_threshold: -0.1,
            ..NmsConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("confidence_threshold"));
    }

    #[test]
    fn zero_max_detections_is_rejected() {
        let config = NmsConfig {
            max_detections: 0,
            ..NmsConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("max_detections"));
    }

    #[test]
    fn boundary_thresholds_are_accepted() {
        let config = NmsConfig {
            iou_threshold: 1.0,
            confidence_threshold: 0.0,
            ..NmsConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = NmsConfig {
            bounding_box_format: BoundingBoxFormat::CenterXywh,
            iou_threshold: 0.45,
            confidence_threshold: 0.25,
            from_logits: true,
            max_detections: 300,
            cap_scope: CapScope::PerClass,
            class_agnostic: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: NmsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let config: NmsConfig = serde_json::from_str(
            r#"{
                "bounding_box_format": "xyxy",
                "iou_threshold": 0.5,
                "confidence_threshold": 0.5,
                "from_logits": false,
                "max_detections": 100
            }"#,
        )
        .unwrap();
        assert_eq!(config.cap_scope, CapScope::Global);
        assert!(!config.class_agnostic);
    }

    #[test]
    fn unrecognized_format_name_fails_to_parse() {
        let result = serde_json::from_str::<NmsConfig>(
            r#"{
                "bounding_box_format": "corner",
                "iou_threshold": 0.5,
                "confidence_threshold": 0.5,
                "from_logits": false,
                "max_detections": 100
            }"#,
        );
        assert!(result.is_err());
    }
}
