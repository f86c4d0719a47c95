use multiclass_nms::{
    BoundingBox, BoundingBoxFormat, DetectionBatch, MultiClassNms, NmsConfig, Prediction,
};
use std::error::Error;
use tracing::info;

/// A synthetic two-image batch: a cluster of duplicate boxes around one object, a
/// disjoint box of another class, and a low-confidence candidate that should be
/// filtered out.
fn synthetic_batch() -> DetectionBatch {
    let first_image = vec![
        Prediction::new(BoundingBox::new([100.0, 100.0, 200.0, 200.0]), vec![0.92, 0.03]),
        Prediction::new(BoundingBox::new([104.0, 98.0, 205.0, 203.0]), vec![0.87, 0.05]),
        Prediction::new(BoundingBox::new([98.0, 102.0, 198.0, 201.0]), vec![0.81, 0.02]),
        Prediction::new(BoundingBox::new([300.0, 120.0, 380.0, 240.0]), vec![0.04, 0.78]),
        Prediction::new(BoundingBox::new([40.0, 40.0, 90.0, 90.0]), vec![0.11, 0.09]),
    ];
    let second_image = vec![
        Prediction::new(BoundingBox::new([10.0, 10.0, 60.0, 60.0]), vec![0.66, 0.10]),
        Prediction::new(BoundingBox::new([12.0, 8.0, 61.0, 58.0]), vec![0.59, 0.12]),
    ];
    DetectionBatch::from_predictions(vec![first_image, second_image])
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = NmsConfig {
        bounding_box_format: BoundingBoxFormat::Xyxy,
        iou_threshold: 0.5,
        confidence_threshold: 0.25,
        from_logits: false,
        max_detections: 100,
        ..NmsConfig::default()
    };
    info!(?config, "building suppressor");
    let nms = MultiClassNms::new(config)?;

    let batch = synthetic_batch();
    let results = nms.suppress_batch(&batch)?;
    for (image_index, detections) in results.iter().enumerate() {
        info!(image = image_index, kept = detections.len(), "image suppressed");
        println!("image {}: {}", image_index, serde_json::to_string_pretty(detections)?);
    }
    Ok(())
}
