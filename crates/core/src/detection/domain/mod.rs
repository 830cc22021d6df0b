pub mod cascade_detector;
pub mod classifier;
pub mod detection_merger;
pub mod detections;
pub mod integral;
