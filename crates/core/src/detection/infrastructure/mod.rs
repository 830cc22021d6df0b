pub mod variance_classifier;
