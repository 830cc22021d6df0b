pub mod camera_model;
pub mod hole_fill;
pub mod orthographic;
pub mod rotation;
