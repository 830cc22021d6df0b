pub mod depth_source;
pub mod undistortion;
