pub mod pinhole_undistorter;
pub mod synthetic_source;
