pub mod constants;
pub mod depth_frame;
pub mod error;
pub mod intrinsics;
pub mod point;
