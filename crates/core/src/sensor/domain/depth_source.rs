use crate::shared::depth_frame::DepthFrame;
use crate::shared::intrinsics::CameraIntrinsics;

/// Domain interface for a depth-frame producer.
///
/// Implementations wrap a physical sensor, a recording, or a synthetic
/// scene. `next_frame` may block until a frame is available.
pub trait DepthSource: Send {
    /// Camera intrinsics, fixed for the lifetime of the source.
    fn intrinsics(&self) -> CameraIntrinsics;

    /// Blocks until the next frame is available; `None` ends the stream.
    fn next_frame(&mut self) -> Result<Option<DepthFrame>, Box<dyn std::error::Error>>;
}
