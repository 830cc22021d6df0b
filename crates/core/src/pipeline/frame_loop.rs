use std::sync::atomic::{AtomicBool, Ordering};

use crate::detection::domain::detections::FaceDetection;
use crate::pipeline::frame_pipeline::FramePipeline;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::sensor::domain::depth_source::DepthSource;

/// Pulls frames from a source until the stream ends or shutdown is
/// requested, running each frame through the pipeline.
///
/// The shutdown flag is observed between frames only; a frame already
/// in flight runs to completion. Returns the number of frames
/// processed.
pub fn run_frames<F>(
    source: &mut dyn DepthSource,
    pipeline: &FramePipeline,
    shutdown: &AtomicBool,
    logger: &mut dyn PipelineLogger,
    mut on_frame: F,
) -> Result<usize, Box<dyn std::error::Error>>
where
    F: FnMut(usize, &[FaceDetection]),
{
    let mut frame_index = 0;
    while !shutdown.load(Ordering::Relaxed) {
        let Some(frame) = source.next_frame()? else {
            break;
        };
        let faces = pipeline.process_logged(&frame, logger)?;
        on_frame(frame_index, &faces);
        logger.frame_done(frame_index, faces.len());
        frame_index += 1;
    }
    logger.summary();
    Ok(frame_index)
}
