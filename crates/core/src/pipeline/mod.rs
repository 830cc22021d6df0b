pub mod config;
pub mod frame_loop;
pub mod frame_pipeline;
pub mod pipeline_logger;
