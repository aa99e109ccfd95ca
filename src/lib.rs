pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::{etl::ReportEngine, pipeline::ReportPipeline, resolver::PbxRules};
pub use utils::error::{ReportError, Result};
