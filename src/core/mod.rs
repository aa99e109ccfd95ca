pub mod aggregate;
pub mod etl;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use crate::domain::model::{CallLog, CallRecord, Direction, PbxGroup, ReportData};
pub use crate::domain::ports::Pipeline;
pub use crate::utils::error::Result;
