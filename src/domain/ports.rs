use crate::domain::model::{CallLog, ReportData};
use crate::utils::error::Result;
use std::path::PathBuf;

/// A batch pipeline: each stage consumes the prior stage's full output.
pub trait Pipeline {
    fn extract(&self) -> Result<CallLog>;
    fn transform(&self, log: CallLog) -> Result<ReportData>;
    fn load(&self, data: ReportData) -> Result<PathBuf>;
}
