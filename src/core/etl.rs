use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run extract, transform, load. Returns the output path, or `None` when
    /// there was nothing to report (in which case no file is written).
    pub fn run(&self) -> Result<Option<PathBuf>> {
        tracing::info!("Starting call log analysis...");

        let log = self.pipeline.extract()?;
        tracing::info!("Loaded {} record(s)", log.records.len());
        if log.records.is_empty() {
            tracing::warn!("No data loaded from CSV files.");
            return Ok(None);
        }

        let data = self.pipeline.transform(log)?;
        tracing::info!(
            "{} call(s) matched across {} PBX group(s)",
            data.details.len(),
            data.groups.len()
        );
        if data.details.is_empty() {
            tracing::info!("No calls matched the specified criteria.");
            return Ok(None);
        }

        let output = self.pipeline.load(data)?;
        tracing::info!("Analysis complete. Results saved to {}", output.display());
        Ok(Some(output))
    }
}
