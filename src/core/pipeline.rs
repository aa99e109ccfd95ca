use crate::config::CliConfig;
use crate::core::report::ReportWriter;
use crate::core::resolver::PbxRules;
use crate::core::{aggregate, filter, loader};
use crate::domain::model::{CallLog, CallRecord, DetailRow, ReportData};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::validation;
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::path::PathBuf;

pub struct ReportPipeline {
    config: CliConfig,
    rules: PbxRules,
    timezone: Tz,
}

impl ReportPipeline {
    pub fn new(config: CliConfig) -> Result<Self> {
        let rules = match &config.pbx_rules {
            Some(path) => PbxRules::from_file(path)?,
            None => PbxRules::default(),
        };
        let timezone = validation::validate_timezone("timezone", &config.timezone)?;
        Ok(Self {
            config,
            rules,
            timezone,
        })
    }

    fn interaction(&self, record: &CallRecord) -> String {
        if record.to == self.config.user {
            format!("call from {}", self.rules.display_name(&record.from))
        } else {
            format!("call to {}", record.to)
        }
    }
}

impl Pipeline for ReportPipeline {
    fn extract(&self) -> Result<CallLog> {
        loader::load_csv_files(&self.config.csv_files)
    }

    fn transform(&self, log: CallLog) -> Result<ReportData> {
        let filtered =
            filter::filter_records(log.records, &self.config.user, self.config.min_duration);
        let groups = aggregate::aggregate(&filtered, &self.config.user, &self.rules);

        let mut details: Vec<DetailRow> = filtered
            .into_iter()
            .map(|record| DetailRow {
                interaction: self.interaction(&record),
                record,
            })
            .collect();
        // Timestamp order for presentation; unparseable timestamps keep
        // their relative order at the end.
        details.sort_by(|a, b| match (a.record.timestamp, b.record.timestamp) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(ReportData {
            groups,
            details,
            headers: log.headers,
        })
    }

    fn load(&self, data: ReportData) -> Result<PathBuf> {
        let writer = ReportWriter::new(self.timezone);
        writer.write(&data, &self.config.output)?;
        Ok(self.config.output.clone())
    }
}
