// file: src/exporter/json.rs
// description: json export of lead summaries

use crate::error::{PipelineError, Result};
use crate::models::LeadSummary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            output_path: output_path.into(),
            pretty,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn render(&self, summaries: &[LeadSummary]) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(summaries)
        } else {
            serde_json::to_string(summaries)
        };
        rendered.map_err(|e| PipelineError::Serialization(e.to_string()))
    }

    /// Serialize everything first so a failure never leaves a partial report.
    pub fn write(&self, summaries: &[LeadSummary]) -> Result<()> {
        let json = self.render(summaries)?;

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.output_path, json).map_err(|source| PipelineError::FileOperation {
            path: self.output_path.clone(),
            source,
        })?;

        info!(
            "Wrote {} lead summaries to {}",
            summaries.len(),
            self.output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn summary() -> LeadSummary {
        LeadSummary {
            company_name: "Internal User (10.0.0.5)".to_string(),
            lead_score: 25,
            key_interests: BTreeSet::from(["Requested Demo".to_string()]),
            last_visit: Some("2024-12-16T09:00:00+00:00".to_string()),
            visit_count: 1,
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports/leads.json");
        let exporter = JsonExporter::new(&path, true);

        exporter.write(&[summary()]).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["companyName"], "Internal User (10.0.0.5)");
        assert_eq!(written[0]["keyInterests"][0], "Requested Demo");
        assert_eq!(written[0]["lastVisit"], "2024-12-16T09:00:00+00:00");
    }

    #[test]
    fn test_empty_report_is_empty_array() {
        let exporter = JsonExporter::new("unused.json", false);
        assert_eq!(exporter.render(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_compact_render_is_single_line() {
        let exporter = JsonExporter::new("unused.json", false);
        assert!(!exporter.render(&[summary()]).unwrap().contains('\n'));
    }
}
