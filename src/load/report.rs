use serde::Serialize;
use tracing::info;

use crate::resolve::diagnostics::RunDiagnostics;

/// End-of-run summary.
///
/// When sequences are loaded the report lists every gene model that needs
/// manual follow-up; otherwise only the association count is of interest.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub load_seqs: bool,
    pub completed_at: String,
    #[serde(flatten)]
    pub diagnostics: RunDiagnostics,
}

impl RunReport {
    pub fn new(load_seqs: bool, diagnostics: RunDiagnostics) -> Self {
        Self {
            load_seqs,
            completed_at: chrono::Utc::now().to_rfc3339(),
            diagnostics,
        }
    }

    pub fn sequences(&self) -> usize {
        self.diagnostics.sequences
    }

    pub fn associations(&self) -> usize {
        self.diagnostics.associations
    }

    /// Emit the summary through `tracing`, one line per gene model that
    /// needs follow-up
    pub fn log(&self) {
        let d = &self.diagnostics;
        if self.load_seqs {
            info!(sequences = d.sequences, "Total Sequences Loaded: {}", d.sequences);
        }
        info!(
            associations = d.associations,
            "Total Associations written to assocload file: {}", d.associations
        );
        if d.skipped > 0 {
            info!(skipped = d.skipped, "Sequences skipped: {}", d.skipped);
        }
        if self.load_seqs {
            info!(
                "{} Gene Models not found In MGI",
                d.gene_models_not_in_store.len()
            );
            for (gene_model_id, count) in &d.gene_models_not_in_store {
                info!(gene_model = %gene_model_id, records = count, "Gene Model not found In MGI");
            }
            info!(
                "{} Gene Models In MGI but no Marker Association",
                d.gene_models_without_marker.len()
            );
            for message in &d.gene_models_without_marker {
                info!("{message}");
            }
        }
    }

    /// Plain-text rendering of the report
    pub fn to_text(&self) -> String {
        let d = &self.diagnostics;
        let associations = format!(
            "Total Associations written to assocload file: {}\n",
            d.associations
        );

        if !self.load_seqs {
            return associations;
        }

        let mut out = format!("Total Sequences Loaded: {}\n", d.sequences);
        out.push_str(&associations);
        out.push_str(&format!("Sequences skipped: {}\n", d.skipped));

        out.push_str(&format!(
            "\n{} Gene Models not found In MGI:\n",
            d.gene_models_not_in_store.len()
        ));
        for (gene_model_id, count) in &d.gene_models_not_in_store {
            out.push_str(&format!("{gene_model_id}\t{count}\n"));
        }

        out.push_str(&format!(
            "\n{} Gene Models In MGI but no Marker Association:\n",
            d.gene_models_without_marker.len()
        ));
        for message in &d.gene_models_without_marker {
            out.push_str(message);
            out.push('\n');
        }

        out
    }

    /// JSON rendering; without sequence loading only the association count
    /// and completion time are included
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        if self.load_seqs {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string_pretty(&serde_json::json!({
                "load_seqs": false,
                "completed_at": self.completed_at,
                "associations": self.diagnostics.associations,
            }))
        }
    }
}
