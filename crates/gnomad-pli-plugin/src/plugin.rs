//! Host integration surface.
//!
//! The host constructs a plugin once, asks which feature types it handles
//! and which output fields it declares, then calls [`AnnotationPlugin::run`]
//! once per transcript-variant and merges the returned fields into its own
//! record.

use std::path::Path;

use gnomad_pli_common::{PliConfig, Result};
use gnomad_pli_table::GeneConstraintTable;
use tracing::debug;

use crate::fields::{ConstraintAnnotation, OutputField, OUTPUT_FIELDS};
use crate::transcript::{resolve_gene_symbol, TranscriptVariant};

/// Feature classes a host dispatches to plugins; only transcripts carry a gene symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    Transcript,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Transcript => "Transcript",
        }
    }
}

/// Contract between the host and an annotation plugin.
pub trait AnnotationPlugin: Send + Sync {
    type Output;

    /// Feature types this plugin annotates.
    fn feature_types(&self) -> &'static [FeatureType];

    /// Output fields with their header descriptions, in output order.
    fn header_info(&self) -> &'static [OutputField];

    /// Annotate one transcript-variant. Never fails.
    fn run(&self, tva: &dyn TranscriptVariant) -> Self::Output;
}

/// gnomAD gene constraint plugin.
#[derive(Debug, Clone)]
pub struct GnomadPliPlugin {
    table: GeneConstraintTable,
}

impl GnomadPliPlugin {
    /// Construct the plugin, loading the values file.
    ///
    /// `values_file` is the optional positional plugin parameter; without it
    /// the file next to the installed binary is used.
    pub fn new(values_file: Option<&Path>) -> Result<Self> {
        let table = GeneConstraintTable::open(values_file)?;
        Ok(Self { table })
    }

    /// Construct from configuration. An explicit path wins over the config
    /// file and the GNOMAD_PLI_VALUES env var.
    pub fn with_config(config: &PliConfig, values_file: Option<&Path>) -> Result<Self> {
        let path = config.values_file_override(values_file);
        debug!("Resolved values file: {:?}", path);
        Self::new(path.as_deref())
    }

    pub fn table(&self) -> &GeneConstraintTable {
        &self.table
    }
}

impl AnnotationPlugin for GnomadPliPlugin {
    type Output = ConstraintAnnotation;

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Transcript]
    }

    fn header_info(&self) -> &'static [OutputField] {
        &OUTPUT_FIELDS
    }

    fn run(&self, tva: &dyn TranscriptVariant) -> ConstraintAnnotation {
        self.table.lookup(resolve_gene_symbol(tva)).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptRecord;
    use gnomad_pli_test_utils::sample_values_file;
    use pretty_assertions::assert_eq;

    fn plugin() -> GnomadPliPlugin {
        let file = sample_values_file();
        GnomadPliPlugin::new(Some(file.path())).unwrap()
    }

    #[test]
    fn test_declares_transcript_only() {
        assert_eq!(plugin().feature_types(), &[FeatureType::Transcript]);
        assert_eq!(FeatureType::Transcript.as_str(), "Transcript");
    }

    #[test]
    fn test_header_info_lists_ten_fields() {
        let plugin = plugin();
        let header = plugin.header_info();
        assert_eq!(header.len(), 10);
        assert_eq!(header[0].name, "gnomADpLI");
        assert_eq!(header[9].name, "gnomADoe_lof_upper");
        assert!(header.iter().all(|f| !f.description.is_empty()));
    }

    #[test]
    fn test_run_uses_gene_symbol() {
        let out = plugin().run(&TranscriptRecord::new("ENST00000269305").with_gene_symbol("tp53"));
        assert_eq!(out.pli, "1.00");
        assert_eq!(out.syn_z, "0.10");
        assert_eq!(out.lof_z, "4.06");
        assert_eq!(out.oe_lof_upper, "0.37");
    }

    #[test]
    fn test_run_falls_back_to_hgnc() {
        let out = plugin().run(&TranscriptRecord::new("ENST00000357654").with_gene_hgnc("BRCA1"));
        assert_eq!(out.pli, "0.00");
        assert_eq!(out.mis_z, "1.17");
    }

    #[test]
    fn test_run_without_symbol_is_empty() {
        let out = plugin().run(&TranscriptRecord::new("ENST00000000001"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_blanks_zero_scores() {
        let out = plugin().run(&TranscriptRecord::new("ENST00000646664").with_gene_symbol("ACTB"));
        assert_eq!(out.pli, "0.10");
        assert_eq!(out.oe_lof, "");
        assert_eq!(out.syn_z, "");
        assert_eq!(out.mis_z, "4.53");
    }

    #[test]
    fn test_config_values_file_is_used() {
        let file = sample_values_file();
        let config = PliConfig {
            values_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let plugin = GnomadPliPlugin::with_config(&config, None).unwrap();
        assert_eq!(plugin.table().len(), 4);
        assert_eq!(plugin.table().source(), file.path());
    }

    #[test]
    fn test_missing_values_file_fails_construction() {
        let err = GnomadPliPlugin::new(Some(Path::new("/nonexistent/values.txt"))).unwrap_err();
        assert!(matches!(err, gnomad_pli_common::PliError::Configuration(_)));
    }
}
