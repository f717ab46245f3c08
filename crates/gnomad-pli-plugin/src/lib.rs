//! gnomAD gene constraint annotation plugin.
//!
//! Adds ten per-gene constraint fields (pLI, z-scores, observed/expected
//! ratios and their upper bounds) to each transcript-variant a host
//! annotates. The values file is read once at construction; each
//! [`AnnotationPlugin::run`] call is a lookup on the transcript's gene symbol.
//!
//! # Example
//!
//! ```rust,no_run
//! use gnomad_pli_plugin::{AnnotationPlugin, GnomadPliPlugin, TranscriptRecord};
//!
//! fn main() -> gnomad_pli_common::Result<()> {
//!     let plugin = GnomadPliPlugin::new(None)?;
//!
//!     let tva = TranscriptRecord::new("ENST00000357654").with_gene_symbol("BRCA1");
//!     println!("{}", plugin.run(&tva).to_vep_string());
//!
//!     Ok(())
//! }
//! ```

pub mod fields;
pub mod plugin;
pub mod transcript;

pub use fields::{ConstraintAnnotation, OutputField, OUTPUT_FIELDS};
pub use plugin::{AnnotationPlugin, FeatureType, GnomadPliPlugin};
pub use transcript::{resolve_gene_symbol, TranscriptRecord, TranscriptVariant};
