//! gnomAD gene constraint lookup table.
//!
//! Loads a whitespace-delimited values file mapping gene symbols to nine
//! gene-constraint metrics and answers per-gene lookups. Symbols are matched
//! case-insensitively.
//!
//! # Values file
//!
//! | Column | Stored as |
//! |--------|-----------|
//! | gene | lowercased join key |
//! | pLI | two decimal places, or `NA` |
//! | oe_mis, oe_syn, oe_lof | raw token |
//! | oe_*_upper | raw token |
//! | syn_z, mis_z, lof_z | raw token |
//!
//! Column order is `gene oe_mis oe_syn pLI oe_lof oe_syn_upper oe_mis_upper
//! oe_lof_upper syn_z mis_z lof_z`. A row with `pLI` in the fourth column is
//! a header and is skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! use gnomad_pli_table::GeneConstraintTable;
//!
//! fn main() -> gnomad_pli_common::Result<()> {
//!     let table = GeneConstraintTable::open(None)?;
//!
//!     let scores = table.lookup(Some("BRCA1"));
//!     println!("BRCA1 pLI: {}", scores.pli);
//!
//!     Ok(())
//! }
//! ```

pub mod record;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use gnomad_pli_common::{PliError, Result};
use tracing::{debug, info, warn};

pub use record::{
    format_pli, ConstraintRecord, ConstraintScores, EXPECTED_COLUMNS, FALSY_SCORE_TOKENS,
    PLI_NA,
};
use record::{HEADER_MARKER, PLI_COLUMN};

/// Values file expected next to the installed binary
pub const DEFAULT_VALUES_FILE: &str = "gnomADpLI_values.txt";

/// Read-only gene constraint table.
#[derive(Debug, Clone)]
pub struct GeneConstraintTable {
    /// lowercased gene symbol -> record
    genes: HashMap<String, ConstraintRecord>,
    /// File the table was loaded from
    source: PathBuf,
}

impl GeneConstraintTable {
    /// Load the table from `path`, or from the default values file next to
    /// the running executable when no path is given.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_values_path().ok_or_else(|| {
                PliError::Configuration(
                    "Could not determine the plugin directory to locate the values file"
                        .to_string(),
                )
            })?,
        };
        Self::load(&path)
    }

    /// Location of the values file when none is configured
    pub fn default_values_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let dir = exe.parent()?;
        let path = dir.join(DEFAULT_VALUES_FILE);
        debug!("Default values file: {:?}", path);
        Some(path)
    }

    /// Load the table from a values file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PliError::Configuration(format!(
                "Values file not found: {}",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(PliError::Configuration(format!(
                "Values file is not a regular file: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            PliError::Configuration(format!("Cannot open {}: {}", path.display(), e))
        })?;

        info!("Loading gene constraint values from {:?}", path);
        let table = Self::from_reader(BufReader::new(file), path.to_path_buf())?;
        info!(
            "Gene constraint table ready: {} genes ({} with pLI NA)",
            table.len(),
            table.na_pli_count()
        );
        Ok(table)
    }

    /// Parse a values file from any buffered reader.
    ///
    /// `source` is only used for reporting.
    pub fn from_reader<R: BufRead>(reader: R, source: PathBuf) -> Result<Self> {
        let mut genes = HashMap::new();
        let mut extra_token_rows = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => PliError::MalformedRecord {
                    line: line_no,
                    reason: "line is not valid UTF-8".to_string(),
                },
                _ => PliError::Io(e),
            })?;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            if tokens.get(PLI_COLUMN) == Some(&HEADER_MARKER) {
                debug!("Skipping header at line {}", line_no);
                continue;
            }

            if tokens.len() < EXPECTED_COLUMNS {
                return Err(PliError::MalformedRecord {
                    line: line_no,
                    reason: format!(
                        "expected {} columns, found {}",
                        EXPECTED_COLUMNS,
                        tokens.len()
                    ),
                });
            }
            if tokens.len() > EXPECTED_COLUMNS {
                extra_token_rows += 1;
            }

            let mut row = [""; EXPECTED_COLUMNS];
            row.copy_from_slice(&tokens[..EXPECTED_COLUMNS]);

            let record = ConstraintRecord::from_tokens(&row).ok_or_else(|| {
                PliError::MalformedRecord {
                    line: line_no,
                    reason: format!("pLI value {:?} is not a number or NA", row[PLI_COLUMN]),
                }
            })?;

            let key = record.gene_symbol_lower.clone();
            if genes.insert(key, record).is_some() {
                debug!(
                    "Line {}: duplicate gene {} replaces the earlier row",
                    line_no, row[0]
                );
            }
        }

        if extra_token_rows > 0 {
            warn!(
                "{} rows in {:?} had more than {} columns; trailing values ignored",
                extra_token_rows, source, EXPECTED_COLUMNS
            );
        }

        if genes.is_empty() {
            return Err(PliError::EmptyDataset(source));
        }

        Ok(Self { genes, source })
    }

    /// Scores for a gene symbol, as reported to the host.
    ///
    /// An absent or empty symbol and an unknown gene both yield all-empty
    /// scores. Stored score tokens of `0` are reported as empty strings.
    pub fn lookup(&self, gene_symbol: Option<&str>) -> ConstraintScores {
        let symbol = match gene_symbol {
            Some(s) if !s.is_empty() => s,
            _ => return ConstraintScores::empty(),
        };

        self.get(symbol)
            .map(|record| record.scores.reported())
            .unwrap_or_default()
    }

    /// Stored record for a gene, without any reporting rules applied
    pub fn get(&self, gene_symbol: &str) -> Option<&ConstraintRecord> {
        self.genes.get(&gene_symbol.to_lowercase())
    }

    /// Check if a gene is available in the table
    pub fn contains(&self, gene_symbol: &str) -> bool {
        self.get(gene_symbol).is_some()
    }

    /// Number of distinct genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Genes whose pLI is the `NA` sentinel
    pub fn na_pli_count(&self) -> usize {
        self.genes.values().filter(|r| r.pli_is_na()).count()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}
