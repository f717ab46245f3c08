//! Per-gene constraint values as stored in the lookup table.

use serde::{Deserialize, Serialize};

/// Column order of the values file.
pub const COLUMNS: [&str; EXPECTED_COLUMNS] = [
    "gene",
    "oe_mis",
    "oe_syn",
    "pLI",
    "oe_lof",
    "oe_syn_upper",
    "oe_mis_upper",
    "oe_lof_upper",
    "syn_z",
    "mis_z",
    "lof_z",
];

/// Rows with fewer whitespace-separated tokens than this are rejected.
/// Trailing tokens beyond it are ignored.
pub const EXPECTED_COLUMNS: usize = 11;

/// Index of the pLI column; a row holding the literal `pLI` there is a header.
pub const PLI_COLUMN: usize = 3;

pub const HEADER_MARKER: &str = COLUMNS[PLI_COLUMN];

/// pLI sentinel kept verbatim instead of being reformatted.
pub const PLI_NA: &str = "NA";

/// Stored score tokens reported back as empty strings.
///
/// A z-score or ratio of exactly `0` is therefore indistinguishable from a
/// missing value. pLI is not subject to this rule.
pub const FALSY_SCORE_TOKENS: [&str; 2] = ["", "0"];

/// The nine constraint metrics for one gene, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintScores {
    pub pli: String,
    pub syn_z: String,
    pub mis_z: String,
    pub lof_z: String,
    pub oe_mis: String,
    pub oe_syn: String,
    pub oe_lof: String,
    pub oe_syn_upper: String,
    pub oe_mis_upper: String,
    pub oe_lof_upper: String,
}

impl ConstraintScores {
    /// All fields empty; returned for absent symbols and table misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy of these scores as reported to the host, with falsy tokens blanked.
    pub(crate) fn reported(&self) -> Self {
        Self {
            pli: self.pli.clone(),
            syn_z: blank_if_falsy(&self.syn_z),
            mis_z: blank_if_falsy(&self.mis_z),
            lof_z: blank_if_falsy(&self.lof_z),
            oe_mis: blank_if_falsy(&self.oe_mis),
            oe_syn: blank_if_falsy(&self.oe_syn),
            oe_lof: blank_if_falsy(&self.oe_lof),
            oe_syn_upper: blank_if_falsy(&self.oe_syn_upper),
            oe_mis_upper: blank_if_falsy(&self.oe_mis_upper),
            oe_lof_upper: blank_if_falsy(&self.oe_lof_upper),
        }
    }
}

fn blank_if_falsy(token: &str) -> String {
    if FALSY_SCORE_TOKENS.contains(&token) {
        String::new()
    } else {
        token.to_string()
    }
}

/// One row of the values file, keyed by lowercased gene symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub gene_symbol_lower: String,
    pub scores: ConstraintScores,
}

impl ConstraintRecord {
    /// Build a record from the eleven positional tokens of a data row.
    ///
    /// Returns `None` when the pLI token is neither `NA` nor a number.
    pub fn from_tokens(tokens: &[&str; EXPECTED_COLUMNS]) -> Option<Self> {
        let [
            gene,
            oe_mis,
            oe_syn,
            pli,
            oe_lof,
            oe_syn_upper,
            oe_mis_upper,
            oe_lof_upper,
            syn_z,
            mis_z,
            lof_z,
        ] = *tokens;

        Some(Self {
            gene_symbol_lower: gene.to_lowercase(),
            scores: ConstraintScores {
                pli: format_pli(pli)?,
                syn_z: syn_z.to_string(),
                mis_z: mis_z.to_string(),
                lof_z: lof_z.to_string(),
                oe_mis: oe_mis.to_string(),
                oe_syn: oe_syn.to_string(),
                oe_lof: oe_lof.to_string(),
                oe_syn_upper: oe_syn_upper.to_string(),
                oe_mis_upper: oe_mis_upper.to_string(),
                oe_lof_upper: oe_lof_upper.to_string(),
            },
        })
    }

    pub fn pli_is_na(&self) -> bool {
        self.scores.pli == PLI_NA
    }
}

/// Format a raw pLI token to two decimal places, keeping `NA` as is.
/// Non-finite values (`nan`, `inf`) are rejected.
pub fn format_pli(raw: &str) -> Option<String> {
    if raw == PLI_NA {
        return Some(PLI_NA.to_string());
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| format!("{:.2}", v))
}
