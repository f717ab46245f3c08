//! Output fields contributed to the host's annotation records.

use gnomad_pli_table::ConstraintScores;
use serde::{Deserialize, Serialize};

/// Output field name and the description declared in the host's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputField {
    pub name: &'static str,
    pub description: &'static str,
}

pub const OUTPUT_FIELDS: [OutputField; 10] = [
    OutputField {
        name: "gnomADpLI",
        description: "gnomAD probability of loss-of-function intolerance (pLI)",
    },
    OutputField {
        name: "gnomADsyn_z",
        description: "gnomAD z-score of observed versus expected synonymous variants",
    },
    OutputField {
        name: "gnomADmis_z",
        description: "gnomAD z-score of observed versus expected missense variants",
    },
    OutputField {
        name: "gnomADlof_z",
        description: "gnomAD z-score of observed versus expected loss-of-function variants",
    },
    OutputField {
        name: "gnomADoe_mis",
        description: "gnomAD observed/expected ratio of missense variants",
    },
    OutputField {
        name: "gnomADoe_syn",
        description: "gnomAD observed/expected ratio of synonymous variants",
    },
    OutputField {
        name: "gnomADoe_lof",
        description: "gnomAD observed/expected ratio of loss-of-function variants",
    },
    OutputField {
        name: "gnomADoe_syn_upper",
        description: "gnomAD upper bound of the 90% confidence interval of oe_syn",
    },
    OutputField {
        name: "gnomADoe_mis_upper",
        description: "gnomAD upper bound of the 90% confidence interval of oe_mis",
    },
    OutputField {
        name: "gnomADoe_lof_upper",
        description: "gnomAD upper bound of the 90% confidence interval of oe_lof (LOEUF)",
    },
];

/// Values merged into one transcript-variant's output. Every field is
/// always present; missing data is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintAnnotation {
    #[serde(rename = "gnomADpLI")]
    pub pli: String,
    #[serde(rename = "gnomADsyn_z")]
    pub syn_z: String,
    #[serde(rename = "gnomADmis_z")]
    pub mis_z: String,
    #[serde(rename = "gnomADlof_z")]
    pub lof_z: String,
    #[serde(rename = "gnomADoe_mis")]
    pub oe_mis: String,
    #[serde(rename = "gnomADoe_syn")]
    pub oe_syn: String,
    #[serde(rename = "gnomADoe_lof")]
    pub oe_lof: String,
    #[serde(rename = "gnomADoe_syn_upper")]
    pub oe_syn_upper: String,
    #[serde(rename = "gnomADoe_mis_upper")]
    pub oe_mis_upper: String,
    #[serde(rename = "gnomADoe_lof_upper")]
    pub oe_lof_upper: String,
}

impl ConstraintAnnotation {
    /// `(field name, value)` pairs in header order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        let values = [
            &self.pli,
            &self.syn_z,
            &self.mis_z,
            &self.lof_z,
            &self.oe_mis,
            &self.oe_syn,
            &self.oe_lof,
            &self.oe_syn_upper,
            &self.oe_mis_upper,
            &self.oe_lof_upper,
        ];
        std::array::from_fn(|i| (OUTPUT_FIELDS[i].name, values[i].as_str()))
    }

    /// Render as `name=value` pairs joined by `;`.
    pub fn to_vep_string(&self) -> String {
        self.fields()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_empty())
    }
}

impl From<ConstraintScores> for ConstraintAnnotation {
    fn from(s: ConstraintScores) -> Self {
        Self {
            pli: s.pli,
            syn_z: s.syn_z,
            mis_z: s.mis_z,
            lof_z: s.lof_z,
            oe_mis: s.oe_mis,
            oe_syn: s.oe_syn,
            oe_lof: s.oe_lof,
            oe_syn_upper: s.oe_syn_upper,
            oe_mis_upper: s.oe_mis_upper,
            oe_lof_upper: s.oe_lof_upper,
        }
    }
}
