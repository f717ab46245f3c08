//! Shared test fixtures: values files written to temporary locations.

use std::io::Write;

use tempfile::NamedTempFile;

/// Header row as published with the gnomAD constraint values.
pub const HEADER_ROW: &str = concat!(
    "gene\toe_mis\toe_syn\tpLI\toe_lof\t",
    "oe_syn_upper\toe_mis_upper\toe_lof_upper\t",
    "syn_z\tmis_z\tlof_z"
);

/// A handful of realistic rows, including an NA pLI and zero-valued scores.
pub const SAMPLE_ROWS: [&str; 4] = [
    "BRCA1\t0.84\t0.97\t2.6497e-18\t0.39\t1.07\t0.89\t0.53\t0.42\t1.17\t4.25",
    "TP53\t0.70\t0.98\t0.99951\t0.19\t1.12\t0.77\t0.37\t0.10\t2.02\t4.06",
    "OR4F5\tNA\t1.20\tNA\tNA\t1.52\tNA\tNA\t-0.21\tNA\tNA",
    "ACTB\t0.31\t1.01\t0.1\t0\t1.15\t0.35\t0.12\t0\t4.53\t4.87",
];

/// Write `rows` (with a header line first) to a temporary values file.
pub fn values_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp values file");
    writeln!(file, "{}", HEADER_ROW).expect("write header");
    for row in rows {
        writeln!(file, "{}", row).expect("write row");
    }
    file.flush().expect("flush values file");
    file
}

/// Values file holding [`SAMPLE_ROWS`].
pub fn sample_values_file() -> NamedTempFile {
    values_file(&SAMPLE_ROWS)
}
