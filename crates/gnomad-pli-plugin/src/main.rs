//! gnomad-pli — command-line gene constraint annotator.
//! Reads transcript rows and writes the gnomAD constraint fields for each.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gnomad_pli_common::{OutputFormat, PliConfig};
use gnomad_pli_plugin::{
    AnnotationPlugin, ConstraintAnnotation, GnomadPliPlugin, TranscriptRecord, OUTPUT_FIELDS,
};

#[derive(Parser, Debug)]
#[command(
    name = "gnomad-pli",
    version,
    about = "Annotate transcripts with gnomAD gene constraint metrics"
)]
struct Cli {
    /// Config file (default: $GNOMAD_PLI_CONFIG, else gnomad-pli.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate `transcript_id<TAB>gene_symbol<TAB>gene_hgnc` rows
    Annotate {
        /// Alternate values file
        #[arg(long)]
        values: Option<PathBuf>,
        /// Input rows (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Print the output field descriptions
    Header,
    /// Load the values file and summarise it
    Stats {
        #[arg(long)]
        values: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Vep,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Vep => OutputFormat::Vep,
        }
    }
}

#[derive(Serialize)]
struct AnnotatedTranscript<'a> {
    transcript_id: &'a str,
    #[serde(flatten)]
    annotation: &'a ConstraintAnnotation,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PliConfig::load_from(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => PliConfig::load().context("Failed to load config")?,
    };

    // Logs go to stderr; stdout carries annotations only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Annotate { values, input, format } => {
            let plugin = GnomadPliPlugin::with_config(&config, values.as_deref())
                .context("Failed to initialise gnomAD pLI plugin")?;
            let format = format.map(OutputFormat::from).unwrap_or(config.output_format);

            let reader: Box<dyn BufRead> = match &input {
                Some(path) => Box::new(BufReader::new(
                    File::open(path).with_context(|| format!("Cannot open input {:?}", path))?,
                )),
                None => Box::new(BufReader::new(io::stdin())),
            };
            let stdout = io::stdout();
            annotate(&plugin, reader, BufWriter::new(stdout.lock()), format)?;
        }
        Command::Header => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for field in OUTPUT_FIELDS {
                writeln!(out, "##{}={}", field.name, field.description)?;
            }
        }
        Command::Stats { values } => {
            let plugin = GnomadPliPlugin::with_config(&config, values.as_deref())
                .context("Failed to initialise gnomAD pLI plugin")?;
            let table = plugin.table();
            println!("source\t{}", table.source().display());
            println!("genes\t{}", table.len());
            println!("pli_na\t{}", table.na_pli_count());
        }
    }

    Ok(())
}

fn annotate<P, R, W>(
    plugin: &P,
    reader: R,
    mut out: W,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    P: AnnotationPlugin<Output = ConstraintAnnotation>,
    R: BufRead,
    W: Write,
{
    let mut annotated = 0usize;
    let mut empty = 0usize;

    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        let Some(tva) = TranscriptRecord::parse_line(&line) else {
            continue;
        };

        let annotation = plugin.run(&tva);
        if annotation.is_empty() {
            empty += 1;
        }
        annotated += 1;

        match format {
            OutputFormat::Json => {
                let row = AnnotatedTranscript {
                    transcript_id: &tva.transcript_id,
                    annotation: &annotation,
                };
                serde_json::to_writer(&mut out, &row)?;
                writeln!(out)?;
            }
            OutputFormat::Vep => {
                writeln!(out, "{}\t{}", tva.transcript_id, annotation.to_vep_string())?;
            }
        }
    }
    out.flush()?;

    tracing::info!(
        "Annotated {} transcripts ({} without constraint data)",
        annotated,
        empty
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnomad_pli_test_utils::sample_values_file;
    use pretty_assertions::assert_eq;

    fn run(input: &str, format: OutputFormat) -> String {
        let file = sample_values_file();
        let plugin = GnomadPliPlugin::new(Some(file.path())).unwrap();
        let mut out = Vec::new();
        annotate(&plugin, input.as_bytes(), &mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_annotate_json() {
        let out = run("# header\nENST00000269305\tTP53\t-\n", OutputFormat::Json);
        let row: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(row["transcript_id"], "ENST00000269305");
        assert_eq!(row["gnomADpLI"], "1.00");
        assert_eq!(row["gnomADlof_z"], "4.06");
    }

    #[test]
    fn test_annotate_vep() {
        let out = run(
            "ENST00000357654\t-\tBRCA1\nENST00000000001\t-\t-\n",
            OutputFormat::Vep,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ENST00000357654\tgnomADpLI=0.00;gnomADsyn_z=0.42;"));
        assert!(lines[1].starts_with("ENST00000000001\tgnomADpLI=;gnomADsyn_z=;"));
    }

    #[test]
    fn test_cli_parses_annotate() {
        let cli = Cli::try_parse_from([
            "gnomad-pli",
            "annotate",
            "--values",
            "values.txt",
            "--format",
            "vep",
        ])
        .unwrap();
        match cli.command {
            Command::Annotate { values, input, format } => {
                assert_eq!(values, Some(PathBuf::from("values.txt")));
                assert_eq!(input, None);
                assert!(matches!(format, Some(FormatArg::Vep)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_env_is_left_to_config_loader() {
        use gnomad_pli_common::config::CONFIG_ENV;

        std::env::set_var(CONFIG_ENV, "/nonexistent/gnomad-pli.toml");
        let cli = Cli::try_parse_from(["gnomad-pli", "header"]);
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(cli.unwrap().config, None);
    }
}
