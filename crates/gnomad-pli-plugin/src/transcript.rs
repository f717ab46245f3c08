//! Transcript-variant input as seen by the plugin.

/// Host record pairing a variant with one transcript it affects.
///
/// The gene symbol is looked up through two attributes: the transcript's
/// own gene symbol first, then its HGNC symbol.
pub trait TranscriptVariant {
    fn gene_symbol(&self) -> Option<&str>;

    fn gene_hgnc(&self) -> Option<&str>;
}

/// Gene symbol used for lookup, applying the fallback order.
/// Empty attributes count as absent.
pub fn resolve_gene_symbol(tva: &dyn TranscriptVariant) -> Option<&str> {
    tva.gene_symbol()
        .filter(|s| !s.is_empty())
        .or_else(|| tva.gene_hgnc().filter(|s| !s.is_empty()))
}

/// Plain transcript record, as read by the command-line annotator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub transcript_id: String,
    pub gene_symbol: Option<String>,
    pub gene_hgnc: Option<String>,
}

impl TranscriptRecord {
    pub fn new(transcript_id: impl Into<String>) -> Self {
        Self {
            transcript_id: transcript_id.into(),
            ..Default::default()
        }
    }

    pub fn with_gene_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.gene_symbol = Some(symbol.into());
        self
    }

    pub fn with_gene_hgnc(mut self, symbol: impl Into<String>) -> Self {
        self.gene_hgnc = Some(symbol.into());
        self
    }

    /// Parse `transcript_id<TAB>gene_symbol<TAB>gene_hgnc`.
    ///
    /// Missing trailing columns, empty columns and `-` are absent values.
    /// Returns `None` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }

        let mut cols = line.split('\t');
        let transcript_id = cols.next()?.trim().to_string();
        let mut column = || {
            cols.next()
                .map(str::trim)
                .filter(|s| !s.is_empty() && *s != "-")
                .map(str::to_string)
        };
        let gene_symbol = column();
        let gene_hgnc = column();

        Some(Self {
            transcript_id,
            gene_symbol,
            gene_hgnc,
        })
    }
}

impl TranscriptVariant for TranscriptRecord {
    fn gene_symbol(&self) -> Option<&str> {
        self.gene_symbol.as_deref()
    }

    fn gene_hgnc(&self) -> Option<&str> {
        self.gene_hgnc.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gene_symbol_takes_precedence() {
        let tva = TranscriptRecord::new("ENST00000357654")
            .with_gene_symbol("BRCA1")
            .with_gene_hgnc("HGNC_BRCA1");
        assert_eq!(resolve_gene_symbol(&tva), Some("BRCA1"));
    }

    #[test]
    fn test_falls_back_to_hgnc() {
        let tva = TranscriptRecord::new("ENST00000269305").with_gene_hgnc("TP53");
        assert_eq!(resolve_gene_symbol(&tva), Some("TP53"));

        let tva = TranscriptRecord::new("ENST00000269305")
            .with_gene_symbol("")
            .with_gene_hgnc("TP53");
        assert_eq!(resolve_gene_symbol(&tva), Some("TP53"));
    }

    #[test]
    fn test_no_symbol() {
        let tva = TranscriptRecord::new("ENST00000000001");
        assert_eq!(resolve_gene_symbol(&tva), None);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            TranscriptRecord::parse_line("ENST00000357654\tBRCA1\t-"),
            Some(TranscriptRecord::new("ENST00000357654").with_gene_symbol("BRCA1"))
        );
        assert_eq!(
            TranscriptRecord::parse_line("ENST00000269305\t\tTP53\r\n"),
            Some(TranscriptRecord::new("ENST00000269305").with_gene_hgnc("TP53"))
        );
        assert_eq!(
            TranscriptRecord::parse_line("ENST00000000001"),
            Some(TranscriptRecord::new("ENST00000000001"))
        );
        assert_eq!(TranscriptRecord::parse_line("# transcript\tsymbol\thgnc"), None);
        assert_eq!(TranscriptRecord::parse_line("   "), None);
    }
}
