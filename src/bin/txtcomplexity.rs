//! txtcomplexity - Linguistic Complexity CLI
//!
//! Command-line interface for computing complexity measures over
//! annotated corpora.

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use textcomplexity::constituency::LanguageProfile;
use textcomplexity::data::{reports_to_json, write_reports_tsv, Document, Report};
use textcomplexity::error::Result;
use textcomplexity::io::{read_document, InputFormat};
use textcomplexity::lexical::DEFAULT_WINDOW_SIZE;
use textcomplexity::pipeline::{AnalysisConfig, Analyzer, MeasureFamily};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// CLI-friendly input format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInputFormat {
    /// Universal Dependencies CoNLL-U
    Conllu,
    /// Six-column TSV with bracketed tree fragments
    Tsv,
}

impl From<CliInputFormat> for InputFormat {
    fn from(format: CliInputFormat) -> Self {
        match format {
            CliInputFormat::Conllu => InputFormat::Conllu,
            CliInputFormat::Tsv => InputFormat::Tsv,
        }
    }
}

/// Output format of the reports
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON object keyed by file and measure
    Json,
    /// One row per file, one column per measure
    Tsv,
}

/// CLI-friendly language profile enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    /// No treebank-specific patterns
    None,
    /// German NEGRA/TIGER labels
    #[value(name = "de_negra")]
    DeNegra,
}

impl From<CliLanguage> for LanguageProfile {
    fn from(lang: CliLanguage) -> Self {
        match lang {
            CliLanguage::None => LanguageProfile::None,
            CliLanguage::DeNegra => LanguageProfile::DeNegra,
        }
    }
}

/// Compute linguistic complexity measures for annotated text files
#[derive(Parser)]
#[command(name = "txtcomplexity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Compute surface-based (lexical) measures
    #[arg(long)]
    sur: bool,

    /// Compute sentence-based measures
    #[arg(long)]
    sent: bool,

    /// Compute dependency-based measures
    #[arg(long)]
    dep: bool,

    /// Compute constituency-based measures
    #[arg(long = "const")]
    constituency: bool,

    /// Compute every lexical measure instead of the default subset
    #[arg(long)]
    all_measures: bool,

    /// Treebank annotation scheme of the constituency trees
    #[arg(long, value_enum, default_value = "none")]
    lang: CliLanguage,

    /// Ignore punctuation for surface-based measures
    #[arg(long)]
    ignore_punct: bool,

    /// Part-of-speech tag for punctuation (can be repeated)
    #[arg(long = "punct-tag", default_value = "PUNCT")]
    punct_tags: Vec<String>,

    /// Window size for the bootstrapped lexical measures
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Format of the input files
    #[arg(short, long, value_enum, default_value = "conllu")]
    input_format: CliInputFormat,

    /// Format of the output
    #[arg(short, long, value_enum, default_value = "json")]
    output_format: OutputFormat,

    /// Analysis configuration YAML; replaces the measure options above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input files (`-` for standard input)
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn families(&self) -> Vec<MeasureFamily> {
        let selected: Vec<MeasureFamily> = [
            (self.sur, MeasureFamily::Surface),
            (self.sent, MeasureFamily::Sentence),
            (self.dep, MeasureFamily::Dependency),
            (self.constituency, MeasureFamily::Constituency),
        ]
        .into_iter()
        .filter_map(|(on, family)| on.then_some(family))
        .collect();
        if selected.is_empty() {
            MeasureFamily::ALL.to_vec()
        } else {
            selected
        }
    }

    fn analyzer(&self) -> Result<Analyzer> {
        if let Some(path) = &self.config {
            eprintln!("Loading analysis configuration from {:?}...", path);
            let config = AnalysisConfig::from_file(path)?;
            return Ok(Analyzer::from_config(&config));
        }
        Ok(Analyzer::new()
            .name("txtcomplexity")
            .families(&self.families())
            .window_size(self.window_size)
            .all_measures(self.all_measures)
            .punctuation_tags(self.punct_tags.iter().cloned())
            .ignore_punctuation(self.ignore_punct)
            .language(self.lang.into()))
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = cmd_analyze(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Read all inputs, analyze them and write the reports to stdout
fn cmd_analyze(cli: &Cli) -> Result<()> {
    let analyzer = cli.analyzer()?;
    let format: InputFormat = cli.input_format.into();

    eprintln!("Loading {} file(s)...", cli.files.len());
    let documents = cli
        .files
        .iter()
        .map(|path| read_document(path, format))
        .collect::<Result<Vec<Document>>>()?;

    eprintln!("Running analysis '{}'...", analyzer.config().name);
    let reports = analyzer.run_all(&documents)?;
    report_diagnostics(&reports);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output_format {
        OutputFormat::Json => writeln!(out, "{}", reports_to_json(&reports)?)?,
        OutputFormat::Tsv => write_reports_tsv(&reports, &mut out)?,
    }
    Ok(())
}

/// Re-emit the diagnostics of every report as warnings
fn report_diagnostics(reports: &[Report]) {
    for report in reports {
        for warning in &report.diagnostics.warnings {
            tracing::warn!(document = %report.document, "{}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_values() {
        let cli = Cli::try_parse_from(["txtcomplexity", "--sent", "--lang", "de_negra", "a.conllu"])
            .unwrap();
        assert_eq!(LanguageProfile::from(cli.lang), LanguageProfile::DeNegra);
        assert!(Cli::try_parse_from(["txtcomplexity", "--lang", "de-negra", "a.conllu"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["txtcomplexity", "a.conllu", "b.conllu"]).unwrap();
        assert_eq!(cli.families(), MeasureFamily::ALL.to_vec());
        assert_eq!(cli.punct_tags, vec!["PUNCT".to_string()]);
        assert_eq!(cli.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(InputFormat::from(cli.input_format), InputFormat::Conllu);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_family_flags() {
        let cli = Cli::try_parse_from([
            "txtcomplexity",
            "--dep",
            "--const",
            "--punct-tag",
            "$.",
            "--punct-tag",
            "$,",
            "-i",
            "tsv",
            "a.tsv",
        ])
        .unwrap();
        assert_eq!(
            cli.families(),
            vec![MeasureFamily::Dependency, MeasureFamily::Constituency]
        );
        assert_eq!(cli.punct_tags, vec!["$.".to_string(), "$,".to_string()]);
        let config = cli.analyzer().unwrap().to_config(None);
        assert_eq!(config.families.len(), 2);
        assert!(config.punctuation_tags.contains("$,"));
    }
}
