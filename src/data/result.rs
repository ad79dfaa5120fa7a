//! Result records, diagnostics and report writers.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A named scalar measure with its spread and, for tree patterns, the
/// distribution of match lengths.
///
/// For bootstrapped lexical measures `stdev` carries the 95% confidence
/// interval of the mean instead of a standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Display name of the measure.
    pub name: String,
    /// Point estimate.
    pub value: f64,
    /// Standard deviation or confidence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdev: Option<f64>,
    /// Mean match length (constituency patterns only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Standard deviation of match lengths.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "length stdev")]
    pub length_stdev: Option<f64>,
}

impl Measurement {
    /// A bare value without spread.
    pub fn value(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            stdev: None,
            length: None,
            length_stdev: None,
        }
    }

    /// A value with standard deviation (or confidence interval).
    pub fn with_stdev(name: impl Into<String>, value: f64, stdev: f64) -> Self {
        Self {
            stdev: Some(stdev),
            ..Self::value(name, value)
        }
    }

    /// A count measure with the distribution of match lengths.
    pub fn with_length(
        name: impl Into<String>,
        value: f64,
        stdev: f64,
        length: f64,
        length_stdev: f64,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            stdev: Some(stdev),
            length: Some(length),
            length_stdev: Some(length_stdev),
        }
    }
}

/// A non-fatal condition encountered while measuring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Fewer than five disjoint windows; confidence intervals are unreliable.
    FewWindows {
        n_windows: usize,
        text_length: usize,
        window_size: usize,
    },
    /// A dependency graph failed the sensibility check and was excluded.
    DroppedGraph { sentence: String, reason: String },
    /// A constituency tree was missing or unusable and was excluded.
    DroppedTree { sentence: String, reason: String },
    /// Undefined (NaN) values were excluded from an aggregate.
    UndefinedValues { measure: String, count: usize },
    /// A measure family had no usable input.
    EmptyInput { family: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FewWindows {
                n_windows,
                text_length,
                window_size,
            } => write!(
                f,
                "only {} windows for text length {} and window size {}; results might be unreliable",
                n_windows, text_length, window_size
            ),
            Self::DroppedGraph { sentence, reason } => {
                write!(f, "ignoring dependency graph of sentence {}: {}", sentence, reason)
            }
            Self::DroppedTree { sentence, reason } => {
                write!(f, "ignoring parse tree of sentence {}: {}", sentence, reason)
            }
            Self::UndefinedValues { measure, count } => {
                write!(f, "{}: {} undefined values excluded", measure, count)
            }
            Self::EmptyInput { family } => write!(f, "no usable input for {} measures", family),
        }
    }
}

/// Diagnostics returned next to the measurements of one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Empty diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Record excluded NaN values for `measure`, if any.
    pub fn undefined(&mut self, measure: &str, count: usize) {
        if count > 0 {
            self.push(Warning::UndefinedValues {
                measure: measure.to_string(),
                count,
            });
        }
    }

    /// Append the warnings of another call.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Number of dropped dependency graphs.
    pub fn dropped_graphs(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::DroppedGraph { .. }))
            .count()
    }

    /// Number of dropped constituency trees.
    pub fn dropped_trees(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::DroppedTree { .. }))
            .count()
    }

    /// Check if there are no warnings.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

/// Measurements of one measure family together with their diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    pub measurements: Vec<Measurement>,
    pub diagnostics: Diagnostics,
}

impl MeasurementSet {
    /// Create a new set.
    pub fn new(measurements: Vec<Measurement>, diagnostics: Diagnostics) -> Self {
        Self {
            measurements,
            diagnostics,
        }
    }

    /// Look up a measurement by name.
    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.name == name)
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Append another set.
    pub fn extend(&mut self, other: MeasurementSet) {
        self.measurements.extend(other.measurements);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// All measurements for one input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Document name (usually the input path).
    pub document: String,
    pub measurements: Vec<Measurement>,
    pub diagnostics: Diagnostics,
}

impl Report {
    /// Create a report from a measurement set.
    pub fn new(document: impl Into<String>, set: MeasurementSet) -> Self {
        Self {
            document: document.into(),
            measurements: set.measurements,
            diagnostics: set.diagnostics,
        }
    }

    /// Look up a measurement by name.
    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.name == name)
    }
}

/// Render reports as a JSON object keyed by document, then measure name.
pub fn reports_to_json(reports: &[Report]) -> Result<String> {
    let mut root = serde_json::Map::new();
    for report in reports {
        let mut measures = serde_json::Map::new();
        for m in &report.measurements {
            let mut entry = serde_json::Map::new();
            entry.insert("value".to_string(), json_number(m.value));
            if let Some(stdev) = m.stdev {
                entry.insert("stdev".to_string(), json_number(stdev));
            }
            if let (Some(length), Some(length_stdev)) = (m.length, m.length_stdev) {
                entry.insert("length".to_string(), json_number(length));
                entry.insert("length stdev".to_string(), json_number(length_stdev));
            }
            measures.insert(m.name.clone(), serde_json::Value::Object(entry));
        }
        root.insert(report.document.clone(), serde_json::Value::Object(measures));
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(root))?)
}

// JSON has no NaN; undefined values become null.
fn json_number(x: f64) -> serde_json::Value {
    serde_json::Number::from_f64(x)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Write reports as tab-separated values: a `filename` column followed by
/// one column per measure (taken from the first report).
pub fn write_reports_tsv<W: Write>(reports: &[Report], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    let Some(first) = reports.first() else {
        return Ok(());
    };
    let mut header = vec!["filename".to_string()];
    header.extend(first.measurements.iter().map(|m| m.name.clone()));
    wtr.write_record(&header)?;

    for report in reports {
        let mut row = vec![report.document.clone()];
        for name in &header[1..] {
            row.push(
                report
                    .get(name)
                    .map(|m| m.value.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::DroppedGraph {
            sentence: "s3".into(),
            reason: "the graph is not connected".into(),
        });
        diagnostics.undefined("Michéa's M", 0);
        Report::new(
            "doc.conllu",
            MeasurementSet::new(
                vec![
                    Measurement::with_stdev("average dependency distance", 2.5, 0.4),
                    Measurement::with_length("clauses", 1.5, 0.5, 7.0, 2.0),
                    Measurement::value("MTLD", f64::NAN),
                ],
                diagnostics,
            ),
        )
    }

    #[test]
    fn test_diagnostics_counts() {
        let report = sample_report();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics.dropped_graphs(), 1);
        assert_eq!(report.diagnostics.dropped_trees(), 0);
    }

    #[test]
    fn test_json_output() {
        let json = reports_to_json(&[sample_report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let doc = &value["doc.conllu"];
        assert_eq!(doc["average dependency distance"]["stdev"], 0.4);
        assert_eq!(doc["clauses"]["length stdev"], 2.0);
        assert!(doc["MTLD"]["value"].is_null());
        assert!(doc["MTLD"].get("stdev").is_none());
    }

    #[test]
    fn test_tsv_output() {
        let mut buf = Vec::new();
        write_reports_tsv(&[sample_report()], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("filename\taverage dependency distance\tclauses"));
        assert!(lines[1].starts_with("doc.conllu\t2.5\t1.5"));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::FewWindows {
            n_windows: 2,
            text_length: 11,
            window_size: 4,
        };
        assert!(w.to_string().contains("only 2 windows"));
    }
}
