use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::corpus::error::CorpusError;
use crate::corpus::record::WordRecord;

/// Usage counts such as `" (12)"` trailing a stroke in the mapping file.
static USAGE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \([0-9]*\)").expect("static regex"));

/// Frequency-sorted drill corpus. Immutable once loaded.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    records: Vec<WordRecord>,
    missing: Vec<String>,
}

impl Corpus {
    pub fn load(words_path: &Path, strokes_path: &Path) -> Result<Self, CorpusError> {
        let strokes_src = read(strokes_path)?;
        let strokes = parse_canonical_strokes(&strokes_src, strokes_path)?;
        let words_src = read(words_path)?;
        let frequencies = parse_frequencies(&words_src, words_path)?;
        let corpus = Self::assemble(frequencies, &strokes);
        info!(
            words = corpus.records.len(),
            path = %words_path.display(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Join the frequency list with the stroke mapping. Words without a stroke
    /// are dropped and counted.
    pub fn assemble(frequencies: Vec<(u64, String)>, strokes: &HashMap<String, String>) -> Self {
        let total = frequencies.len();
        let mut records = Vec::with_capacity(total);
        let mut missing = Vec::new();

        for (idx, (occurrences, word)) in frequencies.into_iter().enumerate() {
            match strokes.get(&word) {
                Some(stroke) => records.push(WordRecord {
                    canonical_stroke: stroke.clone(),
                    frequency_rank: idx + 1,
                    occurrences,
                    word,
                }),
                None => {
                    debug!(%word, "no canonical stroke");
                    missing.push(word);
                }
            }
        }

        if !missing.is_empty() {
            info!("No canonical stroke found for {}/{}.", missing.len(), total);
        }

        Self { records, missing }
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// The `n` most frequent words.
    pub fn top(&self, n: usize) -> &[WordRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

fn read(path: &Path) -> Result<String, CorpusError> {
    fs::read_to_string(path).map_err(|source| CorpusError::MissingFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `<occurrences> <word>` lines, most frequent first.
pub fn parse_frequencies(src: &str, path: &Path) -> Result<Vec<(u64, String)>, CorpusError> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = |reason: &str| CorpusError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: reason.to_string(),
        };
        let (count, word) = line
            .split_once(' ')
            .ok_or_else(|| malformed("expected `<occurrences> <word>`"))?;
        let count = count
            .parse::<u64>()
            .map_err(|_| malformed("occurrence count is not a number"))?;
        let word = word.trim();
        if word.is_empty() || word.contains(' ') {
            return Err(malformed("expected a single word"));
        }
        out.push((count, word.to_string()));
    }
    Ok(out)
}

/// Parse `<word>: <stroke> (n), <stroke> (n)` lines. The first stroke listed
/// is the canonical one.
pub fn parse_canonical_strokes(
    src: &str,
    path: &Path,
) -> Result<HashMap<String, String>, CorpusError> {
    let mut out = HashMap::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some((word, strokes)) = line.split_once(": ") else {
            return Err(CorpusError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: "expected `<word>: <stroke>`".to_string(),
            });
        };
        let first = strokes.split(", ").next().unwrap_or(strokes);
        let stroke = USAGE_ANNOTATION.replace_all(first, "").trim().to_string();
        if stroke.is_empty() {
            return Err(CorpusError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!("no stroke for `{word}`"),
            });
        }
        out.insert(word.to_string(), stroke);
    }
    Ok(out)
}
