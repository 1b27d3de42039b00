use unicode_width::UnicodeWidthStr;

/// A drillable word together with the chord that writes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub canonical_stroke: String,
    /// 1-based position in the frequency feed; lower is more frequent.
    pub frequency_rank: usize,
    pub occurrences: u64,
}

impl WordRecord {
    pub fn new(word: &str, canonical_stroke: &str, frequency_rank: usize) -> Self {
        Self {
            word: word.to_string(),
            canonical_stroke: canonical_stroke.to_string(),
            frequency_rank,
            occurrences: 0,
        }
    }

    pub fn same_word(&self, other: &WordRecord) -> bool {
        self.word == other.word
    }
}

/// One display row worth of words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordLine {
    words: Vec<WordRecord>,
}

impl WordLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn last(&self) -> Option<&WordRecord> {
        self.words.last()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn push(&mut self, record: WordRecord) {
        self.words.push(record);
    }

    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|r| r.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Terminal columns taken by `text()`.
    pub fn width(&self) -> usize {
        self.text().width()
    }

    /// Columns the line would take with `record` appended.
    pub fn width_with(&self, record: &WordRecord) -> usize {
        if self.words.is_empty() {
            record.word.width()
        } else {
            self.width() + 1 + record.word.width()
        }
    }

    /// The word whose characters start at or after `offset` in `text()`, i.e.
    /// the word the learner is currently writing when `offset` chars are typed.
    pub fn word_at(&self, offset: usize) -> Option<&WordRecord> {
        let mut start = 0;
        for record in &self.words {
            let end = start + record.word.chars().count();
            if offset <= end {
                return Some(record);
            }
            start = end + 1;
        }
        self.words.last()
    }
}

impl FromIterator<WordRecord> for WordLine {
    fn from_iter<I: IntoIterator<Item = WordRecord>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
