use std::collections::HashSet;

use rand::Rng;

use crate::corpus::{CorpusError, WordLine, WordRecord};

/// The words currently being drilled: the N most frequent entries of the corpus.
#[derive(Clone, Debug)]
pub struct WordPool {
    records: Vec<WordRecord>,
    single_word: bool,
}

impl WordPool {
    pub fn new(records: Vec<WordRecord>) -> Result<Self, CorpusError> {
        if records.len() <= 1 {
            return Err(CorpusError::EmptyPool {
                eligible: records.len(),
            });
        }
        let distinct: HashSet<&str> = records.iter().map(|r| r.word.as_str()).collect();
        let single_word = distinct.len() == 1;
        Ok(Self {
            records,
            single_word,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fill one row of at most `max_width` columns with random words.
    ///
    /// Greedy first-fit: draws until a word does not fit, then stops, so the
    /// row may end short of `max_width`. Two adjacent words are never the same,
    /// and the first word differs from `exclude`.
    pub fn sample_line<R: Rng + ?Sized>(
        &self,
        exclude: Option<&WordRecord>,
        max_width: usize,
        rng: &mut R,
    ) -> WordLine {
        let mut line = WordLine::new();
        let mut prev = exclude.cloned();

        loop {
            let candidate = self.draw(prev.as_ref(), rng);
            if line.width_with(candidate) > max_width {
                return line;
            }
            line.push(candidate.clone());
            prev = Some(candidate.clone());
        }
    }

    fn draw<R: Rng + ?Sized>(&self, exclude: Option<&WordRecord>, rng: &mut R) -> &WordRecord {
        loop {
            // `new` rejects pools with fewer than two entries.
            let candidate = &self.records[rng.gen_range(0..self.records.len())];
            match exclude {
                // With a single distinct word there is nothing else to draw.
                Some(prev) if !self.single_word && candidate.same_word(prev) => continue,
                _ => return candidate,
            }
        }
    }
}
