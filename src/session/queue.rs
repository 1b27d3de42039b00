use std::collections::VecDeque;

use rand::Rng;

use crate::corpus::WordLine;
use crate::session::sampler::WordPool;

/// The active line and the lookahead line shown beneath it.
#[derive(Clone, Debug)]
pub struct SessionQueue {
    lines: VecDeque<WordLine>,
}

impl SessionQueue {
    pub const CAPACITY: usize = 2;

    pub fn seed<R: Rng + ?Sized>(pool: &WordPool, max_width: usize, rng: &mut R) -> Self {
        let active = pool.sample_line(None, max_width, rng);
        let lookahead = pool.sample_line(active.last(), max_width, rng);
        Self {
            lines: VecDeque::from([active, lookahead]),
        }
    }

    /// Replace both lines with fresh samples, e.g. after the row shrank
    /// below a queued line.
    pub fn reseed<R: Rng + ?Sized>(&mut self, pool: &WordPool, max_width: usize, rng: &mut R) {
        *self = Self::seed(pool, max_width, rng);
    }

    /// Whether both queued lines still fit `max_width` columns.
    pub fn fits(&self, max_width: usize) -> bool {
        self.lines.iter().all(|line| line.width() <= max_width)
    }

    pub fn active(&self) -> &WordLine {
        &self.lines[0]
    }

    pub fn lookahead(&self) -> &WordLine {
        &self.lines[1]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Retire the active line, promote the lookahead and sample a new one.
    /// The new lookahead is drawn without a cross-line exclusion.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        pool: &WordPool,
        max_width: usize,
        rng: &mut R,
    ) -> &WordLine {
        self.lines.pop_front();
        self.lines.push_back(pool.sample_line(None, max_width, rng));
        debug_assert_eq!(self.lines.len(), Self::CAPACITY);
        self.active()
    }
}
