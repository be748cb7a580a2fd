use log::{debug, info};

use crate::config::SearchConfig;
use crate::digits::DigitSource;
use crate::error::Result;
use crate::scanner::{self, RunRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// A run reaching the target was found.
    Found,
    /// The digit ceiling was reached without a hit.
    Exhausted,
}

/// Reported after every chunk that did not reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkProgress {
    pub digits: usize,
    pub longest_run: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub state: SearchState,
    pub digits_processed: usize,
    pub digits: String,
    pub replaced: String,
    pub hit: Option<RunRecord>,
    pub longest_run: usize,
}

impl SearchOutcome {
    /// 0-indexed start of the hit, or -1 when exhausted.
    pub fn position(&self) -> i64 {
        self.hit
            .and_then(|hit| i64::try_from(hit.start).ok())
            .unwrap_or(-1)
    }
}

/// Grows the prefix by `chunk_size` until a run of `target_run` blanks is
/// found or the next prefix would pass `max_digits`.
///
/// Every step rescans the whole prefix, so the longest run of the latest
/// chunk is the longest run so far.
pub fn search<S, F>(source: &mut S, config: &SearchConfig, mut on_chunk: F) -> Result<SearchOutcome>
where
    S: DigitSource + ?Sized,
    F: FnMut(&ChunkProgress),
{
    let mut n = config.chunk_size;
    let mut scanned = 0;
    let mut longest_run = 0;

    while n <= config.max_digits {
        let digits = source.digits(n)?;
        let replaced = scanner::substitute(&digits);
        let outcome = scanner::scan(&replaced, config.target_run);
        debug!("scanned {} digits, longest run {}", n, outcome.longest);

        if let Some(hit) = outcome.hit {
            info!("run of {} found at {} within {} digits", hit.len, hit.start, n);
            return Ok(SearchOutcome {
                state: SearchState::Found,
                digits_processed: n,
                digits,
                replaced,
                hit: Some(hit),
                longest_run: outcome.longest,
            });
        }

        longest_run = outcome.longest;
        scanned = n;
        on_chunk(&ChunkProgress {
            digits: n,
            longest_run,
        });

        match n.checked_add(config.chunk_size) {
            Some(next) => n = next,
            None => break,
        }
    }

    info!("no run of {} within {} digits", config.target_run, config.max_digits);
    let digits = source.digits(scanned)?;
    let replaced = scanner::substitute(&digits);
    Ok(SearchOutcome {
        state: SearchState::Exhausted,
        digits_processed: scanned,
        digits,
        replaced,
        hit: None,
        longest_run,
    })
}
