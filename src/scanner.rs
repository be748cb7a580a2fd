use std::io::{self, Read};

use crate::block_iterator::BlockIterator;

pub const SPACE: u8 = b' ';

#[inline]
fn blank(byte: u8) -> u8 {
    match byte {
        b'9' | b'0' => SPACE,
        other => other,
    }
}

/// Replaces every `9` and `0` with a space. Length preserving.
pub fn substitute(digits: &str) -> String {
    digits
        .chars()
        .map(|c| if matches!(c, '9' | '0') { ' ' } else { c })
        .collect()
}

/// In-place byte variant of [`substitute`].
pub fn substitute_bytes(block: &mut [u8]) {
    for byte in block.iter_mut() {
        *byte = blank(*byte);
    }
}

/// A contiguous run of spaces. `start` is 0-indexed and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRecord {
    pub start: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// First run that reached the target, if any.
    pub hit: Option<RunRecord>,
    /// Longest run seen before the scan stopped.
    pub longest: usize,
}

impl ScanOutcome {
    pub fn is_found(&self) -> bool {
        self.hit.is_some()
    }
}

/// Incremental run detector. Feed it substituted bytes in any number of
/// slices; runs crossing slice boundaries are tracked.
#[derive(Debug, Clone)]
pub struct RunTracker {
    target: usize,
    current: usize,
    longest: usize,
    position: usize,
    hit: Option<RunRecord>,
}

impl RunTracker {
    pub fn new(target: usize) -> Self {
        let hit = (target == 0).then_some(RunRecord { start: 0, len: 0 });
        RunTracker {
            target,
            current: 0,
            longest: 0,
            position: 0,
            hit,
        }
    }

    /// Consumes `chunk` until a qualifying run ends the scan. Returns true once found.
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if self.hit.is_some() {
            return true;
        }
        for &byte in chunk {
            let index = self.position;
            self.position += 1;

            if byte != SPACE {
                self.longest = self.longest.max(self.current);
                self.current = 0;
                continue;
            }

            self.current += 1;
            if self.current >= self.target {
                self.longest = self.longest.max(self.current);
                self.hit = Some(RunRecord {
                    start: index + 1 - self.current,
                    len: self.current,
                });
                return true;
            }
        }
        false
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            hit: self.hit,
            longest: self.longest.max(self.current),
        }
    }
}

/// Scans substituted text for the first run of at least `target` spaces.
pub fn scan(text: &str, target: usize) -> ScanOutcome {
    let mut tracker = RunTracker::new(target);
    tracker.feed(text.as_bytes());
    tracker.finish()
}

/// Substitutes and scans `blocks` one at a time, stopping at the first hit.
pub fn scan_blocks<R: Read>(blocks: BlockIterator<R>, target: usize) -> io::Result<ScanOutcome> {
    let mut tracker = RunTracker::new(target);
    for block in blocks {
        let mut block = block?;
        substitute_bytes(&mut block);
        if tracker.feed(&block) {
            break;
        }
    }
    log::debug!("block scan stopped after {} bytes", tracker.position());
    Ok(tracker.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io::Cursor;

    /// Reference: first run reaching `target`, or the overall maximum.
    fn naive(text: &str, target: usize) -> (Option<usize>, usize) {
        let bytes = text.as_bytes();
        let mut longest = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != SPACE {
                i += 1;
                continue;
            }
            let start = i;
            while i < bytes.len() && bytes[i] == SPACE {
                i += 1;
            }
            let len = i - start;
            if len >= target {
                return (Some(start), longest.max(target));
            }
            longest = longest.max(len);
        }
        (None, longest)
    }

    #[test]
    fn test_substitute_pi_prefix() {
        assert_eq!(substitute("314159265358979323846"), "31415 265358 7 323846");
    }

    #[test]
    fn test_substitute_only_blanks_nine_and_zero() {
        let digits = "0123456789";
        let replaced = substitute(digits);
        assert_eq!(replaced.len(), digits.len());
        for (d, r) in digits.chars().zip(replaced.chars()) {
            if d == '9' || d == '0' {
                assert_eq!(r, ' ');
            } else {
                assert_eq!(r, d);
            }
        }
    }

    #[test]
    fn test_substitute_bytes_matches_substitute() {
        let mut bytes = b"90210\n".to_vec();
        substitute_bytes(&mut bytes);
        assert_eq!(bytes, b"  21 \n");
    }

    #[test]
    fn test_exact_target_is_found() {
        let outcome = scan("12   34", 3);
        assert_eq!(outcome.hit, Some(RunRecord { start: 2, len: 3 }));
        assert_eq!(outcome.longest, 3);
    }

    #[test]
    fn test_run_at_start_and_end() {
        assert_eq!(scan("  1", 2).hit, Some(RunRecord { start: 0, len: 2 }));
        assert_eq!(scan("1  ", 2).hit, Some(RunRecord { start: 1, len: 2 }));
    }

    #[test]
    fn test_not_found_reports_true_longest() {
        let outcome = scan("1 2  3   ", 4);
        assert!(!outcome.is_found());
        assert_eq!(outcome.longest, 3);
    }

    #[test]
    fn test_early_exit_longest_is_target() {
        // A longer run follows, but the scan stops at the first hit.
        let outcome = scan("1  2     ", 2);
        assert_eq!(outcome.hit, Some(RunRecord { start: 1, len: 2 }));
        assert_eq!(outcome.longest, 2);
    }

    #[test]
    fn test_empty_text_and_zero_target() {
        assert_eq!(scan("", 3), ScanOutcome { hit: None, longest: 0 });
        assert_eq!(scan("123", 0).hit, Some(RunRecord { start: 0, len: 0 }));
    }

    #[test]
    fn test_random_texts_agree_with_reference() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.random_range(0..200);
            let text: String = (0..len)
                .map(|_| if rng.random_bool(0.6) { ' ' } else { '7' })
                .collect();
            let target = rng.random_range(1..8);

            let outcome = scan(&text, target);
            let (start, longest) = naive(&text, target);
            assert_eq!(outcome.hit.map(|h| h.start), start, "text {text:?} target {target}");
            assert_eq!(outcome.longest, longest, "text {text:?} target {target}");
            if let Some(hit) = outcome.hit {
                assert!(hit.len >= target);
                assert!(hit.start + target <= text.len());
            }
        }
    }

    #[test]
    fn test_block_scan_crosses_boundaries() -> io::Result<()> {
        let digits = "1234099009000091";
        let whole = scan(&substitute(digits), 6);
        for block_size in 1..=digits.len() {
            let blocks = BlockIterator::with_block_size(Cursor::new(digits), block_size);
            assert_eq!(scan_blocks(blocks, 6)?, whole, "block size {block_size}");
        }
        assert_eq!(whole.hit, Some(RunRecord { start: 4, len: 6 }));
        Ok(())
    }

    #[test]
    fn test_block_scan_without_hit() -> io::Result<()> {
        let blocks = BlockIterator::new(Cursor::new("31415926535897932384"));
        let outcome = scan_blocks(blocks, 3)?;
        assert_eq!(outcome, ScanOutcome { hit: None, longest: 1 });
        Ok(())
    }
}
