use log::debug;

use crate::arithmetic;
use crate::error::Result;

/// Extra decimal places computed beyond what is returned, so truncation
/// error in the last few places never reaches a returned digit.
pub const GUARD_DIGITS: usize = 16;

/// Supplies prefixes of pi's digit string (leading `3` included, no point).
pub trait DigitSource {
    /// Returns the first `n` digits. `digits(n)` is a prefix of `digits(m)` for `n < m`.
    fn digits(&mut self, n: usize) -> Result<String>;
}

/// Pi digits from the Chudnovsky series.
///
/// The last expansion is cached. Growing requests are served by computing
/// at least twice the cached length, capped at `ceiling`, so a chunked
/// search recomputes the series a logarithmic number of times.
#[derive(Debug, Default)]
pub struct PiDigits {
    cache: String,
    ceiling: Option<usize>,
}

impl PiDigits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never precomputes past `ceiling` digits unless a single request asks for more.
    pub fn with_ceiling(ceiling: usize) -> Self {
        PiDigits {
            cache: String::new(),
            ceiling: Some(ceiling),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn grow_to(&mut self, n: usize) -> Result<()> {
        let mut want = n.max(self.cache.len().saturating_mul(2));
        if let Some(ceiling) = self.ceiling {
            want = want.min(ceiling.max(n));
        }
        debug!("expanding pi to {} digits (requested {})", want, n);

        let mut expansion = arithmetic::pi_string(want.saturating_add(GUARD_DIGITS))?;
        expansion.truncate(want);
        self.cache = expansion;
        Ok(())
    }
}

impl DigitSource for PiDigits {
    fn digits(&mut self, n: usize) -> Result<String> {
        if n > self.cache.len() {
            self.grow_to(n)?;
        }
        Ok(self.cache[..n].to_owned())
    }
}
