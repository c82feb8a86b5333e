//! Bracket expression byte sets.

use std::ops::Bound;

/// The error type used by [`CharSet`].
#[derive(Debug, Eq, thiserror::Error, PartialEq)]
pub enum Error {
    /// An invalid range was given.
    #[error("invalid range ('{}' > '{}')", _0.escape_ascii(), _1.escape_ascii())]
    Range(u8, u8),
}

/// A set of bytes matched by a single bracket expression.
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    bytes: [bool; 256],
}

impl Default for CharSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|b| b.escape_ascii().to_string()))
            .finish()
    }
}

impl CharSet {
    /// Creates a new empty character set.
    #[must_use]
    pub const fn new() -> Self {
        CharSet {
            bytes: [false; 256],
        }
    }

    /// Adds the given byte to the character set.
    #[inline]
    pub const fn add_byte(&mut self, b: u8) {
        self.bytes[b as usize] = true;
    }

    /// Adds an inclusive range of bytes to the character set.
    ///
    /// # Errors
    ///
    /// If the start of the range is after the end of the range, an [`Error`]
    /// is returned.
    pub fn add_range(&mut self, start: u8, end: u8) -> Result<(), Error> {
        if start <= end {
            self.bytes[to_usize(start..=end)].fill(true);
            Ok(())
        } else {
            Err(Error::Range(start, end))
        }
    }

    /// Returns `true` if the character set contains the given byte.
    #[inline]
    #[must_use]
    pub const fn contains(&self, b: u8) -> bool {
        self.bytes[b as usize]
    }

    /// Inverts the character set.
    #[inline]
    pub fn invert(&mut self) {
        for b in &mut self.bytes {
            *b = !*b;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.bytes.contains(&true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.iter().filter(|&&b| b).count()
    }

    /// Iterates over the bytes in the set in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }
}

impl FromIterator<u8> for CharSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = CharSet::new();
        for b in iter {
            set.add_byte(b);
        }
        set
    }
}

#[inline]
fn to_usize<R: std::ops::RangeBounds<u8>>(r: R) -> (Bound<usize>, Bound<usize>) {
    (
        r.start_bound().map(|n| usize::from(*n)),
        r.end_bound().map(|n| usize::from(*n)),
    )
}
