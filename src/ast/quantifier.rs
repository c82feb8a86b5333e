use super::Token;

/// A quantified token: `inner` repeated between `min` and `max` times.
#[derive(Clone, Debug, PartialEq)]
pub struct Repeat {
    pub inner: Box<Token>,
    pub min: usize,
    /// `None` is unbounded.
    pub max: Option<usize>,
}

impl Repeat {
    /// Number of optional copies after the mandatory ones, or `None` if any
    /// number of further copies is allowed.
    #[must_use]
    pub fn optional_copies(&self) -> Option<usize> {
        self.max.map(|max| max.saturating_sub(self.min))
    }
}
