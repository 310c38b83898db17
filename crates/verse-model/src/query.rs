use std::fmt;

/// What a single fetch asks the verse API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseQuery {
    /// An explicit citation such as "John 3:16" or "Psalm 23:1-3".
    Reference(String),
    /// Any verse, picked by the API.
    Random,
}

impl VerseQuery {
    pub fn reference(reference: impl Into<String>) -> Self {
        VerseQuery::Reference(reference.into())
    }

    /// True for an explicit reference that is empty or only whitespace.
    ///
    /// The random sentinel is never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            VerseQuery::Reference(r) => r.trim().is_empty(),
            VerseQuery::Random => false,
        }
    }

    /// Status line shown while the request is in flight.
    pub fn loading_message(&self) -> &'static str {
        match self {
            VerseQuery::Reference(_) => "Loading verse...",
            VerseQuery::Random => "Loading random verse...",
        }
    }
}

impl fmt::Display for VerseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerseQuery::Reference(r) => f.write_str(r),
            VerseQuery::Random => f.write_str("<random>"),
        }
    }
}
