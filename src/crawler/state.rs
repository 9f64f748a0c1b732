//! Per-link pipeline states
//!
//! Every discovered link walks forward through these states and stops at a
//! terminal one; no link ever moves back.
use std::fmt;

/// Where a single discovered link is in the ingestion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    // ===== Active States =====
    /// Link was found on the listing page
    Discovered,

    /// Post page is being rendered and read
    Extracting,

    /// Raw post record is available
    Extracted,

    /// Content has been cleaned and the record stamped
    Cleaned,

    // ===== Terminal States =====
    /// Link is not a post link; never rendered
    FilteredOut,

    /// Rendering or resolution failed
    ExtractFailed,

    /// New post stored
    Persisted,

    /// A post with the same title is already stored
    DuplicateSkipped,

    /// Title or content was missing
    EmptySkipped,

    /// The store rejected the write
    StoreFailed,
}

impl LinkState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Discovered | Self::Extracting | Self::Extracted | Self::Cleaned
        )
    }

    /// Returns true if a link in this state may move to `next`
    pub fn can_transition_to(&self, next: LinkState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::FilteredOut)
                | (Self::Discovered, Self::Extracting)
                | (Self::Discovered, Self::ExtractFailed)
                | (Self::Extracting, Self::ExtractFailed)
                | (Self::Extracting, Self::Extracted)
                | (Self::Extracted, Self::Cleaned)
                | (Self::Cleaned, Self::Persisted)
                | (Self::Cleaned, Self::DuplicateSkipped)
                | (Self::Cleaned, Self::EmptySkipped)
                | (Self::Cleaned, Self::StoreFailed)
        )
    }

    /// Moves to `next`, which must be a legal transition
    pub fn advance(self, next: LinkState) -> LinkState {
        debug_assert!(
            self.can_transition_to(next),
            "invalid link transition: {} -> {}",
            self,
            next
        );
        next
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Extracting => "extracting",
            Self::Extracted => "extracted",
            Self::Cleaned => "cleaned",
            Self::FilteredOut => "filtered_out",
            Self::ExtractFailed => "extract_failed",
            Self::Persisted => "persisted",
            Self::DuplicateSkipped => "duplicate_skipped",
            Self::EmptySkipped => "empty_skipped",
            Self::StoreFailed => "store_failed",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
