//! Structured errors for container operations.

/// Errors reported by [`Lariat`](crate::Lariat) operations.
///
/// Every error is reported synchronously at the offending call. A failed
/// operation makes no structural change: counts, links, and the element
/// sequence are exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A new node could not be allocated. The container is unchanged.
    #[error("unable to allocate a new node")]
    OutOfMemory,

    /// The requested logical position is out of range.
    #[error("index {index} out of range (len {len})")]
    BadIndex { index: usize, len: usize },

    /// A boundary operation was requested on an empty container.
    #[error("container is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, Error>;
