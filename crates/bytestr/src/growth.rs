//! Buffer growth policies

/// How a buffer grows when it has to be reallocated.
///
/// The policy is chosen per call rather than stored in the string, so the
/// same string may be grown tightly at one call site and amortized at
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Growth {
    /// Allocate twice the required length to make repeated appends cheap.
    #[default]
    Amortized,

    /// Allocate exactly the required length. Used for strings that rarely
    /// change, such as names and anchors.
    Tight,
}

impl Growth {
    /// Capacity to allocate for a buffer that must hold `len` bytes.
    ///
    /// Saturates instead of overflowing; such a request fails at allocation
    /// time.
    pub fn capacity_for(self, len: usize) -> usize {
        match self {
            Growth::Amortized => len.saturating_mul(2),
            Growth::Tight => len,
        }
    }
}
