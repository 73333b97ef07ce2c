// src/types.rs

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::Rng;

/// Display numbers drawn when the caller does not fix one.
///
/// Draws are independent and unchecked against other servers on the host,
/// so two concurrent launches can pick the same number. That collision is
/// rare enough to accept; a failed start just retries with a fresh draw.
pub const RANDOM_DISPLAY_RANGE: Range<u32> = 10..10_000;

/// An X display number, rendered as a display address such as `:4821`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(u32);

impl DisplayId {
    pub const fn new(number: u32) -> Self {
        DisplayId(number)
    }

    /// Draw a display uniformly from [`RANDOM_DISPLAY_RANGE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        DisplayId(rng.gen_range(RANDOM_DISPLAY_RANGE))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// The address form expected by `DISPLAY` and by the server's argv.
    pub fn address(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl FromStr for DisplayId {
    type Err = String;

    /// Accepts `":55"` or a bare `"55"`. Host-qualified (`host:1`) and
    /// screen-qualified (`:1.0`) forms are rejected: the server is local.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(':').unwrap_or(trimmed);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!(
                "invalid display '{s}' (expected ':<number>', e.g. ':55')"
            ));
        }

        digits
            .parse::<u32>()
            .map(DisplayId)
            .map_err(|e| format!("invalid display '{s}': {e}"))
    }
}
