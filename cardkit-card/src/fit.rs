//! Description fitting.
//!
//! The card's text box has room for about 25 characters. When the rendered
//! text is longer, the description is cut to its first 22 characters and an
//! ellipsis is appended, so the result is exactly 25 characters long.
//! Characters are Unicode scalar values.

/// Outcome of a fit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitDecision {
    /// The text fits; keep the description as is.
    Fits,
    /// Display this shortened description instead.
    Truncate(String),
    /// The target element could not be inspected.
    TargetMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPolicy {
    /// Longest rendered length that still fits.
    pub threshold: usize,
    /// Characters of the original kept when truncating.
    pub keep: usize,
    pub ellipsis: &'static str,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl FitPolicy {
    pub const STANDARD: FitPolicy = FitPolicy {
        threshold: 25,
        keep: 22,
        ellipsis: "...",
    };

    /// First `keep` characters of `original` followed by the ellipsis.
    pub fn truncate(&self, original: &str) -> String {
        let mut out: String = original.chars().take(self.keep).collect();
        out.push_str(self.ellipsis);
        out
    }

    /// Decide from the measured rendered length (`None` when the target is
    /// missing). The cut is always taken from `original`, not from the
    /// rendered text.
    pub fn decide(&self, measured: Option<usize>, original: &str) -> FitDecision {
        match measured {
            None => FitDecision::TargetMissing,
            Some(len) if len > self.threshold => FitDecision::Truncate(self.truncate(original)),
            Some(_) => FitDecision::Fits,
        }
    }
}
