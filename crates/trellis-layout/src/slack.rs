//! Rounding with a carried remainder.

/// Rounds a sequence of exact sizes to whole pixels, carrying each rounding
/// error into the next value so the rounded sum tracks the exact sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Slack(f64);

impl Slack {
    /// Round `exact` plus the carried remainder, half to even.
    pub fn round(&mut self, exact: f64) -> i32 {
        let exact = exact + self.0;
        let rounded = exact.round_ties_even();
        self.0 = exact - rounded;
        rounded as i32
    }
}

/// Clamp a wide total into pixel range.
pub(crate) fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
