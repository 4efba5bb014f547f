//! Temporal bounds accumulator

use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Earliest and latest instant observed over a set of timestamps
///
/// `start` and `end` are independently optional: both absent is empty, both present
/// is a range, and a single side is a legal one-sided bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporalBounds {
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TemporalBounds {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new(start: Option<OffsetDateTime>, end: Option<OffsetDateTime>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    #[inline]
    pub fn is_range(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    #[inline]
    pub fn start(&self) -> Option<OffsetDateTime> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<OffsetDateTime> {
        self.end
    }

    #[inline]
    pub fn set_start(&mut self, start: Option<OffsetDateTime>) {
        self.start = start;
    }

    #[inline]
    pub fn set_end(&mut self, end: Option<OffsetDateTime>) {
        self.end = end;
    }

    /// Widen the bounds to include `instant`
    ///
    /// On empty bounds this yields a zero-width range.
    pub fn add_instant(&mut self, instant: OffsetDateTime) {
        self.start = Some(self.start.map_or(instant, |start| start.min(instant)));
        self.end = Some(self.end.map_or(instant, |end| end.max(instant)));
    }

    /// Earlier of the starts and later of the ends, each side taken from whichever
    /// operand has it
    pub fn merge(&self, other: &TemporalBounds) -> TemporalBounds {
        TemporalBounds {
            start: pick(self.start, other.start, OffsetDateTime::min),
            end: pick(self.end, other.end, OffsetDateTime::max),
        }
    }

    #[inline]
    pub fn add_bounds(&mut self, other: &TemporalBounds) {
        *self = self.merge(other);
    }

    /// Elapsed time between start and end, if both are present
    pub fn duration(&self) -> Option<Duration> {
        Some(self.end? - self.start?)
    }
}

#[inline]
fn pick(
    a: Option<OffsetDateTime>,
    b: Option<OffsetDateTime>,
    choose: fn(OffsetDateTime, OffsetDateTime) -> OffsetDateTime,
) -> Option<OffsetDateTime> {
    match (a, b) {
        (Some(a), Some(b)) => Some(choose(a, b)),
        (a, b) => a.or(b),
    }
}

impl FromIterator<OffsetDateTime> for TemporalBounds {
    fn from_iter<I: IntoIterator<Item = OffsetDateTime>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for instant in iter {
            bounds.add_instant(instant);
        }
        bounds
    }
}

impl fmt::Display for TemporalBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeBounds(")?;
        write_instant(f, self.start)?;
        write!(f, " to ")?;
        write_instant(f, self.end)?;
        write!(f, ")")
    }
}

fn write_instant(f: &mut fmt::Formatter<'_>, instant: Option<OffsetDateTime>) -> fmt::Result {
    match instant {
        // RFC 3339 has no room for negative years or sub-minute offsets
        Some(instant) => match instant.format(&Rfc3339) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{instant}"),
        },
        None => f.write_str("?"),
    }
}
