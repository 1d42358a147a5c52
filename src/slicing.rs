use crate::types::{MetaResult, MetadataError};

/// Slice-range specification for one axis of a data array.
///
/// Mirrors the shorthand forms accepted for per-axis windowing of SAR
/// rasters: a bare step, a `(stop, step)` pair, or a full
/// `(start, stop, step)` triple. Omitted fields default to
/// `start = 0`, `stop = size`, `step = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSpec {
    /// The whole axis, forward with unit step
    #[default]
    Full,
    /// The whole axis with the given step
    Step(i64),
    /// `(stop, step)` with start defaulted to 0
    StopStep(i64, i64),
    /// Fully explicit `(start, stop, step)`
    StartStopStep(i64, i64, i64),
}

impl From<i64> for RangeSpec {
    fn from(step: i64) -> Self {
        RangeSpec::Step(step)
    }
}

impl From<(i64, i64)> for RangeSpec {
    fn from((stop, step): (i64, i64)) -> Self {
        RangeSpec::StopStep(stop, step)
    }
}

impl From<(i64, i64, i64)> for RangeSpec {
    fn from((start, stop, step): (i64, i64, i64)) -> Self {
        RangeSpec::StartStopStep(start, stop, step)
    }
}

/// Validate and normalize a range specification against an axis of
/// length `size`.
///
/// Negative `start`/`stop` indices wrap Python-style (`-1` is the last
/// element). The returned triple has `start` and `stop` resolved to
/// non-negative values; `step` keeps its sign.
///
/// Fails when `start` is outside `(-size, size)`, `stop` is outside
/// `(-size, size]`, `step` is zero or outside `(-size, size)`, or when an
/// explicitly ordered range runs against its step direction.
pub fn validate_range(spec: impl Into<RangeSpec>, size: usize) -> MetaResult<(i64, i64, i64)> {
    let spec = spec.into();
    let siz = size as i64;

    // The direction check only applies when the caller actually expressed
    // an ordering; a bare step means "the whole axis at that stride".
    let (start, stop, step, directed) = match spec {
        RangeSpec::Full => (0, siz, 1, false),
        RangeSpec::Step(step) => (0, siz, step, false),
        RangeSpec::StopStep(stop, step) => (0, stop, step, true),
        RangeSpec::StartStopStep(start, stop, step) => (start, stop, step, true),
    };

    if !(-siz < start && start < siz) {
        return Err(MetadataError::InvalidRange(format!(
            "range {:?} has start {}, which must lie in (-{}, {}) for an axis of length {}",
            spec, start, size, size, size
        )));
    }
    if !(-siz < stop && stop <= siz) {
        return Err(MetadataError::InvalidRange(format!(
            "range {:?} has stop {}, which must lie in (-{}, {}] for an axis of length {}",
            spec, stop, size, size, size
        )));
    }
    if !((0 < step && step < siz) || (-siz < step && step < 0)) {
        return Err(MetadataError::InvalidRange(format!(
            "range {:?} has step {}, which is invalid for an axis of length {}",
            spec, step, size
        )));
    }
    if directed && ((step < 0 && stop > start) || (step > 0 && start > stop)) {
        return Err(MetadataError::InvalidRange(format!(
            "range {:?} has start {}, stop {}, step {}, which is not a consistent traversal",
            spec, start, stop, step
        )));
    }

    // Resolve negative indices after validation
    let start = if start < 0 { start + siz } else { start };
    let stop = if stop < 0 { stop + siz } else { stop };
    Ok((start, stop, step))
}

/// Produce the range that traverses the same interval read backwards.
///
/// Indices are reflected about `size - 1` and the step negated, so the
/// result addresses a reversed copy of the axis. The returned triple is
/// the raw traversal (its stop may be `-1` for a full forward range) and
/// is deliberately not re-normalized.
pub fn reverse_range(spec: impl Into<RangeSpec>, size: usize) -> MetaResult<(i64, i64, i64)> {
    let (start, stop, step) = validate_range(spec, size)?;
    let last = size as i64 - 1;
    Ok((last - start, last - stop, -step))
}
