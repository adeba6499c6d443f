// ============================================================================
// SPEED RANGES
// ============================================================================

use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::units::{convert_speed, SpeedUnit, BEAUFORT_MPS};
use crate::Color;

/// Upper limit on generated buckets per step/max pair.
pub const MAX_STEPPED_BUCKETS: usize = 1000;

const BEAUFORT_COLORS: [&str; 13] = [
    "#FFFFFF", "#CCFFFF", "#99FFCC", "#99FF99", "#99FF66", "#99FF00", "#CCFF00", "#FFFF00",
    "#FFCC00", "#FF9900", "#FF6600", "#FF3300", "#FF0000",
];

/// Half-open bucket `[min_speed, max_speed)`. The last bucket of a list is
/// unbounded and carries [`SpeedRange::UNBOUNDED`] as its maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRange {
    pub index: usize,
    pub min_speed: f64,
    pub max_speed: f64,
    pub color: String,
}

impl SpeedRange {
    pub const UNBOUNDED: f64 = -1.0;

    pub fn new(index: usize, min_speed: f64, max_speed: f64, color: impl Into<String>) -> Self {
        Self {
            index,
            min_speed,
            max_speed,
            color: color.into(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_speed == Self::UNBOUNDED
    }

    pub fn contains(&self, speed: f64) -> bool {
        speed >= self.min_speed && (self.is_unbounded() || speed < self.max_speed)
    }
}

/// One `(from_value, color)` entry of an explicit speed range list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeedRangeThreshold {
    pub from_value: f64,
    pub color: String,
}

/// A bucket generation rule that applies once the rolling average reaches
/// `average_above`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DynamicSpeedRange {
    pub average_above: f64,
    pub step: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeedRangeMode {
    Beaufort,
    SteppedMax { step: f64, max: f64 },
    Explicit(Vec<SpeedRangeThreshold>),
    /// Sorted ascending by `average_above`, first entry is the zero floor.
    Dynamic(Vec<DynamicSpeedRange>),
}

/// The four possible bucket sources of one entity, after inheritance from the
/// card-level defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedRangeSources {
    /// `None` when neither the entity nor the card mentions Beaufort.
    pub beaufort: Option<bool>,
    pub step: Option<f64>,
    pub max: Option<f64>,
    pub speed_ranges: Vec<SpeedRangeThreshold>,
    pub dynamic_speed_ranges: Vec<DynamicSpeedRange>,
}

fn check_positive(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ConfigError> {
    match value {
        Some(v) if v.is_nan() || v <= 0.0 => Err(ConfigError::NotPositive { field, value: v }),
        other => Ok(other),
    }
}

fn check_bucket_count(step: f64, max: f64) -> Result<(), ConfigError> {
    let ratio = max / step;
    if !ratio.is_finite() || ratio > MAX_STEPPED_BUCKETS as f64 {
        return Err(ConfigError::TooManySpeedRanges {
            step,
            max,
            limit: MAX_STEPPED_BUCKETS,
        });
    }
    Ok(())
}

/// Validates the collected sources and picks the single active mode.
///
/// An explicit `beaufort: true` next to any numeric override is a conflict,
/// whatever the override's value. When nothing at all is configured the
/// Beaufort scale is used; an explicit `beaufort: false` without any other
/// source yields an empty explicit list (no coloring).
pub fn resolve_mode(sources: SpeedRangeSources) -> Result<SpeedRangeMode, ConfigError> {
    let step = check_positive("speed_range_step", sources.step)?;
    let max = check_positive("speed_range_max", sources.max)?;
    let dynamic = resolve_dynamic(&sources.dynamic_speed_ranges)?;

    let has_step_max = step.is_some() || max.is_some();
    let has_explicit = !sources.speed_ranges.is_empty();
    let has_dynamic = !dynamic.is_empty();

    if sources.beaufort == Some(true) && (has_step_max || has_explicit || has_dynamic) {
        return Err(ConfigError::BeaufortWithOverrides);
    }
    if step.is_some() != max.is_some() {
        return Err(ConfigError::IncompleteStepMax { step, max });
    }
    if let (Some(step), Some(max)) = (step, max) {
        check_bucket_count(step, max)?;
    }
    let option_count = [has_step_max, has_explicit, has_dynamic]
        .iter()
        .filter(|set| **set)
        .count();
    if option_count > 1 {
        return Err(ConfigError::ConflictingSpeedRangeModes);
    }

    let mode = match (step, max) {
        (Some(step), Some(max)) => SpeedRangeMode::SteppedMax { step, max },
        _ if has_explicit => SpeedRangeMode::Explicit(sources.speed_ranges),
        _ if has_dynamic => SpeedRangeMode::Dynamic(dynamic),
        _ if sources.beaufort == Some(false) => SpeedRangeMode::Explicit(Vec::new()),
        _ => SpeedRangeMode::Beaufort,
    };
    debug!(?mode, "resolved speed range mode");
    Ok(mode)
}

/// Sorts and validates a dynamic rule table. An empty table stays empty.
pub fn resolve_dynamic(
    ranges: &[DynamicSpeedRange],
) -> Result<Vec<DynamicSpeedRange>, ConfigError> {
    if ranges.is_empty() {
        return Ok(Vec::new());
    }
    let mut sorted = ranges.to_vec();
    sorted.sort_by(|a, b| a.average_above.total_cmp(&b.average_above));

    for range in &sorted {
        if range.average_above.is_nan() || range.average_above < 0.0 {
            return Err(ConfigError::NegativeAverageAbove(range.average_above));
        }
    }
    if sorted[0].average_above != 0.0 {
        return Err(ConfigError::MissingDynamicFloor(sorted[0].average_above));
    }
    for range in &sorted {
        check_positive("dynamic step", Some(range.step))?;
        check_positive("dynamic max", Some(range.max))?;
        check_bucket_count(range.step, range.max)?;
    }
    Ok(sorted)
}

/// Picks the last rule whose `average_above` does not exceed the rolling
/// average. Averages below zero (or NaN) fall back to the floor rule.
pub fn select_dynamic(sorted: &[DynamicSpeedRange], rolling_average: f64) -> Option<&DynamicSpeedRange> {
    sorted
        .iter()
        .rev()
        .find(|range| range.average_above <= rolling_average)
        .or_else(|| sorted.first())
}

/// Buckets `[0,step), [step,2*step), ...` up to `max`, then `[max, unbounded)`.
pub fn stepped_ranges(step: f64, max: f64) -> Vec<SpeedRange> {
    let bounded = ((max / step) - 1e-9)
        .ceil()
        .clamp(0.0, MAX_STEPPED_BUCKETS as f64) as usize;
    let total = bounded + 1;
    let mut ranges: Vec<SpeedRange> = (0..bounded)
        .map(|i| {
            let from = step_bound(i, step);
            let to = if i + 1 == bounded { max } else { step_bound(i + 1, step) };
            SpeedRange::new(i, from, to, Color::gradient(i, total).to_css())
        })
        .collect();
    ranges.push(SpeedRange::new(
        bounded,
        max,
        SpeedRange::UNBOUNDED,
        Color::gradient(bounded, total).to_css(),
    ));
    ranges
}

/// Sorts the thresholds and chains them into contiguous buckets.
pub fn explicit_ranges(thresholds: &[SpeedRangeThreshold]) -> Vec<SpeedRange> {
    let mut sorted = thresholds.to_vec();
    sorted.sort_by(|a, b| a.from_value.total_cmp(&b.from_value));
    sorted
        .iter()
        .enumerate()
        .map(|(i, threshold)| {
            let max_speed = sorted
                .get(i + 1)
                .map_or(SpeedRange::UNBOUNDED, |next| next.from_value);
            SpeedRange::new(i, threshold.from_value, max_speed, threshold.color.clone())
        })
        .collect()
}

/// The 13 Beaufort classes with bounds expressed in `unit`.
pub fn beaufort_ranges(unit: SpeedUnit) -> Vec<SpeedRange> {
    let bounds: Vec<f64> = BEAUFORT_MPS
        .iter()
        .map(|&mps| {
            let converted = convert_speed(mps, SpeedUnit::Mps, unit).unwrap_or(mps);
            (converted * 10.0).round() / 10.0
        })
        .collect();
    bounds
        .iter()
        .enumerate()
        .map(|(i, &min_speed)| {
            let max_speed = bounds.get(i + 1).copied().unwrap_or(SpeedRange::UNBOUNDED);
            SpeedRange::new(i, min_speed, max_speed, BEAUFORT_COLORS[i])
        })
        .collect()
}

/// `index * step`, snapped to six decimals only when that removes float
/// noise such as `0.30000000000000004`.
fn step_bound(index: usize, step: f64) -> f64 {
    let value = index as f64 * step;
    let snapped = (value * 1e6).round() / 1e6;
    if (snapped - value).abs() <= step * 1e-12 {
        snapped
    } else {
        value
    }
}

impl SpeedRangeMode {
    /// Bucket list for one render pass. `rolling_average` only matters for
    /// the dynamic mode; without one the floor rule applies.
    pub fn ranges(&self, unit: SpeedUnit, rolling_average: Option<f64>) -> Vec<SpeedRange> {
        match self {
            Self::Beaufort => beaufort_ranges(unit),
            Self::SteppedMax { step, max } => stepped_ranges(*step, *max),
            Self::Explicit(thresholds) => explicit_ranges(thresholds),
            Self::Dynamic(rules) => {
                match select_dynamic(rules, rolling_average.unwrap_or(0.0)) {
                    Some(rule) => {
                        trace!(average = ?rolling_average, step = rule.step, max = rule.max, "selected dynamic speed rule");
                        stepped_ranges(rule.step, rule.max)
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Per-entity bucket provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRangeService {
    mode: SpeedRangeMode,
    unit: SpeedUnit,
}

impl SpeedRangeService {
    pub fn new(mode: SpeedRangeMode, unit: SpeedUnit) -> Self {
        Self { mode, unit }
    }

    pub fn mode(&self) -> &SpeedRangeMode {
        &self.mode
    }

    pub fn speed_ranges(&self, rolling_average: Option<f64>) -> Vec<SpeedRange> {
        self.mode.ranges(self.unit, rolling_average)
    }

    /// Bucket a reading falls into, if any.
    pub fn classify<'a>(ranges: &'a [SpeedRange], speed: f64) -> Option<&'a SpeedRange> {
        ranges.iter().find(|range| range.contains(speed))
    }
}

/// Mean of the recent samples, ignoring non-finite readings.
pub fn rolling_average(samples: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = samples.iter().copied().filter(|s| s.is_finite()).collect();
    if finite.is_empty() {
        None
    } else {
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(from_value: f64, color: &str) -> SpeedRangeThreshold {
        SpeedRangeThreshold {
            from_value,
            color: color.to_string(),
        }
    }

    fn dynamic(average_above: f64, step: f64, max: f64) -> DynamicSpeedRange {
        DynamicSpeedRange {
            average_above,
            step,
            max,
        }
    }

    #[test]
    fn test_explicit_ranges_sorted_and_chained() {
        let ranges = explicit_ranges(&[
            threshold(10.0, "red"),
            threshold(0.0, "white"),
            threshold(4.0, "green"),
        ]);
        let bounds: Vec<(f64, f64)> = ranges.iter().map(|r| (r.min_speed, r.max_speed)).collect();
        assert_eq!(bounds, vec![(0.0, 4.0), (4.0, 10.0), (10.0, -1.0)]);
        assert_eq!(ranges[2].color, "red");
        assert_eq!(ranges[1].index, 1);
    }

    #[test]
    fn test_explicit_first_bucket_may_start_above_zero() {
        let ranges = explicit_ranges(&[threshold(3.0, "a"), threshold(7.0, "b")]);
        assert_eq!(ranges[0].min_speed, 3.0);
        assert!(ranges[1].is_unbounded());
    }

    #[test]
    fn test_stepped_ranges() {
        let ranges = stepped_ranges(5.0, 40.0);
        assert_eq!(ranges.len(), 9);
        assert_eq!((ranges[0].min_speed, ranges[0].max_speed), (0.0, 5.0));
        assert_eq!((ranges[7].min_speed, ranges[7].max_speed), (35.0, 40.0));
        assert_eq!((ranges[8].min_speed, ranges[8].max_speed), (40.0, -1.0));
    }

    #[test]
    fn test_stepped_ranges_uneven_max() {
        let ranges = stepped_ranges(3.0, 10.0);
        let bounds: Vec<(f64, f64)> = ranges.iter().map(|r| (r.min_speed, r.max_speed)).collect();
        assert_eq!(
            bounds,
            vec![(0.0, 3.0), (3.0, 6.0), (6.0, 9.0), (9.0, 10.0), (10.0, -1.0)]
        );
    }

    #[test]
    fn test_tiny_steps_stay_contiguous() {
        let ranges = stepped_ranges(1e-7, 1e-6);
        assert_eq!(ranges.len(), 11);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].max_speed, pair[1].min_speed);
            assert!(pair[0].min_speed < pair[0].max_speed);
        }
        assert_eq!(ranges[9].max_speed, 1e-6);
    }

    #[test]
    fn test_step_noise_snapped() {
        let ranges = stepped_ranges(0.1, 0.5);
        assert_eq!(ranges[3].min_speed, 0.3);
    }

    #[test]
    fn test_bucket_count_capped() {
        let huge = SpeedRangeSources {
            step: Some(1e-300),
            max: Some(1e300),
            ..Default::default()
        };
        assert!(matches!(
            resolve_mode(huge),
            Err(ConfigError::TooManySpeedRanges { .. })
        ));
        assert!(matches!(
            resolve_dynamic(&[dynamic(0.0, 0.001, 100.0)]),
            Err(ConfigError::TooManySpeedRanges { .. })
        ));
        let at_limit = SpeedRangeSources {
            step: Some(1.0),
            max: Some(MAX_STEPPED_BUCKETS as f64),
            ..Default::default()
        };
        assert!(resolve_mode(at_limit).is_ok());

        let ranges = stepped_ranges(1e-300, 1e300);
        assert_eq!(ranges.len(), MAX_STEPPED_BUCKETS + 1);
        assert!(ranges[MAX_STEPPED_BUCKETS].is_unbounded());
    }

    #[test]
    fn test_beaufort_ranges_have_13_buckets() {
        let ranges = beaufort_ranges(SpeedUnit::Mps);
        assert_eq!(ranges.len(), 13);
        assert_eq!(ranges[0].min_speed, 0.0);
        assert_eq!(ranges[12].min_speed, 32.7);
        assert!(ranges[12].is_unbounded());
        let kph = beaufort_ranges(SpeedUnit::Kph);
        assert_eq!(kph[1].min_speed, 1.8);
    }

    #[test]
    fn test_dynamic_selection() {
        let rules = resolve_dynamic(&[dynamic(10.0, 5.0, 40.0), dynamic(0.0, 2.0, 20.0)]).unwrap();
        assert_eq!(select_dynamic(&rules, 12.0), Some(&rules[1]));
        assert_eq!(select_dynamic(&rules, 10.0), Some(&rules[1]));
        assert_eq!(select_dynamic(&rules, 9.9), Some(&rules[0]));
        assert_eq!(select_dynamic(&rules, -3.0), Some(&rules[0]));

        let ranges = SpeedRangeMode::Dynamic(rules).ranges(SpeedUnit::Mps, Some(12.0));
        assert_eq!(ranges.len(), 9);
        assert_eq!((ranges[7].min_speed, ranges[7].max_speed), (35.0, 40.0));
        assert_eq!((ranges[8].min_speed, ranges[8].max_speed), (40.0, -1.0));
    }

    #[test]
    fn test_dynamic_requires_floor() {
        let err = resolve_dynamic(&[dynamic(5.0, 2.0, 20.0)]).unwrap_err();
        assert_eq!(err, ConfigError::MissingDynamicFloor(5.0));
        assert!(resolve_dynamic(&[dynamic(0.0, 0.0, 20.0)]).is_err());
        assert!(resolve_dynamic(&[dynamic(0.0, 2.0, -1.0)]).is_err());
        assert!(resolve_dynamic(&[dynamic(0.0, 2.0, 20.0), dynamic(-1.0, 1.0, 5.0)]).is_err());
    }

    #[test]
    fn test_mode_conflicts() {
        let both = SpeedRangeSources {
            step: Some(2.0),
            max: Some(20.0),
            speed_ranges: vec![threshold(0.0, "a")],
            ..Default::default()
        };
        assert_eq!(resolve_mode(both), Err(ConfigError::ConflictingSpeedRangeModes));

        let beaufort = SpeedRangeSources {
            beaufort: Some(true),
            dynamic_speed_ranges: vec![dynamic(0.0, 1.0, 10.0)],
            ..Default::default()
        };
        assert_eq!(resolve_mode(beaufort), Err(ConfigError::BeaufortWithOverrides));

        let lone_step = SpeedRangeSources {
            step: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_mode(lone_step),
            Err(ConfigError::IncompleteStepMax { .. })
        ));
    }

    #[test]
    fn test_mode_defaults() {
        assert_eq!(resolve_mode(SpeedRangeSources::default()), Ok(SpeedRangeMode::Beaufort));
        let off = SpeedRangeSources {
            beaufort: Some(false),
            ..Default::default()
        };
        let mode = resolve_mode(off).unwrap();
        assert!(mode.ranges(SpeedUnit::Mps, None).is_empty());
    }

    #[test]
    fn test_classify_and_average() {
        let ranges = stepped_ranges(2.0, 6.0);
        assert_eq!(SpeedRangeService::classify(&ranges, 3.0).map(|r| r.index), Some(1));
        assert_eq!(SpeedRangeService::classify(&ranges, 60.0).map(|r| r.index), Some(3));
        assert_eq!(rolling_average(&[2.0, 4.0, f64::NAN]), Some(3.0));
        assert_eq!(rolling_average(&[]), None);
    }
}
