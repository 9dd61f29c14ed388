use crate::error::KpiError;

/// Below this many samples every quartile band is the whole sample.
const MIN_QUARTILE_SAMPLES: usize = 3;
/// Outer bands hold `floor(n / 4)` samples each.
const QUARTILE_BAND_DIVISOR: usize = 4;
/// The median band holds `ceil(n / 2)` samples.
const MEDIAN_BAND_DIVISOR: usize = 2;

/// Band means of a runtime sample. A band without samples has no mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quartiles {
    pub first: Option<i64>,
    pub median: Option<i64>,
    pub third: Option<i64>,
}

/// Estimates quartiles as the rounded mean of contiguous bands of the sorted sample.
///
/// With `n >= 3` samples, `q = floor(n / 4)` and `m = ceil(n / 2)`: the first
/// quartile averages `[0, q)`, the median `[q, q + m)`, the third quartile
/// `[n - q, n)`. Smaller samples use the whole sample for all three.
#[must_use]
pub fn quartiles(runtimes: &[i64]) -> Quartiles {
    let mut sorted = runtimes.to_vec();
    sorted.sort();
    let count = sorted.len();

    let (first_band, median_band, third_band) = if count >= MIN_QUARTILE_SAMPLES {
        let outer = count.checked_div(QUARTILE_BAND_DIVISOR).unwrap_or(0);
        let median = count.div_ceil(MEDIAN_BAND_DIVISOR);
        (
            sorted.get(..outer),
            sorted.get(outer..outer.saturating_add(median)),
            sorted.get(count.saturating_sub(outer)..),
        )
    } else {
        let whole = Some(sorted.as_slice());
        (whole, whole, whole)
    };

    Quartiles {
        first: first_band.and_then(arithmetic_mean),
        median: median_band.and_then(arithmetic_mean),
        third: third_band.and_then(arithmetic_mean),
    }
}

/// Mean of `values` rounded half up, `None` for an empty slice.
#[must_use]
pub fn arithmetic_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(0_i128, |acc, value| acc.checked_add(i128::from(*value)))?;
    let count = i128::try_from(values.len()).ok()?;

    // floor(sum / count + 1/2) == floor((2 * sum + count) / (2 * count))
    let numerator = sum.checked_mul(2)?.checked_add(count)?;
    let denominator = count.checked_mul(2)?;
    let mean = numerator.checked_div_euclid(denominator)?;
    i64::try_from(mean).ok()
}

/// Aggregate runtime statistics of one flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeStatistics {
    pub min: i64,
    pub max: i64,
    pub mean: i64,
    pub quartiles: Quartiles,
}

impl RuntimeStatistics {
    /// # Errors
    ///
    /// Returns [`KpiError::EmptyRuntimeSample`] when `runtimes` is empty.
    pub fn from_runtimes(runtimes: &[i64]) -> Result<Self, KpiError> {
        let min = runtimes.iter().min().copied();
        let max = runtimes.iter().max().copied();
        let mean = arithmetic_mean(runtimes);
        match (min, max, mean) {
            (Some(min), Some(max), Some(mean)) => Ok(Self {
                min,
                max,
                mean,
                quartiles: quartiles(runtimes),
            }),
            (_, _, _) => Err(KpiError::EmptyRuntimeSample),
        }
    }
}
