//! Basic statistics accumulator.

use dt_core::Real;
use serde::{Deserialize, Serialize};

/// Incremental statistics accumulator.
///
/// Accumulates samples with Welford's update and reports count, mean,
/// sample variance, standard deviation, min and max.  Non-finite samples are
/// ignored.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    mean: Real,
    m2: Real,
    min: Real,
    max: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        if !x.is_finite() {
            return;
        }
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance (Bessel-corrected).  Returns `None` for fewer than 2
    /// samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count >= 2).then(|| (self.m2 / (self.count as Real - 1.0)).max(0.0))
    }

    /// Sample standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Minimum sample value.  Returns `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  Returns `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }

    /// Snapshot of the accumulated statistics, or `None` when empty.
    pub fn summary(&self) -> Option<Summary> {
        Some(Summary {
            count: self.count,
            mean: self.mean()?,
            std_dev: self.std_dev(),
            min: self.minimum()?,
            max: self.maximum()?,
        })
    }
}

/// Serializable descriptive statistics of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Real,
    /// Sample standard deviation; `None` for a single sample.
    pub std_dev: Option<Real>,
    /// Smallest sample.
    pub min: Real,
    /// Largest sample.
    pub max: Real,
}
