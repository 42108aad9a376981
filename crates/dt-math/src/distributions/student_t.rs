//! Student's t-distribution.
//!
//! Wraps the `statrs` crate's Student-t implementation.

use dt_core::errors::{Error, Result};
use dt_core::{Probability, Real};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Standard Student's t-distribution with `df` degrees of freedom.
#[derive(Debug, Clone)]
pub struct StudentTDistribution {
    dist: StudentsT,
    df: Real,
}

impl StudentTDistribution {
    /// Create a Student-t distribution with the given degrees of freedom.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `df` is not a positive number.
    pub fn new(df: Real) -> Result<Self> {
        if df.is_nan() || df <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "degrees of freedom must be positive, got {df}"
            )));
        }
        // location=0, scale=1 (standard t-distribution)
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| Error::InvalidArgument(format!("Student-t with df={df}: {e}")))?;
        Ok(Self { dist, df })
    }

    /// Degrees of freedom.
    pub fn df(&self) -> Real {
        self.df
    }

    /// Survival function P(T > x).
    pub fn sf(&self, x: Real) -> Probability {
        self.dist.sf(x)
    }

    /// Two-sided tail probability P(|T| ≥ |t|).
    pub fn two_sided_p(&self, t: Real) -> Probability {
        if t.is_infinite() {
            return 0.0;
        }
        (2.0 * self.sf(t.abs())).min(1.0)
    }
}
