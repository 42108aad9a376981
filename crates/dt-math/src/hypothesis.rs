//! Two-sample hypothesis tests.

use dt_core::errors::Result;
use dt_core::{ensure, Probability, Real};
use serde::{Deserialize, Serialize};

use crate::distributions::StudentTDistribution;
use crate::statistics::Statistics;

/// Significance threshold applied to every test result.
pub const SIGNIFICANCE_LEVEL: Probability = 0.05;

/// Outcome of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// The t statistic (`mean(a) - mean(b)` over its standard error).
    /// Infinite when both samples are constant and their means differ.
    pub t_statistic: Real,
    /// Welch–Satterthwaite degrees of freedom.
    pub degrees_of_freedom: Real,
    /// Two-sided p-value.
    pub p_value: Probability,
    /// `p_value < SIGNIFICANCE_LEVEL`.
    pub significant: bool,
}

/// Welch's unequal-variance two-sample t-test of `a` against `b`.
///
/// When both samples have zero variance the standard error vanishes: equal
/// means give `t = 0, p = 1`, different means give `t = ±∞, p = 0`, and the
/// degrees of freedom fall back to the pooled `n_a + n_b - 2`.
///
/// # Errors
/// [`Error::Precondition`](dt_core::Error::Precondition) if either sample
/// has fewer than two finite values.
pub fn welch_t_test(a: &[Real], b: &[Real]) -> Result<TTestResult> {
    let sa: Statistics = a.iter().copied().collect();
    let sb: Statistics = b.iter().copied().collect();
    let (na, nb) = (sa.samples(), sb.samples());
    ensure!(
        na >= 2 && nb >= 2,
        "t-test needs at least 2 samples per group, got {na} and {nb}"
    );

    let (ma, mb) = (sa.mean().unwrap_or(0.0), sb.mean().unwrap_or(0.0));
    let va = sa.variance().unwrap_or(0.0) / na as Real;
    let vb = sb.variance().unwrap_or(0.0) / nb as Real;
    let se2 = va + vb;
    let diff = ma - mb;

    if se2 == 0.0 {
        let (t, p) = if diff == 0.0 {
            (0.0, 1.0)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TTestResult {
            t_statistic: t,
            degrees_of_freedom: (na + nb - 2) as Real,
            p_value: p,
            significant: p < SIGNIFICANCE_LEVEL,
        });
    }

    let t = diff / se2.sqrt();
    let df = se2 * se2 / (va * va / (na as Real - 1.0) + vb * vb / (nb as Real - 1.0));
    let p = StudentTDistribution::new(df)?.two_sided_p(t);
    Ok(TTestResult {
        t_statistic: t,
        degrees_of_freedom: df,
        p_value: p,
        significant: p < SIGNIFICANCE_LEVEL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use dt_core::Error;

    #[test]
    fn matches_reference_values() {
        // scipy.stats.ttest_ind(a, b, equal_var=False)
        let a = [27.5, 21.0, 19.0, 23.6, 17.0, 17.9, 16.9, 20.1, 21.9, 22.6, 23.1, 19.6, 19.0, 21.7, 21.4];
        let b = [27.1, 22.0, 20.8, 23.4, 23.4, 23.5, 25.8, 22.0, 24.8, 20.2, 21.9, 22.1, 22.9, 20.5, 24.4];
        let r = welch_t_test(&a, &b).unwrap();
        assert_abs_diff_eq!(r.t_statistic, -2.45536, epsilon = 1e-4);
        assert_abs_diff_eq!(r.degrees_of_freedom, 24.98853, epsilon = 1e-4);
        assert_abs_diff_eq!(r.p_value, 0.021378, epsilon = 1e-4);
        assert!(r.significant);
    }

    #[test]
    fn identical_samples_not_significant() {
        let a = [1800.0, 1850.0, 1900.0, 1750.0];
        let r = welch_t_test(&a, &a).unwrap();
        assert_abs_diff_eq!(r.t_statistic, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r.p_value, 1.0, epsilon = 1e-9);
        assert!(!r.significant);
    }

    #[test]
    fn constant_groups_with_different_means() {
        let r = welch_t_test(&[2500.0; 16], &[2000.0; 44]).unwrap();
        assert!(r.t_statistic.is_infinite() && r.t_statistic > 0.0);
        assert_eq!(r.p_value, 0.0);
        assert_eq!(r.degrees_of_freedom, 58.0);
        assert!(r.significant);
    }

    #[test]
    fn constant_groups_with_equal_means() {
        let r = welch_t_test(&[2000.0; 3], &[2000.0; 5]).unwrap();
        assert_eq!(r.t_statistic, 0.0);
        assert_eq!(r.p_value, 1.0);
        assert!(!r.significant);
    }

    #[test]
    fn too_few_samples() {
        assert!(matches!(
            welch_t_test(&[1.0], &[1.0, 2.0]),
            Err(Error::Precondition(_))
        ));
        assert!(welch_t_test(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }
}
