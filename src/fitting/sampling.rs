//! Choice of the trajectory samples fed to the exact-fit strategies

use std::fmt;
use std::str::FromStr;

use crate::error::{IvpError, Result};

/// Which `p+1` samples of a trajectory the interpolating fitters use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// The first `p+1` samples
    #[default]
    Prefix,

    /// `p+1` samples evenly spread from first to last, which requires
    /// `(n−1) mod p = 0`
    Uniform,
}

impl Sampling {
    /// Indices of the selected samples among `n`
    ///
    /// `Prefix` returns fewer than `p+1` indices when the trajectory is too
    /// short, leaving the dimension check to the fitter.
    ///
    /// # Errors
    ///
    /// `Uniform` fails with [`IvpError::Configuration`] when the `n−1`
    /// intervals do not split evenly into `p` parts.
    pub fn indices(&self, n: usize, degree: usize) -> Result<Vec<usize>> {
        match self {
            Sampling::Prefix => Ok((0..n.min(degree + 1)).collect()),
            Sampling::Uniform => uniform_indices(n, degree),
        }
    }

    /// Selected `(x, y)` samples
    pub fn select(&self, points: &[(f64, f64)], degree: usize) -> Result<Vec<(f64, f64)>> {
        Ok(self
            .indices(points.len(), degree)?
            .into_iter()
            .map(|i| points[i])
            .collect())
    }
}

fn uniform_indices(n: usize, degree: usize) -> Result<Vec<usize>> {
    if n == 0 {
        return Err(IvpError::configuration("uniform sampling of an empty trajectory"));
    }
    if degree == 0 {
        return Ok(vec![0]);
    }

    let intervals = n - 1;
    if intervals < degree || intervals % degree != 0 {
        return Err(IvpError::configuration(format!(
            "uniform sampling needs (n-1) divisible by p, got n={}, p={}",
            n, degree
        )));
    }

    let stride = intervals / degree;
    Ok((0..=degree).map(|k| k * stride).collect())
}

impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampling::Prefix => write!(f, "prefix"),
            Sampling::Uniform => write!(f, "uniform"),
        }
    }
}

impl FromStr for Sampling {
    type Err = IvpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" | "first" => Ok(Sampling::Prefix),
            "uniform" => Ok(Sampling::Uniform),
            other => Err(IvpError::configuration(format!(
                "unknown sampling '{}' (expected prefix or uniform)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(Sampling::Prefix.indices(6, 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(Sampling::Prefix.indices(2, 3).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_uniform_divisible() {
        assert_eq!(Sampling::Uniform.indices(9, 4).unwrap(), vec![0, 2, 4, 6, 8]);
        assert_eq!(Sampling::Uniform.indices(5, 4).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(Sampling::Uniform.indices(5, 0).unwrap(), vec![0]);
    }

    #[test]
    fn test_uniform_not_divisible() {
        let err = Sampling::Uniform.indices(6, 3).unwrap_err();
        assert!(err.to_string().contains("n=6, p=3"));
        assert!(Sampling::Uniform.indices(3, 4).is_err());
    }

    #[test]
    fn test_select_points() {
        let points: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, (i * i) as f64)).collect();
        let selected = Sampling::Uniform.select(&points, 2).unwrap();
        assert_eq!(selected, vec![(0.0, 0.0), (2.0, 4.0), (4.0, 16.0)]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("uniform".parse::<Sampling>().unwrap(), Sampling::Uniform);
        assert_eq!("Prefix".parse::<Sampling>().unwrap(), Sampling::Prefix);
        assert!("random".parse::<Sampling>().is_err());
    }
}
