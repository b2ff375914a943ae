//! Similarity metrics used to rank entries against a query.
//!
//! Every metric declares its [`ScoreOrder`], which tells the index whether
//! to keep the smallest or the largest scores during a top-k scan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::vector::{check_dimensions, dot_product, magnitude, max_abs, squared_distance};

/// Which direction of score counts as "more similar".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Distance-style: smaller scores are better.
    LowerIsBetter,
    /// Similarity-style: larger scores are better.
    HigherIsBetter,
}

/// A scoring function between two vectors.
pub trait SimilarityMetric {
    /// Scores `a` against `b`. Fails with [`Error::DimensionMismatch`]
    /// when the operands differ in length.
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<f64>;

    fn score_order(&self) -> ScoreOrder;

    fn is_lower_better(&self) -> bool {
        self.score_order() == ScoreOrder::LowerIsBetter
    }
}

/// `sqrt(sum((a[i] - b[i])^2))`
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl SimilarityMetric for EuclideanDistance {
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        Ok(squared_distance(a, b)?.sqrt())
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::LowerIsBetter
    }
}

/// `a.b / (||a|| * ||b||)`, defined as `0.0` when either side has zero magnitude.
///
/// Both operands are divided by their largest absolute component first, so
/// huge but finite components do not overflow the norms.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityMetric for CosineSimilarity {
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dimensions(a, b)?;

        let scale_a = max_abs(a);
        let scale_b = max_abs(b);
        if scale_a == 0.0 || scale_b == 0.0 {
            return Ok(0.0);
        }

        let a: Vec<f64> = a.iter().map(|x| x / scale_a).collect();
        let b: Vec<f64> = b.iter().map(|x| x / scale_b).collect();
        Ok(dot_product(&a, &b)? / (magnitude(&a) * magnitude(&b)))
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }
}

/// Raw `sum(a[i] * b[i])`, unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProductSimilarity;

impl SimilarityMetric for DotProductSimilarity {
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        dot_product(a, b)
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }
}

/// Names the built-in metrics so they can be picked from config or the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Euclidean,
    #[default]
    Cosine,
    Dot,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => "euclidean",
            MetricKind::Cosine => "cosine",
            MetricKind::Dot => "dot",
        }
    }

    fn metric(&self) -> &'static dyn SimilarityMetric {
        match self {
            MetricKind::Euclidean => &EuclideanDistance,
            MetricKind::Cosine => &CosineSimilarity,
            MetricKind::Dot => &DotProductSimilarity,
        }
    }
}

impl SimilarityMetric for MetricKind {
    fn compute(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        self.metric().compute(a, b)
    }

    fn score_order(&self) -> ScoreOrder {
        self.metric().score_order()
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(MetricKind::Euclidean),
            "cosine" | "cos" => Ok(MetricKind::Cosine),
            "dot" | "dotproduct" | "dot_product" => Ok(MetricKind::Dot),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod metric_test {
    use super::*;

    // ========== Euclidean Tests ==========

    #[test]
    fn test_euclidean_basic() {
        // sqrt(3^2 + 4^2) = 5
        let d = EuclideanDistance.compute(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_self_distance_is_zero() {
        let a = [0.3, -1.7, 42.0];
        assert_eq!(EuclideanDistance.compute(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_euclidean_dimension_mismatch() {
        let result = EuclideanDistance.compute(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert_eq!(result, Err(Error::DimensionMismatch { expected: 3, actual: 2 }));
    }

    // ========== Cosine Tests ==========

    #[test]
    fn test_cosine_parallel_and_opposite() {
        let same = CosineSimilarity.compute(&[1.0, 2.0], &[2.0, 4.0]).unwrap();
        assert!((same - 1.0).abs() < 1e-12);

        let opposite = CosineSimilarity.compute(&[1.0, 0.0], &[-3.0, 0.0]).unwrap();
        assert!((opposite + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let s = CosineSimilarity.compute(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_cosine_diagonal() {
        // [1,0,0] vs [1,1,0] is 1/sqrt(2)
        let s = CosineSimilarity.compute(&[1.0, 0.0, 0.0], &[1.0, 1.0, 0.0]).unwrap();
        assert!((s - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_magnitude_is_zero() {
        assert_eq!(CosineSimilarity.compute(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
        assert_eq!(CosineSimilarity.compute(&[1.0, 2.0], &[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(CosineSimilarity.compute(&[0.0], &[0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_huge_components_stay_finite() {
        // Unscaled norms of these overflow to inf
        let s = CosineSimilarity.compute(&[1e200, 0.0], &[1e200, 1e200]).unwrap();
        assert!((s - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);

        let s = CosineSimilarity.compute(&[1e200, 0.0], &[1.0, 0.0]).unwrap();
        assert!((s - 1.0).abs() < 1e-12);

        let s = CosineSimilarity.compute(&[-1e300, 1e-300], &[1.0, 0.0]).unwrap();
        assert!((s + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        // Checked before the zero-magnitude shortcut
        assert!(CosineSimilarity.compute(&[0.0, 0.0], &[1.0]).is_err());
    }

    // ========== Dot Product Tests ==========

    #[test]
    fn test_dot_self_is_squared_norm() {
        let a = [1.0, -2.0, 3.0];
        assert_eq!(DotProductSimilarity.compute(&a, &a).unwrap(), 14.0);
    }

    #[test]
    fn test_dot_is_unbounded() {
        let s = DotProductSimilarity.compute(&[10.0, 10.0], &[10.0, 10.0]).unwrap();
        assert_eq!(s, 200.0);
    }

    // ========== Ordering Tests ==========

    #[test]
    fn test_score_order_per_metric() {
        assert!(EuclideanDistance.is_lower_better());
        assert!(!CosineSimilarity.is_lower_better());
        assert!(!DotProductSimilarity.is_lower_better());
    }

    #[test]
    fn test_metric_kind_delegates() {
        assert_eq!(MetricKind::Euclidean.score_order(), ScoreOrder::LowerIsBetter);
        assert_eq!(MetricKind::Dot.score_order(), ScoreOrder::HigherIsBetter);
        assert_eq!(MetricKind::Dot.compute(&[2.0], &[3.0]).unwrap(), 6.0);
    }

    // ========== Parsing Tests ==========

    #[test]
    fn test_metric_kind_from_str() {
        assert_eq!("euclidean".parse::<MetricKind>().unwrap(), MetricKind::Euclidean);
        assert_eq!("COSINE".parse::<MetricKind>().unwrap(), MetricKind::Cosine);
        assert_eq!("dot".parse::<MetricKind>().unwrap(), MetricKind::Dot);
        assert_eq!(
            "manhattan".parse::<MetricKind>(),
            Err(Error::UnknownMetric("manhattan".to_string()))
        );
    }

    #[test]
    fn test_metric_kind_display_round_trip() {
        for kind in [MetricKind::Euclidean, MetricKind::Cosine, MetricKind::Dot] {
            assert_eq!(kind.to_string().parse::<MetricKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_metric_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&MetricKind::Dot).unwrap(), "\"dot\"");
        let kind: MetricKind = serde_json::from_str("\"euclidean\"").unwrap();
        assert_eq!(kind, MetricKind::Euclidean);
    }
}
