//! This is the vector math module
//! Provide validation, dot product, magnitude and distance helpers

use crate::error::{Error, Result};

/// A point in embedding space.
pub type Vector = Vec<f64>;

/// Checks that a vector can be stored or queried.
/// Empty vectors and NaN / infinite components are rejected
pub fn validate(vector: &[f64]) -> Result<()> {
    if vector.is_empty() {
        return Err(Error::EmptyVector);
    }

    match vector.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(Error::InvalidValue { index, value: vector[index] }),
        None => Ok(()),
    }
}

/// Fails unless both operands have the same length.
pub fn check_dimensions(left: &[f64], right: &[f64]) -> Result<()> {
    if left.len() != right.len() {
        return Err(Error::DimensionMismatch {
            expected: left.len(),
            actual: right.len(),
        });
    }
    Ok(())
}

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Can only process vectors with same dimensions
pub fn dot_product(left: &[f64], right: &[f64]) -> Result<f64> {
    check_dimensions(left, right)?;

    let dot_prod = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum();

    Ok(dot_prod)
}

/// L2 magnitude
/// ||vec|| = sqrt(sum(vec[i]^2))
pub fn magnitude(vector: &[f64]) -> f64 {
    vector.iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt()
}

/// Largest absolute component, `0.0` for an all-zero vector.
pub fn max_abs(vector: &[f64]) -> f64 {
    vector.iter().fold(0.0, |max, x| max.max(x.abs()))
}

/// Squared Euclidean distance
/// sum((a[i] - b[i])^2), same dimensions only
pub fn squared_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    check_dimensions(left, right)?;

    let sum = left.iter()
        .zip(right.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();

    Ok(sum)
}

/// Renders a vector with two decimals per component, e.g. `[1.00, 0.50]`.
pub fn format_vector(vector: &[f64]) -> String {
    let parts: Vec<String> = vector.iter()
        .map(|x| format!("{:.2}", x))
        .collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod vector_test {
    use super::*;

    // ========== Validation Tests ==========

    #[test]
    fn test_validate_accepts_finite_vector() {
        assert!(validate(&[1.0, -2.5, 0.0]).is_ok());
    }

    #[test]
    fn test_validate_empty_vector() {
        assert_eq!(validate(&[]), Err(Error::EmptyVector));
    }

    #[test]
    fn test_validate_nan_component() {
        match validate(&[1.0, f64::NAN]) {
            Err(Error::InvalidValue { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_infinite_component() {
        let result = validate(&[f64::INFINITY, 1.0]);
        assert_eq!(result, Err(Error::InvalidValue { index: 0, value: f64::INFINITY }));
    }

    // ========== Dot Product Tests ==========

    #[test]
    fn test_dot_product_basic() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        // Expected: 1*4 + 2*5 + 3*6 = 4 + 10 + 18 = 32
        let result = dot_product(&a, &b).unwrap();

        assert!((result - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let result = dot_product(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_dot_product_dimension_mismatch() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0];  // Different dimension

        let result = dot_product(&a, &b);
        assert_eq!(result, Err(Error::DimensionMismatch { expected: 3, actual: 2 }));
    }

    // ========== Magnitude / Distance Tests ==========

    #[test]
    fn test_magnitude_pythagorean() {
        // ||[3,4]|| = sqrt(9+16) = 5
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_zero_vector() {
        assert_eq!(magnitude(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_squared_distance_basic() {
        // (1-4)^2 + (2-6)^2 = 9 + 16 = 25
        let result = squared_distance(&[1.0, 2.0], &[4.0, 6.0]).unwrap();
        assert!((result - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_squared_distance_dimension_mismatch() {
        assert!(squared_distance(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[1.0, -7.5, 3.0]), 7.5);
        assert_eq!(max_abs(&[0.0, 0.0]), 0.0);
    }

    // ========== Formatting Tests ==========

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, 0.5, -2.126]), "[1.00, 0.50, -2.13]");
    }

    #[test]
    fn test_format_empty_vector() {
        assert_eq!(format_vector(&[]), "[]");
    }
}
