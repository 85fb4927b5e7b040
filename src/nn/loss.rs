use crate::error::{NetError, Result};

/// Mean Squared Error: (1/n) Σ (output_i - target_i)^2
pub fn mse_loss(output: &[f64], target: &[f64]) -> Result<f64> {
    if output.len() != target.len() {
        return Err(NetError::shape("target", output.len(), target.len()));
    }
    if output.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = output
        .iter()
        .zip(target.iter())
        .map(|(o, t)| (o - t) * (o - t))
        .sum();
    Ok(sum / output.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mse_basic() {
        let loss = mse_loss(&[1.0, 2.0, 3.0], &[1.0, 0.0, 6.0]).unwrap();
        assert_relative_eq!(loss, (0.0 + 4.0 + 9.0) / 3.0);
    }

    #[test]
    fn test_mse_zero_when_equal() {
        assert_eq!(mse_loss(&[0.3, -0.7], &[0.3, -0.7]).unwrap(), 0.0);
    }

    #[test]
    fn test_mse_length_mismatch() {
        let err = mse_loss(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            NetError::ShapeMismatch {
                what: "target",
                expected: 2,
                actual: 1
            }
        );
    }
}
