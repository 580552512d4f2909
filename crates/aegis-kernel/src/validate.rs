//! Numeric precondition checks.
//!
//! NaN and ±∞ are rejected with [`AegisError::NonNumeric`]; a malformed
//! number is a caller error and is never coerced.

use aegis_types::AegisError;

/// Return `value` unchanged when finite.
///
/// `field` and `index` only feed the error message.
pub fn ensure_finite(field: &str, index: usize, value: f64) -> Result<f64, AegisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AegisError::NonNumeric {
            field: field.to_string(),
            index,
            value,
        })
    }
}

/// Check every element of `values`; the first non-finite one is reported.
pub fn ensure_all_finite(field: &str, values: &[f64]) -> Result<(), AegisError> {
    for (index, value) in values.iter().enumerate() {
        ensure_finite(field, index, *value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass() {
        assert_eq!(ensure_finite("s", 1, -2.5).unwrap(), -2.5);
        assert!(ensure_all_finite("state", &[0.0, 1.0, -1e300]).is_ok());
        assert!(ensure_all_finite("state", &[]).is_ok());
    }

    #[test]
    fn nan_rejected() {
        assert!(matches!(
            ensure_finite("s", 2, f64::NAN),
            Err(AegisError::NonNumeric { index: 2, .. })
        ));
    }

    #[test]
    fn first_infinite_component_reported() {
        let err = ensure_all_finite("state", &[0.0, f64::INFINITY, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            AegisError::NonNumeric { ref field, index: 1, .. } if field == "state"
        ));
    }
}
