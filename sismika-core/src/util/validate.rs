use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub(crate) fn is_valid_depth_km(depth_km: f64) -> bool {
    depth_km.is_finite() && depth_km >= 0.0
}

pub(crate) fn is_valid_magnitude(magnitude: f64) -> bool {
    magnitude.is_finite()
}

#[derive(Debug, Error)]
pub enum EarthquakeInvalidation {
    #[error("Invalid depth")]
    Depth,
    #[error("Invalid magnitude")]
    Magnitude,
}

#[derive(Debug, Error)]
pub enum IdentityInvalidation {
    #[error("Invalid subject")]
    Subject,
    #[error("Invalid email address")]
    EmailAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_test() {
        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("foo@bar"));
        assert!(is_valid_email("foo@bar.tld"));
    }

    #[test]
    fn depth_must_be_finite_and_non_negative() {
        assert!(is_valid_depth_km(0.0));
        assert!(is_valid_depth_km(643.0));
        assert!(!is_valid_depth_km(-1.0));
        assert!(!is_valid_depth_km(f64::NAN));
        assert!(!is_valid_depth_km(f64::INFINITY));
    }

    #[test]
    fn any_finite_magnitude_is_acceptable() {
        assert!(is_valid_magnitude(0.0));
        assert!(is_valid_magnitude(-0.3));
        assert!(is_valid_magnitude(8.1));
        assert!(!is_valid_magnitude(f64::NAN));
        assert!(!is_valid_magnitude(f64::NEG_INFINITY));
    }
}
