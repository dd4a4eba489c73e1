use kernel::error::app_error::{AppError, AppResult};

/// Age in years; defaults to 0 when not supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(i32);

impl Age {
    pub fn new(years: i64) -> AppResult<Self> {
        if years < 0 {
            return Err(AppError::bad_request("Age must not be negative"));
        }

        i32::try_from(years)
            .map(Self)
            .map_err(|_| AppError::bad_request("Age is out of range"))
    }

    pub fn from_db(years: i32) -> Self {
        Self(years)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds() {
        assert_eq!(Age::new(0).unwrap().value(), 0);
        assert_eq!(Age::new(25).unwrap().value(), 25);
        assert!(Age::new(-1).is_err());
        assert!(Age::new(i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn test_negative_age_message() {
        let err = Age::new(-1).unwrap_err();
        assert_eq!(err.message(), "Age must not be negative");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Age::default().value(), 0);
    }
}
