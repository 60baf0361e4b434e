use serde::{Deserialize, Serialize};
use std::fmt;

/// Age-band classification of a user
///
/// Bands are contiguous and cover every valid age exactly once:
/// child `[0, 13)`, teen `[13, 18)`, adult `[18, 60)`, senior `[60, ..)`.
/// Ages on a boundary belong to the higher band (18 is `Adult`, not `Teen`).
///
/// # Example
/// ```
/// use userdeck_api::domain::user::UserCategory;
///
/// assert_eq!(UserCategory::from_age(17), UserCategory::Teen);
/// assert_eq!(UserCategory::from_age(18), UserCategory::Adult);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserCategory {
    Child,
    Teen,
    Adult,
    Senior,
}

impl UserCategory {
    /// Maps an age to its band. Pure function of age alone.
    pub fn from_age(age: i32) -> Self {
        match age {
            a if a < 13 => UserCategory::Child,
            a if a < 18 => UserCategory::Teen,
            a if a < 60 => UserCategory::Adult,
            _ => UserCategory::Senior,
        }
    }

    /// Returns the lowercase band name used in API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCategory::Child => "child",
            UserCategory::Teen => "teen",
            UserCategory::Adult => "adult",
            UserCategory::Senior => "senior",
        }
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
