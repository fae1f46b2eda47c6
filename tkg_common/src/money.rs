use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

pub const KES_CURRENCY_CODE: &str = "KES";

/// An amount of money in whole Kenyan shillings. The push-payment protocol only transmits integral amounts, so no
/// sub-shilling precision is carried.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct KesAmount(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in shillings: {0}")]
pub struct KesConversionError(String);

impl From<i64> for KesAmount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for KesAmount {
    type Error = KesConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(KesConversionError(format!("Value {value} is too large to convert to KesAmount")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl PartialEq for KesAmount {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for KesAmount {}

impl Add for KesAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for KesAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for KesAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for KesAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KSh {}", self.0)
    }
}

impl KesAmount {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic_and_display() {
        let a = KesAmount::from(350) + KesAmount::from(150);
        assert_eq!(a, KesAmount::from(500));
        assert_eq!(a.to_string(), "KSh 500");
        assert_eq!((a - KesAmount::from(500)).value(), 0);
    }

    #[test]
    fn u64_conversion_guards_overflow() {
        assert!(KesAmount::try_from(u64::MAX).is_err());
        assert_eq!(KesAmount::try_from(500u64).unwrap().value(), 500);
    }
}
