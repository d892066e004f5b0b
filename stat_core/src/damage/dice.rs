use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing dice notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Dice '{0}' is not in NdS form")]
    Format(String),
    #[error("Dice '{0}' has a zero count or side")]
    Empty(String),
    #[error("Dice '{0}' can roll more than {max}", max = i32::MAX)]
    TooLarge(String),
}

/// Dice notation such as `2d6`
///
/// Parsing guarantees `count * sides` fits in an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
}

impl DiceExpr {
    pub fn min_roll(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX)
    }

    pub fn max_roll(&self) -> i32 {
        self.count
            .checked_mul(self.sides)
            .and_then(|max| i32::try_from(max).ok())
            .unwrap_or(i32::MAX)
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, sides) = s
            .trim()
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceError::Format(s.to_string()))?;
        let count: u32 = count.parse().map_err(|_| DiceError::Format(s.to_string()))?;
        let sides: u32 = sides.parse().map_err(|_| DiceError::Format(s.to_string()))?;
        if count == 0 || sides == 0 {
            return Err(DiceError::Empty(s.to_string()));
        }
        let fits = count
            .checked_mul(sides)
            .is_some_and(|max| i32::try_from(max).is_ok());
        if !fits {
            return Err(DiceError::TooLarge(s.to_string()));
        }
        Ok(DiceExpr { count, sides })
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}
