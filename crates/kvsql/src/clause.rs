//! Trailing SELECT clause elements: ORDER BY and LIMIT.

use crate::error::{BuildError, BuildResult};
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword, `ASC` or `DESC`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = BuildError;

    /// Parse `asc` / `desc` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(BuildError::invalid_direction(s))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ORDER BY element: `<field> <ASC|DESC>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    /// Create an ORDER BY element, parsing `direction` case-insensitively.
    pub fn new(field: impl Into<String>, direction: &str) -> BuildResult<Self> {
        Ok(Self {
            field: field.into(),
            direction: direction.parse()?,
        })
    }

    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Render an ORDER BY element from a raw direction token.
///
/// `order_by("age", "desc")` gives `"age DESC"`; anything other than
/// asc/desc (any case) is an [`BuildError::InvalidOrderDirection`].
pub fn order_by(field: &str, direction: &str) -> BuildResult<String> {
    OrderBy::new(field, direction).map(|o| o.to_string())
}

/// LIMIT element: renders `LIMIT <offset>,<count>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: u64,
    pub count: u64,
}

impl Limit {
    /// Skip `offset` rows, then return at most `count`.
    pub fn new(offset: u64, count: u64) -> Self {
        Self { offset, count }
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn page(page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        Self {
            offset: (p - 1).saturating_mul(size),
            count: size,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {},{}", self.offset, self.count)
    }
}
