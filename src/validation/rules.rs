//! Constraint checks applied after coercion

use super::error::ErrorKind;

/// Inclusive/exclusive bounds for an integer parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntBounds {
    pub ge: Option<i64>,
    pub lt: Option<i64>,
    pub le: Option<i64>,
}

impl IntBounds {
    pub const NONE: Self = Self {
        ge: None,
        lt: None,
        le: None,
    };

    pub const fn ge(mut self, limit: i64) -> Self {
        self.ge = Some(limit);
        self
    }

    pub const fn lt(mut self, limit: i64) -> Self {
        self.lt = Some(limit);
        self
    }

    pub const fn le(mut self, limit: i64) -> Self {
        self.le = Some(limit);
        self
    }

    /// Lower bound is checked first, then the exclusive and inclusive upper bounds
    pub fn check(&self, value: i64) -> Result<i64, ErrorKind> {
        if let Some(limit) = self.ge {
            if value < limit {
                return Err(ErrorKind::Ge(limit));
            }
        }
        if let Some(limit) = self.lt {
            if value >= limit {
                return Err(ErrorKind::Lt(limit));
            }
        }
        if let Some(limit) = self.le {
            if value > limit {
                return Err(ErrorKind::Le(limit));
            }
        }
        Ok(value)
    }
}

pub fn max_items(len: usize, limit: usize) -> Result<(), ErrorKind> {
    if len > limit {
        Err(ErrorKind::MaxItems(limit))
    } else {
        Ok(())
    }
}

/// A closed set of string literals
pub trait TextEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(self) -> &'static str;

    fn permitted() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.as_str()).collect()
    }

    fn parse(raw: &str) -> Result<Self, ErrorKind> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.as_str() == raw)
            .ok_or_else(|| ErrorKind::Enum(Self::permitted()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Blue,
    }

    impl TextEnum for Color {
        const VARIANTS: &'static [Self] = &[Self::Red, Self::Blue];

        fn as_str(self) -> &'static str {
            match self {
                Self::Red => "red",
                Self::Blue => "blue",
            }
        }
    }

    #[test]
    fn test_bounds_inclusive_range() {
        let bounds = IntBounds::NONE.ge(0).le(10000);
        assert_eq!(bounds.check(0), Ok(0));
        assert_eq!(bounds.check(10000), Ok(10000));
        assert_eq!(bounds.check(-1), Err(ErrorKind::Ge(0)));
        assert_eq!(bounds.check(10001), Err(ErrorKind::Le(10000)));
    }

    #[test]
    fn test_bounds_exclusive_upper() {
        let bounds = IntBounds::NONE.ge(0).lt(10);
        assert_eq!(bounds.check(9), Ok(9));
        assert_eq!(bounds.check(10), Err(ErrorKind::Lt(10)));
    }

    #[test]
    fn test_unbounded_accepts_anything() {
        assert_eq!(IntBounds::NONE.check(i64::MIN), Ok(i64::MIN));
    }

    #[test]
    fn test_max_items() {
        assert!(max_items(50, 50).is_ok());
        assert_eq!(max_items(51, 50), Err(ErrorKind::MaxItems(50)));
    }

    #[test]
    fn test_text_enum_parse() {
        assert_eq!(Color::parse("red"), Ok(Color::Red));
        assert_eq!(
            Color::parse("Red"),
            Err(ErrorKind::Enum(vec!["red", "blue"]))
        );
    }
}
