//! Heuristic shape classification for text columns.
//!
//! A shape is a whole-string character-class pattern shared by every
//! non-missing value of a column. Shapes are tested in a fixed priority
//! order because they overlap: pure digits are also alphanumeric and also
//! hex, so the narrower shape must win.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A whole-string shape shared by all values of a column.
///
/// Serialized as the regex pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapePattern {
    /// Digits only.
    #[serde(rename = r"^\d+$")]
    Numeric,
    /// ASCII letters only.
    #[serde(rename = r"^[a-zA-Z]+$")]
    Alpha,
    /// ASCII letters and digits.
    #[serde(rename = r"^[a-zA-Z0-9]+$")]
    Alphanumeric,
    /// Hexadecimal digits.
    #[serde(rename = r"^[0-9a-fA-F]+$")]
    Hex,
}

impl ShapePattern {
    /// Priority order for detection. Hex is tested before alphanumeric:
    /// every hex string is also alphanumeric, so the reverse order would
    /// make hex unreachable.
    pub const PRIORITY: [ShapePattern; 4] = [
        ShapePattern::Numeric,
        ShapePattern::Alpha,
        ShapePattern::Hex,
        ShapePattern::Alphanumeric,
    ];

    /// The whole-string regex for this shape.
    pub fn regex(&self) -> &'static str {
        match self {
            ShapePattern::Numeric => r"^\d+$",
            ShapePattern::Alpha => r"^[a-zA-Z]+$",
            ShapePattern::Alphanumeric => r"^[a-zA-Z0-9]+$",
            ShapePattern::Hex => r"^[0-9a-fA-F]+$",
        }
    }

    /// Short descriptive name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapePattern::Numeric => "numeric",
            ShapePattern::Alpha => "alpha",
            ShapePattern::Alphanumeric => "alphanumeric",
            ShapePattern::Hex => "hex",
        }
    }
}

impl std::fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the shape shared by every value, if any.
///
/// Returns the first shape in priority order matching all values, or
/// `None` when no shape matches or there are no values. A shape holds for
/// all values of a column iff it holds for all distinct values, so callers
/// may pass either.
pub fn detect_shape<'a, I>(values: I) -> Option<ShapePattern>
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    for pattern in ShapePattern::PRIORITY {
        let re = Regex::new(pattern.regex()).unwrap();
        if values.iter().all(|v| re.is_match(v)) {
            return Some(pattern);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_are_numeric_not_alphanumeric_or_hex() {
        let shape = detect_shape(["123", "456"]).unwrap();
        assert_eq!(shape, ShapePattern::Numeric);
    }

    #[test]
    fn test_letters_are_alpha() {
        assert_eq!(detect_shape(["x", "y"]), Some(ShapePattern::Alpha));
        assert_eq!(detect_shape(["Abc", "DEF"]), Some(ShapePattern::Alpha));
    }

    #[test]
    fn test_hex_beats_alphanumeric() {
        assert_eq!(detect_shape(["1a", "2b"]), Some(ShapePattern::Hex));
        assert_eq!(detect_shape(["deadBEEF", "0042"]), Some(ShapePattern::Hex));
    }

    #[test]
    fn test_alphanumeric_when_not_hex() {
        assert_eq!(detect_shape(["xyz123", "q7"]), Some(ShapePattern::Alphanumeric));
    }

    #[test]
    fn test_no_shape() {
        assert_eq!(detect_shape(["12", "3x"]), None);
        assert_eq!(detect_shape(["a-b"]), None);
        assert_eq!(detect_shape(["", "x"]), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect_shape(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_serializes_as_pattern_string() {
        let json = serde_json::to_string(&ShapePattern::Alpha).unwrap();
        assert_eq!(json, "\"^[a-zA-Z]+$\"");
        let back: ShapePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ShapePattern::Alpha);
    }
}
