use crate::model::{Color, Warmth};

/// The mixing table: each row is an unordered pair and the color it yields.
const MIXING_TABLE: [(Color, Color, Color); 3] = [
    (Color::Red, Color::Yellow, Color::Orange),
    (Color::Yellow, Color::Blue, Color::Green),
    (Color::Blue, Color::Violet, Color::Indigo),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The pair has no entry in the mixing table
    DirtyColor(Color, Color),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::DirtyColor(a, b) => write!(f, "Dirty color: {} + {}", a, b),
        }
    }
}

impl std::error::Error for ColorError {}

pub fn warmth(color: Color) -> Warmth {
    match color {
        Color::Red | Color::Orange | Color::Yellow => Warmth::Warm,
        Color::Green => Warmth::Neutral,
        Color::Blue | Color::Indigo | Color::Violet => Warmth::Cold,
    }
}

/// Mix two colors. The pair is unordered; a color mixed with itself never
/// matches a table row.
pub fn mix(c1: Color, c2: Color) -> Result<Color, ColorError> {
    let key = unordered(c1, c2);
    MIXING_TABLE
        .iter()
        .find(|(a, b, _)| unordered(*a, *b) == key)
        .map(|(_, _, result)| *result)
        .ok_or(ColorError::DirtyColor(c1, c2))
}

pub fn mixing_table() -> &'static [(Color, Color, Color)] {
    &MIXING_TABLE
}

fn unordered(a: Color, b: Color) -> (Color, Color) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmth() {
        assert_eq!(warmth(Color::Orange), Warmth::Warm);
        assert_eq!(warmth(Color::Red), Warmth::Warm);
        assert_eq!(warmth(Color::Yellow), Warmth::Warm);
        assert_eq!(warmth(Color::Green), Warmth::Neutral);
        assert_eq!(warmth(Color::Blue), Warmth::Cold);
        assert_eq!(warmth(Color::Indigo), Warmth::Cold);
        assert_eq!(warmth(Color::Violet), Warmth::Cold);
    }

    #[test]
    fn test_mix_table_entries() {
        assert_eq!(mix(Color::Red, Color::Yellow), Ok(Color::Orange));
        assert_eq!(mix(Color::Blue, Color::Yellow), Ok(Color::Green));
        assert_eq!(mix(Color::Violet, Color::Blue), Ok(Color::Indigo));
    }

    #[test]
    fn test_mix_dirty_color() {
        let err = mix(Color::Red, Color::Green).unwrap_err();
        assert_eq!(err, ColorError::DirtyColor(Color::Red, Color::Green));
        assert_eq!(err.to_string(), "Dirty color: RED + GREEN");
    }

    #[test]
    fn test_mix_with_itself_is_dirty() {
        for c in Color::ALL {
            assert!(mix(c, c).is_err(), "{} + {} should not mix", c, c);
        }
    }

    #[test]
    fn test_mix_is_symmetric() {
        let mut successes = 0;
        for a in Color::ALL {
            for b in Color::ALL {
                assert_eq!(mix(a, b).ok(), mix(b, a).ok());
                if mix(a, b).is_ok() {
                    successes += 1;
                }
            }
        }
        assert_eq!(successes, 6);
    }

    #[test]
    fn test_mixing_table_rows() {
        let table = mixing_table();
        assert_eq!(table.len(), 3);
        for (a, b, result) in table {
            assert_eq!(mix(*a, *b), Ok(*result));
        }
    }
}
