use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl Color {
    /// All colors in spectrum order
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Indigo,
        Color::Violet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Orange => "ORANGE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::Indigo => "INDIGO",
            Color::Violet => "VIOLET",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Color {
    type Err = UnknownColor;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl std::fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown color '{}' (expected one of: {})",
            self.0,
            Color::ALL
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownColor {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Warmth {
    Warm,
    Neutral,
    Cold,
}

impl std::fmt::Display for Warmth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warmth::Warm => write!(f, "warm"),
            Warmth::Neutral => write!(f, "neutral"),
            Warmth::Cold => write!(f, "cold"),
        }
    }
}

/// An arithmetic expression tree: an integer literal or the sum of two
/// sub-expressions.
///
/// Serialized externally tagged, e.g. `{"sum": {"left": {"num": 1}, "right": {"num": 2}}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Expr {
    Num(i64),
    Sum { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    pub fn num(value: i64) -> Self {
        Expr::Num(value)
    }

    pub fn sum(left: Expr, right: Expr) -> Self {
        Expr::Sum {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nesting depth; a literal has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expr::Num(_) => 1,
            Expr::Sum { left, right } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Num(_) => 1,
            Expr::Sum { left, right } => 1 + left.node_count() + right.node_count(),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "Num({})", n),
            Expr::Sum { left, right } => write!(f, "Sum({}, {})", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_str_is_case_insensitive() {
        assert_eq!("green".parse::<Color>().unwrap(), Color::Green);
        assert_eq!("Indigo".parse::<Color>().unwrap(), Color::Indigo);
        assert_eq!(" VIOLET ".parse::<Color>().unwrap(), Color::Violet);
    }

    #[test]
    fn test_unknown_color() {
        let err = "magenta".parse::<Color>().unwrap_err();
        assert_eq!(err, UnknownColor("magenta".to_string()));
        assert!(err.to_string().contains("unknown color 'magenta'"));
        assert!(err.to_string().contains("RED, ORANGE"));
    }

    #[test]
    fn test_color_serde_uses_upper_case_names() {
        assert_eq!(serde_json::to_string(&Color::Orange).unwrap(), "\"ORANGE\"");
        let c: Color = serde_json::from_str("\"BLUE\"").unwrap();
        assert_eq!(c, Color::Blue);
    }

    #[test]
    fn test_expr_display() {
        let e = Expr::sum(Expr::sum(Expr::num(1), Expr::num(2)), Expr::num(4));
        assert_eq!(e.to_string(), "Sum(Sum(Num(1), Num(2)), Num(4))");
        assert_eq!(Expr::num(-3).to_string(), "Num(-3)");
    }

    #[test]
    fn test_expr_shape() {
        let e = Expr::sum(Expr::sum(Expr::num(1), Expr::num(2)), Expr::num(4));
        assert_eq!(e.depth(), 3);
        assert_eq!(e.node_count(), 5);
        assert_eq!(Expr::num(0).depth(), 1);
    }

    #[test]
    fn test_expr_json_shape() {
        let e = Expr::sum(Expr::num(1), Expr::num(2));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sum": {"left": {"num": 1}, "right": {"num": 2}}})
        );
    }
}
