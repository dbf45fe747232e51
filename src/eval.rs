use serde::Serialize;

use crate::model::Expr;

pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The tree nests deeper than the context allows
    TooDeep { max_depth: usize },
    /// The sum does not fit in an i64
    Overflow { left: i64, right: i64 },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::TooDeep { max_depth } => {
                write!(f, "expression nests deeper than {} levels", max_depth)
            }
            EvalError::Overflow { left, right } => {
                write!(f, "integer overflow in sum: {} + {}", left, right)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// One step of a traced evaluation, emitted in post-order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceEvent {
    Num(i64),
    Sum(i64, i64),
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Num(n) => write!(f, "Num: {}", n),
            TraceEvent::Sum(l, r) => write!(f, "sum: {} + {}", l, r),
        }
    }
}

/// Evaluation limits
pub struct EvalContext {
    depth: usize,
    max_depth: usize,
}

impl EvalContext {
    pub fn new() -> Self {
        EvalContext {
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Evaluate `expr`, reporting each node to `observer` once its value is known.
    pub fn eval_with<F>(&mut self, expr: &Expr, observer: &mut F) -> Result<i64, EvalError>
    where
        F: FnMut(TraceEvent),
    {
        self.enter()?;
        let result = match expr {
            Expr::Num(n) => {
                observer(TraceEvent::Num(*n));
                Ok(*n)
            }
            Expr::Sum { left, right } => self.eval_sum(left, right, observer),
        };
        self.depth -= 1;
        result
    }

    fn eval_sum<F>(&mut self, left: &Expr, right: &Expr, observer: &mut F) -> Result<i64, EvalError>
    where
        F: FnMut(TraceEvent),
    {
        let l = self.eval_with(left, observer)?;
        let r = self.eval_with(right, observer)?;
        observer(TraceEvent::Sum(l, r));
        l.checked_add(r)
            .ok_or(EvalError::Overflow { left: l, right: r })
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.max_depth {
            Err(EvalError::TooDeep {
                max_depth: self.max_depth,
            })
        } else {
            self.depth += 1;
            Ok(())
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate an expression with the default limits
pub fn eval(expr: &Expr) -> Result<i64, EvalError> {
    EvalContext::new().eval_with(expr, &mut |_| {})
}

/// Evaluate an expression, collecting the trace of every node visited
pub fn eval_traced(expr: &Expr, ctx: &mut EvalContext) -> Result<(i64, Vec<TraceEvent>), EvalError> {
    let mut events = Vec::new();
    let value = ctx.eval_with(expr, &mut |event| events.push(event))?;
    Ok((value, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested(depth: usize) -> Expr {
        let mut e = Expr::num(1);
        for _ in 1..depth {
            e = Expr::sum(e, Expr::num(1));
        }
        e
    }

    #[test]
    fn test_eval_literal() {
        assert_eq!(eval(&Expr::num(42)), Ok(42));
        assert_eq!(eval(&Expr::num(-7)), Ok(-7));
    }

    #[test]
    fn test_eval_sum() {
        assert_eq!(eval(&Expr::sum(Expr::num(1), Expr::num(2))), Ok(3));
        let e = Expr::sum(Expr::sum(Expr::num(1), Expr::num(2)), Expr::num(4));
        assert_eq!(eval(&e), Ok(7));
    }

    #[test]
    fn test_eval_traced_post_order() {
        let e = Expr::sum(Expr::sum(Expr::num(1), Expr::num(2)), Expr::num(4));
        let (value, trace) = eval_traced(&e, &mut EvalContext::new()).unwrap();
        assert_eq!(value, 7);
        let lines: Vec<String> = trace.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            lines,
            vec!["Num: 1", "Num: 2", "sum: 1 + 2", "Num: 4", "sum: 3 + 4"]
        );
    }

    #[test]
    fn test_eval_with_observer() {
        let e = Expr::sum(Expr::num(2), Expr::num(5));
        let mut seen = Vec::new();
        let value = EvalContext::new()
            .eval_with(&e, &mut |event| seen.push(event))
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(
            seen,
            vec![TraceEvent::Num(2), TraceEvent::Num(5), TraceEvent::Sum(2, 5)]
        );
    }

    #[test]
    fn test_traced_and_plain_agree() {
        let e = Expr::sum(Expr::num(10), Expr::sum(Expr::num(-3), Expr::num(5)));
        let (traced, _) = eval_traced(&e, &mut EvalContext::new()).unwrap();
        assert_eq!(eval(&e), Ok(traced));
    }

    #[test]
    fn test_max_depth() {
        let e = nested(5);
        let mut ctx = EvalContext::new().with_max_depth(5);
        assert_eq!(ctx.eval_with(&e, &mut |_| {}), Ok(5));

        let mut ctx = EvalContext::new().with_max_depth(4);
        assert_eq!(
            ctx.eval_with(&e, &mut |_| {}),
            Err(EvalError::TooDeep { max_depth: 4 })
        );
    }

    #[test]
    fn test_context_reusable_after_error() {
        let mut ctx = EvalContext::new().with_max_depth(2);
        assert!(ctx.eval_with(&nested(3), &mut |_| {}).is_err());
        // depth is unwound on the error path too
        assert_eq!(ctx.eval_with(&nested(2), &mut |_| {}), Ok(2));
    }

    #[test]
    fn test_overflow() {
        let e = Expr::sum(Expr::num(i64::MAX), Expr::num(1));
        assert_eq!(
            eval(&e),
            Err(EvalError::Overflow {
                left: i64::MAX,
                right: 1
            })
        );
    }

    #[test]
    fn test_trace_event_serializes() {
        let json = serde_json::to_value(TraceEvent::Sum(1, 2)).unwrap();
        assert_eq!(json, serde_json::json!({"sum": [1, 2]}));
    }
}
