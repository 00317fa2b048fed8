// File: crates/demo/src/evaluator.rs
// Summary: Expression evaluator backed by evalexpr, with parsed trees cached per expression.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::sync::Arc;

use evalexpr::{
    build_operator_tree, ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, Function,
    HashMapContext, Node, Value,
};
use fnplot_core::{EvalError, Evaluator};
use parking_lot::RwLock;

type UnaryFn = fn(f64) -> f64;

const UNARY: &[(&str, UnaryFn)] = &[
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
    ("sqrt", f64::sqrt),
    ("ln", f64::ln),
    ("log", f64::ln),
    ("log10", f64::log10),
    ("exp", f64::exp),
    ("abs", f64::abs),
    ("floor", f64::floor),
    ("ceil", f64::ceil),
];

/// Evaluates expressions in one variable `x`.
pub struct ExprEvaluator {
    base: HashMapContext,
    trees: RwLock<HashMap<String, Arc<Node>>>,
}

impl ExprEvaluator {
    pub fn new() -> anyhow::Result<Self> {
        let mut base = HashMapContext::new();
        for &(name, f) in UNARY {
            base.set_function(
                name.to_string(),
                Function::new(move |arg: &Value| Ok(Value::Float(f(arg.as_number()?)))),
            )?;
        }
        base.set_value("pi".to_string(), Value::Float(PI))?;
        base.set_value("e".to_string(), Value::Float(E))?;
        Ok(Self { base, trees: RwLock::new(HashMap::new()) })
    }

    fn tree(&self, expression: &str) -> Result<Arc<Node>, EvalError> {
        if let Some(node) = self.trees.read().get(expression) {
            return Ok(Arc::clone(node));
        }
        let node = Arc::new(build_operator_tree(expression).map_err(|e| EvalError::Invalid(e.to_string()))?);
        self.trees.write().insert(expression.to_string(), Arc::clone(&node));
        Ok(node)
    }
}

impl Evaluator for ExprEvaluator {
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        let tree = self.tree(expression)?;
        let mut ctx = self.base.clone();
        ctx.set_value("x".to_string(), Value::Float(x)).map_err(|e| EvalError::undefined(x, e.to_string()))?;
        tree.eval_number_with_context(&ctx).map_err(|e| {
            if is_structural(&e) {
                EvalError::Invalid(e.to_string())
            } else {
                EvalError::undefined(x, e.to_string())
            }
        })
    }
}

/// Errors that do not depend on `x`: the expression itself is malformed.
/// evalexpr only reports some of these (dangling operators, wrong arity) at evaluation time.
fn is_structural(e: &EvalexprError) -> bool {
    matches!(
        e,
        EvalexprError::VariableIdentifierNotFound(_)
            | EvalexprError::FunctionIdentifierNotFound(_)
            | EvalexprError::WrongOperatorArgumentAmount { .. }
            | EvalexprError::WrongFunctionArgumentAmount { .. }
            | EvalexprError::ExpectedNumber { .. }
            | EvalexprError::ExpectedFloat { .. }
            | EvalexprError::ExpectedInt { .. }
            | EvalexprError::ExpectedBoolean { .. }
            | EvalexprError::TypeError { .. }
    )
}
