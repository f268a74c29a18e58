//! Operation identifiers
//!
//! Every operation the engine can dispatch has a stable lowercase name, used
//! by callers that select operations from decoded messages.

use crate::arithmetic::BinaryOp;
use crate::transcendental::UnaryFunction;
use numarray_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An operation the engine can dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    // Elementwise arithmetic
    Plus,
    Minus,
    Times,
    Rdivide,
    // Unary functions
    Uminus,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Asin,
    Acos,
    Atan,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
    // Structural
    Transpose,
    Sparse,
    Full,
    Vertcat,
    Horzcat,
    // Generators
    Rosser,
}

impl Operation {
    pub const ALL: [Operation; 25] = [
        Operation::Plus,
        Operation::Minus,
        Operation::Times,
        Operation::Rdivide,
        Operation::Uminus,
        Operation::Sin,
        Operation::Cos,
        Operation::Tan,
        Operation::Sinh,
        Operation::Cosh,
        Operation::Tanh,
        Operation::Exp,
        Operation::Asin,
        Operation::Acos,
        Operation::Atan,
        Operation::Asinh,
        Operation::Acosh,
        Operation::Atanh,
        Operation::Sqrt,
        Operation::Transpose,
        Operation::Sparse,
        Operation::Full,
        Operation::Vertcat,
        Operation::Horzcat,
        Operation::Rosser,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Plus => "plus",
            Operation::Minus => "minus",
            Operation::Times => "times",
            Operation::Rdivide => "rdivide",
            Operation::Uminus => "uminus",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
            Operation::Tan => "tan",
            Operation::Sinh => "sinh",
            Operation::Cosh => "cosh",
            Operation::Tanh => "tanh",
            Operation::Exp => "exp",
            Operation::Asin => "asin",
            Operation::Acos => "acos",
            Operation::Atan => "atan",
            Operation::Asinh => "asinh",
            Operation::Acosh => "acosh",
            Operation::Atanh => "atanh",
            Operation::Sqrt => "sqrt",
            Operation::Transpose => "transpose",
            Operation::Sparse => "sparse",
            Operation::Full => "full",
            Operation::Vertcat => "vertcat",
            Operation::Horzcat => "horzcat",
            Operation::Rosser => "rosser",
        }
    }

    /// Number of operands the operation takes
    pub const fn arity(self) -> usize {
        match self {
            Operation::Rosser => 0,
            Operation::Plus
            | Operation::Minus
            | Operation::Times
            | Operation::Rdivide
            | Operation::Vertcat
            | Operation::Horzcat => 2,
            _ => 1,
        }
    }

    /// The arithmetic operator, for elementwise binary operations
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Operation::Plus => Some(BinaryOp::Plus),
            Operation::Minus => Some(BinaryOp::Minus),
            Operation::Times => Some(BinaryOp::Times),
            Operation::Rdivide => Some(BinaryOp::Rdivide),
            _ => None,
        }
    }

    /// The scalar function, for unary elementwise operations
    pub const fn unary_function(self) -> Option<UnaryFunction> {
        let function = match self {
            Operation::Uminus => UnaryFunction::Uminus,
            Operation::Sin => UnaryFunction::Sin,
            Operation::Cos => UnaryFunction::Cos,
            Operation::Tan => UnaryFunction::Tan,
            Operation::Sinh => UnaryFunction::Sinh,
            Operation::Cosh => UnaryFunction::Cosh,
            Operation::Tanh => UnaryFunction::Tanh,
            Operation::Exp => UnaryFunction::Exp,
            Operation::Asin => UnaryFunction::Asin,
            Operation::Acos => UnaryFunction::Acos,
            Operation::Atan => UnaryFunction::Atan,
            Operation::Asinh => UnaryFunction::Asinh,
            Operation::Acosh => UnaryFunction::Acosh,
            Operation::Atanh => UnaryFunction::Atanh,
            Operation::Sqrt => UnaryFunction::Sqrt,
            _ => return None,
        };
        Some(function)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::unsupported(s, &[]))
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Plus => Operation::Plus,
            BinaryOp::Minus => Operation::Minus,
            BinaryOp::Times => Operation::Times,
            BinaryOp::Rdivide => Operation::Rdivide,
        }
    }
}
