use std::fmt;

/// The two kinds a TIPS variable can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Real,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Int => write!(f, "INTEGER"),
            Kind::Real => write!(f, "REAL"),
        }
    }
}

/// A run-time numeric value: a 32-bit signed integer or a double-precision
/// real. Every expression evaluates to one of these; the symbol table stores
/// one per declared variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Real(f64),
}

impl Value {
    pub fn zero(kind: Kind) -> Self {
        match kind {
            Kind::Int => Value::Int(0),
            Kind::Real => Value::Real(0.0),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Real(_) => Kind::Real,
        }
    }

    /// Widen to a real, losslessly for integers.
    pub fn as_real(&self) -> f64 {
        match self {
            Value::Int(i) => *i as f64,
            Value::Real(r) => *r,
        }
    }
}

impl fmt::Display for Value {
    // Integers print as plain decimal, reals fixed-point with exactly four
    // fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{:.4}", r),
        }
    }
}
