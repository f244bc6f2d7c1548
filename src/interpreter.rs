use crate::ast::{BinaryOp, Expr, IncDecOp, Program, Stmt, UnaryOp, WriteArg};
use crate::errors::{TipsError, TipsResult};
use crate::symboltable::SymbolTable;
use crate::value::{Kind, Value};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Tree-walking interpreter. Executes statements in order and evaluates
/// expressions recursively, reading from `input` for READ and writing
/// line-oriented records to `output` for WRITE.
pub struct Interpreter<'a, R: BufRead, W: Write> {
    table: &'a mut SymbolTable,
    input: R,
    output: W,
    // Whitespace-delimited input tokens not yet consumed by READ.
    pending: VecDeque<String>,
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    pub fn new(table: &'a mut SymbolTable, input: R, output: W) -> Self {
        Self {
            table,
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn run(&mut self, program: &Program) -> TipsResult<()> {
        for stmt in &program.block.body {
            self.execute(stmt)?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> TipsResult<()> {
        match stmt {
            Stmt::Compound(stmts) => {
                for stmt in stmts {
                    self.execute(stmt)?;
                }
                Ok(())
            }
            Stmt::Assign { name, value } => {
                let kind = self.kind_of(name)?;
                let result = self.evaluate(value)?;
                // Coerce unconditionally to the target's declared kind:
                // truncate toward zero into INTEGER, widen into REAL.
                let stored = match kind {
                    Kind::Int => match result {
                        Value::Int(i) => Value::Int(i),
                        Value::Real(r) => Value::Int(r as i32),
                    },
                    Kind::Real => Value::Real(result.as_real()),
                };
                self.table.set(name, stored)
            }
            Stmt::Read { name } => {
                let kind = self.kind_of(name)?;
                let word = self.next_input(name, kind)?;
                let value = match kind {
                    Kind::Int => word
                        .parse::<i32>()
                        .map(Value::Int)
                        .map_err(|_| input_format_error(name, kind))?,
                    Kind::Real => word
                        .parse::<f64>()
                        .map(Value::Real)
                        .map_err(|_| input_format_error(name, kind))?,
                };
                self.table.set(name, value)
            }
            Stmt::Write(WriteArg::Text(text)) => {
                writeln!(self.output, "{}", text)?;
                Ok(())
            }
            Stmt::Write(WriteArg::Variable(name)) => {
                let value = self.lookup(name)?;
                writeln!(self.output, "{}", value)?;
                Ok(())
            }
        }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> TipsResult<Value> {
        match expr {
            Expr::IntLit(value) => Ok(Value::Int(*value)),
            Expr::RealLit(value) => Ok(Value::Real(*value)),
            Expr::Ident(name) => self.lookup(name),
            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                // Preserves the operand's kind.
                Ok(match (op, value) {
                    (UnaryOp::Plus, v) => v,
                    (UnaryOp::Minus, Value::Int(i)) => Value::Int(i.wrapping_neg()),
                    (UnaryOp::Minus, Value::Real(r)) => Value::Real(-r),
                })
            }
            Expr::IncDec { op, name } => {
                // Read-modify-write with an observable side effect at
                // evaluation time; one unit in the variable's own kind.
                let updated = match (self.lookup(name)?, op) {
                    (Value::Int(i), IncDecOp::Increment) => Value::Int(i.wrapping_add(1)),
                    (Value::Int(i), IncDecOp::Decrement) => Value::Int(i.wrapping_sub(1)),
                    (Value::Real(r), IncDecOp::Increment) => Value::Real(r + 1.0),
                    (Value::Real(r), IncDecOp::Decrement) => Value::Real(r - 1.0),
                };
                self.table.set(name, updated)?;
                Ok(updated)
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                apply_binary(*op, lhs, rhs)
            }
        }
    }

    fn lookup(&self, name: &str) -> TipsResult<Value> {
        // The parser already guarantees presence; this re-check is defensive.
        self.table.get(name).ok_or_else(|| TipsError::UndeclaredIdentifier {
            name: name.to_string(),
            line: None,
        })
    }

    fn kind_of(&self, name: &str) -> TipsResult<Kind> {
        self.table.kind_of(name).ok_or_else(|| TipsError::UndeclaredIdentifier {
            name: name.to_string(),
            line: None,
        })
    }

    /// Pull the next whitespace-delimited token from the input channel,
    /// blocking on `read_line` until one is available.
    fn next_input(&mut self, name: &str, expected: Kind) -> TipsResult<String> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(word);
            }
            let mut line = String::new();
            let bytes = self.input.read_line(&mut line)?;
            if bytes == 0 {
                return Err(input_format_error(name, expected));
            }
            self.pending.extend(line.split_whitespace().map(String::from));
        }
    }
}

fn input_format_error(name: &str, expected: Kind) -> TipsError {
    TipsError::InputFormatError {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> TipsResult<Value> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
            // Either operand real widens both; two ints stay int with 32-bit
            // two's-complement wraparound.
            if lhs.kind() == Kind::Real || rhs.kind() == Kind::Real {
                let a = lhs.as_real();
                let b = rhs.as_real();
                Ok(Value::Real(match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    _ => a * b,
                }))
            } else {
                let (Value::Int(a), Value::Int(b)) = (lhs, rhs) else {
                    unreachable!()
                };
                Ok(Value::Int(match op {
                    BinaryOp::Add => a.wrapping_add(b),
                    BinaryOp::Sub => a.wrapping_sub(b),
                    _ => a.wrapping_mul(b),
                }))
            }
        }
        BinaryOp::Div => {
            // Division always yields REAL, whatever the operand kinds.
            let divisor = rhs.as_real();
            if divisor == 0.0 {
                return Err(TipsError::DivisionByZero);
            }
            Ok(Value::Real(lhs.as_real() / divisor))
        }
        BinaryOp::Mod => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                if b == 0 {
                    return Err(TipsError::DivisionByZero);
                }
                // Normalize the remainder to the sign of the divisor.
                let mut r = a.wrapping_rem(b);
                if r != 0 && (r < 0) != (b < 0) {
                    r = r.wrapping_add(b);
                }
                Ok(Value::Int(r))
            }
            _ => Err(TipsError::type_error("MOD requires INTEGER operands")),
        },
        BinaryOp::Pow => match (lhs, rhs) {
            (Value::Int(base), Value::Int(exponent)) if exponent >= 0 => {
                Ok(Value::Int(pow_int(base, exponent)))
            }
            _ => Ok(Value::Real(lhs.as_real().powf(rhs.as_real()))),
        },
    }
}

// 32-bit multiply that wraps instead of failing: widen to 64 bits for the
// product, truncate back.
fn mul_wrap(a: i32, b: i32) -> i32 {
    (a as i64 * b as i64) as i32
}

/// Integer power by repeated squaring, wrapping on overflow. The exponent is
/// non-negative by the time we get here.
fn pow_int(base: i32, exponent: i32) -> i32 {
    let mut result = 1;
    let mut factor = base;
    let mut e = exponent as u32;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_wrap(result, factor);
        }
        e >>= 1;
        if e > 0 {
            factor = mul_wrap(factor, factor);
        }
    }
    result
}
