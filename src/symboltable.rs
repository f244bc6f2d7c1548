use crate::errors::{TipsError, TipsResult};
use crate::value::{Kind, Value};
use std::collections::HashMap;

/// Maps declared identifiers to their current values. Populated once per
/// declaration during parsing, then read and written by the interpreter.
/// Lifetime is one parse+run cycle; build a fresh table for the next run.
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Insert a newly declared variable with the zero value of its kind.
    pub fn declare(&mut self, name: &str, kind: Kind, line: usize) -> TipsResult<()> {
        if self.symbols.contains_key(name) {
            return Err(TipsError::DuplicateDeclaration {
                name: name.to_string(),
                line,
            });
        }
        self.symbols.insert(name.to_string(), Value::zero(kind));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.symbols.get(name).copied()
    }

    /// The declared kind of a variable never changes after declaration.
    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.symbols.get(name).map(Value::kind)
    }

    /// Replace a variable's stored value. Callers coerce to the declared
    /// kind first.
    pub fn set(&mut self, name: &str, value: Value) -> TipsResult<()> {
        match self.symbols.get_mut(name) {
            Some(slot) => {
                debug_assert_eq!(slot.kind(), value.kind());
                *slot = value;
                Ok(())
            }
            None => Err(TipsError::UndeclaredIdentifier {
                name: name.to_string(),
                line: None,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
