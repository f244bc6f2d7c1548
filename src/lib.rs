use std::{fs::File, io::Read, path::Path};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod symboltable;
pub mod token;
pub mod value;

pub const VERSION: &str = "0.1.0";

pub struct LineNumber {
    pub line: usize,
}

impl Default for LineNumber {
    fn default() -> Self {
        Self { line: 1 }
    }
}

use crate::errors::{TipsError, TipsResult};

pub fn read(filename: &Path) -> TipsResult<String> {
    let path = Path::new(filename);

    match path.extension() {
        Some(ext) => {
            if !ext.eq("tips") {
                return Err(TipsError::FileReadError("File must have a .tips extension".to_string()));
            }
        }
        None => {
            return Err(TipsError::FileReadError("File must have a .tips extension".to_string()));
        }
    }
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
