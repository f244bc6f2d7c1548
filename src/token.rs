use std::mem;

#[derive(Debug, Clone)]
pub enum Token {
    Ident(String),
    IntLit(i32),
    FloatLit(f64),
    StringLit(String),
    Program,
    Var,
    Begin,
    End,
    Read,
    Write,
    Integer,
    Real,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
    Assign,
    Increment,
    Decrement,
    Semicolon,
    Colon,
    LParen,
    RParen,
    Eof,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        // Compare enums that carry data while disregarding the actual data.
        mem::discriminant(self) == mem::discriminant(other)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::IntLit(value) => write!(f, "{}", value),
            Token::FloatLit(value) => write!(f, "{}", value),
            Token::StringLit(lexeme) => write!(f, "{}", lexeme),
            Token::Program => write!(f, "PROGRAM"),
            Token::Var => write!(f, "VAR"),
            Token::Begin => write!(f, "BEGIN"),
            Token::End => write!(f, "END"),
            Token::Read => write!(f, "READ"),
            Token::Write => write!(f, "WRITE"),
            Token::Integer => write!(f, "INTEGER"),
            Token::Real => write!(f, "REAL"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Multiply => write!(f, "*"),
            Token::Divide => write!(f, "/"),
            Token::Modulo => write!(f, "MOD"),
            Token::Power => write!(f, "^^"),
            Token::Assign => write!(f, ":="),
            Token::Increment => write!(f, "++"),
            Token::Decrement => write!(f, "--"),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
