use crate::errors::{TipsError, TipsResult};
use crate::token::Token;
use crate::LineNumber;
use regex::Regex;
use std::{iter::Peekable, str::Chars};

pub fn scan(state: &mut LineNumber, file_content: &str) -> TipsResult<Vec<(Token, usize)>> {
    let mut chars = file_content.chars().peekable();
    let mut lexemes: Vec<(Token, usize)> = vec![];
    // Literal grammar for numeric tokens, as the language reference writes it.
    let int_literal = Regex::new(r"^[0-9]+$").unwrap();
    let float_literal = Regex::new(r"^[0-9]+\.[0-9]+$").unwrap();

    'lexer: loop {
        if let Some(c) = chars.peek() {
            if (*c).eq(&'{') {
                comment(&mut chars, state)?;
            } else if (*c).is_whitespace() {
                whitespace(&mut chars, state);
            } else if (*c).is_alphabetic() || (*c).eq(&'_') {
                let token = identifier(&mut chars);
                lexemes.push((token, state.line));
            } else if (*c).is_numeric() {
                let token = number(&mut chars, state, &int_literal, &float_literal)?;
                lexemes.push((token, state.line));
            } else {
                let token = match *c {
                    ';' => {
                        chars.next();
                        Token::Semicolon
                    }
                    '*' => {
                        chars.next();
                        Token::Multiply
                    }
                    '/' => {
                        chars.next();
                        Token::Divide
                    }
                    '(' => {
                        chars.next();
                        Token::LParen
                    }
                    ')' => {
                        chars.next();
                        Token::RParen
                    }
                    '+' => {
                        chars.next(); // look ahead one character
                        if chars.peek() == Some(&'+') {
                            chars.next(); // consume the second '+'
                            Token::Increment
                        } else {
                            Token::Plus
                        }
                    }
                    '-' => {
                        chars.next(); // look ahead one character
                        if chars.peek() == Some(&'-') {
                            chars.next(); // consume the second '-'
                            Token::Decrement
                        } else {
                            Token::Minus
                        }
                    }
                    ':' => {
                        chars.next(); // look ahead one character
                        if chars.peek() == Some(&'=') {
                            chars.next(); // consume the '=' character
                            Token::Assign
                        } else {
                            Token::Colon
                        }
                    }
                    '^' => {
                        chars.next(); // look ahead one character
                        if chars.peek() != Some(&'^') {
                            return Err(TipsError::UnknownToken { token: '^', line: state.line });
                        }
                        chars.next(); // consume the second '^'
                        Token::Power
                    }
                    '\'' => string_literal(&mut chars, state)?,
                    _ => {
                        return Err(TipsError::UnknownToken { token: *c, line: state.line });
                    }
                };
                lexemes.push((token, state.line));
            }
        } else {
            break 'lexer;
        }
    }
    Ok(lexemes)
}

fn comment(chars: &mut Peekable<Chars<'_>>, state: &mut LineNumber) -> TipsResult<()> {
    chars.next(); // consume the opening curly brace
    for c in chars.by_ref() {
        if c == '\n' {
            state.line += 1;
        }
        if c == '}' {
            return Ok(());
        }
    }
    Err(TipsError::UnterminatedComment { line: state.line })
}

fn string_literal(chars: &mut Peekable<Chars<'_>>, state: &mut LineNumber) -> TipsResult<Token> {
    // The lexeme keeps the enclosing quotes; the parser strips them.
    let mut lexeme = String::from('\'');
    chars.next(); // consume the opening quote
    loop {
        match chars.peek() {
            Some('\'') => {
                chars.next();
                lexeme.push('\'');
                return Ok(Token::StringLit(lexeme));
            }
            Some('\n') => {
                state.line += 1;
                return Err(TipsError::MultilineString { line: state.line });
            }
            Some(c) => {
                lexeme.push(*c);
                chars.next();
            }
            None => {
                return Err(TipsError::UnterminatedString { line: state.line });
            }
        }
    }
}

fn whitespace(chars: &mut Peekable<Chars<'_>>, state: &mut LineNumber) {
    while let Some(c) = chars.peek() {
        if !c.is_whitespace() {
            break;
        }
        if *c == '\n' {
            state.line += 1;
        }
        chars.next();
    }
}

fn identifier(chars: &mut Peekable<Chars<'_>>) -> Token {
    let mut idt = String::new();
    while let Some(c) = chars.peek() {
        if (*c).is_alphanumeric() || (*c).eq(&'_') {
            idt.push(*c);
            chars.next();
        } else {
            break;
        }
    }

    match idt.as_str() {
        "PROGRAM" => Token::Program,
        "VAR" => Token::Var,
        "BEGIN" => Token::Begin,
        "END" => Token::End,
        "READ" => Token::Read,
        "WRITE" => Token::Write,
        "INTEGER" => Token::Integer,
        "REAL" => Token::Real,
        "MOD" => Token::Modulo,
        _ => Token::Ident(idt),
    }
}

fn number(
    chars: &mut Peekable<Chars<'_>>,
    state: &mut LineNumber,
    int_literal: &Regex,
    float_literal: &Regex,
) -> TipsResult<Token> {
    let mut num = String::new();
    while let Some(c) = chars.peek() {
        if (*c).is_numeric() || (*c).eq(&'.') {
            num.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    if int_literal.is_match(&num) {
        if let Ok(val) = num.parse::<i32>() {
            return Ok(Token::IntLit(val));
        }
    } else if float_literal.is_match(&num) {
        if let Ok(val) = num.parse::<f64>() {
            return Ok(Token::FloatLit(val));
        }
    }
    Err(TipsError::InvalidNumber { number: num, line: state.line })
}
