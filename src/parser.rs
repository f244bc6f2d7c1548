use crate::ast::{BinaryOp, Block, Decl, Expr, IncDecOp, Program, Stmt, UnaryOp, WriteArg};
use crate::errors::{TipsError, TipsResult};
use crate::symboltable::SymbolTable;
use crate::token::Token;
use crate::value::Kind;
use std::slice::Iter;

/// Recursive-descent parser with a single token of lookahead. Builds the AST
/// bottom-up in one pass and validates identifier declarations against the
/// symbol table as it goes.
pub struct Parser<'a> {
    current_token: Token,
    line_number: usize,
    iter: Iter<'a, (Token, usize)>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, usize)]) -> Self {
        let mut parser = Self {
            current_token: Token::Eof,
            line_number: 1,
            iter: tokens.iter(),
        };
        parser.next();
        parser
    }

    /// The current lookahead token, not consumed.
    fn peek(&self) -> &Token {
        &self.current_token
    }

    fn next(&mut self) {
        match self.iter.next() {
            Some((element, line)) => {
                self.current_token = element.clone();
                self.line_number = *line;
            }
            None => {
                self.current_token = Token::Eof;
            }
        }
    }

    /// Consume the current token if it matches, otherwise fail with the
    /// expected kind, the actual kind and the supplied context.
    fn expect(&mut self, expected: Token, context: &str) -> TipsResult<()> {
        if expected != self.current_token {
            return Err(TipsError::unexpected_token(
                format!("'{}'", expected),
                self.current_token.to_string(),
                context,
                self.line_number,
            ));
        }
        self.next();
        Ok(())
    }

    /// Non-failing variant of `expect`: consume on match, report whether a
    /// match occurred.
    fn accept(&mut self, expected: &Token) -> bool {
        if *expected == self.current_token {
            self.next();
            return true;
        }
        false
    }

    fn expect_ident(&mut self, context: &str) -> TipsResult<String> {
        match &self.current_token {
            Token::Ident(name) => {
                let name = name.clone();
                self.next();
                Ok(name)
            }
            _ => Err(TipsError::unexpected_token(
                "identifier",
                self.current_token.to_string(),
                context,
                self.line_number,
            )),
        }
    }

    /// Every identifier occurrence outside its own declaration must already
    /// be in the symbol table.
    fn check_declared(&self, table: &SymbolTable, name: &str) -> TipsResult<()> {
        if !table.contains(name) {
            return Err(TipsError::UndeclaredIdentifier {
                name: name.to_string(),
                line: Some(self.line_number),
            });
        }
        Ok(())
    }

    /// program = "PROGRAM" ident ";" block
    ///
    /// The token stream must be exhausted once the block is parsed.
    fn program(&mut self, table: &mut SymbolTable) -> TipsResult<Program> {
        self.expect(Token::Program, "at start of program")?;
        let name = self.expect_ident("for program name")?;
        self.expect(Token::Semicolon, "after program name")?;
        let block = self.block(table)?;
        if self.current_token != Token::Eof {
            return Err(TipsError::TrailingInput {
                found: self.current_token.to_string(),
                line: self.line_number,
            });
        }
        Ok(Program { name, block })
    }

    /// block = declarations compound
    fn block(&mut self, table: &mut SymbolTable) -> TipsResult<Block> {
        let decls = self.declarations(table)?;
        let body = self.compound(table)?;
        Ok(Block { decls, body })
    }

    /// declarations = [ "VAR" { ident ":" type ";" } ]
    fn declarations(&mut self, table: &mut SymbolTable) -> TipsResult<Vec<Decl>> {
        let mut decls = Vec::new();
        if !self.accept(&Token::Var) {
            return Ok(decls);
        }
        while matches!(self.current_token, Token::Ident(_)) {
            let line = self.line_number;
            let name = self.expect_ident("for declaration name")?;
            self.expect(Token::Colon, "after identifier in declaration")?;
            let kind = self.type_spec()?;
            table.declare(&name, kind, line)?;
            self.expect(Token::Semicolon, "after declaration")?;
            decls.push(Decl { name, kind });
        }
        Ok(decls)
    }

    /// type = "INTEGER" | "REAL"
    fn type_spec(&mut self) -> TipsResult<Kind> {
        match self.peek() {
            Token::Integer => {
                self.next();
                Ok(Kind::Int)
            }
            Token::Real => {
                self.next();
                Ok(Kind::Real)
            }
            _ => Err(TipsError::ExpectedType {
                found: self.current_token.to_string(),
                line: self.line_number,
            }),
        }
    }

    /// compound = "BEGIN" [ statement { ";" statement } ] "END"
    ///
    /// An empty compound is legal.
    fn compound(&mut self, table: &mut SymbolTable) -> TipsResult<Vec<Stmt>> {
        self.expect(Token::Begin, "to open compound statement")?;
        let mut stmts = Vec::new();
        if self.current_token != Token::End {
            stmts.push(self.statement(table)?);
            while self.accept(&Token::Semicolon) {
                stmts.push(self.statement(table)?);
            }
        }
        self.expect(Token::End, "to close compound statement")?;
        Ok(stmts)
    }

    /// statement = ident ":=" expression
    ///           | "READ" "(" ident ")"
    ///           | "WRITE" "(" ( string | ident ) ")"
    ///           | compound
    fn statement(&mut self, table: &mut SymbolTable) -> TipsResult<Stmt> {
        match &self.current_token {
            Token::Ident(_) => self.assignment(table),
            Token::Read => self.read_statement(table),
            Token::Write => self.write_statement(table),
            Token::Begin => Ok(Stmt::Compound(self.compound(table)?)),
            _ => Err(TipsError::unexpected_token(
                "statement",
                self.current_token.to_string(),
                "in compound statement",
                self.line_number,
            )),
        }
    }

    fn assignment(&mut self, table: &mut SymbolTable) -> TipsResult<Stmt> {
        let name = self.expect_ident("for assignment target")?;
        self.check_declared(table, &name)?;
        self.expect(Token::Assign, "after assignment target")?;
        let value = self.expression(table)?;
        Ok(Stmt::Assign { name, value })
    }

    fn read_statement(&mut self, table: &mut SymbolTable) -> TipsResult<Stmt> {
        self.expect(Token::Read, "in read statement")?;
        self.expect(Token::LParen, "after READ")?;
        let name = self.expect_ident("to READ into")?;
        self.check_declared(table, &name)?;
        self.expect(Token::RParen, "after READ target")?;
        Ok(Stmt::Read { name })
    }

    fn write_statement(&mut self, table: &mut SymbolTable) -> TipsResult<Stmt> {
        self.expect(Token::Write, "in write statement")?;
        self.expect(Token::LParen, "after WRITE")?;
        let arg = match &self.current_token {
            Token::StringLit(lexeme) => {
                let text = strip_quotes(lexeme);
                self.next();
                WriteArg::Text(text)
            }
            Token::Ident(_) => {
                let name = self.expect_ident("in WRITE(...)")?;
                self.check_declared(table, &name)?;
                WriteArg::Variable(name)
            }
            _ => {
                return Err(TipsError::unexpected_token(
                    "string literal or identifier",
                    self.current_token.to_string(),
                    "inside WRITE(...)",
                    self.line_number,
                ));
            }
        };
        self.expect(Token::RParen, "after WRITE argument")?;
        Ok(Stmt::Write(arg))
    }

    /// expression = simple
    ///
    /// Kept as its own production so later language stages can extend it.
    fn expression(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        self.simple(table)
    }

    /// simple = term { ( "+" | "-" ) term }        left-associative
    fn simple(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        let mut lhs = self.term(table)?;
        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.next();
            let rhs = self.term(table)?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    /// term = power { ( "*" | "/" | "MOD" ) power }        left-associative
    fn term(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        let mut lhs = self.power(table)?;
        loop {
            let op = match self.current_token {
                Token::Multiply => BinaryOp::Mul,
                Token::Divide => BinaryOp::Div,
                Token::Modulo => BinaryOp::Mod,
                _ => break,
            };
            self.next();
            let rhs = self.power(table)?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    /// power = unary [ "^^" power ]        right-associative
    fn power(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        let base = self.unary(table)?;
        if self.accept(&Token::Power) {
            let exponent = self.power(table)?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    /// unary = ( "+" | "-" ) unary | "++" ident | "--" ident | primary
    fn unary(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        match self.current_token {
            Token::Plus => {
                self.next();
                let operand = self.unary(table)?;
                Ok(Expr::Unary { op: UnaryOp::Plus, operand: Box::new(operand) })
            }
            Token::Minus => {
                self.next();
                let operand = self.unary(table)?;
                Ok(Expr::Unary { op: UnaryOp::Minus, operand: Box::new(operand) })
            }
            Token::Increment => {
                self.next();
                let name = self.expect_ident("after '++'")?;
                self.check_declared(table, &name)?;
                Ok(Expr::IncDec { op: IncDecOp::Increment, name })
            }
            Token::Decrement => {
                self.next();
                let name = self.expect_ident("after '--'")?;
                self.check_declared(table, &name)?;
                Ok(Expr::IncDec { op: IncDecOp::Decrement, name })
            }
            _ => self.primary(table),
        }
    }

    /// primary = "(" expression ")" | intlit | floatlit | ident
    fn primary(&mut self, table: &mut SymbolTable) -> TipsResult<Expr> {
        match &self.current_token {
            Token::LParen => {
                self.next();
                let expr = self.expression(table)?;
                self.expect(Token::RParen, "to close parenthesized expression")?;
                Ok(expr)
            }
            Token::IntLit(value) => {
                let value = *value;
                self.next();
                Ok(Expr::IntLit(value))
            }
            Token::FloatLit(value) => {
                let value = *value;
                self.next();
                Ok(Expr::RealLit(value))
            }
            Token::Ident(_) => {
                let name = self.expect_ident("in expression")?;
                self.check_declared(table, &name)?;
                Ok(Expr::Ident(name))
            }
            _ => Err(TipsError::unexpected_token(
                "expression",
                self.current_token.to_string(),
                "in expression",
                self.line_number,
            )),
        }
    }

    pub fn parse(&mut self, table: &mut SymbolTable) -> TipsResult<Program> {
        self.program(table)
    }
}

/// Strip the enclosing quote characters from a string-literal lexeme.
fn strip_quotes(lexeme: &str) -> String {
    lexeme
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(lexeme)
        .to_string()
}
