/*
*                    tipsi -- TIPS subset interpreter.
*
* program      = "PROGRAM" ident ";" block ;
* block        = declarations compound ;
* declarations = [ "VAR" { ident ":" type ";" } ] ;
* type         = "INTEGER" | "REAL" ;
* compound     = "BEGIN" [ statement { ";" statement } ] "END" ;
* statement    = ident ":=" expression
*              | "READ" "(" ident ")"
*              | "WRITE" "(" ( string | ident ) ")"
*              | compound ;
* expression   = simple ;
* simple       = term { ( "+" | "-" ) term } ;
* term         = power { ( "*" | "/" | "MOD" ) power } ;
* power        = unary [ "^^" power ] ;
* unary        = ( "+" | "-" ) unary | "++" ident | "--" ident | primary ;
* primary      = "(" expression ")" | intlit | floatlit | ident ;
*/

use crate::value::Kind;

pub struct Program {
    pub name: String,
    pub block: Block,
}

pub struct Block {
    pub decls: Vec<Decl>,
    /// The BEGIN ... END statement sequence of the program body.
    pub body: Vec<Stmt>,
}

pub struct Decl {
    pub name: String,
    pub kind: Kind,
}

pub enum Stmt {
    Assign { name: String, value: Expr },
    Read { name: String },
    Write(WriteArg),
    Compound(Vec<Stmt>),
}

pub enum WriteArg {
    /// A string literal, quotes already stripped.
    Text(String),
    Variable(String),
}

pub enum Expr {
    IntLit(i32),
    RealLit(f64),
    Ident(String),
    Unary { op: UnaryOp, operand: Box<Expr> },
    IncDec { op: IncDecOp, name: String },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "MOD",
            BinaryOp::Pow => "^^",
        }
    }
}

// ----------------------------------------------------------------------------
// Debug tree dump: one line per node with ASCII branch glyphs, children
// indented beneath.
// ----------------------------------------------------------------------------

fn tree_line(out: &mut String, prefix: &str, last: bool, label: &str) {
    out.push_str(prefix);
    out.push_str(if last { "└── " } else { "├── " });
    out.push_str(label);
    out.push('\n');
}

fn child_prefix(prefix: &str, last: bool) -> String {
    format!("{}{}", prefix, if last { "    " } else { "│   " })
}

impl Program {
    pub fn render_tree(&self) -> String {
        let mut out = String::from("Program\n");
        tree_line(&mut out, "", false, &format!("name: {}", self.name));
        self.block.render(&mut out, "", true);
        out
    }
}

impl Block {
    fn render(&self, out: &mut String, prefix: &str, last: bool) {
        tree_line(out, prefix, last, "Block");
        let kid = child_prefix(prefix, last);
        if !self.decls.is_empty() {
            tree_line(out, &kid, false, "VAR");
            let var_kid = child_prefix(&kid, false);
            for decl in &self.decls {
                tree_line(out, &var_kid, false, &format!("{} : {};", decl.name, decl.kind));
            }
        }
        render_compound(&self.body, out, &kid, true);
    }
}

fn render_compound(stmts: &[Stmt], out: &mut String, prefix: &str, last: bool) {
    tree_line(out, prefix, last, "BEGIN");
    let kid = child_prefix(prefix, last);
    if stmts.is_empty() {
        tree_line(out, &kid, true, "(empty)");
    } else {
        for (i, stmt) in stmts.iter().enumerate() {
            stmt.render(out, &kid, i + 1 == stmts.len());
        }
    }
    tree_line(out, prefix, true, "END");
}

impl Stmt {
    fn render(&self, out: &mut String, prefix: &str, last: bool) {
        match self {
            Stmt::Assign { name, value } => {
                tree_line(out, prefix, last, &format!("Assign {} :=", name));
                value.render(out, &child_prefix(prefix, last), true);
            }
            Stmt::Read { name } => {
                tree_line(out, prefix, last, &format!("Read({})", name));
            }
            Stmt::Write(WriteArg::Text(text)) => {
                tree_line(out, prefix, last, &format!("Write('{}')", text));
            }
            Stmt::Write(WriteArg::Variable(name)) => {
                tree_line(out, prefix, last, &format!("Write({})", name));
            }
            Stmt::Compound(stmts) => {
                render_compound(stmts, out, prefix, last);
            }
        }
    }
}

impl Expr {
    fn render(&self, out: &mut String, prefix: &str, last: bool) {
        match self {
            Expr::IntLit(value) => {
                tree_line(out, prefix, last, &format!("INT {}", value));
            }
            Expr::RealLit(value) => {
                tree_line(out, prefix, last, &format!("REAL {}", value));
            }
            Expr::Ident(name) => {
                tree_line(out, prefix, last, &format!("IDENT {}", name));
            }
            Expr::Unary { op, operand } => {
                let symbol = match op {
                    UnaryOp::Plus => "+",
                    UnaryOp::Minus => "-",
                };
                tree_line(out, prefix, last, &format!("Unary({})", symbol));
                operand.render(out, &child_prefix(prefix, last), true);
            }
            Expr::IncDec { op, name } => {
                let label = match op {
                    IncDecOp::Increment => format!("PreInc({})", name),
                    IncDecOp::Decrement => format!("PreDec({})", name),
                };
                tree_line(out, prefix, last, &label);
            }
            Expr::Binary { op, lhs, rhs } => {
                tree_line(out, prefix, last, &format!("Bin({})", op.symbol()));
                let kid = child_prefix(prefix, last);
                lhs.render(out, &kid, false);
                rhs.render(out, &kid, true);
            }
        }
    }
}
