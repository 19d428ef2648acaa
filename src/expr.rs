use std::rc::Rc;

use crate::object::Object;
use crate::token::Token;

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralData),
    Grouping(GroupingData),
    Unary(UnaryData),
    Binary(BinaryData),
    Logical(LogicalData),
    Variable(VariableData),
    Assign(AssignData),
    Call(CallData),
    Get(GetData),
    Set(SetData),
    This(ThisData),
    Super(SuperData),
}

#[derive(Debug, Clone)]
pub struct LiteralData {
    pub value: Object,
}

#[derive(Debug, Clone)]
pub struct GroupingData {
    pub expression: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct UnaryData {
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LogicalData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// `id` is a parser-minted identity distinct from the variable's lexeme,
/// used as the resolver side-table key so that two distinct occurrences
/// of the same name never collide.
#[derive(Debug, Clone)]
pub struct VariableData {
    pub id: u64,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct AssignData {
    pub id: u64,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct CallData {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetData {
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct SetData {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct ThisData {
    pub id: u64,
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct SuperData {
    pub id: u64,
    pub keyword: Token,
    pub method: Token,
}

pub trait ExprVisitor<T> {
    fn visit_literal(&mut self, data: &LiteralData) -> T;
    fn visit_grouping(&mut self, data: &GroupingData) -> T;
    fn visit_unary(&mut self, data: &UnaryData) -> T;
    fn visit_binary(&mut self, data: &BinaryData) -> T;
    fn visit_logical(&mut self, data: &LogicalData) -> T;
    fn visit_variable(&mut self, data: &VariableData) -> T;
    fn visit_assign(&mut self, data: &AssignData) -> T;
    fn visit_call(&mut self, data: &CallData) -> T;
    fn visit_get(&mut self, data: &GetData) -> T;
    fn visit_set(&mut self, data: &SetData) -> T;
    fn visit_this(&mut self, data: &ThisData) -> T;
    fn visit_super(&mut self, data: &SuperData) -> T;
}

impl Expr {
    pub fn accept<T>(&self, visitor: &mut dyn ExprVisitor<T>) -> T {
        match self {
            Expr::Literal(d) => visitor.visit_literal(d),
            Expr::Grouping(d) => visitor.visit_grouping(d),
            Expr::Unary(d) => visitor.visit_unary(d),
            Expr::Binary(d) => visitor.visit_binary(d),
            Expr::Logical(d) => visitor.visit_logical(d),
            Expr::Variable(d) => visitor.visit_variable(d),
            Expr::Assign(d) => visitor.visit_assign(d),
            Expr::Call(d) => visitor.visit_call(d),
            Expr::Get(d) => visitor.visit_get(d),
            Expr::Set(d) => visitor.visit_set(d),
            Expr::This(d) => visitor.visit_this(d),
            Expr::Super(d) => visitor.visit_super(d),
        }
    }
}

/// Shared alias used by the parser when threading expressions through
/// `Rc` for statements that need to share ownership (function bodies).
pub type ExprRc = Rc<Expr>;
