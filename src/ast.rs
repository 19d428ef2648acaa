//! A debug AST printer, useful when developing the parser/resolver.
#![cfg(test)]

use crate::expr::*;

pub struct Printer;

impl Printer {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor<String> for Printer {
    fn visit_literal(&mut self, data: &LiteralData) -> String {
        data.value.to_string()
    }

    fn visit_grouping(&mut self, data: &GroupingData) -> String {
        self.parenthesize("group", &[&data.expression])
    }

    fn visit_unary(&mut self, data: &UnaryData) -> String {
        self.parenthesize(&data.operator.lexeme, &[&data.right])
    }

    fn visit_binary(&mut self, data: &BinaryData) -> String {
        self.parenthesize(&data.operator.lexeme, &[&data.left, &data.right])
    }

    fn visit_logical(&mut self, data: &LogicalData) -> String {
        self.parenthesize(&data.operator.lexeme, &[&data.left, &data.right])
    }

    fn visit_variable(&mut self, data: &VariableData) -> String {
        data.name.lexeme.clone()
    }

    fn visit_assign(&mut self, data: &AssignData) -> String {
        self.parenthesize(&format!("= {}", data.name.lexeme), &[&data.value])
    }

    fn visit_call(&mut self, data: &CallData) -> String {
        let callee = self.print(&data.callee);
        let args: Vec<&Expr> = data.arguments.iter().collect();
        self.parenthesize(&format!("call {callee}"), &args)
    }

    fn visit_get(&mut self, data: &GetData) -> String {
        self.parenthesize(&format!(". {}", data.name.lexeme), &[&data.object])
    }

    fn visit_set(&mut self, data: &SetData) -> String {
        self.parenthesize(&format!(".= {}", data.name.lexeme), &[&data.object, &data.value])
    }

    fn visit_this(&mut self, _data: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_super(&mut self, data: &SuperData) -> String {
        format!("(super {})", data.method.lexeme)
    }
}
