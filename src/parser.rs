use crate::error::Reporter;
use crate::expr::*;
use crate::object::Object;
use crate::stmt::*;
use crate::token::{Token, TokenKind};

const MAX_ARGS: usize = 255;

/// Signals that a production failed to parse; the caller that catches it
/// is responsible for calling `synchronize`. Carries no data because the
/// diagnostic has already been reported to the `Reporter` at the point of
/// failure.
struct ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: u64,
}

impl Parser {
    /// `id_seed` offsets the minted expression-identity counter so that
    /// separate parses (successive REPL lines) never mint colliding ids
    /// even though each starts a fresh `Parser`.
    pub fn new(tokens: Vec<Token>, id_seed: u64) -> Self {
        Parser {
            tokens,
            current: 0,
            next_id: id_seed,
        }
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The next id that would be minted; becomes the next parse's seed.
    pub fn next_id_seed(&self) -> u64 {
        self.next_id
    }

    pub fn parse(&mut self, reporter: &mut Reporter) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration(reporter) {
                statements.push(stmt);
            }
        }
        statements
    }

    // ---- declarations ----

    fn declaration(&mut self, reporter: &mut Reporter) -> Option<Stmt> {
        let result = if self.match_kinds(&[TokenKind::Class]) {
            self.class_declaration(reporter)
        } else if self.match_kinds(&[TokenKind::Fun]) {
            self.function("function", reporter).map(Stmt::Function)
        } else if self.match_kinds(&[TokenKind::Var]) {
            self.var_declaration(reporter)
        } else {
            self.statement(reporter)
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(ParseError) => {
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.", reporter)?;

        let superclass = if self.match_kinds(&[TokenKind::Less]) {
            let superclass_name =
                self.consume(TokenKind::Identifier, "Expect superclass name.", reporter)?;
            Some(VariableData {
                id: self.mint_id(),
                name: superclass_name,
            })
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.", reporter)?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method", reporter)?);
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.", reporter)?;

        Ok(Stmt::Class(ClassData {
            name,
            superclass,
            methods,
        }))
    }

    fn function(
        &mut self,
        kind: &str,
        reporter: &mut Reporter,
    ) -> Result<std::rc::Rc<FunctionData>, ParseError> {
        let name = self.consume(
            TokenKind::Identifier,
            &format!("Expect {kind} name."),
            reporter,
        )?;
        self.consume(
            TokenKind::LeftParen,
            &format!("Expect '(' after {kind} name."),
            reporter,
        )?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    reporter.error_at_token(&self.peek(), "Can't have more than 255 parameters.");
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.", reporter)?);
                if !self.match_kinds(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.", reporter)?;

        self.consume(
            TokenKind::LeftBrace,
            &format!("Expect '{{' before {kind} body."),
            reporter,
        )?;
        let body = self.block(reporter)?;

        Ok(std::rc::Rc::new(FunctionData { name, params, body }))
    }

    fn var_declaration(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.", reporter)?;

        let initializer = if self.match_kinds(&[TokenKind::Equal]) {
            Some(self.expression(reporter)?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
            reporter,
        )?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    // ---- statements ----

    fn statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        if self.match_kinds(&[TokenKind::For]) {
            return self.for_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::If]) {
            return self.if_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::Print]) {
            return self.print_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::Return]) {
            return self.return_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::Break]) {
            return self.break_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::While]) {
            return self.while_statement(reporter);
        }
        if self.match_kinds(&[TokenKind::LeftBrace]) {
            return Ok(Stmt::Block(BlockData {
                statements: self.block(reporter)?,
            }));
        }
        self.expression_statement(reporter)
    }

    fn for_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.", reporter)?;

        let initializer = if self.match_kinds(&[TokenKind::Semicolon]) {
            None
        } else if self.match_kinds(&[TokenKind::Var]) {
            Some(self.var_declaration(reporter)?)
        } else {
            Some(self.expression_statement(reporter)?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression(reporter)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.", reporter)?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression(reporter)?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.", reporter)?;

        let mut body = self.statement(reporter)?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![body, Stmt::Expression(ExpressionData { expression: increment })],
            });
        }

        let condition = condition.unwrap_or(Expr::Literal(LiteralData { value: Object::Bool(true) }));
        body = Stmt::While(WhileData {
            condition,
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData {
                statements: vec![initializer, body],
            });
        }

        Ok(body)
    }

    fn if_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.", reporter)?;
        let condition = self.expression(reporter)?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.", reporter)?;

        let then_branch = Box::new(self.statement(reporter)?);
        let else_branch = if self.match_kinds(&[TokenKind::Else]) {
            Some(Box::new(self.statement(reporter)?))
        } else {
            None
        };

        Ok(Stmt::If(IfData {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn print_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let value = self.expression(reporter)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.", reporter)?;
        Ok(Stmt::Print(PrintData { expression: value }))
    }

    fn return_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let keyword = self.previous();
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression(reporter)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.", reporter)?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn break_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let keyword = self.previous();
        self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.", reporter)?;
        Ok(Stmt::Break(BreakData { keyword }))
    }

    fn while_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.", reporter)?;
        let condition = self.expression(reporter)?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.", reporter)?;
        let body = Box::new(self.statement(reporter)?);
        Ok(Stmt::While(WhileData { condition, body }))
    }

    fn block(&mut self, reporter: &mut Reporter) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration(reporter) {
                statements.push(stmt);
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.", reporter)?;
        Ok(statements)
    }

    fn expression_statement(&mut self, reporter: &mut Reporter) -> Result<Stmt, ParseError> {
        let expr = self.expression(reporter)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.", reporter)?;
        Ok(Stmt::Expression(ExpressionData { expression: expr }))
    }

    // ---- expressions ----

    fn expression(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        self.assignment(reporter)
    }

    fn assignment(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let expr = self.or(reporter)?;

        if self.match_kinds(&[TokenKind::Equal]) {
            let equals = self.previous();
            let value = self.assignment(reporter)?;

            return match expr {
                Expr::Variable(data) => Ok(Expr::Assign(AssignData {
                    id: self.mint_id(),
                    name: data.name,
                    value: Box::new(value),
                })),
                Expr::Get(data) => Ok(Expr::Set(SetData {
                    object: data.object,
                    name: data.name,
                    value: Box::new(value),
                })),
                _ => {
                    reporter.error_at_token(&equals, "Invalid assignment target.");
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.and(reporter)?;
        while self.match_kinds(&[TokenKind::Or]) {
            let operator = self.previous();
            let right = self.and(reporter)?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn and(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.equality(reporter)?;
        while self.match_kinds(&[TokenKind::And]) {
            let operator = self.previous();
            let right = self.equality(reporter)?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn equality(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.comparison(reporter)?;
        while self.match_kinds(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous();
            let right = self.comparison(reporter)?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn comparison(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.term(reporter)?;
        while self.match_kinds(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous();
            let right = self.term(reporter)?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn term(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.factor(reporter)?;
        while self.match_kinds(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous();
            let right = self.factor(reporter)?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn factor(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.unary(reporter)?;
        while self.match_kinds(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous();
            let right = self.unary(reporter)?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn unary(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous();
            let right = self.unary(reporter)?;
            return Ok(Expr::Unary(UnaryData {
                operator,
                right: Box::new(right),
            }));
        }
        self.call(reporter)
    }

    fn call(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut expr = self.primary(reporter)?;

        loop {
            if self.match_kinds(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr, reporter)?;
            } else if self.match_kinds(&[TokenKind::Dot]) {
                let name = self.consume(
                    TokenKind::Identifier,
                    "Expect property name after '.'.",
                    reporter,
                )?;
                expr = Expr::Get(GetData {
                    object: Box::new(expr),
                    name,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    reporter.error_at_token(&self.peek(), "Can't have more than 255 arguments.");
                }
                arguments.push(self.expression(reporter)?);
                if !self.match_kinds(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.", reporter)?;

        Ok(Expr::Call(CallData {
            callee: Box::new(callee),
            paren,
            arguments,
        }))
    }

    fn primary(&mut self, reporter: &mut Reporter) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::Literal(LiteralData { value: Object::Bool(false) }));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::Literal(LiteralData { value: Object::Bool(true) }));
        }
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expr::Literal(LiteralData { value: Object::Nil }));
        }
        if self.match_kinds(&[TokenKind::Number]) {
            let value = match self.previous().literal {
                Some(crate::literal::Literal::Number(n)) => n,
                _ => unreachable!("NUMBER token without a numeric literal"),
            };
            return Ok(Expr::Literal(LiteralData { value: Object::Number(value) }));
        }
        if self.match_kinds(&[TokenKind::String]) {
            let value = match self.previous().literal {
                Some(crate::literal::Literal::Str(s)) => s,
                _ => unreachable!("STRING token without a string literal"),
            };
            return Ok(Expr::Literal(LiteralData { value: Object::Str(value) }));
        }
        if self.match_kinds(&[TokenKind::Super]) {
            let keyword = self.previous();
            self.consume(TokenKind::Dot, "Expect '.' after 'super'.", reporter)?;
            let method = self.consume(TokenKind::Identifier, "Expect superclass method name.", reporter)?;
            return Ok(Expr::Super(SuperData {
                id: self.mint_id(),
                keyword,
                method,
            }));
        }
        if self.match_kinds(&[TokenKind::This]) {
            return Ok(Expr::This(ThisData {
                id: self.mint_id(),
                keyword: self.previous(),
            }));
        }
        if self.match_kinds(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable(VariableData {
                id: self.mint_id(),
                name: self.previous(),
            }));
        }
        if self.match_kinds(&[TokenKind::LeftParen]) {
            let expr = self.expression(reporter)?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.", reporter)?;
            return Ok(Expr::Grouping(GroupingData {
                expression: Box::new(expr),
            }));
        }

        reporter.error_at_token(&self.peek(), "Expect expression.");
        Err(ParseError)
    }

    // ---- token stream helpers ----

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str, reporter: &mut Reporter) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        reporter.error_at_token(&self.peek(), message);
        Err(ParseError)
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Break => return,
                _ => {}
            }

            self.advance();
        }
    }
}
