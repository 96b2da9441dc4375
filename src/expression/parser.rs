use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Deepest nesting of sub-expressions the parser accepts.
pub(crate) const MAX_NESTING: usize = 128;

/// Parse a function body. Surrounding whitespace and one leading `=` are ignored.
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let src = src.trim();
    let src = src.strip_prefix('=').unwrap_or(src);
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    if p.peek().kind == TokenKind::Eof {
        return Err(ExprError::new(0, "empty expression"));
    }
    let expr = p.parse_cond()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        // The trailing Eof is never consumed past.
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {}, found {}", describe(&kind), describe(&self.peek().kind)),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    // All recursion passes through `parse_cond` or `parse_unary`, so both count depth.
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Expr, ExprError>,
    ) -> Result<Expr, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        self.depth += 1;
        let e = parse(self);
        self.depth -= 1;
        e
    }

    fn parse_cond(&mut self) -> Result<Expr, ExprError> {
        self.nested(Self::parse_cond_inner)
    }

    fn parse_cond_inner(&mut self) -> Result<Expr, ExprError> {
        let cond = self.parse_or()?;
        if !self.consume(TokenKind::Question) {
            return Ok(cond);
        }
        let then = self.parse_cond()?;
        self.expect(TokenKind::Colon)?;
        let otherwise = self.parse_cond()?;
        Ok(Expr::Cond {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_and()?;
        while self.consume(TokenKind::OrOr) {
            let r = self.parse_and()?;
            e = binary(BinaryOp::Or, e, r);
        }
        Ok(e)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_equality()?;
        while self.consume(TokenKind::AndAnd) {
            let r = self.parse_equality()?;
            e = binary(BinaryOp::And, e, r);
        }
        Ok(e)
    }

    fn parse_equality(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_comparison()?;
        loop {
            let op = if self.consume(TokenKind::EqEq) {
                BinaryOp::Eq
            } else if self.consume(TokenKind::Ne) {
                BinaryOp::Ne
            } else {
                break;
            };
            let r = self.parse_comparison()?;
            e = binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_term()?;
        loop {
            let op = if self.consume(TokenKind::Lt) {
                BinaryOp::Lt
            } else if self.consume(TokenKind::Le) {
                BinaryOp::Le
            } else if self.consume(TokenKind::Gt) {
                BinaryOp::Gt
            } else if self.consume(TokenKind::Ge) {
                BinaryOp::Ge
            } else {
                break;
            };
            let r = self.parse_term()?;
            e = binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_factor()?;
            e = binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.consume(TokenKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        self.nested(Self::parse_unary_inner)
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        if self.consume(TokenKind::Plus) {
            return self.parse_unary();
        }
        if self.consume(TokenKind::Bang) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(e),
            });
        }
        self.parse_power()
    }

    // `-x^2` is `-(x^2)` and `2^-1` is allowed, so the exponent re-enters at unary level.
    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_postfix()?;
        if self.consume(TokenKind::Caret) {
            let exponent = self.parse_unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_primary()?;

        loop {
            if self.consume(TokenKind::Dot) {
                let t = self.bump().clone();
                let name = match t.kind {
                    TokenKind::Ident(s) => s,
                    other => {
                        return Err(ExprError::new(
                            t.span.start,
                            format!("expected identifier after '.', found {}", describe(&other)),
                        ));
                    }
                };
                e = append_path(e, name, t.span.start)?;
                continue;
            }

            if self.peek().kind == TokenKind::LParen {
                let open = self.span().start;
                self.bump();
                let args = self.parse_args()?;
                let (func, at) = match e {
                    Expr::Path { mut segments, at } if segments.len() == 1 => {
                        (segments.remove(0), at)
                    }
                    Expr::Path { segments, at } if segments.len() == 2 && segments[0] == "math" => {
                        (segments[1].clone(), at)
                    }
                    Expr::Path { segments, at } => {
                        return Err(ExprError::new(
                            at,
                            format!("unknown function '{}'", segments.join(".")),
                        ));
                    }
                    _ => {
                        return Err(ExprError::new(open, "call target must be a function name"));
                    }
                };
                e = Expr::Call { func, args, at };
                continue;
            }

            break;
        }

        Ok(e)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_cond()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Lit(Lit::F64(v))),
            TokenKind::True => Ok(Expr::Lit(Lit::Bool(true))),
            TokenKind::False => Ok(Expr::Lit(Lit::Bool(false))),
            TokenKind::Ident(s) => Ok(Expr::Path {
                segments: vec![s],
                at: t.span.start,
            }),
            TokenKind::LParen => {
                let e = self.parse_cond()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn append_path(base: Expr, segment: String, at: usize) -> Result<Expr, ExprError> {
    match base {
        Expr::Path { mut segments, at } => {
            segments.push(segment);
            Ok(Expr::Path { segments, at })
        }
        _ => Err(ExprError::new(
            at,
            "member access base must be an identifier path",
        )),
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(s) => format!("identifier '{s}'"),
        TokenKind::Number(v) => format!("number {v}"),
        TokenKind::True => "'true'".to_owned(),
        TokenKind::False => "'false'".to_owned(),
        TokenKind::LParen => "'('".to_owned(),
        TokenKind::RParen => "')'".to_owned(),
        TokenKind::Comma => "','".to_owned(),
        TokenKind::Dot => "'.'".to_owned(),
        TokenKind::Plus => "'+'".to_owned(),
        TokenKind::Minus => "'-'".to_owned(),
        TokenKind::Star => "'*'".to_owned(),
        TokenKind::Slash => "'/'".to_owned(),
        TokenKind::Percent => "'%'".to_owned(),
        TokenKind::Caret => "'^'".to_owned(),
        TokenKind::Bang => "'!'".to_owned(),
        TokenKind::EqEq => "'=='".to_owned(),
        TokenKind::Ne => "'!='".to_owned(),
        TokenKind::Lt => "'<'".to_owned(),
        TokenKind::Le => "'<='".to_owned(),
        TokenKind::Gt => "'>'".to_owned(),
        TokenKind::Ge => "'>='".to_owned(),
        TokenKind::AndAnd => "'&&'".to_owned(),
        TokenKind::OrOr => "'||'".to_owned(),
        TokenKind::Question => "'?'".to_owned(),
        TokenKind::Colon => "':'".to_owned(),
        TokenKind::Eof => "end of input".to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
