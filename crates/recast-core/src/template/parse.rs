// Snippet mini-parser for templates
// Hand-rolled lexer and recursive descent over the small fragment grammar
// templates need: parameter lists, assignment/return/expression statements,
// and method declarations used as class-body statements. `#{}` is a
// placeholder token at the top level and an inline marker inside strings.

use super::{count_statement_markers, Fragment};
use crate::errors::RecastError;
use crate::tree::{build, Expr, ModifierKind, Statement};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Placeholder,
    Comma,
    Semi,
    Dot,
    Assign,
    LParen,
    RParen,
    LBrace,
    RBrace,
}

fn lex(snippet: &str) -> Result<Vec<Token>, RecastError> {
    let mut tokens = Vec::new();
    let mut chars = snippet.chars().peekable();
    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semi);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Assign);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '{' => {
                chars.next();
                tokens.push(Token::LBrace);
            }
            '}' => {
                chars.next();
                tokens.push(Token::RBrace);
            }
            '#' => {
                chars.next();
                if chars.next() != Some('{') || chars.next() != Some('}') {
                    return Err(RecastError::template_syntax(
                        snippet,
                        "`#` must introduce a `#{}` placeholder",
                    ));
                }
                tokens.push(Token::Placeholder);
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('"') => value.push('"'),
                            Some('\\') => value.push('\\'),
                            Some('n') => value.push('\n'),
                            _ => {
                                return Err(RecastError::template_syntax(
                                    snippet,
                                    "unsupported escape in string literal",
                                ))
                            }
                        },
                        Some(c) => value.push(c),
                        None => {
                            return Err(RecastError::template_syntax(
                                snippet,
                                "unterminated string literal",
                            ))
                        }
                    }
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(word));
            }
            other => {
                return Err(RecastError::template_syntax(
                    snippet,
                    format!("unexpected character `{other}`"),
                ));
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    snippet: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    next_slot: usize,
}

impl<'a> Parser<'a> {
    fn new(snippet: &'a str) -> Result<Self, RecastError> {
        Ok(Self {
            snippet,
            tokens: lex(snippet)?,
            pos: 0,
            next_slot: 0,
        })
    }

    fn err(&self, message: impl Into<String>) -> RecastError {
        RecastError::template_syntax(self.snippet, message)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), RecastError> {
        match self.peek() {
            Some(token) if token == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.err(format!("expected {what}"))),
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, RecastError> {
        match self.advance() {
            Some(Token::Ident(word)) => Ok(word),
            _ => Err(self.err(format!("expected {what}"))),
        }
    }

    /// A possibly dotted type name, joined back with `.`.
    fn type_name(&mut self) -> Result<String, RecastError> {
        let mut name = self.ident("a type name")?;
        while matches!(self.peek(), Some(Token::Dot)) {
            self.pos += 1;
            name.push('.');
            name.push_str(&self.ident("a type name segment")?);
        }
        Ok(name)
    }

    fn parameter_item(&mut self) -> Result<Fragment, RecastError> {
        if matches!(self.peek(), Some(Token::Placeholder)) {
            self.pos += 1;
            let slot = self.next_slot;
            self.next_slot += 1;
            return Ok(Fragment::ParameterSlot(slot));
        }
        let type_ = self.type_name()?;
        let name = self.ident("a parameter name")?;
        Ok(Fragment::Parameter(build::param(type_, name)))
    }

    fn expr(&mut self) -> Result<Expr, RecastError> {
        let mut expr = match self.advance() {
            Some(Token::Str(value)) => return Ok(build::string_lit(value)),
            Some(Token::Ident(name)) => build::name_ref(name),
            _ => return Err(self.err("expected an expression")),
        };
        while matches!(self.peek(), Some(Token::Dot)) {
            self.pos += 1;
            let field = self.ident("a field name")?;
            expr = build::field_access(expr, field);
        }
        Ok(expr)
    }

    /// Attempt a method declaration; restores the cursor and yields `None`
    /// when the lookahead does not commit to one.
    fn try_method_decl(&mut self) -> Result<Option<Statement>, RecastError> {
        let start = self.pos;
        let mut modifiers = Vec::new();
        while let Some(Token::Ident(word)) = self.peek() {
            match ModifierKind::from_keyword(word) {
                Some(kind) => {
                    self.pos += 1;
                    modifiers.push(kind);
                }
                None => break,
            }
        }
        let return_type = match self.peek() {
            Some(Token::Ident(_)) => self.type_name()?,
            _ => {
                self.pos = start;
                return Ok(None);
            }
        };
        let name = match self.peek() {
            Some(Token::Ident(_)) => self.ident("a method name")?,
            _ => {
                self.pos = start;
                return Ok(None);
            }
        };
        if !matches!(self.peek(), Some(Token::LParen)) {
            self.pos = start;
            return Ok(None);
        }
        self.pos += 1;
        let mut parameters = Vec::new();
        if !matches!(self.peek(), Some(Token::RParen)) {
            loop {
                let type_ = self.type_name()?;
                let pname = self.ident("a parameter name")?;
                parameters.push(build::param(type_, pname));
                if matches!(self.peek(), Some(Token::Comma)) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "`)` closing the parameter list")?;
        let body = match self.peek() {
            Some(Token::Semi) => {
                self.pos += 1;
                None
            }
            Some(Token::LBrace) => {
                self.pos += 1;
                let mut statements = Vec::new();
                while !matches!(self.peek(), Some(Token::RBrace)) {
                    if self.at_end() {
                        return Err(self.err("unterminated method body"));
                    }
                    statements.push(self.statement()?);
                }
                self.pos += 1;
                Some(build::block(statements))
            }
            _ => return Err(self.err("expected `;` or a method body")),
        };
        Ok(Some(build::method_stmt(build::method_decl(
            modifiers,
            return_type,
            name,
            parameters,
            body,
        ))))
    }

    fn statement(&mut self) -> Result<Statement, RecastError> {
        if let Some(Token::Ident(word)) = self.peek() {
            if word == "return" {
                self.pos += 1;
                if matches!(self.peek(), Some(Token::Semi)) {
                    self.pos += 1;
                    return Ok(build::return_stmt(None));
                }
                let value = self.expr()?;
                self.expect(&Token::Semi, "`;` after the return value")?;
                return Ok(build::return_stmt(Some(value)));
            }
        }
        if let Some(method) = self.try_method_decl()? {
            return Ok(method);
        }
        let target = self.expr()?;
        if matches!(self.peek(), Some(Token::Assign)) {
            if matches!(target, Expr::StringLiteral(_)) {
                return Err(self.err("cannot assign to a string literal"));
            }
            self.pos += 1;
            let value = self.expr()?;
            self.expect(&Token::Semi, "`;` after the assignment")?;
            return Ok(build::assign(target, value));
        }
        self.expect(&Token::Semi, "`;` after the expression")?;
        Ok(build::expr_stmt(target))
    }

    fn statement_fragment(&mut self) -> Result<Fragment, RecastError> {
        if matches!(self.peek(), Some(Token::Placeholder)) {
            self.pos += 1;
            if matches!(self.peek(), Some(Token::Semi)) {
                self.pos += 1;
            }
            let slot = self.next_slot;
            self.next_slot += 1;
            return Ok(Fragment::StatementSlot(slot));
        }
        let statement = self.statement()?;
        let markers = count_statement_markers(&statement);
        if markers == 0 {
            return Ok(Fragment::Statement(statement));
        }
        let slots = (self.next_slot..self.next_slot + markers).collect();
        self.next_slot += markers;
        Ok(Fragment::Interpolated { statement, slots })
    }
}

/// Parse a comma-separated parameter-list snippet.
pub(super) fn parse_parameters(snippet: &str) -> Result<(Vec<Fragment>, usize), RecastError> {
    let mut parser = Parser::new(snippet)?;
    let mut fragments = Vec::new();
    if !parser.at_end() {
        loop {
            fragments.push(parser.parameter_item()?);
            if parser.at_end() {
                break;
            }
            parser.expect(&Token::Comma, "`,` between parameters")?;
        }
    }
    if fragments.is_empty() {
        return Err(RecastError::template_syntax(
            snippet,
            "a parameter template must declare at least one parameter",
        ));
    }
    Ok((fragments, parser.next_slot))
}

/// Parse a statement-sequence snippet.
pub(super) fn parse_statements(snippet: &str) -> Result<(Vec<Fragment>, usize), RecastError> {
    let mut parser = Parser::new(snippet)?;
    let mut fragments = Vec::new();
    while !parser.at_end() {
        fragments.push(parser.statement_fragment()?);
    }
    if fragments.is_empty() {
        return Err(RecastError::template_syntax(
            snippet,
            "a statement template must contain at least one statement",
        ));
    }
    Ok((fragments, parser.next_slot))
}
