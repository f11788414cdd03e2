// Template compilation and placeholder substitution
// A template is compiled once (typically at recipe construction) and reused
// for every apply call: an immutable, reentrant list of literal fragments and
// positional placeholder slots. Substitution never re-parses the snippet.

mod parse;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::errors::RecastError;
use crate::tree::{
    AssignStatement, Block, Expr, ExprStatement, FieldAccess, FieldDecl, MethodDecl, Modifier,
    NameRef, NodeId, Parameter, ReturnStatement, Statement, StringLiteral, TypeName,
};

/// The positional placeholder marker recognized inside snippets.
pub const PLACEHOLDER: &str = "#{}";

/// What a snippet is expected to parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// A comma-separated formal parameter list.
    Parameters,
    /// A sequence of statements (method declarations count as class-body
    /// statements).
    Statements,
    /// A blank snippet standing for a freshly installed empty body.
    EmptyBody,
}

/// A caller-supplied value substituted into a placeholder slot at apply time.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Parameter(Parameter),
    Statement(Statement),
    Text(String),
}

impl TemplateValue {
    fn kind_name(&self) -> &'static str {
        match self {
            TemplateValue::Parameter(_) => "parameter node",
            TemplateValue::Statement(_) => "statement node",
            TemplateValue::Text(_) => "text value",
        }
    }
}

/// One compiled element of a template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fragment {
    /// A literal parameter, spliced verbatim (with fresh ids) at apply time.
    Parameter(Parameter),
    /// A positional slot taking a caller-supplied parameter node.
    ParameterSlot(usize),
    /// A literal statement with no placeholders inside.
    Statement(Statement),
    /// A positional slot taking a caller-supplied statement node.
    StatementSlot(usize),
    /// A literal statement whose string literals interpolate caller-supplied
    /// text values, one per slot, in source order.
    Interpolated { statement: Statement, slots: Vec<usize> },
}

/// A compiled, reusable code template. Immutable once built; safe to share
/// across concurrently running traversals of different trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    kind: FragmentKind,
    snippet: String,
    imports: Vec<String>,
    fragments: Vec<Fragment>,
    placeholders: usize,
}

impl Template {
    pub fn builder(snippet: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            snippet: snippet.into(),
            imports: Vec::new(),
        }
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Imports the surrounding file must carry for the spliced code to
    /// resolve. The engine records them; import insertion itself is the
    /// host's concern.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Instantiate a parameter-list template. `values` are matched to
    /// placeholder slots by position.
    pub fn parameter_nodes(&self, values: &[TemplateValue]) -> Result<Vec<Parameter>, RecastError> {
        self.check_values(values)?;
        let mut out = Vec::with_capacity(self.fragments.len());
        for fragment in &self.fragments {
            match fragment {
                Fragment::Parameter(parameter) => out.push(refresh_parameter(parameter)),
                Fragment::ParameterSlot(slot) => match &values[*slot] {
                    TemplateValue::Parameter(parameter) => out.push(parameter.clone()),
                    other => {
                        return Err(RecastError::placeholder("parameter node", other.kind_name()))
                    }
                },
                _ => {
                    return Err(RecastError::placeholder(
                        "parameter fragment",
                        "statement fragment",
                    ))
                }
            }
        }
        Ok(out)
    }

    /// Instantiate a statement-sequence template. `values` are matched to
    /// placeholder slots by position; text values interpolate into string
    /// literals, statement values fill statement slots.
    pub fn statement_nodes(&self, values: &[TemplateValue]) -> Result<Vec<Statement>, RecastError> {
        self.check_values(values)?;
        let mut out = Vec::with_capacity(self.fragments.len());
        for fragment in &self.fragments {
            match fragment {
                Fragment::Statement(statement) => {
                    out.push(instantiate_statement(statement, &[], &mut 0))
                }
                Fragment::StatementSlot(slot) => match &values[*slot] {
                    TemplateValue::Statement(statement) => out.push(statement.clone()),
                    other => {
                        return Err(RecastError::placeholder("statement node", other.kind_name()))
                    }
                },
                Fragment::Interpolated { statement, slots } => {
                    let texts = slots
                        .iter()
                        .map(|slot| match &values[*slot] {
                            TemplateValue::Text(text) => Ok(text.as_str()),
                            other => Err(RecastError::placeholder("text value", other.kind_name())),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    out.push(instantiate_statement(statement, &texts, &mut 0));
                }
                _ => {
                    return Err(RecastError::placeholder(
                        "statement fragment",
                        "parameter fragment",
                    ))
                }
            }
        }
        Ok(out)
    }

    fn check_values(&self, values: &[TemplateValue]) -> Result<(), RecastError> {
        if values.len() != self.placeholders {
            return Err(RecastError::placeholder(
                format!("{} placeholder value(s)", self.placeholders),
                values.len().to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder carrying the snippet and its required imports.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    snippet: String,
    imports: Vec<String>,
}

impl TemplateBuilder {
    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Compile the snippet as the given fragment kind. Pure and cacheable;
    /// fails with a template syntax error when the snippet does not parse
    /// as that kind.
    pub fn build(self, kind: FragmentKind) -> Result<Template, RecastError> {
        let (fragments, placeholders) = match kind {
            FragmentKind::Parameters => parse::parse_parameters(&self.snippet)?,
            FragmentKind::Statements => parse::parse_statements(&self.snippet)?,
            FragmentKind::EmptyBody => {
                if !self.snippet.trim().is_empty() {
                    return Err(RecastError::template_syntax(
                        &self.snippet,
                        "an empty-body template must be blank",
                    ));
                }
                (Vec::new(), 0)
            }
        };
        Ok(Template {
            kind,
            snippet: self.snippet,
            imports: self.imports,
            fragments,
            placeholders,
        })
    }
}

/// Count `#{}` markers inside the string literals of a statement subtree, in
/// pre-order. The parser uses this to assign slot indices; instantiation
/// replaces the same occurrences in the same order.
pub(crate) fn count_statement_markers(statement: &Statement) -> usize {
    match statement {
        Statement::Method(method) => method
            .body
            .iter()
            .flat_map(|body| body.statements.iter())
            .map(count_statement_markers)
            .sum(),
        Statement::Field(_) => 0,
        Statement::Assign(assign) => {
            count_expr_markers(&assign.target) + count_expr_markers(&assign.value)
        }
        Statement::Return(ret) => ret.value.as_ref().map_or(0, count_expr_markers),
        Statement::Expr(stmt) => count_expr_markers(&stmt.expr),
    }
}

fn count_expr_markers(expr: &Expr) -> usize {
    match expr {
        Expr::StringLiteral(lit) => lit.value.matches(PLACEHOLDER).count(),
        Expr::Name(_) => 0,
        Expr::FieldAccess(access) => count_expr_markers(&access.receiver),
    }
}

// Instantiation: clone a compiled prototype with fresh node ids, replacing
// string markers with the texts for its slots. Compiled fragments are
// prototypes; every apply must yield nodes with distinct identity.

fn substitute_markers(value: &str, texts: &[&str], next: &mut usize) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find(PLACEHOLDER) {
        if *next >= texts.len() {
            break;
        }
        out.push_str(&rest[..pos]);
        out.push_str(texts[*next]);
        *next += 1;
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    out.push_str(rest);
    out
}

fn refresh_type_name(type_name: &TypeName) -> TypeName {
    TypeName {
        id: NodeId::fresh(),
        ..type_name.clone()
    }
}

fn refresh_modifier(modifier: &Modifier) -> Modifier {
    Modifier {
        id: NodeId::fresh(),
        ..modifier.clone()
    }
}

fn refresh_parameter(parameter: &Parameter) -> Parameter {
    Parameter {
        id: NodeId::fresh(),
        type_name: refresh_type_name(&parameter.type_name),
        ..parameter.clone()
    }
}

fn instantiate_expr(expr: &Expr, texts: &[&str], next: &mut usize) -> Expr {
    match expr {
        Expr::StringLiteral(lit) => Expr::StringLiteral(StringLiteral {
            id: NodeId::fresh(),
            value: substitute_markers(&lit.value, texts, next),
            trivia: lit.trivia.clone(),
        }),
        Expr::Name(name) => Expr::Name(NameRef {
            id: NodeId::fresh(),
            ..name.clone()
        }),
        Expr::FieldAccess(access) => Expr::FieldAccess(FieldAccess {
            id: NodeId::fresh(),
            receiver: Box::new(instantiate_expr(&access.receiver, texts, next)),
            field: access.field.clone(),
            trivia: access.trivia.clone(),
        }),
    }
}

fn instantiate_statement(statement: &Statement, texts: &[&str], next: &mut usize) -> Statement {
    match statement {
        Statement::Method(method) => {
            let body = method.body.as_ref().map(|body| {
                Arc::new(Block {
                    id: NodeId::fresh(),
                    statements: body
                        .statements
                        .iter()
                        .map(|s| instantiate_statement(s, texts, next))
                        .collect(),
                    trivia: body.trivia.clone(),
                })
            });
            Statement::Method(Arc::new(MethodDecl {
                id: NodeId::fresh(),
                modifiers: method.modifiers.iter().map(refresh_modifier).collect(),
                return_type: refresh_type_name(&method.return_type),
                name: method.name.clone(),
                parameters: method.parameters.iter().map(refresh_parameter).collect(),
                body,
                resolved: method.resolved.clone(),
                trivia: method.trivia.clone(),
            }))
        }
        Statement::Field(field) => Statement::Field(Arc::new(FieldDecl {
            id: NodeId::fresh(),
            modifiers: field.modifiers.iter().map(refresh_modifier).collect(),
            type_name: refresh_type_name(&field.type_name),
            name: field.name.clone(),
            trivia: field.trivia.clone(),
        })),
        Statement::Assign(assign) => Statement::Assign(Arc::new(AssignStatement {
            id: NodeId::fresh(),
            target: instantiate_expr(&assign.target, texts, next),
            value: instantiate_expr(&assign.value, texts, next),
            trivia: assign.trivia.clone(),
        })),
        Statement::Return(ret) => Statement::Return(Arc::new(ReturnStatement {
            id: NodeId::fresh(),
            value: ret.value.as_ref().map(|v| instantiate_expr(v, texts, next)),
            trivia: ret.trivia.clone(),
        })),
        Statement::Expr(stmt) => Statement::Expr(Arc::new(ExprStatement {
            id: NodeId::fresh(),
            expr: instantiate_expr(&stmt.expr, texts, next),
            trivia: stmt.trivia.clone(),
        })),
    }
}
