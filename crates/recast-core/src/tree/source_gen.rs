// Source code generation from the tree
// This module reconstructs source text from nodes. It is the formatting
// collaborator invoked after structural edits that lack pre-existing trivia
// (notably body installation), and what end-to-end tests assert against.

use std::sync::Arc;

use super::*;

const INDENT: &str = "    ";

/// Trait for nodes that can render their source representation.
pub trait ToSource {
    fn to_source(&self) -> String;
}

fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

fn modifiers_source(modifiers: &[Modifier]) -> String {
    let mut out = String::new();
    for modifier in modifiers {
        out.push_str(&modifier.trivia.leading);
        out.push_str(modifier.kind.keyword());
        out.push_str(&modifier.trivia.trailing);
        out.push(' ');
    }
    out
}

fn expr_source(expr: &Expr) -> String {
    match expr {
        Expr::StringLiteral(lit) => format!(
            "{}\"{}\"{}",
            lit.trivia.leading,
            escape_string(&lit.value),
            lit.trivia.trailing
        ),
        Expr::Name(name) => format!("{}{}{}", name.trivia.leading, name.name, name.trivia.trailing),
        Expr::FieldAccess(access) => format!(
            "{}{}.{}{}",
            access.trivia.leading,
            expr_source(&access.receiver),
            access.field,
            access.trivia.trailing
        ),
    }
}

fn parameter_source(parameter: &Parameter) -> String {
    format!(
        "{}{} {}{}",
        parameter.trivia.leading, parameter.type_name.name, parameter.name, parameter.trivia.trailing
    )
}

fn parameters_source(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(parameter_source)
        .collect::<Vec<_>>()
        .join(", ")
}

fn field_source(field: &FieldDecl, depth: usize) -> String {
    format!(
        "{}{}{}{} {};{}",
        pad(depth),
        field.trivia.leading,
        modifiers_source(&field.modifiers),
        field.type_name.name,
        field.name,
        field.trivia.trailing
    )
}

fn method_source(method: &MethodDecl, depth: usize) -> String {
    let mut out = format!(
        "{}{}{}{} {}({})",
        pad(depth),
        method.trivia.leading,
        modifiers_source(&method.modifiers),
        method.return_type.name,
        method.name,
        parameters_source(&method.parameters)
    );
    match &method.body {
        Some(body) => {
            out.push_str(" {");
            out.push_str(&body.trivia.leading);
            out.push('\n');
            for statement in &body.statements {
                out.push_str(&statement_source(statement, depth + 1));
                out.push('\n');
            }
            out.push_str(&pad(depth));
            out.push('}');
            out.push_str(&body.trivia.trailing);
        }
        None => out.push(';'),
    }
    out.push_str(&method.trivia.trailing);
    out
}

fn statement_source(statement: &Statement, depth: usize) -> String {
    match statement {
        Statement::Method(method) => method_source(method, depth),
        Statement::Field(field) => field_source(field, depth),
        Statement::Assign(assign) => format!(
            "{}{}{} = {};{}",
            pad(depth),
            assign.trivia.leading,
            expr_source(&assign.target),
            expr_source(&assign.value),
            assign.trivia.trailing
        ),
        Statement::Return(ret) => {
            let value = match &ret.value {
                Some(expr) => format!(" {}", expr_source(expr)),
                None => String::new(),
            };
            format!(
                "{}{}return{};{}",
                pad(depth),
                ret.trivia.leading,
                value,
                ret.trivia.trailing
            )
        }
        Statement::Expr(stmt) => format!(
            "{}{}{};{}",
            pad(depth),
            stmt.trivia.leading,
            expr_source(&stmt.expr),
            stmt.trivia.trailing
        ),
    }
}

fn class_source(class: &ClassDecl, depth: usize) -> String {
    let header = format!(
        "{}{}{}class {}",
        pad(depth),
        class.trivia.leading,
        modifiers_source(&class.modifiers),
        class.name
    );
    let mut out = header;
    if class.body.is_empty() {
        out.push_str(" {}");
    } else {
        out.push_str(" {");
        out.push_str(&class.body.trivia.leading);
        out.push('\n');
        for statement in &class.body.statements {
            out.push_str(&statement_source(statement, depth + 1));
            out.push('\n');
        }
        out.push_str(&pad(depth));
        out.push('}');
        out.push_str(&class.body.trivia.trailing);
    }
    out.push_str(&class.trivia.trailing);
    out
}

impl ToSource for SourceUnit {
    fn to_source(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.trivia.leading);
        if let Some(package) = &self.package {
            out.push_str(&format!("package {package};\n\n"));
        }
        for (index, class) in self.types.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&class_source(class, 0));
            out.push('\n');
        }
        out.push_str(&self.trivia.trailing);
        out
    }
}

impl ToSource for ClassDecl {
    fn to_source(&self) -> String {
        class_source(self, 0)
    }
}

impl ToSource for MethodDecl {
    fn to_source(&self) -> String {
        method_source(self, 0)
    }
}

impl ToSource for Statement {
    fn to_source(&self) -> String {
        statement_source(self, 0)
    }
}

impl ToSource for Expr {
    fn to_source(&self) -> String {
        expr_source(self)
    }
}

impl ToSource for Parameter {
    fn to_source(&self) -> String {
        parameter_source(self)
    }
}

/// Re-derive formatting for a method whose body was just installed by a
/// structural edit. Synthesized subtrees carry no trivia of their own; the
/// canonical layout comes entirely from the printer, so this normalizes the
/// body subtree to empty trivia and leaves the method's own trivia alone.
pub fn auto_format(method: &MethodDecl) -> MethodDecl {
    let body = method.body.as_ref().map(|body| {
        Arc::new(Block {
            id: body.id,
            statements: body.statements.iter().map(strip_statement_trivia).collect(),
            trivia: Trivia::default(),
        })
    });
    MethodDecl {
        body,
        ..method.clone()
    }
}

fn strip_statement_trivia(statement: &Statement) -> Statement {
    match statement {
        Statement::Method(method) => Statement::Method(Arc::new(auto_format(&MethodDecl {
            trivia: Trivia::default(),
            ..(**method).clone()
        }))),
        Statement::Field(field) => Statement::Field(Arc::new(FieldDecl {
            trivia: Trivia::default(),
            ..(**field).clone()
        })),
        Statement::Assign(assign) => Statement::Assign(Arc::new(AssignStatement {
            trivia: Trivia::default(),
            ..(**assign).clone()
        })),
        Statement::Return(ret) => Statement::Return(Arc::new(ReturnStatement {
            trivia: Trivia::default(),
            ..(**ret).clone()
        })),
        Statement::Expr(stmt) => Statement::Expr(Arc::new(ExprStatement {
            trivia: Trivia::default(),
            ..(**stmt).clone()
        })),
    }
}
