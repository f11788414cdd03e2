// Constructor helpers for tree nodes
// Every helper mints a fresh NodeId and default trivia; callers that care
// about formatting set trivia on the returned node.

use std::sync::Arc;

use super::{
    AssignStatement, Block, ClassDecl, Expr, ExprStatement, FieldAccess, FieldDecl, MethodDecl,
    MethodSig, Modifier, ModifierKind, NameRef, NodeId, Parameter, ReturnStatement, SourceUnit,
    Statement, StringLiteral, Trivia, TypeName, TypeRef,
};

pub fn modifier(kind: ModifierKind) -> Modifier {
    Modifier {
        id: NodeId::fresh(),
        kind,
        trivia: Trivia::default(),
    }
}

/// A type name as written in source; resolution is left to the external
/// resolver (see [`resolve_class`] / [`resolve_method`] for the test stand-in).
pub fn type_name(name: impl Into<String>) -> TypeName {
    TypeName {
        id: NodeId::fresh(),
        name: name.into(),
        resolved: TypeRef::Unresolved,
        trivia: Trivia::default(),
    }
}

pub fn param(type_: impl Into<String>, name: impl Into<String>) -> Parameter {
    Parameter {
        id: NodeId::fresh(),
        type_name: type_name(type_),
        name: name.into(),
        trivia: Trivia::default(),
    }
}

pub fn field_decl(
    modifiers: Vec<ModifierKind>,
    type_: impl Into<String>,
    name: impl Into<String>,
) -> FieldDecl {
    FieldDecl {
        id: NodeId::fresh(),
        modifiers: modifiers.into_iter().map(modifier).collect(),
        type_name: type_name(type_),
        name: name.into(),
        trivia: Trivia::default(),
    }
}

pub fn method_decl(
    modifiers: Vec<ModifierKind>,
    return_type: impl Into<String>,
    name: impl Into<String>,
    parameters: Vec<Parameter>,
    body: Option<Block>,
) -> MethodDecl {
    MethodDecl {
        id: NodeId::fresh(),
        modifiers: modifiers.into_iter().map(modifier).collect(),
        return_type: type_name(return_type),
        name: name.into(),
        parameters,
        body: body.map(Arc::new),
        resolved: None,
        trivia: Trivia::default(),
    }
}

pub fn block(statements: Vec<Statement>) -> Block {
    Block {
        id: NodeId::fresh(),
        statements,
        trivia: Trivia::default(),
    }
}

pub fn class_decl(name: impl Into<String>, body: Vec<Statement>) -> ClassDecl {
    ClassDecl {
        id: NodeId::fresh(),
        modifiers: Vec::new(),
        name: name.into(),
        resolved: TypeRef::Unresolved,
        body: Arc::new(block(body)),
        trivia: Trivia::default(),
    }
}

pub fn source_unit(package: Option<&str>, types: Vec<ClassDecl>) -> SourceUnit {
    SourceUnit {
        id: NodeId::fresh(),
        package: package.map(str::to_string),
        types: types.into_iter().map(Arc::new).collect(),
        trivia: Trivia::default(),
    }
}

// Expressions

pub fn string_lit(value: impl Into<String>) -> Expr {
    Expr::StringLiteral(StringLiteral {
        id: NodeId::fresh(),
        value: value.into(),
        trivia: Trivia::default(),
    })
}

pub fn name_ref(name: impl Into<String>) -> Expr {
    Expr::Name(NameRef {
        id: NodeId::fresh(),
        name: name.into(),
        trivia: Trivia::default(),
    })
}

pub fn field_access(receiver: Expr, field: impl Into<String>) -> Expr {
    Expr::FieldAccess(FieldAccess {
        id: NodeId::fresh(),
        receiver: Box::new(receiver),
        field: field.into(),
        trivia: Trivia::default(),
    })
}

/// Field access on the receiver `this`, e.g. `this.lastName`.
pub fn this_field(field: impl Into<String>) -> Expr {
    field_access(name_ref("this"), field)
}

// Statements

pub fn assign(target: Expr, value: Expr) -> Statement {
    Statement::Assign(Arc::new(AssignStatement {
        id: NodeId::fresh(),
        target,
        value,
        trivia: Trivia::default(),
    }))
}

pub fn return_stmt(value: Option<Expr>) -> Statement {
    Statement::Return(Arc::new(ReturnStatement {
        id: NodeId::fresh(),
        value,
        trivia: Trivia::default(),
    }))
}

pub fn expr_stmt(expr: Expr) -> Statement {
    Statement::Expr(Arc::new(ExprStatement {
        id: NodeId::fresh(),
        expr,
        trivia: Trivia::default(),
    }))
}

pub fn method_stmt(method: MethodDecl) -> Statement {
    Statement::Method(Arc::new(method))
}

pub fn field_stmt(field: FieldDecl) -> Statement {
    Statement::Field(Arc::new(field))
}

// Stand-ins for the external type resolver, used by tests and examples to
// annotate hand-built trees the way a real resolver would.

/// Annotate a class with its fully-qualified name.
pub fn resolve_class(class: &ClassDecl, fully_qualified_name: impl Into<String>) -> ClassDecl {
    ClassDecl {
        resolved: TypeRef::Named(fully_qualified_name.into()),
        ..class.clone()
    }
}

/// Annotate a method with a resolved signature derived from its declared
/// parameter types.
pub fn resolve_method(method: &MethodDecl, declaring_type: impl Into<String>) -> MethodDecl {
    MethodDecl {
        resolved: Some(MethodSig {
            declaring_type: declaring_type.into(),
            name: method.name.clone(),
            parameter_types: method
                .parameters
                .iter()
                .map(|p| p.type_name.name.clone())
                .collect(),
        }),
        ..method.clone()
    }
}
