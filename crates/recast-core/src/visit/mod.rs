// Traversal engine: one pass, pre-order hooks, post-order rebuild
// The engine walks the whole tree exactly once. Each hook either returns its
// node unchanged or returns a replacement; the replacement's children are
// what the engine then recurses into, and ancestors are rebuilt bottom-up
// sharing every untouched child.


use std::sync::Arc;

use tracing::trace;

use crate::errors::RecastError;
use crate::tree::{Block, ClassDecl, FieldDecl, MethodDecl, SourceUnit, Statement, TypeRef};

/// One scope on the ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Unit { package: Option<String> },
    Class { name: String, resolved: TypeRef },
    Method { name: String },
}

/// The ancestor chain threaded by value through the recursion; visitors use
/// it to resolve coordinates relative to their enclosing declarations. Never
/// shared mutable state: each descent clones and extends its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    path: Vec<Scope>,
}

impl Cursor {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn descend(&self, scope: Scope) -> Cursor {
        let mut path = self.path.clone();
        path.push(scope);
        Cursor { path }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The innermost enclosing class scope, if any.
    pub fn enclosing_class(&self) -> Option<(&str, &TypeRef)> {
        self.path.iter().rev().find_map(|scope| match scope {
            Scope::Class { name, resolved } => Some((name.as_str(), resolved)),
            _ => None,
        })
    }

    /// The enclosing compilation unit's package, if any.
    pub fn package(&self) -> Option<&str> {
        self.path.iter().find_map(|scope| match scope {
            Scope::Unit { package } => package.as_deref(),
            _ => None,
        })
    }
}

/// Per-kind visit hooks. Every hook defaults to identity; a visitor
/// overrides only the kinds it rewrites. Hooks are fallible: an error aborts
/// the whole traversal and no partial tree is observable.
pub trait AstVisitor {
    fn visit_unit(&mut self, unit: &SourceUnit, _cursor: &Cursor) -> Result<SourceUnit, RecastError> {
        Ok(unit.clone())
    }

    fn visit_class(&mut self, class: &ClassDecl, _cursor: &Cursor) -> Result<ClassDecl, RecastError> {
        Ok(class.clone())
    }

    fn visit_method(
        &mut self,
        method: &MethodDecl,
        _cursor: &Cursor,
    ) -> Result<MethodDecl, RecastError> {
        Ok(method.clone())
    }

    fn visit_field(&mut self, field: &FieldDecl, _cursor: &Cursor) -> Result<FieldDecl, RecastError> {
        Ok(field.clone())
    }
}

/// Walk a source unit with the given visitor and return the rebuilt unit.
pub fn walk_unit(
    visitor: &mut dyn AstVisitor,
    unit: &SourceUnit,
) -> Result<SourceUnit, RecastError> {
    let cursor = Cursor::root();
    let entered = visitor.visit_unit(unit, &cursor)?;
    let cursor = cursor.descend(Scope::Unit {
        package: entered.package.clone(),
    });
    let mut types = Vec::with_capacity(entered.types.len());
    for class in &entered.types {
        types.push(walk_class(visitor, class, &cursor)?);
    }
    Ok(SourceUnit { types, ..entered })
}

fn walk_class(
    visitor: &mut dyn AstVisitor,
    class: &Arc<ClassDecl>,
    cursor: &Cursor,
) -> Result<Arc<ClassDecl>, RecastError> {
    let entered = visitor.visit_class(class, cursor)?;
    let cursor = cursor.descend(Scope::Class {
        name: entered.name.clone(),
        resolved: entered.resolved.clone(),
    });
    // Recurse into the children of whatever the hook returned, so a
    // replacement subtree is itself visited.
    let body = walk_block(visitor, &entered.body, &cursor)?;
    let rebuilt = ClassDecl { body, ..entered };
    if rebuilt == **class {
        trace!(class = %class.name, "class unchanged");
        Ok(Arc::clone(class))
    } else {
        trace!(class = %rebuilt.name, "class rebuilt");
        Ok(Arc::new(rebuilt))
    }
}

fn walk_method(
    visitor: &mut dyn AstVisitor,
    method: &Arc<MethodDecl>,
    cursor: &Cursor,
) -> Result<Arc<MethodDecl>, RecastError> {
    let entered = visitor.visit_method(method, cursor)?;
    let cursor = cursor.descend(Scope::Method {
        name: entered.name.clone(),
    });
    let body = match &entered.body {
        Some(body) => Some(walk_block(visitor, body, &cursor)?),
        None => None,
    };
    let rebuilt = MethodDecl { body, ..entered };
    if rebuilt == **method {
        Ok(Arc::clone(method))
    } else {
        Ok(Arc::new(rebuilt))
    }
}

fn walk_field(
    visitor: &mut dyn AstVisitor,
    field: &Arc<FieldDecl>,
    cursor: &Cursor,
) -> Result<Arc<FieldDecl>, RecastError> {
    let rebuilt = visitor.visit_field(field, cursor)?;
    if rebuilt == **field {
        Ok(Arc::clone(field))
    } else {
        Ok(Arc::new(rebuilt))
    }
}

fn walk_block(
    visitor: &mut dyn AstVisitor,
    block: &Arc<Block>,
    cursor: &Cursor,
) -> Result<Arc<Block>, RecastError> {
    let mut statements = Vec::with_capacity(block.statements.len());
    for statement in &block.statements {
        statements.push(walk_statement(visitor, statement, cursor)?);
    }
    let rebuilt = Block {
        id: block.id,
        statements,
        trivia: block.trivia.clone(),
    };
    if rebuilt == **block {
        Ok(Arc::clone(block))
    } else {
        Ok(Arc::new(rebuilt))
    }
}

// The statement alternatives are matched exhaustively: adding a statement
// kind forces this dispatch (and therefore every visitor surface decision)
// to be revisited.
fn walk_statement(
    visitor: &mut dyn AstVisitor,
    statement: &Statement,
    cursor: &Cursor,
) -> Result<Statement, RecastError> {
    match statement {
        Statement::Method(method) => Ok(Statement::Method(walk_method(visitor, method, cursor)?)),
        Statement::Field(field) => Ok(Statement::Field(walk_field(visitor, field, cursor)?)),
        Statement::Assign(_) | Statement::Return(_) | Statement::Expr(_) => Ok(statement.clone()),
    }
}
