// Unified tree model for the rewriting engine
// Nodes are immutable values: every edit produces a new node and shares the
// untouched children of the original through `Arc`.

pub mod build;
pub mod source_gen;
pub use source_gen::ToSource;

#[cfg(test)]
mod source_gen_tests;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Node identity. Distinct from value equality: two structurally identical
/// nodes may carry different ids, and `PartialEq` on tree types ignores ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Mint a fresh identity.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::fresh()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Formatting trivia carried opaquely through rewrites. The engine never
/// interprets these strings; the pretty-printer emits `leading` immediately
/// before a node's own text and `trailing` immediately after.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trivia {
    pub leading: String,
    pub trailing: String,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

/// Resolved type identity attached by the external type resolver. Unknown is
/// an explicit value, never a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Unresolved,
    Named(String),
}

impl TypeRef {
    /// The fully-qualified name, if resolved.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Unresolved => None,
            TypeRef::Named(name) => Some(name),
        }
    }

    /// The last `.`-separated segment of the resolved name.
    pub fn simple_name(&self) -> Option<&str> {
        self.name().map(|n| n.rsplit('.').next().unwrap_or(n))
    }
}

/// Resolved method signature attached by the external type resolver.
/// Parameter types are the declared type names, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub declaring_type: String,
    pub name: String,
    pub parameter_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
}

impl ModifierKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Private => "private",
            ModifierKind::Protected => "protected",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Abstract => "abstract",
        }
    }

    /// Parse a modifier keyword; `None` when the word is not a modifier.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(ModifierKind::Public),
            "private" => Some(ModifierKind::Private),
            "protected" => Some(ModifierKind::Protected),
            "static" => Some(ModifierKind::Static),
            "final" => Some(ModifierKind::Final),
            "abstract" => Some(ModifierKind::Abstract),
            _ => None,
        }
    }
}

/// A declaration modifier node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub id: NodeId,
    pub kind: ModifierKind,
    pub trivia: Trivia,
}

/// A type as written in source, possibly annotated by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeName {
    pub id: NodeId,
    /// The name as written, e.g. `String`, `void`, `Date`.
    pub name: String,
    pub resolved: TypeRef,
    pub trivia: Trivia,
}

/// A formal parameter of a method declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub id: NodeId,
    pub type_name: TypeName,
    pub name: String,
    pub trivia: Trivia,
}

/// A field declaration inside a class body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub id: NodeId,
    pub modifiers: Vec<Modifier>,
    pub type_name: TypeName,
    pub name: String,
    pub trivia: Trivia,
}

/// A method declaration. `body` is `None` for abstract methods; `resolved`
/// is attached by the external type resolver and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub id: NodeId,
    pub modifiers: Vec<Modifier>,
    pub return_type: TypeName,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Option<Arc<Block>>,
    pub resolved: Option<MethodSig>,
    pub trivia: Trivia,
}

impl MethodDecl {
    pub fn is_abstract(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| m.kind == ModifierKind::Abstract)
    }
}

/// A braced statement sequence: a class body or a method body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Statement>,
    pub trivia: Trivia,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A class declaration. `resolved` carries the fully-qualified name assigned
/// by the external type resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDecl {
    pub id: NodeId,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub resolved: TypeRef,
    pub body: Arc<Block>,
    pub trivia: Trivia,
}

impl ClassDecl {
    /// True iff a method with this simple name exists among the class's
    /// direct body statements. Signature and arity are not considered.
    pub fn has_method_named(&self, name: &str) -> bool {
        self.body
            .statements
            .iter()
            .any(|s| matches!(s, Statement::Method(m) if m.name == name))
    }
}

/// One parsed source file: the traversal root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUnit {
    pub id: NodeId,
    pub package: Option<String>,
    pub types: Vec<Arc<ClassDecl>>,
    pub trivia: Trivia,
}

/// The closed set of statement kinds. Declaration payloads sit behind `Arc`
/// so that rebuilding a parent shares untouched statements instead of
/// deep-copying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Method(Arc<MethodDecl>),
    Field(Arc<FieldDecl>),
    Assign(Arc<AssignStatement>),
    Return(Arc<ReturnStatement>),
    Expr(Arc<ExprStatement>),
}

/// An assignment statement, e.g. `this.firstName = firstName;`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignStatement {
    pub id: NodeId,
    pub target: Expr,
    pub value: Expr,
    pub trivia: Trivia,
}

/// A return statement with an optional value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub id: NodeId,
    pub value: Option<Expr>,
    pub trivia: Trivia,
}

/// A bare expression in statement position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExprStatement {
    pub id: NodeId,
    pub expr: Expr,
    pub trivia: Trivia,
}

/// The closed set of expression kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    StringLiteral(StringLiteral),
    Name(NameRef),
    FieldAccess(FieldAccess),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringLiteral {
    pub id: NodeId,
    pub value: String,
    pub trivia: Trivia,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRef {
    pub id: NodeId,
    pub name: String,
    pub trivia: Trivia,
}

/// Field access on a receiver expression, e.g. `this.lastName`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAccess {
    pub id: NodeId,
    pub receiver: Box<Expr>,
    pub field: String,
    pub trivia: Trivia,
}

// Value equality compares structure and trivia; `id` is identity and is
// deliberately excluded so that a node and its rebuilt twin compare equal.
macro_rules! value_eq {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }
        impl Eq for $ty {}
    };
}

value_eq!(Modifier { kind, trivia });
value_eq!(TypeName { name, resolved, trivia });
value_eq!(Parameter { type_name, name, trivia });
value_eq!(FieldDecl { modifiers, type_name, name, trivia });
value_eq!(MethodDecl { modifiers, return_type, name, parameters, body, resolved, trivia });
value_eq!(Block { statements, trivia });
value_eq!(ClassDecl { modifiers, name, resolved, body, trivia });
value_eq!(SourceUnit { package, types, trivia });
value_eq!(AssignStatement { target, value, trivia });
value_eq!(ReturnStatement { value, trivia });
value_eq!(ExprStatement { expr, trivia });
value_eq!(StringLiteral { value, trivia });
value_eq!(NameRef { name, trivia });
value_eq!(FieldAccess { receiver, field, trivia });
