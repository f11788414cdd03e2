// Matchers: pure predicates deciding which declarations a recipe rewrites
// A matcher never errors; a node whose type information is unavailable is
// treated as non-matching, not as a failure.

use serde::{Deserialize, Serialize};

use crate::errors::RecastError;
use crate::tree::{ClassDecl, MethodDecl, TypeRef};


/// A pure predicate over one node kind.
pub trait Matcher {
    type Node: ?Sized;

    /// True iff the node is eligible for transformation. Pure, no side
    /// effects, and must return false (never error) when type information
    /// is unresolved.
    fn matches(&self, node: &Self::Node) -> bool;
}

/// Matches a class declaration whose resolved fully-qualified name equals
/// the configured string exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMatcher {
    fully_qualified_name: String,
}

impl TypeMatcher {
    pub fn new(fully_qualified_name: impl Into<String>) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
        }
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }
}

impl Matcher for TypeMatcher {
    type Node = ClassDecl;

    fn matches(&self, class: &ClassDecl) -> bool {
        match &class.resolved {
            TypeRef::Named(name) => name == &self.fully_qualified_name,
            TypeRef::Unresolved => false,
        }
    }
}

/// Matches a method declaration by exact resolved signature: declaring type,
/// method name, and the ordered parameter-type list. No overload-compatible
/// fuzzy matching: arity and every type must line up.
///
/// Built from a pattern string of the shape
/// `"com.example.Customer setCustomerInfo(String)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMatcher {
    declaring_type: String,
    method_name: String,
    parameter_types: Vec<String>,
}

impl MethodMatcher {
    /// Parse a `"<declaring-type> <name>(<T1>, <T2>, ...)"` pattern.
    pub fn parse(pattern: &str) -> Result<Self, RecastError> {
        let pattern = pattern.trim();
        let (declaring_type, rest) = pattern.split_once(' ').ok_or_else(|| {
            RecastError::configuration(format!(
                "method pattern `{pattern}` must be `<type> <name>(<params>)`"
            ))
        })?;
        let rest = rest.trim();
        let (method_name, params) = rest.split_once('(').ok_or_else(|| {
            RecastError::configuration(format!(
                "method pattern `{pattern}` is missing a parameter list"
            ))
        })?;
        let params = params.strip_suffix(')').ok_or_else(|| {
            RecastError::configuration(format!(
                "method pattern `{pattern}` has an unterminated parameter list"
            ))
        })?;
        let method_name = method_name.trim();
        if declaring_type.is_empty() || method_name.is_empty() {
            return Err(RecastError::configuration(format!(
                "method pattern `{pattern}` has an empty type or method name"
            )));
        }
        let parameter_types = if params.trim().is_empty() {
            Vec::new()
        } else {
            params.split(',').map(|p| p.trim().to_string()).collect()
        };
        if parameter_types.iter().any(String::is_empty) {
            return Err(RecastError::configuration(format!(
                "method pattern `{pattern}` has an empty parameter type"
            )));
        }
        Ok(Self {
            declaring_type: declaring_type.to_string(),
            method_name: method_name.to_string(),
            parameter_types,
        })
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }
}

impl Matcher for MethodMatcher {
    type Node = MethodDecl;

    fn matches(&self, method: &MethodDecl) -> bool {
        match &method.resolved {
            Some(sig) => {
                sig.declaring_type == self.declaring_type
                    && sig.name == self.method_name
                    && sig.parameter_types == self.parameter_types
            }
            None => false,
        }
    }
}
