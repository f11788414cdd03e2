// Patch application: splice a compiled template into a node at a coordinate
// Applicators never mutate their input; they return a new node and share all
// untouched children of the original. Anchor failures are programmer errors:
// a well-formed visitor checks its preconditions before applying.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::errors::RecastError;
use crate::template::{FragmentKind, Template, TemplateValue};
use crate::tree::{source_gen, Block, MethodDecl, MethodSig, ModifierKind, NodeId, Trivia};

/// The designated insertion or replacement point within a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    /// Splice parameters immediately before the parameter at this position.
    ReplaceParameters { anchor: usize },
    /// Discard any existing body and install a fresh one.
    ReplaceBody,
    /// Append statements after the existing last statement of a body.
    AppendLastStatement,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::ReplaceParameters { anchor } => {
                write!(f, "replace-parameters(anchor {anchor})")
            }
            Coordinate::ReplaceBody => write!(f, "replace-body"),
            Coordinate::AppendLastStatement => write!(f, "append-last-statement"),
        }
    }
}

fn check_kind(
    coordinate: Coordinate,
    template: &Template,
    expected: &[FragmentKind],
) -> Result<(), RecastError> {
    if expected.contains(&template.kind()) {
        return Ok(());
    }
    Err(RecastError::coordinate_mismatch(
        coordinate.to_string(),
        format!("template kind {:?} does not fit this coordinate", template.kind()),
    ))
}

/// Splice the template's compiled parameter fragments immediately before the
/// parameter at `anchor`, preserving every parameter at and after that
/// position unchanged. The method's resolved signature, if present, is
/// re-derived from the declared parameter types so that a signature matcher
/// sees the post-edit arity.
pub fn replace_parameters(
    method: &MethodDecl,
    template: &Template,
    anchor: usize,
    values: &[TemplateValue],
) -> Result<MethodDecl, RecastError> {
    let coordinate = Coordinate::ReplaceParameters { anchor };
    check_kind(coordinate, template, &[FragmentKind::Parameters])?;
    if anchor >= method.parameters.len() {
        return Err(RecastError::coordinate_mismatch(
            coordinate.to_string(),
            format!(
                "method `{}` has {} parameter(s), anchor parameter is absent",
                method.name,
                method.parameters.len()
            ),
        ));
    }
    let spliced = template.parameter_nodes(values)?;
    trace!(
        method = %method.name,
        inserted = spliced.len(),
        anchor,
        "splicing parameters"
    );
    let mut parameters = Vec::with_capacity(method.parameters.len() + spliced.len());
    parameters.extend(method.parameters[..anchor].iter().cloned());
    parameters.extend(spliced);
    parameters.extend(method.parameters[anchor..].iter().cloned());
    let resolved = method.resolved.as_ref().map(|sig| MethodSig {
        declaring_type: sig.declaring_type.clone(),
        name: sig.name.clone(),
        parameter_types: parameters.iter().map(|p| p.type_name.name.clone()).collect(),
    });
    Ok(MethodDecl {
        parameters,
        resolved,
        ..method.clone()
    })
}

/// Discard the method's existing body subtree (if any) and install the body
/// the template describes. A body and an `abstract` modifier are mutually
/// exclusive, so the modifier is stripped before installation; formatting
/// for the fresh body is re-derived through the printer collaborator.
pub fn replace_body(method: &MethodDecl, template: &Template) -> Result<MethodDecl, RecastError> {
    check_kind(
        Coordinate::ReplaceBody,
        template,
        &[FragmentKind::EmptyBody, FragmentKind::Statements],
    )?;
    let statements = template.statement_nodes(&[])?;
    trace!(method = %method.name, statements = statements.len(), "installing body");
    let modifiers = method
        .modifiers
        .iter()
        .filter(|m| m.kind != ModifierKind::Abstract)
        .cloned()
        .collect();
    let installed = MethodDecl {
        modifiers,
        body: Some(Arc::new(Block {
            id: NodeId::fresh(),
            statements,
            trivia: Trivia::default(),
        })),
        ..method.clone()
    };
    Ok(source_gen::auto_format(&installed))
}

/// Append the template's compiled statement sequence after the existing last
/// statement of the block; an empty block ends up containing exactly the new
/// statements. Placeholder values are substituted positionally here.
pub fn append_last_statement(
    block: &Block,
    template: &Template,
    values: &[TemplateValue],
) -> Result<Block, RecastError> {
    check_kind(
        Coordinate::AppendLastStatement,
        template,
        &[FragmentKind::Statements],
    )?;
    let appended = template.statement_nodes(values)?;
    trace!(appended = appended.len(), "appending statements");
    let mut statements = Vec::with_capacity(block.statements.len() + appended.len());
    statements.extend(block.statements.iter().cloned());
    statements.extend(appended);
    Ok(Block {
        id: block.id,
        statements,
        trivia: block.trivia.clone(),
    })
}
