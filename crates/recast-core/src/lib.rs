//! # Recast Core
//!
//! Core implementation of the Recast structural rewriting engine, including:
//! - Immutable tree model with structural sharing
//! - Matchers deciding which declarations a recipe rewrites
//! - Compile-once templates with positional placeholders
//! - Patch applicators splicing templates at coordinates
//! - A one-pass traversal engine and the shipped recipes
//!
//! This crate provides the transformation core only. Parsing source text,
//! recipe discovery, and CLI/build integration live with the surrounding
//! host: the engine accepts an already-parsed [`tree::SourceUnit`] and
//! returns a rebuilt one.

#![warn(clippy::all)]

pub mod errors;
pub mod matcher;
pub mod patch;
pub mod recipes;
pub mod template;
pub mod tree;
pub mod visit;

// Re-export commonly used types
pub use errors::RecastError;
pub use matcher::{Matcher, MethodMatcher, TypeMatcher};
pub use patch::Coordinate;
pub use recipes::{
    create_recipe, recipe_ids, run_recipe, AddHelloConfig, AddHelloMethod, ExpandSetter,
    ExpandSetterConfig, Recipe,
};
pub use template::{FragmentKind, Template, TemplateBuilder, TemplateValue};
pub use tree::{
    Block, ClassDecl, MethodDecl, MethodSig, Modifier, ModifierKind, NodeId, Parameter,
    SourceUnit, Statement, ToSource, Trivia, TypeName, TypeRef,
};
pub use visit::{walk_unit, AstVisitor, Cursor, Scope};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for Recast core components
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recast_core=info".parse().unwrap()),
        )
        .init();
}
