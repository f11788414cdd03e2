use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Recipe;
use crate::errors::RecastError;
use crate::matcher::{Matcher, TypeMatcher};
use crate::patch;
use crate::template::{FragmentKind, Template, TemplateValue};
use crate::tree::ClassDecl;
use crate::visit::{AstVisitor, Cursor};

/// Configuration for [`AddHelloMethod`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHelloConfig {
    /// A fully qualified class name indicating which class to add a
    /// `hello()` method to, e.g. `com.example.FooBar`.
    pub fully_qualified_class_name: String,
}

/// Adds a `hello()` method to the configured class. Classes that already
/// declare a method named `hello` are left alone, whatever its signature.
#[derive(Debug, Clone)]
pub struct AddHelloMethod {
    config: AddHelloConfig,
    matcher: TypeMatcher,
    method_template: Template,
}

impl AddHelloMethod {
    pub fn new(config: AddHelloConfig) -> Result<Self, RecastError> {
        if config.fully_qualified_class_name.trim().is_empty() {
            return Err(RecastError::configuration(
                "fullyQualifiedClassName must not be empty",
            ));
        }
        // Compiled once here, reused for every matched node in every run.
        let method_template =
            Template::builder("public String hello() { return \"Hello from #{}!\"; }")
                .build(FragmentKind::Statements)?;
        Ok(Self {
            matcher: TypeMatcher::new(config.fully_qualified_class_name.as_str()),
            config,
            method_template,
        })
    }
}

impl Recipe for AddHelloMethod {
    fn name(&self) -> &str {
        "Add hello method"
    }

    fn description(&self) -> &str {
        "Adds a \"hello\" method to the specified class."
    }

    fn visitor(&self) -> Box<dyn AstVisitor + '_> {
        Box::new(AddHelloVisitor { recipe: self })
    }
}

struct AddHelloVisitor<'a> {
    recipe: &'a AddHelloMethod,
}

impl AstVisitor for AddHelloVisitor<'_> {
    fn visit_class(&mut self, class: &ClassDecl, _cursor: &Cursor) -> Result<ClassDecl, RecastError> {
        if !self.recipe.matcher.matches(class) {
            return Ok(class.clone());
        }
        // Re-running must be a no-op: a same-named method counts as already
        // present even when its signature differs.
        if class.has_method_named("hello") {
            debug!(class = %class.name, "hello method already present, skipping");
            return Ok(class.clone());
        }
        debug!(class = %class.name, "appending hello method");
        let body = patch::append_last_statement(
            &class.body,
            &self.recipe.method_template,
            &[TemplateValue::Text(
                self.recipe.config.fully_qualified_class_name.clone(),
            )],
        )?;
        Ok(ClassDecl {
            body: Arc::new(body),
            ..class.clone()
        })
    }
}
