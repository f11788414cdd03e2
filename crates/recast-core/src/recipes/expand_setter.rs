use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Recipe;
use crate::errors::RecastError;
use crate::matcher::{Matcher, MethodMatcher};
use crate::patch;
use crate::template::{FragmentKind, Template};
use crate::tree::MethodDecl;
use crate::visit::{AstVisitor, Cursor};

/// Configuration for [`ExpandSetter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandSetterConfig {
    /// Fully qualified name of the class whose `setCustomerInfo(String)`
    /// method is expanded.
    pub fully_qualified_class_name: String,
}

/// Expands `setCustomerInfo(String lastName)` into a three-argument setter:
/// inserts `Date dateOfBirth, String firstName` ahead of the existing
/// parameter, installs a body (dropping `abstract`), and appends the three
/// field assignments.
///
/// Idempotence falls out of signature exactness: once the parameters are
/// spliced in, the method's signature is `(Date, String, String)` and the
/// matcher no longer sees `(String)`.
#[derive(Debug, Clone)]
pub struct ExpandSetter {
    matcher: MethodMatcher,
    parameters_template: Template,
    body_template: Template,
    assignments_template: Template,
}

impl ExpandSetter {
    pub fn new(config: ExpandSetterConfig) -> Result<Self, RecastError> {
        if config.fully_qualified_class_name.trim().is_empty() {
            return Err(RecastError::configuration(
                "fullyQualifiedClassName must not be empty",
            ));
        }
        let matcher = MethodMatcher::parse(&format!(
            "{} setCustomerInfo(String)",
            config.fully_qualified_class_name
        ))?;
        // All three templates compile eagerly; a syntax problem surfaces
        // here, never mid-traversal.
        let parameters_template = Template::builder("Date dateOfBirth, String firstName")
            .imports(["java.util.Date"])
            .build(FragmentKind::Parameters)?;
        let body_template = Template::builder(" ").build(FragmentKind::EmptyBody)?;
        let assignments_template = Template::builder(
            "this.dateOfBirth = dateOfBirth;\nthis.firstName = firstName;\nthis.lastName = lastName;",
        )
        .build(FragmentKind::Statements)?;
        Ok(Self {
            matcher,
            parameters_template,
            body_template,
            assignments_template,
        })
    }
}

impl Recipe for ExpandSetter {
    fn name(&self) -> &str {
        "Expand customer info"
    }

    fn description(&self) -> &str {
        "Expand the customer info setter with date of birth and first name."
    }

    fn visitor(&self) -> Box<dyn AstVisitor + '_> {
        Box::new(ExpandSetterVisitor { recipe: self })
    }
}

struct ExpandSetterVisitor<'a> {
    recipe: &'a ExpandSetter,
}

impl AstVisitor for ExpandSetterVisitor<'_> {
    fn visit_method(
        &mut self,
        method: &MethodDecl,
        _cursor: &Cursor,
    ) -> Result<MethodDecl, RecastError> {
        if !self.recipe.matcher.matches(method) {
            return Ok(method.clone());
        }
        debug!(method = %method.name, "expanding setter");
        // The matcher guarantees one String parameter, so the anchor exists.
        let method = patch::replace_parameters(method, &self.recipe.parameters_template, 0, &[])?;
        let method = patch::replace_body(&method, &self.recipe.body_template)?;
        let body = method.body.as_deref().ok_or_else(|| {
            RecastError::coordinate_mismatch(
                "append-last-statement",
                "method body missing after installation",
            )
        })?;
        let body = patch::append_last_statement(body, &self.recipe.assignments_template, &[])?;
        Ok(MethodDecl {
            body: Some(Arc::new(body)),
            ..method
        })
    }
}
