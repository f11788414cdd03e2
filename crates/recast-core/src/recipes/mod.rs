// Recipes: named, configured transformation units
// A recipe pairs one matcher with one or more patch steps. It is fully
// configured and immutable before its first traversal; every traversal gets
// a fresh visitor so no state leaks between runs.

pub mod add_hello;
pub mod expand_setter;


use anyhow::Result;
use indexmap::IndexMap;
use tracing::debug;

use crate::errors::RecastError;
use crate::tree::SourceUnit;
use crate::visit::{self, AstVisitor};

pub use add_hello::{AddHelloConfig, AddHelloMethod};
pub use expand_setter::{ExpandSetter, ExpandSetterConfig};

/// The surface the external recipe-runner needs: display metadata plus a
/// fresh traversal visitor per run.
pub trait Recipe: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// What the recipe does, for listings
    fn description(&self) -> &str;

    /// A fresh visitor bound to this recipe's immutable configuration.
    /// Called once per traversal; sharing a visitor between traversals
    /// would leak cursor state across runs.
    fn visitor(&self) -> Box<dyn AstVisitor + '_>;
}

/// Run one recipe over one source unit, returning the rebuilt unit. The
/// input is untouched; on error no partial tree is returned.
pub fn run_recipe(recipe: &dyn Recipe, unit: &SourceUnit) -> Result<SourceUnit, RecastError> {
    debug!(recipe = recipe.name(), "starting traversal");
    let mut visitor = recipe.visitor();
    visit::walk_unit(visitor.as_mut(), unit)
}

/// Create a recipe from its registry id and a JSON configuration value.
pub fn create_recipe(id: &str, config: serde_json::Value) -> Result<Box<dyn Recipe>> {
    match id {
        "add-hello-method" => {
            let config: AddHelloConfig = serde_json::from_value(config)?;
            Ok(Box::new(AddHelloMethod::new(config)?))
        }
        "expand-customer-info" => {
            let config: ExpandSetterConfig = serde_json::from_value(config)?;
            Ok(Box::new(ExpandSetter::new(config)?))
        }
        _ => anyhow::bail!("Unknown recipe id: {}", id),
    }
}

/// Registry ids mapped to display names, in a stable order.
pub fn recipe_ids() -> IndexMap<&'static str, &'static str> {
    [
        ("add-hello-method", "Add hello method"),
        ("expand-customer-info", "Expand customer info"),
    ]
    .into_iter()
    .collect()
}
