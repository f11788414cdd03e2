// End-to-end recipe runs through the public API only: registry construction
// from JSON configuration, traversal, and printed output.

use std::sync::Arc;

use recast_core::tree::{build, ModifierKind};
use recast_core::{create_recipe, run_recipe, Recipe, SourceUnit, ToSource};

fn run(recipe: &dyn Recipe, unit: &SourceUnit) -> SourceUnit {
    run_recipe(recipe, unit).expect("traversal should succeed")
}

fn hello_recipe(fq: &str) -> Box<dyn Recipe> {
    create_recipe(
        "add-hello-method",
        serde_json::json!({ "fullyQualifiedClassName": fq }),
    )
    .expect("recipe should configure")
}

#[test]
fn adds_hello_to_foo_bar() {
    let unit = build::source_unit(
        None,
        vec![build::resolve_class(&build::class_decl("FooBar", vec![]), "FooBar")],
    );
    let recipe = hello_recipe("FooBar");

    let result = run(recipe.as_ref(), &unit);

    assert_eq!(
        result.to_source(),
        "class FooBar {\n    public String hello() {\n        return \"Hello from FooBar!\";\n    }\n}\n"
    );
    // The input tree is a value: still printable, still unchanged.
    assert_eq!(unit.to_source(), "class FooBar {}\n");
}

#[test]
fn does_not_change_other_classes() {
    let unit = build::source_unit(
        None,
        vec![build::resolve_class(&build::class_decl("Bash", vec![]), "Bash")],
    );
    let recipe = hello_recipe("FooBar");

    let result = run(recipe.as_ref(), &unit);

    assert_eq!(result, unit);
    assert_eq!(result.to_source(), unit.to_source());
}

#[test]
fn does_not_change_existing_hello() {
    let hello = build::method_decl(
        vec![ModifierKind::Public],
        "String",
        "hello",
        vec![],
        Some(build::block(vec![build::return_stmt(Some(build::string_lit("")))])),
    );
    let unit = build::source_unit(
        None,
        vec![build::resolve_class(
            &build::class_decl("FooBar", vec![build::method_stmt(hello)]),
            "FooBar",
        )],
    );
    let recipe = hello_recipe("FooBar");

    let result = run(recipe.as_ref(), &unit);

    assert_eq!(result, unit);
}

#[test]
fn applying_twice_equals_applying_once() {
    let unit = build::source_unit(
        None,
        vec![build::resolve_class(&build::class_decl("FooBar", vec![]), "FooBar")],
    );
    let recipe = hello_recipe("FooBar");

    let once = run(recipe.as_ref(), &unit);
    let twice = run(recipe.as_ref(), &once);

    assert_eq!(twice, once);
    // The no-op second run shares the first run's class wholesale.
    assert!(Arc::ptr_eq(&twice.types[0], &once.types[0]));
}

#[test]
fn expands_abstract_customer_setter() {
    let setter = build::method_decl(
        vec![ModifierKind::Public, ModifierKind::Abstract],
        "void",
        "setCustomerInfo",
        vec![build::param("String", "lastName")],
        None,
    );
    let setter = build::resolve_method(&setter, "demo.Customer");
    let unit = build::source_unit(
        Some("demo"),
        vec![build::resolve_class(
            &build::class_decl("Customer", vec![build::method_stmt(setter)]),
            "demo.Customer",
        )],
    );
    let recipe = create_recipe(
        "expand-customer-info",
        serde_json::json!({ "fullyQualifiedClassName": "demo.Customer" }),
    )
    .expect("recipe should configure");

    let once = run(recipe.as_ref(), &unit);
    let expected = concat!(
        "package demo;\n\n",
        "class Customer {\n",
        "    public void setCustomerInfo(Date dateOfBirth, String firstName, String lastName) {\n",
        "        this.dateOfBirth = dateOfBirth;\n",
        "        this.firstName = firstName;\n",
        "        this.lastName = lastName;\n",
        "    }\n",
        "}\n",
    );
    assert_eq!(once.to_source(), expected);

    let twice = run(recipe.as_ref(), &once);
    assert_eq!(twice, once);
}

#[test]
fn empty_configuration_is_rejected_before_any_traversal() {
    let err = create_recipe(
        "add-hello-method",
        serde_json::json!({ "fullyQualifiedClassName": "" }),
    );
    assert!(err.is_err());
}
