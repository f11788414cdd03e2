use super::*;
use crate::tree::{build, ToSource};

#[test]
fn test_compile_parameter_list() {
    let template = Template::builder("Date dateOfBirth, String firstName")
        .imports(["java.util.Date"])
        .build(FragmentKind::Parameters)
        .unwrap();
    assert_eq!(template.kind(), FragmentKind::Parameters);
    assert_eq!(template.placeholder_count(), 0);
    assert_eq!(template.imports(), ["java.util.Date"]);

    let params = template.parameter_nodes(&[]).unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].to_source(), "Date dateOfBirth");
    assert_eq!(params[1].to_source(), "String firstName");
}

#[test]
fn test_compile_parameter_list_with_slot() {
    let template = Template::builder("Date dateOfBirth, #{}")
        .build(FragmentKind::Parameters)
        .unwrap();
    assert_eq!(template.placeholder_count(), 1);

    let existing = build::param("String", "lastName");
    let params = template
        .parameter_nodes(&[TemplateValue::Parameter(existing.clone())])
        .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[1], existing);
}

#[test]
fn test_compile_assignment_statements() {
    let template = Template::builder(
        "this.dateOfBirth = dateOfBirth;\nthis.firstName = firstName;\nthis.lastName = lastName;",
    )
    .build(FragmentKind::Statements)
    .unwrap();
    assert_eq!(template.placeholder_count(), 0);

    let statements = template.statement_nodes(&[]).unwrap();
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[0].to_source(), "this.dateOfBirth = dateOfBirth;");
    assert_eq!(statements[2].to_source(), "this.lastName = lastName;");
}

#[test]
fn test_compile_method_declaration_with_interpolation() {
    let template = Template::builder("public String hello() { return \"Hello from #{}!\"; }")
        .build(FragmentKind::Statements)
        .unwrap();
    assert_eq!(template.placeholder_count(), 1);

    let statements = template
        .statement_nodes(&[TemplateValue::Text("FooBar".to_string())])
        .unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].to_source(),
        "public String hello() {\n    return \"Hello from FooBar!\";\n}"
    );
}

#[test]
fn test_template_is_reusable_with_fresh_identity() {
    let template = Template::builder("public String hello() { return \"Hello from #{}!\"; }")
        .build(FragmentKind::Statements)
        .unwrap();

    let first = template
        .statement_nodes(&[TemplateValue::Text("A".to_string())])
        .unwrap();
    let second = template
        .statement_nodes(&[TemplateValue::Text("A".to_string())])
        .unwrap();

    // Same value, distinct identity on every apply.
    assert_eq!(first, second);
    match (&first[0], &second[0]) {
        (Statement::Method(a), Statement::Method(b)) => assert_ne!(a.id, b.id),
        _ => panic!("expected method statements"),
    }
}

#[test]
fn test_empty_body_template() {
    let template = Template::builder(" ").build(FragmentKind::EmptyBody).unwrap();
    assert_eq!(template.kind(), FragmentKind::EmptyBody);
    assert_eq!(template.statement_nodes(&[]).unwrap(), vec![]);

    let err = Template::builder("return;").build(FragmentKind::EmptyBody);
    assert!(matches!(err, Err(RecastError::TemplateSyntax { .. })));
}

#[test]
fn test_compile_rejects_wrong_fragment_kind() {
    // A statement snippet is not a parameter list.
    let err = Template::builder("this.x = y;").build(FragmentKind::Parameters);
    assert!(matches!(err, Err(RecastError::TemplateSyntax { .. })));

    // An unterminated method body is not a statement sequence.
    let err = Template::builder("void m() { return;").build(FragmentKind::Statements);
    assert!(matches!(err, Err(RecastError::TemplateSyntax { .. })));

    // A dangling placeholder marker.
    let err = Template::builder("# {").build(FragmentKind::Statements);
    assert!(matches!(err, Err(RecastError::TemplateSyntax { .. })));
}

#[test]
fn test_substitution_checks_value_arity_and_kind() {
    let template = Template::builder("public String hello() { return \"Hello from #{}!\"; }")
        .build(FragmentKind::Statements)
        .unwrap();

    let err = template.statement_nodes(&[]);
    assert!(matches!(err, Err(RecastError::Placeholder { .. })));

    let err = template.statement_nodes(&[TemplateValue::Parameter(build::param("int", "x"))]);
    assert!(matches!(err, Err(RecastError::Placeholder { .. })));
}

#[test]
fn test_statement_slot_substitution() {
    let template = Template::builder("this.count = count;\n#{}")
        .build(FragmentKind::Statements)
        .unwrap();
    assert_eq!(template.placeholder_count(), 1);

    let extra = build::return_stmt(None);
    let statements = template
        .statement_nodes(&[TemplateValue::Statement(extra.clone())])
        .unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1], extra);
}
