use super::*;
use crate::template::Template;
use crate::tree::{build, ToSource};

fn params_template() -> Template {
    Template::builder("Date dateOfBirth, String firstName")
        .imports(["java.util.Date"])
        .build(FragmentKind::Parameters)
        .unwrap()
}

fn empty_body_template() -> Template {
    Template::builder(" ").build(FragmentKind::EmptyBody).unwrap()
}

#[test]
fn test_replace_parameters_before_first() {
    let mut original = build::param("String", "lastName");
    original.trivia = Trivia {
        leading: "/* keep */ ".to_string(),
        trailing: String::new(),
    };
    let method = build::method_decl(
        vec![ModifierKind::Public],
        "void",
        "setCustomerInfo",
        vec![original.clone()],
        None,
    );

    let patched = replace_parameters(&method, &params_template(), 0, &[]).unwrap();

    assert_eq!(patched.parameters.len(), 3);
    assert_eq!(patched.parameters[0].to_source(), "Date dateOfBirth");
    assert_eq!(patched.parameters[1].to_source(), "String firstName");
    // The anchor parameter survives in place with its metadata untouched.
    assert_eq!(patched.parameters[2], original);
    assert_eq!(patched.parameters[2].id, original.id);
    // The input is unchanged.
    assert_eq!(method.parameters.len(), 1);
}

#[test]
fn test_replace_parameters_rederives_signature() {
    let method = build::method_decl(
        vec![],
        "void",
        "setCustomerInfo",
        vec![build::param("String", "lastName")],
        None,
    );
    let method = build::resolve_method(&method, "demo.Customer");

    let patched = replace_parameters(&method, &params_template(), 0, &[]).unwrap();

    let sig = patched.resolved.unwrap();
    assert_eq!(sig.declaring_type, "demo.Customer");
    assert_eq!(sig.name, "setCustomerInfo");
    assert_eq!(sig.parameter_types, ["Date", "String", "String"]);
}

#[test]
fn test_replace_parameters_missing_anchor() {
    let method = build::method_decl(vec![], "void", "setCustomerInfo", vec![], None);
    let err = replace_parameters(&method, &params_template(), 0, &[]);
    assert!(matches!(err, Err(RecastError::CoordinateMismatch { .. })));
}

#[test]
fn test_replace_parameters_rejects_statement_template() {
    let statements = Template::builder("return;")
        .build(FragmentKind::Statements)
        .unwrap();
    let method = build::method_decl(vec![], "void", "m", vec![build::param("int", "x")], None);
    let err = replace_parameters(&method, &statements, 0, &[]);
    assert!(matches!(err, Err(RecastError::CoordinateMismatch { .. })));
}

#[test]
fn test_replace_body_strips_abstract_modifier() {
    let method = build::method_decl(
        vec![ModifierKind::Public, ModifierKind::Abstract],
        "void",
        "setCustomerInfo",
        vec![build::param("String", "lastName")],
        None,
    );
    assert!(method.is_abstract());

    let patched = replace_body(&method, &empty_body_template()).unwrap();

    assert!(!patched.is_abstract());
    assert!(patched.body.is_some());
    assert!(patched.body.as_ref().unwrap().is_empty());
    assert_eq!(
        patched.to_source(),
        "public void setCustomerInfo(String lastName) {\n}"
    );
}

#[test]
fn test_replace_body_discards_existing_body() {
    let method = build::method_decl(
        vec![],
        "void",
        "m",
        vec![],
        Some(build::block(vec![build::return_stmt(None)])),
    );
    let patched = replace_body(&method, &empty_body_template()).unwrap();
    assert!(patched.body.as_ref().unwrap().is_empty());
}

#[test]
fn test_append_last_statement_to_empty_body() {
    let template = Template::builder("this.lastName = lastName;")
        .build(FragmentKind::Statements)
        .unwrap();
    let body = build::block(vec![]);

    let patched = append_last_statement(&body, &template, &[]).unwrap();

    assert_eq!(patched.statements.len(), 1);
    assert_eq!(patched.statements[0].to_source(), "this.lastName = lastName;");
}

#[test]
fn test_append_last_statement_preserves_existing() {
    let template = Template::builder("this.lastName = lastName;")
        .build(FragmentKind::Statements)
        .unwrap();
    let existing = build::return_stmt(None);
    let body = build::block(vec![existing.clone()]);

    let patched = append_last_statement(&body, &template, &[]).unwrap();

    assert_eq!(patched.statements.len(), 2);
    assert_eq!(patched.statements[0], existing);
    assert_eq!(patched.id, body.id);
}

#[test]
fn test_coordinate_display() {
    assert_eq!(
        Coordinate::ReplaceParameters { anchor: 0 }.to_string(),
        "replace-parameters(anchor 0)"
    );
    assert_eq!(Coordinate::ReplaceBody.to_string(), "replace-body");
    assert_eq!(
        Coordinate::AppendLastStatement.to_string(),
        "append-last-statement"
    );
}
