// Tests for source code generation from tree nodes

#[cfg(test)]
mod printer_tests {
    use crate::tree::{build, ModifierKind, ToSource, Trivia};

    #[test]
    fn test_empty_class_to_source() {
        let class = build::class_decl("Bash", vec![]);
        assert_eq!(class.to_source(), "class Bash {}");
    }

    #[test]
    fn test_method_with_body_to_source() {
        let method = build::method_decl(
            vec![ModifierKind::Public],
            "String",
            "hello",
            vec![],
            Some(build::block(vec![build::return_stmt(Some(build::string_lit(
                "Hello from FooBar!",
            )))])),
        );
        let expected = "public String hello() {\n    return \"Hello from FooBar!\";\n}";
        assert_eq!(method.to_source(), expected);
    }

    #[test]
    fn test_abstract_method_to_source() {
        let method = build::method_decl(
            vec![ModifierKind::Abstract],
            "void",
            "setCustomerInfo",
            vec![build::param("String", "lastName")],
            None,
        );
        assert_eq!(method.to_source(), "abstract void setCustomerInfo(String lastName);");
    }

    #[test]
    fn test_assignment_statements_to_source() {
        let stmt = build::assign(build::this_field("lastName"), build::name_ref("lastName"));
        assert_eq!(stmt.to_source(), "this.lastName = lastName;");
    }

    #[test]
    fn test_class_with_method_to_source() {
        let method = build::method_decl(
            vec![ModifierKind::Public],
            "String",
            "hello",
            vec![],
            Some(build::block(vec![build::return_stmt(Some(build::string_lit(
                "Hello from FooBar!",
            )))])),
        );
        let class = build::class_decl("FooBar", vec![build::method_stmt(method)]);
        let expected = "class FooBar {\n    public String hello() {\n        return \"Hello from FooBar!\";\n    }\n}";
        assert_eq!(class.to_source(), expected);
    }

    #[test]
    fn test_unit_with_package_to_source() {
        let unit = build::source_unit(Some("demo"), vec![build::class_decl("Bash", vec![])]);
        assert_eq!(unit.to_source(), "package demo;\n\nclass Bash {}\n");
    }

    #[test]
    fn test_string_escaping() {
        let lit = build::string_lit("say \"hi\"\\now");
        assert_eq!(lit.to_source(), "\"say \\\"hi\\\"\\\\now\"");
    }

    #[test]
    fn test_trivia_is_carried_through() {
        let mut param = build::param("String", "lastName");
        param.trivia = Trivia {
            leading: "/* keep */ ".to_string(),
            trailing: String::new(),
        };
        assert_eq!(param.to_source(), "/* keep */ String lastName");
    }

    #[test]
    fn test_field_declaration_to_source() {
        let field = build::field_decl(vec![ModifierKind::Private], "String", "lastName");
        let class = build::class_decl("Customer", vec![build::field_stmt(field)]);
        assert_eq!(
            class.to_source(),
            "class Customer {\n    private String lastName;\n}"
        );
    }
}
