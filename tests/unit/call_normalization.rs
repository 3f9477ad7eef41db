// tests/unit/call_normalization.rs
//! Validation and call-shape normalization through the public API.

use notionx::{
    catalog, validate, BodyRule, CallArgs, CallShape, DefinitionError, Kwargs,
    LocalValidationError, Param, Requirement, Signature,
};
use serde_json::json;

#[cfg(test)]
mod validation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_body_requires_properties() {
        let scope = ["parent", "properties"];
        let required = [Requirement::Key("parent"), Requirement::Key("properties")];

        let err = validate(Some(&json!({"parent": {"page_id": "p"}})), &scope, &required)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The parameter `body` is missing the required key `properties`."
        );

        assert!(validate(
            Some(&json!({"parent": {"page_id": "p"}, "properties": {}})),
            &scope,
            &required
        )
        .is_ok());
    }

    #[test]
    fn rule_exposes_its_declaration() {
        let rule = BodyRule::new(
            "query_data",
            ["block_id", "page_size"],
            [Requirement::Key("block_id")],
        )
        .unwrap();
        assert_eq!(rule.param(), "query_data");
        assert_eq!(rule.key_scope().collect::<Vec<_>>(), vec!["block_id", "page_size"]);
        assert!(matches!(
            rule.validate(Some(&json!({"page_size": 1}))),
            Err(LocalValidationError::MissingRequiredKey { .. })
        ));
    }
}

#[cfg(test)]
mod call_shape_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shape() -> CallShape {
        let signature = Signature::new(
            "databases.query",
            [Param::required("database_id"), Param::optional("body_data")],
        )
        .unwrap();
        CallShape::new(signature, "body_data").unwrap()
    }

    #[test]
    fn keywords_fold_into_body() {
        let bound = shape()
            .bind(
                CallArgs::new()
                    .arg("d1")
                    .kwargs(Kwargs::new().with("page_size", 5).with("sorts", json!([]))),
            )
            .unwrap();
        assert_eq!(bound.get("body_data"), Some(&json!({"page_size": 5, "sorts": []})));
        assert!(bound.discarded_keywords().is_empty());
    }

    #[test]
    fn explicit_body_discards_keywords() {
        let bound = shape()
            .bind(
                CallArgs::new()
                    .arg("d1")
                    .arg(json!({"page_size": 1}))
                    .kwarg("sorts", json!([])),
            )
            .unwrap();
        assert_eq!(bound.get("body_data"), Some(&json!({"page_size": 1})));
        assert_eq!(bound.discarded_keywords(), &["sorts".to_string()]);
    }

    #[test]
    fn undeclared_body_param_is_a_definition_error() {
        let signature = Signature::new("f", [Param::required("id")]).unwrap();
        assert_eq!(
            CallShape::new(signature, "body_data").unwrap_err(),
            DefinitionError::UndeclaredParameter {
                operation: "f",
                param: "body_data"
            }
        );
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_covers_every_endpoint() {
        let names: Vec<&str> = catalog().unwrap().operations().map(|op| op.name()).collect();
        assert_eq!(
            names,
            vec![
                "pages.create",
                "pages.retrieve",
                "pages.update",
                "pages.properties.retrieve",
                "blocks.retrieve",
                "blocks.update",
                "blocks.delete",
                "blocks.children.append",
                "blocks.children.list",
                "databases.retrieve",
                "databases.query",
                "databases.create",
                "databases.update",
                "databases.list",
                "users.retrieve",
                "users.list",
                "users.me",
                "comments.list",
                "comments.create",
                "search",
            ]
        );
    }

    #[test]
    fn block_update_scope_includes_archived() {
        let update = catalog().unwrap().get("blocks.update").unwrap();
        let scope: Vec<&str> = update.body_rule().unwrap().key_scope().collect();
        assert!(scope.contains(&"archived"));
        assert!(scope.contains(&"to_do"));
        assert!(!scope.contains(&"children"));
    }
}
