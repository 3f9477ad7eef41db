// tests/unit/error_taxonomy.rs
//! Error taxonomy through the public API.

use notionx::{
    error_for_code, error_registry, interpret_response, ApiErrorKind, DefinitionError,
    ErrorKindSpec, ErrorRegistry, LocalValidationError, NotionError, ERROR_KINDS,
};
use reqwest::StatusCode;

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_resolvable() {
        let registry = error_registry().unwrap();
        let codes: Vec<&str> = ERROR_KINDS
            .iter()
            .filter_map(|spec| spec.kind.code())
            .collect();

        assert_eq!(codes.len(), registry.len());
        for code in codes {
            let err = error_for_code(Some(code), "d").unwrap();
            assert_eq!(err.kind().code(), Some(code));
        }
    }

    #[test]
    fn catch_all_has_no_code() {
        assert_eq!(ApiErrorKind::Unknown.code(), None);
        assert_eq!(ApiErrorKind::Unknown.to_string(), "UnknownAPIResponseError");
        assert_eq!(ApiErrorKind::ObjectNotFound.to_string(), "ObjectNotFoundError");
    }

    #[test]
    fn table_without_catch_all_is_a_definition_error() {
        static TABLE: &[ErrorKindSpec] = &[ErrorKindSpec::registered(
            ApiErrorKind::RateLimited,
            "RateLimitedError",
            "rate_limited",
            "m",
        )];
        assert_eq!(
            ErrorRegistry::build(TABLE).unwrap_err(),
            DefinitionError::MissingCatchAllKind
        );
    }

    #[test]
    fn custom_table_resolves_its_own_codes() {
        static TABLE: &[ErrorKindSpec] = &[
            ErrorKindSpec::registered(ApiErrorKind::Conflict, "ConflictError", "clash", "m"),
            ErrorKindSpec::excluded(ApiErrorKind::Unknown, "UnknownAPIResponseError", "u"),
        ];
        let registry = ErrorRegistry::build(TABLE).unwrap();
        assert_eq!(registry.resolve(Some("clash")).kind, ApiErrorKind::Conflict);
        assert_eq!(
            registry.resolve(Some("conflict_error")).kind,
            ApiErrorKind::Unknown
        );
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn restricted_resource_detail_is_kept() {
        let body = r#"{"object":"error","status":403,"code":"restricted_resource","message":"Insufficient permissions."}"#;
        let err = interpret_response(StatusCode::FORBIDDEN, body).unwrap_err();

        assert_eq!(err.api_kind(), Some(ApiErrorKind::RestrictedResource));
        assert!(err.to_string().ends_with("Insufficient permissions."));
    }

    #[test]
    fn error_array_body_maps_to_catch_all() {
        let err = interpret_response(StatusCode::BAD_REQUEST, "[1,2,3]").unwrap_err();
        assert_eq!(err.api_kind(), Some(ApiErrorKind::Unknown));
    }

    #[test]
    fn families_are_disjoint() {
        let api = interpret_response(StatusCode::UNAUTHORIZED, r#"{"code":"unauthorized"}"#)
            .unwrap_err();
        assert!(!api.is_local_validation());

        let local = NotionError::from(LocalValidationError::NotAMapping {
            param: "body_data".to_string(),
        });
        assert!(local.is_local_validation());
        assert_eq!(local.api_kind(), None);
    }
}
