use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::error::{
    ErrorEntry, ErrorResponse, FieldError, FieldErrorKind, HandlerError, ValidationErrorSet,
};

// validator reports struct-level (schema) failures under this key
const STRUCT_LEVEL_KEY: &str = "__all__";

impl ErrorResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new().push(code, message)
    }

    /// Appends an entry; entries with neither a code nor a message are dropped.
    pub fn push(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        let (code, message) = (code.into(), message.into());
        if !code.is_empty() || !message.is_empty() {
            self.errors.push(ErrorEntry { code, message });
        }
        self
    }

    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Renders the body with `status` and tags the response with a [`HandlerError`].
    pub fn with_status(self, status: StatusCode) -> Response {
        let note = HandlerError(self.summary());
        let mut response = (status, Json(self)).into_response();
        response.extensions_mut().insert(note);
        response
    }
}

impl FieldErrorKind {
    /// Maps a rule code to its kind: `required`, `json`, everything else is an invalid value.
    pub fn from_code(code: &str) -> Self {
        match code {
            "required" => Self::MissingRequired,
            "json" => Self::InvalidJson,
            _ => Self::InvalidValue,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::InvalidJson => "invalid_json",
            Self::InvalidValue => "invalid_value",
        }
    }

    pub fn message(&self, field: &str) -> String {
        match self {
            Self::MissingRequired => {
                format!("missing required value for parameter | field: {field}")
            }
            Self::InvalidJson => format!("invalid json value for parameter | field: {field}"),
            Self::InvalidValue => format!("invalid value for parameter | field: {field}"),
        }
    }
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn to_entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.kind.code().to_string(),
            message: self.kind.message(&self.field),
        }
    }
}

impl ValidationErrorSet {
    pub fn single(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            errors: vec![FieldError::new(field, kind)],
        }
    }

    /// Classifies a body decoding failure.
    ///
    /// A missing field reported by serde becomes a missing-required error on
    /// that field; any other syntax or type problem is an invalid-json error on `body`.
    pub fn from_json_error(err: &serde_json::Error) -> Self {
        if err.is_data() {
            let message = err.to_string();
            if let Some(field) = missing_field(&message) {
                return Self::single(field, FieldErrorKind::MissingRequired);
            }
        }
        Self::single("body", FieldErrorKind::InvalidJson)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            errors: self.errors.iter().map(FieldError::to_entry).collect(),
        }
    }
}

impl From<&ValidationErrors> for ValidationErrorSet {
    fn from(errors: &ValidationErrors) -> Self {
        let mut collected = Vec::new();
        flatten(None, errors, &mut collected);

        // one entry per offending field, in a stable order
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        collected.dedup_by(|a, b| a.field == b.field);

        Self { errors: collected }
    }
}

impl From<ValidationErrors> for ValidationErrorSet {
    fn from(errors: ValidationErrors) -> Self {
        Self::from(&errors)
    }
}

impl IntoResponse for ValidationErrorSet {
    fn into_response(self) -> Response {
        self.to_response_body().with_status(StatusCode::BAD_REQUEST)
    }
}

fn flatten(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) if field == STRUCT_LEVEL_KEY => prefix.to_string(),
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(
                    field_errors
                        .iter()
                        .map(|e| FieldError::new(path.clone(), FieldErrorKind::from_code(&e.code))),
                );
            }
            ValidationErrorsKind::Struct(inner) => flatten(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(Some(&format!("{path}[{index}]")), inner, out);
                }
            }
        }
    }
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Debug)]
    struct Inner {
        #[validate(range(min = 1, max = 10))]
        count: u32,
    }

    #[derive(Deserialize, Validate, Debug)]
    struct Outer {
        #[validate(length(min = 1, code = "required"))]
        name: String,
        #[validate(url)]
        homepage: String,
        #[validate(nested)]
        inner: Inner,
    }

    #[test]
    fn maps_rule_codes_to_kinds() {
        assert_eq!(
            FieldErrorKind::from_code("required"),
            FieldErrorKind::MissingRequired
        );
        assert_eq!(FieldErrorKind::from_code("json"), FieldErrorKind::InvalidJson);
        assert_eq!(FieldErrorKind::from_code("range"), FieldErrorKind::InvalidValue);
        assert_eq!(FieldErrorKind::from_code("url"), FieldErrorKind::InvalidValue);
    }

    #[test]
    fn flattens_nested_errors_in_field_order() {
        let outer = Outer {
            name: String::new(),
            homepage: "not a url".into(),
            inner: Inner { count: 42 },
        };
        let errors = outer.validate().unwrap_err();

        let set = ValidationErrorSet::from(&errors);
        let fields: Vec<_> = set.errors().iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["homepage", "inner.count", "name"]);
        assert_eq!(set.errors()[2].kind, FieldErrorKind::MissingRequired);
        assert_eq!(set.errors()[1].kind, FieldErrorKind::InvalidValue);
    }

    #[test]
    fn missing_json_field_is_missing_required() {
        let err = serde_json::from_str::<Outer>("{}").unwrap_err();

        let set = ValidationErrorSet::from_json_error(&err);

        assert_eq!(
            set.errors(),
            &[FieldError::new("name", FieldErrorKind::MissingRequired)]
        );
    }

    #[test]
    fn malformed_json_is_invalid_json_on_body() {
        let err = serde_json::from_str::<Outer>("{\"name\": ").unwrap_err();

        let set = ValidationErrorSet::from_json_error(&err);

        assert_eq!(
            set.to_response_body(),
            ErrorResponse::single(
                "invalid_json",
                "invalid json value for parameter | field: body"
            )
        );
    }

    #[test]
    fn validation_response_is_bad_request_with_note() {
        let response = ValidationErrorSet::single("message", FieldErrorKind::MissingRequired)
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.extensions().get::<HandlerError>(),
            Some(&HandlerError(
                "missing required value for parameter | field: message".into()
            ))
        );
    }

    #[test]
    fn push_skips_empty_entries() {
        let body = ErrorResponse::new().push("", "").push("oops", "");

        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].code, "oops");
    }
}
