use axum::{
    Json,
    extract::{
        FromRequest, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    InvalidField {
        field: String,
        code: &'static str,
        message: String,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<menuplan_shared::Error> for AppError {
    fn from(err: menuplan_shared::Error) -> Self {
        match err {
            menuplan_shared::Error::Validate(errors) => AppError::Validation(errors),
            menuplan_shared::Error::User(msg) => AppError::BadRequest(msg),
            menuplan_shared::Error::Server(msg) => AppError::Internal(anyhow::anyhow!(msg)),
            menuplan_shared::Error::Unknown(err) => AppError::Internal(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();

        if !matches!(rejection, JsonRejection::JsonDataError(_)) {
            return AppError::BadRequest(text);
        }

        match field_error(&text) {
            Some((field, code, message)) => AppError::InvalidField {
                field,
                code,
                message,
            },
            None => AppError::BadRequest(text),
        }
    }
}

/// Pulls the offending field out of a serde data error, which reads either
/// `missing field `x`` or `path: detail`.
fn field_error(text: &str) -> Option<(String, &'static str, String)> {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);

    let (path, rest) = match detail.split_once(": ") {
        Some((path, rest)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            (Some(path), rest)
        }
        _ => (None, detail),
    };

    if let Some(missing) = rest.strip_prefix("missing field `") {
        let (name, _) = missing.split_once('`')?;
        let field = match path {
            Some(path) => format!("{path}.{name}"),
            None => name.to_owned(),
        };

        return Some((field, "missing", rest.to_owned()));
    }

    Some((path?.to_owned(), "invalid", rest.to_owned()))
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": msg, "errors": {} }),
            ),
            AppError::Validation(errors) => {
                tracing::warn!(errors = %errors, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Validation failed", "errors": errors }),
                )
            }
            AppError::InvalidField {
                field,
                code,
                message,
            } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": message,
                    "errors": { field: [{ "code": code, "message": message }] },
                }),
            ),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "message": self.to_string() }),
            ),
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body that has passed `validator` rules. Malformed bodies and rule
/// violations are both rejected with 400.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::from(menuplan_shared::Error::Server("disk on fire".to_owned())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await, json!({ "message": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_user_error_is_bad_request() {
        let response = AppError::from(menuplan_shared::Error::User("bad range".to_owned()))
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await["message"], "bad range");
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let response = AppError::NotFound("Dish").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await["message"], "Dish not found");
    }

    #[test]
    fn test_field_error_from_serde_messages() {
        let prefix = "Failed to deserialize the JSON body into the target type: ";

        assert_eq!(
            field_error(&format!("{prefix}missing field `endDate` at line 1 column 26")),
            Some((
                "endDate".to_owned(),
                "missing",
                "missing field `endDate` at line 1 column 26".to_owned()
            ))
        );

        let (field, code, _) = field_error(&format!(
            "{prefix}mealType: unknown variant `brunch`, expected one of `breakfast`, `lunch`, `dinner` at line 1 column 40"
        ))
        .unwrap();
        assert_eq!((field.as_str(), code), ("mealType", "invalid"));

        let (field, code, _) = field_error(&format!(
            "{prefix}ingredients[0]: missing field `unit` at line 1 column 80"
        ))
        .unwrap();
        assert_eq!((field.as_str(), code), ("ingredients[0].unit", "missing"));

        assert_eq!(
            field_error(&format!("{prefix}invalid type: integer `1`, expected a map")),
            None
        );
    }

    #[tokio::test]
    async fn test_invalid_field_body() {
        let response = AppError::InvalidField {
            field: "endDate".to_owned(),
            code: "missing",
            message: "missing field `endDate`".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body(response).await["errors"],
            json!({ "endDate": [{ "code": "missing", "message": "missing field `endDate`" }] })
        );
    }
}
