//! Custom Axum extractors

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;

/// Raw request body as a field map, before any rules run.
///
/// Accepts JSON objects and urlencoded forms. An empty body is an empty map.
pub struct RawFields(pub Map<String, Value>);

impl<S> FromRequest<S> for RawFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(pairs): Form<HashMap<String, String>> = Form::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody {
                    reason: e.body_text(),
                })?;

            return Ok(Self(
                pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody {
                reason: e.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Map::new()));
        }

        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(ApiError::MalformedBody {
                reason: "expected a JSON object".into(),
            }),
            Err(e) => Err(ApiError::MalformedBody {
                reason: e.to_string(),
            }),
        }
    }
}

/// Query string parameters, rejected with the API's JSON error shape.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::MalformedQuery {
                reason: e.body_text(),
            })?;
        Ok(Self(params))
    }
}
