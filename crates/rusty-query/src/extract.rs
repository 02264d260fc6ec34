// File: src/extract.rs
// Purpose: Axum extractor that decodes the request query into a record

use crate::config::QueryConfig;
use crate::decode::parse_query_into;
use crate::query_string::QueryString;
use crate::record::Record;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::ops::{Deref, DerefMut};

/// Decodes the URI query string into `T`, starting from `T::default()`.
///
/// A [`QueryConfig`] placed in the request extensions (for instance with an
/// `Extension` layer) controls how the raw query is split; otherwise the
/// defaults apply. Malformed values reject the request with `400 Bad Request`.
///
/// ```rust,ignore
/// #[derive(Record, Default)]
/// struct TileParams {
///     #[query("w")]
///     width: u32,
/// }
///
/// async fn tile(Query(params): Query<TileParams>) -> String {
///     format!("width = {}", params.width)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: Record + Default + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or("");
        let query = match parts.extensions.get::<QueryConfig>() {
            Some(config) => QueryString::parse_with(raw, config),
            None => QueryString::parse(raw),
        };

        let mut value = T::default();
        parse_query_into(&query, &mut value).map_err(|err| {
            tracing::debug!("Rejecting query {:?}: {}", raw, err);
            (StatusCode::BAD_REQUEST, err.to_string())
        })?;

        Ok(Query(value))
    }
}

impl<T> Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Query<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
