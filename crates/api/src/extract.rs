//! Extractors whose rejections render through [`AppError`].
//!
//! Axum's stock extractors reject with plain-text bodies (422 for JSON);
//! these wrappers turn every rejection into a 400 `{message, code}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor. Malformed JSON, wrong types, and a missing
/// `Content-Type` all become `AppError::BadRequest`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query-string extractor. Repeated or mistyped parameters become
/// `AppError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path extractor. A non-numeric id becomes `AppError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
