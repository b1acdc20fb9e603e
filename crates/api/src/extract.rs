//! Extractor wrappers whose rejections go through [`AppError`].
//!
//! Axum's stock extractors reject malformed input with plain-text bodies
//! (and 422 for JSON data errors). These wrappers turn every rejection into
//! the standard `{ "error", "code" }` body with status 400.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::Json` with [`AppError`] rejections.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with [`AppError`] rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query` with [`AppError`] rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
