//! Response assembly.
//!
//! Every entity has a **short** projection (identity plus the fields needed
//! to render it inside another entity) and a **full** projection. Composite
//! views nest short projections of related entities. None of the views carry
//! the password hash; they are built from explicit field lists, never by
//! serializing row models.
//!
//! All payloads are wrapped in the `{ "data": ... }` envelope via
//! [`DataResponse`].

pub mod participant;
pub mod project;
pub mod task;
pub mod user;

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
