//! Caller identity extraction
//!
//! The portal fronting this service authenticates administrative users and
//! forwards the resolved identity in the `x-admin-user-id` header. This
//! module only extracts that identity; ownership checks happen per handler.

use axum::{extract::FromRequestParts, http::request::Parts};
use filegen_core::AppError;

use crate::error::HttpAppError;

pub const ADMIN_USER_HEADER: &str = "x-admin-user-id";

/// The authenticated admin user on whose behalf a request runs.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(ADMIN_USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| {
                HttpAppError(AppError::Forbidden(
                    "missing or invalid admin user identity".to_string(),
                ))
            })?;

        Ok(AdminUser { user_id })
    }
}
