use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AdminError;
use crate::identity::SharedIdentity;

/// The identity installed by the router's `Extension` layer.
///
/// Routes outside that layer have no identity to hand out and fail with
/// [`AdminError::ContextUnavailable`].
#[derive(Clone)]
pub struct CurrentIdentity(pub SharedIdentity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SharedIdentity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AdminError::ContextUnavailable)
    }
}
