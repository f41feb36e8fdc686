use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims, Role};
use crate::error::ApiError;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// employee_id or customer_id, depending on `role`
    pub id: String,
    pub role: Role,
}

impl AuthUser {
    /// 403 unless the caller holds `required`; `None` admits everyone
    pub fn require(&self, required: Option<Role>) -> Result<(), ApiError> {
        match required {
            Some(role) if role != self.role => Err(ApiError::forbidden()),
            _ => Ok(()),
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid token.")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get("authorization")
        .ok_or("Access denied. No token provided.")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Access denied. No token provided."),
        None => Err("Authorization header must use Bearer token format"),
    }
}
