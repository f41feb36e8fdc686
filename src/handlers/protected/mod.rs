// handlers/protected/mod.rs - Handlers behind jwt_auth_middleware
//
// Every handler here receives the caller as `Extension<AuthUser>` and
// checks the role itself.

pub mod portal;
pub mod resource;

pub use portal::accounts_get;
