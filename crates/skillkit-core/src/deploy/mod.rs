//! Deploy coordination: scope decisions.

pub mod scope;

pub use scope::{SCOPE_ENV_VAR, ScopeRequest, resolve_scope, resolve_scope_from};
