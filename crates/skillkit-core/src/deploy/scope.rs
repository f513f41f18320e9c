//! Scope resolution for install and uninstall runs.

use crate::types::Scope;

/// Environment variable consulted when no scope flag is given.
pub const SCOPE_ENV_VAR: &str = "SKILL_SCOPE";

/// Explicit scope flags collected from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeRequest {
    pub global: bool,
    pub local: bool,
}

impl ScopeRequest {
    pub fn new(global: bool, local: bool) -> Self {
        Self { global, local }
    }

    /// Scan raw arguments for `--global` / `--local`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::default();
        for arg in args {
            match arg.as_ref() {
                "--global" => request.global = true,
                "--local" => request.local = true,
                _ => {}
            }
        }
        request
    }
}

/// Resolve the effective scope.
///
/// `--global` beats `--local`, and either flag beats the environment value.
/// A missing or unrecognized environment value falls back to [`Scope::Global`].
/// Conflicting flags are not an error.
pub fn resolve_scope(request: ScopeRequest, env_value: Option<&str>) -> Scope {
    if request.global {
        return Scope::Global;
    }
    if request.local {
        return Scope::Local;
    }

    match env_value {
        Some(value) => Scope::from_env_value(value).unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized {} value '{}', falling back to GLOBAL",
                SCOPE_ENV_VAR,
                value
            );
            Scope::Global
        }),
        None => Scope::Global,
    }
}

/// Resolve from raw arguments and an environment lookup.
pub fn resolve_scope_from<I, S, F>(args: I, env: F) -> Scope
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let env_value = env(SCOPE_ENV_VAR);
    resolve_scope(ScopeRequest::from_args(args), env_value.as_deref())
}
