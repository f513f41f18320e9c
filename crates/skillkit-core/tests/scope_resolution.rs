use std::collections::HashMap;

use skillkit_core::deploy::scope::{SCOPE_ENV_VAR, ScopeRequest, resolve_scope, resolve_scope_from};
use skillkit_core::types::Scope;

fn env_with(value: &str) -> impl Fn(&str) -> Option<String> {
    let mut vars = HashMap::new();
    vars.insert(SCOPE_ENV_VAR.to_string(), value.to_string());
    move |key| vars.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn global_and_local_flags_together_resolve_global() {
    let scope = resolve_scope_from(["--global", "--local"], no_env);
    assert_eq!(scope, Scope::Global);

    let scope = resolve_scope_from(["--local", "--global"], env_with("LOCAL"));
    assert_eq!(scope, Scope::Global);
}

#[test]
fn env_local_without_flags_resolves_local() {
    let scope = resolve_scope_from(Vec::<String>::new(), env_with("local"));
    assert_eq!(scope, Scope::Local);
}

#[test]
fn unrecognized_env_value_resolves_global() {
    let scope = resolve_scope_from(Vec::<String>::new(), env_with("banana"));
    assert_eq!(scope, Scope::Global);
}

#[test]
fn missing_env_resolves_global() {
    assert_eq!(resolve_scope_from(["--dry-run"], no_env), Scope::Global);
}

#[test]
fn local_flag_overrides_env_global() {
    let scope = resolve_scope(ScopeRequest::new(false, true), Some("GLOBAL"));
    assert_eq!(scope, Scope::Local);
}
