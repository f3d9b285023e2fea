//! Token and host resolution for the mona CLI.
//!
//! Decides which authentication token applies to a host, which host a
//! command should target by default, and which hosts the user is known to
//! work with. Resolution consults environment variables and the hosts
//! snapshot in a fixed precedence order and is total: absence of a token is
//! the empty string with source `"default"`, never an error.
//!
//! Every function here is a pure computation over its inputs apart from
//! reading (never writing) process environment variables, so concurrent
//! calls are safe.

use crate::config::Config;

const GITHUB: &str = "github.com";
const LOCALHOST: &str = "github.localhost";
const TENANCY_HOST: &str = "ghe.com";

// Environment variable names double as token source labels.
const GH_TOKEN: &str = "GH_TOKEN";
const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const GH_ENTERPRISE_TOKEN: &str = "GH_ENTERPRISE_TOKEN";
const GITHUB_ENTERPRISE_TOKEN: &str = "GITHUB_ENTERPRISE_TOKEN";
const GH_HOST: &str = "GH_HOST";
const CODESPACES: &str = "CODESPACES";

const HOSTS_SOURCE: &str = "hosts";
const OAUTH_TOKEN_SOURCE: &str = "oauth_token";
const DEFAULT_SOURCE: &str = "default";

struct EnvRule {
    applies: fn(&str) -> bool,
    var: &'static str,
}

/// Environment token precedence, highest first. Predicates take the
/// normalized host; the first rule whose predicate holds and whose variable
/// is set to a non-empty value wins.
const ENV_RULES: &[EnvRule] = &[
    EnvRule { applies: uses_enterprise_tokens, var: GH_ENTERPRISE_TOKEN },
    EnvRule { applies: uses_enterprise_tokens, var: GITHUB_ENTERPRISE_TOKEN },
    EnvRule { applies: codespaces_generic, var: GITHUB_TOKEN },
    EnvRule { applies: uses_generic_tokens, var: GH_TOKEN },
    EnvRule { applies: uses_generic_tokens, var: GITHUB_TOKEN },
];

fn uses_enterprise_tokens(host: &str) -> bool {
    is_enterprise(host)
}

fn uses_generic_tokens(host: &str) -> bool {
    !is_enterprise(host)
}

/// Codespaces pre-populates `GITHUB_TOKEN`; inside such a session it is
/// trusted for any github.com-like host, ahead of `GH_TOKEN`.
fn codespaces_generic(host: &str) -> bool {
    in_codespaces() && !is_enterprise(host)
}

/// Resolve the token to use for `host`, together with a stable label naming
/// where it came from.
///
/// The label is one of the consulted environment variable names,
/// `"oauth_token"` for the hosts snapshot, or `"default"` when nothing
/// applied (in which case the token is empty).
pub fn token_for_host(config: &Config, host: &str) -> (String, &'static str) {
    let host = normalize_hostname(host);
    for rule in ENV_RULES {
        if (rule.applies)(&host) {
            if let Some(token) = env_nonempty(rule.var) {
                return (token, rule.var);
            }
        }
    }
    if let Some(token) = config.token_for(&host) {
        return (token.to_string(), OAUTH_TOKEN_SOURCE);
    }
    (String::new(), DEFAULT_SOURCE)
}

/// The host commands target when none is given explicitly.
///
/// `GH_HOST` wins; otherwise a snapshot with exactly one authenticated host
/// selects that host. Zero or several hosts both fall back to `github.com`;
/// an ambiguous default is not an error.
pub fn default_host(config: &Config) -> (String, &'static str) {
    if let Some(host) = env_nonempty(GH_HOST) {
        return (host, GH_HOST);
    }
    let hosts = config.hosts();
    if let [only] = hosts.as_slice() {
        return ((*only).to_string(), HOSTS_SOURCE);
    }
    (GITHUB.to_string(), DEFAULT_SOURCE)
}

/// Every host the user is known to interact with: the `GH_HOST` override,
/// the snapshot's hosts in order, and `github.com` when a generic
/// environment token is present. De-duplicated, first occurrence wins.
pub fn known_hosts(config: &Config) -> Vec<String> {
    let mut hosts: Vec<String> = Vec::new();
    if let Some(host) = env_nonempty(GH_HOST) {
        hosts.push(host);
    }
    hosts.extend(config.hosts().into_iter().map(str::to_string));
    if env_nonempty(GH_TOKEN).is_some() || env_nonempty(GITHUB_TOKEN).is_some() {
        hosts.push(GITHUB.to_string());
    }

    let mut seen: Vec<String> = Vec::new();
    hosts.retain(|host| {
        if seen.contains(host) {
            false
        } else {
            seen.push(host.clone());
            true
        }
    });
    hosts
}

/// Whether `host` is a self-hosted GitHub Enterprise Server instance, i.e.
/// not github.com, not the localhost development alias, and not a tenancy
/// host.
pub fn is_enterprise(host: &str) -> bool {
    let host = normalize_hostname(host);
    host != GITHUB && host != LOCALHOST && !is_tenancy(&host)
}

/// Whether `host` is a multi-tenant deployment under the `ghe.com` suffix.
pub fn is_tenancy(host: &str) -> bool {
    has_domain_suffix(&normalize_hostname(host), TENANCY_HOST)
}

/// Lowercase `host` and collapse recognized aliases: any subdomain of
/// github.com or github.localhost collapses to the bare domain, and tenancy
/// hosts keep exactly the tenant label before the `ghe.com` suffix
/// (`api.foo.ghe.com` becomes `foo.ghe.com`). Unrecognized hosts are only
/// lowercased. Idempotent.
pub fn normalize_hostname(host: &str) -> String {
    let hostname = host.to_lowercase();
    if has_domain_suffix(&hostname, GITHUB) {
        return GITHUB.to_string();
    }
    if has_domain_suffix(&hostname, LOCALHOST) {
        return LOCALHOST.to_string();
    }
    if has_domain_suffix(&hostname, TENANCY_HOST) {
        let labels = &hostname[..hostname.len() - TENANCY_HOST.len() - 1];
        let tenant = labels.rsplit('.').next().unwrap_or(labels);
        return format!("{tenant}.{TENANCY_HOST}");
    }
    hostname
}

/// True when `host` is `domain` with at least one extra leading label.
fn has_domain_suffix(host: &str, domain: &str) -> bool {
    host.strip_suffix(domain)
        .is_some_and(|rest| rest.ends_with('.'))
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn in_codespaces() -> bool {
    std::env::var(CODESPACES).is_ok_and(|value| parse_bool(&value))
}

/// Boolean env flag values as the Codespaces environment writes them.
fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "true" | "TRUE" | "True")
}
