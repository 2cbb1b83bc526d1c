// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Proxy detection.

use std::env;

use serde::{Deserialize, Serialize};
use url::Url;

/// Proxy configuration visible to the process.
///
/// Hosts and ports are kept as raw strings: a value that is present but
/// blank must still shadow the HTTP-scoped fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub https_host: Option<String>,
    pub https_port: Option<String>,
    pub http_host: Option<String>,
    pub http_port: Option<String>,
}

impl ProxySettings {
    /// Reads `HTTPS_PROXY` / `HTTP_PROXY` (either case) from the environment.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from proxy URL variables resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |upper: &str, lower: &str| {
            lookup(upper)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| lookup(lower).filter(|value| !value.trim().is_empty()))
                .and_then(|value| parse_proxy_url(&value))
        };

        let (https_host, https_port) = split(read("HTTPS_PROXY", "https_proxy"));
        let (http_host, http_port) = split(read("HTTP_PROXY", "http_proxy"));

        Self {
            https_host,
            https_port,
            http_host,
            http_port,
        }
    }

    /// Host to use: the HTTPS-scoped value when set, otherwise the HTTP one.
    pub fn effective_host(&self) -> Option<&str> {
        self.https_host.as_deref().or(self.http_host.as_deref())
    }

    pub fn effective_port(&self) -> Option<&str> {
        self.https_port.as_deref().or(self.http_port.as_deref())
    }

    pub fn is_using_proxy(&self) -> bool {
        !is_blank(self.effective_host()) && !is_blank(self.effective_port())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

fn split(parsed: Option<(String, u16)>) -> (Option<String>, Option<String>) {
    match parsed {
        Some((host, port)) => (Some(host), Some(port.to_string())),
        None => (None, None),
    }
}

/// Accepts `scheme://host:port` as well as a bare `host:port`.
fn parse_proxy_url(raw: &str) -> Option<(String, u16)> {
    let raw = raw.trim();
    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{}", raw))
    };

    match parsed {
        Ok(url) => {
            let host = url.host_str()?.to_string();
            let port = url.port_or_known_default()?;
            Some((host, port))
        }
        Err(err) => {
            log::debug!("Ignoring unparsable proxy {:?}: {}", raw, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn settings(https_host: Option<&str>, https_port: Option<&str>) -> ProxySettings {
        ProxySettings {
            https_host: https_host.map(str::to_string),
            https_port: https_port.map(str::to_string),
            ..ProxySettings::default()
        }
    }

    fn from_vars(vars: &[(&str, &str)]) -> ProxySettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProxySettings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_https_host_and_port() {
        assert!(settings(Some("10.0.0.1"), Some("8080")).is_using_proxy());
    }

    #[test]
    fn test_nothing_configured() {
        assert!(!ProxySettings::default().is_using_proxy());
        assert!(!settings(Some(""), Some("  ")).is_using_proxy());
    }

    #[test]
    fn test_host_without_port() {
        assert!(!settings(Some("10.0.0.1"), Some("")).is_using_proxy());
        assert!(!settings(Some("10.0.0.1"), None).is_using_proxy());
    }

    #[test]
    fn test_falls_back_to_http_scope() {
        let proxy = ProxySettings {
            http_host: Some("proxy.corp".to_string()),
            http_port: Some("3128".to_string()),
            ..ProxySettings::default()
        };
        assert_eq!(proxy.effective_host(), Some("proxy.corp"));
        assert!(proxy.is_using_proxy());
    }

    #[test]
    fn test_blank_https_host_shadows_http_host() {
        let proxy = ProxySettings {
            https_host: Some(" ".to_string()),
            http_host: Some("proxy.corp".to_string()),
            http_port: Some("3128".to_string()),
            ..ProxySettings::default()
        };
        assert!(!proxy.is_using_proxy());
    }

    #[test]
    fn test_env_url_with_port() {
        let proxy = from_vars(&[("HTTPS_PROXY", "http://10.0.0.1:8080")]);
        assert_eq!(proxy.https_host.as_deref(), Some("10.0.0.1"));
        assert_eq!(proxy.https_port.as_deref(), Some("8080"));
        assert!(proxy.is_using_proxy());
    }

    #[test]
    fn test_env_lowercase_and_bare_host() {
        let proxy = from_vars(&[("http_proxy", "proxy.corp:3128")]);
        assert_eq!(proxy.effective_host(), Some("proxy.corp"));
        assert_eq!(proxy.effective_port(), Some("3128"));
    }

    #[test]
    fn test_env_default_port_from_scheme() {
        let proxy = from_vars(&[("HTTP_PROXY", "http://proxy.corp")]);
        assert_eq!(proxy.effective_port(), Some("80"));
    }

    #[test]
    fn test_env_empty_or_garbage() {
        assert!(!from_vars(&[("HTTPS_PROXY", ""), ("HTTP_PROXY", "  ")]).is_using_proxy());
        assert!(!from_vars(&[("HTTPS_PROXY", "http://[::1")]).is_using_proxy());
    }

    #[test]
    fn test_process_env_does_not_panic() {
        let first = ProxySettings::from_process_env().is_using_proxy();
        assert_eq!(first, ProxySettings::from_process_env().is_using_proxy());
    }

    proptest! {
        #[test]
        fn blank_host_is_never_a_proxy(host in "[ \t\r\n]*", port in "[0-9]{1,5}") {
            prop_assert!(!settings(Some(host.as_str()), Some(port.as_str())).is_using_proxy());
        }

        #[test]
        fn blank_port_is_never_a_proxy(host in "[a-z0-9.]{1,20}", port in "[ \t]*") {
            prop_assert!(!settings(Some(host.as_str()), Some(port.as_str())).is_using_proxy());
        }
    }
}
