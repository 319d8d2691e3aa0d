use crate::models::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Metadata for one API endpoint: where it lives and which inputs it takes.
///
/// Entries are deserialized once from the table embedded in the crate and
/// are immutable afterwards, so the registry can be shared freely.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSpec {
    /// URL path template with `{name}`-style placeholders.
    #[serde(rename = "endpoint")]
    pub url_template: String,

    /// Names substituted into the template path, in template order.
    #[serde(rename = "arguments", default)]
    pub path_args: Vec<String>,

    /// Names accepted as query-string parameters.
    #[serde(rename = "parameters", default)]
    pub query_params: Vec<String>,

    /// Human-readable summary of what the endpoint returns.
    pub description: String,
}

impl EndpointSpec {
    /// Returns true if `name` is substituted into the URL path.
    pub fn is_path_arg(&self, name: &str) -> bool {
        self.path_args.iter().any(|a| a == name)
    }

    /// Returns true if `name` is sent as a query parameter.
    pub fn is_query_param(&self, name: &str) -> bool {
        self.query_params.iter().any(|p| p == name)
    }

    /// Returns true if the endpoint accepts `name` in either role.
    pub fn accepts(&self, name: &str) -> bool {
        self.is_path_arg(name) || self.is_query_param(name)
    }
}

static REGISTRY: LazyLock<BTreeMap<String, EndpointSpec>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("endpoints.json"))
        .expect("embedded endpoint table must be valid JSON")
});

/// Looks up an endpoint by name.
pub fn endpoint(name: &str) -> Result<&'static EndpointSpec, Error> {
    REGISTRY
        .get(name)
        .ok_or_else(|| Error::UnknownEndpoint(name.to_string()))
}

/// Names of every registered endpoint, in lexical order.
pub fn endpoint_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_endpoint() {
        let spec = endpoint("retrieve_electricity_consumption").unwrap();
        assert!(spec.url_template.contains("{meter_mpan}"));
        assert!(spec.is_path_arg("meter_serial"));
        assert!(spec.is_query_param("period_from"));
        assert!(!spec.accepts("postcode"));
    }

    #[test]
    fn test_lookup_unknown_endpoint() {
        let err = endpoint("retrieve_weather").unwrap_err();
        assert!(matches!(err, Error::UnknownEndpoint(name) if name == "retrieve_weather"));
    }

    #[test]
    fn test_registry_is_not_empty() {
        assert!(endpoint_names().count() >= 7);
    }

    #[test]
    fn test_no_endpoint_overlaps_path_and_query_names() {
        // Path arguments silently win over same-named query parameters,
        // so the table must never declare a name in both roles.
        for name in endpoint_names() {
            let spec = endpoint(name).unwrap();
            for arg in &spec.path_args {
                assert!(
                    !spec.is_query_param(arg),
                    "{name} declares `{arg}` as both path argument and query parameter"
                );
            }
        }
    }

    #[test]
    fn test_every_placeholder_has_a_declared_argument() {
        for name in endpoint_names() {
            let spec = endpoint(name).unwrap();
            for arg in &spec.path_args {
                assert!(
                    spec.url_template.contains(&format!("{{{arg}}}")),
                    "{name} declares `{arg}` but its template has no placeholder for it"
                );
            }
        }
    }
}
