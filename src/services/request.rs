use crate::config::ClientConfig;
use crate::endpoints::EndpointSpec;
use crate::models::error::Error;
use std::collections::BTreeMap;

/// Arguments supplied by the caller for one endpoint call.
///
/// A flat name → value map; whether a name ends up in the URL path or the
/// query string is decided by the endpoint's spec at build time.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    values: BTreeMap<String, String>,
}

impl RequestArgs {
    /// Creates an empty argument map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, replacing any previous value. Chainable.
    pub fn set(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Sets an argument only if the caller has not already supplied it.
    pub fn set_if_absent(&mut self, name: &str, value: impl ToString) {
        if !self.values.contains_key(name) {
            self.values.insert(name.to_string(), value.to_string());
        }
    }

    /// Returns the value for `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}

/// Splits caller arguments into URL path substitutions and query parameters
/// and produces the absolute request URL.
///
/// Stored meter identifiers from the config fill in path arguments the
/// caller leaves out; explicit arguments always win. A name accepted as
/// both path argument and query parameter is treated as a path argument.
/// Pure function of its inputs.
pub fn build_request(
    spec: &EndpointSpec,
    args: &RequestArgs,
    config: &ClientConfig,
) -> Result<(String, Vec<(String, String)>), Error> {
    // Reject every name the endpoint does not accept, not just the first.
    let unknown: Vec<&str> = args
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !spec.accepts(name))
        .collect();
    if !unknown.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "not accepted by this endpoint: {}",
            unknown.join(", ")
        )));
    }

    // Stored defaults first, explicit arguments override.
    let mut path_values: BTreeMap<&str, &str> = config
        .default_path_args()
        .filter(|(name, _)| spec.is_path_arg(name))
        .collect();
    for (name, value) in args.iter() {
        if spec.is_path_arg(name) {
            path_values.insert(name, value);
        }
    }

    let mut path = spec.url_template.clone();
    let mut missing: Vec<&str> = Vec::new();
    for arg in &spec.path_args {
        match path_values.get(arg.as_str()) {
            Some(value) => path = path.replace(&format!("{{{arg}}}"), value),
            None => missing.push(arg),
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingArgument(missing.join(", ")));
    }

    let query: Vec<(String, String)> = args
        .iter()
        .filter(|(name, _)| !spec.is_path_arg(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok((format!("{}{path}", config.api_root()), query))
}
