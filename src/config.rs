// CONSTANTS
const API_ROOT: &str = "https://api.octopus.energy";

/// Configuration for the API client.
///
/// Holds the API root, the optional API key used for Basic authentication,
/// and the optional meter identifiers that fill in path arguments a caller
/// leaves out. Values changed between calls take effect on the next request.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    api_root: Option<String>,
    api_key: Option<String>,
    meter_mpan: Option<String>,
    meter_mprn: Option<String>,
    meter_serial: Option<String>,
}

impl ClientConfig {
    /// Creates a builder for constructing a `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the API root requests are issued against.
    pub fn api_root(&self) -> &str {
        self.api_root.as_deref().unwrap_or(API_ROOT)
    }

    /// Returns the configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sets or clears the API key used for authentication.
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key;
    }

    /// Sets or clears the default electricity meter point number.
    pub fn set_meter_mpan(&mut self, meter_mpan: Option<String>) {
        self.meter_mpan = meter_mpan;
    }

    /// Sets or clears the default gas meter point number.
    pub fn set_meter_mprn(&mut self, meter_mprn: Option<String>) {
        self.meter_mprn = meter_mprn;
    }

    /// Sets or clears the default meter serial number.
    pub fn set_meter_serial(&mut self, meter_serial: Option<String>) {
        self.meter_serial = meter_serial;
    }

    /// Default path arguments, as `(name, value)` pairs for every meter
    /// identifier that has been assigned.
    pub fn default_path_args(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("meter_mpan", self.meter_mpan.as_deref()),
            ("meter_mprn", self.meter_mprn.as_deref()),
            ("meter_serial", self.meter_serial.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

// CONFIGURATION BUILDER
/// Builder for constructing a `ClientConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_root: Option<String>,
    api_key: Option<String>,
    meter_mpan: Option<String>,
    meter_mprn: Option<String>,
    meter_serial: Option<String>,
}

impl ClientConfigBuilder {
    /// Sets a custom API root (primarily for testing).
    pub fn api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    /// Sets the API key used for Basic authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the default electricity meter point administration number.
    pub fn meter_mpan(mut self, meter_mpan: impl Into<String>) -> Self {
        self.meter_mpan = Some(meter_mpan.into());
        self
    }

    /// Sets the default gas meter point reference number.
    pub fn meter_mprn(mut self, meter_mprn: impl Into<String>) -> Self {
        self.meter_mprn = Some(meter_mprn.into());
        self
    }

    /// Sets the default meter serial number.
    pub fn meter_serial(mut self, meter_serial: impl Into<String>) -> Self {
        self.meter_serial = Some(meter_serial.into());
        self
    }

    /// Builds the `ClientConfig`.
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            api_root: self.api_root,
            api_key: self.api_key,
            meter_mpan: self.meter_mpan,
            meter_mprn: self.meter_mprn,
            meter_serial: self.meter_serial,
        }
    }
}
