use crate::config::ClientConfig;
use crate::endpoints;
use crate::models::{envelope::PageEnvelope, error::Error};
use crate::services::request::{RequestArgs, build_request};
use crate::services::series::{self, ResultSeries, VatMode};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, trace};

// CONSTANTS
const CONSUMPTION_PAGE_SIZE: u32 = 25_000;

/// Generates one accessor method per registered endpoint, each named after
/// its registry entry and forwarding to the generic dispatcher.
macro_rules! endpoint_accessors {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, args: &RequestArgs) -> Result<Value, Error> {
                self.call(stringify!($name), args)
            }
        )+
    };
}

// OCTOPUS CLIENT
/// Blocking HTTP client for the Octopus Energy API.
pub struct OctopusClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl OctopusClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::TransportError(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sets or clears the API key; takes effect on the next request.
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.config.set_api_key(api_key);
    }

    /// Sets or clears the default electricity meter point number.
    pub fn set_meter_mpan(&mut self, meter_mpan: Option<String>) {
        self.config.set_meter_mpan(meter_mpan);
    }

    /// Sets or clears the default gas meter point number.
    pub fn set_meter_mprn(&mut self, meter_mprn: Option<String>) {
        self.config.set_meter_mprn(meter_mprn);
    }

    /// Sets or clears the default meter serial number.
    pub fn set_meter_serial(&mut self, meter_serial: Option<String>) {
        self.config.set_meter_serial(meter_serial);
    }

    /// Dispatches one request to a named endpoint and returns the raw JSON
    /// body of a single page.
    pub fn call(&self, endpoint_name: &str, args: &RequestArgs) -> Result<Value, Error> {
        let spec = endpoints::endpoint(endpoint_name)?;
        let (url, query) = build_request(spec, args, &self.config)?;
        debug!("GET {} ({} query params)", url, query.len());
        self.send(&url, &query)
    }

    /// Dispatches a request and follows `next` links until the last page,
    /// concatenating every page's `results` in arrival order.
    ///
    /// Followed links carry credentials but no query parameters, since the
    /// link embeds its own. A failure on any page aborts the walk and
    /// discards pages already fetched. A server that never terminates its
    /// `next` chain will keep this loop running.
    pub fn call_all_pages(
        &self,
        endpoint_name: &str,
        args: &RequestArgs,
    ) -> Result<Vec<Value>, Error> {
        let envelope = parse_envelope(self.call(endpoint_name, args)?)?;
        let mut results = envelope.results;
        let mut next = envelope.next;
        let mut pages = 1_usize;

        while let Some(url) = next {
            trace!("following page {}: {}", pages + 1, url);
            let envelope = parse_envelope(self.send(&url, &[])?)?;
            results.extend(envelope.results);
            next = envelope.next;
            pages += 1;
        }

        debug!(
            "collected {} records from {} page(s) of {}",
            results.len(),
            pages,
            endpoint_name
        );
        Ok(results)
    }

    /// Executes a single GET and parses the body.
    fn send(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(api_key) = self.config.api_key() {
            request = request.basic_auth(api_key, Some(""));
        }

        let response = request.send().map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().unwrap_or(Value::Null);
            return Err(match body.get("detail").and_then(Value::as_str) {
                Some(detail) => Error::RemoteError(detail.to_string()),
                None => Error::RemoteError(format!("request unsuccessful (status {status})")),
            });
        }

        response
            .json()
            .map_err(|e| Error::TransportError(format!("failed to parse response body: {e}")))
    }
}

/// One accessor per registered endpoint. Each returns a single page; use
/// [`OctopusClient::call_all_pages`] for the full record list of a
/// paginated endpoint.
impl OctopusClient {
    endpoint_accessors! {
        /// Lists the energy products currently or previously offered.
        retrieve_products,
        /// Retrieves the detail of a single product.
        retrieve_product,
        /// Retrieves the charges of a tariff: standing charges or unit rates.
        retrieve_tariff_charges,
        /// Retrieves the grid supply point and profile class of a meter point.
        retrieve_meter_point,
        /// Retrieves half-hourly electricity consumption readings.
        retrieve_electricity_consumption,
        /// Retrieves half-hourly gas consumption readings.
        retrieve_gas_consumption,
        /// Looks up grid supply points, optionally filtered by postcode.
        retrieve_grid_supply_points,
    }
}

// SERIES HELPERS
impl OctopusClient {
    /// Downloads every consumption page for the configured (or explicitly
    /// passed) electricity meter and materializes a time-indexed series.
    pub fn electricity_consumption_series(
        &self,
        args: &RequestArgs,
    ) -> Result<ResultSeries, Error> {
        self.consumption_series("retrieve_electricity_consumption", args)
    }

    /// Downloads every consumption page for the configured (or explicitly
    /// passed) gas meter and materializes a time-indexed series.
    pub fn gas_consumption_series(&self, args: &RequestArgs) -> Result<ResultSeries, Error> {
        self.consumption_series("retrieve_gas_consumption", args)
    }

    fn consumption_series(
        &self,
        endpoint_name: &str,
        args: &RequestArgs,
    ) -> Result<ResultSeries, Error> {
        let mut args = args.clone();
        args.set_if_absent("page_size", CONSUMPTION_PAGE_SIZE);

        let records = self.call_all_pages(endpoint_name, &args)?;
        series::to_series(&records, "interval_start", &["consumption"], true)
    }

    /// Fetches every page of tariff charges and expands them into a
    /// fixed-frequency, forward-filled unit-rate series.
    pub fn unit_rate_series(
        &self,
        args: &RequestArgs,
        vat: VatMode,
        step: Duration,
        extend_weeks: u32,
    ) -> Result<Vec<(DateTime<Utc>, f64)>, Error> {
        let records = self.call_all_pages("retrieve_tariff_charges", args)?;
        series::align_unit_rates(&records, vat, step, extend_weeks)
    }
}

impl Default for OctopusClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default client")
    }
}

fn parse_envelope(body: Value) -> Result<PageEnvelope, Error> {
    serde_json::from_value(body)
        .map_err(|e| Error::TransportError(format!("failed to parse page envelope: {e}")))
}

/// Converts a reqwest error into the transport error taxonomy.
fn classify_transport(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::TransportError(format!("request timeout: {error}"))
    } else if error.is_connect() {
        Error::TransportError(format!("connection failed: {error}"))
    } else {
        Error::TransportError(format!("network error: {error}"))
    }
}
