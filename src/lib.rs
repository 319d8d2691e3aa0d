//! Client library for the Octopus Energy REST API.
//!
//! Endpoints are described by a declarative registry embedded in the crate;
//! every registered endpoint gets a strongly-typed accessor on
//! [`OctopusClient`], and a generic [`OctopusClient::call`] entry point
//! accepts any endpoint by name. List responses are paginated transparently
//! and can be materialized into time-indexed series.
//!
//! ```rust,no_run
//! use octo_energy::{ClientConfig, OctopusClient, RequestArgs};
//!
//! let config = ClientConfig::builder()
//!     .api_key("sk_live_your_key")
//!     .meter_mpan("1012839417444")
//!     .meter_serial("20L9375357")
//!     .build();
//! let client = OctopusClient::with_config(config)?;
//!
//! let series = client.electricity_consumption_series(
//!     &RequestArgs::new().set("period_from", "2020-03-01T00:00:00Z"),
//! )?;
//! println!("{} half-hourly readings", series.len());
//! # Ok::<(), octo_energy::Error>(())
//! ```

pub mod config;
pub mod endpoints;
pub mod models;
pub mod services;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use endpoints::{EndpointSpec, endpoint, endpoint_names};
pub use models::charges::TariffCharge;
pub use models::envelope::PageEnvelope;
pub use models::error::Error;
pub use services::api::OctopusClient;
pub use services::request::{RequestArgs, build_request};
pub use services::series::{
    IndexValue, ResultSeries, SeriesPoint, VatMode, align_unit_rates, to_series,
};
