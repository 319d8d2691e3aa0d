use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One tariff charge record as returned by the charges endpoints.
///
/// `valid_to` is `None` for the currently open charge period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TariffCharge {
    pub value_exc_vat: f64,
    pub value_inc_vat: f64,
    pub valid_from: DateTime<Utc>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
}
