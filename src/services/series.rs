use crate::models::charges::TariffCharge;
use crate::models::error::Error;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Index of one series point: a parsed timestamp, or the raw key when
/// timestamp parsing was not requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexValue {
    Timestamp(DateTime<Utc>),
    Raw(String),
}

impl std::fmt::Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            IndexValue::Raw(raw) => write!(f, "{raw}"),
        }
    }
}

/// One materialized record: its index plus the requested value columns,
/// in the order they were asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub index: IndexValue,
    pub values: Vec<Value>,
}

/// An ordered, index-keyed view over a list of records.
///
/// Points keep the input record order; nothing is sorted or deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSeries {
    index_col: String,
    value_cols: Vec<String>,
    points: Vec<SeriesPoint>,
}

impl ResultSeries {
    /// Name of the column the series is indexed by.
    pub fn index_col(&self) -> &str {
        &self.index_col
    }

    /// Names of the value columns, in point order.
    pub fn value_cols(&self) -> &[String] {
        &self.value_cols
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(index, value)` pairs over the first value column, with the value
    /// coerced to `f64` where it is numeric.
    pub fn to_pairs(&self) -> Vec<(&IndexValue, Option<f64>)> {
        self.points
            .iter()
            .map(|p| (&p.index, p.values.first().and_then(Value::as_f64)))
            .collect()
    }
}

/// Materializes flat records into an index-keyed series.
///
/// Every record must carry `index_col` and each name in `value_cols`. With
/// `parse_timestamps`, the index is parsed as an RFC 3339 timestamp and
/// normalized to UTC; otherwise the raw key is kept as-is. Input order is
/// preserved.
pub fn to_series(
    records: &[Value],
    index_col: &str,
    value_cols: &[&str],
    parse_timestamps: bool,
) -> Result<ResultSeries, Error> {
    let mut points = Vec::with_capacity(records.len());

    for record in records {
        let obj = record
            .as_object()
            .ok_or_else(|| Error::MalformedRecord(format!("expected an object, got {record}")))?;

        let raw_index = obj
            .get(index_col)
            .ok_or_else(|| Error::MalformedRecord(format!("field `{index_col}` is absent")))?;

        let index = if parse_timestamps {
            IndexValue::Timestamp(parse_timestamp(index_col, raw_index)?)
        } else {
            IndexValue::Raw(raw_key(raw_index))
        };

        let mut values = Vec::with_capacity(value_cols.len());
        for col in value_cols {
            let value = obj
                .get(*col)
                .ok_or_else(|| Error::MalformedRecord(format!("field `{col}` is absent")))?;
            values.push(value.clone());
        }

        points.push(SeriesPoint { index, values });
    }

    Ok(ResultSeries {
        index_col: index_col.to_string(),
        value_cols: value_cols.iter().map(ToString::to_string).collect(),
        points,
    })
}

fn parse_timestamp(index_col: &str, raw: &Value) -> Result<DateTime<Utc>, Error> {
    let text = raw.as_str().ok_or_else(|| {
        Error::MalformedRecord(format!("field `{index_col}` is not a timestamp string: {raw}"))
    })?;

    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| Error::MalformedRecord(format!("unparsable timestamp `{text}`")))
}

fn raw_key(raw: &Value) -> String {
    match raw.as_str() {
        Some(text) => text.to_string(),
        None => raw.to_string(),
    }
}

// VAT MODE
/// Which side of VAT a tariff value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VatMode {
    Inc,
    Exc,
}

impl VatMode {
    /// Returns the record field this mode selects.
    pub fn column(self) -> &'static str {
        match self {
            VatMode::Inc => "value_inc_vat",
            VatMode::Exc => "value_exc_vat",
        }
    }

    /// Reads the selected value from a charge record.
    pub fn value(self, charge: &TariffCharge) -> f64 {
        match self {
            VatMode::Inc => charge.value_inc_vat,
            VatMode::Exc => charge.value_exc_vat,
        }
    }
}

impl std::str::FromStr for VatMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inc" => Ok(VatMode::Inc),
            "exc" => Ok(VatMode::Exc),
            other => Err(Error::InvalidArgument(format!(
                "unsupported VAT mode `{other}`, expected `inc` or `exc`"
            ))),
        }
    }
}

// UNIT-RATE ALIGNMENT
/// Expands tariff charge records into a fixed-frequency series.
///
/// The grid runs in `step`-sized slots from the earliest `valid_from` to the
/// latest `valid_from` extended by `extend_weeks` weeks. Each slot takes the
/// value of the most recent charge whose validity started at or before it.
/// The API returns charges newest-first; this helper orders its own working
/// copy by `valid_from` before filling.
pub fn align_unit_rates(
    records: &[Value],
    vat: VatMode,
    step: Duration,
    extend_weeks: u32,
) -> Result<Vec<(DateTime<Utc>, f64)>, Error> {
    if step <= Duration::zero() {
        return Err(Error::InvalidArgument(
            "alignment step must be positive".to_string(),
        ));
    }

    let mut charges = Vec::with_capacity(records.len());
    for record in records {
        let charge: TariffCharge = serde_json::from_value(record.clone())
            .map_err(|e| Error::MalformedRecord(format!("tariff charge: {e}")))?;
        charges.push(charge);
    }

    if charges.is_empty() {
        return Ok(Vec::new());
    }

    charges.sort_by_key(|c| c.valid_from);

    let start = charges[0].valid_from;
    let end = charges[charges.len() - 1].valid_from + Duration::weeks(i64::from(extend_weeks));

    let mut aligned = Vec::new();
    let mut slot = start;
    let mut current = 0;
    while slot <= end {
        // Advance to the last charge already valid at this slot.
        while current + 1 < charges.len() && charges[current + 1].valid_from <= slot {
            current += 1;
        }
        aligned.push((slot, vat.value(&charges[current])));
        slot = slot + step;
    }

    Ok(aligned)
}
