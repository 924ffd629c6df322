//! Conversion: wire samples → domain samples.
//!
//! Timestamps are resolved here because windowing needs them; metric fields
//! stay raw until projection.

use super::wire::{RawSample, RawTimestamp, SeriesResponse};
use super::{Sample, SampleSeries};
use crate::error::MalformedSampleError;
use crate::shared::serde_util::parse_timestamp_str;
use crate::shared::InstrumentId;
use chrono::{DateTime, Utc};

impl TryFrom<RawTimestamp> for DateTime<Utc> {
    type Error = MalformedSampleError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .ok_or_else(|| MalformedSampleError::InvalidTimestamp(ms.to_string())),
            RawTimestamp::Text(s) => {
                parse_timestamp_str(&s).ok_or(MalformedSampleError::InvalidTimestamp(s))
            }
            RawTimestamp::Other(v) => Err(MalformedSampleError::InvalidTimestamp(v.to_string())),
        }
    }
}

impl TryFrom<RawSample> for Sample {
    type Error = MalformedSampleError;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        let timestamp: DateTime<Utc> = raw
            .timestamp
            .ok_or(MalformedSampleError::MissingTimestamp)?
            .try_into()?;

        Ok(Sample {
            timestamp,
            open_interest: raw.open_interest,
            market_price: raw.market_price,
            index_price: raw.index_price,
            funding_rate: raw.funding_rate,
            value: raw.value,
        })
    }
}

impl SampleSeries {
    /// Build a series from a backend response, dropping samples whose
    /// timestamp cannot be resolved. Source order is kept.
    pub fn from_response(instrument: InstrumentId, response: SeriesResponse) -> Self {
        let total = response.data.len();
        let mut samples = Vec::with_capacity(total);

        for (index, raw) in response.data.into_iter().enumerate() {
            match Sample::try_from(raw) {
                Ok(sample) => samples.push(sample),
                Err(err) => tracing::warn!(
                    instrument = %instrument,
                    index,
                    error = %err,
                    "Dropping sample with unusable timestamp"
                ),
            }
        }

        if samples.len() < total {
            tracing::debug!(
                instrument = %instrument,
                kept = samples.len(),
                total,
                "Series ingested with dropped samples"
            );
        }

        SampleSeries::new(instrument, samples)
    }
}
