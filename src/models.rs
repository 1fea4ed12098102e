use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved commodity row in the emitted snapshot. `price` is always
/// present here; the resolver substitutes a placeholder before building one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityQuote {
    pub name: String,
    pub price: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAward {
    pub entity: String,
    pub value_usd: i64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictNote {
    pub name: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApparelNote {
    pub brand: String,
    pub note: String,
}

/// The full dashboard document. It is both this run's output and the next
/// run's source of last-known prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub commodities: Vec<CommodityQuote>,
    pub contracts: Vec<ContractAward>,
    pub conflicts: Vec<ConflictNote>,
    pub apparel: Vec<ApparelNote>,
    pub generated_at: i64,
}

/// Raw output of a single source adapter. Any field may be independently
/// absent; an adapter reports total failure as an error, never by panicking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Observation {
    pub price: Option<f64>,
    pub previous_price: Option<f64>,
    /// Ready-made percent figure, only produced by upstreams that compute the
    /// change themselves (the commodities-index aggregator).
    pub pct_change: Option<f64>,
}

impl Observation {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.previous_price.is_none() && self.pct_change.is_none()
    }

    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }

    /// Price plus an upstream-computed percent figure, usable as-is.
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.pct_change.is_some()
    }
}

/// Deserializes an optional f64 that upstreams may send as a number, a
/// numeric string, or null.
pub fn deserialize_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct F64OptVisitor;

    impl<'de> Visitor<'de> for F64OptVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or string")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.trim().parse::<f64>().ok())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.trim().parse::<f64>().ok())
        }
    }

    deserializer.deserialize_any(F64OptVisitor)
}
