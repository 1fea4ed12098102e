use crate::models::CommodityQuote;
use crate::numeric::percent_change;
use crate::sources::{SourceKind, SourceRegistry};
use crate::store::PersistedPriceIndex;
use log::{debug, warn};

/// One tracked commodity: display name, the upstream lookup key, the ordered
/// source chain, and the fixed quote used when every source fails.
#[derive(Debug, Clone, Copy)]
pub struct CommodityConfig {
    pub name: &'static str,
    pub symbol: &'static str,
    pub chain: &'static [SourceKind],
    pub placeholder_price: f64,
    pub placeholder_pct: f64,
}

const OIL_METALS_CHAIN: &[SourceKind] = &[SourceKind::DailyCandle, SourceKind::LiveQuote];
const STEEL_CHAIN: &[SourceKind] = &[SourceKind::CommoditiesIndex];

/// The fixed commodity set, in output order. No entry is ever dropped from a
/// snapshot; a total source outage produces the placeholder quote instead.
pub fn tracked_commodities() -> &'static [CommodityConfig] {
    &[
        CommodityConfig {
            name: "WTI",
            symbol: "CL=F",
            chain: OIL_METALS_CHAIN,
            placeholder_price: 83.12,
            placeholder_pct: 0.0,
        },
        CommodityConfig {
            name: "Brent",
            symbol: "BZ=F",
            chain: OIL_METALS_CHAIN,
            placeholder_price: 86.47,
            placeholder_pct: 0.0,
        },
        CommodityConfig {
            name: "HRC Steel",
            symbol: "hrc steel",
            chain: STEEL_CHAIN,
            placeholder_price: 830.00,
            placeholder_pct: 0.9,
        },
        CommodityConfig {
            name: "Copper",
            symbol: "HG=F",
            chain: OIL_METALS_CHAIN,
            placeholder_price: 4.12,
            placeholder_pct: -1.8,
        },
        CommodityConfig {
            name: "Aluminum",
            symbol: "ALI=F",
            chain: OIL_METALS_CHAIN,
            placeholder_price: 2421.00,
            placeholder_pct: 0.7,
        },
    ]
}

/// Walks a commodity's source chain and always produces a well-formed quote.
///
/// Rules: the first source to produce a price wins it; later sources are
/// consulted only for a still-missing previous price, so the chain order
/// encodes which baseline is preferred. A price with no baseline anywhere
/// falls back to the persisted index, then to a 0.0 percent figure.
pub struct Resolver<'a> {
    registry: &'a SourceRegistry,
    prices: &'a PersistedPriceIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a SourceRegistry, prices: &'a PersistedPriceIndex) -> Self {
        Self { registry, prices }
    }

    pub async fn resolve(&self, commodity: &CommodityConfig) -> CommodityQuote {
        let mut price: Option<f64> = None;
        let mut previous: Option<f64> = None;

        for kind in commodity.chain {
            if price.is_some() && previous.is_some() {
                break;
            }

            let Some(source) = self.registry.get(*kind) else {
                debug!(
                    "{} source not configured; skipping for {}",
                    kind.label(),
                    commodity.name
                );
                continue;
            };

            let observation = match source.observe(commodity.symbol).await {
                Ok(observation) => observation,
                Err(err) => {
                    warn!(
                        "{} source unavailable for {}: {}",
                        source.name(),
                        commodity.name,
                        err
                    );
                    continue;
                }
            };
            if observation.is_empty() {
                warn!(
                    "{} source returned no data for {}",
                    source.name(),
                    commodity.name
                );
                continue;
            }

            if price.is_none() && observation.has_price() {
                if observation.is_complete() {
                    // The upstream already computed the change figure.
                    return CommodityQuote {
                        name: commodity.name.to_string(),
                        price: observation.price.unwrap_or(commodity.placeholder_price),
                        pct: observation.pct_change.unwrap_or(0.0),
                    };
                }
                price = observation.price;
            }
            if previous.is_none() {
                previous = observation.previous_price;
            }
        }

        match price {
            Some(price) => {
                let baseline = previous.or_else(|| self.prices.lookup(commodity.name));
                if baseline.is_none() {
                    debug!("No baseline available for {}; pct defaults to 0.0", commodity.name);
                }
                CommodityQuote {
                    name: commodity.name.to_string(),
                    price,
                    pct: percent_change(price, baseline),
                }
            }
            None => {
                warn!(
                    "No source produced a price for {}; substituting placeholder",
                    commodity.name
                );
                CommodityQuote {
                    name: commodity.name.to_string(),
                    price: commodity.placeholder_price,
                    pct: commodity.placeholder_pct,
                }
            }
        }
    }
}
