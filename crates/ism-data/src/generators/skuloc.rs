//! SKU-at-location inventory generation.
//!
//! Each SKU is stocked at a random subset of locations, so the `skuloc`
//! table is sparse rather than a full SKU x location cross product.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Uniform};

use crate::config::{validate_density, validate_probability};
use crate::error::ConfigError;
use crate::models::Channel;
use crate::sql::{SqlRow, SqlValue};

// Upper bounds for the individual reserve buckets
const PICK_RESERVE_CAP: u32 = 20;
const PACK_RESERVE_CAP: u32 = 10;
const MERCH_RESERVE_CAP: u32 = 15;
const DOTCOM_RESERVE_CAP: u32 = 25;
const RETAIL_RESERVE_CAP: u32 = 30;

/// Generated inventory row ready for SQL rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSkuloc {
    pub sku_id: u64,
    pub location_number: u32,
    pub snb_qty: u32,
    pub ecomm_pick_reserve: u32,
    pub ecomm_pack_reserve: u32,
    pub available_qty: u32,
    pub merch_reserve_qty: u32,
    pub lost_found_qty: u32,
    pub pick_reserve_qty: u32,
    pub is_comingle: bool,
    pub financial_onhand_qty: u32,
    pub oob_qty: u32,
    pub total_in_transit: u32,
    pub dotcom_reserve: u32,
    pub retail_reserve: u32,
    /// Selling channel, when known. Not part of the `skuloc` column list.
    pub channel: Option<Channel>,
}

impl GeneratedSkuloc {
    /// Sum of the reserves drawn from the shared available-quantity budget.
    pub fn committed_reserve(&self) -> u32 {
        self.ecomm_pick_reserve + self.ecomm_pack_reserve + self.merch_reserve_qty
    }

    pub fn has_reserves(&self) -> bool {
        self.committed_reserve() + self.dotcom_reserve + self.retail_reserve > 0
    }
}

impl SqlRow for GeneratedSkuloc {
    const TABLE: &'static str = "skuloc";
    const COLUMN_LINES: &'static [&'static [&'static str]] = &[
        &["sku_id", "location_number", "snb_qty", "ecomm_pick_reserve", "ecomm_pack_reserve"],
        &["available_qty", "merch_reserve_qty", "lost_found_qty", "pick_reserve_qty"],
        &["is_comingle", "financial_onhand_qty", "oob_qty", "total_in_transit"],
        &["dotcom_reserve", "retail_reserve", "updated_ts"],
    ];

    fn values(&self) -> Result<Vec<SqlValue>, time::error::Format> {
        Ok(vec![
            SqlValue::Int(self.sku_id as i64),
            SqlValue::int(self.location_number),
            SqlValue::int(self.snb_qty),
            SqlValue::int(self.ecomm_pick_reserve),
            SqlValue::int(self.ecomm_pack_reserve),
            SqlValue::int(self.available_qty),
            SqlValue::int(self.merch_reserve_qty),
            SqlValue::int(self.lost_found_qty),
            SqlValue::int(self.pick_reserve_qty),
            SqlValue::int(self.is_comingle as u8),
            SqlValue::int(self.financial_onhand_qty),
            SqlValue::int(self.oob_qty),
            SqlValue::int(self.total_in_transit),
            SqlValue::int(self.dotcom_reserve),
            SqlValue::int(self.retail_reserve),
            SqlValue::Now,
        ])
    }
}

/// Configuration for inventory generation.
#[derive(Debug, Clone)]
pub struct SkulocGenConfig {
    /// SKU ids are `sku_base + 0 .. sku_base + product_count`.
    pub sku_base: u64,
    /// Lower bound of the per-SKU location fraction; the upper bound is the density.
    pub min_location_fraction: f64,
    /// Probability that a row carries any reserve quantities.
    pub reserve_probability: f64,
    /// Probability that the channel is known.
    pub channel_fill_rate: f64,
    pub comingle_probability: f64,
    pub max_available_qty: u32,
}

impl Default for SkulocGenConfig {
    fn default() -> Self {
        Self {
            sku_base: 10000,
            min_location_fraction: 0.1,
            reserve_probability: 0.3,
            channel_fill_rate: 0.8,
            comingle_probability: 0.2,
            max_available_qty: 500,
        }
    }
}

impl SkulocGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_probability("min_location_fraction", self.min_location_fraction)?;
        validate_probability("reserve", self.reserve_probability)?;
        validate_probability("channel_fill", self.channel_fill_rate)?;
        validate_probability("comingle", self.comingle_probability)?;
        Ok(())
    }
}

/// Samplers for the quantity columns that do not depend on each other.
#[derive(Debug, Clone)]
struct QuantitySamplers {
    available: Uniform<u32>,
    onhand_surplus: Uniform<u32>,
    snb: Uniform<u32>,
    lost_found: Uniform<u32>,
    pick_reserve: Uniform<u32>,
    oob: Uniform<u32>,
    in_transit: Uniform<u32>,
}

impl QuantitySamplers {
    fn new(max_available_qty: u32) -> Self {
        Self {
            available: Uniform::new_inclusive(0, max_available_qty),
            onhand_surplus: Uniform::new_inclusive(0, 50),
            snb: Uniform::new_inclusive(0, 10),
            lost_found: Uniform::new_inclusive(0, 5),
            pick_reserve: Uniform::new_inclusive(0, 20),
            oob: Uniform::new_inclusive(0, 10),
            in_transit: Uniform::new_inclusive(0, 50),
        }
    }
}

/// Generates `skuloc` rows for a SKU range over a set of locations.
pub struct SkulocGenerator {
    config: SkulocGenConfig,
    samplers: QuantitySamplers,
}

impl SkulocGenerator {
    /// Creates a new inventory generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(SkulocGenConfig::default())
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: SkulocGenConfig) -> Self {
        let samplers = QuantitySamplers::new(config.max_available_qty);
        Self { config, samplers }
    }

    pub fn config(&self) -> &SkulocGenConfig {
        &self.config
    }

    /// Returns the contiguous SKU id range for `product_count` products.
    pub fn sku_ids(&self, product_count: usize) -> Vec<u64> {
        (0..product_count as u64)
            .map(|offset| self.config.sku_base + offset)
            .collect()
    }

    /// Generates inventory rows, SKU by SKU, over the given locations.
    ///
    /// Each SKU is placed at `floor(locations × u)` distinct locations where
    /// `u` is uniform between `min_location_fraction` and `density`, but at
    /// no fewer than one while any location exists.
    ///
    /// The floor of one only matters when `locations × density < 1`. There
    /// a plain `floor` would leave every SKU unstocked, while this yields
    /// one row per SKU, so small location pools produce more rows than the
    /// bare formula.
    pub fn generate_batch(
        &self,
        sku_ids: &[u64],
        location_numbers: &[u32],
        density: f64,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedSkuloc>, ConfigError> {
        validate_density(density)?;
        self.config.validate()?;

        let mut rows = Vec::new();

        for &sku_id in sku_ids {
            let fraction = uniform_between(self.config.min_location_fraction, density, rng);
            let take = ((location_numbers.len() as f64 * fraction) as usize)
                .max(1)
                .min(location_numbers.len());

            let selected: Vec<u32> = location_numbers
                .choose_multiple(rng, take)
                .copied()
                .collect();

            for location_number in selected {
                rows.push(self.generate(sku_id, location_number, rng));
            }
        }

        Ok(rows)
    }

    /// Generates one row. Draw order is fixed so seeded runs are reproducible.
    pub fn generate(
        &self,
        sku_id: u64,
        location_number: u32,
        rng: &mut impl Rng,
    ) -> GeneratedSkuloc {
        let available_qty = self.samplers.available.sample(rng);
        let financial_onhand_qty = available_qty + self.samplers.onhand_surplus.sample(rng);

        let reserves = if rng.r#gen::<f64>() < self.config.reserve_probability {
            Reserves::draw(available_qty, rng)
        } else {
            Reserves::default()
        };

        let channel = if rng.r#gen::<f64>() < self.config.channel_fill_rate {
            Channel::ALL.choose(rng).copied()
        } else {
            None
        };

        let snb_qty = self.samplers.snb.sample(rng);
        let lost_found_qty = self.samplers.lost_found.sample(rng);
        let pick_reserve_qty = self.samplers.pick_reserve.sample(rng);
        let is_comingle = rng.r#gen::<f64>() < self.config.comingle_probability;
        let oob_qty = self.samplers.oob.sample(rng);
        let total_in_transit = self.samplers.in_transit.sample(rng);

        GeneratedSkuloc {
            sku_id,
            location_number,
            snb_qty,
            ecomm_pick_reserve: reserves.pick,
            ecomm_pack_reserve: reserves.pack,
            available_qty,
            merch_reserve_qty: reserves.merch,
            lost_found_qty,
            pick_reserve_qty,
            is_comingle,
            financial_onhand_qty,
            oob_qty,
            total_in_transit,
            dotcom_reserve: reserves.dotcom,
            retail_reserve: reserves.retail,
            channel,
        }
    }
}

impl Default for SkulocGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Reserves {
    pick: u32,
    pack: u32,
    merch: u32,
    dotcom: u32,
    retail: u32,
}

impl Reserves {
    /// Pick, pack and merch share one budget of `available`; dotcom and
    /// retail are each capped against `available` on their own.
    fn draw(available: u32, rng: &mut impl Rng) -> Self {
        let mut budget = available;

        let pick = rng.gen_range(0..=PICK_RESERVE_CAP.min(budget));
        budget -= pick;
        let pack = rng.gen_range(0..=PACK_RESERVE_CAP.min(budget));
        budget -= pack;
        let merch = rng.gen_range(0..=MERCH_RESERVE_CAP.min(budget));

        let dotcom = rng.gen_range(0..=DOTCOM_RESERVE_CAP.min(available));
        let retail = rng.gen_range(0..=RETAIL_RESERVE_CAP.min(available));

        Self {
            pick,
            pack,
            merch,
            dotcom,
            retail,
        }
    }
}

/// `low + (high - low) * U[0, 1)`; works when `high < low` as well.
fn uniform_between(low: f64, high: f64, rng: &mut impl Rng) -> f64 {
    low + (high - low) * rng.r#gen::<f64>()
}
