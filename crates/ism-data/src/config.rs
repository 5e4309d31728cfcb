//! Configuration types for sample data generation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::LocationType;

/// Top-level run configuration: how much data to generate and where to put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of `location_master` rows.
    pub location_count: usize,

    /// Number of distinct SKUs.
    pub product_count: usize,

    /// Upper bound on the fraction of locations that stock any one SKU.
    pub skuloc_density: f64,

    /// Number of `rsvehr` rows.
    pub reservation_count: usize,

    /// Output file for the SQL script.
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            location_count: 100,
            product_count: 5000,
            skuloc_density: 0.5,
            reservation_count: 1000,
            output_path: PathBuf::from("ism_sample_data.sql"),
        }
    }
}

impl GeneratorConfig {
    /// A lighter run: 50 locations, 1000 SKUs, 70% density, 500 reservations.
    pub fn small() -> Self {
        Self {
            location_count: 50,
            product_count: 1000,
            skuloc_density: 0.7,
            reservation_count: 500,
            ..Default::default()
        }
    }

    pub fn with_locations(mut self, count: usize) -> Self {
        self.location_count = count;
        self
    }

    pub fn with_products(mut self, count: usize) -> Self {
        self.product_count = count;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.skuloc_density = density;
        self
    }

    pub fn with_reservations(mut self, count: usize) -> Self {
        self.reservation_count = count;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Checks the configuration before any data is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_density(self.skuloc_density)?;

        if self.reservation_count > 0 {
            if self.location_count == 0 {
                return Err(ConfigError::EmptyPool {
                    reservations: self.reservation_count,
                    pool: "location",
                });
            }
            if self.product_count == 0 {
                return Err(ConfigError::EmptyPool {
                    reservations: self.reservation_count,
                    pool: "product",
                });
            }
        }

        Ok(())
    }
}

/// Density must lie in (0, 1]. NaN is rejected.
pub(crate) fn validate_density(density: f64) -> Result<(), ConfigError> {
    if density > 0.0 && density <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDensity(density))
    }
}

pub(crate) fn validate_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

pub(crate) fn validate_range(name: &'static str, low: i64, high: i64) -> Result<(), ConfigError> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, low, high })
    }
}

/// Positional split of locations into stores, distribution centers and vendors.
///
/// The first `store_percent` of positions are stores, the next `dc_percent`
/// are DCs, everything after that is a vendor. Cutoffs are floored, so with
/// 50 locations and the default 80/10 split positions 1-40 are stores, 41-45
/// DCs and 46-50 vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMix {
    pub store_percent: u32,
    pub dc_percent: u32,
}

impl Default for LocationMix {
    fn default() -> Self {
        Self {
            store_percent: 80,
            dc_percent: 10,
        }
    }
}

impl LocationMix {
    pub const fn new(store_percent: u32, dc_percent: u32) -> Self {
        Self {
            store_percent,
            dc_percent,
        }
    }

    /// Returns the type for the 1-based `position` out of `count` locations.
    pub fn type_for(&self, position: usize, count: usize) -> LocationType {
        let store_cutoff = count * self.store_percent as usize / 100;
        let dc_cutoff = count * (self.store_percent + self.dc_percent) as usize / 100;

        if position <= store_cutoff {
            LocationType::Store
        } else if position <= dc_cutoff {
            LocationType::Dc
        } else {
            LocationType::Vendor
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_percent + self.dc_percent > 100 {
            return Err(ConfigError::InvalidLocationMix {
                store: self.store_percent as f64 / 100.0,
                dc: self.dc_percent as f64 / 100.0,
            });
        }
        Ok(())
    }
}

/// A city and its two-letter state code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub state: String,
}

impl City {
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
        }
    }
}

/// Fixed pools that location attributes are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Store name fragments, combined with the city to form `loc_name`.
    pub store_names: Vec<String>,
    pub cities: Vec<City>,
    pub regions: Vec<String>,
    pub territories: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            store_names: strings(&[
                "Times Square",
                "Michigan Ave",
                "Beverly Hills",
                "Miami Beach",
                "Union Square",
                "Fashion Valley",
                "Galleria",
                "Town Center",
                "Fashion Island",
                "Garden State",
                "King of Prussia",
                "Aventura",
            ]),
            cities: [
                ("New York", "NY"),
                ("Chicago", "IL"),
                ("Los Angeles", "CA"),
                ("Miami", "FL"),
                ("San Francisco", "CA"),
                ("Boston", "MA"),
                ("Seattle", "WA"),
                ("Dallas", "TX"),
                ("Atlanta", "GA"),
                ("Phoenix", "AZ"),
                ("Denver", "CO"),
                ("Portland", "OR"),
            ]
            .into_iter()
            .map(|(name, state)| City::new(name, state))
            .collect(),
            regions: strings(&[
                "Northeast",
                "Midwest",
                "West Coast",
                "Southeast",
                "Southwest",
                "Northwest",
            ]),
            territories: strings(&["EAST", "CENTRAL", "WEST", "SOUTH"]),
        }
    }
}

impl Vocabulary {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_names.is_empty() {
            return Err(ConfigError::EmptyVocabulary("store_names"));
        }
        if self.cities.is_empty() {
            return Err(ConfigError::EmptyVocabulary("cities"));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::EmptyVocabulary("regions"));
        }
        if self.territories.is_empty() {
            return Err(ConfigError::EmptyVocabulary("territories"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.location_count, 100);
        assert_eq!(config.product_count, 5000);
        assert_eq!(config.skuloc_density, 0.5);
        assert_eq!(config.reservation_count, 1000);
        assert_eq!(config.output_path, PathBuf::from("ism_sample_data.sql"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_density_bounds() {
        for bad in [0.0, -0.1, 1.01, f64::NAN] {
            let config = GeneratorConfig::default().with_density(bad);
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidDensity(_))),
                "density {bad} should be rejected"
            );
        }
        assert!(GeneratorConfig::default().with_density(1.0).validate().is_ok());
        assert!(GeneratorConfig::default().with_density(0.05).validate().is_ok());
    }

    #[test]
    fn test_reservations_need_pools() {
        let no_locations = GeneratorConfig::default().with_locations(0);
        assert_eq!(
            no_locations.validate(),
            Err(ConfigError::EmptyPool {
                reservations: 1000,
                pool: "location"
            })
        );

        let no_products = GeneratorConfig::default().with_products(0);
        assert!(matches!(
            no_products.validate(),
            Err(ConfigError::EmptyPool { pool: "product", .. })
        ));

        // Nothing to draw, nothing to reject
        let empty = GeneratorConfig::default()
            .with_locations(0)
            .with_products(0)
            .with_reservations(0);
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_location_mix_positions() {
        let mix = LocationMix::default();
        let types: Vec<_> = (1..=50).map(|i| mix.type_for(i, 50)).collect();

        assert_eq!(types.iter().filter(|t| **t == LocationType::Store).count(), 40);
        assert_eq!(types.iter().filter(|t| **t == LocationType::Dc).count(), 5);
        assert_eq!(types.iter().filter(|t| **t == LocationType::Vendor).count(), 5);
        assert_eq!(types[39], LocationType::Store);
        assert_eq!(types[40], LocationType::Dc);
        assert_eq!(types[45], LocationType::Vendor);
    }

    #[test]
    fn test_location_mix_rejects_overflow() {
        assert!(LocationMix::new(95, 10).validate().is_err());
        assert!(LocationMix::new(100, 0).validate().is_ok());
    }

    #[test]
    fn test_default_vocabulary() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.store_names.len(), 12);
        assert_eq!(vocab.cities.len(), 12);
        assert_eq!(vocab.regions.len(), 6);
        assert_eq!(vocab.territories.len(), 4);
        assert!(vocab.validate().is_ok());

        let empty = Vocabulary {
            cities: Vec::new(),
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyVocabulary("cities")));
    }
}
