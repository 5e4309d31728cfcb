//! Location master generation.

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, Month};

use crate::config::{LocationMix, Vocabulary, validate_range};
use crate::error::{ConfigError, GenerateError};
use crate::models::LocationType;
use crate::sql::{SqlRow, SqlValue, format_date};

/// DC and warehouse codes are `SERVING_DC_BASE + 1..=SERVING_DC_COUNT`.
const SERVING_DC_BASE: u32 = 2000;
const SERVING_DC_COUNT: u32 = 5;

/// Generated location data ready for SQL rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLocation {
    pub loc_number: u32,
    pub loc_name: String,
    pub loc_type: LocationType,
    pub short_desc: String,
    pub territory: String,
    pub region_number: u8,
    pub region_name: String,
    pub district_number: u16,
    pub district_name: String,
    pub open_date: Date,
    pub last_pi_date: Date,
    pub frame_dc_id: String,
    pub whse_id: String,
    pub primary_serv_dc: u32,
    pub alternate_serv_dc: u32,
    pub city: String,
    pub state: String,
    pub zip_code: u32,
    pub telephone: String,
}

impl SqlRow for GeneratedLocation {
    const TABLE: &'static str = "location_master";
    const COLUMN_LINES: &'static [&'static [&'static str]] = &[
        &["loc_number", "loc_name", "loc_type", "short_desc", "loc_territory", "loc_currency"],
        &["loc_country", "channel_name", "region_number", "region_name", "district_number"],
        &["district_name", "last_pi_date", "frame_store_id", "frame_dc_id", "whse_id"],
        &["comingled_dc_flag", "primary_serv_dc", "alternate_serv_dc", "city", "state"],
        &["zipCode", "country", "telephone", "updated_at", "loc_open_date"],
    ];

    fn values(&self) -> Result<Vec<SqlValue>, time::error::Format> {
        Ok(vec![
            SqlValue::int(self.loc_number),
            SqlValue::text(&self.loc_name),
            SqlValue::text(self.loc_type.as_str()),
            SqlValue::text(&self.short_desc),
            SqlValue::text(&self.territory),
            SqlValue::text("USD"),
            SqlValue::text("US"),
            SqlValue::text("RETAIL"),
            // Region, district and serving DC codes are character columns
            SqlValue::text(self.region_number.to_string()),
            SqlValue::text(&self.region_name),
            SqlValue::text(self.district_number.to_string()),
            SqlValue::text(&self.district_name),
            SqlValue::text(format_date(self.last_pi_date)?),
            SqlValue::text(self.frame_store_id()),
            SqlValue::text(&self.frame_dc_id),
            SqlValue::text(&self.whse_id),
            SqlValue::text("N"),
            SqlValue::text(self.primary_serv_dc.to_string()),
            SqlValue::text(self.alternate_serv_dc.to_string()),
            SqlValue::text(&self.city),
            SqlValue::text(&self.state),
            SqlValue::text(self.zip_code.to_string()),
            SqlValue::text("USA"),
            SqlValue::text(&self.telephone),
            SqlValue::Now,
            SqlValue::text(format_date(self.open_date)?),
        ])
    }
}

impl GeneratedLocation {
    pub fn frame_store_id(&self) -> String {
        format!("ST{}", self.loc_number)
    }
}

/// Configuration for location generation.
#[derive(Debug, Clone)]
pub struct LocationGenConfig {
    /// Location numbers start at `base_number + 1`.
    pub base_number: u32,
    pub mix: LocationMix,
    pub vocabulary: Vocabulary,
    /// Inclusive range of years a location may have opened in.
    pub open_years: (i32, i32),
    /// Inclusive range of days between opening and the last physical inventory.
    pub pi_offset_days: (i64, i64),
}

impl Default for LocationGenConfig {
    fn default() -> Self {
        Self {
            base_number: 1000,
            mix: LocationMix::default(),
            vocabulary: Vocabulary::default(),
            open_years: (2015, 2022),
            pi_offset_days: (30, 365),
        }
    }
}

impl LocationGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mix.validate()?;
        self.vocabulary.validate()?;
        validate_range(
            "open_years",
            self.open_years.0 as i64,
            self.open_years.1 as i64,
        )?;
        validate_range("pi_offset_days", self.pi_offset_days.0, self.pi_offset_days.1)?;
        if self.pi_offset_days.0 < 1 {
            return Err(ConfigError::InvalidRange {
                name: "pi_offset_days",
                low: self.pi_offset_days.0,
                high: self.pi_offset_days.1,
            });
        }
        Ok(())
    }
}

/// Generates `location_master` rows with sequential location numbers.
pub struct LocationGenerator {
    config: LocationGenConfig,
}

impl LocationGenerator {
    /// Creates a new location generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: LocationGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: LocationGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocationGenConfig {
        &self.config
    }

    /// Generates `count` locations numbered `base + 1 ..= base + count`.
    pub fn generate_batch(
        &self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedLocation>, GenerateError> {
        self.config.validate()?;

        (1..=count)
            .map(|position| self.generate(position, count, rng))
            .collect()
    }

    /// Generates the location at 1-based `position` out of `count`.
    fn generate(
        &self,
        position: usize,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<GeneratedLocation, GenerateError> {
        let vocab = &self.config.vocabulary;
        let loc_number = self.config.base_number + position as u32;
        let loc_type = self.config.mix.type_for(position, count);

        let city = vocab
            .cities
            .choose(rng)
            .ok_or(ConfigError::EmptyVocabulary("cities"))?
            .clone();

        let (open_date, last_pi_date) = self.generate_dates(rng)?;

        let store_name = pick(&vocab.store_names, "store_names", rng)?;
        let territory = pick(&vocab.territories, "territories", rng)?;
        let region_number = rng.gen_range(1..=5);
        let region_name = pick(&vocab.regions, "regions", rng)?;
        let district_number = rng.gen_range(100..=500);
        let district_name = format!("District {}", rng.gen_range(1..=20));
        let frame_dc_id = format!("DC{}", serving_dc(rng));
        let whse_id = format!("WH{}", serving_dc(rng));
        let primary_serv_dc = serving_dc(rng);
        let alternate_serv_dc = serving_dc(rng);
        let zip_code = rng.gen_range(10000..=99999);
        let telephone = format!(
            "{}-555-{}",
            rng.gen_range(200..=999),
            rng.gen_range(1000..=9999)
        );

        Ok(GeneratedLocation {
            loc_number,
            loc_name: format!("{store_name} {}", city.name),
            loc_type,
            short_desc: format!("{} in {}", loc_type.as_str(), city.name),
            territory,
            region_number,
            region_name,
            district_number,
            district_name,
            open_date,
            last_pi_date,
            frame_dc_id,
            whse_id,
            primary_serv_dc,
            alternate_serv_dc,
            city: city.name,
            state: city.state,
            zip_code,
            telephone,
        })
    }

    /// Picks an opening date, then derives the last physical inventory date from it.
    fn generate_dates(&self, rng: &mut impl Rng) -> Result<(Date, Date), GenerateError> {
        let (first_year, last_year) = self.config.open_years;
        let year = rng.gen_range(first_year..=last_year);
        let month = Month::try_from(rng.gen_range(1..=12u8))?;
        // Day 28 exists in every month
        let day = rng.gen_range(1..=28u8);
        let open_date = Date::from_calendar_date(year, month, day)?;

        let (min_offset, max_offset) = self.config.pi_offset_days;
        let last_pi_date = open_date + Duration::days(rng.gen_range(min_offset..=max_offset));

        Ok((open_date, last_pi_date))
    }
}

impl Default for LocationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(pool: &[String], name: &'static str, rng: &mut impl Rng) -> Result<String, ConfigError> {
    pool.choose(rng)
        .cloned()
        .ok_or(ConfigError::EmptyVocabulary(name))
}

fn serving_dc(rng: &mut impl Rng) -> u32 {
    SERVING_DC_BASE + rng.gen_range(1..=SERVING_DC_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sequential_numbers() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);
        let locations = location_gen.generate_batch(25, &mut rng).unwrap();

        let numbers: Vec<u32> = locations.iter().map(|l| l.loc_number).collect();
        let expected: Vec<u32> = (1001..=1025).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(location_gen.generate_batch(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_positional_types() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let locations = location_gen.generate_batch(50, &mut rng).unwrap();

        assert!(locations[..40].iter().all(|l| l.loc_type == LocationType::Store));
        assert!(locations[40..45].iter().all(|l| l.loc_type == LocationType::Dc));
        assert!(locations[45..].iter().all(|l| l.loc_type == LocationType::Vendor));
    }

    #[test]
    fn test_pi_date_follows_open_date() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(99);

        for location in location_gen.generate_batch(500, &mut rng).unwrap() {
            let gap = (location.last_pi_date - location.open_date).whole_days();
            assert!(gap > 0, "pi date must be after open date");
            assert!((30..=365).contains(&gap), "gap {gap} out of range");
            assert!((2015..=2022).contains(&location.open_date.year()));
            assert!(location.open_date.day() <= 28);
        }
    }

    #[test]
    fn test_derived_text_fields() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);
        let vocab = Vocabulary::default();

        for location in location_gen.generate_batch(60, &mut rng).unwrap() {
            assert!(location.loc_name.ends_with(&location.city));
            assert_eq!(
                location.short_desc,
                format!("{} in {}", location.loc_type.as_str(), location.city)
            );
            assert!(vocab.cities.iter().any(|c| c.name == location.city && c.state == location.state));
            assert!((2001..=2005).contains(&location.primary_serv_dc));
            assert!((2001..=2005).contains(&location.alternate_serv_dc));
            assert!((10000..=99999).contains(&location.zip_code));
            assert_eq!(&location.telephone[3..8], "-555-");
            assert_eq!(location.frame_store_id(), format!("ST{}", location.loc_number));
        }
    }

    #[test]
    fn test_custom_base_number() {
        let location_gen = LocationGenerator::with_config(LocationGenConfig {
            base_number: 5000,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(3);
        let locations = location_gen.generate_batch(3, &mut rng).unwrap();

        assert_eq!(locations[0].loc_number, 5001);
        assert_eq!(locations[2].loc_number, 5003);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let mut config = LocationGenConfig::default();
        config.vocabulary.territories.clear();
        let location_gen = LocationGenerator::with_config(config);
        let mut rng = StdRng::seed_from_u64(3);

        let result = location_gen.generate_batch(1, &mut rng);
        assert!(matches!(
            result,
            Err(GenerateError::InvalidConfiguration(ConfigError::EmptyVocabulary("territories")))
        ));
    }

    #[test]
    fn test_insert_statement() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(11);
        let location = &location_gen.generate_batch(1, &mut rng).unwrap()[0];
        let sql = location.to_insert().unwrap();

        assert!(sql.starts_with("INSERT INTO location_master ("));
        assert!(sql.ends_with(");"));
        assert!(sql.contains("    1001,\n"));
        assert!(sql.contains("'ST1001'"));
        assert!(sql.contains("    NOW(),\n"));
        assert_eq!(location.values().unwrap().len(), GeneratedLocation::column_count());
    }

    #[test]
    fn test_insert_column_header_layout() {
        let location_gen = LocationGenerator::new();
        let mut rng = StdRng::seed_from_u64(12);
        let location = &location_gen.generate_batch(1, &mut rng).unwrap()[0];
        let sql = location.to_insert().unwrap();
        let header: Vec<&str> = sql.lines().take(7).collect();

        assert_eq!(
            header,
            vec![
                "INSERT INTO location_master (",
                "    loc_number, loc_name, loc_type, short_desc, loc_territory, loc_currency,",
                "    loc_country, channel_name, region_number, region_name, district_number,",
                "    district_name, last_pi_date, frame_store_id, frame_dc_id, whse_id,",
                "    comingled_dc_flag, primary_serv_dc, alternate_serv_dc, city, state,",
                "    zipCode, country, telephone, updated_at, loc_open_date",
                ") VALUES (",
            ]
        );
        assert_eq!(GeneratedLocation::column_count(), 26);
    }
}
