//! Hard reservation (`rsvehr`) generation.

use rand::Rng;
use time::{Duration, PrimitiveDateTime};

use crate::config::{validate_probability, validate_range};
use crate::error::ConfigError;
use crate::models::{Channel, ReservationProgram, ReservationStatus, ReservationType};
use crate::sql::{SqlRow, SqlValue, format_timestamp};

/// Generated reservation ready for SQL rendering.
///
/// The SKU and location are drawn independently, so the pair need not
/// exist in `skuloc`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReservation {
    pub division_number: u8,
    pub location_number: u32,
    pub sku_id: u64,
    pub channel: Channel,
    pub ats: bool,
    pub reservation_type: ReservationType,
    pub start_ts: PrimitiveDateTime,
    pub end_ts: PrimitiveDateTime,
    pub quantity: u32,
    pub status: ReservationStatus,
    pub program: ReservationProgram,
    pub user_id: String,
}

impl GeneratedReservation {
    pub fn ats_flag(&self) -> &'static str {
        if self.ats { "Y" } else { "N" }
    }
}

impl SqlRow for GeneratedReservation {
    const TABLE: &'static str = "rsvehr";
    const COLUMN_LINES: &'static [&'static [&'static str]] = &[
        &["division_number", "location_number", "sku_id", "channel", "ats_flag"],
        &["reservation_type", "hard_reservation_start_ts", "hard_reservation_end_ts"],
        &["hard_reservation_qty", "hard_reservation_start_time_upd"],
        &["hard_reservation_end_time_upd", "reservation_status", "reservation_program"],
        &["reservation_user_id", "reservation_last_modified_ts"],
    ];

    fn values(&self) -> Result<Vec<SqlValue>, time::error::Format> {
        let start = format_timestamp(self.start_ts)?;
        let end = format_timestamp(self.end_ts)?;

        Ok(vec![
            SqlValue::int(self.division_number),
            SqlValue::int(self.location_number),
            SqlValue::Int(self.sku_id as i64),
            SqlValue::text(self.channel.as_str()),
            SqlValue::text(self.ats_flag()),
            SqlValue::text(self.reservation_type.as_str()),
            SqlValue::text(&start),
            SqlValue::text(&end),
            SqlValue::int(self.quantity),
            SqlValue::text(start),
            SqlValue::text(end),
            SqlValue::text(self.status.as_str()),
            SqlValue::text(self.program.as_str()),
            SqlValue::text(&self.user_id),
            SqlValue::Now,
        ])
    }
}

/// Configuration for reservation generation.
#[derive(Debug, Clone)]
pub struct ReservationGenConfig {
    /// Reservations start up to this many days before "now".
    pub max_lookback_days: i64,
    /// Inclusive range of reservation lengths in days.
    pub hold_days: (i64, i64),
    /// Probability that the reservation counts against available-to-sell.
    pub ats_probability: f64,
    pub max_quantity: u32,
}

impl Default for ReservationGenConfig {
    fn default() -> Self {
        Self {
            max_lookback_days: 30,
            hold_days: (1, 14),
            ats_probability: 0.7,
            max_quantity: 50,
        }
    }
}

impl ReservationGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_range("max_lookback_days", 0, self.max_lookback_days)?;
        validate_range("hold_days", self.hold_days.0, self.hold_days.1)?;
        // The window must close strictly after it opens
        if self.hold_days.0 < 1 {
            return Err(ConfigError::InvalidRange {
                name: "hold_days",
                low: self.hold_days.0,
                high: self.hold_days.1,
            });
        }
        validate_range("max_quantity", 1, self.max_quantity as i64)?;
        validate_probability("ats", self.ats_probability)?;
        Ok(())
    }
}

/// Generates reservations against previously generated SKUs and locations.
pub struct ReservationGenerator {
    config: ReservationGenConfig,
}

impl ReservationGenerator {
    /// Creates a new reservation generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReservationGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ReservationGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReservationGenConfig {
        &self.config
    }

    /// Generates exactly `count` reservations.
    ///
    /// Fails with [`ConfigError::EmptyPool`] when `count > 0` and either pool
    /// is empty.
    pub fn generate_batch(
        &self,
        count: usize,
        sku_ids: &[u64],
        location_numbers: &[u32],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedReservation>, ConfigError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        self.config.validate()?;

        if sku_ids.is_empty() {
            return Err(ConfigError::EmptyPool {
                reservations: count,
                pool: "product",
            });
        }
        if location_numbers.is_empty() {
            return Err(ConfigError::EmptyPool {
                reservations: count,
                pool: "location",
            });
        }

        let mut reservations = Vec::with_capacity(count);
        for _ in 0..count {
            reservations.push(self.generate(sku_ids, location_numbers, now, rng));
        }
        Ok(reservations)
    }

    /// Draws one reservation. Both pools must be non-empty.
    fn generate(
        &self,
        sku_ids: &[u64],
        location_numbers: &[u32],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedReservation {
        let sku_id = pick(sku_ids, rng);
        let location_number = pick(location_numbers, rng);

        let start_ts = now - Duration::days(rng.gen_range(0..=self.config.max_lookback_days));
        let (min_hold, max_hold) = self.config.hold_days;
        let end_ts = start_ts + Duration::days(rng.gen_range(min_hold..=max_hold));

        let channel = pick(&Channel::ALL, rng);
        let ats = rng.r#gen::<f64>() < self.config.ats_probability;
        let reservation_type = pick(&ReservationType::ALL, rng);
        let status = pick(&ReservationStatus::ALL, rng);
        let program = pick(&ReservationProgram::ALL, rng);
        let quantity = rng.gen_range(1..=self.config.max_quantity);
        let division_number = rng.gen_range(1..=5);
        let user_id = format!("USER{}", rng.gen_range(100..=999));

        GeneratedReservation {
            division_number,
            location_number,
            sku_id,
            channel,
            ats,
            reservation_type,
            start_ts,
            end_ts,
            quantity,
            status,
            program,
            user_id,
        }
    }
}

impl Default for ReservationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick from a non-empty slice.
fn pick<T: Copy>(items: &[T], rng: &mut impl Rng) -> T {
    items[rng.gen_range(0..items.len())]
}
