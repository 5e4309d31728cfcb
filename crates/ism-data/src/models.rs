//! Closed code sets used by the ISM tables.

/// Location category stored in `location_master.loc_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Store,
    Dc,
    Vendor,
}

impl LocationType {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Store => "STORE",
            LocationType::Dc => "DC",
            LocationType::Vendor => "VENDOR",
        }
    }
}

/// Sales channel code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Dotcom,
    Retail,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Dotcom, Channel::Retail];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Dotcom => "D",
            Channel::Retail => "R",
        }
    }
}

/// Kind of hold recorded in `rsvehr.reservation_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationType {
    Hard,
    Soft,
    Pick,
    Merch,
}

impl ReservationType {
    pub const ALL: [ReservationType; 4] = [
        ReservationType::Hard,
        ReservationType::Soft,
        ReservationType::Pick,
        ReservationType::Merch,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationType::Hard => "HR",
            ReservationType::Soft => "SR",
            ReservationType::Pick => "PR",
            ReservationType::Merch => "MR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Active,
    Expired,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Active,
        ReservationStatus::Expired,
        ReservationStatus::Cancelled,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "A",
            ReservationStatus::Expired => "E",
            ReservationStatus::Cancelled => "C",
        }
    }
}

/// Fulfilment program that owns a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationProgram {
    Ecomm,
    Bopis,
    Ship,
    Store,
    Event,
}

impl ReservationProgram {
    pub const ALL: [ReservationProgram; 5] = [
        ReservationProgram::Ecomm,
        ReservationProgram::Bopis,
        ReservationProgram::Ship,
        ReservationProgram::Store,
        ReservationProgram::Event,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationProgram::Ecomm => "ECOMM",
            ReservationProgram::Bopis => "BOPIS",
            ReservationProgram::Ship => "SHIP",
            ReservationProgram::Store => "STORE",
            ReservationProgram::Event => "EVENT",
        }
    }
}
