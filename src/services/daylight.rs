use chrono::{TimeZone, Utc};
use spa::{SunriseAndSet, calc_sunrise_and_set};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::errors::OracleError;

pub trait DaylightOracle: Send + Sync {
    /// Local sunrise/sunset hour-of-day (0..=23) for a date and location.
    fn sun_times(
        &self,
        date: Date,
        latitude: f64,
        longitude: f64,
    ) -> Result<(u8, u8), OracleError>;
}

/// Solar-position oracle. Event times come back in UTC and are shifted to
/// the configured offset before the hour is taken, matching how wall-clock
/// windows are interpreted.
pub struct SpaOracle {
    offset: UtcOffset,
}

impl SpaOracle {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    fn local_hour(&self, utc: chrono::DateTime<Utc>) -> Result<u8, OracleError> {
        let timestamp = OffsetDateTime::from_unix_timestamp(utc.timestamp())
            .map_err(|e| OracleError::Computation(e.to_string()))?;

        Ok(timestamp.to_offset(self.offset).hour())
    }
}

impl DaylightOracle for SpaOracle {
    fn sun_times(
        &self,
        date: Date,
        latitude: f64,
        longitude: f64,
    ) -> Result<(u8, u8), OracleError> {
        let noon = Utc
            .with_ymd_and_hms(
                date.year(),
                u32::from(u8::from(date.month())),
                u32::from(date.day()),
                12,
                0,
                0,
            )
            .single()
            .ok_or_else(|| OracleError::Computation(String::from("invalid date")))?;

        match calc_sunrise_and_set(noon, latitude, longitude) {
            Ok(SunriseAndSet::Daylight(sunrise, sunset)) => {
                Ok((self.local_hour(sunrise)?, self.local_hour(sunset)?))
            }
            Ok(SunriseAndSet::PolarDay) => Err(OracleError::PolarDay),
            Ok(SunriseAndSet::PolarNight) => Err(OracleError::PolarNight),
            Err(e) => Err(OracleError::Computation(format!("{e:?}"))),
        }
    }
}

/// Fixed-hours oracle for setups without a reliable location and for tests.
pub struct FixedDaylight {
    sunrise_hour: u8,
    sunset_hour: u8,
}

impl FixedDaylight {
    pub fn new(sunrise_hour: u8, sunset_hour: u8) -> Self {
        Self {
            sunrise_hour,
            sunset_hour,
        }
    }
}

impl DaylightOracle for FixedDaylight {
    fn sun_times(
        &self,
        _date: Date,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<(u8, u8), OracleError> {
        Ok((self.sunrise_hour, self.sunset_hour))
    }
}
