use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// A contiguous hour range within one day sharing a single sampling
/// interval. `end_hour` is exclusive; 24 closes the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_hour: u8,
    pub end_hour: u8,
    pub interval_minutes: u32,
}

impl Window {
    pub fn contains(&self, hour: u8) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

/// One day's sampling schedule. Built once per day and replaced whole at
/// midnight, never mutated after construction.
#[derive(Debug, Clone)]
pub struct CadencePlan {
    pub date: Date,
    pub windows: Vec<Window>,
    pub degraded: bool,
}

impl CadencePlan {
    pub fn window_at(&self, hour: u8) -> Option<&Window> {
        self.windows.iter().find(|window| window.contains(hour))
    }

    /// Earliest tick strictly after `after` on this plan's date, in the
    /// offset of `after`. Ticks land on whole minutes that are multiples of
    /// the owning window's interval within the hour; `None` once the day is
    /// exhausted.
    pub fn next_tick_after(&self, after: OffsetDateTime) -> Option<OffsetDateTime> {
        if after.date() > self.date {
            return None;
        }

        let (mut hour, mut minute) = if after.date() < self.date {
            (0u32, 0u32)
        } else if after.minute() == 59 {
            (u32::from(after.hour()) + 1, 0)
        } else {
            (u32::from(after.hour()), u32::from(after.minute()) + 1)
        };

        while hour < 24 {
            if let Some(window) = self.window_at(hour as u8) {
                let interval = window.interval_minutes.clamp(1, 60);
                let tick_minute = minute.div_ceil(interval) * interval;
                if tick_minute < 60 {
                    let time = Time::from_hms(hour as u8, tick_minute as u8, 0).ok()?;
                    return Some(PrimitiveDateTime::new(self.date, time).assume_offset(after.offset()));
                }
            }

            hour += 1;
            minute = 0;
        }

        None
    }
}

/// Builds the day's schedule from the sunrise/sunset boundary: sparse
/// sampling outside daylight, a denser configurable interval between
/// sunrise and sunset.
pub struct CadencePlanner {
    day_interval_minutes: u32,
    night_interval_minutes: u32,
}

impl CadencePlanner {
    pub fn new(day_interval_minutes: u32, night_interval_minutes: u32) -> Self {
        Self {
            day_interval_minutes,
            night_interval_minutes,
        }
    }

    /// Requires `0 <= sunrise <= sunset <= 23`; implausible hours (the
    /// polar edge cases the oracle cannot disambiguate) degrade to the
    /// uniform fallback plan instead of failing.
    pub fn build(&self, date: Date, sunrise_hour: u8, sunset_hour: u8) -> CadencePlan {
        if sunrise_hour > sunset_hour || sunset_hour > 23 {
            tracing::warn!(
                sunrise_hour,
                sunset_hour,
                "implausible daylight hours, using degraded plan"
            );
            return self.degraded(date);
        }

        CadencePlan {
            date,
            windows: vec![
                Window {
                    start_hour: 0,
                    end_hour: sunrise_hour,
                    interval_minutes: self.night_interval_minutes,
                },
                Window {
                    start_hour: sunrise_hour,
                    end_hour: sunset_hour,
                    interval_minutes: self.day_interval_minutes,
                },
                Window {
                    start_hour: sunset_hour,
                    end_hour: 24,
                    interval_minutes: self.night_interval_minutes,
                },
            ],
            degraded: false,
        }
    }

    /// Full-day plan at the night interval, used when sunrise/sunset cannot
    /// be determined.
    pub fn degraded(&self, date: Date) -> CadencePlan {
        CadencePlan {
            date,
            windows: vec![Window {
                start_hour: 0,
                end_hour: 24,
                interval_minutes: self.night_interval_minutes,
            }],
            degraded: true,
        }
    }
}
