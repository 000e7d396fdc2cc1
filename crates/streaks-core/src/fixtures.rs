//! Builders shared by the engine's unit tests.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::cycle::Cycle;
use crate::event::ActivityEvent;
use crate::types::{ActivityId, DayNumber};

/// Timestamp at `hour` local time (UTC+3) on `day`, shifted so that the
/// accounting day of the result is exactly `day` for every hour 0..24.
pub fn timestamp(day: DayNumber, hour: u32) -> DateTime<FixedOffset> {
    let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(day).unwrap()).unwrap();
    let local = date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap());
    let offset = FixedOffset::east_opt(3 * 3600).unwrap();
    offset.from_local_datetime(&local).single().unwrap() + Duration::hours(6)
}

/// Builds one activity's event history.
pub struct EventBuilder {
    activity_id: ActivityId,
    events: Vec<ActivityEvent>,
}

impl EventBuilder {
    pub fn new(activity_id: &str) -> Self {
        Self {
            activity_id: ActivityId::new(activity_id).unwrap(),
            events: Vec::new(),
        }
    }

    pub fn start(mut self, day: DayNumber, hour: u32, desired: i64, period: i64) -> Self {
        self.events.push(ActivityEvent::started(
            self.activity_id.clone(),
            timestamp(day, hour),
            desired,
            period,
            "",
        ));
        self
    }

    pub fn perform(mut self, day: DayNumber, hour: u32, amount: i64) -> Self {
        self.events.push(ActivityEvent::performed(
            self.activity_id.clone(),
            timestamp(day, hour),
            amount,
        ));
        self
    }

    pub fn stop(mut self, day: DayNumber, hour: u32) -> Self {
        self.events
            .push(ActivityEvent::stopped(self.activity_id.clone(), timestamp(day, hour)));
        self
    }

    pub fn build(self) -> Vec<ActivityEvent> {
        self.events
    }
}

/// Builds an expected cycle sequence for one configuration.
pub struct CycleBuilder {
    cycle_length_days: i64,
    desired_amount: i64,
    order: i64,
    cycles: Vec<Cycle>,
}

impl CycleBuilder {
    pub const fn new(cycle_length_days: i64, desired_amount: i64) -> Self {
        Self {
            cycle_length_days,
            desired_amount,
            order: 1,
            cycles: Vec::new(),
        }
    }

    /// A cycle that begins a new streak on `from_day_number`.
    pub fn start_streak(mut self, from_day_number: DayNumber, accumulated: i64) -> Self {
        self.order = 1;
        self.cycles.push(Cycle {
            from_day_number,
            cycle_length_days: self.cycle_length_days,
            order: self.order,
            desired_amount: self.desired_amount,
            accumulated_amount: accumulated,
        });
        self
    }

    /// A cycle that directly follows the previous one in the same streak.
    pub fn add_cycle(mut self, accumulated: i64) -> Self {
        let from_day_number = self
            .cycles
            .last()
            .expect("add_cycle needs a preceding cycle")
            .next_cycle_first_day_number();
        self.order += 1;
        self.cycles.push(Cycle {
            from_day_number,
            cycle_length_days: self.cycle_length_days,
            order: self.order,
            desired_amount: self.desired_amount,
            accumulated_amount: accumulated,
        });
        self
    }

    pub fn build(self) -> Vec<Cycle> {
        self.cycles
    }
}

/// "Nitrotype": 5 races every day, with a broken streak on day 3.
pub fn daily_races() -> Vec<ActivityEvent> {
    EventBuilder::new("nitrotype")
        .start(1, 0, 5, 1)
        .perform(1, 10, 5)
        .perform(2, 2, 1)
        .perform(2, 3, 2)
        .perform(2, 19, 4)
        .perform(3, 0, 1)
        .perform(3, 23, 2)
        .perform(6, 3, 2)
        .build()
}

/// "English book": 5 pages every 2 days, last cycle still open.
pub fn book_pages() -> Vec<ActivityEvent> {
    EventBuilder::new("english")
        .start(1, 0, 5, 2)
        .perform(1, 10, 10)
        .perform(3, 5, 4)
        .perform(4, 6, 2)
        .perform(6, 0, 5)
        .perform(8, 23, 5)
        .perform(10, 5, 1)
        .build()
}
