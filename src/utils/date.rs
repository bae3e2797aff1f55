use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use std::time::Duration;

/// Return curent date and time
pub fn timestamp() -> String {
    Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Time left until the next top of the hour, zero when already on it.
pub fn until_next_hour(now: NaiveDateTime) -> Duration {
    let on_the_hour = now.minute() == 0 && now.second() == 0 && now.nanosecond() == 0;
    if on_the_hour {
        return Duration::ZERO;
    }
    let next = (now + TimeDelta::hours(1))
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0));
    next.and_then(|next| (next - now).to_std().ok())
        .unwrap_or(Duration::ZERO)
}
