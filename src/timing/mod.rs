pub mod clock_time;
pub mod day_code;
pub mod interval;
pub mod schedule;
