pub mod builder;
pub mod day_list;
pub mod error;
pub mod segment;
pub mod time_token;
