pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod timestamps;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use timestamps::{Changes, Clock, SystemClock, Timestamped, TimestampedQuerySet, now_in_utc};
