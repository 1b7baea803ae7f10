pub mod lucky_draw_service;

pub use lucky_draw_service::*;
