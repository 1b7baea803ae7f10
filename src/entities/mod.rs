pub mod lucky_draws;

pub use lucky_draws as lucky_draw_entity;
