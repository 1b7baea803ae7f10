pub mod lucky_draw;
pub mod pagination;

pub use lucky_draw::*;
pub use pagination::*;
