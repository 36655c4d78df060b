pub mod board;
pub mod driver;
pub mod hexdump;
pub mod meter;
pub mod render;
