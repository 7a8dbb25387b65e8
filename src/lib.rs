pub mod icon_gen;
pub mod render;
