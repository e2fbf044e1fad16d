pub mod frames;
pub mod spritesheet;
pub mod state;
