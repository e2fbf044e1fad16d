pub mod focus;
pub mod variant;
