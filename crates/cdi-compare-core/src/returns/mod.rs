pub mod comparison;
pub mod compound;
