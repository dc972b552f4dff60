pub mod cdi;
pub mod common;
pub mod compare;
pub mod scenarios;
pub mod tax;
