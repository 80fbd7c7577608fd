//! HTTP Routes

pub mod display;
pub mod exposition;
pub mod reload;
pub mod views;
