pub mod build;
pub mod commodities;
