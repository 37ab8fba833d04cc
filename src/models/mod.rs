//! Data models for the TravelWeather application
//!
//! This module contains the core domain models organized by concern:
//! - Month: canonical calendar months used as lookup keys
//! - Climate: per-month temperature, rainfall, crowd and rating labels
//! - Region: a destination with its best months and climate table
//! - Destination: a user's saved trip idea

pub mod climate;
pub mod destination;
pub mod month;
pub mod region;

// Re-export all public types for convenient access
pub use climate::{ClimateRecord, CrowdLevel, Rainfall, Rating};
pub use destination::{DestinationId, DestinationUpdate, NewDestination, SavedDestination, UserId};
pub use month::Month;
pub use region::Region;
