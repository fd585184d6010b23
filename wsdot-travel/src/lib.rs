//! Client for the WSDOT traveler information API.
//!
//! Fetches travel-time estimates for Washington State highway routes and
//! decodes them into typed records.

pub mod transport;
pub mod travel_times;
