//! WSDOT travel times: fetching and decoding route travel-time estimates.
//!
//! Responses are decoded into [`TravelTime`] records. Decoding is strict:
//! the id and the `/Date(...)/` update timestamp are mandatory, and any
//! record that fails to decode rejects the whole response with a
//! [`ValidationError`].

mod client;
mod error;
mod timestamp;
mod types;


pub use client::{RESOURCE_PATH, TravelTimesClient, decode_travel_time, decode_travel_times};
pub use error::{Error, ValidationError};
pub use timestamp::{TimestampError, parse_embedded_timestamp};
pub use types::{TravelLocation, TravelTime, TravelTimeId};
