//! Travel times resource client.

use serde_json::Value;
use tracing::debug;

use crate::transport::{WsdotClient, WsdotConfig};

use super::error::{Error, ValidationError};
use super::types::{TravelTime, TravelTimeId};

/// Resource path of the travel times service, relative to the API base URL.
pub const RESOURCE_PATH: &str = "TravelTimes/TravelTimesREST.svc/";

const GET_ALL: &str = "GetTravelTimesAsJson";
const GET_ONE: &str = "GetTravelTimeAsJson";

/// Client for `TravelTimesREST.svc`.
///
/// Every call makes exactly one request. Responses are all-or-nothing: a
/// single bad record fails the whole call.
#[derive(Debug, Clone)]
pub struct TravelTimesClient {
    transport: WsdotClient,
}

impl TravelTimesClient {
    pub fn new(config: WsdotConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: WsdotClient::new(config, RESOURCE_PATH)?,
        })
    }

    /// Fetch every travel time route.
    pub async fn get_all_travel_times(&self) -> Result<Vec<TravelTime>, Error> {
        let json = self.transport.get_json(GET_ALL, &[]).await?;
        let times = decode_travel_times(json)?;
        debug!(count = times.len(), "decoded travel times");
        Ok(times)
    }

    /// Fetch a single travel time route by id.
    pub async fn get_travel_time(&self, id: TravelTimeId) -> Result<TravelTime, Error> {
        let id = id.to_string();
        let json = self
            .transport
            .get_json(GET_ONE, &[("TravelTimeID", id.as_str())])
            .await?;
        Ok(decode_travel_time(json)?)
    }
}

/// Decode a list response. Fails on the first element that does not parse.
pub fn decode_travel_times(json: Value) -> Result<Vec<TravelTime>, ValidationError> {
    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::Shape {
                expected: "a JSON array",
                found: json_kind(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| decode_record(Some(i), item))
        .collect()
}

/// Decode a single-object response.
pub fn decode_travel_time(json: Value) -> Result<TravelTime, ValidationError> {
    if !json.is_object() {
        return Err(ValidationError::Shape {
            expected: "a JSON object",
            found: json_kind(&json),
        });
    }
    decode_record(None, json)
}

fn decode_record(index: Option<usize>, json: Value) -> Result<TravelTime, ValidationError> {
    serde_path_to_error::deserialize(json).map_err(|e| ValidationError::record(index, e))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
