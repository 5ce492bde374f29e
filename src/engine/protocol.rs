//! Request/response messages exchanged with the host
//!
//! Requests carry a `type` tag and a `payload`; responses carry a `type` tag
//! alongside their fields:
//!
//! ```json
//! {"type":"INIT","payload":{"worldUrl":"world.geojson","distancesUrl":"distances.json"}}
//! {"type":"FILTER","payload":{"clues":[{"country":"FRA","distance":0}],"includeTerritories":false}}
//! {"type":"READY","countries":[...]}
//! {"type":"RESULT","candidates":[...]}
//! {"type":"ERROR","error":"Data not loaded"}
//! ```

use crate::algorithm::filter::Clue;
use crate::io::geojson::{RegionFeature, feature_identity};
use crate::spatial::region::{Region, RegionId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message sent to the engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Load the region universe and, best effort, the distance matrix
    #[serde(rename_all = "camelCase")]
    Init {
        /// Location of the GeoJSON feature collection
        world_url: String,
        /// Location of the precomputed matrix artifact
        #[serde(default)]
        distances_url: Option<String>,
    },
    /// Narrow the universe to the regions consistent with the clues
    #[serde(rename_all = "camelCase")]
    Filter {
        /// Active clues
        clues: Vec<ClueInput>,
        /// Measure against full geometry instead of mainlands
        #[serde(default)]
        include_territories: bool,
    },
}

/// Reference to a region inside a clue: a bare id or the region's feature
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountryRef {
    /// Region identifier
    Id(RegionId),
    /// Feature object as previously sent by the engine
    Feature {
        /// Feature id
        #[serde(default)]
        id: Option<Value>,
        /// Feature attributes
        #[serde(default)]
        properties: Option<Map<String, Value>>,
    },
}

impl CountryRef {
    /// Identifier this reference resolves to
    pub fn region_id(&self) -> Option<RegionId> {
        match self {
            Self::Id(id) => Some(id.clone()),
            Self::Feature { id, properties } => {
                let empty = Map::new();
                feature_identity(id.as_ref(), properties.as_ref().unwrap_or(&empty))
                    .map(|(id, _)| id)
            }
        }
    }
}

/// One clue as sent over the wire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueInput {
    /// Reference region
    pub country: CountryRef,
    /// Declared distance in kilometers
    pub distance: f64,
}

impl ClueInput {
    /// Convert to an engine clue
    ///
    /// A feature reference without any usable identity maps to an empty id,
    /// which the filter then reports as an unknown region.
    pub fn to_clue(&self) -> Clue {
        Clue::new(
            self.country.region_id().unwrap_or_else(|| RegionId::new("")),
            self.distance,
        )
    }
}

/// Message sent back to the host
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    /// INIT succeeded; carries the loaded universe
    Ready {
        /// Every loaded region
        countries: Vec<RegionFeature>,
    },
    /// FILTER succeeded
    #[serde(rename = "RESULT")]
    Candidates {
        /// Regions consistent with every clue
        candidates: Vec<RegionFeature>,
    },
    /// The request failed; the engine stays usable
    Error {
        /// Human-readable reason
        error: String,
    },
}

impl Response {
    /// Build a READY response
    pub fn ready<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Self {
        Self::Ready {
            countries: regions.into_iter().map(RegionFeature::from_region).collect(),
        }
    }

    /// Build a RESULT response
    pub fn candidates<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Self {
        Self::Candidates {
            candidates: regions.into_iter().map(RegionFeature::from_region).collect(),
        }
    }

    /// Build an ERROR response
    pub fn error(error: &impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}
