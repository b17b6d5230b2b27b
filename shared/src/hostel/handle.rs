use serde::{Deserialize, Serialize};

use crate::HostelFor;

/// Server-side query for the public hostel list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HostelQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_type: Option<HostelFor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Payload of `POST /hostels`, sent as the `data` field next to the images.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HostelDescriptor {
    pub hostel_name: String,
    pub city: String,
    pub address: String,
    pub hostel_type: HostelFor,
    pub pricing: Vec<super::RoomPricing>,
    pub facilities: Vec<String>,
    pub description: Option<String>,
}

/// Fields changed by `PATCH /hostels/:id`; absent fields stay untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditHostelDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Vec<super::RoomPricing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
