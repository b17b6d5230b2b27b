pub mod handle;

use serde::{Deserialize, Serialize};

use crate::{account::User, HostelFor, Id, Record, Ref};

/// Price and availability of one kind of room.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomPricing {
    /// e.g. `single`, `double`, `shared`.
    pub room_type: String,
    pub price_per_month: u32,
    #[serde(default)]
    pub available_rooms: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub manager: Ref<User>,
    pub hostel_name: String,
    pub city: String,
    pub address: String,
    pub hostel_type: HostelFor,
    #[serde(default)]
    pub pricing: Vec<RoomPricing>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Image URLs served by the API.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Hostel {
    pub fn pricing_for(&self, room_type: &str) -> Option<&RoomPricing> {
        self.pricing
            .iter()
            .find(|p| p.room_type.eq_ignore_ascii_case(room_type))
    }

    /// The cheapest monthly price across all room types.
    pub fn starting_price(&self) -> Option<u32> {
        self.pricing.iter().map(|p| p.price_per_month).min()
    }

    /// Whether any room type still reports free rooms.
    pub fn has_vacancy(&self) -> bool {
        self.pricing.iter().any(|p| p.available_rooms > 0)
    }
}

impl Record for Hostel {
    fn id(&self) -> &str {
        &self.id
    }
}
