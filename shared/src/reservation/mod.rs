use serde::{Deserialize, Serialize};

use crate::{account::User, hostel::Hostel, Id, Record, Ref};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A student's interest in a hostel, before any booking exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub student: Ref<User>,
    pub hostel: Ref<Hostel>,
    #[serde(default)]
    pub message: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record for Reservation {
    fn id(&self) -> &str {
        &self.id
    }
}

pub mod handle {
    use serde::{Deserialize, Serialize};

    use crate::Id;

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct ReservationDescriptor {
        pub hostel_id: Id,
        pub message: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct ReservationDecision {
        pub status: super::ReservationStatus,
    }
}
