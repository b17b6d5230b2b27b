use serde::{Deserialize, Serialize};

use crate::{account::User, booking::Booking, Id, Record, Ref};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Open,
    Resolved,
}

/// A dispute a student files against a manager over a booking.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub student: Ref<User>,
    pub manager: Ref<User>,
    pub booking: Ref<Booking>,
    pub description: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub final_resolution: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record for Report {
    fn id(&self) -> &str {
        &self.id
    }
}

pub mod handle {
    use serde::{Deserialize, Serialize};

    use crate::Id;

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportDescriptor {
        pub booking_id: Id,
        pub description: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct ResolveDescriptor {
        pub decision: String,
        pub final_resolution: String,
    }
}
