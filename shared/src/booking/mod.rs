pub mod handle;

use serde::{Deserialize, Serialize};

use crate::{account::User, hostel::Hostel, Id, Record, Ref};

/// Lifecycle of a booking.
///
/// `Pending` → `Approved` → `Left` | `Terminated`,
/// or `Pending` → `Refunded` when the manager disapproves.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Refunded,
    Left,
    /// The manager kicked the student, see [`Booking::termination_reason`].
    Terminated,
}

impl BookingStatus {
    /// The student currently occupies (or is about to occupy) a room.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub student: Ref<User>,
    pub hostel: Ref<Hostel>,
    pub room_type: String,
    pub amount: u32,
    /// URL of the uploaded transaction proof.
    #[serde(default)]
    pub transaction_image: Option<String>,
    /// URL of the refund evidence uploaded on disapproval.
    #[serde(default)]
    pub refund_image: Option<String>,
    #[serde(default)]
    pub disapproval_reason: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}
