use serde::{Deserialize, Serialize};

use crate::{account::User, Id, Record, Ref};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub participants: Vec<Ref<User>>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Conversation {
    /// The participant that isn't `me`.
    pub fn peer(&self, me: &str) -> Option<&Ref<User>> {
        self.participants.iter().find(|p| p.id() != me)
    }
}

impl Record for Conversation {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub conversation: Id,
    pub sender: Ref<User>,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Record for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

pub mod handle {
    use serde::{Deserialize, Serialize};

    use crate::Id;

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct StartConversationDescriptor {
        pub participant_id: Id,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct SendMessageDescriptor {
        pub text: String,
    }
}
