use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDescriptor {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Only `STUDENT` and `MANAGER` may register themselves.
    pub role: super::Role,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDescriptor {
    pub email: String,
    pub password: String,
}

/// Result of a successful login or registration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResult {
    pub user: super::User,
    pub token: String,
}

pub mod manage {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct MakeSubadminDescriptor {
        pub name: String,
        pub email: String,
        pub password: String,
        pub phone: Option<String>,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct TerminateDescriptor {
        pub reason: String,
    }
}
