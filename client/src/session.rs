use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use hostel_shared::account::{handle::RegisterDescriptor, Role, User};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::raw;

/// The logged in account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub token: String,
    pub user: Arc<User>,
}

/// Holds the current account, shared by every clone.
///
/// A session may be backed by a file so it survives restarts.
#[derive(Clone, Default)]
pub struct Session {
    account: Arc<RwLock<Option<AccountInfo>>>,
    storage: Option<Arc<PathBuf>>,
}

impl Session {
    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the session persisted at `path`, and keeps persisting to it.
    ///
    /// A missing file gives an empty session.
    /// A corrupt file is removed.
    pub fn restore(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let account = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<AccountInfo>(&bytes) {
                Ok(account) => {
                    tracing::debug!(user = %account.user.email, "session restored");
                    Some(account)
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "discarding corrupt session");
                    let _ = std::fs::remove_file(&path);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            account: Arc::new(RwLock::new(account)),
            storage: Some(Arc::new(path)),
        }
    }

    pub fn storage(&self) -> Option<&Path> {
        self.storage.as_deref().map(PathBuf::as_path)
    }

    pub fn account(&self) -> Option<AccountInfo> {
        self.account.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.account.read().as_ref().map(|a| a.token.clone())
    }

    pub fn current_user(&self) -> Option<Arc<User>> {
        self.account.read().as_ref().map(|a| a.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.read().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.account.read().as_ref().map(|a| a.user.role)
    }

    /// Whether the logged in account has any of `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.role().map_or(false, |role| roles.contains(&role))
    }

    /// Replaces the current account and persists it.
    pub fn set(&self, account: AccountInfo) {
        self.persist(Some(&account));
        *self.account.write() = Some(account);
    }

    /// Forgets the current account, in memory and on disk.
    pub fn clear(&self) {
        *self.account.write() = None;
        self.persist(None);
    }

    fn persist(&self, account: Option<&AccountInfo>) {
        let Some(path) = self.storage.as_deref() else {
            return;
        };

        let result = match account {
            Some(account) => serde_json::to_vec(account)
                .map_err(std::io::Error::from)
                .and_then(|bytes| {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, bytes)
                }),
            None => match std::fs::remove_file(path) {
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };

        if let Err(err) = result {
            tracing::warn!(path = %path.display(), %err, "failed to persist session");
        }
    }
}

impl crate::Context {
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> anyhow::Result<Arc<User>> {
        let res = self
            .call(raw::auth::Login {
                email: email.into(),
                password: password.into(),
            })
            .await?;

        Ok(self.start_session(res))
    }

    pub async fn register(&self, descriptor: RegisterDescriptor) -> anyhow::Result<Arc<User>> {
        let res = self.call(raw::auth::Register(descriptor)).await?;
        Ok(self.start_session(res))
    }

    pub fn logout(&self) {
        if let Some(user) = self.session.current_user() {
            tracing::info!(user = %user.email, "logged out");
        }
        self.session.clear()
    }

    /// Re-fetches the logged in account.
    ///
    /// Returns `None` and logs out if the token was rejected or the
    /// account has been terminated.
    pub async fn refresh_user(&self) -> anyhow::Result<Option<Arc<User>>> {
        let Some(token) = self.session.token() else {
            return Ok(None);
        };

        let user = match self.call(raw::auth::Me).await {
            Ok(user) => user,
            Err(err)
                if matches!(
                    crate::error_status(&err),
                    Some(reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN)
                ) =>
            {
                tracing::info!(%err, "session rejected, logging out");
                self.logout();
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if user.is_terminated {
            tracing::info!(user = %user.email, "account terminated, logging out");
            self.logout();
            return Ok(None);
        }

        let user = Arc::new(user);
        self.session.set(AccountInfo {
            token,
            user: user.clone(),
        });
        Ok(Some(user))
    }

    fn start_session(&self, res: hostel_shared::account::handle::AuthResult) -> Arc<User> {
        let user = Arc::new(res.user);
        tracing::info!(user = %user.email, role = ?user.role, "logged in");
        self.session.set(AccountInfo {
            token: res.token,
            user: user.clone(),
        });
        user
    }
}
