use hostel_client::{raw::users, Context};
use hostel_shared::account::{handle::manage::MakeSubadminDescriptor, Role, User};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// Account management, admins only.
pub struct AdminUsers {
    cx: Context,
    pub role: Option<Role>,
    /// Matched against names and emails.
    pub search: String,
    listing: Listing<User>,
}

impl AdminUsers {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::AdminUsers)?;
        Ok(Self {
            cx,
            role: None,
            search: String::new(),
            listing: Listing::default(),
        })
    }

    pub fn visible(&self) -> Vec<&User> {
        let search = self.search.trim().to_lowercase();
        self.listing
            .items()
            .iter()
            .filter(|u| self.role.map_or(true, |r| u.role == r))
            .filter(|u| {
                search.is_empty()
                    || u.name.to_lowercase().contains(&search)
                    || u.email.to_lowercase().contains(&search)
            })
            .collect()
    }

    pub async fn terminate(&mut self, user: &str, reason: String) -> Result<User, Error> {
        required(&reason, "Give a reason for termination")?;
        if self
            .cx
            .session
            .current_user()
            .map_or(false, |me| me.id == user)
        {
            return Err(Error::InvalidInput("You can't terminate your own account"));
        }

        tracing::info!(user, "terminating account");
        let result = self
            .cx
            .call(users::Terminate {
                user: user.to_owned(),
                reason,
            })
            .await;
        self.settle(result, "Failed to terminate user").await
    }

    pub async fn reactivate(&mut self, user: &str) -> Result<User, Error> {
        tracing::info!(user, "reactivating account");
        let result = self
            .cx
            .call(users::Reactivate {
                user: user.to_owned(),
            })
            .await;
        self.settle(result, "Failed to reactivate user").await
    }

    pub async fn create_subadmin(
        &mut self,
        descriptor: MakeSubadminDescriptor,
    ) -> Result<User, Error> {
        required(&descriptor.name, "Name is required")?;
        required(&descriptor.email, "Email is required")?;
        if descriptor.password.len() < 6 {
            return Err(Error::InvalidInput(
                "Password must be at least 6 characters",
            ));
        }

        tracing::info!(email = %descriptor.email, "creating subadmin");
        let result = self.cx.call(users::CreateSubadmin(descriptor)).await;
        self.settle(result, "Failed to create subadmin").await
    }
}

#[async_trait::async_trait]
impl Page for AdminUsers {
    type Item = User;
    const LOAD_FALLBACK: &'static str = "Failed to load users";

    fn listing(&self) -> &Listing<User> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<User> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<User>> {
        self.cx.call(users::List::default()).await
    }
}
