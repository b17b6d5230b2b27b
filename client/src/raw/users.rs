use hostel_shared::{
    account::{
        handle::manage::{MakeSubadminDescriptor, TerminateDescriptor},
        Role, User,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

/// Lists accounts, optionally of one role only.
#[derive(Default)]
pub struct List {
    pub role: Option<Role>,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<User>;

    fn path(&self) -> String {
        "/users".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(match self.role {
            Some(role) => req.query(&[("role", role)]),
            None => req,
        })
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct CreateSubadmin(pub MakeSubadminDescriptor);

#[async_trait::async_trait]
impl super::Request for CreateSubadmin {
    type Output = User;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/users/subadmins".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Terminate {
    pub user: Id,
    pub reason: String,
}

#[async_trait::async_trait]
impl super::Request for Terminate {
    type Output = User;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/users/{}/terminate", super::Segment(&self.user))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&TerminateDescriptor {
            reason: self.reason.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Reactivate {
    pub user: Id,
}

#[async_trait::async_trait]
impl super::Request for Reactivate {
    type Output = User;
    const METHOD: Method = Method::PATCH;

    fn path(&self) -> String {
        format!("/users/{}/reactivate", super::Segment(&self.user))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
