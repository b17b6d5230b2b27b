use hostel_shared::account::{
    handle::{AuthResult, LoginDescriptor, RegisterDescriptor},
    User,
};
use reqwest::{Method, RequestBuilder, Response};

pub struct Register(pub RegisterDescriptor);

#[async_trait::async_trait]
impl super::Request for Register {
    type Output = AuthResult;
    const METHOD: Method = Method::POST;
    const AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/register".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Login {
    pub email: String,
    pub password: String,
}

#[async_trait::async_trait]
impl super::Request for Login {
    type Output = AuthResult;
    const METHOD: Method = Method::POST;
    const AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&LoginDescriptor {
            email: self.email.clone(),
            password: self.password.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

/// Fetches the account the session token belongs to.
pub struct Me;

#[async_trait::async_trait]
impl super::Request for Me {
    type Output = User;

    fn path(&self) -> String {
        "/auth/me".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
