use hostel_shared::{
    report::{
        handle::{ReportDescriptor, ResolveDescriptor},
        Report, ReportStatus,
    },
    Id,
};
use reqwest::{Method, RequestBuilder, Response};

pub struct File(pub ReportDescriptor);

#[async_trait::async_trait]
impl super::Request for File {
    type Output = Report;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/reports".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Mine;

#[async_trait::async_trait]
impl super::Request for Mine {
    type Output = Vec<Report>;

    fn path(&self) -> String {
        "/reports/mine".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

#[derive(Default)]
pub struct List {
    pub status: Option<ReportStatus>,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<Report>;

    fn path(&self) -> String {
        "/reports".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(match self.status {
            Some(status) => req.query(&[("status", status)]),
            None => req,
        })
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}

pub struct Resolve {
    pub report: Id,
    pub descriptor: ResolveDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Resolve {
    type Output = Report;
    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        format!("/reports/{}/resolve", super::Segment(&self.report))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        super::data(response).await
    }
}
