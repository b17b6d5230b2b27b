use std::fmt::{Formatter, Write};

use serde::de::DeserializeOwned;

pub mod auth;
pub mod bookings;
pub mod chat;
pub mod fees;
pub mod hostels;
pub mod reports;
pub mod reservations;
pub mod users;
pub mod verifications;

#[async_trait::async_trait]
pub trait Request: Send {
    type Output;

    const METHOD: reqwest::Method = reqwest::Method::GET;
    /// Whether the session's bearer token must be attached.
    const AUTH: bool = true;

    /// Path of the endpoint, relative to the API base url.
    fn path(&self) -> String;

    fn make_req(&self, req: reqwest::RequestBuilder) -> anyhow::Result<reqwest::RequestBuilder> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: reqwest::Response) -> anyhow::Result<Self::Output>;
}

/// An error status or a failed envelope returned by the server.
#[derive(Debug)]
pub struct ResponseError {
    pub status_code: reqwest::StatusCode,
    /// The server-provided message, if any.
    pub message: Option<String>,
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_code.as_str())?;

        if let Some(msg) = self.status_code.canonical_reason() {
            f.write_char(' ')?;
            f.write_str(msg)?;
        }

        if let Some(ref msg) = self.message {
            f.write_str(": ")?;
            f.write_str(msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ResponseError {}

/// An authenticated request was made without a session.
#[derive(Debug, Clone, Copy)]
pub struct NotLoggedIn;

impl std::fmt::Display for NotLoggedIn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("not logged in")
    }
}

impl std::error::Error for NotLoggedIn {}

/// A record id escaped to stay a single path segment.
pub struct Segment<'a>(pub &'a str);

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                f.write_char(byte as char)?;
            } else {
                write!(f, "%{byte:02X}")?;
            }
        }
        Ok(())
    }
}

/// Builds the http request of a [`Request`] without sending it.
pub fn build<T: Request>(req: &T, cx: &crate::Context) -> anyhow::Result<reqwest::RequestBuilder> {
    let mut builder = cx
        .req_client
        .request(T::METHOD, format!("{}{}", cx.url_prefix, req.path()));

    if T::AUTH {
        let token = cx.session.token().ok_or(NotLoggedIn)?;
        builder = builder.bearer_auth(token);
    }

    req.make_req(builder)
}

/// Calls a [`Request`] and return its output.
pub async fn call<T: Request>(
    mut req: T,
    cx: &crate::Context,
) -> anyhow::Result<<T as Request>::Output> {
    let path = req.path();
    tracing::debug!(method = %T::METHOD, %path, "sending request");

    let response = build(&req, cx)?.send().await?;
    let status = response.status();

    if !status.is_success() {
        #[derive(serde::Deserialize)]
        struct ThrownError {
            message: Option<String>,
            error: Option<String>,
        }

        let message = response
            .json::<ThrownError>()
            .await
            .ok()
            .and_then(|msg| msg.message.or(msg.error));

        tracing::warn!(method = %T::METHOD, %path, %status, ?message, "request rejected");

        return Err(anyhow::Error::new(ResponseError {
            status_code: status,
            message,
        }));
    }

    req.parse_res(response).await
}

/// Unwraps the envelope of a response.
async fn envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> anyhow::Result<hostel_shared::Envelope<T>> {
    let status = response.status();
    let envelope: hostel_shared::Envelope<T> = response.json().await?;

    if !envelope.success {
        return Err(anyhow::Error::new(ResponseError {
            status_code: status,
            message: envelope.message,
        }));
    }

    Ok(envelope)
}

/// Parses the `data` field of a response, which must be present.
pub(crate) async fn data<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    envelope(response)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("response data missing"))
}

/// Parses the `data` field of a response, which may be absent.
pub(crate) async fn optional_data<T: DeserializeOwned>(
    response: reqwest::Response,
) -> anyhow::Result<Option<T>> {
    Ok(envelope(response).await?.data)
}

/// Checks a response which carries no data.
pub(crate) async fn ack(response: reqwest::Response) -> anyhow::Result<()> {
    // some endpoints answer with an empty body
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(());
    }

    let envelope: hostel_shared::Envelope<serde_json::Value> = serde_json::from_slice(&bytes)?;
    if envelope.success {
        Ok(())
    } else {
        Err(anyhow::Error::new(ResponseError {
            status_code: reqwest::StatusCode::OK,
            message: envelope.message,
        }))
    }
}

/// A file sent along a multipart submission.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: bytes::Bytes,
    pub mime: String,
}

impl Attachment {
    /// Creates an attachment, sniffing the MIME type from the content.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<bytes::Bytes>) -> Self {
        let bytes = bytes.into();
        let mime = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream")
            .to_owned();

        Self {
            file_name: file_name.into(),
            bytes,
            mime,
        }
    }

    /// Reads an attachment from disk.
    pub async fn open(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());

        Ok(Self::new(file_name, bytes))
    }

    fn to_part(&self) -> anyhow::Result<reqwest::multipart::Part> {
        Ok(reqwest::multipart::Part::stream_with_length(
            reqwest::Body::from(self.bytes.clone()),
            self.bytes.len() as u64,
        )
        .file_name(self.file_name.clone())
        .mime_str(&self.mime)?)
    }
}

/// Builds a multipart form with the JSON-encoded `payload` as the `data` field,
/// followed by every file under its field name.
pub fn multipart_form<P: serde::Serialize>(
    payload: &P,
    files: &[(&'static str, &Attachment)],
) -> anyhow::Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new().text("data", serde_json::to_string(payload)?);

    for (field, file) in files {
        form = form.part(*field, file.to_part()?);
    }

    Ok(form)
}
