//! Server-to-server SALE call against the MSU API.
//!
//! [`forward_sale`] issues exactly one form-encoded POST per call and never
//! retries. The HTTP round trip sits behind [`MsuTransport`] so the handler
//! can be exercised without a network.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::error::SaleError;

/// Whether the gateway should store the card used for this sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SaveCard {
    #[default]
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl SaveCard {
    /// Parse the `saveCard` form field. Absent or empty means `YES`;
    /// otherwise only the exact strings `YES` and `NO` are accepted.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") | Some("YES") => Some(SaveCard::Yes),
            Some("NO") => Some(SaveCard::No),
            Some(_) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SaveCard::Yes => "YES",
            SaveCard::No => "NO",
        }
    }
}

/// Validated input of a SALE.
#[derive(Debug, Clone)]
pub struct SaleRequest {
    pub session_token: String,
    pub auth3d_token: String,
    pub save_card: SaveCard,
}

/// Outbound form body, field names as MSU expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleForm {
    #[serde(rename = "ACTION")]
    pub action: &'static str,
    #[serde(rename = "SESSIONTOKEN")]
    pub session_token: String,
    #[serde(rename = "AUTH3DTOKEN")]
    pub auth3d_token: String,
    #[serde(rename = "SAVECARD")]
    pub save_card: SaveCard,
}

impl From<&SaleRequest> for SaleForm {
    fn from(request: &SaleRequest) -> Self {
        Self {
            action: "SALE",
            session_token: request.session_token.clone(),
            auth3d_token: request.auth3d_token.clone(),
            save_card: request.save_card,
        }
    }
}

/// Raw gateway reply, before JSON parsing.
#[derive(Debug, Clone)]
pub struct MsuReply {
    pub status: u16,
    pub body: Bytes,
}

/// One form-encoded POST to the gateway.
pub trait MsuTransport: Send + Sync + 'static {
    fn post_form(
        &self,
        url: &str,
        form: &SaleForm,
    ) -> impl Future<Output = Result<MsuReply, SaleError>> + Send;
}

/// [`MsuTransport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, SaleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl MsuTransport for HttpTransport {
    async fn post_form(&self, url: &str, form: &SaleForm) -> Result<MsuReply, SaleError> {
        let resp = self.client.post(url).form(form).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok(MsuReply { status, body })
    }
}

/// Send the SALE and return the gateway's JSON untouched.
///
/// The JSON's own success or failure fields are not interpreted here.
pub async fn forward_sale<T: MsuTransport>(
    transport: &T,
    sale_url: &str,
    request: &SaleRequest,
) -> Result<serde_json::Value, SaleError> {
    let form = SaleForm::from(request);
    let reply = transport.post_form(sale_url, &form).await?;

    if !(200..300).contains(&reply.status) {
        return Err(SaleError::UpstreamStatus(reply.status));
    }

    Ok(serde_json::from_slice(&reply.body)?)
}
