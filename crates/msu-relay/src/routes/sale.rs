use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::RelayError;
use crate::msu::{forward_sale, MsuTransport, SaleRequest, SaveCard};
use crate::redact;
use crate::state::AppState;

/// Form bodies are three short tokens.
const FORM_BODY_LIMIT: usize = 16 * 1024;

/// Form body of `POST /sale`, as sent by the checkout page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleParams {
    pub session_token: Option<String>,
    #[serde(rename = "auth3DToken")]
    pub auth3d_token: Option<String>,
    pub save_card: Option<String>,
}

impl SaleParams {
    /// Validate into a [`SaleRequest`]. Empty strings count as missing.
    pub fn into_request(self) -> Result<SaleRequest, RelayError> {
        let session_token = self.session_token.filter(|s| !s.is_empty());
        let auth3d_token = self.auth3d_token.filter(|s| !s.is_empty());

        let (session_token, auth3d_token) = match (session_token, auth3d_token) {
            (Some(session_token), Some(auth3d_token)) => (session_token, auth3d_token),
            (session_token, auth3d_token) => {
                tracing::error!(
                    session_token = session_token.is_some(),
                    auth3d_token = auth3d_token.is_some(),
                    "sale: missing params"
                );
                return Err(RelayError::MissingSaleParameters);
            }
        };

        let save_card = SaveCard::parse(self.save_card.as_deref()).ok_or_else(|| {
            tracing::error!(token = %redact::prefix(&session_token), "sale: invalid saveCard");
            RelayError::InvalidSaveCard
        })?;

        Ok(SaleRequest {
            session_token,
            auth3d_token,
            save_card,
        })
    }
}

/// POST /sale - Finalize the sale after the 3DS challenge
pub async fn sale<T: MsuTransport>(
    form: web::Form<SaleParams>,
    state: web::Data<AppState<T>>,
) -> Result<HttpResponse, RelayError> {
    let request = form.into_inner().into_request()?;
    let token = redact::prefix(&request.session_token);

    tracing::info!(token = %token, save_card = request.save_card.as_str(), "sale: processing");

    match forward_sale(&state.transport, state.config.sale_url(), &request).await {
        Ok(msu_response) => {
            tracing::info!(token = %token, "sale: success");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "msuResponse": msu_response,
            })))
        }
        Err(e) => {
            tracing::error!(token = %token, error = %e, "sale: MSU call failed");
            Err(RelayError::SaleFailed(e))
        }
    }
}

pub fn configure<T: MsuTransport>(cfg: &mut web::ServiceConfig) {
    let form_config = web::FormConfig::default()
        .limit(FORM_BODY_LIMIT)
        .error_handler(|err, _req| {
            tracing::error!(error = %err, "sale: unreadable form body");
            RelayError::MissingSaleParameters.into()
        });

    cfg.app_data(form_config)
        .route("/sale", web::post().to(sale::<T>));
}
