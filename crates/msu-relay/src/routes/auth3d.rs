use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::RelayError;
use crate::msu::MsuTransport;
use crate::pages::render_auth3d_page;
use crate::redact;
use crate::state::AppState;

#[derive(Debug)]
pub struct Auth3dParams {
    pub token: Option<String>,
    pub data: Option<String>,
}

impl Auth3dParams {
    /// Pick `token` and `data` out of decoded query pairs. A repeated key
    /// keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self {
            token: None,
            data: None,
        };
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "token" => &mut params.token,
                "data" => &mut params.data,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Names of absent or empty parameters, `token` before `data`.
pub fn missing_params(token: Option<&str>, data: Option<&str>) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if token.map_or(true, str::is_empty) {
        missing.push("token");
    }
    if data.map_or(true, str::is_empty) {
        missing.push("data");
    }
    missing
}

/// GET /auth3d - Auto-submitting form into the gateway's 3DS challenge
pub async fn auth3d<T: MsuTransport>(
    req: HttpRequest,
    query: web::Query<Vec<(String, String)>>,
    state: web::Data<AppState<T>>,
) -> Result<HttpResponse, RelayError> {
    let Auth3dParams { token, data } = Auth3dParams::from_pairs(query.into_inner());

    let missing = missing_params(token.as_deref(), data.as_deref());
    let (Some(token), Some(data), true) = (token, data, missing.is_empty()) else {
        let conn = req.connection_info();
        // Path only: the query string carries the token and payload.
        tracing::error!(
            missing = %missing.join(", "),
            ip = conn.realip_remote_addr().unwrap_or("unknown"),
            path = req.path(),
            "auth3d: missing query params"
        );
        return Err(RelayError::MissingQueryParameters(missing));
    };

    tracing::info!(
        token = %redact::prefix(&token),
        data_len = data.len(),
        "auth3d: redirecting to 3DS"
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_auth3d_page(
            &state.config.msu_base_url,
            &token,
            &data,
        )))
}

/// GET / - Convenience redirect to /auth3d
pub async fn root() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/auth3d"))
        .finish()
}

pub fn configure<T: MsuTransport>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/auth3d", web::get().to(auth3d::<T>));
}
