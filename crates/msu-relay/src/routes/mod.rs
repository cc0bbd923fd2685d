pub mod auth3d;
pub mod health;
pub mod sale;

use actix_web::web;

use crate::msu::MsuTransport;

/// Register every relay route. Expects `web::Data<AppState<T>>` in app data.
pub fn configure<T: MsuTransport>(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(auth3d::configure::<T>)
        .configure(sale::configure::<T>);
}
