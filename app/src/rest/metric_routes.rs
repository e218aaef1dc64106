use super::build_response;
use crate::station::ConcurrentStation;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    station: &Arc<ConcurrentStation>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(station.clone())
}

fn health(
    station: Arc<ConcurrentStation>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || station.clone())
        .and(warp::get())
        .and(warp::path!("api" / "health"))
        .and_then(get_health)
        .boxed()
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service and relay state", body = dto::HealthyDto))
)]
pub(super) async fn get_health(
    station: Arc<ConcurrentStation>,
) -> Result<warp::reply::Response, warp::Rejection> {
    let relay = station.relay_status();
    let ret = dto::HealthyDto {
        healthy: true,
        version: soilsim_core::CORE_VERSION.to_owned(),
        relay_pin: relay.pin,
        relay_level: relay.level,
        soil_status: relay.soil_status,
        switched_at: relay.switched_at,
        response_delay_ms: station.response_delay().as_millis() as u64,
    };
    build_response(Ok(ret))
}

pub mod dto {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use soilsim_core::{PinLevel, SoilStatus};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub version: String,
        pub relay_pin: u32,
        pub relay_level: Option<PinLevel>,
        pub soil_status: Option<SoilStatus>,
        pub switched_at: Option<DateTime<Utc>>,
        pub response_delay_ms: u64,
    }
}
