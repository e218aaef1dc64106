use super::build_response;
use super::query::RangeQuery;
use crate::station::ConcurrentStation;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    station: &Arc<ConcurrentStation>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    weather_data(station.clone())
}

/// GET /weather-data?range=normal|high
///
/// Fetch a simulated reading and switch the relay from its soil status
///
/// Returns a `Reading`, after the configured response delay
fn weather_data(
    station: Arc<ConcurrentStation>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || station.clone())
        .and(warp::get())
        .and(warp::path!("weather-data"))
        // Never rejects: repeated keys keep the first `range`,
        // an undecodable query string counts as no range at all
        .and(
            warp::query::<Vec<(String, String)>>()
                .or(warp::any().map(Vec::<(String, String)>::new))
                .unify()
                .map(RangeQuery::from_pairs),
        )
        .and_then(get_weather_data)
        .boxed()
}

#[utoipa::path(
    get,
    path = "/weather-data",
    tag = "weather",
    params(RangeQuery),
    responses(
        (status = 200, description = "Simulated reading", body = soilsim_core::Reading),
        (status = 400, description = "Unknown range while strict ranges are enabled"),
        (status = 500, description = "Relay could not be switched"),
    )
)]
pub(super) async fn get_weather_data(
    station: Arc<ConcurrentStation>,
    query: RangeQuery,
) -> Result<warp::reply::Response, warp::Rejection> {
    let resp = station.weather_data(query.range()).await;
    build_response(resp)
}
