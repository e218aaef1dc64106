use crate::error::ObserverError;
use crate::station::ConcurrentStation;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Reply};

mod doc_routes;
mod metric_routes;
mod query;
mod weather_routes;

#[cfg(test)]
mod test;

pub fn routes(
    station: &Arc<ConcurrentStation>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "OPTIONS"])
        .allow_headers(vec![
            "accept",
            "accept-language",
            "authorization",
            "cache-control",
            "content-language",
            "content-type",
            "origin",
            "x-requested-with",
        ]);

    weather_routes::routes(station)
        .or(metric_routes::routes(station))
        .or(doc_routes::swagger())
        .with(cors)
        .with(warp::trace::request())
}

/// Serves until `shutdown` resolves
pub async fn dispatch_server_daemon(
    station: Arc<ConcurrentStation>,
    bind_addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), warp::Error> {
    let (addr, server) =
        warp::serve(routes(&station)).try_bind_with_graceful_shutdown(bind_addr, shutdown)?;

    info!(%addr, "Starting webserver");
    server.await;
    info!("Webserver stopped");
    Ok(())
}

fn build_response<T: serde::Serialize>(
    resp: Result<T, ObserverError>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match resp {
        Ok(data) => Ok(warp::reply::json(&data).into_response()),
        Err(ObserverError::User(err)) => {
            warn!("{}", err);
            let body = dto::ErrorResponseDto {
                error: err.to_string(),
            };
            Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
                .into_response())
        }
        Err(ObserverError::Internal(err)) => {
            error!("{}", err);
            Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponseDto {
        pub error: String,
    }
}
