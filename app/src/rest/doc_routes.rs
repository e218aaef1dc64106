use super::{metric_routes, weather_routes};
use soilsim_core::{PinLevel, Reading, SoilStatus, WeatherCondition, WindDirection};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::Config;
use warp::Filter;
use warp::{
    http::Uri,
    hyper::{Response, StatusCode},
    path::{FullPath, Tail},
    Rejection, Reply,
};

#[derive(OpenApi)]
#[openapi(
    paths(weather_routes::get_weather_data, metric_routes::get_health),
    components(schemas(
        Reading,
        WindDirection,
        WeatherCondition,
        SoilStatus,
        PinLevel,
        metric_routes::dto::HealthyDto
    )),
    tags(
        (name = "weather", description = "Simulated weather and soil readings"),
        (name = "health", description = "Service and relay state")
    )
)]
struct ApiDoc;

pub fn swagger() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api = ApiDoc::openapi();
    let config = Arc::new(Config::new(["/api/doc/api.json"]));

    warp::path!("api" / "doc" / "api.json")
        .and(warp::get())
        .map(move || warp::reply::json(&api))
        .or(warp::path("api")
            .and(warp::path("doc"))
            .and(warp::get())
            .and(warp::path::full())
            .and(warp::path::tail())
            .and(warp::any().map(move || config.clone()))
            .and_then(serve_swagger))
}

async fn serve_swagger(
    full_path: FullPath,
    tail: Tail,
    config: Arc<Config<'static>>,
) -> Result<Box<dyn Reply + 'static>, Rejection> {
    if full_path.as_str() == "/api/doc" {
        return Ok(Box::new(warp::redirect::found(Uri::from_static(
            "/api/doc/",
        ))));
    }

    let path = tail.as_str();
    match utoipa_swagger_ui::serve(path, config) {
        Ok(file) => {
            if let Some(file) = file {
                Ok(Box::new(
                    Response::builder()
                        .header("Content-Type", file.content_type)
                        .body(file.bytes),
                ))
            } else {
                Ok(Box::new(StatusCode::NOT_FOUND))
            }
        }
        Err(error) => Ok(Box::new(
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(error.to_string()),
        )),
    }
}
