use super::*;
use crate::config::Config;
use soilsim_core::{MemoryOutput, PinLevel, Reading, SoilStatus};
use std::collections::HashMap;

fn build_mocked_station(pairs: &[(&str, &str)]) -> (Arc<ConcurrentStation>, MemoryOutput) {
    crate::logging::init("debug");
    let mut vars: HashMap<String, String> = [("RESPONSE_DELAY_MS", "0"), ("RNG_SEED", "7")]
        .iter()
        .chain(pairs.iter())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.entry("RELAY_PIN".to_owned())
        .or_insert_with(|| "36".to_owned());
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let output = MemoryOutput::new(config.relay_pin());
    let station = ConcurrentStation::new(&config, Box::new(output.clone()));
    (station, output)
}

#[tokio::test]
async fn test_rest_weather_data() {
    // Prepare
    let (station, output) = build_mocked_station(&[]);
    let routes = routes(&station);

    // Execute
    let res = warp::test::request()
        .path("/weather-data")
        .reply(&routes)
        .await;

    // Validate
    assert_eq!(res.status(), 200);
    let reading: Reading = serde_json::from_slice(res.body()).unwrap();
    assert!((60..85).contains(&reading.temperature()));
    assert!((30..60).contains(&reading.humidity()));
    assert_eq!(Some(PinLevel::from(reading.soil_status())), output.level());
}

#[tokio::test]
async fn test_rest_weather_data_high() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    for _ in 0..20 {
        let res = warp::test::request()
            .path("/weather-data?range=high")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        let reading: Reading = serde_json::from_slice(res.body()).unwrap();
        assert!((85..110).contains(&reading.temperature()));
        assert!((60..100).contains(&reading.humidity()));
    }
}

#[tokio::test]
async fn test_rest_unknown_range_is_normal() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather-data?range=extreme")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 200);
    let reading: Reading = serde_json::from_slice(res.body()).unwrap();
    assert!((60..85).contains(&reading.temperature()));
}

#[tokio::test]
async fn test_rest_body_layout() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather-data")
        .reply(&routes)
        .await;

    let json: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    let fields = json.as_object().unwrap();
    for key in [
        "temperature",
        "humidity",
        "wind_speed",
        "wind_direction",
        "wind_degree",
        "weather_description",
        "soil_moisture",
        "soil_status",
    ] {
        assert!(fields.contains_key(key), "missing {}", key);
    }
    assert_eq!(8, fields.len());
}

#[tokio::test]
async fn test_rest_strict_range() {
    // Prepare
    let (station, output) = build_mocked_station(&[("STRICT_RANGE", "true")]);
    let routes = routes(&station);

    // Execute
    let res = warp::test::request()
        .path("/weather-data?range=extreme")
        .reply(&routes)
        .await;

    // Validate
    assert_eq!(res.status(), 400);
    let body: dto::ErrorResponseDto = serde_json::from_slice(res.body()).unwrap();
    assert!(body.error.contains("extreme"));
    assert_eq!(0, output.writes());
}

#[tokio::test]
async fn test_rest_relay_failure() {
    let (station, output) = build_mocked_station(&[]);
    output.fail_writes(true);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather-data")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn test_rest_cors_any_origin() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather-data")
        .header("origin", "http://localhost:3000")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_rest_cors_preflight_with_headers() {
    // Prepare
    let (station, output) = build_mocked_station(&[]);
    let routes = routes(&station);

    // Execute
    let res = warp::test::request()
        .method("OPTIONS")
        .path("/weather-data")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "content-type, accept")
        .reply(&routes)
        .await;

    // Validate
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let allowed = res.headers()["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("content-type"));
    assert_eq!(0, output.writes());
}

#[tokio::test]
async fn test_rest_repeated_range_uses_first() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    for _ in 0..20 {
        let res = warp::test::request()
            .path("/weather-data?range=high&range=normal")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        let reading: Reading = serde_json::from_slice(res.body()).unwrap();
        assert!((85..110).contains(&reading.temperature()));
        assert!((60..100).contains(&reading.humidity()));
    }
}

#[tokio::test]
async fn test_rest_extra_query_keys_ignored() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather-data?units=f&range=high&units=c")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 200);
    let reading: Reading = serde_json::from_slice(res.body()).unwrap();
    assert!((85..110).contains(&reading.temperature()));
}

#[tokio::test]
async fn test_rest_health() {
    // Prepare
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);
    let res = warp::test::request()
        .path("/weather-data")
        .reply(&routes)
        .await;
    let reading: Reading = serde_json::from_slice(res.body()).unwrap();

    // Execute
    let res = warp::test::request()
        .path("/api/health")
        .reply(&routes)
        .await;

    // Validate
    assert_eq!(res.status(), 200);
    let health: metric_routes::dto::HealthyDto = serde_json::from_slice(res.body()).unwrap();
    assert!(health.healthy);
    assert_eq!(soilsim_core::CORE_VERSION, health.version);
    assert_eq!(36, health.relay_pin);
    assert_eq!(Some(reading.soil_status()), health.soil_status);
    assert_eq!(Some(PinLevel::from(reading.soil_status())), health.relay_level);
    assert!(health.switched_at.is_some());
    assert_eq!(0, health.response_delay_ms);
}

#[tokio::test]
async fn test_rest_health_before_first_reading() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/api/health")
        .reply(&routes)
        .await;

    let health: metric_routes::dto::HealthyDto = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(None, health.relay_level);
    assert_eq!(None::<SoilStatus>, health.soil_status);
}

#[tokio::test]
async fn test_rest_api_doc() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/api/doc/api.json")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 200);
    let doc: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert!(doc["paths"]["/weather-data"]["get"].is_object());
    assert!(doc["components"]["schemas"]["Reading"].is_object());
}

#[tokio::test]
async fn test_rest_unknown_path() {
    let (station, _) = build_mocked_station(&[]);
    let routes = routes(&station);

    let res = warp::test::request()
        .path("/weather")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), 404);
}
