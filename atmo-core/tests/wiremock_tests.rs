//! HTTP behaviour of the Open-Meteo provider against a mock server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use atmo_core::{
    Config, OpenMeteoProvider, WeatherFetchError, WeatherProvider,
    provider::openmeteo::CURRENT_FIELDS, provider_from_config,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "current_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "windspeed_10m": "km/h"
        },
        "current": {
            "time": "2024-01-15T12:00",
            "interval": 900,
            "temperature_2m": 5.5,
            "weathercode": 3,
            "windspeed_10m": 12.5,
            "winddirection_10m": 225,
            "relativehumidity_2m": 75,
            "precipitation": 0.0,
            "pressure_msl": 1013.25,
            "visibility": 24140.0,
            "uv_index": 1.2,
            "cloudcover": 80,
            "dewpoint_2m": 1.3,
            "apparent_temperature": 2.0
        }
    })
}

fn test_provider(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(server.uri(), Duration::from_secs(5)).expect("Failed to create client")
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fixture_maps_onto_snapshot() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_response())).await;

    let snap = test_provider(&server).fetch_snapshot().await.expect("fetch should succeed");

    assert_eq!(snap.temperature, 5.5);
    assert_eq!(snap.apparent_temperature, 2.0);
    assert_eq!(snap.weather_code, 3);
    assert_eq!(snap.wind_speed, 12.5);
    assert_eq!(snap.wind_direction, 225.0);
    assert_eq!(snap.humidity, 75);
    assert_eq!(snap.precipitation, 0.0);
    assert_eq!(snap.pressure, 1013.25);
    assert_eq!(snap.visibility, 24140.0);
    assert_eq!(snap.uv_index, 1.2);
    assert_eq!(snap.cloud_cover, 80);
    assert_eq!(snap.dew_point, 1.3);
    assert_eq!(snap.timestamp, "2024-01-15T12:00");
}

#[tokio::test]
async fn request_carries_fixed_location_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("current", CURRENT_FIELDS))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_provider(&server).fetch_snapshot().await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn provider_from_config_uses_base_url() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_response())).await;

    let config = Config { base_url: server.uri(), ..Config::default() };
    let provider = provider_from_config(&config).expect("provider");

    let snap = provider.fetch_snapshot().await.expect("fetch should succeed");
    assert_eq!(snap.weather_code, 3);
}

#[tokio::test]
async fn server_error_surfaces_http_status() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(503).set_body_string("upstream busy")).await;

    let err = test_provider(&server).fetch_snapshot().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    let msg = err.to_string();
    assert!(msg.contains("503"), "{msg}");
    assert!(msg.contains("upstream busy"), "{msg}");
}

#[tokio::test]
async fn not_found_is_an_http_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(404)).await;

    let err = test_provider(&server).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Http { status: 404, .. }), "{err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let err = test_provider(&server).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn missing_field_never_yields_partial_snapshot() {
    let server = MockServer::start().await;

    let mut body = sample_response();
    if let Some(current) = body["current"].as_object_mut() {
        current.remove("uv_index");
    }
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let err = test_provider(&server).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Parse(_)), "{err:?}");
    assert!(err.to_string().contains("uv_index"), "{err}");
}

#[tokio::test]
async fn negative_wind_speed_is_rejected() {
    let server = MockServer::start().await;

    let mut body = sample_response();
    body["current"]["windspeed_10m"] = serde_json::json!(-4.0);
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let err = test_provider(&server).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn slow_response_times_out_as_network_error() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(sample_response())
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let provider =
        OpenMeteoProvider::new(server.uri(), Duration::from_millis(200)).expect("client");

    let err = provider.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Reserve a free port, then close it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let provider =
        OpenMeteoProvider::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(2))
            .expect("client");

    let err = provider.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn error_status_is_kept_when_body_is_cut_short() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        // Promise 100 bytes, deliver 5, hang up.
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .expect("write");
    });

    let provider =
        OpenMeteoProvider::new(format!("http://{addr}"), Duration::from_secs(2)).expect("client");

    let err = provider.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, WeatherFetchError::Http { status: 502, .. }), "{err:?}");

    server.await.expect("server task");
}

#[tokio::test]
async fn concurrent_fetches_are_independent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(2)
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let (a, b) = tokio::join!(provider.fetch_snapshot(), provider.fetch_snapshot());

    assert_eq!(a.expect("first"), b.expect("second"));
}
