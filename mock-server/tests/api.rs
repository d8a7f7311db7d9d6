use std::time::Duration;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, sample_records, Backend, BeaconRecord, DailyStats, Envelope, HourlyStats, Scripted};
use serde_json::json;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- listing ---

#[tokio::test]
async fn list_defaults_to_first_page_of_ten() {
    let resp = app().oneshot(get("/getBeacon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Vec<BeaconRecord>> = body_json(resp).await;
    assert_eq!(env.code, 200);
    assert_eq!(env.data.unwrap().len(), 10);
    assert_eq!((env.page, env.limit, env.total), (Some(1), Some(10), Some(48)));
}

#[tokio::test]
async fn list_paginates() {
    let app = app_with(Backend::new(sample_records(15)));
    let resp = app.oneshot(get("/getBeacon?page=2&pageSize=10")).await.unwrap();

    let env: Envelope<Vec<BeaconRecord>> = body_json(resp).await;
    assert_eq!(env.data.unwrap().len(), 5);
    assert_eq!((env.page, env.limit, env.total), (Some(2), Some(10), Some(15)));
}

#[tokio::test]
async fn list_filters_by_os() {
    let app = app_with(Backend::new(sample_records(9)));
    let resp = app.oneshot(get("/getBeacon?os=darwin&pageSize=50")).await.unwrap();

    let env: Envelope<Vec<BeaconRecord>> = body_json(resp).await;
    let records = env.data.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.os_platform == "darwin"));
    assert_eq!(env.total, Some(3));
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
    let app = app_with(Backend::new(sample_records(4)));
    let resp = app.oneshot(get("/getBeacon?page=9")).await.unwrap();

    let env: Envelope<Vec<BeaconRecord>> = body_json(resp).await;
    assert!(env.data.unwrap().is_empty());
    assert_eq!(env.total, Some(4));
}

#[tokio::test]
async fn list_rejects_non_numeric_page() {
    let resp = app().oneshot(get("/getBeacon?page=two")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn last_query_is_recorded_verbatim() {
    let backend = Backend::new(Vec::new());
    app_with(backend.clone())
        .oneshot(get("/getBeacon?pageSize=3&os=linux"))
        .await
        .unwrap();
    assert_eq!(backend.last_query().await.as_deref(), Some("pageSize=3&os=linux"));

    app_with(backend.clone()).oneshot(get("/getBeaconByDay")).await.unwrap();
    assert_eq!(backend.last_query().await, None);
}

// --- aggregations ---

#[tokio::test]
async fn hourly_has_24_buckets() {
    let resp = app().oneshot(get("/getBeaconByHour")).await.unwrap();

    let env: Envelope<HourlyStats> = body_json(resp).await;
    let stats = env.data.unwrap();
    assert_eq!(stats.hourly_data.len(), 24);
    assert_eq!(stats.total, 48);
    assert_eq!(stats.hourly_data.iter().map(|b| b.count).sum::<u64>(), 48);
    assert!(env.page.is_none());
}

#[tokio::test]
async fn daily_groups_by_date() {
    let resp = app().oneshot(get("/getBeaconByDay")).await.unwrap();

    let env: Envelope<DailyStats> = body_json(resp).await;
    let stats = env.data.unwrap();
    let dates: Vec<&str> = stats.daily_data.iter().map(|b| b.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-11", "2024-03-12", "2024-03-13"]);
    assert_eq!(stats.daily_data[0].day_of_week, "Monday");
    assert_eq!(stats.total, 48);
}

// --- scripted replies ---

#[tokio::test]
async fn scripted_body_replaces_every_route() {
    let backend = Backend::new(sample_records(3));
    backend
        .script(Scripted::Body(json!({"code": 500, "msg": "db error", "data": null})))
        .await;

    let resp = app_with(backend.clone()).oneshot(get("/getBeaconByHour")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let env: serde_json::Value = body_json(resp).await;
    assert_eq!(env["code"], 500);
    assert_eq!(env["msg"], "db error");

    backend.clear_script().await;
    let resp = app_with(backend).oneshot(get("/getBeaconByHour")).await.unwrap();
    let env: Envelope<HourlyStats> = body_json(resp).await;
    assert_eq!(env.code, 200);
}

#[tokio::test]
async fn scripted_status_has_plain_body() {
    let backend = Backend::new(Vec::new());
    backend.script(Scripted::Status(502, "Bad Gateway".to_string())).await;

    let resp = app_with(backend).oneshot(get("/getBeaconByDay")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Bad Gateway");
}

#[tokio::test]
async fn scripted_delay_still_answers() {
    let backend = Backend::new(sample_records(2));
    backend.script(Scripted::Delay(Duration::from_millis(20))).await;

    let resp = app_with(backend).oneshot(get("/getBeacon")).await.unwrap();
    let env: Envelope<Vec<BeaconRecord>> = body_json(resp).await;
    assert_eq!(env.total, Some(2));
}
