use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeaconRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub ui_library: String,
    pub login_strategy: f64,
    pub i18n: bool,
    pub create_at: String,
    pub cpu_model: String,
    pub os_platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_version: Option<String>,
    pub total_mem: String,
    pub cpu_arch: String,
    pub version: String,
    pub cb_version: String,
    pub project_name: String,
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub msg: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data: Some(data),
            page: None,
            limit: None,
            total: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub os: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyBucket {
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStats {
    pub total: u64,
    pub hourly_data: Vec<HourlyBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: String,
    pub count: u64,
    pub day_of_week: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total: u64,
    pub daily_data: Vec<DailyBucket>,
}

/// Replaces the normal handler output for every route until cleared.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply 200 with this exact JSON body.
    Body(Value),
    /// Reply with this status and plain-text body.
    Status(u16, String),
    /// Sleep before answering normally.
    Delay(Duration),
}

#[derive(Clone, Default)]
pub struct Backend {
    records: Arc<RwLock<Vec<BeaconRecord>>>,
    scripted: Arc<RwLock<Option<Scripted>>>,
    last_query: Arc<RwLock<Option<String>>>,
}

impl Backend {
    pub fn new(records: Vec<BeaconRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            ..Self::default()
        }
    }

    pub async fn script(&self, scripted: Scripted) {
        *self.scripted.write().await = Some(scripted);
    }

    pub async fn clear_script(&self) {
        *self.scripted.write().await = None;
    }

    /// Raw query string of the most recent request, `None` if it had none.
    pub async fn last_query(&self) -> Option<String> {
        self.last_query.read().await.clone()
    }

    async fn intercept(&self, raw_query: Option<String>) -> Option<Response> {
        *self.last_query.write().await = raw_query;
        let scripted = self.scripted.read().await.clone();
        match scripted? {
            Scripted::Body(body) => Some(Json(body).into_response()),
            Scripted::Status(status, body) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Some((status, body).into_response())
            }
            Scripted::Delay(delay) => {
                tokio::time::sleep(delay).await;
                None
            }
        }
    }
}

pub fn app() -> Router {
    app_with(Backend::new(sample_records(48)))
}

pub fn app_with(backend: Backend) -> Router {
    Router::new()
        .route("/getBeacon", get(list_beacons))
        .route("/getBeaconByHour", get(hourly_stats))
        .route("/getBeaconByDay", get(daily_stats))
        .with_state(backend)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(backend)).await
}

async fn list_beacons(
    State(backend): State<Backend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<ListParams>,
) -> Response {
    if let Some(response) = backend.intercept(raw).await {
        return response;
    }

    let records = backend.records.read().await;
    let matching: Vec<&BeaconRecord> = records
        .iter()
        .filter(|r| params.os.as_deref().map_or(true, |os| r.os_platform == os))
        .collect();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let items: Vec<BeaconRecord> = matching
        .iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .map(|r| (*r).clone())
        .collect();
    tracing::debug!(page, limit, total = matching.len(), returned = items.len(), "list beacons");

    let mut envelope = Envelope::ok(items);
    envelope.page = Some(page);
    envelope.limit = Some(limit);
    envelope.total = Some(matching.len());
    Json(envelope).into_response()
}

async fn hourly_stats(State(backend): State<Backend>, RawQuery(raw): RawQuery) -> Response {
    if let Some(response) = backend.intercept(raw).await {
        return response;
    }
    let records = backend.records.read().await;
    Json(Envelope::ok(hourly(&records))).into_response()
}

async fn daily_stats(State(backend): State<Backend>, RawQuery(raw): RawQuery) -> Response {
    if let Some(response) = backend.intercept(raw).await {
        return response;
    }
    let records = backend.records.read().await;
    Json(Envelope::ok(daily(&records))).into_response()
}

fn created_at(record: &BeaconRecord) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&record.create_at, TIMESTAMP_FORMAT).ok()
}

/// 24 buckets, one per hour of `createAt`. Unparseable timestamps are skipped.
pub fn hourly(records: &[BeaconRecord]) -> HourlyStats {
    let mut counts = [0u64; 24];
    for ts in records.iter().filter_map(created_at) {
        counts[ts.hour() as usize] += 1;
    }
    HourlyStats {
        total: counts.iter().sum(),
        hourly_data: counts
            .iter()
            .enumerate()
            .map(|(hour, &count)| HourlyBucket { hour: hour as u32, count })
            .collect(),
    }
}

/// One bucket per distinct `createAt` date, oldest first.
pub fn daily(records: &[BeaconRecord]) -> DailyStats {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ts in records.iter().filter_map(created_at) {
        *counts.entry(ts.date()).or_default() += 1;
    }
    DailyStats {
        total: counts.values().sum(),
        daily_data: counts
            .into_iter()
            .map(|(date, count)| DailyBucket {
                date: date.format("%Y-%m-%d").to_string(),
                count,
                day_of_week: date.format("%A").to_string(),
            })
            .collect(),
    }
}

/// Deterministic records spread over three days, three platforms and many hours.
pub fn sample_records(n: usize) -> Vec<BeaconRecord> {
    const PLATFORMS: [(&str, &str, &str); 3] = [
        ("win32", "x64", "Intel(R) Core(TM) i7-12700H"),
        ("darwin", "arm64", "Apple M2"),
        ("linux", "x64", "AMD Ryzen 7 5800X"),
    ];
    (0..n)
        .map(|i| {
            let (os, arch, cpu) = PLATFORMS[i % PLATFORMS.len()];
            BeaconRecord {
                id: Uuid::new_v4().simple().to_string(),
                ui_library: if i % 2 == 0 { "wot-ui" } else { "uv-ui" }.to_string(),
                login_strategy: (i % 5) as f64,
                i18n: i % 4 == 0,
                create_at: format!("2024-03-{:02} {:02}:{:02}:00", 11 + i % 3, (i * 5) % 24, i % 60),
                cpu_model: cpu.to_string(),
                os_platform: os.to_string(),
                node_version: (i % 3 != 0).then(|| "v20.11.1".to_string()),
                total_mem: format!("{}GB", 8 << (i % 3)),
                cpu_arch: arch.to_string(),
                version: "2.4.1".to_string(),
                cb_version: "1.9.0".to_string(),
                project_name: format!("project-{}", i % 7),
                platforms: vec!["h5".to_string(), "mp-weixin".to_string()],
            }
        })
        .collect()
}
