//! Wire DTOs for the beacon backend.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two. Field names follow the
//! backend's camelCase JSON exactly, since the backend contract is fixed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP-level success code carried inside every envelope.
pub const SUCCESS_CODE: i64 = 200;

/// The backend's uniform response wrapper.
///
/// Aggregation endpoints omit the pagination fields, and failures send
/// `msg` and `data` as `null` or not at all, so everything except `code` is
/// lenient. `data` stays untyped until the code has been checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The backend's message, empty when absent or `null`.
    pub fn message(&self) -> &str {
        self.msg.as_deref().unwrap_or_default()
    }
}

/// One logged telemetry event describing a client environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeaconRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub ui_library: String,
    /// Seconds spent in the login strategy.
    pub login_strategy: f64,
    pub i18n: bool,
    /// `YYYY-MM-DD HH:mm:ss`
    pub create_at: String,
    pub cpu_model: String,
    /// `win32`, `darwin` or `linux`.
    pub os_platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_version: Option<String>,
    pub total_mem: String,
    pub cpu_arch: String,
    pub version: String,
    pub cb_version: String,
    pub project_name: String,
    pub platforms: Vec<String>,
}

/// Optional filter for the listing endpoint. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

impl QueryParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    /// Query-string pairs in wire order, skipping absent fields.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(os) = &self.os {
            pairs.push(("os", os.clone()));
        }
        pairs
    }
}

/// Listing payload together with the envelope's pagination fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyBucket {
    /// 0 through 23.
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total: u64,
    pub daily_data: Vec<DailyBucket>,
}
