//! Endpoint functions over a configured transport.
//!
//! # Design
//! `BeaconApi` owns one `BeaconClient`, one `Transport`, the request hook and
//! the notifying response hook. It is read-only after construction, so a
//! shared reference can drive any number of concurrent calls.

use tracing::debug;

use crate::client::BeaconClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::interceptor::{PassThrough, RequestInterceptor, ResponseInterceptor};
use crate::notify::{Notifier, TracingNotifier};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{BeaconRecord, DailyStats, HourlyStats, Page, QueryParams};

pub struct BeaconApi<T = ReqwestTransport, N = TracingNotifier> {
    client: BeaconClient,
    transport: T,
    request_interceptor: Box<dyn RequestInterceptor>,
    response_interceptor: ResponseInterceptor<N>,
}

impl BeaconApi {
    /// Build the production client: `reqwest` transport, `tracing` notifications.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_parts(BeaconClient::new(&config), transport, TracingNotifier))
    }
}

impl<T: Transport, N: Notifier> BeaconApi<T, N> {
    pub fn with_parts(client: BeaconClient, transport: T, notifier: N) -> Self {
        Self {
            client,
            transport,
            request_interceptor: Box::new(PassThrough),
            response_interceptor: ResponseInterceptor::new(notifier),
        }
    }

    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptor = Box::new(interceptor);
        self
    }

    pub fn client(&self) -> &BeaconClient {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        self.response_interceptor.notifier()
    }

    /// `GET /getBeacon`, returning only the records.
    pub async fn fetch_beacons(&self, params: &QueryParams) -> Result<Vec<BeaconRecord>, ApiError> {
        let request = self.client.build_list_beacons(params);
        self.call(request, |r| self.client.parse_list_beacons(r)).await
    }

    /// `GET /getBeacon`, keeping `page`, `limit` and `total` from the envelope.
    pub async fn fetch_beacon_page(&self, params: &QueryParams) -> Result<Page<BeaconRecord>, ApiError> {
        let request = self.client.build_list_beacons(params);
        self.call(request, |r| self.client.parse_beacon_page(r)).await
    }

    /// `GET /getBeaconByHour`
    pub async fn fetch_hourly_stats(&self) -> Result<HourlyStats, ApiError> {
        let request = self.client.build_hourly_stats();
        self.call(request, |r| self.client.parse_hourly_stats(r)).await
    }

    /// `GET /getBeaconByDay`
    pub async fn fetch_daily_stats(&self) -> Result<DailyStats, ApiError> {
        let request = self.client.build_daily_stats();
        self.call(request, |r| self.client.parse_daily_stats(r)).await
    }

    async fn call<D>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(HttpResponse) -> Result<D, ApiError>,
    ) -> Result<D, ApiError> {
        let request = match self.request_interceptor.on_request(request) {
            Ok(request) => request,
            Err(err) => {
                self.response_interceptor.fail(&err);
                return Err(err);
            }
        };
        debug!(method = request.method.as_str(), url = %request.url, "beacon request");

        let outcome = self.transport.execute(request).await;
        self.response_interceptor.on_response(outcome, parse)
    }
}
