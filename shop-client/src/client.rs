use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shop_core::validation::EstimatePayload;
use shop_core::{
    AccountReceivable, ApiConfig, ApiError, ApiResult, AuthorizationStatus, Diagnostic, Estimate,
    NewDiagnostic, NewPayment, NewTechnicianNote, NewVehicle, Payment, SalesReport, Session,
    ShopApi, TaxMarkupSettings, TechnicianNote, Vehicle,
};
use tracing::{debug, info, warn};

/// Error body the backend sends with a failed request. Either field may
/// carry the message.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct AuthorizationBody {
    authorization_status: AuthorizationStatus,
}

/// [`ShopApi`] over HTTP with a bearer token on every request.
#[derive(Debug, Clone)]
pub struct HttpShopClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpShopClient {
    pub fn new(
        config: &ApiConfig,
        session: Session,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!(%base_url, timeout_secs = config.timeout_secs, "shop API client ready");

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(
        &self,
        path: &str,
    ) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, self.session.bearer())
            .send()
            .await
            .map_err(transport_error)?;
        handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> ApiResult<T> {
        debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body)).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .filter(|message| !message.trim().is_empty());
        let err = match message {
            Some(message) => ApiError::Status {
                status: status.as_u16(),
                message,
            },
            None => ApiError::generic_status(status.as_u16()),
        };
        warn!(status = status.as_u16(), error = %err, "request rejected");
        return Err(err);
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

#[async_trait]
impl ShopApi for HttpShopClient {
    async fn get_settings(&self) -> ApiResult<TaxMarkupSettings> {
        self.get("settings").await
    }

    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        self.get("vehicles").await
    }

    async fn get_vehicle(
        &self,
        id: i64,
    ) -> ApiResult<Vehicle> {
        self.get(&format!("vehicles/{id}")).await
    }

    async fn create_vehicle(
        &self,
        vehicle: &NewVehicle,
    ) -> ApiResult<Vehicle> {
        self.post("vehicles", vehicle).await
    }

    async fn update_vehicle(
        &self,
        vehicle: &Vehicle,
    ) -> ApiResult<Vehicle> {
        self.put(&format!("vehicles/{}", vehicle.id), vehicle).await
    }

    async fn list_diagnostics(
        &self,
        vehicle_id: i64,
    ) -> ApiResult<Vec<Diagnostic>> {
        self.get(&format!("vehicles/{vehicle_id}/diagnostics")).await
    }

    async fn get_diagnostic(
        &self,
        id: i64,
    ) -> ApiResult<Diagnostic> {
        self.get(&format!("diagnostics/{id}")).await
    }

    async fn create_diagnostic(
        &self,
        diagnostic: &NewDiagnostic,
    ) -> ApiResult<Diagnostic> {
        self.post(
            &format!("vehicles/{}/diagnostics", diagnostic.vehicle_id),
            diagnostic,
        )
        .await
    }

    async fn list_technician_notes(
        &self,
        diagnostic_id: i64,
    ) -> ApiResult<Vec<TechnicianNote>> {
        self.get(&format!("diagnostics/{diagnostic_id}/notes")).await
    }

    async fn add_technician_note(
        &self,
        diagnostic_id: i64,
        note: &NewTechnicianNote,
    ) -> ApiResult<TechnicianNote> {
        self.post(&format!("diagnostics/{diagnostic_id}/notes"), note)
            .await
    }

    async fn list_estimates(&self) -> ApiResult<Vec<Estimate>> {
        self.get("estimates").await
    }

    async fn get_estimate(
        &self,
        id: i64,
    ) -> ApiResult<Estimate> {
        self.get(&format!("estimates/{id}")).await
    }

    async fn create_estimate(
        &self,
        payload: &EstimatePayload,
    ) -> ApiResult<Estimate> {
        self.post("estimates", payload).await
    }

    async fn update_estimate(
        &self,
        id: i64,
        payload: &EstimatePayload,
    ) -> ApiResult<Estimate> {
        self.put(&format!("estimates/{id}"), payload).await
    }

    async fn set_authorization_status(
        &self,
        id: i64,
        status: AuthorizationStatus,
    ) -> ApiResult<Estimate> {
        let body = AuthorizationBody {
            authorization_status: status,
        };
        self.put(&format!("estimates/{id}/authorization"), &body)
            .await
    }

    async fn list_receivables(&self) -> ApiResult<Vec<AccountReceivable>> {
        self.get("receivables").await
    }

    async fn get_receivable(
        &self,
        id: i64,
    ) -> ApiResult<AccountReceivable> {
        self.get(&format!("receivables/{id}")).await
    }

    async fn list_payments(
        &self,
        account_id: i64,
    ) -> ApiResult<Vec<Payment>> {
        self.get(&format!("receivables/{account_id}/payments"))
            .await
    }

    async fn record_payment(
        &self,
        account_id: i64,
        payment: &NewPayment,
    ) -> ApiResult<Payment> {
        self.post(&format!("receivables/{account_id}/payments"), payment)
            .await
    }

    async fn get_sales_report(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<SalesReport> {
        debug!(%from, %to, "GET reports/sales");
        let request = self
            .client
            .get(self.url("reports/sales"))
            .query(&[("from", from.to_string()), ("to", to.to_string())]);
        self.send(request).await
    }
}
