use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::ApiResult;
use crate::models::{
    AccountReceivable, AuthorizationStatus, Diagnostic, Estimate, NewDiagnostic, NewPayment,
    NewTechnicianNote, NewVehicle, Payment, SalesReport, TaxMarkupSettings, TechnicianNote,
    Vehicle,
};
use crate::validation::EstimatePayload;

/// The shop's REST backend, one method per operation.
#[async_trait]
pub trait ShopApi: Send + Sync {
    // Settings
    async fn get_settings(&self) -> ApiResult<TaxMarkupSettings>;

    // Vehicles
    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, id: i64) -> ApiResult<Vehicle>;
    async fn create_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<Vehicle>;
    async fn update_vehicle(&self, vehicle: &Vehicle) -> ApiResult<Vehicle>;

    // Diagnostics
    async fn list_diagnostics(&self, vehicle_id: i64) -> ApiResult<Vec<Diagnostic>>;
    async fn get_diagnostic(&self, id: i64) -> ApiResult<Diagnostic>;
    async fn create_diagnostic(&self, diagnostic: &NewDiagnostic) -> ApiResult<Diagnostic>;

    // Technician notes
    async fn list_technician_notes(&self, diagnostic_id: i64) -> ApiResult<Vec<TechnicianNote>>;
    async fn add_technician_note(
        &self,
        diagnostic_id: i64,
        note: &NewTechnicianNote,
    ) -> ApiResult<TechnicianNote>;

    // Estimates
    async fn list_estimates(&self) -> ApiResult<Vec<Estimate>>;
    async fn get_estimate(&self, id: i64) -> ApiResult<Estimate>;
    async fn create_estimate(&self, payload: &EstimatePayload) -> ApiResult<Estimate>;
    async fn update_estimate(&self, id: i64, payload: &EstimatePayload) -> ApiResult<Estimate>;
    async fn set_authorization_status(
        &self,
        id: i64,
        status: AuthorizationStatus,
    ) -> ApiResult<Estimate>;

    // Accounts receivable
    async fn list_receivables(&self) -> ApiResult<Vec<AccountReceivable>>;
    async fn get_receivable(&self, id: i64) -> ApiResult<AccountReceivable>;
    async fn list_payments(&self, account_id: i64) -> ApiResult<Vec<Payment>>;
    async fn record_payment(&self, account_id: i64, payment: &NewPayment) -> ApiResult<Payment>;

    // Reports
    async fn get_sales_report(&self, from: NaiveDate, to: NaiveDate) -> ApiResult<SalesReport>;
}
