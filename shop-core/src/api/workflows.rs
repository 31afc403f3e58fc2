//! Multi-step operations built on [`ShopApi`].

use thiserror::Error;
use tracing::info;

use super::error::ApiError;
use super::service::ShopApi;
use crate::calculations::{AccountDetails, PaymentDraft, validate_payment};
use crate::models::{Estimate, EstimateDraft, EstimateMode, Payment, TaxMarkupSettings};
use crate::validation::{ValidationErrors, validate_estimate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validates a draft and creates or updates it on the backend.
///
/// Nothing is sent when validation fails. API failures are returned as-is;
/// there is no retry.
pub async fn submit_estimate(
    api: &dyn ShopApi,
    draft: &EstimateDraft,
    settings: &TaxMarkupSettings,
) -> Result<Estimate, SubmitError> {
    let payload = validate_estimate(draft, settings)?;

    let saved = match draft.mode() {
        EstimateMode::Create => api.create_estimate(&payload).await?,
        EstimateMode::Update { estimate_id } => api.update_estimate(estimate_id, &payload).await?,
    };

    info!(
        estimate_id = saved.id,
        total = %saved.total,
        "estimate saved"
    );
    Ok(saved)
}

/// Fetches an account and its payments concurrently and joins them.
pub async fn load_account_details(
    api: &dyn ShopApi,
    account_id: i64,
) -> Result<AccountDetails, ApiError> {
    let (account, payments) = tokio::try_join!(
        api.get_receivable(account_id),
        api.list_payments(account_id)
    )?;
    Ok(AccountDetails::new(account, payments))
}

/// Validates a payment against the account's current balance and records it.
pub async fn record_payment(
    api: &dyn ShopApi,
    details: &AccountDetails,
    draft: &PaymentDraft,
) -> Result<Payment, SubmitError> {
    let payment = validate_payment(draft, details.balance_due)?;
    let saved = api.record_payment(details.account.id, &payment).await?;

    info!(
        account_id = details.account.id,
        amount = %saved.amount,
        "payment recorded"
    );
    Ok(saved)
}

/// Starts an editing session for an existing estimate: its settings and the
/// estimate itself are fetched concurrently.
pub async fn open_estimate(
    api: &dyn ShopApi,
    estimate_id: i64,
) -> Result<(TaxMarkupSettings, EstimateDraft), ApiError> {
    let (settings, estimate) =
        tokio::try_join!(api.get_settings(), api.get_estimate(estimate_id))?;
    Ok((settings, EstimateDraft::from(&estimate)))
}
