pub mod api;
pub mod calculations;
pub mod config;
pub mod editor;
pub mod models;
pub mod search;
pub mod session;
pub mod validation;

pub use api::{
    ApiError, ApiResult, ShopApi, SubmitError, load_account_details, open_estimate, record_payment,
    submit_estimate,
};
pub use config::ApiConfig;
pub use models::*;
pub use session::{Session, UserProfile};
