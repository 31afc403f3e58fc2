pub mod error;
pub mod service;
pub mod workflows;

pub use error::{ApiError, ApiResult};
pub use service::ShopApi;
pub use workflows::{
    SubmitError, load_account_details, open_estimate, record_payment, submit_estimate,
};
