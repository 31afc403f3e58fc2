mod diagnostic;
mod estimate;
pub mod lenient;
mod line_item;
mod receivable;
mod report;
mod settings;
mod vehicle;

pub use diagnostic::{Diagnostic, NewDiagnostic, NewTechnicianNote, TechnicianNote};
pub use estimate::{AuthorizationStatus, Estimate, EstimateDraft, EstimateMode};
pub use line_item::{FlatFeeItem, LaborItem, LineItemKind, PartItem};
pub use receivable::{AccountReceivable, NewPayment, Payment, PaymentMethod, ReceivableStatus};
pub use report::{DailySales, SalesReport};
pub use settings::TaxMarkupSettings;
pub use vehicle::{NewVehicle, Vehicle};
