pub mod credentials;
pub mod usage;

pub use credentials::Credentials;
pub use usage::{AuthResult, QuotaRecord, UsageResponse};
