pub mod claims;
pub mod envelope;
pub mod fields;
pub mod params;
pub mod records;

pub use claims::{decode_claims, ClaimsError, TokenClaims};
pub use envelope::{ApiEnvelope, Pagination};
pub use fields::{FieldValue, Record};
pub use params::{ListParams, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use records::*;
