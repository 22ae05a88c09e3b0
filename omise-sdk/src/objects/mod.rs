//! Wire models for the Omise API.

pub mod capability;
pub mod create_source;
pub mod create_token;
pub mod date;
pub mod payment;
pub mod source;
pub mod source_type;
pub mod token;

pub use capability::{Bank, Capability, PaymentMethod, PaymentMethodKind, Provider};
pub use create_source::CreateSourcePayload;
pub use create_token::{CardDetails, CreateTokenPayload, Tokenization};
pub use payment::PaymentInformation;
pub use source::{Flow, Source};
pub use source_type::SourceType;
pub use token::{ChargeStatus, Token, TokenCard};
