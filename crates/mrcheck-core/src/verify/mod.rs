//! Verification of a declaration's payloads against an expected set

pub mod cancel;
pub mod fetcher;
pub mod matcher;
pub mod options;

pub use cancel::CancelToken;
pub use fetcher::PayloadFetcher;
pub use matcher::{ObjectsMatcher, VerificationOutcome};
pub use options::VerifyOptions;
