mod signature;

pub use signature::{SignatureError, SlackSignatureVerifier};
