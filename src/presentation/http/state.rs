// src/presentation/http/state.rs
use crate::application::{ports::time::Clock, services::ApplicationServices};
use crate::infrastructure::security::SlackSignatureVerifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub operator_token: Arc<str>,
    pub slack_verifier: Arc<SlackSignatureVerifier>,
    pub clock: Arc<dyn Clock>,
}
