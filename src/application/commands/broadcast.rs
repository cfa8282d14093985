// src/application/commands/broadcast.rs
use crate::application::{
    dto::BroadcastReport,
    error::{ApplicationError, ApplicationResult},
    ports::messaging::{DirectoryMember, MessagingGateway},
};
use std::sync::Arc;
use tokio::{sync::Semaphore, task::JoinSet};

/// Fans a message out to every eligible directory member. Each delivery is
/// independent: a failed send is tallied, never fatal to the rest.
pub struct BroadcastService {
    messaging: Arc<dyn MessagingGateway>,
    max_in_flight: usize,
}

impl BroadcastService {
    pub fn new(messaging: Arc<dyn MessagingGateway>, max_in_flight: usize) -> Self {
        Self {
            messaging,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Only a directory listing failure aborts the broadcast; per-recipient
    /// failures are reported in the returned `BroadcastReport`.
    pub async fn broadcast<F>(&self, build_message: F) -> ApplicationResult<BroadcastReport>
    where
        F: Fn(&DirectoryMember) -> String,
    {
        let members = self.messaging.list_directory_members().await.map_err(|err| {
            ApplicationError::infrastructure(format!("cannot list directory members: {err}"))
        })?;
        let recipients: Vec<DirectoryMember> = members
            .into_iter()
            .filter(DirectoryMember::is_eligible_recipient)
            .collect();

        let mut report = BroadcastReport {
            total_users: recipients.len(),
            ..BroadcastReport::default()
        };

        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut sends = JoinSet::new();
        for recipient in recipients {
            let text = build_message(&recipient);
            let messaging = Arc::clone(&self.messaging);
            let permits = Arc::clone(&permits);
            sends.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let outcome = messaging.send_direct(&recipient.id, &text).await;
                (recipient.id, outcome)
            });
        }

        while let Some(joined) = sends.join_next().await {
            match joined {
                Ok((_, Ok(()))) => report.successful_sends += 1,
                Ok((recipient, Err(err))) => {
                    report.failed_sends += 1;
                    report.errors.push(format!("{recipient}: {err}"));
                }
                Err(err) => {
                    report.failed_sends += 1;
                    report.errors.push(format!("send task aborted: {err}"));
                }
            }
        }

        if let Some(err) = report.aggregate_error() {
            tracing::warn!(
                total = report.total_users,
                failed = report.failed_sends,
                error = %err,
                "broadcast completed with failures"
            );
        } else {
            tracing::info!(total = report.total_users, "broadcast delivered");
        }
        Ok(report)
    }

    pub async fn send_direct(&self, recipient: &str, text: &str) -> ApplicationResult<()> {
        if recipient.trim().is_empty() {
            return Err(ApplicationError::validation("recipient: cannot be empty"));
        }
        if text.trim().is_empty() {
            return Err(ApplicationError::validation("text: message cannot be empty"));
        }
        self.messaging.send_direct(recipient.trim(), text).await
    }
}
