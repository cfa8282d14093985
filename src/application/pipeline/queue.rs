// src/application/pipeline/queue.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    pipeline::{PipelineJob, runner::SubmissionPipeline},
};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::{
    sync::{Mutex as AsyncMutex, mpsc},
    task::JoinHandle,
};

/// Bounded job queue drained by a fixed set of workers. Enqueueing never
/// waits: a full queue is reported to the caller instead. Each job runs in
/// its own task so a panicking job does not take its worker down.
pub struct PipelineQueue {
    sender: Mutex<Option<mpsc::Sender<PipelineJob>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl PipelineQueue {
    /// Spawn `workers` tasks on the current Tokio runtime.
    pub fn start(pipeline: Arc<SubmissionPipeline>, workers: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<PipelineJob>(capacity.max(1));
        let rx = Arc::new(AsyncMutex::new(rx));

        let handles = (0..workers.max(1))
            .map(|worker| {
                let rx = Arc::clone(&rx);
                let pipeline = Arc::clone(&pipeline);
                tokio::spawn(async move {
                    loop {
                        let job = rx.lock().await.recv().await;
                        let Some(job) = job else { break };
                        let submission_id = job.submission_id;
                        let pipeline = Arc::clone(&pipeline);
                        // outcome already logged and reported by the pipeline
                        let run = tokio::spawn(async move {
                            let _ = pipeline.process(job).await;
                        });
                        if let Err(err) = run.await {
                            tracing::error!(
                                worker,
                                %submission_id,
                                error = %err,
                                "pipeline job aborted"
                            );
                        }
                    }
                    tracing::debug!(worker, "pipeline worker stopped");
                })
            })
            .collect();

        Self {
            sender: Mutex::new(Some(tx)),
            workers: Mutex::new(handles),
        }
    }

    pub fn enqueue(&self, job: PipelineJob) -> ApplicationResult<()> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| ApplicationError::infrastructure("submission pipeline is shut down"))?;

        sender.try_send(job).map_err(|err| match err {
            mpsc::error::TrySendError::Full(job) => ApplicationError::infrastructure(format!(
                "submission pipeline is at capacity; submission {} was stored and can be reprocessed later",
                job.submission_id
            )),
            mpsc::error::TrySendError::Closed(_) => {
                ApplicationError::infrastructure("submission pipeline is shut down")
            }
        })
    }

    /// Stop accepting jobs and wait for queued and in-flight jobs to finish.
    pub async fn shutdown(&self) {
        drop(
            self.sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );
        let handles: Vec<JoinHandle<()>> = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "pipeline worker ended abnormally");
            }
        }
        tracing::info!("submission pipeline drained");
    }
}
