use std::any::Any;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("task panicked: {0}")]
pub struct TaskPanic(pub String);

/// Fixed number of workers draining a queue of keyed jobs.
///
/// `run_all` returns only after every job has finished. A panicking job is reported
/// under its own key and does not take its worker or its siblings down.
#[derive(Debug, Clone, Copy)]
pub struct BoundedTaskPool {
    width: usize,
}

impl BoundedTaskPool {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub async fn run_all<K, T, Fut>(&self, jobs: Vec<(K, Fut)>) -> BTreeMap<K, Result<T, TaskPanic>>
    where
        K: Ord + Send + 'static,
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let job_count = jobs.len();
        if job_count == 0 {
            return BTreeMap::new();
        }

        let (job_sender, job_receiver) = mpsc::channel::<(K, Fut)>(job_count);
        for job in jobs {
            if job_sender.send(job).await.is_err() {
                tracing::error!("Task queue closed before all jobs were queued");
                break;
            }
        }
        drop(job_sender);

        let job_receiver = Arc::new(Mutex::new(job_receiver));
        let (result_sender, mut result_receiver) = mpsc::unbounded_channel();

        let worker_count = self.width.min(job_count);
        let mut workers = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let receiver = Arc::clone(&job_receiver);
            let sender = result_sender.clone();

            workers.push(tokio::spawn(async move {
                loop {
                    let next = { receiver.lock().await.recv().await };
                    let Some((key, job)) = next else { break };

                    let outcome = AssertUnwindSafe(job)
                        .catch_unwind()
                        .await
                        .map_err(|payload| TaskPanic(panic_message(payload.as_ref())));

                    if let Err(panic) = &outcome {
                        tracing::error!(worker_id, error = %panic, "Pool task panicked");
                    }

                    if sender.send((key, outcome)).is_err() {
                        break;
                    }
                }
                tracing::trace!(worker_id, "Pool worker drained");
            }));
        }
        drop(result_sender);

        for worker in workers {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Pool worker terminated abnormally");
            }
        }

        let mut results = BTreeMap::new();
        while let Some((key, outcome)) = result_receiver.recv().await {
            results.insert(key, outcome);
        }
        results
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
