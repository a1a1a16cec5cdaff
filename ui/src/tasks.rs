use std::future::Future;

use anyhow::Result;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use dataset::{DataLayout, StopDirectory, StopPayload};
use model::{AnalyticsEvent, DataSource, Ticket};

/// The outcome of some background work, handed back to the UI thread.
pub enum TaskResult {
    Directory(Result<StopDirectory>),
    Stop(Ticket, Result<StopPayload>),
    Analytics(Result<()>),
}

/// Runs loads in the background. Nothing here touches UI state; results are only delivered
/// when the UI asks for them.
pub struct Tasks {
    tx: UnboundedSender<TaskResult>,
    rx: UnboundedReceiver<TaskResult>,
    pending: usize,
}

impl Tasks {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx, pending: 0 }
    }

    pub fn load_directory(&mut self, source: &DataSource) {
        let source = source.clone();
        self.spawn(
            move || async move { TaskResult::Directory(model::load_directory(&source).await) },
            |err| TaskResult::Directory(Err(err)),
        );
    }

    pub fn load_stop(&mut self, source: &DataSource, layout: DataLayout, ticket: Ticket) {
        let source = source.clone();
        let failed = ticket.clone();
        self.spawn(
            move || async move {
                let result = model::load_stop(&source, layout, ticket.stop_name()).await;
                TaskResult::Stop(ticket, result)
            },
            move |err| TaskResult::Stop(failed, Err(err)),
        );
    }

    pub fn send_analytics(&mut self, collector_url: &str, event: AnalyticsEvent) {
        let url = collector_url.to_string();
        self.spawn(
            move || async move { TaskResult::Analytics(event.send(&url).await) },
            |err| TaskResult::Analytics(Err(err)),
        );
    }

    /// Everything that finished since the last call.
    pub fn poll(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();
        while let Ok(Some(result)) = self.rx.try_next() {
            self.pending -= 1;
            results.push(result);
        }
        results
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    // The future itself doesn't have to be Send; it's created wherever it runs. If the task
    // can't even start, `fail` still produces a result, so every task reports back exactly once.
    #[cfg(not(target_arch = "wasm32"))]
    fn spawn<F, Fut, E>(&mut self, make: F, fail: E)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = TaskResult> + 'static,
        E: FnOnce(anyhow::Error) -> TaskResult + Send + 'static,
    {
        self.pending += 1;
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();
            let result = run(runtime, make, fail);
            // The receiver only disappears when the app is shutting down
            let _ = tx.unbounded_send(result);
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn<F, Fut, E>(&mut self, make: F, _: E)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = TaskResult> + 'static,
        E: FnOnce(anyhow::Error) -> TaskResult + Send + 'static,
    {
        self.pending += 1;
        let tx = self.tx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = make().await;
            let _ = tx.unbounded_send(result);
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run<F, Fut, E>(
    runtime: std::io::Result<tokio::runtime::Runtime>,
    make: F,
    fail: E,
) -> TaskResult
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = TaskResult>,
    E: FnOnce(anyhow::Error) -> TaskResult,
{
    match runtime {
        Ok(runtime) => runtime.block_on(make()),
        Err(err) => {
            error!("Couldn't start a runtime for a background task: {err}");
            fail(anyhow::Error::new(err).context("couldn't start a background task"))
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::io::{Error, ErrorKind};

    use model::SelectionState;

    use super::*;

    fn ticket() -> Ticket {
        SelectionState::new().select_stop("Köln Hbf").unwrap()
    }

    #[test]
    fn runtime_failure_still_reports_the_stop() {
        let ticket = ticket();
        let failed = ticket.clone();
        let result = run(
            Err(Error::new(ErrorKind::Other, "no threads left")),
            || async { TaskResult::Analytics(Ok(())) },
            move |err| TaskResult::Stop(failed, Err(err)),
        );
        match result {
            TaskResult::Stop(t, Err(err)) => {
                assert_eq!(t, ticket);
                assert!(format!("{err:#}").contains("no threads left"));
            }
            _ => panic!("expected a failed stop load"),
        }
    }

    #[test]
    fn every_task_reports_back() {
        let mut tasks = Tasks::new();
        tasks.spawn(
            || async { TaskResult::Analytics(Ok(())) },
            |err| TaskResult::Analytics(Err(err)),
        );
        tasks.spawn(
            || async { TaskResult::Analytics(Err(anyhow!("collector down"))) },
            |err| TaskResult::Analytics(Err(err)),
        );
        assert!(tasks.is_busy());

        let mut results = Vec::new();
        while results.len() < 2 {
            results.extend(tasks.poll());
            std::thread::yield_now();
        }
        assert!(!tasks.is_busy());
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, TaskResult::Analytics(Ok(()))))
                .count(),
            1
        );
    }

    #[test]
    fn runtime_runs_the_job() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();
        let result = run(
            runtime,
            || async { TaskResult::Directory(Err(anyhow!("missing stops.json"))) },
            |_| panic!("the runtime started"),
        );
        assert!(matches!(result, TaskResult::Directory(Err(_))));
    }
}
