//! Background worker for streamed narratives.
//!
//! The HTTP stream blocks, so it runs on its own thread and reports back
//! to the TUI main loop over a channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::ports::{CancelFlag, NarrativeError, NarrativeProvider, NarrativeRequest};

/// Progress updates from the narrative worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeProgress {
    /// Request sent, waiting for the first chunk
    Started,
    /// Text delta to append
    Chunk(String),
    /// Stream finished normally
    Complete,
    /// Stream ended with an error
    Error(String),
}

/// Handle to a running narrative worker.
pub struct NarrativeWorkerHandle {
    progress_rx: Receiver<NarrativeProgress>,
    cancel: CancelFlag,
    _handle: JoinHandle<()>,
}

impl NarrativeWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<NarrativeProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Ask the worker to stop at the next chunk boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Narrative worker that streams commentary in background.
pub struct NarrativeWorker;

impl NarrativeWorker {
    /// Spawn a background narrative stream.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<P>(provider: Arc<P>, request: NarrativeRequest) -> NarrativeWorkerHandle
    where
        P: NarrativeProvider + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();

        let handle = thread::spawn(move || {
            Self::run_stream(provider.as_ref(), &request, &worker_cancel, &tx);
        });

        NarrativeWorkerHandle {
            progress_rx: rx,
            cancel,
            _handle: handle,
        }
    }

    fn run_stream<P>(
        provider: &P,
        request: &NarrativeRequest,
        cancel: &CancelFlag,
        tx: &Sender<NarrativeProgress>,
    ) where
        P: NarrativeProvider + ?Sized,
    {
        let _ = tx.send(NarrativeProgress::Started);

        let result = provider.stream(request, cancel, &mut |chunk: &str| {
            let _ = tx.send(NarrativeProgress::Chunk(chunk.to_string()));
        });

        match result {
            Ok(()) => {
                let _ = tx.send(NarrativeProgress::Complete);
            }
            Err(NarrativeError::Cancelled) => {
                tracing::debug!("Narrative stream cancelled by user");
            }
            Err(e) => {
                tracing::warn!("Narrative stream failed: {}", e);
                let _ = tx.send(NarrativeProgress::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analyze, samples};
    use std::time::Duration;

    struct ScriptedProvider {
        chunks: Vec<&'static str>,
        fail_with: Option<NarrativeError>,
    }

    impl NarrativeProvider for ScriptedProvider {
        fn stream(
            &self,
            _request: &NarrativeRequest,
            cancel: &CancelFlag,
            on_chunk: &mut dyn FnMut(&str),
        ) -> Result<(), NarrativeError> {
            for chunk in &self.chunks {
                if cancel.is_cancelled() {
                    return Err(NarrativeError::Cancelled);
                }
                on_chunk(chunk);
            }
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    fn request() -> NarrativeRequest {
        let input = samples::find("b12-def").expect("Sample exists").data;
        NarrativeRequest::new(&input, &analyze(&input))
    }

    fn drain(handle: &NarrativeWorkerHandle) -> Vec<NarrativeProgress> {
        let mut out = Vec::new();
        while let Ok(p) = handle.progress_rx.recv_timeout(Duration::from_secs(5)) {
            let done = matches!(p, NarrativeProgress::Complete | NarrativeProgress::Error(_));
            out.push(p);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_chunks_arrive_in_order() {
        let provider = Arc::new(ScriptedProvider {
            chunks: vec!["## Interpretation\n", "Macrocytic ", "pattern."],
            fail_with: None,
        });
        let handle = NarrativeWorker::spawn(provider, request());

        assert_eq!(
            drain(&handle),
            vec![
                NarrativeProgress::Started,
                NarrativeProgress::Chunk("## Interpretation\n".to_string()),
                NarrativeProgress::Chunk("Macrocytic ".to_string()),
                NarrativeProgress::Chunk("pattern.".to_string()),
                NarrativeProgress::Complete,
            ]
        );
    }

    #[test]
    fn test_error_is_reported() {
        let provider = Arc::new(ScriptedProvider {
            chunks: vec!["partial"],
            fail_with: Some(NarrativeError::RateLimited),
        });
        let handle = NarrativeWorker::spawn(provider, request());

        let progress = drain(&handle);
        assert_eq!(
            progress.last(),
            Some(&NarrativeProgress::Error(
                "Rate limit exceeded. Please try again later.".to_string()
            ))
        );
    }
}
