use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{
    errors::GenerationError,
    job_client::JobClient,
    models::{
        credential::Credential, generation_request::GenerationRequest,
        session_snapshot::SessionSnapshot,
    },
};

#[derive(Default)]
struct SessionInner {
    snapshot: SessionSnapshot,
    cancel: Option<CancellationToken>,
    generation: u64,
}

/// Holds the single in-flight generation job and what callers may see of it.
///
/// A new submission is rejected while a job is submitted or polling. Starting
/// after a terminal state discards the previous job.
#[derive(Clone)]
pub struct GenerationSession {
    client: JobClient,
    inner: Arc<RwLock<SessionInner>>,
}

impl GenerationSession {
    pub fn new(client: JobClient) -> Self {
        Self {
            client,
            inner: Arc::new(RwLock::new(SessionInner::default())),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Must be called from within a tokio runtime.
    pub fn start(
        &self,
        credential: Credential,
        request: GenerationRequest,
    ) -> Result<SessionSnapshot, GenerationError> {
        let cancel = CancellationToken::new();

        let (generation, snapshot) = {
            let mut inner = self.write();
            if inner.snapshot.state.is_in_flight() {
                return Err(GenerationError::InFlight);
            }

            inner.generation += 1;
            inner.snapshot = SessionSnapshot::submitted();
            inner.cancel = Some(cancel.clone());

            (inner.generation, inner.snapshot.clone())
        };

        let session = self.clone();
        tokio::spawn(async move {
            session.run(generation, credential, request, cancel).await;
        });

        Ok(snapshot)
    }

    /// Cancels the in-flight job, if any.
    pub fn cancel(&self) -> SessionSnapshot {
        let mut inner = self.write();

        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
            inner.snapshot.fail(&GenerationError::Canceled);
            tracing::info!("generation canceled");
        }

        inner.snapshot.clone()
    }

    async fn run(
        &self,
        generation: u64,
        credential: Credential,
        request: GenerationRequest,
        cancel: CancellationToken,
    ) {
        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            scheduler = %request.scheduler,
            num_outputs = request.num_outputs,
            "generation started"
        );

        let result = self
            .client
            .run_with_progress(&credential, &request, &cancel, |progress| {
                self.update(generation, |snapshot| snapshot.apply(&progress));
            })
            .await;

        match &result {
            Ok(images) => tracing::info!(%request_id, images = images.len(), "generation completed"),
            Err(e) => tracing::error!(%request_id, kind = ?e.kind(), "generation failed: {}", e),
        }

        self.update(generation, |snapshot| match result {
            Ok(images) => snapshot.complete(images),
            Err(e) => snapshot.fail(&e),
        });
    }

    fn update(&self, generation: u64, apply: impl FnOnce(&mut SessionSnapshot)) {
        let mut inner = self.write();
        if inner.generation != generation {
            return;
        }

        apply(&mut inner.snapshot);
        if inner.snapshot.state.is_terminal() {
            inner.cancel = None;
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
