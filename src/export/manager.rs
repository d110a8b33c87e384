use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task;

use crate::draw::Scene;
use crate::export::{
    file::{ArtifactSaver, FileArtifactSaver},
    pipeline::export_async,
    types::{ExportArtifact, ExportError, ExportOutcome, ExportRequest, ExportStatus},
};

struct ExportJob {
    scene: Scene,
    request: ExportRequest,
    save_dir: Option<PathBuf>,
    generation: u64,
}

impl ExportJob {
    fn is_superseded(&self, current: &AtomicU64) -> bool {
        self.generation < current.load(Ordering::SeqCst)
    }
}

/// Serialized background export queue.
///
/// Requests are processed one at a time by a single task, so an export starts
/// only after the previous one settles.
#[derive(Clone)]
pub struct ExportManager {
    request_tx: mpsc::UnboundedSender<ExportJob>,
    status: Arc<Mutex<ExportStatus>>,
    last_result: Arc<Mutex<Option<ExportOutcome>>>,
    generation: Arc<AtomicU64>,
}

impl ExportManager {
    /// Create a new export manager that saves with [`FileArtifactSaver`].
    ///
    /// This spawns the background task on `runtime_handle`.
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_saver(runtime_handle, Arc::new(FileArtifactSaver))
    }

    /// Create an export manager with a custom saver (useful for testing).
    pub fn with_saver(
        runtime_handle: &tokio::runtime::Handle,
        saver: Arc<dyn ArtifactSaver>,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ExportJob>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let last_result = Arc::new(Mutex::new(None));
        let generation = Arc::new(AtomicU64::new(0));

        let status_clone = status.clone();
        let result_clone = last_result.clone();
        let generation_clone = generation.clone();

        runtime_handle.spawn(async move {
            while let Some(job) = request_rx.recv().await {
                if job.is_superseded(&generation_clone) {
                    log::debug!("Skipping superseded export: {}", job.request.file_name);
                    continue;
                }

                log::debug!("Processing export request: {}", job.request.file_name);
                *status_clone.lock().await = ExportStatus::InProgress;

                let outcome = match run_job(&job, saver.clone(), &generation_clone).await {
                    Ok(Some(saved)) if !job.is_superseded(&generation_clone) => Ok(saved),
                    Err(e) if !job.is_superseded(&generation_clone) => Err(e),
                    _ => {
                        log::info!("Discarding result of cancelled export: {}", job.request.file_name);
                        *status_clone.lock().await = ExportStatus::Idle;
                        continue;
                    }
                };

                match outcome {
                    Ok((artifact, saved_path)) => {
                        log::info!("Export successful: {}", artifact.file_name);
                        *status_clone.lock().await = ExportStatus::Success;
                        *result_clone.lock().await = Some(ExportOutcome::Success {
                            artifact,
                            saved_path,
                        });
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Export failed: {}", error_message);
                        *status_clone.lock().await = ExportStatus::Failed(error_message.clone());
                        *result_clone.lock().await = Some(ExportOutcome::Failed(error_message));
                    }
                }
            }
        });

        Self {
            request_tx,
            status,
            last_result,
            generation,
        }
    }

    /// Queue an export. Non-blocking; the work happens in the background.
    ///
    /// When `save_dir` is set the artifact is also written there.
    pub fn request_export(
        &self,
        scene: Scene,
        request: ExportRequest,
        save_dir: Option<PathBuf>,
    ) -> Result<(), ExportError> {
        let job = ExportJob {
            scene,
            request,
            save_dir,
            generation: self.generation.load(Ordering::SeqCst),
        };

        self.request_tx
            .send(job)
            .map_err(|_| ExportError::Task("Export manager not running".to_string()))
    }

    /// Discard every queued or in-flight export.
    ///
    /// A job still rendering is neither saved nor published; one already saving
    /// finishes its write but its result is dropped.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Get the current export status.
    pub async fn get_status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    /// Get the result of the last export and clear it.
    pub async fn take_result(&self) -> Option<ExportOutcome> {
        self.last_result.lock().await.take()
    }

    /// Try to get the result without waiting (non-blocking).
    pub fn try_take_result(&self) -> Option<ExportOutcome> {
        self.last_result.try_lock().ok().and_then(|mut r| r.take())
    }

    /// Reset status to idle.
    pub async fn reset(&self) {
        *self.status.lock().await = ExportStatus::Idle;
    }
}

/// Renders `job` and saves it when it has a directory.
///
/// Returns `None` without touching the disk when the job was cancelled while
/// rendering.
async fn run_job(
    job: &ExportJob,
    saver: Arc<dyn ArtifactSaver>,
    generation: &AtomicU64,
) -> Result<Option<(ExportArtifact, Option<PathBuf>)>, ExportError> {
    let artifact = export_async(job.scene.clone(), job.request.clone()).await?;
    if job.is_superseded(generation) {
        return Ok(None);
    }

    let Some(dir) = job.save_dir.clone() else {
        return Ok(Some((artifact, None)));
    };

    let (artifact, path) = task::spawn_blocking(move || {
        let path = saver.save(&artifact, &dir);
        (artifact, path)
    })
    .await
    .map_err(|e| ExportError::Task(format!("Save task failed: {}", e)))?;

    Ok(Some((artifact, Some(path?))))
}

#[cfg(test)]
impl ExportManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<ExportJob>();
        drop(rx);
        Self {
            request_tx: tx,
            status: Arc::new(Mutex::new(ExportStatus::Idle)),
            last_result: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;
    use crate::draw::{CanvasSpec, PixelRatio, Shape};
    use crate::export::ExportFormat;
    use std::path::Path;
    use std::sync::Mutex as StdMutex;
    use tokio::time::{Duration, sleep};

    #[derive(Default)]
    struct RecordingSaver {
        saved: StdMutex<Vec<String>>,
        fail: bool,
    }

    impl ArtifactSaver for RecordingSaver {
        fn save(&self, artifact: &ExportArtifact, directory: &Path) -> Result<PathBuf, ExportError> {
            if self.fail {
                return Err(ExportError::Io(std::io::Error::other("disk full")));
            }
            self.saved.lock().unwrap().push(artifact.file_name.clone());
            Ok(directory.join(&artifact.file_name))
        }
    }

    fn scene() -> Scene {
        let canvas = CanvasSpec::new(200, 100, PixelRatio::X1);
        let mut scene = Scene::new(canvas);
        scene.push(Shape::Polyline {
            points: vec![(20.0, 50.0), (180.0, 50.0)],
            color: BLACK,
            width: 3.0,
            opacity: 1.0,
            tension: 0.0,
        });
        scene
    }

    fn request(name: &str) -> ExportRequest {
        ExportRequest::new(ExportFormat::Png, scene().canvas, name)
    }

    async fn wait_for_result(manager: &ExportManager) -> ExportOutcome {
        for _ in 0..200 {
            if let Some(outcome) = manager.take_result().await {
                return outcome;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("export did not finish");
    }

    #[tokio::test]
    async fn manager_starts_idle() {
        let manager = ExportManager::new(&tokio::runtime::Handle::current());
        assert_eq!(manager.get_status().await, ExportStatus::Idle);
    }

    #[tokio::test]
    async fn export_and_save_succeeds() {
        let saver = Arc::new(RecordingSaver::default());
        let manager = ExportManager::with_saver(&tokio::runtime::Handle::current(), saver.clone());

        manager
            .request_export(scene(), request("a.png"), Some(PathBuf::from("/tmp/out")))
            .unwrap();

        match wait_for_result(&manager).await {
            ExportOutcome::Success {
                artifact,
                saved_path,
            } => {
                assert_eq!(artifact.file_name, "a.png");
                assert_eq!(saved_path, Some(PathBuf::from("/tmp/out/a.png")));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(manager.get_status().await, ExportStatus::Success);
        assert_eq!(saver.saved.lock().unwrap().as_slice(), ["a.png"]);
    }

    #[tokio::test]
    async fn save_failure_is_reported() {
        let saver = Arc::new(RecordingSaver {
            fail: true,
            ..RecordingSaver::default()
        });
        let manager = ExportManager::with_saver(&tokio::runtime::Handle::current(), saver);

        manager
            .request_export(scene(), request("b.png"), Some(PathBuf::from("/tmp/out")))
            .unwrap();

        match wait_for_result(&manager).await {
            ExportOutcome::Failed(message) => assert!(message.contains("disk full")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(matches!(manager.get_status().await, ExportStatus::Failed(_)));
    }

    #[tokio::test]
    async fn empty_scene_fails_without_saving() {
        let saver = Arc::new(RecordingSaver::default());
        let manager = ExportManager::with_saver(&tokio::runtime::Handle::current(), saver.clone());
        let empty = Scene::new(scene().canvas);

        manager
            .request_export(empty, request("c.png"), Some(PathBuf::from("/tmp/out")))
            .unwrap();

        assert!(matches!(
            wait_for_result(&manager).await,
            ExportOutcome::Failed(_)
        ));
        assert!(saver.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_requests_are_discarded() {
        let saver = Arc::new(RecordingSaver::default());
        let manager = ExportManager::with_saver(&tokio::runtime::Handle::current(), saver.clone());

        manager
            .request_export(scene(), request("old.png"), Some(PathBuf::from("/tmp/out")))
            .unwrap();
        manager.cancel_pending();
        manager
            .request_export(scene(), request("new.png"), Some(PathBuf::from("/tmp/out")))
            .unwrap();

        match wait_for_result(&manager).await {
            ExportOutcome::Success { artifact, .. } => assert_eq!(artifact.file_name, "new.png"),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(manager.try_take_result().is_none());
        assert_eq!(saver.saved.lock().unwrap().as_slice(), ["new.png"]);
    }

    #[tokio::test]
    async fn job_cancelled_while_rendering_is_not_saved() {
        let saver = Arc::new(RecordingSaver::default());
        let job = ExportJob {
            scene: scene(),
            request: request("old.png"),
            save_dir: Some(PathBuf::from("/tmp/out")),
            generation: 0,
        };
        // cancel_pending() ran after the job was dequeued
        let generation = AtomicU64::new(1);

        let result = run_job(&job, saver.clone(), &generation).await.unwrap();
        assert!(result.is_none());
        assert!(saver.saved.lock().unwrap().is_empty());

        let current = AtomicU64::new(0);
        let result = run_job(&job, saver.clone(), &current).await.unwrap();
        assert!(matches!(result, Some((_, Some(_)))));
        assert_eq!(saver.saved.lock().unwrap().as_slice(), ["old.png"]);
    }

    #[tokio::test]
    async fn closed_channel_rejects_requests() {
        let manager = ExportManager::with_closed_channel_for_test();
        let err = manager
            .request_export(scene(), request("d.png"), None)
            .unwrap_err();
        assert!(matches!(err, ExportError::Task(_)));
    }
}
