use crate::backend::{BuiltinTween, TweenBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use verse_model::AnimationSpec;

/// Roughly one display refresh at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Every frame was delivered, ending with the exact target value.
    Completed,
    /// Stopped early through [`AnimationHandle::cancel`].
    Cancelled,
    /// Never started: no backend or no runtime.
    Skipped,
}

/// Drives eased frames on the tokio timer.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Interpolator {
    backend: Option<Arc<dyn TweenBackend>>,
    frame_interval: Duration,
}

impl std::fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpolator")
            .field("backend", &self.backend.is_some())
            .field("frame_interval", &self.frame_interval)
            .finish()
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Interpolator {
    pub fn new(backend: Option<Arc<dyn TweenBackend>>) -> Self {
        if backend.is_none() {
            tracing::warn!("No tween backend available; animations are disabled");
        }
        Self {
            backend,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn builtin() -> Self {
        Self::new(Some(Arc::new(BuiltinTween)))
    }

    /// An interpolator with no backend. Every `run` is a no-op.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Set the spacing between frames. Zero is raised to one millisecond.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Start delivering frames for `spec` to `on_frame` and return immediately.
    ///
    /// Frames arrive asynchronously on the current tokio runtime, progress
    /// monotonically from `spec.from()`, and end with exactly `spec.to()`
    /// once the duration has elapsed. Nothing is delivered after that.
    pub fn run<F>(&self, spec: AnimationSpec, on_frame: F) -> AnimationHandle
    where
        F: FnMut(f64) + Send + 'static,
    {
        let Some((runtime, backend)) = self.acquire() else {
            return AnimationHandle::inert();
        };
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(play(
            backend,
            spec,
            self.frame_interval,
            on_frame,
            Arc::clone(&cancelled),
        ));
        AnimationHandle {
            cancelled,
            task: Some(task),
        }
    }

    /// Backend and runtime, or `None` after logging why animation is unavailable.
    pub(crate) fn acquire(&self) -> Option<(Handle, Arc<dyn TweenBackend>)> {
        let Some(backend) = &self.backend else {
            tracing::warn!("Tween backend unavailable; skipping animation");
            return None;
        };
        match Handle::try_current() {
            Ok(runtime) => Some((runtime, Arc::clone(backend))),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "No async runtime for animation frames; skipping animation"
                );
                None
            }
        }
    }

    /// Spawn a frame loop sharing an existing cancellation flag.
    pub(crate) fn spawn_frames<F>(
        &self,
        runtime: &Handle,
        backend: Arc<dyn TweenBackend>,
        spec: AnimationSpec,
        on_frame: F,
        cancelled: Arc<AtomicBool>,
    ) -> JoinHandle<Playback>
    where
        F: FnMut(f64) + Send + 'static,
    {
        runtime.spawn(play(backend, spec, self.frame_interval, on_frame, cancelled))
    }
}

async fn play<F>(
    backend: Arc<dyn TweenBackend>,
    spec: AnimationSpec,
    frame_interval: Duration,
    mut on_frame: F,
    cancelled: Arc<AtomicBool>,
) -> Playback
where
    F: FnMut(f64),
{
    let ease = backend.easing(spec.easing());
    let start = Instant::now();
    let deadline = start + spec.duration();
    let total = spec.duration().as_secs_f64();
    let mut next = start;
    let mut frames = 0usize;

    loop {
        sleep_until(next).await;
        if cancelled.load(Ordering::Acquire) {
            tracing::trace!(frames, "Animation cancelled");
            return Playback::Cancelled;
        }

        let now = Instant::now();
        if now >= deadline {
            on_frame(spec.to());
            frames += 1;
            tracing::trace!(
                frames,
                duration_ms = spec.duration().as_millis() as u64,
                "Animation finished"
            );
            return Playback::Completed;
        }

        let progress = (now - start).as_secs_f64() / total;
        on_frame(backend.interpolate(spec.from(), spec.to(), ease(progress)));
        frames += 1;

        // Clamp the last step onto the deadline so the final frame lands on it.
        next = (next + frame_interval).min(deadline);
    }
}

/// Handle to a running animation.
///
/// Dropping the handle does not stop the animation.
#[derive(Debug)]
pub struct AnimationHandle {
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<Playback>>,
}

impl AnimationHandle {
    /// A handle for an animation that never started.
    pub fn inert() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub(crate) fn from_parts(cancelled: Arc<AtomicBool>, task: JoinHandle<Playback>) -> Self {
        Self {
            cancelled,
            task: Some(task),
        }
    }

    /// Stop before the next frame. Frames already delivered stay applied.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Wait for the animation to end.
    pub async fn finished(self) -> Playback {
        match self.task {
            None => Playback::Skipped,
            Some(task) => match task.await {
                Ok(playback) => playback,
                Err(e) => {
                    tracing::error!(error = %e, "Animation task failed");
                    Playback::Cancelled
                }
            },
        }
    }
}
