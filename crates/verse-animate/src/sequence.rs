use crate::interpolator::{AnimationHandle, Interpolator, Playback};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use verse_model::{AnimationSpec, AnimationSpecError, CardStyle, EasingKind};

/// Card starts this many pixels below its resting place.
pub const CARD_OFFSET_PX: f64 = 20.0;
pub const CARD_ENTRANCE_MS: u64 = 600;

pub const BALL_REST_SCALE: f64 = 1.0;
pub const BALL_PEAK_SCALE: f64 = 1.2;
/// Length of each half of the pulse; also the delay before the second half starts.
pub const BALL_PHASE_MS: u64 = 200;

/// One step of a sequence: a tween started `start_at` after the sequence begins.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    pub start_at: Duration,
    pub spec: AnimationSpec,
}

/// Run several tweens against one frame sink, each started at its own offset.
///
/// Starts are deferred timers, not completions: a phase begins at its offset
/// whether or not the previous one has delivered its last frame. Cancelling
/// the returned handle stops the current phase and any not yet started.
pub fn run_sequence<F>(interp: &Interpolator, phases: Vec<Phase>, on_frame: F) -> AnimationHandle
where
    F: Fn(f64) + Send + Sync + 'static,
{
    let Some((runtime, backend)) = interp.acquire() else {
        return AnimationHandle::inert();
    };

    let on_frame = Arc::new(on_frame);
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    let interp = interp.clone();
    let spawner = runtime.clone();

    let task = runtime.spawn(async move {
        let start = Instant::now();
        let mut running = Vec::with_capacity(phases.len());

        for phase in phases {
            sleep_until(start + phase.start_at).await;
            if flag.load(Ordering::Acquire) {
                break;
            }
            let sink = Arc::clone(&on_frame);
            running.push(interp.spawn_frames(
                &spawner,
                Arc::clone(&backend),
                phase.spec,
                move |v| sink(v),
                Arc::clone(&flag),
            ));
        }

        let mut outcome = Playback::Completed;
        for task in running {
            match task.await {
                Ok(Playback::Completed) => {}
                Ok(other) => outcome = other,
                Err(e) => {
                    tracing::error!(error = %e, "Animation phase failed");
                    outcome = Playback::Cancelled;
                }
            }
        }
        if flag.load(Ordering::Acquire) {
            outcome = Playback::Cancelled;
        }
        outcome
    });

    AnimationHandle::from_parts(cancelled, task)
}

/// Fade the verse card in while sliding it up into place.
pub fn card_entrance<F>(interp: &Interpolator, apply: F) -> AnimationHandle
where
    F: Fn(CardStyle) + Send + Sync + 'static,
{
    let spec = match AnimationSpec::from_millis(0.0, 1.0, CARD_ENTRANCE_MS, EasingKind::EaseOut) {
        Ok(spec) => spec,
        Err(e) => return rejected("card entrance", e),
    };
    run_sequence(
        interp,
        vec![Phase { start_at: Duration::ZERO, spec }],
        move |p| {
            apply(CardStyle {
                offset_y: CARD_OFFSET_PX * (1.0 - p),
                opacity: p,
            })
        },
    )
}

/// Grow the ball to its peak scale and shrink it back.
pub fn ball_pulse<F>(interp: &Interpolator, apply: F) -> AnimationHandle
where
    F: Fn(f64) + Send + Sync + 'static,
{
    let up = AnimationSpec::from_millis(
        BALL_REST_SCALE,
        BALL_PEAK_SCALE,
        BALL_PHASE_MS,
        EasingKind::EaseInOut,
    );
    let down = AnimationSpec::from_millis(
        BALL_PEAK_SCALE,
        BALL_REST_SCALE,
        BALL_PHASE_MS,
        EasingKind::EaseOut,
    );
    let (up, down) = match (up, down) {
        (Ok(up), Ok(down)) => (up, down),
        (Err(e), _) | (_, Err(e)) => return rejected("ball pulse", e),
    };
    run_sequence(
        interp,
        vec![
            Phase { start_at: Duration::ZERO, spec: up },
            Phase { start_at: Duration::from_millis(BALL_PHASE_MS), spec: down },
        ],
        apply,
    )
}

fn rejected(name: &str, e: AnimationSpecError) -> AnimationHandle {
    tracing::error!(animation = name, error = %e, "Invalid animation spec");
    AnimationHandle::inert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn test_card_entrance_settles_in_place() {
        let styles = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&styles);

        let handle = card_entrance(&Interpolator::builtin(), move |s| sink.lock().unwrap().push(s));
        assert_eq!(handle.finished().await, Playback::Completed);

        let styles = styles.lock().unwrap();
        assert_eq!(styles[0], CardStyle { offset_y: CARD_OFFSET_PX, opacity: 0.0 });
        assert_eq!(*styles.last().unwrap(), CardStyle { offset_y: 0.0, opacity: 1.0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_ball_pulse_phases_do_not_overlap() {
        let start = Instant::now();
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);

        let handle = ball_pulse(&Interpolator::builtin(), move |v| {
            sink.lock().unwrap().push((start.elapsed(), v))
        });
        assert_eq!(handle.finished().await, Playback::Completed);

        let frames = frames.lock().unwrap();
        let peak = frames
            .iter()
            .position(|(_, v)| *v == BALL_PEAK_SCALE)
            .expect("up phase reaches the peak");

        // Everything up to the peak belongs to the rising half.
        for pair in frames[..=peak].windows(2) {
            assert!(pair[1].1 >= pair[0].1);
        }
        // The falling half starts from the peak at the phase boundary.
        let (at, v) = frames[peak + 1];
        assert_eq!(at, Duration::from_millis(BALL_PHASE_MS));
        assert_eq!(v, BALL_PEAK_SCALE);
        for pair in frames[peak + 1..].windows(2) {
            assert!(pair[1].1 <= pair[0].1);
        }
        assert_eq!(
            frames.last().unwrap(),
            &(Duration::from_millis(2 * BALL_PHASE_MS), BALL_REST_SCALE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_skips_second_phase() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&frames);

        let handle = ball_pulse(&Interpolator::builtin(), move |v| sink.lock().unwrap().push(v));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
        assert_eq!(handle.finished().await, Playback::Cancelled);

        let frames = frames.lock().unwrap();
        assert!(frames.iter().all(|v| *v < BALL_PEAK_SCALE));
    }

    #[tokio::test]
    async fn test_disabled_sequence_is_skipped() {
        let handle = ball_pulse(&Interpolator::disabled(), |_| panic!("no frames expected"));
        assert_eq!(handle.finished().await, Playback::Skipped);
    }
}
