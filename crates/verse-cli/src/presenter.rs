use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use verse_model::DisplayState;

/// Width of the ball meter at rest scale.
const METER_WIDTH: f64 = 20.0;

/// Something to put on the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A complete line.
    Line(String),
    /// A line redrawn in place.
    Meter(String),
}

/// Lines that turn the terminal from `prev` into `next`.
///
/// Card and status repaint only when their text changes. Card offset and
/// opacity are not drawn; the ball is shown as a meter while it is off rest.
pub fn diff(prev: &DisplayState, next: &DisplayState) -> Vec<Paint> {
    let mut paints = Vec::new();

    let verse_changed =
        prev.text != next.text || prev.reference != next.reference || prev.version != next.version;
    if verse_changed && next.has_verse() {
        paints.extend(card_lines(next).into_iter().map(Paint::Line));
    }

    if prev.status != next.status && !next.status.is_empty() {
        paints.push(Paint::Line(format!("» {}", next.status)));
    }

    if prev.ball_scale != next.ball_scale {
        paints.push(Paint::Meter(ball_meter(next.ball_scale)));
    }

    paints
}

fn card_lines(state: &DisplayState) -> Vec<String> {
    let mut lines = vec![String::new()];
    lines.extend(state.text.lines().map(|l| format!("  {l}")));
    if !state.reference.is_empty() {
        lines.push(format!("    — {}", state.reference));
    }
    if !state.version.is_empty() {
        lines.push(format!("    {}", state.version));
    }
    lines.push(String::new());
    lines
}

/// Horizontal bar whose length follows the ball's scale.
pub fn ball_meter(scale: f64) -> String {
    let cells = (METER_WIDTH * scale).round().max(0.0) as usize;
    format!("({}) {:.2}x", "●".repeat(cells), scale)
}

/// Repaint `out` whenever the display changes, until the surface is dropped.
///
/// The current state is painted first, so changes made before the first
/// poll are not lost. `out` is shared with the input prompt; it is locked
/// once per repaint.
pub async fn present<W: Write>(mut rx: watch::Receiver<DisplayState>, out: Arc<Mutex<W>>) {
    let mut painter = Painter::default();
    let mut last = DisplayState::default();

    loop {
        let state = rx.borrow_and_update().clone();
        let painted = match out.lock() {
            Ok(mut out) => painter.paint(&mut *out, &last, &state),
            Err(_) => {
                tracing::warn!("Terminal writer poisoned; stopping display");
                return;
            }
        };
        if let Err(e) = painted {
            tracing::warn!(error = %e, "Terminal write failed; stopping display");
            return;
        }
        last = state;

        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Write the input prompt through the same writer the display uses.
pub fn prompt<W: Write>(out: &Mutex<W>, text: &str) -> io::Result<()> {
    let mut out = out
        .lock()
        .map_err(|_| io::Error::other("terminal writer poisoned"))?;
    write!(out, "{text}")?;
    out.flush()
}

#[derive(Debug, Default)]
struct Painter {
    meter_open: bool,
}

impl Painter {
    fn paint<W: Write>(
        &mut self,
        out: &mut W,
        last: &DisplayState,
        state: &DisplayState,
    ) -> io::Result<()> {
        for paint in diff(last, state) {
            match paint {
                Paint::Line(line) => {
                    let prefix = if self.meter_open { "\n" } else { "" };
                    self.meter_open = false;
                    writeln!(out, "{prefix}{line}")?;
                }
                Paint::Meter(meter) => {
                    self.meter_open = true;
                    write!(out, "\r\x1b[2K{meter}")?;
                }
            }
        }
        if self.meter_open && state.ball_scale == 1.0 {
            writeln!(out)?;
            self.meter_open = false;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse_state() -> DisplayState {
        DisplayState {
            text: "For God so loved...".into(),
            reference: "John 3:16".into(),
            version: "Version: KJV".into(),
            ..DisplayState::default()
        }
    }

    #[test]
    fn test_new_verse_paints_card() {
        let paints = diff(&DisplayState::default(), &verse_state());
        assert_eq!(
            paints,
            vec![
                Paint::Line(String::new()),
                Paint::Line("  For God so loved...".into()),
                Paint::Line("    — John 3:16".into()),
                Paint::Line("    Version: KJV".into()),
                Paint::Line(String::new()),
            ]
        );
    }

    #[test]
    fn test_status_paint() {
        let next = DisplayState {
            status: "Loading verse...".into(),
            ..DisplayState::default()
        };
        assert_eq!(
            diff(&DisplayState::default(), &next),
            vec![Paint::Line("» Loading verse...".into())]
        );
        // Cleared status paints nothing.
        assert!(diff(&next, &DisplayState::default()).is_empty());
    }

    #[test]
    fn test_card_animation_paints_nothing() {
        let mut next = verse_state();
        next.card.opacity = 0.5;
        next.card.offset_y = 10.0;
        assert!(diff(&verse_state(), &next).is_empty());
    }

    #[test]
    fn test_ball_meter() {
        assert_eq!(ball_meter(1.0), format!("({}) 1.00x", "●".repeat(20)));
        assert_eq!(ball_meter(1.2), format!("({}) 1.20x", "●".repeat(24)));
    }

    fn shared_buffer() -> Arc<Mutex<Vec<u8>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn contents(buf: &Mutex<Vec<u8>>) -> String {
        String::from_utf8(buf.lock().unwrap().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_present_writes_until_surface_dropped() {
        let (tx, rx) = watch::channel(DisplayState::default());
        let buf = shared_buffer();
        let writer = tokio::spawn(present(rx, Arc::clone(&buf)));

        tx.send_modify(|s| s.status = "Something went wrong. Please try again.".into());
        tokio::task::yield_now().await;
        drop(tx);

        writer.await.unwrap();
        assert!(contents(&buf).contains("» Something went wrong. Please try again."));
    }

    #[tokio::test]
    async fn test_present_paints_state_set_before_start() {
        let (tx, rx) = watch::channel(DisplayState::default());
        tx.send_modify(|s| s.status = "Loading verse...".into());
        drop(tx);

        let buf = shared_buffer();
        present(rx, Arc::clone(&buf)).await;
        assert_eq!(contents(&buf), "» Loading verse...\n");
    }

    #[test]
    fn test_prompt_shares_display_writer() {
        let buf = shared_buffer();
        let mut painter = Painter::default();
        let status = DisplayState {
            status: "Loading verse...".into(),
            ..DisplayState::default()
        };

        prompt(&buf, "> ").unwrap();
        painter
            .paint(&mut *buf.lock().unwrap(), &DisplayState::default(), &status)
            .unwrap();
        prompt(&buf, "> ").unwrap();
        assert_eq!(contents(&buf), "> » Loading verse...\n> ");
    }
}
