use std::sync::Arc;
use tokio::sync::watch;
use verse_model::{CardStyle, DisplayState};

/// Shared, observable display state.
///
/// Writers (renderer, animations) mutate it in place; presenters subscribe
/// and repaint on change. The last write wins.
#[derive(Debug, Clone)]
pub struct DisplaySurface {
    tx: Arc<watch::Sender<DisplayState>>,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplayState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut DisplayState)) {
        self.tx.send_modify(f);
    }

    pub fn set_card(&self, card: CardStyle) {
        self.update(|s| s.card = card);
    }

    pub fn set_ball_scale(&self, scale: f64) {
        self.update(|s| s.ball_scale = scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let surface = DisplaySurface::new();
        let state = surface.snapshot();
        assert!(!state.has_verse());
        assert!(state.status.is_empty());
        assert_eq!(state.ball_scale, 1.0);
        assert_eq!(state.card, CardStyle::default());
    }

    #[test]
    fn test_update_without_subscribers() {
        let surface = DisplaySurface::new();
        surface.set_ball_scale(1.2);
        surface.set_card(CardStyle { offset_y: 20.0, opacity: 0.0 });
        let state = surface.snapshot();
        assert_eq!(state.ball_scale, 1.2);
        assert_eq!(state.card.offset_y, 20.0);
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let surface = DisplaySurface::new();
        let mut rx = surface.subscribe();
        assert!(!rx.has_changed().unwrap());
        surface.update(|s| s.status = "Loading verse...".into());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status, "Loading verse...");
    }

    #[test]
    fn test_clones_share_state() {
        let a = DisplaySurface::new();
        let b = a.clone();
        b.update(|s| s.text = "Jesus wept.".into());
        assert_eq!(a.snapshot().text, "Jesus wept.");
    }
}
