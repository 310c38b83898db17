use crate::surface::DisplaySurface;
use verse_model::{CardStyle, Outcome, VerseQuery};

/// Where fetch results end up.
pub trait Render: Send + Sync {
    /// Show the in-flight status for `query`. Verse regions are left as they are.
    fn loading(&self, query: &VerseQuery);

    /// Show the terminal outcome of a fetch.
    fn render(&self, outcome: &Outcome);

    /// Apply one frame of the card entrance.
    fn card_frame(&self, card: CardStyle);
}

/// Renders into a [`DisplaySurface`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    surface: DisplaySurface,
}

impl Renderer {
    pub fn new(surface: DisplaySurface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }
}

impl Render for Renderer {
    fn loading(&self, query: &VerseQuery) {
        let message = query.loading_message();
        self.surface.update(|s| s.status = message.to_string());
    }

    fn render(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Verse(verse) => {
                tracing::debug!(reference = %verse.reference, "Rendering verse");
                self.surface.update(|s| {
                    s.text = verse.text.clone();
                    s.reference = verse.reference.clone();
                    s.version = verse.version_line();
                    s.status.clear();
                });
            }
            Outcome::Failed(error) => {
                tracing::debug!(error = ?error, "Rendering status");
                self.surface.update(|s| {
                    s.clear_verse();
                    s.status = error.to_string();
                });
            }
        }
    }

    fn card_frame(&self, card: CardStyle) {
        self.surface.set_card(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verse_model::{ErrorState, VerseResult};

    fn kjv() -> VerseResult {
        VerseResult {
            text: "For God so loved...".into(),
            reference: "John 3:16".into(),
            version_label: "KJV".into(),
        }
    }

    #[test]
    fn test_render_verse() {
        let renderer = Renderer::default();
        renderer.loading(&VerseQuery::reference("John 3:16"));
        renderer.render(&Outcome::Verse(kjv()));

        let state = renderer.surface().snapshot();
        assert_eq!(state.text, "For God so loved...");
        assert_eq!(state.reference, "John 3:16");
        assert_eq!(state.version, "Version: KJV");
        assert_eq!(state.status, "");
        assert!(state.is_settled_exclusive());
    }

    #[test]
    fn test_render_verse_without_version() {
        let renderer = Renderer::default();
        let verse = VerseResult { version_label: String::new(), ..kjv() };
        renderer.render(&Outcome::Verse(verse));
        assert_eq!(renderer.surface().snapshot().version, "");
    }

    #[test]
    fn test_errors_clear_verse_regions() {
        let cases = [
            (ErrorState::EmptyInput, "Please type a reference like 'John 3:16'."),
            (ErrorState::NotFound, "Could not find that reference. Try another."),
            (ErrorState::NetworkFailure, "Something went wrong. Please try again."),
        ];
        for (error, message) in cases {
            let renderer = Renderer::default();
            renderer.render(&Outcome::Verse(kjv()));
            renderer.render(&Outcome::Failed(error));

            let state = renderer.surface().snapshot();
            assert_eq!(state.status, message);
            assert!(!state.has_verse(), "{error:?} left verse content");
            assert!(state.is_settled_exclusive());
        }
    }

    #[test]
    fn test_loading_keeps_verse() {
        let renderer = Renderer::default();
        renderer.render(&Outcome::Verse(kjv()));
        renderer.loading(&VerseQuery::Random);

        let state = renderer.surface().snapshot();
        assert_eq!(state.status, "Loading random verse...");
        assert_eq!(state.text, "For God so loved...");
    }
}
