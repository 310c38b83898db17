use verse_acquire::{Transport, VerseFetcher};
use verse_animate::{ball_pulse, card_entrance, AnimationHandle, Interpolator};
use verse_model::VerseQuery;
use verse_render::{DisplaySurface, Renderer};

/// A user trigger, decoded from one line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search trigger / Enter in the reference field. Carries the trimmed field value.
    Search(String),
    /// Random trigger.
    Random,
    /// Manual animate trigger: card entrance plus ball pulse.
    Animate,
    /// Click on the pulse ball.
    Pulse,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a reference (e.g. John 3:16) and press Enter to look it up.
  /random   fetch a random verse
  /animate  replay the card entrance and pulse the ball
  /pulse    pulse the ball
  /help     show this help
  /quit     exit";

/// Decode a line of input. Anything that is not a command is a reference.
pub fn parse_line(line: &str) -> Action {
    let trimmed = line.trim();
    match trimmed {
        "/random" => Action::Random,
        "/animate" => Action::Animate,
        "/pulse" => Action::Pulse,
        "/help" | "/?" => Action::Help,
        "/quit" | "/exit" => Action::Quit,
        _ => Action::Search(trimmed.to_string()),
    }
}

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The caller should show [`HELP`].
    Help,
    Quit,
}

/// Routes triggers to the fetcher and the animations.
pub struct Controller<T> {
    fetcher: VerseFetcher<T, Renderer>,
    interp: Interpolator,
    surface: DisplaySurface,
}

impl<T: Transport> Controller<T> {
    pub fn new(transport: T, interp: Interpolator, config: verse_acquire::FetchConfig) -> Self {
        let surface = DisplaySurface::new();
        let renderer = Renderer::new(surface.clone());
        let fetcher = VerseFetcher::new(transport, renderer, interp.clone(), config);
        Self { fetcher, interp, surface }
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    pub fn fetcher(&self) -> &VerseFetcher<T, Renderer> {
        &self.fetcher
    }

    /// Act on a trigger without waiting for network or animation.
    pub fn dispatch(&self, action: Action) -> Flow {
        match action {
            Action::Search(reference) => {
                self.fetcher.fetch(VerseQuery::Reference(reference));
            }
            Action::Random => {
                self.fetcher.fetch(VerseQuery::Random);
            }
            Action::Animate => {
                self.card_entrance();
                self.pulse();
            }
            Action::Pulse => {
                self.pulse();
            }
            Action::Help => return Flow::Help,
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn card_entrance(&self) -> AnimationHandle {
        let surface = self.surface.clone();
        card_entrance(&self.interp, move |card| surface.set_card(card))
    }

    fn pulse(&self) -> AnimationHandle {
        let surface = self.surface.clone();
        ball_pulse(&self.interp, move |scale| surface.set_ball_scale(scale))
    }
}
