/// Visual state of the verse card animated by the entrance transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    /// Vertical offset in pixels; positive is below the resting position.
    pub offset_y: f64,
    pub opacity: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self { offset_y: 0.0, opacity: 1.0 }
    }
}

/// Everything the widget shows: four text regions and two animated properties.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub text: String,
    pub reference: String,
    pub version: String,
    pub status: String,
    pub card: CardStyle,
    pub ball_scale: f64,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            text: String::new(),
            reference: String::new(),
            version: String::new(),
            status: String::new(),
            card: CardStyle::default(),
            ball_scale: 1.0,
        }
    }
}

impl DisplayState {
    /// True when any of text, reference or version is non-empty.
    pub fn has_verse(&self) -> bool {
        !(self.text.is_empty() && self.reference.is_empty() && self.version.is_empty())
    }

    /// After a fetch settles exactly one of {status} and {verse regions} holds content.
    pub fn is_settled_exclusive(&self) -> bool {
        self.has_verse() != !self.status.is_empty()
    }

    pub fn clear_verse(&mut self) {
        self.text.clear();
        self.reference.clear();
        self.version.clear();
    }
}
