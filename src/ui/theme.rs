use ratatui::style::{Color, Modifier, Style};

/// Every style the renderer uses. Built once and handed to the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Characters already typed
    pub correct: Style,
    /// The character under the cursor while a mistake is outstanding
    pub error: Style,
    /// Characters not reached yet
    pub pending: Style,
    pub hint: Style,
    pub title: Style,
    pub wpm: Style,
    pub accuracy: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        Self {
            correct: Style::default().fg(Color::Indexed(42)),
            error: Style::default().fg(Color::Indexed(1)),
            pending: Style::default().fg(Color::Indexed(15)),
            hint: Style::default(),
            title: bold.fg(Color::Indexed(205)),
            wpm: bold.fg(Color::Indexed(42)),
            accuracy: bold.fg(Color::Indexed(39)),
            border: Style::default().fg(Color::Indexed(63)),
        }
    }
}

impl Theme {
    /// No colors at all, for terminals that can't or shouldn't show them
    pub fn plain() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        Self {
            correct: bold,
            error: Style::default().add_modifier(Modifier::REVERSED),
            pending: Style::default().add_modifier(Modifier::DIM),
            hint: Style::default().add_modifier(Modifier::ITALIC),
            title: bold,
            wpm: bold,
            accuracy: bold,
            border: Style::default(),
        }
    }
}
