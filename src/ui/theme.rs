use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// What a piece of CLI output is saying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Done,
    Failed,
    Caution,
    Label,
    Aside,
}

/// Styles for status lines. Success output goes to stdout and problems to
/// stderr, so each stream gets colored on its own.
#[derive(Debug, Clone)]
pub struct Theme {
    stdout_colors: bool,
    stderr_colors: bool,
}

impl Theme {
    pub fn detect() -> Self {
        Self {
            stdout_colors: console::Term::stdout().is_term(),
            stderr_colors: console::Term::stderr().is_term(),
        }
    }

    pub fn plain() -> Self {
        Self { stdout_colors: false, stderr_colors: false }
    }

    pub fn style(&self, tone: Tone) -> Style {
        let colored = match tone {
            Tone::Failed | Tone::Caution => self.stderr_colors,
            _ => self.stdout_colors,
        };
        if !colored {
            return Style::new();
        }

        match tone {
            Tone::Heading => Style::new().cyan().bold(),
            Tone::Done => Style::new().green().bold(),
            Tone::Failed => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Label => Style::new().magenta(),
            Tone::Aside => Style::new().dimmed(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
