use crate::ui::{theme, Icons, Tone};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().style(Tone::Heading)));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().style(Tone::Done)));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().style(Tone::Failed)));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().style(Tone::Caution)));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().style(Tone::Label)),
        label.style(theme().style(Tone::Aside)),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("{} {}", Icons::STATS, title.style(theme().style(Tone::Heading)));
}

/// `✨ Title (story-id)`
pub fn imported(title: &str, id: &str) {
    let id = format!("({})", id);
    println!("{} {} {}", Icons::NEW.style(theme().style(Tone::Done)), title, id.style(theme().style(Tone::Aside)));
}
