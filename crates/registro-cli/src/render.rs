//! Terminal drawing of the form view.

use colored::{ColoredString, Colorize};

use registro_application::{FieldView, FormView, MountError, SessionSelectorView, Surface};
use registro_core::catalog::SessionTag;

pub struct TerminalSurface;

impl Surface for TerminalSurface {
    type Output = String;

    fn render(&self, view: &FormView) -> String {
        let mut out = Vec::new();

        out.push(accent(&format!("== {} ==", view.title), &view.primary_color).to_string());
        out.push(view.subtitle.bright_black().to_string());
        out.push(String::new());

        for field in &view.fields {
            push_field(&mut out, field, view.focus.as_deref());
        }
        if let Some(sessions) = &view.sessions {
            push_sessions(&mut out, sessions, view.focus.as_deref());
        }

        out.push(String::new());
        if view.submit_disabled {
            out.push("[submit disabled: fix the errors above]".bright_black().to_string());
        } else {
            out.push(accent("[submit ready]", &view.primary_color).to_string());
        }
        if let Some(toast) = &view.toast {
            out.push(format!("✔ {}", toast).green().bold().to_string());
        }

        out.join("\n")
    }

    fn render_fallback(&self, error: &MountError) -> String {
        error.to_string().red().to_string()
    }
}

fn required_marker(required: bool) -> String {
    if required {
        format!(" {}", "*".red())
    } else {
        String::new()
    }
}

fn focus_marker(id: &str, focus: Option<&str>) -> &'static str {
    if focus == Some(id) { "›" } else { " " }
}

fn push_field(out: &mut Vec<String>, field: &FieldView, focus: Option<&str>) {
    let value = if field.value.is_empty() {
        field
            .placeholder
            .unwrap_or("")
            .bright_black()
            .italic()
            .to_string()
    } else {
        field.value.clone()
    };

    out.push(format!(
        "{} {}{}: {}",
        focus_marker(&field.id, focus),
        field.label.bold(),
        required_marker(field.required),
        value
    ));
    push_hint(out, field.error, field.help);
}

fn push_sessions(out: &mut Vec<String>, sessions: &SessionSelectorView, focus: Option<&str>) {
    out.push(format!(
        "{} {}{}:",
        focus_marker("sessions", focus),
        sessions.legend.bold(),
        required_marker(true)
    ));
    for (i, card) in sessions.cards.iter().enumerate() {
        let check = if card.checked { "[x]" } else { "[ ]" };
        out.push(format!("    {} {}. {}", check, i + 1, tagged(card.label, card.tag)));
    }
    push_hint(out, sessions.error, sessions.help);
}

fn push_hint(out: &mut Vec<String>, error: Option<&str>, help: Option<&str>) {
    if let Some(error) = error {
        out.push(format!("      {}", error.red()));
    } else if let Some(help) = help {
        out.push(format!("      {}", help.bright_black()));
    }
}

fn tagged(label: &str, tag: SessionTag) -> ColoredString {
    match tag {
        SessionTag::Indigo => label.blue(),
        SessionTag::Emerald => label.green(),
        SessionTag::Amber => label.yellow(),
    }
}

/// Colors `text` with a `#rrggbb` accent, falling back to bold.
fn accent(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold(),
        None => text.bold(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
