use colored::Colorize;
use std::env;
use std::io::{self, Write};

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineStatus {
    Created,
    Updated,
    Cancelled,
    Info,
}

impl LineStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            LineStatus::Created => "✨",
            LineStatus::Updated => "🔄",
            LineStatus::Cancelled => "⏭",
            LineStatus::Info => "💡",
        }
    }
}

pub fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

pub fn box_top(width: usize) -> String {
    format!("╔{}╗", "═".repeat(width.saturating_sub(2)))
}

pub fn box_bottom(width: usize) -> String {
    format!("╚{}╝", "═".repeat(width.saturating_sub(2)))
}

pub fn box_row(left: &str, content: &str, right: &str, width: usize) -> String {
    let content_len = content.chars().count();
    let padding = width.saturating_sub(2).saturating_sub(content_len);
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "{}{}{}{}{}",
        left,
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad),
        right
    )
}

pub fn render_box<W: Write>(
    out: &mut W,
    title: &str,
    subtitle: &str,
    style: BoxStyle,
) -> io::Result<()> {
    let width = effective_width()
        .max(title.chars().count() + 4)
        .max(subtitle.chars().count() + 4);
    let paint = |s: String, bold: bool| {
        let c = match style {
            BoxStyle::Info => s.bright_cyan(),
            BoxStyle::Warning => s.bright_yellow(),
            BoxStyle::Error => s.bright_red(),
        };
        if bold { c.bold() } else { c }
    };

    writeln!(out, "{}", paint(box_top(width), false))?;
    writeln!(out, "{}", paint(box_row("║", title, "║", width), true))?;
    if !subtitle.is_empty() {
        writeln!(out, "{}", paint(box_row("║", subtitle, "║", width), false))?;
    }
    writeln!(out, "{}", paint(box_bottom(width), false))
}

pub fn print_status_line<W: Write>(out: &mut W, message: &str, status: LineStatus) -> io::Result<()> {
    let icon = status.icon();
    let icon = match status {
        LineStatus::Created => icon.bright_green(),
        LineStatus::Updated => icon.bright_yellow(),
        LineStatus::Cancelled => icon.bright_black(),
        LineStatus::Info => icon.cyan(),
    };
    writeln!(out, "  {} {}", icon, message.bright_white())
}
