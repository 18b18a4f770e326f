use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::types::BadgeDescriptor;

static FORMAT: OnceLock<OutputFormat> = OnceLock::new();
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let _ = FORMAT.set(format);
}

pub fn format() -> OutputFormat {
    FORMAT.get().copied().unwrap_or_default()
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

#[derive(Tabled)]
struct BadgeRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Link")]
    link: String,
}

impl From<&BadgeDescriptor> for BadgeRow {
    fn from(badge: &BadgeDescriptor) -> Self {
        Self {
            label: badge.label.clone(),
            message: badge_colored(&badge.message, &badge.color),
            color: badge.color.clone(),
            link: badge.link.first().cloned().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Print a badge descriptor in the selected format
pub fn print_badge(badge: &BadgeDescriptor) {
    match format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(badge).unwrap_or_default());
        }
        OutputFormat::Compact => println!("{}", compact_line(badge)),
        OutputFormat::Table => {
            let table = Table::new([BadgeRow::from(badge)])
                .with(Style::rounded())
                .to_string();
            println!("{table}");
        }
    }
}

fn compact_line(badge: &BadgeDescriptor) -> String {
    format!(
        "{}: {}",
        badge.label,
        badge_colored(&badge.message, &badge.color)
    )
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if matches!(format(), OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let mut table = Table::new(rows);
        let table = match format() {
            OutputFormat::Compact => table.with(Style::blank()).to_string(),
            _ => table.with(Style::rounded()).to_string(),
        };
        println!("{table}");
    }
}

/// Print a message (skipped when quiet, or prints simple object for JSON)
pub fn print_message(message: &str) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    if matches!(format(), OutputFormat::Json) {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Color text the way a badge renderer would color its message slot.
pub fn badge_colored(text: &str, color: &str) -> String {
    if let Ok((r, g, b)) = parse_hex_color(color) {
        return text.truecolor(r, g, b).to_string();
    }

    match color {
        "brightgreen" | "success" => text.bright_green().to_string(),
        "green" => text.green().to_string(),
        "yellowgreen" | "yellow" => text.yellow().to_string(),
        "orange" | "important" => text.truecolor(0xfe, 0x7d, 0x37).to_string(),
        "red" | "critical" => text.red().to_string(),
        "blue" | "informational" => text.blue().to_string(),
        "lightgrey" | "grey" | "gray" | "inactive" => text.bright_black().to_string(),
        _ => text.to_string(),
    }
}

fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8), ()> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| ())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| ())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| ())?;
    Ok((r, g, b))
}
