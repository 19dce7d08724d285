//! # Output Rendering
//!
//! Everything returns a `String` and takes a `use_color` flag; the `print_*`
//! wrappers decide color from whether stdout is a terminal. Column widths are
//! measured with `unicode-width` so accented and wide characters line up.

use agenda::commands::{CmdMessage, MessageLevel};
use agenda::error::Result;
use agenda::model::{Contact, Field};
use colored::{ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may get before it is truncated.
pub const CELL_WIDTH: usize = 28;
const COLUMN_GAP: &str = "  ";
const TABLE_COLUMNS: [Field; 5] = [
    Field::FamilyName,
    Field::GivenName,
    Field::Age,
    Field::Phone,
    Field::Email,
];

pub fn render_contact_table(contacts: &[Contact], use_color: bool) -> String {
    if contacts.is_empty() {
        return "No contacts found.\n".to_string();
    }

    let ids: Vec<String> = contacts.iter().map(|c| c.id().to_string()).collect();
    let id_width = ids.iter().map(|id| id.width()).max().unwrap_or(0).max(2);

    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|contact| {
            TABLE_COLUMNS
                .iter()
                .map(|field| truncate_to_width(contact.field(*field), CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = TABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(field.label().width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = pad_left("ID", id_width);
    for (field, width) in TABLE_COLUMNS.iter().zip(&widths) {
        header.push_str(COLUMN_GAP);
        header.push_str(&pad_right(field.label(), *width));
    }

    let mut out = String::new();
    out.push_str(&paint(header.trim_end(), use_color, |s| s.bold()));
    out.push('\n');

    for (id, row) in ids.iter().zip(&rows) {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(COLUMN_GAP);
            line.push_str(&pad_right(cell, *width));
        }
        out.push_str(&paint(&pad_left(id, id_width), use_color, |s| s.yellow()));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Every field of every contact, one block per contact.
pub fn render_contact_cards(contacts: &[Contact], use_color: bool) -> String {
    let label_width = Field::ALL
        .iter()
        .map(|f| f.label().width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, contact) in contacts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {}\n",
            paint(&contact.id().to_string(), use_color, |s| s.yellow()),
            paint(&contact.display_name(), use_color, |s| s.bold())
        ));
        for field in Field::ALL {
            let label = pad_right(&format!("{}:", field.label()), label_width + 1);
            out.push_str(&format!(
                "  {} {}\n",
                paint(&label, use_color, |s| s.dimmed()),
                contact.field(field)
            ));
        }
    }
    out
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    messages
        .iter()
        .map(|message| {
            let content = message.content.as_str();
            let styled = match message.level {
                MessageLevel::Info => paint(content, use_color, |s| s.dimmed()),
                MessageLevel::Success => paint(content, use_color, |s| s.green()),
                MessageLevel::Warning => paint(content, use_color, |s| s.yellow()),
                MessageLevel::Error => paint(content, use_color, |s| s.red()),
            };
            format!("{}\n", styled)
        })
        .collect()
}

pub fn render_json(contacts: &[Contact]) -> Result<String> {
    Ok(serde_json::to_string_pretty(contacts)?)
}

pub fn print_contact_table(contacts: &[Contact], use_color: bool) {
    print!("{}", render_contact_table(contacts, use_color));
}

pub fn print_contact_cards(contacts: &[Contact], use_color: bool) {
    print!("{}", render_contact_cards(contacts, use_color));
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    print!("{}", render_messages(messages, use_color));
}

fn paint(text: &str, use_color: bool, style: fn(&str) -> ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
