// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output and color utilities for consistent terminal formatting
//!
//! Provides shared color functions respecting NO_COLOR environment variable.

use colored::Colorize;

/// Check if colors should be used (respects NO_COLOR env var)
pub fn use_colors() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Colorize rank marker (yellow bold)
pub fn colorize_rank(rank: usize, use_color: bool) -> String {
    let text = format!("#{}", rank);
    if use_color {
        text.yellow().bold().to_string()
    } else {
        text
    }
}

/// Colorize similarity score (green when positive, red when negative)
pub fn colorize_similarity(similarity: f32, use_color: bool) -> String {
    let text = format!("{:.3}", similarity);
    if !use_color {
        return text;
    }
    if similarity < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Colorize document title (bold)
pub fn colorize_title(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize document id (cyan)
pub fn colorize_id(text: &str, use_color: bool) -> String {
    if use_color {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}

/// Colorize secondary text (dimmed)
pub fn colorize_dim(text: &str, use_color: bool) -> String {
    if use_color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Shorten `text` to at most `max_chars` characters, appending "..." when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
