//! Color styling and status messages.
//!
//! Uses the Ayu Dark palette. Messages go to stderr so that stdout stays
//! clean for `--json` output and for piping issue keys.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// Ayu Dark palette
const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

const ICON_PASS: &str = "\u{2713}";
const ICON_WARN: &str = "\u{26A0}";
const ICON_FAIL: &str = "\u{2716}";
const ICON_INFO: &str = "\u{2139}";
const ICON_RUN: &str = "\u{25B6}";

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders text with warning (yellow) styling.
pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders an issue key in bold accent.
pub fn render_key(key: &str) -> String {
    color_bold_str(key, ACCENT)
}

/// Renders a workflow status name; done-like states are muted.
pub fn render_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "done" | "closed" | "resolved" => render_muted(status),
        "in progress" | "in review" => render_warn(status),
        _ => status.to_string(),
    }
}

/// Prints `✓ message` to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", color_str(ICON_PASS, PASS), message);
}

/// Prints `⚠ message` to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {}", color_str(ICON_WARN, WARN), render_warn(message));
}

/// Prints `✖ message` to stderr.
pub fn fail(message: &str) {
    eprintln!("{} {}", color_str(ICON_FAIL, FAIL), render_fail(message));
}

/// Prints `ℹ message` to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", color_str(ICON_INFO, ACCENT), message);
}

/// Prints `▶ message` to stderr, used for progress of script actions.
pub fn step(message: &str) {
    eprintln!("{} {}", color_str(ICON_RUN, ACCENT), render_bold(message));
}
