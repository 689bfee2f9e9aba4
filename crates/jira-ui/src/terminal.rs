//! Terminal detection.

use crossterm::tty::IsTty;

/// Whether stdout is a terminal.
pub fn is_tty() -> bool {
    std::io::stdout().is_tty()
}

/// Whether stdin is a terminal, i.e. prompts can be answered.
pub fn is_interactive() -> bool {
    std::io::stdin().is_tty()
}

/// Whether output should be colored, following the `NO_COLOR`,
/// `CLICOLOR`, `CLICOLOR_FORCE` and `TERM=dumb` conventions before falling
/// back to TTY detection.
pub fn supports_color() -> bool {
    color_enabled(|name| std::env::var(name).ok(), is_tty())
}

fn color_enabled(var: impl Fn(&str) -> Option<String>, tty: bool) -> bool {
    if var("NO_COLOR").is_some()
        || var("CLICOLOR").as_deref() == Some("0")
        || var("TERM").as_deref() == Some("dumb")
    {
        return false;
    }
    var("CLICOLOR_FORCE").is_some() || tty
}
