pub use anstream::println as aprintln;

/// Tokyo Night color palette
mod colors {
    pub const RESET: &str = "\x1b[0m";

    pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
    pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
    pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
    pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
    pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::TKN_GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::TKN_RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::TKN_YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::TKN_BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::TKN_CYAN, text)
}

/// Print plan lines colored by their leading marker (`+` add, `-` remove,
/// `~` change, `!` problem).
pub fn print_plan(title: &str, lines: &[String]) {
    aprintln!("{}", p_c(title));
    for line in lines {
        let painted = match line.chars().next() {
            Some('+') => p_g(line),
            Some('-') | Some('!') => p_r(line),
            Some('~') => p_y(line),
            _ => line.clone(),
        };
        aprintln!("  {}", painted);
    }
    aprintln!();
}

/// Ask for confirmation unless `force` is set. Returns false when declined.
pub fn confirm(force: bool, prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
}
