use owo_colors::OwoColorize;

/// Colored user-facing status lines. Colors are enabled only when the
/// target stream is a TTY.
fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

pub fn print_info(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Remediation hint printed under an error.
pub fn print_hint(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("  {} {}", "hint:".dimmed(), msg);
    } else {
        eprintln!("  hint: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line with no prefix, for primary output users may script against
/// (reports, hex dumps).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
