// src/utils/console.rs

//! User-facing console output.
//!
//! Diagnostics go through the `log` facade; this module only prints what the
//! user asked to see (views, banners, summaries).

use std::sync::OnceLock;

/// Whether decorative output is suppressed
static QUIET: OnceLock<bool> = OnceLock::new();

/// Initialize console output. Only the first call has an effect.
pub fn init(quiet: bool) {
    let _ = QUIET.set(quiet);
}

fn decorated() -> bool {
    !QUIET.get().copied().unwrap_or(false)
}

/// Print a line of view content (always shown)
pub fn line(message: &str) {
    println!("{}", message);
}

/// Print several lines of view content
pub fn lines<S: AsRef<str>>(messages: &[S]) {
    for message in messages {
        line(message.as_ref());
    }
}

/// Print a header
pub fn header(title: &str) {
    if decorated() {
        let border = "═".repeat(60);
        println!("{}", border);
        println!("  {}", title);
        println!("{}", border);
    }
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    println!("    {}", message);
}

/// Print a success message
pub fn success(message: &str) {
    if decorated() {
        println!("✓ {}", message);
    }
}

/// Print an error banner (always shown, on stderr)
pub fn banner(message: &str) {
    let border = "!".repeat(60);
    eprintln!("{}", border);
    eprintln!("  {}", message);
    eprintln!("{}", border);
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    if decorated() {
        println!();
        println!("[SUMMARY] {}", title);
        for (key, value) in items {
            println!("    {}: {}", key, value);
        }
    }
}
