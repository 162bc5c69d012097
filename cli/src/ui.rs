//! Terminal prompts and menus.

use std::io::{self, Write};

/// Prompt with an optional default; an empty reply takes the default.
pub fn prompt(label: &str, default: &str) -> io::Result<String> {
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} (default: {default}): ");
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let reply = line.trim();
    Ok(if reply.is_empty() {
        default.to_string()
    } else {
        reply.to_string()
    })
}

/// Numbered menu; returns the chosen option key. Unrecognized input
/// takes the default.
pub fn menu(label: &str, options: &[(&str, &str)], default: &str) -> io::Result<String> {
    println!("\n{label}");
    for (key, value) in options {
        println!("{key}. {value}");
    }
    let choice = prompt(&format!("Enter your choice (1-{})", options.len()), default)?;
    if options.iter().any(|(key, _)| *key == choice) {
        Ok(choice)
    } else {
        Ok(default.to_string())
    }
}
