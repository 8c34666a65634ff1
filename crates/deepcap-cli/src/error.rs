use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("configuration is invalid") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the current settings with:");
        eprintln!("  {} deepcap config show", "$".dimmed());
    }

    if msg.contains("could not be saved") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Your settings were not changed. Check disk space and permissions,");
        eprintln!("  then try again.");
    }

    if msg.contains("connection refused") || msg.contains("network") || msg.contains("timed out") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check your internet connection and the configured endpoints:");
        eprintln!("  {} deepcap config show", "$".dimmed());
    }

    if msg.contains("401") || msg.contains("unauthorized") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Your access token may have expired. Pass a fresh one with:");
        eprintln!("  {} deepcap capture <url> --token <value>", "$".dimmed());
    }

    std::process::exit(1);
}
