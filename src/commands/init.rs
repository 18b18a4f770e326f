use std::io::{self, Write};

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{BadgeError, Result};
use crate::output;

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            output::print_message("Aborted.");
            return Ok(());
        }
    }

    println!("gh-project-badge Configuration");
    println!("==============================\n");

    let token = prompt(
        "Enter a GitHub token with read:org scope (create one at https://github.com/settings/tokens): ",
    )?;
    if token.is_empty() {
        return Err(BadgeError::MissingToken);
    }

    let api_url = prompt(&format!("API base URL [{DEFAULT_API_URL}]: "))?;

    let config = Config {
        token: Some(token),
        api_url: (!api_url.is_empty()).then_some(api_url),
        ..Config::default()
    };
    config.save(&config_path)?;

    output::print_message(&format!("\nConfig saved to {}", config_path.display()));
    Ok(())
}
