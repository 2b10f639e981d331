use anyhow::Result;
use colored::Colorize;

use registro_core::registration::RegistrationRepository;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext, json: bool) -> Result<()> {
    let records = ctx.registrations.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No registrations".bright_black());
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {} <{}>",
            record.submitted_at.bright_black(),
            record.name.bold(),
            record.email
        );
        for session in &record.sessions {
            println!("    - {}", session);
        }
    }
    println!("{}", format!("{} registration(s)", records.len()).bright_black());
    Ok(())
}
