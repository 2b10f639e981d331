use anyhow::Result;
use colored::Colorize;

use registro_application::ConfiguratorChoices;
use registro_application::boundary::CONFIG_UNAVAILABLE;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    show_session_selector: bool,
    ask_company: bool,
    ask_phone: bool,
    primary_color: Option<String>,
) -> Result<()> {
    let choices = ConfiguratorChoices {
        show_session_selector,
        ask_company,
        ask_phone,
        primary_color,
    };
    let saved = ctx.configurator().save(&choices).await?;

    println!("{}", "Configuration saved".green());
    if let Some(form) = &saved.config {
        println!(
            "  sessions: {}",
            if form.show_session_selector { "shown" } else { "hidden" }
        );
        for field in &form.extra_fields {
            println!("  extra field: {} ({})", field.label, field.name);
        }
    }
    Ok(())
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    match ctx.configurator().current().await? {
        Some(config) => println!("{}", serde_json::to_string_pretty(&config)?),
        None => println!("{}", CONFIG_UNAVAILABLE.yellow()),
    }
    Ok(())
}
