use anyhow::{Context, Result, bail};
use colored::Colorize;

use registro_application::{RegistrationForm, Surface, SubmitOutcome};
use registro_core::form::FieldKey;

use crate::context::AppContext;
use crate::render::TerminalSurface;

/// Parses a `name=value` pair for `--field`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

/// Toggles a session given as a 1-based catalog number or an exact name.
pub fn select_session(form: &mut RegistrationForm, raw: &str) -> Result<bool> {
    let selected = match raw.trim().parse::<usize>() {
        Ok(index) => form.toggle_session_at(index),
        Err(_) => form.toggle_session(raw),
    };
    selected.with_context(|| format!("Cannot select session '{}'", raw))
}

pub async fn run(
    ctx: &AppContext,
    name: String,
    email: String,
    sessions: &[String],
    fields: Vec<(String, String)>,
) -> Result<()> {
    let mut form = match ctx.host().mount().await.into_form() {
        Ok(form) => form,
        Err(error) => {
            eprintln!("{}", TerminalSurface.render_fallback(&error));
            return Err(error.into());
        }
    };

    form.set_name(name);
    form.set_email(email);
    for session in sessions {
        select_session(&mut form, session)?;
    }
    for (field, value) in fields {
        form.set_extra(&field, value)?;
    }

    match form.submit().await? {
        SubmitOutcome::Accepted(record) => {
            if let Some(toast) = form.toast() {
                println!("{}", toast.green().bold());
            }
            println!("{}", record.id.bright_black());
            Ok(())
        }
        SubmitOutcome::Rejected { focus } => {
            for key in FieldKey::CORE {
                if let Some(error) = form.visible_error(&key) {
                    eprintln!("{}: {}", key, error.red());
                }
            }
            bail!("Registration rejected (check '{}')", focus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_core::registration::RegistrationRepository;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("empresa=ACME=1"),
            Ok(("empresa".to_string(), "ACME=1".to_string()))
        );
        assert_eq!(parse_field("telefono="), Ok(("telefono".to_string(), String::new())));
        assert!(parse_field("=x").is_err());
        assert!(parse_field("empresa").is_err());
    }

    #[tokio::test]
    async fn test_select_session_by_number_or_name() {
        let ctx = AppContext::ephemeral().unwrap();
        let mut form = ctx.host().mount().await.into_form().unwrap();

        assert!(select_session(&mut form, "1").unwrap());
        assert!(select_session(&mut form, "Iniciación a la Programación").unwrap());
        assert!(select_session(&mut form, "9").is_err());
        assert_eq!(
            form.state().sessions(),
            ["Seminario sobre IA", "Iniciación a la Programación"]
        );
    }

    #[tokio::test]
    async fn test_rejected_registration_is_an_error() {
        let ctx = AppContext::ephemeral().unwrap();
        let err = run(&ctx, "Ana".into(), "not-an-email".into(), &["1".to_string()], Vec::new())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("email"));
        assert!(ctx.registrations.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_registration_is_stored() {
        let ctx = AppContext::ephemeral().unwrap();
        run(&ctx, "Ana".into(), "ana@x.com".into(), &["2".to_string()], Vec::new())
            .await
            .unwrap();

        let stored = ctx.registrations.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].sessions, vec!["Taller de Programación Competitiva".to_string()]);
    }
}
