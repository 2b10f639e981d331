//! Interactive form REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::mpsc as std_mpsc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;

use registro_application::{Mount, RegistrationForm, SubmitOutcome, Surface};
use registro_core::form::FieldKey;

use super::register::select_session;
use crate::context::AppContext;
use crate::render::TerminalSurface;

const COMMANDS: [&str; 10] = [
    "name", "email", "session", "set", "blur", "submit", "clear", "show", "help", "quit",
];

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormCommand {
    Name(String),
    Email(String),
    Session(String),
    Set(String, String),
    Blur(FieldKey),
    Submit,
    Clear,
    Show,
    Help,
    Quit,
}

impl FormCommand {
    /// Values are kept exactly as typed after the command word.
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
        let arg = rest.trim();

        match word {
            "name" => Ok(FormCommand::Name(rest.to_string())),
            "email" => Ok(FormCommand::Email(rest.to_string())),
            "session" if !arg.is_empty() => Ok(FormCommand::Session(arg.to_string())),
            "session" => Err("usage: session <number|name>".to_string()),
            "set" => match arg.split_once(' ') {
                Some((field, value)) => Ok(FormCommand::Set(field.to_string(), value.to_string())),
                None if !arg.is_empty() => Ok(FormCommand::Set(arg.to_string(), String::new())),
                None => Err("usage: set <field> <value>".to_string()),
            },
            "blur" if !arg.is_empty() => Ok(FormCommand::Blur(FieldKey::parse(arg))),
            "blur" => Err("usage: blur <field>".to_string()),
            "submit" => Ok(FormCommand::Submit),
            "clear" => Ok(FormCommand::Clear),
            "show" => Ok(FormCommand::Show),
            "help" | "?" => Ok(FormCommand::Help),
            "quit" | "exit" => Ok(FormCommand::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn render(form: &RegistrationForm) -> String {
    TerminalSurface.render(&form.view())
}

/// Prints the visible error of `key`, or nothing when it is valid.
fn report_field(form: &RegistrationForm, key: &FieldKey) {
    if let Some(error) = form.visible_error(key) {
        println!("{}", error.red());
    }
}

async fn execute(form: &mut RegistrationForm, command: FormCommand) -> Result<Flow> {
    match command {
        FormCommand::Name(value) => {
            form.set_name(value);
            form.blur(FieldKey::Name);
            report_field(form, &FieldKey::Name);
        }
        FormCommand::Email(value) => {
            form.set_email(value);
            form.blur(FieldKey::Email);
            report_field(form, &FieldKey::Email);
        }
        FormCommand::Session(raw) => {
            let selected = select_session(form, &raw)?;
            form.blur(FieldKey::Sessions);
            let state = if selected { "selected" } else { "deselected" };
            println!("{}", format!("session {}", state).bright_black());
            report_field(form, &FieldKey::Sessions);
        }
        FormCommand::Set(field, value) => {
            form.set_extra(&field, value)?;
            form.blur(FieldKey::Extra(field));
        }
        FormCommand::Blur(key) => {
            form.blur(key.clone());
            report_field(form, &key);
        }
        FormCommand::Submit => match form.submit().await? {
            SubmitOutcome::Accepted(record) => {
                if let Some(toast) = form.toast() {
                    println!("{}", toast.green().bold());
                }
                println!("{}", format!("id: {}", record.id).bright_black());
            }
            SubmitOutcome::Rejected { focus } => {
                println!("{}", render(form));
                println!("{}", format!("Fix '{}' first.", focus).yellow());
            }
        },
        FormCommand::Clear => {
            form.clear();
            println!("{}", "Form cleared".bright_black());
        }
        FormCommand::Show => println!("{}", render(form)),
        FormCommand::Help => print_help(),
        FormCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_help() {
    let lines = [
        ("name <value>", "set the attendee name"),
        ("email <value>", "set the email address"),
        ("session <n|name>", "toggle a session"),
        ("set <field> <value>", "fill in an extra field"),
        ("blur <field>", "mark a field as visited"),
        ("submit", "send the registration"),
        ("clear", "reset the form"),
        ("show", "print the form"),
        ("quit", "leave"),
    ];
    for (usage, what) in lines {
        println!("  {:<22}{}", usage.bright_cyan(), what.bright_black());
    }
}

/// Completion and hints for the command words.
#[derive(Clone)]
struct FormHelper;

impl Helper for FormHelper {}

impl Completer for FormHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for FormHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((word, rest)) if COMMANDS.contains(&word) => {
                Owned(format!("{} {}", word.bright_cyan(), rest))
            }
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for FormHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for FormHelper {}

/// Terminal prompt driven from a dedicated thread.
///
/// `readline` blocks until the user presses enter; running it off the
/// runtime keeps the toast timer firing while the prompt waits.
struct LineReader {
    prompts: std_mpsc::Sender<String>,
    lines: mpsc::UnboundedReceiver<rustyline::Result<String>>,
}

impl LineReader {
    /// Builds the reader with `make` on the prompt thread and calls it once
    /// per [`LineReader::read`].
    fn spawn<F, R>(make: F) -> Self
    where
        F: FnOnce() -> rustyline::Result<R> + Send + 'static,
        R: FnMut(&str) -> rustyline::Result<String>,
    {
        let (prompts, requests) = std_mpsc::channel::<String>();
        let (replies, lines) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            let mut read = match make() {
                Ok(read) => read,
                Err(e) => {
                    let _ = replies.send(Err(e));
                    return;
                }
            };
            while let Ok(prompt) = requests.recv() {
                if replies.send(read(&prompt)).is_err() {
                    break;
                }
            }
        });

        Self { prompts, lines }
    }

    fn terminal() -> Self {
        Self::spawn(|| {
            let mut rl = Editor::<FormHelper, DefaultHistory>::new()?;
            rl.set_helper(Some(FormHelper));
            Ok(move |prompt: &str| -> rustyline::Result<String> {
                let line = rl.readline(prompt)?;
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(&line);
                }
                Ok(line)
            })
        })
    }

    async fn read(&mut self, prompt: &str) -> rustyline::Result<String> {
        // A failed send means the thread is gone; its last reply is still queued.
        let _ = self.prompts.send(prompt.to_string());
        self.lines.recv().await.unwrap_or(Err(ReadlineError::Eof))
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mount = ctx.host().mount().await;
    println!("{}", mount.render(&TerminalSurface));
    let mut form = match mount {
        Mount::Ready(form) => form,
        Mount::Unavailable(_) => return Ok(()),
    };

    let mut reader = LineReader::terminal();

    println!();
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());

    loop {
        match reader.read("registro> ").await {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let command = match FormCommand::parse(&line) {
                    Ok(command) => command,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        continue;
                    }
                };

                match execute(&mut form, command).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{}", format!("Error: {:#}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_raw_values() {
        assert_eq!(
            FormCommand::parse("email  ana@x.com "),
            Ok(FormCommand::Email(" ana@x.com ".to_string()))
        );
        assert_eq!(FormCommand::parse("name"), Ok(FormCommand::Name(String::new())));
        assert_eq!(
            FormCommand::parse("set empresa ACME Corp"),
            Ok(FormCommand::Set("empresa".to_string(), "ACME Corp".to_string()))
        );
        assert_eq!(
            FormCommand::parse("blur sessions"),
            Ok(FormCommand::Blur(FieldKey::Sessions))
        );
        assert_eq!(FormCommand::parse("quit"), Ok(FormCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_incomplete_commands() {
        assert!(FormCommand::parse("session").is_err());
        assert!(FormCommand::parse("blur ").is_err());
        assert!(FormCommand::parse("set").is_err());
        assert!(FormCommand::parse("dance").is_err());
    }

    #[tokio::test]
    async fn test_execute_session_flow() {
        let ctx = AppContext::ephemeral().unwrap();
        let mut form = ctx.host().mount().await.into_form().unwrap();

        for line in ["name Ana", "email ana@x.com", "session 3"] {
            let command = FormCommand::parse(line).unwrap();
            assert_eq!(execute(&mut form, command).await.unwrap(), Flow::Continue);
        }
        assert_eq!(form.state().name(), "Ana");
        assert!(!form.submit_disabled());

        let flow = execute(&mut form, FormCommand::Submit).await.unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(form.state().name(), "");
        assert!(form.toast().is_some());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_toast_clears_while_prompt_waits() {
        use registro_application::ToastNotifier;
        use std::time::Duration;

        let toast = ToastNotifier::new(Duration::from_millis(20));
        let mut reader = LineReader::spawn(|| {
            Ok(|_: &str| -> rustyline::Result<String> {
                std::thread::sleep(Duration::from_millis(300));
                Ok("show".to_string())
            })
        });

        toast.show("Registration completed.");
        assert_eq!(reader.read("registro> ").await.unwrap(), "show");
        assert_eq!(toast.current(), None);
    }

    #[tokio::test]
    async fn test_reader_reports_setup_failure_then_eof() {
        let mut reader = LineReader::spawn(|| {
            Err::<fn(&str) -> rustyline::Result<String>, _>(ReadlineError::Interrupted)
        });

        assert!(matches!(
            reader.read("> ").await,
            Err(ReadlineError::Interrupted)
        ));
        assert!(matches!(reader.read("> ").await, Err(ReadlineError::Eof)));
    }

    #[tokio::test]
    async fn test_unknown_extra_field_is_an_error() {
        let ctx = AppContext::ephemeral().unwrap();
        let mut form = ctx.host().mount().await.into_form().unwrap();

        let command = FormCommand::parse("set empresa ACME").unwrap();
        assert!(execute(&mut form, command).await.is_err());
    }
}
