//! Terminal front end: stdin/stdout REPL over the onboarding manager.

use std::fmt::Write;
use std::sync::Arc;

use futures::{StreamExt, stream};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{CommandError, Result};
use crate::forms::{DocumentLibrary, GameStudioForm, StepSubmission};
use crate::onboarding::manager::{OnboardingManager, View};
use crate::onboarding::step::StepId;
use crate::onboarding::track::Track;
use crate::render::{render_documents, render_view};

pub const HELP: &str = "\
Commands:
  token <code>        enter your access token
  logout              forget the stored access token
  status              show the current screen
  enter <legal|lab>   open an onboarding section
  open <step-id>      open a step of the current section
  download <doc-id>   download a document (documents step)
  submit [json]       submit the open step's form
  studio <json>       submit the game studio profile
  back                close the open step, or return to the sections
  reload              re-read saved progress
  help                show this list
  quit                exit";

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Token(String),
    Logout,
    Status,
    Enter(Track),
    Open(StepId),
    Download(String),
    /// Form body as JSON. The documents step accepts an empty body.
    Submit(Option<String>),
    Studio(String),
    Back,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "token" => Self::Token(required(rest, "token", "an access code")?.to_string()),
            "logout" => Self::Logout,
            "status" => Self::Status,
            "enter" => {
                let raw = required(rest, "enter", "a section (legal or lab)")?;
                let track = raw
                    .parse::<Track>()
                    .map_err(|_| CommandError::InvalidArgument {
                        what: "section",
                        value: raw.to_string(),
                    })?;
                Self::Enter(track)
            }
            "open" => {
                let raw = required(rest, "open", "a step id")?;
                let step = raw
                    .parse::<StepId>()
                    .map_err(|_| CommandError::InvalidArgument {
                        what: "step",
                        value: raw.to_string(),
                    })?;
                Self::Open(step)
            }
            "download" => Self::Download(required(rest, "download", "a document id")?.to_string()),
            "submit" => Self::Submit((!rest.is_empty()).then(|| rest.to_string())),
            "studio" => Self::Studio(required(rest, "studio", "a JSON form body")?.to_string()),
            "back" => Self::Back,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "/quit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> std::result::Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Interactive session over one manager.
pub struct Cli {
    manager: Arc<OnboardingManager>,
    /// Downloads made while the documents step is open.
    documents: DocumentLibrary,
}

impl Cli {
    pub fn new(manager: Arc<OnboardingManager>) -> Self {
        Self {
            manager,
            documents: DocumentLibrary::new(),
        }
    }

    /// Run one command and produce the text to show.
    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
            Command::Status => render_view(&self.manager.view().await),
            Command::Token(code) => {
                let view = self.manager.unlock(&code).await?;
                format!("Access granted.\n\n{}", render_view(&view))
            }
            Command::Logout => render_view(&self.manager.logout().await?),
            Command::Reload => {
                self.documents = DocumentLibrary::new();
                render_view(&self.manager.reload().await?)
            }
            Command::Enter(track) => {
                self.manager.enter_track(track).await?;
                self.documents = DocumentLibrary::new();
                render_view(&self.manager.view().await)
            }
            Command::Open(step) => {
                self.manager.select_step(step).await?;
                let mut text = render_view(&self.manager.view().await);
                if step == StepId::Documents {
                    text.push('\n');
                    text.push_str(&render_documents(&self.documents));
                }
                text
            }
            Command::Back => {
                if self.open_step().await.is_some() {
                    self.manager.close_step().await?;
                } else {
                    self.manager.leave_track().await?;
                }
                render_view(&self.manager.view().await)
            }
            Command::Download(id) => {
                if self.open_step().await != Some(StepId::Documents) {
                    return Err(CommandError::DocumentsNotOpen.into());
                }
                let doc = self.documents.download(&id)?;
                format!(
                    "Downloaded {} ({})\n{}",
                    doc.title,
                    doc.size,
                    render_documents(&self.documents)
                )
            }
            Command::Submit(body) => self.submit(body).await?,
            Command::Studio(body) => {
                let form: GameStudioForm = serde_json::from_str(&body)
                    .map_err(|e| CommandError::InvalidBody(e.to_string()))?;
                let receipt = self.manager.submit_studio_profile(&form).await?;
                format!(
                    "Game studio profile saved (reference {}).",
                    receipt.id
                )
            }
        };
        Ok(Flow::Continue(text))
    }

    async fn submit(&mut self, body: Option<String>) -> Result<String> {
        let step = self
            .open_step()
            .await
            .ok_or(crate::error::NavigationError::NoOpenStep)?;

        let submission = match (step, body) {
            (StepId::Documents, None) => StepSubmission::Documents(self.documents.clone()),
            (_, None) => {
                return Err(CommandError::MissingArgument {
                    command: "submit",
                    what: "a JSON form body",
                }
                .into());
            }
            (step, Some(body)) => StepSubmission::from_json(step, &body)
                .map_err(|e| CommandError::InvalidBody(e.to_string()))?,
        };

        let confirmation = match &submission {
            StepSubmission::BookDemo(booking) => booking.confirmation(),
            _ => None,
        };

        let outcome = self.manager.submit(submission).await?;
        let mut text = format!("{step} completed.");
        if let Some(confirmation) = confirmation {
            let _ = write!(text, "\n{confirmation}");
        }
        if let Some(message) = outcome.message() {
            let _ = write!(text, "\n{message}");
        }
        let _ = write!(text, "\n\n{}", render_view(&self.manager.view().await));
        Ok(text)
    }

    async fn open_step(&self) -> Option<StepId> {
        match self.manager.view().await {
            View::Track(view) => view.current,
            _ => None,
        }
    }

    /// Read commands from stdin until EOF or `quit`.
    pub async fn run(mut self) -> std::io::Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = Box::pin(stream::unfold(reader.lines(), |mut lines| async move {
            match lines.next_line().await {
                Ok(Some(line)) => Some((line, lines)),
                Ok(None) => None,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    None
                }
            }
        }));

        println!("{}\n", render_view(&self.manager.view().await));
        eprint!("> ");

        while let Some(line) = lines.next().await {
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    eprint!("> ");
                    continue;
                }
                Err(e) => {
                    eprintln!("{e}");
                    eprint!("> ");
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue(text)) => println!("\n{text}\n"),
                Ok(Flow::Quit) => break,
                Err(e) => eprintln!("{e}"),
            }
            eprint!("> ");
        }
        Ok(())
    }
}
