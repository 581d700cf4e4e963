//! # Wizard Command Handler
//!
//! Turns terminal input lines into operations on a `WizardSession` and renders the
//! current step after each of them.

use crate::application::launch::WizardSession;
use crate::application::navigation::NavigationError;
use crate::infrastructure::console::ConsoleHost;
use crate::strings::{messages, wizard as text};
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    Continue,
    Closed,
}

#[derive(Debug)]
pub struct StepReply {
    pub lines: Vec<String>,
    pub action: WizardAction,
}

impl StepReply {
    fn show(lines: Vec<String>) -> Self {
        Self {
            lines,
            action: WizardAction::Continue,
        }
    }

    fn closed() -> Self {
        Self {
            lines: Vec::new(),
            action: WizardAction::Closed,
        }
    }
}

/// Renders the session's current step.
pub async fn render(session: &WizardSession) -> String {
    let state = session.snapshot().await;
    let steps = session.navigator().steps();
    match steps.get(state.current_step) {
        Some(step) => text::format_wizard_step(
            step,
            step.order,
            steps.len(),
            session.navigator().label(step.id),
            &state,
        ),
        None => text::COMMANDS.to_string(),
    }
}

pub async fn handle_input(session: &WizardSession, input: &str) -> Result<StepReply> {
    let input = input.trim();
    let (command, argument) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        ".cancel" => {
            session.cancel().await;
            Ok(StepReply::closed())
        }
        ".finish" => finish(session).await,
        ".next" | "" => {
            let at_terminal = {
                let state = session.snapshot().await;
                session.navigator().steps().is_terminal(state.current_step)
            };
            if at_terminal {
                return finish(session).await;
            }
            match session.next().await {
                Ok(_) => Ok(StepReply::show(vec![render(session).await])),
                Err(NavigationError::Blocked(_)) => Ok(StepReply::show(vec![
                    text::INCOMPLETE.to_string(),
                    render(session).await,
                ])),
                Err(e) => Ok(refused(e)),
            }
        }
        ".back" => match session.back().await {
            Ok(_) => Ok(StepReply::show(vec![render(session).await])),
            Err(NavigationError::AtStart) => Ok(StepReply::show(vec![text::AT_START.to_string()])),
            Err(e) => Ok(refused(e)),
        },
        ".retry" => match session.retry().await {
            Ok(_) => Ok(StepReply::show(vec![render(session).await])),
            Err(e) => Ok(refused(e)),
        },
        ".help" => Ok(StepReply::show(vec![text::COMMANDS.to_string()])),
        "name" => {
            let value = argument.to_string();
            edit(session, move |s| s.name = value).await
        }
        "version" => {
            let value = argument.to_string();
            edit(session, move |s| s.version = value).await
        }
        "toggle" => match session.edit(|s| s.toggle(argument)).await {
            Ok(Some(enabled)) => Ok(StepReply::show(vec![
                messages::flag_toggled(argument, enabled),
                render(session).await,
            ])),
            Ok(None) => Ok(StepReply::show(vec![messages::unknown_flag(argument)])),
            Err(e) => Ok(refused(e)),
        },
        _ => Ok(StepReply::show(vec![
            messages::unknown_input(input),
            text::COMMANDS.to_string(),
        ])),
    }
}

async fn edit(
    session: &WizardSession,
    f: impl FnOnce(&mut crate::application::state::WizardState),
) -> Result<StepReply> {
    match session.edit(f).await {
        Ok(()) => Ok(StepReply::show(vec![render(session).await])),
        Err(e) => Ok(refused(e)),
    }
}

async fn finish(session: &WizardSession) -> Result<StepReply> {
    match session.finish().await {
        Ok(()) => Ok(StepReply::closed()),
        Err(e) => Ok(refused(e)),
    }
}

fn refused(err: NavigationError) -> StepReply {
    if err == NavigationError::SessionClosed {
        return StepReply::closed();
    }
    StepReply::show(vec![messages::not_allowed(&err.to_string())])
}

enum Event {
    Line(Option<String>),
    Settled,
}

/// Drives a session from stdin until it is finished or cancelled. End of input cancels.
pub async fn run(session: WizardSession, host: &ConsoleHost) -> Result<()> {
    tracing::debug!("Driving wizard session {} from stdin", session.id());
    drive(session, host, BufReader::new(tokio::io::stdin())).await
}

/// Input keeps being read while a submission runs, so `.cancel` works mid-flight.
/// The step is rendered again once the submission settles.
async fn drive<R>(session: WizardSession, host: &ConsoleHost, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    host.show(text::LOADING);
    host.show(&render(&session).await);
    host.show(text::COMMANDS);

    let mut lines = input.lines();
    loop {
        let pending = session.has_submission().await;
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            _ = session.settled(), if pending => Event::Settled,
        };

        match event {
            Event::Settled => host.show(&render(&session).await),
            Event::Line(Some(line)) => {
                let reply = handle_input(&session, &line).await?;
                for line in &reply.lines {
                    host.show(line);
                }
                if reply.action == WizardAction::Closed {
                    return Ok(());
                }
            }
            Event::Line(None) => {
                session.cancel().await;
                return Ok(());
            }
        }
    }
}
