//! Interactive menu.
//!
//! Re-prompts after every command until the user exits, input ends or
//! Ctrl-C arrives. Only fatal errors leave the loop early.

use crate::cli::commands::{lookup, StackCommand, COMMAND_TABLE};
use crate::controller::Controller;
use crate::error::StackError;
use crate::probe::HttpProbe;
use crate::runner::CommandRunner;
use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;

/// What the user picked at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Run(StackCommand),
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if matches!(input, "0" | "q" | "quit" | "exit") {
            return Some(MenuChoice::Exit);
        }
        lookup(input)
            .and_then(|entry| StackCommand::from_name(entry.name))
            .map(MenuChoice::Run)
    }
}

pub fn format_menu() -> String {
    let mut menu = format!("\n{}\n", "LLM monitoring stack".bold());
    for entry in COMMAND_TABLE.iter() {
        menu.push_str(&format!("  {}) {}\n", entry.key, entry.description));
    }
    menu.push_str("  0) Exit\n");
    menu
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Line source for the menu prompt.
#[async_trait]
pub trait MenuInput: Send {
    /// Next line without its terminator, `None` at end of input.
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[async_trait]
impl<I> MenuInput for Lines<I>
where
    I: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

/// Terminal input read on a dedicated thread.
///
/// The reader thread is detached, so a read still blocked on the terminal
/// never holds up shutdown after Ctrl-C.
pub struct StdinLines {
    rx: mpsc::Receiver<io::Result<String>>,
}

impl StdinLines {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

#[async_trait]
impl MenuInput for StdinLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.rx.recv().await.transpose()
    }
}

/// Read one line, or `None` on end of input or Ctrl-C.
async fn read_line<M: MenuInput>(input: &mut M) -> Result<Option<String>, StackError> {
    tokio::select! {
        line = input.next_line() => Ok(line?),
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(None)
        }
    }
}

/// Run the menu loop over `input` until exit.
pub async fn run_menu<R, P, M>(controller: &Controller<R, P>, mut input: M) -> Result<(), StackError>
where
    R: CommandRunner,
    P: HttpProbe,
    M: MenuInput,
{

    loop {
        print!("{}", format_menu());
        prompt("Select an option: ");

        let Some(line) = read_line(&mut input).await? else {
            return Ok(());
        };

        let command = match MenuChoice::parse(&line) {
            Some(MenuChoice::Exit) => return Ok(()),
            Some(MenuChoice::Run(command)) => command,
            None => {
                println!("{} Invalid option: {}", "✗".red(), line.trim());
                continue;
            }
        };

        let command = match command {
            StackCommand::Logs { .. } => {
                prompt("Service to follow (empty for all): ");
                let Some(service) = read_line(&mut input).await? else {
                    return Ok(());
                };
                let service = service.trim();
                StackCommand::Logs {
                    service: (!service.is_empty()).then(|| service.to_string()),
                }
            }
            command if command.is_destructive() => {
                println!(
                    "{} This stops the stack and deletes all of its data volumes.",
                    "WARNING!".yellow()
                );
                prompt("Are you sure you want to continue? [y/N] ");
                let Some(answer) = read_line(&mut input).await? else {
                    return Ok(());
                };
                if !answer.trim().eq_ignore_ascii_case("y") {
                    println!("Aborted.");
                    continue;
                }
                command
            }
            command => command,
        };

        match controller.execute(&command).await {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }
}
