//! REPL (Read-Eval-Print Loop) for the interactive session.
//!
//! Each typed line plays the role the speech front end has in the full
//! product: it goes into `submit` as recognized text. Slash commands
//! control the session.

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use vox_application::AssistantOrchestrator;
use vox_domain::Role;

/// Interactive assistant REPL
pub struct AssistantRepl {
    orchestrator: Arc<AssistantOrchestrator>,
}

impl AssistantRepl {
    pub fn new(orchestrator: Arc<AssistantOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("vox-pilot").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    // One request at a time from the console; the queue is
                    // for the speech front end, which submits while busy.
                    self.orchestrator.submit(line);
                    self.orchestrator.wait_idle().await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            VoxPilot - Voice Core            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type a question as you would speak it.");
        println!();
        println!("Commands:");
        println!("  /history  - Show the conversation so far");
        println!("  /reset    - Clear the conversation");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /history          - Show the conversation so far");
                println!("  /reset            - Clear the conversation");
                println!("  /help, /h, /?     - Show this help");
                println!("  /quit, /exit, /q  - Exit");
                println!();
                false
            }
            "/history" => {
                let history = self.orchestrator.history();
                if history.is_empty() {
                    println!("No conversation yet.");
                } else {
                    println!();
                    for turn in history {
                        let prefix = match turn.role {
                            Role::User => "you",
                            Role::Assistant => "vox",
                        };
                        println!("  [{prefix}] {}", turn.content);
                    }
                    println!();
                }
                false
            }
            "/reset" => {
                self.orchestrator.reset_session();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }
}
