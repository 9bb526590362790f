//! Interactive session: one line in, one command out.

mod command;
mod render;

use crate::di::ResolverServices;
use command::Command;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const PROMPT: &str = "Enter a domain name or .exit > ";

pub struct Session {
    services: ResolverServices,
}

impl Session {
    pub fn new(services: ResolverServices) -> Self {
        Self { services }
    }

    /// Read commands from stdin until `.exit` or end of input.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}", PROMPT);
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match Command::parse(&line) {
                Command::Empty => {}
                Command::Exit => break,
                Command::List => self.list(),
                Command::Clear => {
                    self.services.clear_cache.execute();
                }
                Command::Remove(index) => self.remove(index),
                Command::Invalid(message) => println!("{}", message),
                Command::Lookup(domain) => self.lookup(&domain).await,
            }
        }

        Ok(())
    }

    pub async fn lookup(&self, domain: &str) {
        match self.services.lookup.execute(domain).await {
            Ok(outcome) => println!("{}", render::render_outcome(&outcome)),
            Err(err) => {
                warn!(domain = %domain, error = %err, "Lookup failed");
                println!("{}", render::render_failure(domain));
            }
        }
    }

    fn list(&self) {
        let entries = self.services.list_cache.execute();
        debug!(entries = entries.len(), "Listing cache");
        for entry in entries {
            println!("{}", entry);
        }
    }

    fn remove(&self, index: usize) {
        if let Err(err) = self.services.remove_cache.execute(index) {
            println!("Error: {}", err);
        }
    }
}
