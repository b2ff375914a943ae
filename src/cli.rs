use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use vexdb::{vector::format_vector, MetricKind, Registry, ShellConfig};

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create a collection (no-op if it exists)
    Create { name: String },
    /// Drop a collection and all of its vectors
    Drop { name: String },
    /// List collection names
    Collections,
    /// Insert or replace a vector
    Add {
        collection: String,
        id: String,
        #[arg(required = true, allow_negative_numbers = true)]
        vector: Vec<f64>,
    },
    /// Replace a vector (inserts if absent)
    Update {
        collection: String,
        id: String,
        #[arg(required = true, allow_negative_numbers = true)]
        vector: Vec<f64>,
    },
    /// Delete a vector
    Delete { collection: String, id: String },
    /// Retrieve a vector by ID
    Get { collection: String, id: String },
    /// List all vectors of a collection
    List { collection: String },
    /// Show the vector count of a collection
    Count { collection: String },
    /// Find the most similar vectors
    Query {
        collection: String,
        #[arg(long)]
        metric: Option<MetricKind>,
        #[arg(long)]
        top_k: Option<usize>,
        #[arg(required = true, allow_negative_numbers = true)]
        vector: Vec<f64>,
    },
}

/// Parse a command from the words of one shell line
pub fn parse_command(input: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(input.split_whitespace()).map(|line| line.command)
}

/// Shell state: the registry plus output settings.
pub struct Session {
    registry: Registry,
    config: ShellConfig,
    json: bool,
}

impl Session {
    pub fn new(config: ShellConfig, json: bool) -> Session {
        Session { registry: Registry::new(), config, json }
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Create { name } => {
                let created = self.registry.create(&name);
                if self.json {
                    writeln!(out, "{}", json!({"collection": name, "created": created}))?;
                } else if created {
                    writeln!(out, "Created collection '{}'", name)?;
                } else {
                    writeln!(out, "Collection '{}' already exists", name)?;
                }
            }

            Command::Drop { name } => {
                let dropped = self.registry.delete(&name);
                if self.json {
                    writeln!(out, "{}", json!({"collection": name, "dropped": dropped}))?;
                } else if dropped {
                    writeln!(out, "Dropped collection '{}'", name)?;
                } else {
                    writeln!(out, "No collection named '{}'", name)?;
                }
            }

            Command::Collections => {
                let names = self.registry.names();
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&names)?)?;
                } else if names.is_empty() {
                    writeln!(out, "No collections")?;
                } else {
                    for name in names {
                        writeln!(out, "  {}", name)?;
                    }
                }
            }

            Command::Add { collection, id, vector }
            | Command::Update { collection, id, vector } => {
                self.registry.collection_mut(&collection)?.update(id.as_str(), vector)?;
                if self.json {
                    let stored = json!({"collection": collection, "id": id, "status": "stored"});
                    writeln!(out, "{}", stored)?;
                } else {
                    writeln!(out, "Stored '{}' in '{}'", id, collection)?;
                }
            }

            Command::Delete { collection, id } => {
                let deleted = self.registry.collection_mut(&collection)?.delete(&id);
                if self.json {
                    let report = json!({"collection": collection, "id": id, "deleted": deleted});
                    writeln!(out, "{}", report)?;
                } else if deleted {
                    writeln!(out, "Deleted '{}'", id)?;
                } else {
                    writeln!(out, "No vector '{}' in '{}'", id, collection)?;
                }
            }

            Command::Get { collection, id } => {
                let entry = self.registry.collection(&collection)?.entry(&id)?;
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&*entry)?)?;
                } else {
                    writeln!(out, "Vector '{}': {}", entry.id(), format_vector(entry.vector()))?;
                }
            }

            Command::List { collection } => {
                let collection = self.registry.collection(&collection)?;
                let mut entries: Vec<_> = collection.all_entries().values().collect();
                entries.sort_by(|a, b| a.id().cmp(b.id()));

                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&entries)?)?;
                } else if entries.is_empty() {
                    writeln!(out, "Collection '{}' is empty", collection.name())?;
                } else {
                    writeln!(out, "Stored vectors:")?;
                    for entry in &entries {
                        writeln!(out, "  {}: {}", entry.id(), format_vector(entry.vector()))?;
                    }
                    writeln!(out, "Total: {} vectors", entries.len())?;
                }
            }

            Command::Count { collection } => {
                let count = self.registry.collection(&collection)?.len();
                writeln!(out, "{}", count)?;
            }

            Command::Query { collection, metric, top_k, vector } => {
                let metric = metric.unwrap_or(self.config.default_metric);
                let top_k = top_k.unwrap_or(self.config.default_top_k);
                let hits = self
                    .registry
                    .collection(&collection)?
                    .query_scored(&vector, &metric, top_k)?;

                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&hits)?)?;
                } else if hits.is_empty() {
                    writeln!(out, "No results found")?;
                } else {
                    writeln!(out, "Top {} results ({}):", hits.len(), metric)?;
                    for (rank, hit) in hits.iter().enumerate() {
                        writeln!(out, "{}. ID: {}, Score: {:.4}, Vector: {}",
                            rank + 1, hit.id(), hit.score, format_vector(hit.entry.vector()))?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// REPL mode - interactive session over one registry
pub fn run_repl(session: &mut Session) -> Result<()> {
    println!("VexDB - Vector Collections");
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("vexdb> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            writeln!(stdout, "{}", Line::command().render_help())?;
            continue;
        }

        let command = match parse_command(input) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("{}", error);
                continue;
            }
        };

        if let Err(error) = session.execute(command, &mut stdout) {
            eprintln!("Error: {}", error);
        }
    }

    Ok(())
}
