// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Talaria CLI entrypoint.
//!
//! Non-interactive driver for the composer core: import a document in any
//! accepted shape, then validate, preview, export, copy, send, or manage the
//! saved-message store. Validation gates `export`, `copy`, and `send`.

use std::error::Error;
use std::fmt;

use talaria::format::{build_complete_payload, build_simple_payload, build_webhook_payload};
use talaria::format::parse_document;
use talaria::model::{EditorSession, Message};
use talaria::render::render_preview;
use talaria::store::MessageStore;
use talaria::validate::check_message;
use talaria::webhook;

const DEFAULT_STORE_DIR: &str = "messages";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} export <input.json> [--simple] [--store <dir>] [--out <path>]\n  {program} copy <input.json> [--store <dir>]\n  {program} send <input.json> --webhook <url> [--username <name>] [--avatar <url>]\n  {program} preview <input.json>\n  {program} validate <input.json>\n  {program} save <input.json> --key <key> [--store <dir>]\n  {program} load <key> [--store <dir>]\n  {program} list [--store <dir>]\n  {program} delete <key> [--store <dir>]\n\n<input.json> accepts a bare embed, an embed array, an {{\"embeds\": [...]}}\nobject, or a {{\"messages\": [...]}} object.\n\n--store selects the saved-message directory (default `{DEFAULT_STORE_DIR}`).\n--simple exports the legacy embeds-only shape without actions or metadata."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Option<String>,
    positionals: Vec<String>,
    simple: bool,
    store_dir: Option<String>,
    out: Option<String>,
    webhook_url: Option<String>,
    username: Option<String>,
    avatar_url: Option<String>,
    key: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--simple" => {
                if options.simple {
                    return Err(());
                }
                options.simple = true;
            }
            "--store" => set_value(&mut options.store_dir, args.next())?,
            "--out" => set_value(&mut options.out, args.next())?,
            "--webhook" => set_value(&mut options.webhook_url, args.next())?,
            "--username" => set_value(&mut options.username, args.next())?,
            "--avatar" => set_value(&mut options.avatar_url, args.next())?,
            "--key" => set_value(&mut options.key, args.next())?,
            _ if arg.starts_with("--") => return Err(()),
            _ => {
                if options.command.is_none() {
                    options.command = Some(arg);
                } else {
                    options.positionals.push(arg);
                }
            }
        }
    }

    Ok(options)
}

fn set_value(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Export { input: String, simple: bool, store_dir: Option<String>, out: Option<String> },
    Copy { input: String, store_dir: Option<String> },
    Send { input: String, webhook_url: String, username: Option<String>, avatar_url: Option<String> },
    Preview { input: String },
    Validate { input: String },
    Save { input: String, key: String, store_dir: Option<String> },
    Load { key: String, store_dir: Option<String> },
    List { store_dir: Option<String> },
    Delete { key: String, store_dir: Option<String> },
}

impl Command {
    fn from_options(options: CliOptions) -> Result<Self, ()> {
        let CliOptions {
            command,
            positionals,
            simple,
            store_dir,
            out,
            webhook_url,
            username,
            avatar_url,
            key,
        } = options;

        let command = command.ok_or(())?;
        let sending = webhook_url.is_some() || username.is_some() || avatar_url.is_some();

        match command.as_str() {
            "export" => {
                if sending || key.is_some() {
                    return Err(());
                }
                Ok(Self::Export { input: single(positionals)?, simple, store_dir, out })
            }
            "copy" => {
                if sending || key.is_some() || simple || out.is_some() {
                    return Err(());
                }
                Ok(Self::Copy { input: single(positionals)?, store_dir })
            }
            "send" => {
                if key.is_some() || simple || out.is_some() || store_dir.is_some() {
                    return Err(());
                }
                Ok(Self::Send {
                    input: single(positionals)?,
                    webhook_url: webhook_url.ok_or(())?,
                    username,
                    avatar_url,
                })
            }
            "preview" | "validate" => {
                if sending || key.is_some() || simple || out.is_some() || store_dir.is_some() {
                    return Err(());
                }
                let input = single(positionals)?;
                if command == "preview" {
                    Ok(Self::Preview { input })
                } else {
                    Ok(Self::Validate { input })
                }
            }
            "save" => {
                if sending || simple || out.is_some() {
                    return Err(());
                }
                Ok(Self::Save {
                    input: single(positionals)?,
                    key: key.ok_or(())?,
                    store_dir,
                })
            }
            "load" | "delete" => {
                if sending || key.is_some() || simple || out.is_some() {
                    return Err(());
                }
                let positional_key = single(positionals)?;
                if command == "load" {
                    Ok(Self::Load { key: positional_key, store_dir })
                } else {
                    Ok(Self::Delete { key: positional_key, store_dir })
                }
            }
            "list" => {
                if sending || key.is_some() || simple || out.is_some() || !positionals.is_empty() {
                    return Err(());
                }
                Ok(Self::List { store_dir })
            }
            _ => Err(()),
        }
    }
}

fn single(mut positionals: Vec<String>) -> Result<String, ()> {
    if positionals.len() == 1 {
        Ok(positionals.remove(0))
    } else {
        Err(())
    }
}

#[derive(Debug)]
struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for CliError {}

/// Read and normalize the input document into a well-formed session.
fn load_session(input: &str) -> Result<EditorSession, Box<dyn Error>> {
    let text = std::fs::read_to_string(input)
        .map_err(|err| CliError(format!("cannot read {input}: {err}")))?;
    let messages = parse_document(&text)?;
    Ok(EditorSession::with_messages(messages))
}

/// Export-validity gate for `export`, `copy`, and `send`.
fn ensure_valid(messages: &[Message]) -> Result<(), Box<dyn Error>> {
    for (index, message) in messages.iter().enumerate() {
        if let Err(violation) = check_message(message) {
            if messages.len() > 1 {
                return Err(Box::new(CliError(format!(
                    "message {}: {violation}",
                    index + 1
                ))));
            }
            return Err(Box::new(violation));
        }
    }
    Ok(())
}

fn store_at(store_dir: Option<String>) -> MessageStore {
    MessageStore::new(store_dir.unwrap_or_else(|| DEFAULT_STORE_DIR.to_owned()))
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Export { input, simple, store_dir, out } => {
            let session = load_session(&input)?;
            ensure_valid(session.messages())?;

            let json = if simple {
                serde_json::to_string_pretty(&build_simple_payload(session.messages()))?
            } else {
                let store = store_at(store_dir);
                serde_json::to_string_pretty(&build_complete_payload(session.messages(), &store))?
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, format!("{json}\n"))
                        .map_err(|err| CliError(format!("cannot write {path}: {err}")))?;
                    eprintln!("talaria: wrote {path}");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Command::Copy { input, store_dir } => {
            let session = load_session(&input)?;
            ensure_valid(session.messages())?;

            let store = store_at(store_dir);
            let json =
                serde_json::to_string_pretty(&build_complete_payload(session.messages(), &store))?;

            // Clipboard is best-effort; the fallback is printing the payload
            // for manual copy.
            match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(json.clone()))
            {
                Ok(()) => eprintln!("talaria: payload copied to clipboard"),
                Err(err) => {
                    tracing::warn!(error = %err, "clipboard unavailable, printing instead");
                    println!("{json}");
                }
            }
            Ok(())
        }
        Command::Send { input, webhook_url, username, avatar_url } => {
            let session = load_session(&input)?;
            ensure_valid(session.messages())?;

            let payload = build_webhook_payload(
                session.messages(),
                username.as_deref(),
                avatar_url.as_deref(),
            );

            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            let client = reqwest::Client::new();
            runtime.block_on(webhook::send(&client, &webhook_url, &payload))?;

            println!(
                "talaria: sent {} embed(s) to webhook",
                payload.metadata.total_embeds
            );
            Ok(())
        }
        Command::Preview { input } => {
            let session = load_session(&input)?;
            print!("{}", render_preview(&session));
            Ok(())
        }
        Command::Validate { input } => {
            let session = load_session(&input)?;
            let mut failures = 0usize;
            for (index, message) in session.messages().iter().enumerate() {
                if let Err(violation) = check_message(message) {
                    eprintln!("message {}: {violation}", index + 1);
                    failures += 1;
                }
            }
            if failures > 0 {
                return Err(Box::new(CliError(format!(
                    "{failures} of {} message(s) failed validation",
                    session.messages().len()
                ))));
            }
            println!("talaria: {} message(s) valid", session.messages().len());
            Ok(())
        }
        Command::Save { input, key, store_dir } => {
            let session = load_session(&input)?;
            if session.messages().len() > 1 {
                tracing::warn!(
                    count = session.messages().len(),
                    "input has multiple messages, saving only the first"
                );
            }
            let store = store_at(store_dir);
            let entry = store.save(&key, &session.messages()[0].embeds)?;
            println!(
                "talaria: saved \"{}\" ({} embed(s)) under {}",
                entry.key,
                entry.embeds.len(),
                store.entry_path(&key).display()
            );
            Ok(())
        }
        Command::Load { key, store_dir } => {
            let store = store_at(store_dir);
            match store.get(&key)? {
                Some(entry) => {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                    Ok(())
                }
                None => Err(Box::new(CliError(format!("no saved message under key \"{key}\"")))),
            }
        }
        Command::List { store_dir } => {
            let store = store_at(store_dir);
            let entries = store.list()?;
            if entries.is_empty() {
                println!("talaria: no saved messages");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}\t{} embed(s)\t{}",
                    entry.key,
                    entry.embeds.len(),
                    entry.timestamp
                );
            }
            Ok(())
        }
        Command::Delete { key, store_dir } => {
            let store = store_at(store_dir);
            store.delete(&key)?;
            println!("talaria: deleted \"{key}\"");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "talaria".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let command = match Command::from_options(options) {
            Ok(command) => command,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        run(command)
    })();

    if let Err(err) = result {
        eprintln!("talaria: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions, Command};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    fn command(args: &[&str]) -> Result<Command, ()> {
        Command::from_options(parse(args)?)
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn empty_args_have_no_command() {
        assert_eq!(command(&[]), Err(()));
    }

    #[test]
    fn parses_export_with_flags() {
        let parsed = command(&["export", "in.json", "--simple", "--out", "out.json"])
            .expect("command");
        assert_eq!(
            parsed,
            Command::Export {
                input: "in.json".to_owned(),
                simple: true,
                store_dir: None,
                out: Some("out.json".to_owned()),
            }
        );
    }

    #[test]
    fn flag_order_does_not_matter() {
        let parsed =
            command(&["export", "--store", "dir", "in.json", "--simple"]).expect("command");
        assert_eq!(
            parsed,
            Command::Export {
                input: "in.json".to_owned(),
                simple: true,
                store_dir: Some("dir".to_owned()),
                out: None,
            }
        );
    }

    #[test]
    fn rejects_duplicate_flags() {
        assert_eq!(parse(&["export", "a", "--simple", "--simple"]), Err(()));
        assert_eq!(parse(&["export", "a", "--store", "x", "--store", "y"]), Err(()));
    }

    #[test]
    fn rejects_missing_flag_values() {
        assert_eq!(parse(&["export", "a", "--store"]), Err(()));
        assert_eq!(parse(&["send", "a", "--webhook"]), Err(()));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert_eq!(parse(&["export", "a", "--nope"]), Err(()));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(command(&["frobnicate", "a"]), Err(()));
    }

    #[test]
    fn send_requires_a_webhook_url() {
        assert_eq!(command(&["send", "in.json"]), Err(()));
        let parsed = command(&[
            "send",
            "in.json",
            "--webhook",
            "https://example.com/hook",
            "--username",
            "Herald",
        ])
        .expect("command");
        assert_eq!(
            parsed,
            Command::Send {
                input: "in.json".to_owned(),
                webhook_url: "https://example.com/hook".to_owned(),
                username: Some("Herald".to_owned()),
                avatar_url: None,
            }
        );
    }

    #[test]
    fn save_requires_a_key() {
        assert_eq!(command(&["save", "in.json"]), Err(()));
        let parsed = command(&["save", "in.json", "--key", "welcome"]).expect("command");
        assert_eq!(
            parsed,
            Command::Save {
                input: "in.json".to_owned(),
                key: "welcome".to_owned(),
                store_dir: None,
            }
        );
    }

    #[test]
    fn rejects_flags_that_do_not_apply() {
        assert_eq!(command(&["preview", "in.json", "--simple"]), Err(()));
        assert_eq!(command(&["list", "--out", "x"]), Err(()));
        assert_eq!(command(&["send", "in.json", "--webhook", "u", "--simple"]), Err(()));
        assert_eq!(command(&["load", "key", "--key", "other"]), Err(()));
    }

    #[test]
    fn rejects_extra_positionals() {
        assert_eq!(command(&["export", "a.json", "b.json"]), Err(()));
        assert_eq!(command(&["list", "stray"]), Err(()));
        assert_eq!(command(&["export"]), Err(()));
    }

    #[test]
    fn load_list_delete_take_store_dirs() {
        assert_eq!(
            command(&["load", "k", "--store", "dir"]),
            Ok(Command::Load { key: "k".to_owned(), store_dir: Some("dir".to_owned()) })
        );
        assert_eq!(
            command(&["list", "--store", "dir"]),
            Ok(Command::List { store_dir: Some("dir".to_owned()) })
        );
        assert_eq!(
            command(&["delete", "k"]),
            Ok(Command::Delete { key: "k".to_owned(), store_dir: None })
        );
    }
}
