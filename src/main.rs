// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Omnibar-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Omnibar and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Omnibar CLI entrypoint.
//!
//! Inspects a saved draft: prints its editable sequence (default), its reorderable sequence
//! (`--reorder`), or the submission payload as JSON (`--submit`). `--prune` drops empty text
//! blocks and writes the draft back. Drafts are read without being consumed.

use std::error::Error;

use omnibar::model::{ComposeTarget, Composition, DisplaySequence, PostId};
use omnibar::ops::{apply_ops, EditOp, Op, ReorderOp};
use omnibar::store::{DraftFolder, WriteDurability};
use omnibar::submit::generate_post_content;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<draft-dir>] [--comment <post-id>] [--reorder | --submit] [--durable-writes]\n  {program} [--drafts <dir>] [--comment <post-id>] [--reorder | --submit] [--durable-writes]\n  {program} [<draft-dir>] [--comment <post-id>] --prune [--durable-writes]\n\nReads the new-post draft, or the comment draft for --comment.\nIf draft-dir/--drafts is omitted, the current working directory is used.\n\n--reorder prints the reorderable sequence instead of the editable one.\n--submit prints the submission payload as JSON.\n--prune removes empty text blocks and saves the draft.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nRUST_LOG controls diagnostics on stderr (default: warn)."
    );
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    #[default]
    Editable,
    Reorderable,
    Submission,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    draft_dir: Option<String>,
    comment_on: Option<String>,
    output: Option<OutputMode>,
    prune: bool,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--drafts" => {
                if options.draft_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.draft_dir = Some(dir);
            }
            "--comment" => {
                if options.comment_on.is_some() {
                    return Err(());
                }
                let post_id = args.next().ok_or(())?;
                options.comment_on = Some(post_id);
            }
            "--reorder" => {
                if options.output.is_some() {
                    return Err(());
                }
                options.output = Some(OutputMode::Reorderable);
            }
            "--submit" => {
                if options.output.is_some() {
                    return Err(());
                }
                options.output = Some(OutputMode::Submission);
            }
            "--prune" => {
                if options.prune {
                    return Err(());
                }
                options.prune = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.draft_dir.is_some() {
                    return Err(());
                }
                options.draft_dir = Some(arg);
            }
        }
    }

    if options.prune && options.output.is_some() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_display(display: &DisplaySequence) {
    for (row, entry) in display.entries().iter().enumerate() {
        match entry.position {
            Some(position) => println!("{row:>3} [{position}] {}", entry.region),
            None => println!("{row:>3}     {}", entry.region),
        }
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "omnibar".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let target = match options.comment_on {
            Some(raw) => ComposeTarget::Comment {
                parent_post_id: PostId::new(raw)?,
            },
            None => ComposeTarget::NewPost,
        };
        let Some(name) = target.draft_name() else {
            return Err("target has no draft".into());
        };

        let dir = options.draft_dir.unwrap_or_else(|| ".".to_owned());
        let folder = if options.durable_writes {
            DraftFolder::new(dir).with_durability(WriteDurability::Durable)
        } else {
            DraftFolder::new(dir)
        };

        let Some(regions) = folder.load_draft(&name)? else {
            return Err(format!("no draft {name:?} in {}", folder.root().display()).into());
        };
        let mut composition = Composition::with_regions(regions);

        if options.prune {
            apply_ops(&mut composition, 0, &[Op::Edit(EditOp::PruneEmptyText)])?;
            folder.save_draft(&name, composition.regions())?;
            print_display(&composition.display());
            return Ok(());
        }

        match options.output.unwrap_or_default() {
            OutputMode::Editable => print_display(&composition.display()),
            OutputMode::Reorderable => {
                let result = apply_ops(&mut composition, 0, &[Op::Reorder(ReorderOp::Begin)])?;
                print_display(&result.display);
            }
            OutputMode::Submission => {
                let content = generate_post_content(composition.regions())?;
                println!("{}", serde_json::to_string_pretty(&content)?);
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("omnibar: {err}");
        std::process::exit(1);
    }
}
