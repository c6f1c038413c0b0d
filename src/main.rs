// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use chordbox::config::{ChordLibrary, LibraryWatcher, Settings, DEFAULT_SETTINGS_FILE};
use chordbox::control::KeyboardController;
use chordbox::diagram::{render, DisplayOptions};
use chordbox::logging::{init_logging, LogTarget};
use chordbox::ui::{App, UiState};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn print_usage() {
    println!("chordbox - Chord diagrams for fretted instruments");
    println!();
    println!("Usage: chordbox [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>         Settings file (default {})", DEFAULT_SETTINGS_FILE);
    println!("  --library <FILE>        Chord library to browse (default: built-in)");
    println!("  --print [FILE]          Print diagrams to stdout instead of browsing");
    println!("    --no-fingers            Hide finger markers");
    println!("    --no-tuning             Hide the tuning row");
    println!("    --no-fret-numbers       Hide the fret number label");
    println!("  --check <FILE>          Validate a chord library");
    println!("  --help                  Show this help message");
}

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    library: Option<PathBuf>,
    print: bool,
    check: Option<PathBuf>,
    hide: Vec<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => parsed.help = true,
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| anyhow!("--config requires a file"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--library" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| anyhow!("--library requires a file"))?;
                parsed.library = Some(PathBuf::from(path));
            }
            "--check" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| anyhow!("--check requires a file"))?;
                parsed.check = Some(PathBuf::from(path));
            }
            "--print" => {
                parsed.print = true;
                if let Some(next) = args.get(i + 1).filter(|a| !a.starts_with("--")) {
                    parsed.library = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            flag @ ("--no-fingers" | "--no-tuning" | "--no-fret-numbers") => {
                parsed.hide.push(flag.to_string());
            }
            other => return Err(anyhow!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn apply_hide_flags(mut options: DisplayOptions, flags: &[String]) -> DisplayOptions {
    for flag in flags {
        match flag.as_str() {
            "--no-fingers" => options.show_fingers = false,
            "--no-tuning" => options.show_tuning = false,
            "--no-fret-numbers" => options.show_fret_numbers = false,
            _ => {}
        }
    }
    options
}

fn print_library(library: &ChordLibrary, options: DisplayOptions) -> Result<()> {
    let book = library.build()?;

    for group in &book.groups {
        println!("== {} ==", group.title);
        println!();
        for slot in &group.chords {
            let diagram = slot
                .chord
                .clone()
                .and_then(|chord| render(&book.instrument, &chord, options));
            match diagram {
                Ok(diagram) => {
                    println!("{}", diagram.title());
                    if let Some(name) = diagram.name() {
                        println!("{}", name);
                    }
                    println!("{}", diagram);
                }
                Err(e) => {
                    warn!(chord = %slot.name, error = %e, "chord not rendered");
                    println!("{}: {}", slot.name, e);
                }
            }
            println!();
        }
    }
    Ok(())
}

fn check_library(path: &Path) -> Result<()> {
    let library = ChordLibrary::load(path)?;
    let book = library.build()?;

    let mut failures = 0;
    for (group, slot, err) in book.errors() {
        println!("{} / {}: {}", group, slot.name, err);
        failures += 1;
    }
    // a chord can build and still not fit one diagram
    for group in &book.groups {
        for slot in &group.chords {
            if let Ok(chord) = &slot.chord {
                if let Err(e) = render(&book.instrument, chord, DisplayOptions::default()) {
                    println!("{} / {}: {}", group.title, slot.name, e);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} chords are invalid", failures, book.chord_count()));
    }
    println!("{}: {} chords OK", path.display(), book.chord_count());
    Ok(())
}

fn run_ui(settings: Settings, library_path: Option<PathBuf>) -> Result<()> {
    let library = ChordLibrary::load_or_builtin(library_path.as_deref())?;
    let book = library.build()?;
    info!(chords = book.chord_count(), "library loaded");

    let source = match &library_path {
        Some(path) => path.display().to_string(),
        None => "built-in library".to_string(),
    };

    let mut keyboard = KeyboardController::with_defaults();
    keyboard
        .apply_overrides(&settings.keyboard)
        .context("Invalid [keyboard] settings")?;

    let watcher = match &library_path {
        Some(path) if settings.library.watch => {
            match LibraryWatcher::new(path, Some(settings.library.debounce_ms)) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!(error = %e, "library watching disabled");
                    None
                }
            }
        }
        _ => None,
    };

    let state = UiState::new(book, settings.display, source);
    let mut app = App::new(state, keyboard, library_path, watcher)?;
    app.run()
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage information");
            std::process::exit(1);
        }
    };

    if args.help {
        print_usage();
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(DEFAULT_SETTINGS_FILE)?,
    };

    if let Some(path) = &args.check {
        init_logging(&settings.logging, LogTarget::FileOrStderr)?;
        return check_library(path);
    }

    let library_path = args.library.or_else(|| settings.library.path.clone());

    if args.print {
        init_logging(&settings.logging, LogTarget::FileOrStderr)?;
        let library = ChordLibrary::load_or_builtin(library_path.as_deref())?;
        let options = apply_hide_flags(settings.display, &args.hide);
        return print_library(&library, options);
    }

    init_logging(&settings.logging, LogTarget::FileOnly)?;
    run_ui(settings, library_path)
}
