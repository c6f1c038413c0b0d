// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reloading a chord library.
//!
//! Watches the directory holding the library file so that editors which
//! save by replacing the file are still picked up. Modify events are
//! debounced before the file is parsed again.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::ChordLibrary;

/// Events emitted by the library watcher
#[derive(Debug, Clone)]
pub enum LibraryEvent {
    /// Library file was modified and successfully reloaded
    Reloaded(Box<ChordLibrary>),
    /// Library file was modified but failed to parse
    Error(String),
    /// The library file was created
    FileCreated(PathBuf),
    /// The library file was deleted
    FileDeleted(PathBuf),
}

/// Chord library watcher with debouncing
pub struct LibraryWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<LibraryEvent>,
    watched_path: PathBuf,
}

impl LibraryWatcher {
    /// Create a new watcher for a library file
    ///
    /// # Arguments
    /// * `path` - Library file to watch
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx): (Sender<LibraryEvent>, Receiver<LibraryEvent>) =
            mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        let watch_dir = match watched_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watch_dir, e))?;

        debug!(path = ?watched_path, "watching chord library");

        let file_name = watched_path.file_name().map(|n| n.to_os_string());
        let library_path = watched_path.clone();

        // Spawn debounce thread
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let is_library =
                |path: &Path| file_name.is_some() && path.file_name() == file_name.as_deref();

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => {
                        let paths: Vec<PathBuf> =
                            event.paths.into_iter().filter(|p| is_library(p)).collect();
                        if paths.is_empty() {
                            continue;
                        }

                        match event.kind {
                            EventKind::Create(_) => {
                                for path in paths {
                                    let _ = event_tx.send(LibraryEvent::FileCreated(path));
                                }
                                last_event_time = Some(Instant::now());
                            }
                            EventKind::Remove(_) => {
                                for path in paths {
                                    let _ = event_tx.send(LibraryEvent::FileDeleted(path));
                                }
                            }
                            EventKind::Modify(_) => {
                                last_event_time = Some(Instant::now());
                            }
                            _ => {}
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if let Some(last_time) = last_event_time {
                            if last_time.elapsed() >= debounce_duration {
                                let event = reload(&library_path);
                                if event_tx.send(event).is_err() {
                                    break;
                                }
                                last_event_time = None;
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped, exit thread
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next library event (non-blocking)
    pub fn try_recv(&self) -> Option<LibraryEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending library events
    pub fn recv_all(&self) -> Vec<LibraryEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

fn reload(path: &Path) -> LibraryEvent {
    match ChordLibrary::load(path) {
        Ok(library) => LibraryEvent::Reloaded(Box::new(library)),
        Err(e) => {
            warn!(path = ?path, error = %e, "chord library reload failed");
            LibraryEvent::Error(format!("Failed to load {:?}: {:#}", path, e))
        }
    }
}
