//! Staging file cleanup on interrupt
//!
//! A staged output file removes itself on drop, but Ctrl-C and SIGTERM end
//! the process without unwinding. The handler installed here removes every
//! registered staging file before exiting.

use crate::error::EXIT_INTERRUPTED;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

static STAGED: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

/// Install the interrupt handler once per process
pub fn install_handler() {
    INSTALL.call_once(|| {
        let result = ctrlc::set_handler(|| {
            for path in take_registered() {
                let _ = std::fs::remove_file(&path);
            }
            std::process::exit(EXIT_INTERRUPTED);
        });

        if let Err(e) = result {
            log::warn!("Could not install interrupt handler: {}", e);
        }
    });
}

fn take_registered() -> Vec<PathBuf> {
    STAGED
        .lock()
        .map(|mut staged| std::mem::take(&mut *staged))
        .unwrap_or_default()
}

/// Staging paths currently awaiting cleanup
pub fn registered() -> Vec<PathBuf> {
    STAGED.lock().map(|staged| staged.clone()).unwrap_or_default()
}

/// Keeps a staging path registered for interrupt cleanup while alive
#[derive(Debug)]
pub struct StagingGuard {
    path: PathBuf,
}

impl StagingGuard {
    pub fn register(path: &Path) -> Self {
        if let Ok(mut staged) = STAGED.lock() {
            staged.push(path.to_path_buf());
        }
        log::debug!("Staging output in {:?}", path);
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if let Ok(mut staged) = STAGED.lock() {
            staged.retain(|p| p != &self.path);
        }
    }
}
