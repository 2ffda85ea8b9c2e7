//! On-disk output of a run: its directory, the image file and the
//! execution log.

use crate::error::Result;
use crate::events::{Event, EventHandler};
use crate::types::ImageArtifact;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Name of the per-run log file.
pub const LOG_FILE: &str = "execution.log";

/// Stem of the persisted image; the extension follows the image format.
pub const IMAGE_STEM: &str = "output";

const DIR_FORMAT: &str = "%d%b%y_%H%M%S";

/// A run's own output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    path: PathBuf,
}

impl RunDir {
    /// Create `<root>/<timestamp>`, e.g. `AI_Response/18Oct26_142501`.
    ///
    /// Two runs starting in the same second get `_1`, `_2`, ... suffixes
    /// instead of sharing a directory.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        let stamp = Local::now().format(DIR_FORMAT).to_string();

        let mut suffix = 0u32;
        loop {
            let name = if suffix == 0 {
                stamp.clone()
            } else {
                format!("{stamp}_{suffix}")
            };
            let path = root.join(name);
            match fs::create_dir(&path) {
                Ok(()) => {
                    tracing::debug!(dir = %path.display(), "run directory created");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join(LOG_FILE)
    }
}

/// Write the image's original bytes to `<dir>/output.<ext>`.
pub fn persist_image(dir: &Path, image: &ImageArtifact) -> Result<PathBuf> {
    let path = image_path(dir, image);
    fs::write(&path, image.bytes())?;
    Ok(path)
}

/// Where [`persist_image`] puts `image`.
pub fn image_path(dir: &Path, image: &ImageArtifact) -> PathBuf {
    dir.join(format!("{IMAGE_STEM}.{}", image.extension()))
}

/// [`EventHandler`] appending one timestamped line per event to a file.
#[derive(Debug)]
pub struct RunLog {
    file: Mutex<File>,
}

impl RunLog {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl EventHandler for RunLog {
    fn on_event(&self, event: Event) {
        let line = format!(
            "{} - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            describe(&event)
        );
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!(error = %e, "failed to write run log");
        }
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::RunStart {
            product_desc,
            output_location,
        } => format!("INFO - run started: product={product_desc:?} output={output_location}"),
        Event::StageStart { stage, pass } => format!("INFO - {stage} stage start (pass {pass})"),
        Event::StageEnd { stage, pass, ok: true } => {
            format!("INFO - {stage} stage ok (pass {pass})")
        }
        Event::StageEnd { stage, pass, ok: false } => {
            format!("ERROR - {stage} stage failed (pass {pass})")
        }
        Event::StageSkipped { stage, pass } => {
            format!("WARNING - {stage} stage skipped, earlier error pending (pass {pass})")
        }
        Event::TransportRetry {
            call,
            attempt,
            delay_ms,
            reason,
        } => format!("WARNING - {call}: retry attempt {attempt} in {delay_ms}ms: {reason}"),
        Event::ApprovalDecision { decision, error: None } => {
            format!("INFO - approval decision: {decision}")
        }
        Event::ApprovalDecision {
            decision,
            error: Some(e),
        } => format!("ERROR - approval failed ({e}), treated as {decision}"),
        Event::Transition { from, to } => format!("INFO - {from} -> {to}"),
        Event::RunEnd { ok, passes } => format!("INFO - run finished: ok={ok} passes={passes}"),
    }
}
