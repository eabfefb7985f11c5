//! Headless editor host backed by the filesystem.
//!
//! Files passed with `--open` act as open buffers. Marker operations are
//! collected as Vim `:sign` commands so the output can be sourced by an editor.

use breakmark_core::{BufferId, BufferText, Marker, MarkerHost, MarkerStyle, OpenBuffer, PlacedMarker};
use log::debug;
use std::path::{Path, PathBuf};

pub struct FsHost {
    buffers: Vec<OpenBuffer>,
    commands: Vec<String>,
    next_sign_id: u64,
}

impl FsHost {
    pub fn new(open_paths: &[PathBuf]) -> Self {
        let mut buffers: Vec<OpenBuffer> = Vec::with_capacity(open_paths.len());
        for path in open_paths {
            let path = resolve_path(path);
            if buffers.iter().any(|open| open.path == path) {
                continue;
            }
            buffers.push(OpenBuffer::new(buffers.len() as BufferId + 1, path));
        }
        Self {
            buffers,
            commands: Vec::new(),
            next_sign_id: 1,
        }
    }

    /// Sign commands issued so far, in order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    fn buffer_path(&self, buffer: BufferId) -> Option<&str> {
        self.buffers
            .iter()
            .find(|open| open.id == buffer)
            .map(|open| open.path.as_str())
    }
}

impl MarkerHost for FsHost {
    fn open_buffers(&self) -> Vec<OpenBuffer> {
        self.buffers.clone()
    }

    // A fresh process has no signs placed yet.
    fn placed_markers(&self, _group: &str) -> Vec<PlacedMarker> {
        Vec::new()
    }

    fn clear_markers(&mut self, group: &str) {
        self.commands.push(format!("sign unplace * group={group}"));
    }

    fn place_marker(&mut self, buffer: BufferId, style: &MarkerStyle, marker: &Marker) {
        let Some(path) = self.buffer_path(buffer).map(str::to_string) else {
            debug!("event=sign_place module=cli status=skipped reason=unknown_buffer");
            return;
        };
        let id = self.next_sign_id;
        self.next_sign_id += 1;
        self.commands.push(format!(
            "sign place {id} line={} name={} group={} priority={} file={path}",
            marker.line, style.sign_name, style.group, style.priority
        ));
    }
}

impl BufferText for FsHost {
    fn buffer_lines(&self, path: &str) -> Option<Vec<String>> {
        if !self.buffers.iter().any(|open| open.path == path) {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text.lines().map(str::to_string).collect()),
            Err(err) => {
                debug!(
                    "event=buffer_read module=cli status=unavailable error={}",
                    err
                );
                None
            }
        }
    }
}

/// Resolves `path` to the absolute form used as a breakpoint file key.
pub fn resolve_path(path: &Path) -> String {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    });
    absolute.to_string_lossy().into_owned()
}
