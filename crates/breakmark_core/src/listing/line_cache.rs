//! Per-file line text cache used by location export.

use log::debug;
use std::collections::HashMap;

/// Host capability: full text of an open buffer.
pub trait BufferText {
    /// Lines of the buffer showing `path`, or `None` when it is not open.
    fn buffer_lines(&self, path: &str) -> Option<Vec<String>>;
}

/// Line lookup used by `populate_locations`.
pub trait LineSource {
    /// Text of 1-based `line` in `path`, or `None` when unavailable.
    fn line_text(&mut self, path: &str, line: u32) -> Option<String>;
}

/// Caches buffer lines per file.
///
/// Only open buffers are cached. Callers must `invalidate` a file whenever
/// its content changes, otherwise stale text is reported.
pub struct LineCache<H: BufferText> {
    host: H,
    files: HashMap<String, Vec<String>>,
}

impl<H: BufferText> LineCache<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            files: HashMap::new(),
        }
    }

    /// Drops cached text for `path`. Returns whether anything was cached.
    pub fn invalidate(&mut self, path: &str) -> bool {
        let removed = self.files.remove(path).is_some();
        if removed {
            debug!("event=line_cache_invalidate module=listing status=ok scope=file");
        }
        removed
    }

    pub fn invalidate_all(&mut self) {
        self.files.clear();
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl<H: BufferText> LineSource for LineCache<H> {
    fn line_text(&mut self, path: &str, line: u32) -> Option<String> {
        if !self.files.contains_key(path) {
            let lines = self.host.buffer_lines(path)?;
            self.files.insert(path.to_string(), lines);
        }
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.files.get(path)?.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferText, LineCache, LineSource};
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Editable(RefCell<HashMap<String, Vec<String>>>);

    impl BufferText for &Editable {
        fn buffer_lines(&self, path: &str) -> Option<Vec<String>> {
            self.0.borrow().get(path).cloned()
        }
    }

    #[test]
    fn stale_text_until_invalidated() {
        let buffers = Editable(RefCell::new(HashMap::from([(
            "/a.py".to_string(),
            vec!["old".to_string()],
        )])));
        let mut cache = LineCache::new(&buffers);

        assert_eq!(cache.line_text("/a.py", 1).as_deref(), Some("old"));
        buffers
            .0
            .borrow_mut()
            .insert("/a.py".to_string(), vec!["new".to_string()]);
        assert_eq!(cache.line_text("/a.py", 1).as_deref(), Some("old"));

        assert!(cache.invalidate("/a.py"));
        assert_eq!(cache.line_text("/a.py", 1).as_deref(), Some("new"));
    }

    #[test]
    fn closed_buffers_are_not_cached() {
        let buffers = Editable(RefCell::new(HashMap::new()));
        let mut cache = LineCache::new(&buffers);

        assert_eq!(cache.line_text("/late.py", 1), None);
        assert!(!cache.is_cached("/late.py"));
        buffers
            .0
            .borrow_mut()
            .insert("/late.py".to_string(), vec!["opened".to_string()]);
        assert_eq!(cache.line_text("/late.py", 1).as_deref(), Some("opened"));
    }

    #[test]
    fn out_of_range_lines_are_unavailable() {
        let buffers = Editable(RefCell::new(HashMap::from([(
            "/a.py".to_string(),
            vec!["only".to_string()],
        )])));
        let mut cache = LineCache::new(&buffers);
        assert_eq!(cache.line_text("/a.py", 0), None);
        assert_eq!(cache.line_text("/a.py", 2), None);
    }
}
