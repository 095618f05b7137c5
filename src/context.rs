use std::cell::RefCell;

/// Where a run reports to: an append-only log plus a one-line status.
pub trait RunContext {
    fn clear(&self);
    fn append_line(&self, line: &str);
    fn set_status(&self, status: &str);
}

/// Headless sink. Optionally echoes each line to stdout as it arrives.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: RefCell<Vec<String>>,
    status: RefCell<String>,
    echo: bool,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// The log as the page renders it: one line per entry, newline-terminated.
    pub fn text(&self) -> String {
        self.lines
            .borrow()
            .iter()
            .map(|l| format!("{}\n", l))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl RunContext for MemoryLog {
    fn clear(&self) {
        self.lines.borrow_mut().clear();
    }

    fn append_line(&self, line: &str) {
        if self.echo {
            println!("{}", line);
        }
        self.lines.borrow_mut().push(line.to_string());
    }

    fn set_status(&self, status: &str) {
        tracing::debug!(status, "probe status");
        *self.status.borrow_mut() = status.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order_and_clears() {
        let log = MemoryLog::new();
        log.append_line("a");
        log.append_line("b");
        assert_eq!(log.text(), "a\nb\n");
        log.clear();
        assert!(log.lines().is_empty());
        log.set_status("Done.");
        assert_eq!(log.status(), "Done.");
    }
}
