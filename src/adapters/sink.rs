use crate::domain::ports::{EventLevel, EventSink, HospitalEvent};
use crate::utils::error::Result;
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Forwards events to `tracing` at their own level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &HospitalEvent) {
        match event.level() {
            EventLevel::Info => tracing::info!("{}", event),
            EventLevel::Warn => tracing::warn!("{}", event),
            EventLevel::Error => tracing::error!("{}", event),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &HospitalEvent) {}
}

/// Append-only text log, one line per event.
#[derive(Debug)]
pub struct FileLogSink {
    path: PathBuf,
    file: File,
}

impl FileLogSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(event: &HospitalEvent) -> String {
        format!(
            "{} - {} - {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.level(),
            event
        )
    }
}

impl EventSink for FileLogSink {
    fn record(&self, event: &HospitalEvent) {
        let line = Self::format_line(event);
        // 寫入失敗不影響登記本身
        if let Err(e) = (&self.file).write_all(line.as_bytes()) {
            tracing::warn!("Failed to append to {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<HospitalEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HospitalEvent> {
        self.events.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &HospitalEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Fans each event out to several sinks in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn record(&self, event: &HospitalEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}
