use crate::config::AppConfig;
use crate::errors::Result;
use chrono::Local;
use env_logger::{Builder, Target};
use log::{LevelFilter, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends to a file and rolls it over to `<path>.1`, `<path>.2`, ... once
/// `max_bytes` would be reached.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    written: u64,
}

impl RotatingFile {
    pub fn open(path: &Path, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();
        Ok(RotatingFile {
            path: path.to_path_buf(),
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backup_count > 0 {
            for index in (1..self.backup_count).rev() {
                let source = self.backup_path(index);
                if source.exists() {
                    fs::rename(&source, self.backup_path(index + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.max_bytes > 0
            && self.written > 0
            && self.written + buf.len() as u64 >= self.max_bytes
        {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn builder() -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| format_record(buf, record));
    builder
}

/// `<timestamp>, <LEVEL>, <target>, <message>`
fn format_record<W: Write>(buf: &mut W, record: &Record) -> io::Result<()> {
    writeln!(
        buf,
        "{}, {}, {}, {}",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Sends log records to the configured log file.
pub fn init(app_config: &AppConfig) -> Result<()> {
    let file = RotatingFile::open(
        &app_config.log_file,
        app_config.log_max_bytes,
        app_config.log_backup_count,
    )?;
    builder().target(Target::Pipe(Box::new(file))).init();
    Ok(())
}

/// Used until a configuration is available.
pub fn init_stderr() {
    builder().target(Target::Stderr).init();
}
