// src/logging/mod.rs
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use crate::core::config::Config;

fn open_log_file(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Output goes to `config.log_file` when set,
/// stderr otherwise. Calling twice is harmless.
pub fn init_logging(config: &Config) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .filter_module("actix_server", log::LevelFilter::Warn)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(true);

    if let Some(path) = &config.log_file {
        let file = open_log_file(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    if let Err(e) = builder.try_init() {
        log::debug!("Logger already initialised: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_parent_directories_for_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("dorkforge.log");

        let mut config = Config::default();
        config.log_file = Some(path.clone());

        init_logging(&config).unwrap();
        assert!(path.exists());
    }
}
