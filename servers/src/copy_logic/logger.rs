use anyhow::Result;
use std::fs;
use std::path::Path;

// How many timestamped log files to keep around between runs
const KEEP_RECENT_LOGS: usize = 5;

pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }

    cleanup_old_logs(log_dir)?;

    let log_file_name = format!(
        "server_copy_{}.log",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = log_dir.join(log_file_name);

    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_path)?)
        .apply()?;

    Ok(())
}

fn cleanup_old_logs(log_dir: &Path) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(log_dir)?
        .filter_map(|res| res.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "log"))
        .collect();

    // Sort by modification time, newest first
    entries.sort_by_key(|e| {
        let modified = e
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
        std::cmp::Reverse(modified)
    });

    for entry in entries.iter().skip(KEEP_RECENT_LOGS) {
        if let Err(e) = fs::remove_file(entry.path()) {
            eprintln!("Failed to delete old log file {:?}: {}", entry.path(), e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_keeps_only_the_newest_log_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..8 {
            fs::write(dir.path().join(format!("server_copy_{i}.log")), "x").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        let logs = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "log"))
            .count();
        assert_eq!(logs, KEEP_RECENT_LOGS);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn cleanup_leaves_small_directories_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("server_copy_only.log"), "x").unwrap();

        cleanup_old_logs(dir.path()).unwrap();
        assert!(dir.path().join("server_copy_only.log").exists());
    }
}
