/// Logging setup shared by both binaries

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::LevelFilter;

/// Set up `env_logger` with a timestamped format
///
/// Records go to `log_file` when one is given and can be created, otherwise
/// to stderr.
pub fn setup_logging(level: LevelFilter, log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(level);

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
        }
    }

    // A second initialization (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
