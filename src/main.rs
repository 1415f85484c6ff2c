use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::{error, info};

use freq_labels::{Config, FileSource, LabelStore, LoadError, TuneSession};

const USAGE: &str = "usage: freq-labels <table.csv> [config.json]";

/// Reads one tuned frequency (Hz) per stdin line and prints its label.
/// A `reload` line re-reads the table file.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let table_arg = args.next().map(PathBuf::from);
    let config = match args.next() {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    let Some(table_path) = table_arg.or_else(|| config.table.clone()) else {
        bail!("{}", USAGE);
    };

    let source = FileSource::new(table_path);
    let store = Arc::new(LabelStore::new());
    match store.reload(&source) {
        Ok(n) => info!("{n} labels loaded from {}", source.path().display()),
        // No labels is not fatal: every frequency just shows "(no match)".
        Err(err) if err.downcast_ref::<LoadError>().is_some() => error!("{err:#}"),
        Err(err) => return Err(err),
    }

    let mut session = TuneSession::new(store, config.tolerance);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "reload" {
            if let Err(err) = session.store().reload(&source) {
                error!("{err:#}");
            }
            session.refresh();
            continue;
        }

        match input.parse::<f64>() {
            Ok(hz) => {
                session.tune(hz);
                writeln!(stdout, "{input}\t{}", session.display_text())?;
            }
            Err(_) => error!("not a frequency: {input:?}"),
        }
    }
    Ok(())
}
