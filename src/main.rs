use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use log::{debug, error, info, warn};

mod config;
mod layout;
mod library;
mod metadata;
mod sync;

use config::Settings;
use layout::plan_layout;
use library::{ExclusionFilter, LibraryIndex, collect_audio_files};

const USAGE: &str = "\
Usage: synctunes [OPTIONS]

Copy an audio library to a USB stick: one folder per artist, filenames
ordered by album and track for players that list files by name.

Options:
  -c, --config <PATH>     Config file (default: XDG synctunes/config.toml)
  -s, --source <DIR>      Path to the audio library
  -d, --dest <DIR>        Device mount point
  -t, --tempdir <DIR>     Staging directory
  -a, --album-chars <N>   Characters of the album name to keep in filenames
  -u, --update            Add-only sync (never delete on the device)
      --fatsort           Re-sort the FAT tables after mirroring
  -h, --help              Show this help
";

#[derive(Default)]
struct CliArgs {
    config: Option<PathBuf>,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    tempdir: Option<PathBuf>,
    album_chars: Option<usize>,
    update: bool,
    fatsort: bool,
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                process::exit(0);
            }
            "-c" | "--config" => args.config = Some(PathBuf::from(expect_value(&arg, &mut it)?)),
            "-s" | "--source" => args.source = Some(PathBuf::from(expect_value(&arg, &mut it)?)),
            "-d" | "--dest" => args.dest = Some(PathBuf::from(expect_value(&arg, &mut it)?)),
            "-t" | "--tempdir" => args.tempdir = Some(PathBuf::from(expect_value(&arg, &mut it)?)),
            "-a" | "--album-chars" => {
                let v = expect_value(&arg, &mut it)?;
                args.album_chars =
                    Some(v.parse().map_err(|_| format!("invalid value for {arg}: {v}"))?);
            }
            "-u" | "--update" => args.update = true,
            "--fatsort" => args.fatsort = true,
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(args)
}

fn expect_value(flag: &str, it: &mut impl Iterator<Item = String>) -> Result<String, String> {
    it.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            process::exit(2);
        }
    };

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(source) = args.source {
        settings.sync.source = source;
    }
    if let Some(dest) = args.dest {
        settings.sync.dest = dest;
    }
    if let Some(tempdir) = args.tempdir {
        settings.sync.tempdir = tempdir;
    }
    if let Some(n) = args.album_chars {
        settings.sync.album_chars = Some(n);
    }
    if args.update {
        settings.sync.update = true;
    }
    if args.fatsort {
        settings.sync.fatsort = true;
    }
    settings.validate()?;

    if !settings.sync.source.is_dir() {
        return Err(format!("library not found: {}", settings.sync.source.display()).into());
    }
    if !settings.sync.dest.is_dir() {
        return Err(format!("destination not found: {}", settings.sync.dest.display()).into());
    }

    if settings.sync.tempdir.exists() {
        let prompt = format!(
            "staging directory {} exists - okay to delete? [y/N]: ",
            settings.sync.tempdir.display()
        );
        if !confirm(&prompt)? {
            info!("aborted");
            return Ok(());
        }
        fs::remove_dir_all(&settings.sync.tempdir)?;
    }

    let files = collect_audio_files(&settings.sync.source, &settings.library);
    info!(
        "found {} audio files under {}",
        files.len(),
        settings.sync.source.display()
    );

    let filter = ExclusionFilter::from_settings(&settings.exclude);
    let mut index = LibraryIndex::new();
    let mut skipped = 0usize;
    for path in &files {
        let raw = match metadata::read_raw_tag(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("{err}");
                skipped += 1;
                continue;
            }
        };
        if filter.excludes(&raw) {
            debug!("excluded by skip rules: {}", path.display());
            continue;
        }
        match metadata::normalize(&raw, path) {
            Ok(track) => {
                debug!("processing {} / {} / {}", track.artist, track.album, track.title);
                index.insert(track);
            }
            Err(err) => {
                warn!("{err}");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        info!("skipped {skipped} files with unreadable or incomplete tags");
    }
    if index.is_empty() {
        info!("nothing to sync");
        return Ok(());
    }

    let planned = plan_layout(&index, settings.sync.album_chars);
    info!(
        "planned {} tracks across {} artist/album groups",
        planned.len(),
        index.len()
    );

    fs::create_dir_all(&settings.sync.tempdir)?;
    sync::stage_layout(&settings.sync.tempdir, &planned)?;
    sync::mirror(&settings.sync.tempdir, &settings.sync.dest, settings.sync.update)?;

    if settings.sync.fatsort {
        // The library is already on the device at this point; a failed
        // re-sort is worth a loud message but not a failed run.
        if let Err(err) = sync::fat_sort(&settings.sync.dest) {
            error!("FAT re-sort failed: {err}");
        }
    }

    fs::remove_dir_all(&settings.sync.tempdir)?;
    info!("done");
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
