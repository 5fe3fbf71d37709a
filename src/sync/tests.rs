use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::device::parse_unmounted_device;
use super::stage_layout;
use crate::layout::PlannedEntry;

fn planned(source: PathBuf, dest_rel: &str) -> PlannedEntry {
    PlannedEntry {
        dest_rel: PathBuf::from(dest_rel),
        source_path: source,
    }
}

#[test]
fn stage_layout_builds_the_artist_tree() {
    let src_dir = tempdir().unwrap();
    let staging = tempdir().unwrap();

    let a = src_dir.path().join("a.mp3");
    let b = src_dir.path().join("b.mp3");
    fs::write(&a, b"aaa").unwrap();
    fs::write(&b, b"bbb").unwrap();

    let entries = vec![
        planned(a.clone(), "Kinks/Live -01-Intro.mp3"),
        planned(b.clone(), "Kinks/Live -02-Outro.mp3"),
    ];
    stage_layout(staging.path(), &entries).unwrap();

    let intro = staging.path().join("Kinks/Live -01-Intro.mp3");
    let outro = staging.path().join("Kinks/Live -02-Outro.mp3");
    assert!(intro.exists());
    assert!(outro.exists());
    // Staged entries resolve to the original file contents.
    assert_eq!(fs::read(&intro).unwrap(), b"aaa");
    assert_eq!(fs::read(&outro).unwrap(), b"bbb");

    #[cfg(unix)]
    {
        assert!(intro.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&intro).unwrap(), a);
    }
}

#[test]
fn stage_layout_fails_cleanly_on_broken_targets() {
    let staging = tempdir().unwrap();
    let missing = PathBuf::from("/definitely/not/there.mp3");

    // Symlinks to missing files are created fine on unix; the mirror's
    // -L pass is what would surface them. On non-unix the copy fails.
    let entries = vec![planned(missing, "A/B-01-t.mp3")];
    let result = stage_layout(staging.path(), &entries);
    #[cfg(unix)]
    assert!(result.is_ok());
    #[cfg(not(unix))]
    assert!(result.is_err());
}

#[test]
fn diskutil_output_yields_the_device_name() {
    assert_eq!(
        parse_unmounted_device("Volume MUSIC on disk2s1 unmounted"),
        Some("disk2s1")
    );
    assert_eq!(
        parse_unmounted_device("Volume NO NAME on disk4 unmounted\n"),
        Some("disk4")
    );
}

#[test]
fn unrelated_diskutil_output_yields_nothing() {
    assert_eq!(
        parse_unmounted_device("Unmount failed for /Volumes/MUSIC"),
        None
    );
    assert_eq!(parse_unmounted_device(""), None);
}
