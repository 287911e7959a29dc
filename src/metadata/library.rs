//! metadata/library.rs
//! Filesystem side of the library: finding MP3s and naming their sidecars.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Result, SyncError};

/// Sidecar lyrics file (`song.lrc` next to `song.mp3`).
pub fn lrc_path(media: &Path) -> PathBuf {
    media.with_extension("lrc")
}

/// Sidecar tags file (`song.json`).
pub fn json_path(media: &Path) -> PathBuf {
    media.with_extension("json")
}

/// Sidecar cover image (`song.jpg`).
pub fn jpg_path(media: &Path) -> PathBuf {
    media.with_extension("jpg")
}

/// File name for log lines ("01 Song.mp3").
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Every `.mp3` under `root`, at any depth.
///
/// - Only a `root` that cannot be read is an error.
/// - Unreadable subdirectories are logged and skipped.
/// - Directory symlinks are not descended into; symlinked files are kept.
pub fn scan_mp3s(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.path() == Some(root) => {
                return Err(SyncError::Scan {
                    path: root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable path during scan: {e}");
                continue;
            }
        };

        let kind = entry.file_type();
        let is_file = kind.is_file() || (kind.is_symlink() && entry.path().is_file());
        if is_file && has_mp3_extension(entry.path()) {
            out.push(entry.into_path());
        }
    }

    Ok(out)
}

/// Discover MP3s under several roots.
///
/// - De-dupes across overlapping roots by full path
/// - Sorts once so runs are reproducible (order itself carries no meaning)
pub fn scan_paths(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::new();

    for root in roots {
        out.extend(
            scan_mp3s(root)?
                .into_iter()
                .filter(|path| seen.insert(path.clone())),
        );
    }

    out.sort();
    Ok(out)
}

fn has_mp3_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn sidecars_share_the_stem() {
        let media = Path::new("/music/Artist/Album/01 Song.mp3");
        assert_eq!(lrc_path(media), Path::new("/music/Artist/Album/01 Song.lrc"));
        assert_eq!(json_path(media), Path::new("/music/Artist/Album/01 Song.json"));
        assert_eq!(jpg_path(media), Path::new("/music/Artist/Album/01 Song.jpg"));
    }

    #[test]
    fn finds_nested_mp3s_only() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("one.mp3"), b"x").unwrap();
        fs::write(nested.join("two.MP3"), b"x").unwrap();
        fs::write(nested.join("two.lrc"), b"x").unwrap();
        fs::write(nested.join("cover.jpg"), b"x").unwrap();

        let found = scan_paths(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| has_mp3_extension(p)));
    }

    #[test]
    fn overlapping_roots_are_deduped() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("song.mp3"), b"x").unwrap();

        let found = scan_paths(&[dir.path().to_path_buf(), sub.clone()]).unwrap();
        assert_eq!(found, vec![sub.join("song.mp3")]);
    }

    #[test]
    fn missing_root_is_a_scan_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_mp3s(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SyncError::Scan { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_loops_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let found = scan_mp3s(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("song.mp3")]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let album = dir.path().join("Artist").join("Album");
        fs::create_dir_all(&album).unwrap();
        fs::write(album.join("01 Good.mp3"), b"x").unwrap();
        let locked = dir.path().join("lost+found");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let found = scan_mp3s(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(found.unwrap(), vec![album.join("01 Good.mp3")]);
    }
}
