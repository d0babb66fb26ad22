//! Solana-compatible keypair files.
//!
//! A keypair file is a JSON array of the 64 exported keypair bytes, the
//! format read by `solana-keygen` and the web3 SDKs.

use crate::{IdentityError, Keypair, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use zeroize::Zeroizing;

/// Writes `keypair` to `path` as a JSON byte array.
///
/// Parent directories are created as needed. On Unix the file ends up with
/// mode `0o600`, including when `force` replaces an existing file.
///
/// # Errors
///
/// Returns [`IdentityError::AlreadyExists`] if the file exists and `force`
/// is false, or an I/O error if the file cannot be written.
pub fn write_keypair_file(path: &Path, keypair: &Keypair, force: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let bytes = keypair.to_keypair_bytes();
    let json = Zeroizing::new(
        serde_json::to_string(&bytes[..]).map_err(|e| IdentityError::Io(std::io::Error::other(e)))?,
    );

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => IdentityError::AlreadyExists(path.to_path_buf()),
        _ => IdentityError::Io(e),
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // `mode` only applies when the file is created.
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    tracing::debug!(path = %path.display(), address = %keypair.public_key(), "Wrote keypair file");
    Ok(())
}

/// Reads a keypair from a JSON byte-array file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or
/// [`IdentityError::KeyFile`] if its contents are not a valid keypair.
pub fn read_keypair_file(path: &Path) -> Result<Keypair> {
    let contents = Zeroizing::new(fs::read_to_string(path)?);

    let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(serde_json::from_str(contents.trim()).map_err(
        |e| IdentityError::KeyFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    )?);

    Keypair::from_keypair_bytes(&bytes).map_err(|e| IdentityError::KeyFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn keyfile_write_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        let kp = Keypair::generate();

        write_keypair_file(&path, &kp, false).unwrap();
        let restored = read_keypair_file(&path).unwrap();

        assert_eq!(kp, restored);
    }

    #[test]
    fn keyfile_is_json_byte_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        let kp = Keypair::generate();
        write_keypair_file(&path, &kp, false).unwrap();

        let raw: Vec<u8> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), Keypair::KEYPAIR_LEN);
        assert_eq!(&raw[32..], &kp.public_key().as_bytes()[..]);
    }

    #[test]
    fn keyfile_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        write_keypair_file(&path, &Keypair::generate(), false).unwrap();

        let err = write_keypair_file(&path, &Keypair::generate(), false).unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyExists(_)));
    }

    #[test]
    fn keyfile_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        write_keypair_file(&path, &Keypair::generate(), false).unwrap();

        let kp = Keypair::generate();
        write_keypair_file(&path, &kp, true).unwrap();
        assert_eq!(read_keypair_file(&path).unwrap(), kp);
    }

    #[test]
    fn keyfile_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/keys/id.json");
        write_keypair_file(&path, &Keypair::generate(), false).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn keyfile_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        write_keypair_file(&path, &Keypair::generate(), false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn keyfile_force_tightens_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_keypair_file(&path, &Keypair::generate(), true).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn keyfile_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = read_keypair_file(&path).unwrap_err();
        assert!(matches!(err, IdentityError::KeyFile { .. }));
    }
}
