use async_trait::async_trait;
use derive_new::new;
use kernel::storage::ImageStorage;
use shared::error::{AppError, AppResult};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Venue images on local disk, addressed by the `image_ref` column.
/// Removal happens after the owning database transaction has committed.
#[derive(new)]
pub struct LocalImageStorage {
    root: PathBuf,
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn remove(&self, image_ref: &str) -> AppResult<()> {
        let path = resolve_under(&self.root, image_ref)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(AppError::ImageStorageError)
    }
}

/// An `image_ref` is a plain file name under the storage root. Anything
/// else (separators, `..`, an absolute path, the empty string) would let
/// `join` resolve outside the root, so it is refused before the
/// filesystem is touched.
fn resolve_under(root: &Path, image_ref: &str) -> AppResult<PathBuf> {
    let relative = Path::new(image_ref);
    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(root.join(relative)),
        _ => Err(AppError::ImageStorageError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid image reference: {image_ref}"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_file_name_resolves_under_the_root() {
        let root = Path::new("/srv/images");
        assert_eq!(
            resolve_under(root, "cover.png").unwrap(),
            PathBuf::from("/srv/images/cover.png")
        );
    }

    #[test]
    fn refs_resolving_outside_the_root_are_refused() {
        let root = Path::new("/srv/images");
        for bad in ["../victim.txt", "..", "a/b.png", "/etc/hostname", "", "."] {
            let err = resolve_under(root, bad).unwrap_err();
            assert!(
                matches!(err, AppError::ImageStorageError(_)),
                "expected {bad:?} to be refused"
            );
        }
    }
}
