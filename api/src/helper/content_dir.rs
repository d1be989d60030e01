use crate::domain::MAX_NAME_ATTEMPTS;
use axum::body::Bytes;
use chrono::Utc;
use entities::{InternalError, TodoError, Unit, UPLOADS_PREFIX};
use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};
use tracing::{debug, warn};

/// A file received with a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// The directory attachments live in, served under [`UPLOADS_PREFIX`].
///
/// Files are named `<epoch-millis><.ext>`; the extension comes from the
/// uploaded file name and is dropped unless it is plain ASCII alphanumerics.
#[derive(Debug, Clone)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    pub async fn init(root: impl Into<PathBuf>) -> Result<Self, TodoError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            InternalError::filesystem(
                &format!("Could not create content directory {}: {e}", root.display()),
                Some("init"),
            )
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the upload under a fresh name and returns its relative URL.
    pub async fn store(&self, upload: &Upload) -> Result<String, TodoError> {
        let extension = extension_of(upload.file_name.as_deref());
        let stamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = format!("{}{}", stamp + attempt, extension);
            let path = self.root.join(&name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Attachment name {name} is taken, trying the next one");
                    continue;
                }
                Err(e) => {
                    return Err(InternalError::filesystem(
                        &format!("Could not create {}: {e}", path.display()),
                        Some("write"),
                    ))
                }
            };

            write_or_discard(&path, &mut file, &upload.bytes).await?;

            debug!("Stored {} bytes at {}", upload.bytes.len(), path.display());

            return Ok(format!("{UPLOADS_PREFIX}/{name}"));
        }

        Err(InternalError::filesystem(
            &format!("No free attachment name after {MAX_NAME_ATTEMPTS} attempts"),
            Some("write"),
        ))
    }

    /// Deletes the file an attachment URL points at.
    pub async fn remove(&self, url: &str) -> Result<Unit, TodoError> {
        let path = self.resolve(url).ok_or_else(|| {
            InternalError::filesystem(
                &format!("Attachment path {url} is outside the content directory"),
                Some("remove"),
            )
        })?;

        fs::remove_file(&path).await.map_err(|e| {
            InternalError::filesystem(
                &format!("Could not remove {}: {e}", path.display()),
                Some("remove"),
            )
        })
    }

    /// Maps `/uploads/<name>` to a file in this directory. Anything that would
    /// leave the directory maps to nothing.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(UPLOADS_PREFIX)?.strip_prefix('/')?;
        let mut components = Path::new(name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Some(self.root.join(file)),
            _ => None,
        }
    }
}

/// Writes `bytes` into the freshly created file at `path`. On failure the
/// partial file is removed so no untracked file stays behind.
async fn write_or_discard<W>(path: &Path, file: &mut W, bytes: &[u8]) -> Result<Unit, TodoError>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(bytes).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(path).await {
            warn!("Could not discard partial attachment {}: {cleanup}", path.display());
        }

        return Err(InternalError::filesystem(
            &format!("Could not write {}: {e}", path.display()),
            Some("write"),
        ));
    }

    Ok(())
}

fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
