//! Writing surviving documents under their original base names.
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::document::Document;
use crate::errors::{DedupError, Result};
use crate::resolve::Resolution;

/// Derives output names from input paths, rejecting paths without a base name
/// and base names shared by two inputs.
///
/// The same path given twice is also a collision, because both inputs would
/// be written to one output file.
pub fn output_names<P>(paths: &[P]) -> Result<Vec<OsString>>
where
    P: AsRef<Path>,
{
    let mut seen: HashMap<OsString, usize> = HashMap::new();
    let mut names = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let name = path
            .file_name()
            .ok_or_else(|| DedupError::InvalidPath(path.to_path_buf()))?
            .to_os_string();
        if let Some(&first) = seen.get(&name) {
            return Err(DedupError::Collision {
                name: name.to_string_lossy().into_owned(),
                first: paths[first].as_ref().to_path_buf(),
                second: path.to_path_buf(),
            });
        }
        seen.insert(name.clone(), i);
        names.push(name);
    }
    Ok(names)
}

/// Writer of files into an output directory.
///
/// Each file is first written to a temporary file in the same directory and then
/// renamed over the target, so readers never observe a truncated file.
pub struct CorpusWriter {
    output_dir: PathBuf,
}

impl CorpusWriter {
    /// Creates an instance writing under `output_dir`.
    pub fn new<P>(output_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Gets the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if it does not exist.
    pub fn create_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| DedupError::io(&self.output_dir, e))
    }

    /// Writes `content` to `output_dir/name`, replacing an existing file.
    pub fn write<N>(&self, name: N, content: &[u8]) -> Result<PathBuf>
    where
        N: AsRef<OsStr>,
    {
        let target = self.output_dir.join(name.as_ref());
        let mut tmp = self.temp_file().map_err(|e| DedupError::io(&target, e))?;
        tmp.write_all(content)
            .and_then(|_| tmp.flush())
            .map_err(|e| DedupError::io(&target, e))?;
        tmp.persist(&target)
            .map_err(|e| DedupError::io(&target, e.error))?;
        debug!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(target)
    }

    /// Opens a temporary file in the output directory. On Unix its mode is
    /// `0o666` less the umask, as for a file created with [`fs::write`].
    fn temp_file(&self) -> io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        builder.tempfile_in(&self.output_dir)
    }

    /// Writes the raw content of every retained document, returning the number
    /// of files written.
    pub fn write_documents(&self, documents: &[Document], resolution: &Resolution) -> Result<usize> {
        self.create_dir()?;
        let mut num_written = 0;
        for id in resolution.retained() {
            let doc = &documents[id];
            let name = doc
                .file_name()
                .ok_or_else(|| DedupError::InvalidPath(doc.source_path().to_path_buf()))?;
            self.write(name, doc.raw_content())?;
            num_written += 1;
        }
        Ok(num_written)
    }
}
