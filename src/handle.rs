//! `FileHandle`: one open file plus everything derived from it.
//!
//! A handle is created closed around a path. `open()` acquires the stream and
//! installs the resolved path, its split parts and a metadata snapshot in one
//! step; `close()` (or drop) releases them together. While closed every derived
//! accessor reports `NotOpen`.
//!
//! Move and copy both remember the read cursor and put it back afterwards, so
//! callers can interleave them with sequential reads.

use std::fs;
use std::io::{self, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{FileHandleError, Result};
use crate::metadata::MetadataSnapshot;
use crate::platform::{NativeIo, PlatformIo, same_file};
use crate::pod::NativeValue;
use crate::split::{PathParts, split_path};
use crate::transfer::{self, CopyOptions, CopyResult, DEFAULT_COPY_BUFFER_SIZE};

// Scalar reads up to this size decode from a stack buffer.
const INLINE_READ: usize = 16;

/// State that only exists while the stream is open.
#[derive(Debug)]
struct OpenState {
    stream: fs::File,
    resolved: PathBuf,
    parts: PathParts,
    metadata: MetadataSnapshot,
}

/// Exclusive owner of a single read stream and its cached path/metadata.
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    copy_buffer_size: usize,
    state: Option<OpenState>,
}

impl FileHandle {
    /// Create a closed handle for `path`. Nothing touches the filesystem yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            state: None,
        }
    }

    /// Create and open in one call.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let mut handle = Self::new(path);
        handle.open()?;
        Ok(handle)
    }

    /// Chunk size used by [`copy_to`](Self::copy_to). Zero is clamped to one.
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size.max(1);
        self
    }

    pub fn copy_buffer_size(&self) -> usize {
        self.copy_buffer_size
    }

    /// Open the stored path for binary reading.
    ///
    /// An already-open stream is closed first; the stored path survives.
    /// On failure the handle is closed and nothing derived is installed.
    pub fn open(&mut self) -> Result<()> {
        if self.state.is_some() {
            debug!(path = %self.path.display(), "reopening: closing current stream first");
            self.close();
        }
        let state = open_state(&self.path)?;
        debug!(
            path = %self.path.display(),
            resolved = %state.resolved.display(),
            size = state.metadata.size,
            "opened file"
        );
        self.state = Some(state);
        Ok(())
    }

    /// Release the stream and clear every derived field. No-op when closed.
    pub fn close(&mut self) {
        if let Some(state) = self.state.take() {
            debug!(resolved = %state.resolved.display(), "closed file");
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Rewind the read cursor to the start of the file.
    pub fn reset(&mut self) -> Result<()> {
        self.seek_to(0)
    }

    /// Move the read cursor to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.stream_mut()?
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(FileHandleError::io("seek"))
    }

    /// Current read cursor.
    pub fn position(&mut self) -> Result<u64> {
        self.stream_mut()?
            .stream_position()
            .map_err(FileHandleError::io("tell"))
    }

    /// Rename the file on disk to `destination`.
    ///
    /// The stream is closed around the rename and reopened afterwards, against
    /// `destination` on success or the original path on failure, and the cursor
    /// is restored in both cases. There is no copy fallback: moves across
    /// volumes fail with `RenameFailed`.
    ///
    /// The supplied path is renamed, not its resolved target: a handle opened
    /// through a symlink moves the link itself.
    pub fn move_to(&mut self, destination: impl AsRef<Path>) -> Result<()> {
        let destination = destination.as_ref();
        let pos = self.position()?;
        let from = self.path.clone();

        self.close();
        match fs::rename(&from, destination) {
            Ok(()) => {
                info!(src = %from.display(), dest = %destination.display(), "renamed file");
                self.path = destination.to_path_buf();
                self.reopen_at(pos)
            }
            Err(source) => {
                warn!(src = %from.display(), dest = %destination.display(), error = %source, "rename failed; reopening original");
                self.reopen_at(pos)?;
                Err(FileHandleError::RenameFailed {
                    from,
                    to: destination.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Copy the whole file to `destination` (created or truncated).
    pub fn copy_to(&mut self, destination: impl AsRef<Path>) -> Result<CopyResult> {
        self.copy_to_with(destination, CopyOptions::default())
    }

    /// Copy with explicit durability / timestamp options.
    ///
    /// The source cursor is restored whether or not the transfer succeeds.
    /// A failed transfer removes the partial destination (best-effort) when it
    /// is a regular file; devices and pipes are left in place.
    pub fn copy_to_with(
        &mut self,
        destination: impl AsRef<Path>,
        options: CopyOptions,
    ) -> Result<CopyResult> {
        self.copy_to_with_io::<NativeIo>(destination.as_ref(), options)
    }

    /// [`copy_to_with`](Self::copy_to_with) over an explicit set of stream
    /// primitives for the destination and the transfer loop.
    pub fn copy_to_with_io<I: PlatformIo>(
        &mut self,
        destination: &Path,
        options: CopyOptions,
    ) -> Result<CopyResult> {
        let buf_size = self.copy_buffer_size;
        let state = self.state.as_mut().ok_or(FileHandleError::NotOpen)?;

        // Opening the source for write would truncate it before the first read,
        // whether it is reached by the same path or through a hard link.
        let aliased = match (state.stream.metadata(), fs::metadata(destination)) {
            (Ok(src), Ok(dst)) => same_file(&src, &dst),
            _ => false,
        };
        if aliased || dunce::canonicalize(destination).is_ok_and(|d| d == state.resolved) {
            return Err(FileHandleError::CopyDestinationUnwritable {
                path: destination.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "destination is the source file"),
            });
        }

        let mut dest_file = I::open_for_write(destination).map_err(|source| {
            FileHandleError::CopyDestinationUnwritable {
                path: destination.to_path_buf(),
                source,
            }
        })?;
        let removable = dest_file.metadata().is_ok_and(|m| m.is_file())
            && fs::symlink_metadata(destination).is_ok_and(|m| m.file_type().is_file());

        let pos = state
            .stream
            .stream_position()
            .map_err(FileHandleError::io("tell"))?;
        let outcome =
            transfer::copy_stream::<I>(&mut state.stream, &mut dest_file, buf_size, options.durability);
        let restored = state.stream.seek(SeekFrom::Start(pos));
        drop(dest_file);

        let bytes = match outcome {
            Ok(bytes) => bytes,
            Err(source) => {
                if removable {
                    if let Err(e) = fs::remove_file(destination) {
                        warn!(path = %destination.display(), error = %e, "failed to remove partial copy");
                    }
                } else {
                    debug!(path = %destination.display(), "destination is not a regular file; leaving it in place");
                }
                restored.map_err(FileHandleError::io("seek"))?;
                return Err(FileHandleError::Io { op: "copy", source });
            }
        };
        restored.map_err(FileHandleError::io("seek"))?;

        if options.preserve_times {
            transfer::preserve_times(&state.resolved, destination);
        }

        info!(
            src = %state.resolved.display(),
            dest = %destination.display(),
            bytes,
            buf_size,
            "copied file"
        );
        Ok(CopyResult {
            bytes,
            buf_size,
            mode: options.durability,
        })
    }

    /// Read one `T` in native byte order; `EndOfFile` if too few bytes remain.
    /// Bytes consumed by a short read are not given back.
    pub fn read_or_fail<T: NativeValue>(&mut self) -> Result<T> {
        match self.read_value::<T>()? {
            (Some(value), _) => Ok(value),
            (None, available) => Err(FileHandleError::EndOfFile {
                needed: T::SIZE,
                available,
            }),
        }
    }

    /// Read one `T` into `out`. Returns the number of whole values read (0 or 1);
    /// `out` is untouched when the file runs short.
    pub fn try_read<T: NativeValue>(&mut self, out: &mut T) -> Result<usize> {
        match self.read_value::<T>()? {
            (Some(value), _) => {
                *out = value;
                Ok(1)
            }
            (None, _) => Ok(0),
        }
    }

    // Decoded value (if complete) and the number of bytes consumed.
    fn read_value<T: NativeValue>(&mut self) -> Result<(Option<T>, usize)> {
        let mut inline = [0u8; INLINE_READ];
        let mut heap = Vec::new();
        let raw: &mut [u8] = if T::SIZE <= INLINE_READ {
            &mut inline[..T::SIZE]
        } else {
            heap.resize(T::SIZE, 0);
            &mut heap
        };
        let n = self.read_bytes(raw)?;
        if n < T::SIZE {
            return Ok((None, n));
        }
        Ok((Some(T::from_native_bytes(raw)), n))
    }

    /// Read up to `buf.len()` bytes. A short count (possibly 0) means end of file.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self.stream_mut()?;
        NativeIo::read_buffer(stream, buf).map_err(FileHandleError::io("read"))
    }

    /// Re-stat the file and replace the snapshot.
    pub fn refresh_metadata(&mut self) -> Result<&MetadataSnapshot> {
        let state = self.state.as_mut().ok_or(FileHandleError::NotOpen)?;
        state.metadata = MetadataSnapshot::capture(&state.resolved);
        Ok(&state.metadata)
    }

    /// The path as supplied (or as last moved to).
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolved_path(&self) -> Result<&Path> {
        Ok(&self.state()?.resolved)
    }

    pub fn parts(&self) -> Result<&PathParts> {
        Ok(&self.state()?.parts)
    }

    pub fn drive(&self) -> Result<&str> {
        Ok(&self.state()?.parts.drive)
    }

    pub fn directory(&self) -> Result<&str> {
        Ok(&self.state()?.parts.directory)
    }

    pub fn base_name(&self) -> Result<&str> {
        Ok(&self.state()?.parts.base_name)
    }

    pub fn extension(&self) -> Result<&str> {
        Ok(&self.state()?.parts.extension)
    }

    pub fn metadata(&self) -> Result<&MetadataSnapshot> {
        Ok(&self.state()?.metadata)
    }

    pub fn size(&self) -> Result<u64> {
        Ok(self.metadata()?.size)
    }

    pub fn owner_user_id(&self) -> Result<u32> {
        Ok(self.metadata()?.owner_user_id)
    }

    pub fn owner_group_id(&self) -> Result<u32> {
        Ok(self.metadata()?.owner_group_id)
    }

    pub fn create_time(&self) -> Result<i64> {
        Ok(self.metadata()?.create_time)
    }

    pub fn modify_time(&self) -> Result<i64> {
        Ok(self.metadata()?.modify_time)
    }

    pub fn access_time(&self) -> Result<i64> {
        Ok(self.metadata()?.access_time)
    }

    pub fn create_time_string(&self) -> Result<String> {
        Ok(self.metadata()?.create_time_string())
    }

    pub fn modify_time_string(&self) -> Result<String> {
        Ok(self.metadata()?.modify_time_string())
    }

    pub fn access_time_string(&self) -> Result<String> {
        Ok(self.metadata()?.access_time_string())
    }

    fn state(&self) -> Result<&OpenState> {
        self.state.as_ref().ok_or(FileHandleError::NotOpen)
    }

    fn stream_mut(&mut self) -> Result<&mut fs::File> {
        self.state
            .as_mut()
            .map(|s| &mut s.stream)
            .ok_or(FileHandleError::NotOpen)
    }

    fn reopen_at(&mut self, pos: u64) -> Result<()> {
        self.open()?;
        self.seek_to(pos)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open `path` and derive everything the handle caches. Nothing is installed
/// on the handle until this returns Ok.
fn open_state(path: &Path) -> Result<OpenState> {
    let failed = |source: io::Error| FileHandleError::OpenFailed {
        path: path.to_path_buf(),
        source,
    };

    let stream = NativeIo::open_for_read(path).map_err(failed)?;
    if let Ok(meta) = stream.metadata()
        && !meta.is_file()
    {
        return Err(failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let resolved = match dunce::canonicalize(path) {
        Ok(p) => p,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "canonicalize failed; using absolute path");
            std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
        }
    };
    let parts = split_path(&resolved);
    let metadata = MetadataSnapshot::capture(&resolved);

    Ok(OpenState {
        stream,
        resolved,
        parts,
        metadata,
    })
}
