use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Capability to open the file a configuration value refers to.
///
/// Implemented for [`OpenOptions`], so callers pick the access mode the same way they would for
/// [`OpenOptions::open`]. The returned handle is owned by the caller and closed on drop.
pub trait OpenFile {
    type Handle;

    fn open_file(&self, path: &Path) -> io::Result<Self::Handle>;
}

impl OpenFile for OpenOptions {
    type Handle = File;

    fn open_file(&self, path: &Path) -> io::Result<File> {
        self.open(path)
    }
}

impl<T: OpenFile + ?Sized> OpenFile for &T {
    type Handle = T::Handle;

    fn open_file(&self, path: &Path) -> io::Result<Self::Handle> {
        (**self).open_file(path)
    }
}

/// Opens files for reading only.
#[must_use]
pub fn read_only() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true);
    options
}
