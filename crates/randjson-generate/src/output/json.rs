use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use randjson_core::{Formatting, Node};

use crate::errors::GenerationError;
use crate::progress::{CancelToken, ProgressObserver};
use crate::writer::{JsonWriter, WriteSummary};

/// Write a document to `path`, replacing any existing file.
///
/// On failure the partially written file is left in place.
pub fn write_json_file<O>(
    path: &Path,
    root: &Node,
    formatting: Formatting,
    observer: &mut O,
    cancel: &CancelToken,
) -> Result<WriteSummary, GenerationError>
where
    O: ProgressObserver + ?Sized,
{
    let file = BufWriter::new(File::create(path)?);
    let mut writer = JsonWriter::new(file, formatting);
    let summary = writer.write_document(root, &mut *observer, cancel)?;

    let file = writer
        .into_inner()
        .into_inner()
        .map_err(|err| err.into_error())?;
    drop(file);

    Ok(summary)
}
