use oven::ContainerFormat;

/// Final dot-delimited suffix of a filename.
///
/// A filename without a dot has no extension. A trailing dot yields an
/// empty extension, which no format accepts.
pub fn extension(filename: &str) -> Option<&str> {
    filename
        .trim()
        .rsplit_once('.')
        .map(|(_, extension)| extension)
}

/// Detect the upload's container format from its filename.
pub fn format_from_filename(filename: &str) -> Option<ContainerFormat> {
    extension(filename).and_then(ContainerFormat::from_extension)
}
