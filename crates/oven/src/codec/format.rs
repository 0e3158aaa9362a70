use image::ImageFormat;
use std::fmt;

/// Container formats the codec can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Avif,
    Tiff,
}

impl ContainerFormat {
    pub const ALL: [ContainerFormat; 6] = [
        ContainerFormat::Jpeg,
        ContainerFormat::Png,
        ContainerFormat::WebP,
        ContainerFormat::Gif,
        ContainerFormat::Avif,
        ContainerFormat::Tiff,
    ];

    /// Map a file extension (case-insensitive, surrounding whitespace ignored).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim().to_ascii_uppercase().as_str() {
            "JPG" | "JPEG" => Some(Self::Jpeg),
            "PNG" => Some(Self::Png),
            "WEBP" => Some(Self::WebP),
            "GIF" => Some(Self::Gif),
            "AVIF" => Some(Self::Avif),
            "TIFF" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Avif => "image/avif",
            Self::Tiff => "image/tiff",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Gif => "gif",
            Self::Avif => "avif",
            Self::Tiff => "tiff",
        }
    }

    /// Whether the encoder for this format takes a quality setting.
    pub fn has_quality(self) -> bool {
        matches!(self, Self::Jpeg | Self::Avif)
    }

    pub(crate) fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Avif => Some(Self::Avif),
            ImageFormat::Tiff => Some(Self::Tiff),
            _ => None,
        }
    }

    pub(crate) fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::WebP => ImageFormat::WebP,
            Self::Gif => ImageFormat::Gif,
            Self::Avif => ImageFormat::Avif,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
