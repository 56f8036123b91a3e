// src/tools/content.rs
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Open-directory fragment used for engines without full Google syntax.
pub const SIMPLE_OPEN_DIRECTORY: &str = "intitle:\"index of\"";

/// Download-focus fragment used for engines without full Google syntax.
pub const SIMPLE_DOWNLOAD_FOCUS: &str = "intitle:\"index of\" download";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    All,
    Videos,
    Downloads,
    Documents,
    Audio,
    Software,
    Images,
    Archives,
}

/// Extension constraint attached to a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extensions {
    /// No extension list at all.
    Unconstrained,
    /// The "any extension" wildcard.
    Wildcard,
    Listed(&'static [&'static str]),
}

impl Extensions {
    /// The extension list, if it is a real non-empty list.
    pub fn concrete(&self) -> Option<&'static [&'static str]> {
        match self {
            Extensions::Listed(list) if !list.is_empty() => Some(list),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTypeEntry {
    pub extensions: Extensions,
    pub keywords: &'static [&'static str],
    /// Google-syntax base fragment.
    pub base_dork: &'static str,
}

static ALL: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Unconstrained,
    keywords: &[],
    base_dork: SIMPLE_OPEN_DIRECTORY,
};

static VIDEOS: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&["mp4", "mkv", "avi", "flv", "mov", "wmv", "webm"]),
    keywords: &["movie", "video", "film", "episode"],
    base_dork: "intitle:\"index of\" (mp4|mkv|avi|flv) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

static DOWNLOADS: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Wildcard,
    keywords: &["download", "free", "direct link"],
    base_dork: "(intitle:download OR inurl:download OR inurl:dl) -inurl:(signup|login|register)",
};

static DOCUMENTS: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&[
        "pdf", "doc", "docx", "txt", "rtf", "odt", "xls", "xlsx", "ppt", "pptx",
    ]),
    keywords: &["document", "report", "manual", "guide"],
    base_dork: "intitle:\"index of\" (pdf|doc|docx|txt) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

static AUDIO: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&["mp3", "wav", "flac", "aac", "m4a", "ogg", "wma"]),
    keywords: &["music", "audio", "song", "album"],
    base_dork: "intitle:\"index of\" (mp3|wav|flac|aac) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

static SOFTWARE: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&["exe", "msi", "dmg", "pkg", "deb", "rpm", "apk", "ipa", "iso"]),
    keywords: &["software", "application", "installer", "setup"],
    base_dork: "intitle:\"index of\" (exe|iso|dmg|apk) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

static IMAGES: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico"]),
    keywords: &["image", "photo", "picture", "gallery"],
    base_dork: "intitle:\"index of\" (jpg|png|gif|svg) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

static ARCHIVES: ContentTypeEntry = ContentTypeEntry {
    extensions: Extensions::Listed(&["zip", "rar", "7z", "tar", "gz", "bz2", "xz"]),
    keywords: &["archive", "backup", "compressed"],
    base_dork: "intitle:\"index of\" (zip|rar|7z|tar) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)",
};

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        ContentType::All,
        ContentType::Videos,
        ContentType::Downloads,
        ContentType::Documents,
        ContentType::Audio,
        ContentType::Software,
        ContentType::Images,
        ContentType::Archives,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::All => "all",
            ContentType::Videos => "videos",
            ContentType::Downloads => "downloads",
            ContentType::Documents => "documents",
            ContentType::Audio => "audio",
            ContentType::Software => "software",
            ContentType::Images => "images",
            ContentType::Archives => "archives",
        }
    }

    pub fn entry(self) -> &'static ContentTypeEntry {
        entry_for(self)
    }
}

pub fn entry_for(content_type: ContentType) -> &'static ContentTypeEntry {
    match content_type {
        ContentType::All => &ALL,
        ContentType::Videos => &VIDEOS,
        ContentType::Downloads => &DOWNLOADS,
        ContentType::Documents => &DOCUMENTS,
        ContentType::Audio => &AUDIO,
        ContentType::Software => &SOFTWARE,
        ContentType::Images => &IMAGES,
        ContentType::Archives => &ARCHIVES,
    }
}

/// The download-landing-page fragment, full or simplified.
pub fn download_focus_fragment(full_syntax: bool) -> &'static str {
    if full_syntax {
        DOWNLOADS.base_dork
    } else {
        SIMPLE_DOWNLOAD_FOCUS
    }
}

/// The open-directory fragment for a content type, full or simplified.
pub fn open_directory_fragment(content_type: ContentType, full_syntax: bool) -> &'static str {
    if full_syntax {
        content_type.entry().base_dork
    } else {
        SIMPLE_OPEN_DIRECTORY
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == wanted)
            .ok_or_else(|| format!("Unknown content type: {}", s))
    }
}

/// Deserialize an optional content type, treating unknown or empty keys as
/// "not set" rather than rejecting the whole request.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<ContentType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(ct) => Some(ct),
        Err(e) => {
            if !value.trim().is_empty() {
                log::warn!("{}; ignoring content type", e);
            }
            None
        }
    }))
}
