//! Extension-based preview classification.

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "log", "env", "gitignore", "md", "markdown", "py", "js", "ts", "jsx", "tsx", "json",
    "yaml", "yml", "toml", "ini", "xml", "html", "css", "scss", "sass", "less", "sql", "sh",
    "bash", "zsh", "dockerfile", "makefile", "rb", "go", "rs", "java", "cpp", "c", "cs", "php",
    "swift", "kt", "scala",
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a file is shown when activated.
pub enum PreviewKind {
    /// Text content fetched and shown in the editor.
    Text,
    /// Image rendered from the raw download URL.
    Image,
    /// PDF rendered from the raw download URL.
    Pdf,
    /// Not previewable; offered as a download.
    DownloadOnly,
}

impl PreviewKind {
    /// Returns `true` when the preview renders by reference instead of fetching content.
    pub fn renders_by_reference(self) -> bool {
        matches!(self, Self::Image | Self::Pdf)
    }
}

/// Classifies a file extension (case-insensitive).
pub fn preview_kind(extension: Option<&str>) -> PreviewKind {
    let Some(ext) = extension.filter(|ext| !ext.is_empty()) else {
        return PreviewKind::DownloadOnly;
    };
    let ext = ext.to_ascii_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Text
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Image
    } else if ext == "pdf" {
        PreviewKind::Pdf
    } else {
        PreviewKind::DownloadOnly
    }
}

/// Returns `true` when the extension is on the preview allow-list.
pub fn is_previewable_file(extension: Option<&str>) -> bool {
    preview_kind(extension) != PreviewKind::DownloadOnly
}

/// Returns the lower-cased text after the last `.` of the file name, or `""` when there is none.
pub fn get_file_extension(path: &str) -> String {
    match super::path::file_name(path).rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Classifies a listing entry, preferring the backend extension hint.
///
/// Extension-less names such as `Makefile` are matched by their lower-cased file name.
pub fn preview_kind_for_path(path: &str, extension_hint: Option<&str>) -> PreviewKind {
    let ext = extension_hint
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| get_file_extension(path));
    if ext.is_empty() {
        preview_kind(Some(super::path::file_name(path)))
    } else {
        preview_kind(Some(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_membership() {
        assert!(is_previewable_file(Some("md")));
        assert!(is_previewable_file(Some("png")));
        assert!(is_previewable_file(Some("pdf")));
        assert!(is_previewable_file(Some("Dockerfile")));
        assert!(!is_previewable_file(Some("exe")));
        assert!(!is_previewable_file(Some("")));
        assert!(!is_previewable_file(None));
    }

    #[test]
    fn binary_kinds_render_by_reference() {
        assert_eq!(preview_kind(Some("JPG")), PreviewKind::Image);
        assert_eq!(preview_kind(Some("pdf")), PreviewKind::Pdf);
        assert_eq!(preview_kind(Some("rs")), PreviewKind::Text);
        assert!(PreviewKind::Image.renders_by_reference());
        assert!(PreviewKind::Pdf.renders_by_reference());
        assert!(!PreviewKind::Text.renders_by_reference());
    }

    #[test]
    fn extension_is_taken_after_last_dot() {
        assert_eq!(get_file_extension("archive.tar.GZ"), "gz");
        assert_eq!(get_file_extension("docs/readme.md"), "md");
        assert_eq!(get_file_extension("Makefile"), "");
        assert_eq!(get_file_extension(".gitignore"), "gitignore");
        assert_eq!(get_file_extension("v1.2/Makefile"), "");
    }

    #[test]
    fn listing_entries_fall_back_to_file_name() {
        assert_eq!(preview_kind_for_path("build/Makefile", None), PreviewKind::Text);
        assert_eq!(preview_kind_for_path("a/photo.PNG", None), PreviewKind::Image);
        assert_eq!(preview_kind_for_path("a/blob", Some("bin")), PreviewKind::DownloadOnly);
        assert_eq!(preview_kind_for_path("a/report", Some("pdf")), PreviewKind::Pdf);
    }
}
