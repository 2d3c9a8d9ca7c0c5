//! Image extension fallback
//!
//! Config authors reference images with or without an extension; assets
//! on disk may be `.png`, `.jpg`, `.jpeg` or `.gif`. Resolution is a
//! sequential probe over an ordered candidate list: the referenced path
//! first (when it carries a known extension), then the alternates. The
//! probe itself is injected so the planning stays pure and testable -
//! in the browser it is an `Image.onload` check, in tests a lookup table.

/// Extensions tried, in order.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Reports whether an image at `path` actually loads.
pub trait ImageProbe {
    fn exists(&self, path: &str) -> bool;
}

/// Split off a known image extension, if the path has one.
fn split_known_extension(path: &str) -> Option<(&str, &str)> {
    let dot = path.rfind('.')?;
    let ext = &path[dot..];
    IMAGE_EXTENSIONS
        .iter()
        .find(|known| ext.eq_ignore_ascii_case(known))
        .map(|_| (&path[..dot], ext))
}

/// Ordered candidate paths for an image reference.
///
/// A path with a known extension is tried as-is first, then with each
/// alternate extension; an extensionless path tries every extension.
pub fn candidate_paths(path: &str) -> Vec<String> {
    match split_known_extension(path) {
        Some((base, ext)) => {
            let mut candidates = vec![path.to_string()];
            candidates.extend(
                IMAGE_EXTENSIONS
                    .iter()
                    .filter(|e| !ext.eq_ignore_ascii_case(e))
                    .map(|e| format!("{base}{e}")),
            );
            candidates
        }
        None => IMAGE_EXTENSIONS
            .iter()
            .map(|e| format!("{path}{e}"))
            .collect(),
    }
}

/// First candidate the probe confirms; falls back to `<base>.png` so the
/// caller always gets a usable path (a broken image beats a crash).
pub fn resolve_image<P: ImageProbe>(probe: &P, path: &str) -> String {
    for candidate in candidate_paths(path) {
        if probe.exists(&candidate) {
            return candidate;
        }
    }

    let base = split_known_extension(path)
        .map(|(base, _)| base)
        .unwrap_or(path);
    log::warn!("No working image for {path:?}, defaulting to {base}.png");
    format!("{base}.png")
}
