//! Decides whether a located module belongs in the bundle.

use std::path::Path;

/// Classifies a module's on-disk location.
///
/// The resolver consults exactly one implementation, so a different policy
/// (for example an installed-distribution index) can replace the default
/// without touching the resolution walk.
pub trait PackageFilter {
    /// `true` when the module at `path` is third party and must be bundled.
    fn is_third_party(&self, path: &Path) -> bool;
}

/// Path markers of third-party install roots.
pub const SITE_MARKERS: &[&str] = &["site-packages", "dist-packages"];

/// Substring heuristic over the install layout.
///
/// A path containing one of the markers is third party; anything else is
/// taken to be the standard library or the project's own source. A
/// first-party package installed under a site directory (or a third-party one
/// vendored elsewhere) is misclassified.
#[derive(Debug, Clone)]
pub struct SitePackages {
    markers: Vec<String>,
}

impl SitePackages {
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SitePackages {
    fn default() -> Self {
        Self::with_markers(SITE_MARKERS.iter().copied())
    }
}

impl PackageFilter for SitePackages {
    fn is_third_party(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.markers.iter().any(|marker| path.contains(marker.as_str()))
    }
}

impl<F: Fn(&Path) -> bool> PackageFilter for F {
    fn is_third_party(&self, path: &Path) -> bool {
        self(path)
    }
}
