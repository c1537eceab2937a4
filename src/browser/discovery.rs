use std::path::PathBuf;

/// Candidate binary names probed on Unix-like hosts, in priority order.
pub const CANDIDATE_BINARIES: &[&str] = &[
    "google-chrome-stable",
    "google-chrome",
    "chromium-browser",
    "chromium",
];

/// Pinned Chrome build probed on Windows development hosts.
#[cfg(target_os = "windows")]
const WINDOWS_CHROME_SEGMENTS: &[&str] = &[
    ".cache",
    "puppeteer",
    "chrome",
    "win64-141.0.7390.78",
    "chrome-win64",
    "chrome.exe",
];

/// Resolve a rendering-engine executable from the candidate list using the
/// supplied probe. The first candidate the probe resolves wins; `None` means
/// no explicit path and the engine's own bundled default is used.
///
/// Resolution never fails a request - it only decides which binary launches.
pub fn resolve_engine_path<P>(probe: P) -> Option<PathBuf>
where
    P: Fn(&str) -> Option<PathBuf>,
{
    CANDIDATE_BINARIES.iter().find_map(|name| probe(name))
}

/// Discover the engine executable for the current platform.
///
/// Windows probes one well-known install path under the user's home
/// directory; other platforms probe the candidate binary names on `PATH`.
pub fn discover() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let mut path = dirs::home_dir()?;
        for segment in WINDOWS_CHROME_SEGMENTS {
            path.push(segment);
        }
        path.exists().then_some(path)
    }

    #[cfg(not(target_os = "windows"))]
    {
        resolve_engine_path(|name| which::which(name).ok())
    }
}
