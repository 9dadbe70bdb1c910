//! Code host links for results, and redirects for legacy livegrep fileviewer URLs.
//!
//! Only GitHub is understood: a repository named `github.com/<org>/<repo>`
//! links to its blob view.

use once_cell::sync::Lazy;
use regex::Regex;

const GITHUB_PREFIX: &str = "github.com/";
const GITHUB_ROOT: &str = "https://github.com/";

/// `https://github.com/<org>/<repo>` for GitHub-hosted repositories.
pub fn repository_url(repository: &str) -> Option<String> {
    repository
        .starts_with(GITHUB_PREFIX)
        .then(|| format!("https://{repository}"))
}

/// Blob URL of a file at a given version.
pub fn file_url(repository: &str, version: &str, file_name: &str) -> Option<String> {
    repository
        .starts_with(GITHUB_PREFIX)
        .then(|| format!("https://{repository}/blob/{version}/{file_name}"))
}

/// Anchor for one line of a file URL.
pub fn line_url(file_url: &str, line_number: usize) -> String {
    format!("{file_url}#L{line_number}")
}

static VIEW_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/view/([^/]*)/([^/]*)/(.*)").expect("valid regex"));
static DELVE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/delve/(.*)/(blob|tree)/(\w*)/(.*)").expect("valid regex"));
static EXPERIMENTAL_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/experimental/(.*)/\+/(.*):(.*)").expect("valid regex"));

/// GitHub URL for a livegrep fileviewer path, keeping the `#L..` fragment.
///
/// Returns `None` when a fileviewer path is recognized but malformed.
pub fn livegrep_redirect_url(path: &str, fragment: &str) -> Option<String> {
    let target = if path.starts_with("/view") {
        let caps = VIEW_PATH.captures(path)?;
        format!("{GITHUB_ROOT}{}/{}/{}", &caps[1], &caps[2], &caps[3])
    } else if path.starts_with("/delve") {
        let caps = DELVE_PATH.captures(path)?;
        format!(
            "{GITHUB_ROOT}{}/{}/{}/{}",
            &caps[1], &caps[2], &caps[3], &caps[4]
        )
    } else if path.starts_with("/experimental") {
        let caps = EXPERIMENTAL_PATH.captures(path)?;
        format!("{GITHUB_ROOT}{}/blob/{}/{}", &caps[1], &caps[2], &caps[3])
    } else {
        GITHUB_ROOT.to_string()
    };
    Some(target + fragment)
}
