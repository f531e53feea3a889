//! Page path normalization and ancestry.
//!
//! Every lookup into the front-matter index goes through [`normalize`], so a
//! folder's index page and the folder itself share one key:
//!
//! | Input              | Normalized      |
//! |--------------------|-----------------|
//! | `/clients/acme/`   | `clients/acme`  |
//! | `clients/index`    | `clients`       |
//! | `index`, `/`, `""` | `index`         |

/// Key of the root index page.
pub const ROOT_INDEX: &str = "index";

/// Normalize a slash-separated page path into its index key.
///
/// Leading, trailing and repeated slashes are dropped, a trailing `/index`
/// segment is stripped, and an empty path becomes [`ROOT_INDEX`].
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() > 1 && segments.last() == Some(&ROOT_INDEX) {
        segments.pop();
    }

    if segments.is_empty() {
        ROOT_INDEX.to_owned()
    } else {
        segments.join("/")
    }
}

/// Ancestor folder paths of a normalized path, closest first.
///
/// `a/b/c` yields `a/b` then `a`. The root is not included.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.rmatch_indices('/').map(move |(i, _)| &path[..i])
}

/// Client slug implied by a path: the segment right after `client_root`.
///
/// `clients/acme/setup` with root `clients` gives `acme`.
pub fn client_slug<'a>(path: &'a str, client_root: &str) -> Option<&'a str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments.by_ref().find(|s| *s == client_root)?;
    segments.next().filter(|s| *s != ROOT_INDEX)
}
