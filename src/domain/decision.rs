//! Trailing-slash redirect decision.
//!
//! A path is canonical only in its slashed form. Given a request path and the
//! canonical set, the decision is one of:
//!
//! | slashed form canonical? | path ends with `/` | outcome |
//! |---|---|---|
//! | yes | yes | pass through |
//! | yes | no | 301 to the slashed form |
//! | no | yes | 301 to the unslashed form |
//! | no | no | pass through |
//!
//! A path ending in several slashes is never in either form and is redirected
//! straight to the form the table selects.

use crate::domain::canonical::CanonicalUrlSet;

/// Outcome of the redirect decision for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Serve the original request unchanged.
    PassThrough,
    /// Answer with `301 Moved Permanently` to `target` (a path, resolved
    /// against the request origin by the caller).
    Redirect { target: String },
}

/// The two slash variants derived from a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathForms<'a> {
    pub original: &'a str,
    pub with_slash: String,
    pub without_slash: &'a str,
}

impl<'a> PathForms<'a> {
    /// Splits `path` on its trailing slashes. Repeated slashes (`/blog//`)
    /// collapse into the same two forms as a single one.
    pub fn new(path: &'a str) -> Self {
        let without_slash = path.trim_end_matches('/');

        Self {
            original: path,
            with_slash: format!("{}/", without_slash),
            without_slash,
        }
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.original.ends_with('/')
    }
}

/// Decides between pass-through and a redirect to the slash-normalized form.
///
/// Never consults the store: `canonical` is the already-resolved list.
///
/// A path already in its correct form passes through; any other path is
/// redirected once to it. The root `/` has no unslashed form, so it is its
/// own target and a non-canonical `/` passes through.
pub fn decide(path: &str, canonical: &CanonicalUrlSet) -> Decision {
    let forms = PathForms::new(path);

    let target = if canonical.contains(&forms.with_slash) || forms.without_slash.is_empty() {
        forms.with_slash
    } else {
        forms.without_slash.to_string()
    };

    if target == forms.original {
        Decision::PassThrough
    } else {
        Decision::Redirect { target }
    }
}
