// CRN from the page path, and the path to navigate to on submission

/// The page's current navigation state, read once when a view is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    identifier: String,
    explicit: bool,
}

impl Route {
    pub fn from_path(path: &str, default_identifier: &str) -> Self {
        let explicit = !path.strip_prefix('/').unwrap_or(path).is_empty();
        Self {
            identifier: resolve_identifier(path, default_identifier),
            explicit,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// False when the page was opened without a CRN segment.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Percent-encoded path for this route, safe to use in a Location header.
    pub fn path(&self) -> String {
        format!("/{}", urlencoding::encode(&self.identifier))
    }
}

/// Strips one leading `/`; an empty remainder means the default CRN.
/// The remainder is otherwise used verbatim; bad CRNs surface as `no_results` upstream.
pub fn resolve_identifier(path: &str, default_identifier: &str) -> String {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        default_identifier.to_string()
    } else {
        rest.to_string()
    }
}

/// Path to navigate to for the text typed into the CRN box, or `None` to stay put.
/// The text becomes a single percent-encoded path segment.
pub fn submission_path(input: &str) -> Option<String> {
    let crn = input.trim();
    if crn.is_empty() {
        None
    } else {
        Some(format!("/{}", urlencoding::encode(crn)))
    }
}

/// Only same-origin absolute paths are accepted as a return target.
pub fn sanitize_return_path(from: Option<&str>) -> &str {
    match from {
        Some(p)
            if p.starts_with('/')
                && !p.starts_with("//")
                && p.bytes().all(|b| b.is_ascii_graphic() && b != b'\\') =>
        {
            p
        }
        _ => "/",
    }
}
