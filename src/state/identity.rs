// Identity resolution.
// Picks the GitHub username from an ordered list of sources, ending at a placeholder.

use std::sync::LazyLock;

use regex::Regex;

/// Username shipped in unconfigured setups. Resolving to it means "not set up".
pub const PLACEHOLDER_IDENTITY: &str = "yourusername";

static PROFILE_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/([^/?#]+)").ok());

/// One place a username may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// Explicitly configured username.
    Override(String),
    /// A link to the user's GitHub profile, e.g. from a contact card.
    ProfileLink(String),
    /// The unconfigured default.
    Placeholder,
}

impl IdentitySource {
    /// The username this source yields, if any.
    pub fn candidate(&self) -> Option<String> {
        match self {
            IdentitySource::Override(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            IdentitySource::ProfileLink(href) => username_from_link(href),
            IdentitySource::Placeholder => Some(PLACEHOLDER_IDENTITY.to_string()),
        }
    }
}

/// Outcome of identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Resolved(String),
    Unconfigured,
}

impl Identity {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Identity::Resolved(name) => Some(name),
            Identity::Unconfigured => None,
        }
    }
}

/// First source that yields a username wins. The placeholder, or nothing at
/// all, resolves to [`Identity::Unconfigured`].
pub fn resolve_identity(sources: &[IdentitySource]) -> Identity {
    match sources.iter().find_map(IdentitySource::candidate) {
        Some(name) if name != PLACEHOLDER_IDENTITY => Identity::Resolved(name),
        _ => Identity::Unconfigured,
    }
}

/// Extract the username from a GitHub profile URL. Account settings links
/// are not profiles and yield nothing.
pub fn username_from_link(href: &str) -> Option<String> {
    let captures = PROFILE_LINK.as_ref()?.captures(href)?;
    let name = captures.get(1)?.as_str();
    if name.to_ascii_lowercase().starts_with("settings") {
        return None;
    }
    Some(name.to_string())
}
