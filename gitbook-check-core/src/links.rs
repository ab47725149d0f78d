//! Markdown link extraction and resolution
//!
//! Links are found with a single regular expression applied line by line, so
//! a link never spans lines. Targets are taken literally and resolved against
//! the documentation root.

use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is a valid regex")
});

/// A `[label](target)` occurrence in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// Display text between the brackets
    pub label:  String,
    /// Literal target between the parentheses
    pub target: String,
    /// 1-based line number of the occurrence
    pub line:   usize,
}

impl LinkReference {
    /// Path the target points at; relative targets resolve against `root`
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.target)
    }

    /// Whether the target exists on disk
    pub fn exists(&self, root: &Path) -> bool {
        self.resolve(root).exists()
    }
}

/// Extract every markdown link from `content`, in document order
pub fn extract_links(content: &str) -> Vec<LinkReference> {
    content
        .lines()
        .enumerate()
        .flat_map(|(index, line)| {
            LINK_PATTERN.captures_iter(line).map(move |caps| LinkReference {
                label:  caps[1].to_string(),
                target: caps[2].to_string(),
                line:   index + 1,
            })
        })
        .collect()
}

/// A link paired with whether its target exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedLink {
    /// The link as found in the document
    #[serde(flatten)]
    pub link:   LinkReference,
    /// Whether the target resolved under the root
    pub exists: bool,
}

/// Links in document order with their resolution status
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkCheckSummary {
    /// Checked links, in the order they appear
    pub links: Vec<CheckedLink>,
}

impl LinkCheckSummary {
    /// Resolve each link against `root`, touching the filesystem once per link
    pub fn check(root: &Path, links: Vec<LinkReference>) -> Self {
        let links = links
            .into_iter()
            .map(|link| {
                let exists = link.exists(root);
                CheckedLink { link, exists }
            })
            .collect();
        Self { links }
    }

    /// Links whose target is missing
    pub fn invalid(&self) -> impl Iterator<Item = &LinkReference> {
        self.links.iter().filter(|c| !c.exists).map(|c| &c.link)
    }

    /// Number of links whose target exists
    pub fn valid_count(&self) -> usize {
        self.links.iter().filter(|c| c.exists).count()
    }

    /// Number of links examined
    pub fn total(&self) -> usize {
        self.links.len()
    }

    /// True when no link is broken
    pub fn is_success(&self) -> bool {
        self.links.iter().all(|c| c.exists)
    }
}
