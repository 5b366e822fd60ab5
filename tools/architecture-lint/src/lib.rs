//! Repo-local architectural lint for the user directory client.
//!
//! The client keeps page logic in `domain` behind ports, with `inbound`
//! adapters driving it and `outbound` adapters implementing its ports. This
//! lint parses every file under those three directories and reports:
//!
//! - `domain` code reaching into adapter modules or transport, terminal and
//!   configuration crates
//! - `inbound` code importing `outbound` modules or the HTTP client stack
//! - `outbound` code importing `inbound` modules or terminal crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use thiserror::Error;

/// Library crate name used in absolute `user_directory::...` paths.
const CRATE_NAME: &str = "user_directory";

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `client/src`.
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {} while linting architecture: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    #[error("architecture boundary violations:\n{}", list(.0))]
    Violations(Vec<Violation>),
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `client/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the sources of the client crate rooted at `client_dir`.
pub fn lint_client_sources(client_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = client_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            read_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources. Files outside the three layers are ignored.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let Some(layer) = Layer::of(&source.file) else {
            continue;
        };
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str();
        Self::ALL.into_iter().find(|layer| first == layer.dir())
    }

    fn from_module(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| name == layer.dir())
    }

    const fn forbidden_layers(self) -> &'static [Self] {
        match self {
            Self::Domain => &[Self::Inbound, Self::Outbound],
            Self::Inbound => &[Self::Outbound],
            Self::Outbound => &[Self::Inbound],
        }
    }

    const fn forbidden_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "actix_web",
                "clap",
                "color_eyre",
                "ortho_config",
                "reqwest",
                "tracing_subscriber",
                "url",
            ],
            Self::Inbound => &["actix_web", "ortho_config", "reqwest", "url"],
            Self::Outbound => &["clap", "color_eyre", "ortho_config"],
        }
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let mut paths = PathCollector::default();
    paths.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for path in &paths.0 {
        match classify(path) {
            Some(Target::Module(target)) if layer.forbidden_layers().contains(&target) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{}",
                    layer.dir(),
                    target.dir()
                ));
            }
            Some(Target::Crate(name)) if layer.forbidden_crates().contains(&name) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{name}`",
                    layer.dir()
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

/// What the first meaningful segment of a path refers to.
enum Target<'a> {
    Module(Layer),
    Crate(&'a str),
}

fn classify(path: &[String]) -> Option<Target<'_>> {
    let first = path.first()?.as_str();
    if let Some(layer) = Layer::from_module(first) {
        return Some(Target::Module(layer));
    }
    let relative = matches!(first, "crate" | "self" | "super");
    if relative || first == CRATE_NAME {
        return path
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super" | CRATE_NAME))
            .and_then(Layer::from_module)
            .map(Target::Module);
    }
    // Single identifiers are usually locals or prelude items, not crates.
    (path.len() > 1).then_some(Target::Crate(first))
}

/// Every path and `use` tree leaf mentioned in a file, as segment lists.
#[derive(Default)]
struct PathCollector(BTreeSet<Vec<String>>);

impl PathCollector {
    fn walk_use(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.walk_use(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.0.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.0.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.0.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.walk_use(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.0.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.walk_use(&node.tree, Vec::new());
    }
}

fn read_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            read_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
