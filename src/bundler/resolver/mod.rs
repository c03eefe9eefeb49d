//! Third-party dependency discovery.
//!
//! The scripts are evaluated once (see [`probe`]); every module and every
//! imported object left in their namespace is traced back to a file or
//! directory on disk, and what the [`PackageFilter`] accepts becomes a
//! [`PackageRef`] in the [`ResolvedSet`].
//!
//! # Classification
//!
//! For a module, in order:
//!
//! 1. an advertised parent package distinct from the module is resolved
//!    first, and if it is found the parent is recorded instead of the module
//! 2. the first entry of the package search path (an empty search path is a
//!    namespace package without content and is skipped)
//! 3. the backing file
//! 4. otherwise the module is built in and skipped
//!
//! Objects that are not modules are resolved through their owning module and
//! recorded under the name the script bound them to.

pub mod context;
pub mod filter;
pub mod probe;

pub use context::{Binding, ModuleInfo, NamedBinding, RuntimeContext};
pub use filter::{PackageFilter, SitePackages};

use crate::bundler::{Error, Result, error::Context};
use context::NAMESPACE_NAME;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Parent-package hops followed before giving up on a module.
const MAX_PARENT_DEPTH: usize = 32;

/// One dependency unit to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Name the scripts reference the dependency by
    pub logical_name: String,
    /// Top-level module name the archive tree is rooted under
    pub import_name: String,
    /// Package directory or single module file
    pub filesystem_path: PathBuf,
    /// `filesystem_path` is a directory
    pub is_package: bool,
}

impl PackageRef {
    /// Build a reference for `module` located at `path`.
    ///
    /// Dotted modules are widened to their top-level package so the archive
    /// reproduces the import hierarchy: `a.b` found at `.../a/b` becomes `a`
    /// rooted at `.../a`.
    pub fn new(logical_name: impl Into<String>, module: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let import_name = module.split('.').next().unwrap_or(module).to_string();
        let depth = module.matches('.').count();

        let (filesystem_path, is_package) = if depth == 0 {
            let is_package = path.is_dir();
            (path, is_package)
        } else {
            (package_root(&path, depth), true)
        };

        Self {
            logical_name: logical_name.into(),
            import_name,
            filesystem_path,
            is_package,
        }
    }
}

/// Walk up from a submodule's location to its top-level package directory.
fn package_root(path: &Path, depth: usize) -> PathBuf {
    let (mut root, mut hops) = if path.is_dir() {
        (path, depth)
    } else {
        // `a/b/c.py` sits in the directory of `a.b`
        (path.parent().unwrap_or(path), depth - 1)
    };
    while hops > 0 {
        match root.parent() {
            Some(parent) => root = parent,
            None => break,
        }
        hops -= 1;
    }
    root.to_path_buf()
}

/// Dependencies keyed by logical name, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    entries: Vec<PackageRef>,
}

impl ResolvedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `package` unless its logical name is already present.
    ///
    /// Returns `false` when an earlier entry won.
    pub fn insert(&mut self, package: PackageRef) -> bool {
        if self.contains(&package.logical_name) {
            log::debug!("{} already resolved, keeping first", package.logical_name);
            return false;
        }
        self.entries.push(package);
        true
    }

    pub fn contains(&self, logical_name: &str) -> bool {
        self.get(logical_name).is_some()
    }

    pub fn get(&self, logical_name: &str) -> Option<&PackageRef> {
        self.entries.iter().find(|p| p.logical_name == logical_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageRef> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.logical_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a PackageRef;
    type IntoIter = std::slice::Iter<'a, PackageRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Where a module was found.
#[derive(Debug)]
struct Location {
    /// Module whose path was used (a parent package when one was followed)
    module: String,
    path: PathBuf,
    via_parent: bool,
}

/// Discovers the third-party packages a set of scripts depends on.
#[derive(Debug, Clone)]
pub struct Resolver<F = SitePackages> {
    interpreter: PathBuf,
    filter: F,
}

impl Resolver<SitePackages> {
    /// Resolver evaluating scripts with `interpreter` and the default
    /// site-packages filter.
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            filter: SitePackages::default(),
        }
    }
}

impl<F: PackageFilter> Resolver<F> {
    /// Swap the third-party predicate.
    pub fn with_filter<G: PackageFilter>(self, filter: G) -> Resolver<G> {
        Resolver {
            interpreter: self.interpreter,
            filter,
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Evaluate `scripts` once and resolve their dependencies.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingScript`] - the entry script (the first) does not
    ///   exist; later missing scripts are skipped with a warning
    /// * [`Error::Execution`] - evaluation failed
    pub async fn resolve(&self, scripts: &[PathBuf]) -> Result<ResolvedSet> {
        let scripts = collect_scripts(scripts)?;
        let context = probe::evaluate(&self.interpreter, &scripts).await?;
        Ok(self.resolve_context(&context))
    }

    /// Resolve an already captured context.
    pub fn resolve_context(&self, context: &RuntimeContext) -> ResolvedSet {
        let mut resolved = ResolvedSet::new();

        if let Some(manifest) = &context.manifest {
            log::info!(
                "Found module manifest, bundling {} declared module(s) without scanning",
                manifest.len()
            );
            for name in manifest {
                if let Some(location) = self.locate(context, name, 0) {
                    resolved.insert(PackageRef::new(name.clone(), &location.module, location.path));
                }
            }
            return resolved;
        }

        for NamedBinding { name, binding } in &context.bindings {
            match binding {
                Binding::Module { module } => {
                    log::debug!("found module: {} ({})", name, module);
                    if let Some(location) = self.locate(context, module, 0) {
                        let logical = if location.via_parent {
                            location.module.clone()
                        } else {
                            name.clone()
                        };
                        resolved.insert(PackageRef::new(logical, &location.module, location.path));
                    }
                }
                Binding::Object { owner: Some(owner) } => {
                    if owner == NAMESPACE_NAME {
                        log::debug!("{} is defined by the script itself, skipping", name);
                        continue;
                    }
                    log::debug!("found object: {} from {}", name, owner);
                    if let Some(location) = self.locate(context, owner, 0) {
                        resolved.insert(PackageRef::new(name.clone(), &location.module, location.path));
                    }
                }
                Binding::Object { owner: None } | Binding::Value => {}
            }
        }

        resolved
    }

    fn locate(&self, context: &RuntimeContext, module: &str, depth: usize) -> Option<Location> {
        let Some(info) = context.module(module) else {
            match context.import_errors.get(module) {
                Some(error) => log::warn!("unable to import {}: {}", module, error),
                None => log::warn!("unable to import {}", module),
            }
            return None;
        };

        if let Some(parent) = info.parent() {
            if depth >= MAX_PARENT_DEPTH {
                log::warn!("parent chain of {} too deep, using the module itself", module);
            } else if let Some(found) = self.locate(context, parent, depth + 1) {
                return Some(Location {
                    via_parent: true,
                    ..found
                });
            }
        }

        let path = match (&info.search_path, &info.file) {
            (Some(search_path), _) => match search_path.first() {
                Some(first) => PathBuf::from(first),
                None => {
                    log::debug!("{} is a namespace package without content, skipping", module);
                    return None;
                }
            },
            (None, Some(file)) => PathBuf::from(file),
            (None, None) => {
                log::warn!("{} has no location on disk, assuming built in", module);
                return None;
            }
        };

        if !self.filter.is_third_party(&path) {
            log::debug!(
                "{} at {} appears to be stdlib or a project file, skipping",
                module,
                path.display()
            );
            return None;
        }

        if !path.exists() {
            log::warn!("{} resolved to {}, which does not exist", module, path.display());
            return None;
        }

        Some(Location {
            module: info.name.clone(),
            path,
            via_parent: false,
        })
    }
}

/// Keep the scripts that exist, as absolute paths.
///
/// The entry script is mandatory; any other missing script is skipped.
pub fn collect_scripts(scripts: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let (entry, rest) = scripts
        .split_first()
        .context("no scripts given")?;

    if !entry.is_file() {
        return Err(Error::MissingScript(entry.clone()));
    }

    let mut existing = vec![absolute(entry)?];
    for script in rest {
        if script.is_file() {
            existing.push(absolute(script)?);
        } else {
            log::warn!("skipping {}: does not exist", script.display());
        }
    }
    Ok(existing)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}
