//! Snapshot of the namespace left behind by the one-shot evaluation.

use serde::Deserialize;
use std::collections::BTreeMap;

/// `__name__` of the namespace the scripts are evaluated in.
///
/// Objects defined by the scripts themselves report it as their owner.
pub const NAMESPACE_NAME: &str = "__depbundle__";

/// Binding that declares an explicit list of modules to bundle.
pub const MANIFEST_BINDING: &str = "__depbundle_modules__";

/// Ordered name bindings plus every module reachable from them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeContext {
    /// Bindings in evaluation order; a rebound name keeps its first position
    /// and carries the last value
    pub bindings: Vec<NamedBinding>,

    /// Modules keyed by dotted name, `None` when importing it failed
    #[serde(default)]
    pub modules: BTreeMap<String, Option<ModuleInfo>>,

    /// Value of [`MANIFEST_BINDING`], if the scripts declared one
    #[serde(default)]
    pub manifest: Option<Vec<String>>,

    /// Import failure messages keyed by module name
    #[serde(default)]
    pub import_errors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedBinding {
    pub name: String,
    #[serde(flatten)]
    pub binding: Binding,
}

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// A module object
    Module { module: String },
    /// Anything exposing an owning module (functions, classes, instances)
    Object { owner: Option<String> },
    /// Plain data
    Value,
}

/// Location attributes of a module object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    /// Advertised parent package (`__package__`)
    #[serde(default)]
    pub package: Option<String>,
    /// Directory search path (`__path__`), present only for packages
    #[serde(default)]
    pub search_path: Option<Vec<String>>,
    /// Backing file (`__file__`)
    #[serde(default)]
    pub file: Option<String>,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            search_path: None,
            file: None,
        }
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn search_path<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_path = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Parent package when it differs from the module itself.
    pub fn parent(&self) -> Option<&str> {
        self.package
            .as_deref()
            .filter(|package| !package.is_empty() && *package != self.name)
    }
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing the value of an earlier binding in place.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) -> &mut Self {
        let name = name.into();
        match self.bindings.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.binding = binding,
            None => self.bindings.push(NamedBinding { name, binding }),
        }
        self
    }

    /// Bind `name` to a module and record the module's attributes.
    pub fn bind_module(&mut self, name: impl Into<String>, info: ModuleInfo) -> &mut Self {
        let module = info.name.clone();
        self.insert_module(info);
        self.bind(name, Binding::Module { module })
    }

    /// Bind `name` to an object owned by `owner`.
    pub fn bind_object(&mut self, name: impl Into<String>, owner: Option<&str>) -> &mut Self {
        self.bind(
            name,
            Binding::Object {
                owner: owner.map(String::from),
            },
        )
    }

    /// Record a module reachable from the bindings.
    pub fn insert_module(&mut self, info: ModuleInfo) -> &mut Self {
        self.modules.insert(info.name.clone(), Some(info));
        self
    }

    /// Record a module whose import failed.
    pub fn insert_unimportable(&mut self, name: impl Into<String>, error: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.modules.insert(name.clone(), None);
        self.import_errors.insert(name, error.into());
        self
    }

    pub fn set_manifest<I, S>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn module(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name).and_then(Option::as_ref)
    }
}
