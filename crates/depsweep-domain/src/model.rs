use depsweep_types::PackageId;

/// All packages' classified dependency sets, in discovery order.
///
/// Built once per run and read-only afterwards; the checks only borrow it.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceModel {
    pub packages: Vec<PackageModel>,
}

#[derive(Clone, Debug, Default)]
pub struct PackageModel {
    pub id: PackageId,
    pub manifest: Manifest,
}

/// Dependency names declared by one package.
///
/// Both lists keep source-file order and are not deduplicated: a name declared
/// twice appears twice. A declaration lands in exactly one of the two lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Declared locally (pinned version or package-local configuration).
    pub specific: Vec<String>,
    /// Declared with `workspace = true` inheritance.
    pub global: Vec<String>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.specific.is_empty() && self.global.is_empty()
    }

    /// Every declaration, specific first, duplicates kept.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.specific
            .iter()
            .chain(self.global.iter())
            .map(String::as_str)
    }

    /// Every declared name once, in first-occurrence order.
    pub fn declared_once(&self) -> Vec<&str> {
        let mut seen = std::collections::BTreeSet::new();
        self.all().filter(|name| seen.insert(*name)).collect()
    }
}

impl PackageModel {
    pub fn new(id: PackageId, manifest: Manifest) -> Self {
        Self { id, manifest }
    }
}

impl WorkspaceModel {
    pub fn new(packages: Vec<PackageModel>) -> Self {
        Self { packages }
    }

    pub fn root(&self) -> Option<&PackageModel> {
        self.packages.iter().find(|p| p.id.is_root())
    }

    /// Member packages, i.e. everything except the workspace root.
    pub fn members(&self) -> impl Iterator<Item = &PackageModel> {
        self.packages.iter().filter(|p| !p.id.is_root())
    }

    /// Workspace-wide declarations: the root package's `specific` list.
    pub fn global_declarations(&self) -> &[String] {
        self.root()
            .map(|r| r.manifest.specific.as_slice())
            .unwrap_or(&[])
    }

    pub fn dependencies_scanned(&self) -> usize {
        self.packages
            .iter()
            .map(|p| p.manifest.specific.len() + p.manifest.global.len())
            .sum()
    }
}
