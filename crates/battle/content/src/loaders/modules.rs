//! Module catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::module::{ModuleCatalog, ModuleDefinition};

const BUNDLED_MODULES: &str = include_str!("../../data/modules.ron");

/// Loader for module catalogs from RON files.
///
/// The file holds a list of [`ModuleDefinition`]s:
///
/// ```text
/// [
///     (
///         id: 1,
///         name: "Slash",
///         recast_seconds: 3.0,
///         flags: "DAMAGE",
///         chain_effect: Some((kind: DamageBonus, value: 25.0)),
///     ),
/// ]
/// ```
pub struct ModuleLoader;

impl ModuleLoader {
    /// Load a module catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ModuleCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), modules = catalog.len(), "module catalog loaded");
        Ok(catalog)
    }

    /// Parse a module catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<ModuleCatalog> {
        let definitions: Vec<ModuleDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse module RON: {}", e))?;
        ModuleCatalog::from_definitions(definitions)
    }

    /// Catalog shipped with the crate.
    pub fn bundled() -> LoadResult<ModuleCatalog> {
        Self::parse(BUNDLED_MODULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActionCategoryFlags, ChainEffectKind, ModuleId};
    use std::io::Write;

    const SAMPLE: &str = r#"[
        (
            id: 1,
            name: "Slash",
            recast_seconds: 3.0,
            flags: "DAMAGE",
            chain_effect: Some((kind: DamageBonus, value: 25.0)),
        ),
        (
            id: 2,
            name: "Mend",
            recast_seconds: 4.0,
            flags: "HEAL | BUFF",
        ),
    ]"#;

    #[test]
    fn parses_definitions() {
        let catalog = ModuleLoader::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let slash = catalog.get(ModuleId(1)).unwrap();
        assert_eq!(slash.name, "Slash");
        assert_eq!(slash.flags, ActionCategoryFlags::DAMAGE);
        assert_eq!(
            slash.chain_effect.map(|effect| effect.kind),
            Some(ChainEffectKind::DamageBonus)
        );

        let mend = catalog.get(ModuleId(2)).unwrap();
        assert_eq!(mend.flags, ActionCategoryFlags::HEAL | ActionCategoryFlags::BUFF);
        assert!(mend.chain_effect.is_none());
    }

    #[test]
    fn rejects_unknown_effect_kind() {
        let content = r#"[(id: 1, name: "x", flags: "DAMAGE", chain_effect: Some((kind: Nope, value: 1.0)))]"#;
        assert!(ModuleLoader::parse(content).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let content = r#"[(id: 1, name: "a", flags: "DAMAGE"), (id: 1, name: "b", flags: "HEAL")]"#;
        assert!(ModuleLoader::parse(content).is_err());
    }

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = ModuleLoader::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.iter().all(|module| !module.name.is_empty()));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = ModuleLoader::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
