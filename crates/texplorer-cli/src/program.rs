//! A checked program loaded from a snapshot.

use anyhow::Context;
use std::path::Path;
use texplorer_checker::{TypeDatabase, TypeId, TypeStore};
use texplorer_common::{SourceFileLocation, TreeConfig, TypeInfo};
use texplorer_tree::{TreeContext, TreeRoot, expand_type_to_string, generate_type_tree};
use tracing::debug;

pub struct Program {
    store: TypeStore,
    config: TreeConfig,
}

impl Program {
    pub fn new(store: TypeStore, config: TreeConfig) -> Self {
        Program { store, config }
    }

    pub fn load(path: &Path, config: TreeConfig) -> anyhow::Result<Self> {
        let store = TypeStore::load(path)
            .with_context(|| format!("failed to load program snapshot {}", path.display()))?;
        debug!(
            path = %path.display(),
            types = store.type_count(),
            symbols = store.symbol_count(),
            "loaded program"
        );
        Ok(Program::new(store, config))
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn store(&self) -> &TypeStore {
        &self.store
    }

    /// What a location names. Declared types (classes, interfaces, enums,
    /// aliases) resolve to the type they declare rather than their value
    /// side, so a `reference { location }` round-trips to the same type.
    pub fn root_at(&self, location: &SourceFileLocation) -> Option<TreeRoot> {
        let symbol = self
            .store
            .symbol_at_position(&location.file_name, location.range.start)?;
        let flags = self.store.symbol(symbol)?.flags;
        if flags.is_defined_type() {
            let declared = self.store.get_declared_type_of_symbol(symbol);
            if declared != TypeId::ERROR {
                return Some(TreeRoot::SymbolWithType(symbol, declared));
            }
        }
        Some(TreeRoot::Symbol(symbol))
    }

    pub fn type_tree_at(&self, location: &SourceFileLocation) -> Option<TypeInfo> {
        let Some(root) = self.root_at(location) else {
            debug!(%location, "no symbol at location");
            return None;
        };
        Some(generate_type_tree(&self.store, root, &self.config))
    }

    /// The merged type at `location`, printed. Merging synthesizes types, so
    /// this grows the store.
    pub fn expanded_type_at(&mut self, location: &SourceFileLocation) -> Option<String> {
        let ty = match self.root_at(location)? {
            TreeRoot::Type(ty) | TreeRoot::SymbolWithType(_, ty) => ty,
            TreeRoot::Symbol(symbol) => {
                TreeContext::new(&self.store, self.config).type_of_symbol(symbol)
            }
        };
        Some(expand_type_to_string(&mut self.store, ty, &self.config))
    }
}

#[cfg(test)]
#[path = "../tests/program_tests.rs"]
mod tests;
