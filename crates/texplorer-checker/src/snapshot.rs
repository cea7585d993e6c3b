//! JSON program snapshots.
//!
//! A snapshot is a serialized [`TypeStore`]. Loading validates that every
//! handle stored in the arenas is in bounds, so the walker can treat a
//! dangling id as a data error rather than a panic.

use crate::store::TypeStore;
use crate::types::{Signature, SymbolId, TypeData, TypeId};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write snapshot {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot JSON")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is missing intrinsic types (found {found} types)")]
    MissingIntrinsics { found: usize },
    #[error("{owner} refers to type {id} but the snapshot has {count} types")]
    DanglingType { owner: String, id: u32, count: usize },
    #[error("{owner} refers to symbol {id} but the snapshot has {count} symbols")]
    DanglingSymbol { owner: String, id: u32, count: usize },
}

impl TypeStore {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let store: TypeStore = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            types = store.type_count(),
            symbols = store.symbol_count(),
            "loaded program snapshot"
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.types.len() < TypeId::INTRINSIC_COUNT as usize {
            return Err(SnapshotError::MissingIntrinsics {
                found: self.types.len(),
            });
        }
        let checker = Validator { store: self };
        checker.check_type(|| "global Array".to_string(), self.global_array)?;
        checker.check_type(|| "global ReadonlyArray".to_string(), self.global_readonly_array)?;
        for (index, ty) in self.types.iter().enumerate() {
            let owner = || format!("type {}", index);
            for symbol in ty.symbol.iter().chain(ty.alias_symbol.iter()) {
                checker.check_symbol(owner, *symbol)?;
            }
            for &id in &ty.alias_type_arguments {
                checker.check_type(owner, id)?;
            }
            checker.check_data(owner, &ty.data)?;
        }
        for (index, symbol) in self.symbols.iter().enumerate() {
            let owner = || format!("symbol {} ({})", index, symbol.name);
            let types = symbol
                .value_type
                .iter()
                .chain(symbol.declared_type.iter())
                .chain(symbol.type_parameters.iter())
                .chain(
                    symbol
                        .declarations
                        .iter()
                        .filter_map(|decl| decl.type_at_location.as_ref()),
                );
            for &id in types {
                checker.check_type(owner, id)?;
            }
            if let Some(parent) = symbol.parent {
                checker.check_symbol(owner, parent)?;
            }
        }
        Ok(())
    }
}

struct Validator<'a> {
    store: &'a TypeStore,
}

impl Validator<'_> {
    fn check_type(&self, owner: impl Fn() -> String, id: TypeId) -> Result<(), SnapshotError> {
        if id.index() < self.store.types.len() {
            Ok(())
        } else {
            Err(SnapshotError::DanglingType {
                owner: owner(),
                id: id.0,
                count: self.store.types.len(),
            })
        }
    }

    fn check_symbol(&self, owner: impl Fn() -> String, id: SymbolId) -> Result<(), SnapshotError> {
        if id.index() < self.store.symbols.len() {
            Ok(())
        } else {
            Err(SnapshotError::DanglingSymbol {
                owner: owner(),
                id: id.0,
                count: self.store.symbols.len(),
            })
        }
    }

    fn check_signature(
        &self,
        owner: impl Fn() -> String + Copy,
        signature: &Signature,
    ) -> Result<(), SnapshotError> {
        for &parameter in &signature.parameters {
            self.check_symbol(owner, parameter)?;
        }
        for &id in &signature.type_parameters {
            self.check_type(owner, id)?;
        }
        self.check_type(owner, signature.return_type)
    }

    fn check_data(
        &self,
        owner: impl Fn() -> String + Copy,
        data: &TypeData,
    ) -> Result<(), SnapshotError> {
        let types: Vec<TypeId> = match data {
            TypeData::Intrinsic { .. } | TypeData::Literal { .. } => Vec::new(),
            TypeData::Object(object) => {
                for &property in &object.properties {
                    self.check_symbol(owner, property)?;
                }
                for signature in object
                    .call_signatures
                    .iter()
                    .chain(&object.construct_signatures)
                {
                    self.check_signature(owner, signature)?;
                }
                let mut types: Vec<TypeId> = object
                    .index_infos
                    .iter()
                    .flat_map(|info| [info.key_type, info.value_type])
                    .collect();
                types.extend(object.target);
                types.extend(&object.type_arguments);
                types.extend(&object.type_parameters);
                types.extend(&object.base_types);
                types.extend(&object.implements_types);
                types
            }
            TypeData::Union { types } | TypeData::Intersection { types } => types.clone(),
            TypeData::TemplateLiteral { types, .. } => types.clone(),
            TypeData::TypeParameter { constraint, default } => {
                constraint.iter().chain(default.iter()).copied().collect()
            }
            TypeData::Index { target } | TypeData::StringMapping { target } => vec![*target],
            TypeData::IndexedAccess {
                object_type,
                index_type,
            } => vec![*object_type, *index_type],
            TypeData::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => [Some(*check_type), Some(*extends_type), *true_type, *false_type]
                .into_iter()
                .flatten()
                .collect(),
            TypeData::Substitution {
                base_type,
                constraint,
            } => vec![*base_type, *constraint],
        };
        for id in types {
            self.check_type(owner, id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/snapshot_tests.rs"]
mod tests;
