use serde::{Deserialize, Serialize};

use kitready_core::{Entity, MaterialId};

/// Material master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub code: String,
    pub name: String,
}

impl Material {
    pub fn new(id: MaterialId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Lookup of material master data.
///
/// A miss is an expected condition (stale BOM rows), not an error.
pub trait MaterialCatalog {
    fn material(&self, id: MaterialId) -> Option<Material>;
}

impl<C> MaterialCatalog for &C
where
    C: MaterialCatalog + ?Sized,
{
    fn material(&self, id: MaterialId) -> Option<Material> {
        (**self).material(id)
    }
}
