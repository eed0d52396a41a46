use hashbrown::HashMap;
use supercube_mesh::{Material, MaterialId};

use crate::config::MaterialEntry;

/// Scene materials by key. Ids follow sorted key order, so they are stable
/// across runs regardless of file order.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<(String, Material)>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn from_entries(entries: &HashMap<String, MaterialEntry>) -> Self {
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();
        let mut catalog = MaterialCatalog::default();
        for key in keys {
            let id = MaterialId(catalog.materials.len() as u32);
            let material = match entries[key].texture {
                Some(t) => {
                    let (w, h) = t.dims();
                    Material::with_texture(id, w, h)
                }
                None => Material::new(id),
            };
            catalog.by_key.insert(key.clone(), id);
            catalog.materials.push((key.clone(), material));
        }
        catalog
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&Material> {
        let id = self.get_id(key)?;
        self.materials.get(id.0 as usize).map(|(_, m)| m)
    }

    pub fn key_of(&self, id: MaterialId) -> Option<&str> {
        self.materials.get(id.0 as usize).map(|(k, _)| k.as_str())
    }
}
