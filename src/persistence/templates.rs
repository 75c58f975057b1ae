//! Named body-collection templates.
//!
//! A template is an ordered sequence of plain body field-records, persisted
//! together under a user-chosen name in one YAML document. Velocities and
//! accelerations are stored in physical units so a template is portable
//! across settings; on load they are rescaled by the distance ratio in
//! force at that moment.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulation::params::Settings;
use crate::simulation::states::{Body, NVec2};

/// Plain field-record for one body within a template.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BodyRecord {
    pub x: f64,
    pub y: f64,
    pub mass: f64,
    pub size: f64,
    pub color: String,
    pub vx: f64, // physical units
    pub vy: f64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ax: f64, // physical units
    #[serde(default)]
    pub ay: f64,
}

/// Map of named templates, serialized as a single YAML document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TemplateStore {
    templates: BTreeMap<String, Vec<BodyRecord>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&[BodyRecord]> {
        self.templates.get(name).map(Vec::as_slice)
    }

    /// Snapshot `bodies` under `name`, converting velocities and
    /// accelerations to physical units with the current distance ratio.
    /// An empty collection is rejected and the store is left unchanged.
    /// Returns the stored name, after any `#` collision suffixing.
    pub fn save(&mut self, name: &str, bodies: &[Body], settings: &Settings) -> Result<String> {
        if bodies.is_empty() {
            bail!("nothing to save: the body collection is empty");
        }
        let ratio = settings.distance_ratio();
        let records = bodies
            .iter()
            .map(|b| BodyRecord {
                x: b.x.x,
                y: b.x.y,
                mass: b.mass,
                size: b.size,
                color: b.color.clone(),
                vx: b.v.x * ratio,
                vy: b.v.y * ratio,
                id: b.id.clone(),
                ax: b.a.x * ratio,
                ay: b.a.y * ratio,
            })
            .collect();
        let name = self.resolve_name(name);
        self.templates.insert(name.clone(), records);
        log::info!("template '{name}' stored ({} bodies)", bodies.len());
        Ok(name)
    }

    /// Materialize the named template as live bodies, with velocities and
    /// accelerations rescaled by the current distance ratio.
    pub fn load(&self, name: &str, settings: &Settings) -> Result<Vec<Body>> {
        let records = self
            .templates
            .get(name)
            .with_context(|| format!("no template named '{name}'"))?;
        let inv_ratio = settings.distance_ratio().recip();
        Ok(records
            .iter()
            .map(|r| {
                let mut b = Body::new(
                    NVec2::new(r.x, r.y),
                    NVec2::new(r.vx * inv_ratio, r.vy * inv_ratio),
                    r.mass,
                    r.size,
                    r.color.clone(),
                    r.id.clone(),
                );
                b.a = NVec2::new(r.ax * inv_ratio, r.ay * inv_ratio);
                b
            })
            .collect())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    /// The whole store as one exportable YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Merge templates from an exported document into this store.
    ///
    /// The document is validated as a whole first; malformed content aborts
    /// the import without mutating the store. Incoming names that collide
    /// with stored ones get `#` appended until unique.
    pub fn import_yaml(&mut self, content: &str) -> Result<usize> {
        let incoming: TemplateStore = serde_yaml::from_str(content)
            .map_err(|e| anyhow!("template content is not valid: {e}"))?;
        let count = incoming.templates.len();
        for (name, records) in incoming.templates {
            let name = self.resolve_name(&name);
            self.templates.insert(name, records);
        }
        log::info!("imported {count} templates");
        Ok(count)
    }

    /// Read a store from disk; a missing file yields an empty store.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut store = Self::new();
        store.import_yaml(&content)?;
        Ok(store)
    }

    pub fn save_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_yaml()?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn resolve_name(&self, name: &str) -> String {
        let mut name = name.to_owned();
        while self.templates.contains_key(&name) {
            name.push('#');
        }
        name
    }
}
