use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
}

impl Project {
    /// A project is addressed by its key, its display name, or its numeric id.
    pub fn matches(&self, query: &str) -> bool {
        self.key == query || self.name == query || self.id == query
    }
}
