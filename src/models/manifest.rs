use serde::Serialize;

/// Addon descriptor served from `/manifest.json`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub logo: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub catalog_type: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

impl Manifest {
    pub fn addon() -> Self {
        Self {
            id: "com.example.localaddon",
            version: "1.0.0",
            name: "Local JSON Media Addon",
            resources: vec!["stream", "catalog"],
            types: vec!["movie", "show"],
            catalogs: vec![
                CatalogDescriptor {
                    catalog_type: "movie",
                    id: "movies",
                    name: "Movies",
                },
                CatalogDescriptor {
                    catalog_type: "show",
                    id: "shows",
                    name: "Shows",
                },
            ],
            logo: "https://via.placeholder.com/200x200?text=Addon",
            description: "A lightweight local media addon using a JSON data source",
        }
    }
}
