use serde::{Deserialize, Serialize};

pub const PANRES_BASE_IRI: &str = "http://myonto.com/PanResOntology.owl#";
pub const XSD_IRI: &str = "http://www.w3.org/2001/XMLSchema#";
pub const RDF_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_IRI: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_IRI: &str = "http://www.w3.org/2002/07/owl#";

/// A namespace IRI and the short prefix that replaces it. The ontology's own
/// namespace uses an empty prefix so its terms come out as bare local names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub iri: String,
    #[serde(default)]
    pub prefix: String,
}

impl Namespace {
    pub fn new(iri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            prefix: prefix.into(),
        }
    }
}

/// Ordered namespace table used to shorten IRIs. The first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    entries: Vec<Namespace>,
}

impl NamespaceTable {
    pub fn new(entries: Vec<Namespace>) -> Self {
        Self { entries }
    }

    pub fn with_base(base_iri: &str) -> Self {
        Self::new(vec![
            Namespace::new(base_iri, ""),
            Namespace::new(XSD_IRI, "xsd:"),
            Namespace::new(RDF_IRI, "rdf:"),
            Namespace::new(RDFS_IRI, "rdfs:"),
            Namespace::new(OWL_IRI, "owl:"),
        ])
    }

    pub fn entries(&self) -> &[Namespace] {
        &self.entries
    }

    pub fn shorten(&self, iri: &str) -> String {
        for namespace in &self.entries {
            if iri.starts_with(namespace.iri.as_str()) {
                return format!("{}{}", namespace.prefix, local_name(iri));
            }
        }
        iri.to_string()
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::with_base(PANRES_BASE_IRI)
    }
}

// Text after the last '#', or after the last '/' when there is no '#'.
fn local_name(iri: &str) -> &str {
    if let Some((_, fragment)) = iri.rsplit_once('#') {
        return fragment;
    }
    match iri.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => iri,
    }
}
