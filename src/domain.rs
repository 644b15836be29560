use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_LABEL: &str = "rdfs:label";

/// One term of a parsed triple, owned and independent of the parser's borrows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Node {
    pub fn iri(value: impl Into<String>) -> Self {
        Node::Iri(value.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Node::Blank(id.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: Node, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectValue {
    pub value: String,
    pub is_literal: bool,
}

impl ObjectValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_literal: true,
        }
    }

    pub fn resource(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_literal: false,
        }
    }
}

/// Predicate → values, kept in the order predicates were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, Vec<ObjectValue>)>,
}

impl PropertyMap {
    pub fn push(&mut self, predicate: &str, value: ObjectValue) {
        match self.entries.iter_mut().find(|(key, _)| key == predicate) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((predicate.to_string(), vec![value])),
        }
    }

    pub fn get(&self, predicate: &str) -> Option<&[ObjectValue]> {
        self.entries
            .iter()
            .find(|(key, _)| key == predicate)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ObjectValue])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (predicate, values) in &self.entries {
            map.serialize_entry(predicate, values)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PanGene,
    OriginalGene,
    AntibioticClass,
    Phenotype,
    Mechanism,
    Database,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::PanGene,
        Category::OriginalGene,
        Category::AntibioticClass,
        Category::Phenotype,
        Category::Mechanism,
        Category::Database,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PanGene => "PanGene",
            Category::OriginalGene => "OriginalGene",
            Category::AntibioticClass => "AntibioticClass",
            Category::Phenotype => "Phenotype",
            Category::Mechanism => "Mechanism",
            Category::Database => "Database",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
