use std::collections::HashMap;

use crate::domain::{Node, ObjectValue, PropertyMap, RDF_TYPE};
use crate::rdf::Graph;
use crate::uri::NamespaceTable;

/// Everything one subject says about itself, with IRIs already shortened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectProps {
    pub id: String,
    pub types: Vec<String>,
    pub properties: PropertyMap,
}

impl SubjectProps {
    fn new(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// First-pass aggregation of a graph: one entry per named subject, in the
/// order subjects were first encountered.
#[derive(Debug, Clone, Default)]
pub struct SubjectTable {
    subjects: Vec<SubjectProps>,
    index: HashMap<String, usize>,
}

impl SubjectTable {
    pub fn collect(graph: &Graph, namespaces: &NamespaceTable) -> Self {
        let mut table = Self::default();
        for triple in graph.iter() {
            let Node::Iri(subject) = &triple.subject else {
                continue;
            };
            let value = match &triple.object {
                Node::Iri(iri) => ObjectValue::resource(namespaces.shorten(iri)),
                Node::Literal { value, .. } => ObjectValue::literal(value.as_str()),
                Node::Blank(_) => continue,
            };

            let predicate = namespaces.shorten(&triple.predicate);
            let entry = table.entry(namespaces.shorten(subject));
            if predicate == RDF_TYPE {
                entry.types.push(value.value.clone());
            }
            entry.properties.push(&predicate, value);
        }
        table
    }

    fn entry(&mut self, id: String) -> &mut SubjectProps {
        let position = match self.index.get(&id) {
            Some(&position) => position,
            None => {
                let position = self.subjects.len();
                self.index.insert(id.clone(), position);
                self.subjects.push(SubjectProps::new(id));
                position
            }
        };
        &mut self.subjects[position]
    }

    pub fn get(&self, id: &str) -> Option<&SubjectProps> {
        self.index.get(id).map(|&position| &self.subjects[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectProps> {
        self.subjects.iter()
    }

    pub fn into_subjects(self) -> Vec<SubjectProps> {
        self.subjects
    }
}
