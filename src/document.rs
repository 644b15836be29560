use std::collections::HashMap;
use std::time::Instant;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::app::{ProgressEvent, ProgressSink};
use crate::classify::{Role, RoleSets};
use crate::collect::{SubjectProps, SubjectTable};
use crate::domain::{Category, PropertyMap, RDFS_LABEL};
use crate::fasta::SequenceMap;
use crate::rdf::Graph;
use crate::uri::NamespaceTable;

const PROGRESS_EVERY: usize = 1000;

const GENE_TYPES: [&str; 4] = [
    "PanGene",
    "AntimicrobialResistanceGene",
    "BiocideResistanceGene",
    "MetalResistanceGene",
];
const ORIGINAL_GENE_TYPE: &str = "OriginalGene";

#[derive(Debug, Clone, Serialize)]
pub struct SubjectEntry {
    pub id: String,
    pub label: String,
    pub types: Vec<String>,
    pub properties: PropertyMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_sequence: Option<String>,
}

/// Subject entries keyed by id, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Subjects {
    entries: Vec<SubjectEntry>,
    index: HashMap<String, usize>,
}

impl Subjects {
    pub fn get(&self, id: &str) -> Option<&SubjectEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    fn push(&mut self, entry: SubjectEntry) {
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectEntry> {
        self.entries.iter()
    }
}

impl Serialize for Subjects {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.id, entry)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Categories {
    #[serde(rename = "PanGene")]
    pub pan_gene: Vec<String>,
    #[serde(rename = "OriginalGene")]
    pub original_gene: Vec<String>,
    #[serde(rename = "AntibioticClass")]
    pub antibiotic_class: Vec<String>,
    #[serde(rename = "Phenotype")]
    pub phenotype: Vec<String>,
    #[serde(rename = "Mechanism")]
    pub mechanism: Vec<String>,
    #[serde(rename = "Database")]
    pub database: Vec<String>,
}

impl Categories {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::PanGene => &self.pan_gene,
            Category::OriginalGene => &self.original_gene,
            Category::AntibioticClass => &self.antibiotic_class,
            Category::Phenotype => &self.phenotype,
            Category::Mechanism => &self.mechanism,
            Category::Database => &self.database,
        }
    }

    fn push(&mut self, category: Category, id: &str) {
        let list = match category {
            Category::PanGene => &mut self.pan_gene,
            Category::OriginalGene => &mut self.original_gene,
            Category::AntibioticClass => &mut self.antibiotic_class,
            Category::Phenotype => &mut self.phenotype,
            Category::Mechanism => &mut self.mechanism,
            Category::Database => &mut self.database,
        };
        list.push(id.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub total_triples: usize,
    pub total_subjects: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    pub subjects: Subjects,
    pub categories: Categories,
    pub metadata: Metadata,
}

/// Assembles the final document from the collected subjects and their role
/// sets, attaching sequences when an id is present in a sequence map.
pub struct DocumentBuilder<'a> {
    gene_sequences: &'a SequenceMap,
    protein_sequences: &'a SequenceMap,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(gene_sequences: &'a SequenceMap, protein_sequences: &'a SequenceMap) -> Self {
        Self {
            gene_sequences,
            protein_sequences,
        }
    }

    pub fn build(
        &self,
        table: SubjectTable,
        roles: &RoleSets,
        total_triples: usize,
        sink: &dyn ProgressSink,
    ) -> Document {
        let started = Instant::now();
        let total = table.len();
        let mut document = Document::default();

        for (position, subject) in table.into_subjects().into_iter().enumerate() {
            let processed = position + 1;
            if processed % PROGRESS_EVERY == 0 {
                sink.event(ProgressEvent {
                    message: format!(
                        "Processed {processed}/{total} subjects ({}%)",
                        processed * 100 / total
                    ),
                    elapsed: Some(started.elapsed()),
                });
            }

            for category in categories_of(&subject, roles) {
                document.categories.push(category, &subject.id);
            }
            document.subjects.push(self.entry(subject));
        }

        document.metadata = Metadata {
            total_triples,
            total_subjects: document.subjects.len(),
        };
        document
    }

    fn entry(&self, subject: SubjectProps) -> SubjectEntry {
        let label = subject
            .properties
            .get(RDFS_LABEL)
            .and_then(|values| values.first())
            .map(|value| value.value.clone())
            .unwrap_or_else(|| subject.id.clone());

        SubjectEntry {
            gene_sequence: self.gene_sequences.get(&subject.id).cloned(),
            protein_sequence: self.protein_sequences.get(&subject.id).cloned(),
            label,
            id: subject.id,
            types: subject.types,
            properties: subject.properties,
        }
    }
}

// PanGene and OriginalGene come from the subject's own types; the remaining
// categories come from the role the subject plays for others.
fn categories_of(subject: &SubjectProps, roles: &RoleSets) -> Vec<Category> {
    let mut categories = Vec::new();
    let has_type = |name: &str| subject.types.iter().any(|t| t == name);

    if GENE_TYPES.iter().any(|name| has_type(*name)) {
        categories.push(Category::PanGene);
    }
    if has_type(ORIGINAL_GENE_TYPE) {
        categories.push(Category::OriginalGene);
    }
    for role in Role::ALL {
        if roles.contains(role, &subject.id) {
            categories.push(role.category());
        }
    }
    categories
}

/// Runs both passes over `graph` and builds the document.
pub fn build_document(
    graph: &Graph,
    namespaces: &NamespaceTable,
    gene_sequences: &SequenceMap,
    protein_sequences: &SequenceMap,
    sink: &dyn ProgressSink,
) -> Document {
    let table = SubjectTable::collect(graph, namespaces);
    tracing::info!(subjects = table.len(), "collected subjects");

    let roles = RoleSets::classify(&table);
    tracing::info!(
        classes = roles.len(Role::ResistanceClass),
        phenotypes = roles.len(Role::PredictedPhenotype),
        mechanisms = roles.len(Role::MechanismOfResistance),
        databases = roles.len(Role::SourceDatabase),
        "scanned category relationships"
    );

    DocumentBuilder::new(gene_sequences, protein_sequences).build(table, &roles, graph.len(), sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> SubjectEntry {
        SubjectEntry {
            id: id.to_string(),
            label: id.to_string(),
            types: Vec::new(),
            properties: PropertyMap::default(),
            gene_sequence: None,
            protein_sequence: None,
        }
    }

    #[test]
    fn subjects_are_looked_up_by_id() {
        let mut subjects = Subjects::default();
        for id in ["pan_2", "pan_1", "beta_lactam"] {
            subjects.push(entry(id));
        }

        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects.get("pan_1").map(|e| e.id.as_str()), Some("pan_1"));
        assert_eq!(subjects.get("beta_lactam").map(|e| e.label.as_str()), Some("beta_lactam"));
        assert!(subjects.get("pan_3").is_none());
        let order: Vec<&str> = subjects.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["pan_2", "pan_1", "beta_lactam"]);
    }
}
