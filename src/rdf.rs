use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use rio_api::model::{Literal, Subject, Term};
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesParser, TurtleParser};
use rio_xml::RdfXmlParser;
use tracing::debug;

use crate::domain::{Node, Triple};
use crate::error::PanresError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
    NTriples,
}

impl RdfFormat {
    /// Picks a syntax from the file extension. OWL exports are RDF/XML, so
    /// anything unrecognised is read as RDF/XML.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(|ext| ext.to_ascii_lowercase()).as_deref() {
            Some("ttl") | Some("turtle") => RdfFormat::Turtle,
            Some("nt") => RdfFormat::NTriples,
            _ => RdfFormat::RdfXml,
        }
    }
}

/// The set of distinct triples of an RDF document, in parse order.
///
/// Each triple is stored once; `buckets` maps a triple hash to the positions
/// in `triples` that share it.
#[derive(Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    buckets: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut graph = Self::new();
        for triple in triples {
            graph.insert(triple);
        }
        graph
    }

    pub fn parse_file(path: &Utf8Path) -> Result<Self, PanresError> {
        let file = File::open(path.as_std_path())
            .map_err(|err| PanresError::OntologyRead(format!("{path}: {err}")))?;
        Self::parse_reader(BufReader::new(file), RdfFormat::from_path(path))
            .map_err(|err| match err {
                PanresError::OntologyParse(message) => {
                    PanresError::OntologyParse(format!("{path}: {message}"))
                }
                other => other,
            })
    }

    pub fn parse_reader<R: BufRead>(reader: R, format: RdfFormat) -> Result<Self, PanresError> {
        let mut graph = Self::new();
        let result = match format {
            RdfFormat::RdfXml => {
                read_triples(RdfXmlParser::new(reader, None), &mut graph).map_err(|e| e.to_string())
            }
            RdfFormat::Turtle => {
                read_triples(TurtleParser::new(reader, None), &mut graph).map_err(|e| e.to_string())
            }
            RdfFormat::NTriples => {
                read_triples(NTriplesParser::new(reader), &mut graph).map_err(|e| e.to_string())
            }
        };
        result.map_err(PanresError::OntologyParse)?;
        debug!(triples = graph.len(), ?format, "parsed RDF document");
        Ok(graph)
    }

    /// Returns false when the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let bucket = self
            .buckets
            .entry(self.hasher.hash_one(&triple))
            .or_default();
        if bucket.iter().any(|&position| self.triples[position] == triple) {
            return false;
        }
        bucket.push(self.triples.len());
        self.triples.push(triple);
        true
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

fn read_triples<P: TriplesParser>(mut parser: P, graph: &mut Graph) -> Result<(), P::Error> {
    parser.parse_all(&mut |triple| {
        if let Some(owned) = owned_triple(&triple) {
            graph.insert(owned);
        }
        Ok(())
    })
}

// RDF-star quoted triples have no place in the document and are dropped here.
fn owned_triple(triple: &rio_api::model::Triple<'_>) -> Option<Triple> {
    let subject = match &triple.subject {
        Subject::NamedNode(node) => Node::iri(node.iri),
        Subject::BlankNode(node) => Node::blank(node.id),
        _ => return None,
    };
    let object = match &triple.object {
        Term::NamedNode(node) => Node::iri(node.iri),
        Term::BlankNode(node) => Node::blank(node.id),
        Term::Literal(Literal::Simple { value }) => Node::literal(*value),
        Term::Literal(Literal::LanguageTaggedString { value, language }) => Node::Literal {
            value: value.to_string(),
            datatype: None,
            language: Some(language.to_string()),
        },
        Term::Literal(Literal::Typed { value, datatype }) => Node::Literal {
            value: value.to_string(),
            datatype: Some(datatype.iri.to_string()),
            language: None,
        },
        _ => return None,
    };
    Some(Triple::new(subject, triple.predicate.iri, object))
}
