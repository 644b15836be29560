use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use panres_json::app::{ProgressEvent, ProgressSink};
use panres_json::classify::Role;
use panres_json::document::{Document, build_document};
use panres_json::domain::Category;
use panres_json::fasta::SequenceMap;
use panres_json::rdf::{Graph, RdfFormat};
use panres_json::uri::NamespaceTable;

const BASE: &str = "http://example.org/amr#";

struct NoopSink;

impl ProgressSink for NoopSink {
    fn event(&self, _event: ProgressEvent) {}
}

#[derive(Default)]
struct CountingSink {
    events: std::cell::RefCell<Vec<String>>,
}

impl ProgressSink for CountingSink {
    fn event(&self, event: ProgressEvent) {
        self.events.borrow_mut().push(event.message);
    }
}

fn document_from_turtle(body: &str) -> Document {
    document_with_sequences(body, &SequenceMap::new(), &SequenceMap::new())
}

fn document_with_sequences(body: &str, genes: &SequenceMap, proteins: &SequenceMap) -> Document {
    let turtle = format!(
        "@prefix : <{BASE}> .\n\
         @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
         @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
         @prefix owl: <http://www.w3.org/2002/07/owl#> .\n{body}"
    );
    let graph = Graph::parse_reader(turtle.as_bytes(), RdfFormat::Turtle).unwrap();
    build_document(
        &graph,
        &NamespaceTable::with_base(BASE),
        genes,
        proteins,
        &NoopSink,
    )
}

#[test]
fn gene_with_resistance_class() {
    let document = document_from_turtle(
        ":Gene1 rdf:type :PanGene .\n\
         :Gene1 :has_resistance_class :Beta .\n\
         :Beta rdf:type owl:NamedIndividual .\n",
    );

    assert_eq!(document.categories.get(Category::PanGene), ["Gene1"]);
    assert_eq!(document.categories.get(Category::AntibioticClass), ["Beta"]);
    assert_eq!(document.subjects.get("Gene1").unwrap().label, "Gene1");
}

#[test]
fn explicit_label_wins_over_identifier() {
    let document = document_from_turtle(":bla rdfs:label \"Beta-lactamase\" .\n");
    assert_eq!(document.subjects.get("bla").unwrap().label, "Beta-lactamase");
}

#[test]
fn role_target_without_own_triples_is_not_listed() {
    let document = document_from_turtle(":Gene1 :has_predicted_phenotype :Ampicillin .\n");
    assert!(document.subjects.get("Ampicillin").is_none());
    assert!(document.categories.get(Category::Phenotype).is_empty());
}

#[test]
fn subject_can_hold_several_categories() {
    let document = document_from_turtle(
        ":g1 rdf:type :MetalResistanceGene , :OriginalGene ;\n\
             :has_mechanism_of_resistance :g1 ;\n\
             :is_from_database :g1 .\n",
    );
    for category in [
        Category::PanGene,
        Category::OriginalGene,
        Category::Mechanism,
        Category::Database,
    ] {
        assert_eq!(document.categories.get(category), ["g1"], "{category}");
    }
    assert!(document.categories.get(Category::AntibioticClass).is_empty());
}

#[test]
fn original_gene_needs_the_type_not_a_role() {
    let document = document_from_turtle(
        ":a :is_from_database :OriginalGene .\n\
         :OriginalGene rdf:type owl:Class .\n",
    );
    assert!(document.categories.get(Category::OriginalGene).is_empty());
    assert_eq!(document.categories.get(Category::Database), ["OriginalGene"]);
}

#[test]
fn sequences_attach_independently() {
    let genes = SequenceMap::from([("pan_1".to_string(), "ACGT".to_string())]);
    let proteins = SequenceMap::from([("pan_2".to_string(), "MKV".to_string())]);
    let document = document_with_sequences(
        ":pan_1 rdf:type :PanGene .\n:pan_2 rdf:type :PanGene .\n:pan_3 rdf:type :PanGene .\n",
        &genes,
        &proteins,
    );

    let pan_1 = document.subjects.get("pan_1").unwrap();
    assert_eq!(pan_1.gene_sequence.as_deref(), Some("ACGT"));
    assert_eq!(pan_1.protein_sequence, None);
    let pan_2 = document.subjects.get("pan_2").unwrap();
    assert_eq!(pan_2.gene_sequence, None);
    assert_eq!(pan_2.protein_sequence.as_deref(), Some("MKV"));
    let pan_3 = document.subjects.get("pan_3").unwrap();
    assert!(pan_3.gene_sequence.is_none() && pan_3.protein_sequence.is_none());
}

#[test]
fn categories_follow_subject_order() {
    let document = document_from_turtle(
        ":pan_2 rdf:type :PanGene .\n\
         :pan_1 rdf:type :PanGene .\n\
         :pan_3 rdf:type :AntimicrobialResistanceGene .\n",
    );
    assert_eq!(
        document.categories.get(Category::PanGene),
        ["pan_2", "pan_1", "pan_3"]
    );
    let order: Vec<&str> = document.subjects.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["pan_2", "pan_1", "pan_3"]);
}

#[test]
fn every_listed_id_is_a_subject() {
    let document = document_from_turtle(
        ":g1 rdf:type :PanGene ; :has_resistance_class :c1 , :c2 ; :is_from_database :db .\n\
         :c1 rdfs:label \"tetracycline\" .\n\
         :db rdfs:label \"CARD\" .\n\
         _:x :has_resistance_class :c3 .\n",
    );
    for category in Category::ALL {
        for id in document.categories.get(category) {
            assert!(document.subjects.get(id).is_some(), "{category} lists {id}");
        }
    }
    assert_eq!(document.metadata.total_subjects, document.subjects.len());
    assert_eq!(document.metadata.total_triples, 7);
}

#[test]
fn progress_is_reported_every_thousand_subjects() {
    let body: String = (0..2500)
        .map(|n| format!(":s{n} rdf:type :PanGene .\n"))
        .collect();
    let turtle = format!(
        "@prefix : <{BASE}> .\n@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n{body}"
    );
    let graph = Graph::parse_reader(turtle.as_bytes(), RdfFormat::Turtle).unwrap();
    let sink = CountingSink::default();
    let document = build_document(
        &graph,
        &NamespaceTable::with_base(BASE),
        &SequenceMap::new(),
        &SequenceMap::new(),
        &sink,
    );

    assert_eq!(document.metadata.total_subjects, 2500);
    assert_eq!(
        *sink.events.borrow(),
        vec![
            "Processed 1000/2500 subjects (40%)".to_string(),
            "Processed 2000/2500 subjects (80%)".to_string(),
        ]
    );
}

// Re-derives the role categories from the serialized `properties` alone and
// checks they match the precomputed lists.
#[test]
fn categories_can_be_rederived_from_serialized_properties() {
    let document = document_from_turtle(
        ":g1 rdf:type :PanGene ; :has_resistance_class :c1 ; :has_predicted_phenotype :p1 .\n\
         :g2 rdf:type :OriginalGene ; :is_from_database :db ; :has_mechanism_of_resistance :m1 .\n\
         :g2 :has_mechanism_of_resistance \"literal mechanism\" .\n\
         :c1 rdfs:label \"aminoglycoside\" .\n\
         :p1 rdfs:label \"gentamicin\" .\n\
         :m1 rdfs:label \"target alteration\" .\n\
         :db rdfs:label \"ResFinder\" .\n\
         :g3 :has_resistance_class :c1 .\n",
    );
    let json: Value = serde_json::from_str(&serde_json::to_string(&document).unwrap()).unwrap();
    let subjects = json["subjects"].as_object().unwrap();

    let mut targets: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for subject in subjects.values() {
        for role in Role::ALL {
            let Some(values) = subject["properties"][role.predicate()].as_array() else {
                continue;
            };
            for value in values {
                if value["is_literal"] == false {
                    targets
                        .entry(role.category().as_str())
                        .or_default()
                        .insert(value["value"].as_str().unwrap().to_string());
                }
            }
        }
    }

    for role in Role::ALL {
        let name = role.category().as_str();
        let expected: BTreeSet<String> = targets
            .get(name)
            .into_iter()
            .flatten()
            .filter(|id| subjects.contains_key(id.as_str()))
            .cloned()
            .collect();
        let listed: BTreeSet<String> = json["categories"][name]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap().to_string())
            .collect();
        assert_eq!(listed, expected, "{name}");
        assert!(!listed.is_empty(), "{name}");
    }
}
