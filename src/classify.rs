use std::collections::HashSet;

use crate::collect::SubjectTable;
use crate::domain::Category;

/// A relationship whose targets are categorised by the role they play, not by
/// their own `rdf:type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ResistanceClass,
    PredictedPhenotype,
    MechanismOfResistance,
    SourceDatabase,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::ResistanceClass,
        Role::PredictedPhenotype,
        Role::MechanismOfResistance,
        Role::SourceDatabase,
    ];

    pub fn predicate(&self) -> &'static str {
        match self {
            Role::ResistanceClass => "has_resistance_class",
            Role::PredictedPhenotype => "has_predicted_phenotype",
            Role::MechanismOfResistance => "has_mechanism_of_resistance",
            Role::SourceDatabase => "is_from_database",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Role::ResistanceClass => Category::AntibioticClass,
            Role::PredictedPhenotype => Category::Phenotype,
            Role::MechanismOfResistance => Category::Mechanism,
            Role::SourceDatabase => Category::Database,
        }
    }

    fn slot(&self) -> usize {
        match self {
            Role::ResistanceClass => 0,
            Role::PredictedPhenotype => 1,
            Role::MechanismOfResistance => 2,
            Role::SourceDatabase => 3,
        }
    }
}

/// Targets of each role predicate, gathered from a complete [`SubjectTable`].
///
/// A role predicate may be stated before or after its target's own triples, so
/// classification only runs once every subject has been collected.
#[derive(Debug, Clone, Default)]
pub struct RoleSets {
    members: [HashSet<String>; 4],
}

impl RoleSets {
    pub fn classify(table: &SubjectTable) -> Self {
        let mut sets = Self::default();
        for subject in table.iter() {
            for role in Role::ALL {
                let Some(values) = subject.properties.get(role.predicate()) else {
                    continue;
                };
                for value in values.iter().filter(|value| !value.is_literal) {
                    sets.members[role.slot()].insert(value.value.clone());
                }
            }
        }
        sets
    }

    pub fn contains(&self, role: Role, id: &str) -> bool {
        self.members[role.slot()].contains(id)
    }

    pub fn len(&self, role: Role) -> usize {
        self.members[role.slot()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, Triple};
    use crate::rdf::Graph;
    use crate::uri::{NamespaceTable, PANRES_BASE_IRI};

    fn onto(local: &str) -> String {
        format!("{PANRES_BASE_IRI}{local}")
    }

    #[test]
    fn role_targets_are_resources_only() {
        let graph = Graph::from_triples([
            Triple::new(
                Node::iri(onto("pan_1")),
                onto("has_resistance_class"),
                Node::iri(onto("beta_lactam")),
            ),
            Triple::new(
                Node::iri(onto("pan_1")),
                onto("has_mechanism_of_resistance"),
                Node::literal("efflux"),
            ),
            Triple::new(
                Node::iri(onto("pan_2")),
                onto("is_from_database"),
                Node::iri(onto("ResFinder")),
            ),
            Triple::new(
                Node::iri(onto("pan_2")),
                onto("has_predicted_phenotype"),
                Node::iri(onto("ampicillin")),
            ),
        ]);
        let table = SubjectTable::collect(&graph, &NamespaceTable::default());
        let roles = RoleSets::classify(&table);

        assert!(roles.contains(Role::ResistanceClass, "beta_lactam"));
        assert!(roles.contains(Role::SourceDatabase, "ResFinder"));
        assert!(roles.contains(Role::PredictedPhenotype, "ampicillin"));
        assert_eq!(roles.len(Role::MechanismOfResistance), 0);
        assert!(!roles.contains(Role::ResistanceClass, "ResFinder"));
    }

    #[test]
    fn roles_map_to_categories() {
        let categories: Vec<Category> = Role::ALL.iter().map(Role::category).collect();
        assert_eq!(
            categories,
            vec![
                Category::AntibioticClass,
                Category::Phenotype,
                Category::Mechanism,
                Category::Database,
            ]
        );
    }
}
