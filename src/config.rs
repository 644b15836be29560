use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::PanresError;
use crate::uri::{Namespace, NamespaceTable, PANRES_BASE_IRI};

pub const DEFAULT_CONFIG_FILE: &str = "panres-json.json";
pub const DEFAULT_ONTOLOGY_URL: &str = "https://raw.githubusercontent.com/genomicepidemiology/PanResOntology/refs/heads/master/ontology/panres_v2.owl";
pub const DEFAULT_OWL_FILE: &str = "panres_v2.owl";
pub const DEFAULT_JSON_OUTPUT: &str = "panres2.json";
pub const DEFAULT_GENES_FASTA: &str = "panres2_genes.fa";
pub const DEFAULT_PROTEINS_FASTA: &str = "panres_final_protein.faa";

/// On-disk configuration. Every field is optional and falls back to the
/// PanRes defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ontology_url: Option<String>,
    #[serde(default)]
    pub owl_file: Option<String>,
    #[serde(default)]
    pub json_output: Option<String>,
    #[serde(default)]
    pub genes_fasta: Option<String>,
    #[serde(default)]
    pub proteins_fasta: Option<String>,
    #[serde(default)]
    pub base_iri: Option<String>,
    /// Replaces the whole namespace table when present; `base_iri` is then ignored.
    #[serde(default)]
    pub namespaces: Option<Vec<Namespace>>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub ontology_url: Option<String>,
    pub owl_file: Option<Utf8PathBuf>,
    pub json_output: Option<Utf8PathBuf>,
    pub genes_fasta: Option<Utf8PathBuf>,
    pub proteins_fasta: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub ontology_url: String,
    pub owl_file: Utf8PathBuf,
    pub json_output: Utf8PathBuf,
    pub genes_fasta: Utf8PathBuf,
    pub proteins_fasta: Utf8PathBuf,
    pub namespaces: NamespaceTable,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            ontology_url: DEFAULT_ONTOLOGY_URL.to_string(),
            owl_file: Utf8PathBuf::from(DEFAULT_OWL_FILE),
            json_output: Utf8PathBuf::from(DEFAULT_JSON_OUTPUT),
            genes_fasta: Utf8PathBuf::from(DEFAULT_GENES_FASTA),
            proteins_fasta: Utf8PathBuf::from(DEFAULT_PROTEINS_FASTA),
            namespaces: NamespaceTable::default(),
        }
    }
}

impl ResolvedConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.ontology_url {
            self.ontology_url = url;
        }
        if let Some(path) = overrides.owl_file {
            self.owl_file = path;
        }
        if let Some(path) = overrides.json_output {
            self.json_output = path;
        }
        if let Some(path) = overrides.genes_fasta {
            self.genes_fasta = path;
        }
        if let Some(path) = overrides.proteins_fasta {
            self.proteins_fasta = path;
        }
        self
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// An explicit path must exist. Without one, `panres-json.json` in the
    /// current directory is used if present, otherwise the defaults.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, PanresError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| PanresError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| PanresError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, PanresError> {
        let defaults = ResolvedConfig::default();

        let namespaces = match (config.namespaces, config.base_iri) {
            (Some(entries), _) => {
                if let Some(empty) = entries.iter().find(|ns| ns.iri.is_empty()) {
                    return Err(PanresError::InvalidConfig(format!(
                        "namespace with prefix {:?} has an empty IRI",
                        empty.prefix
                    )));
                }
                NamespaceTable::new(entries)
            }
            (None, Some(base)) => {
                if base.is_empty() {
                    return Err(PanresError::InvalidConfig("base_iri is empty".to_string()));
                }
                NamespaceTable::with_base(&base)
            }
            (None, None) => NamespaceTable::with_base(PANRES_BASE_IRI),
        };

        Ok(ResolvedConfig {
            ontology_url: config.ontology_url.unwrap_or(defaults.ontology_url),
            owl_file: config.owl_file.map(Utf8PathBuf::from).unwrap_or(defaults.owl_file),
            json_output: config
                .json_output
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.json_output),
            genes_fasta: config
                .genes_fasta
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.genes_fasta),
            proteins_fasta: config
                .proteins_fasta
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.proteins_fasta),
            namespaces,
        })
    }
}
