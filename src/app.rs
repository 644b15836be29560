use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::config::ResolvedConfig;
use crate::document::{Document, build_document};
use crate::domain::Category;
use crate::download::OntologyClient;
use crate::error::PanresError;
use crate::fasta::load_fasta;
use crate::output::write_document;
use crate::rdf::Graph;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Use the ontology file already on disk instead of downloading it.
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Forwards progress to the log.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => info!(?elapsed, "{}", event.message),
            None => info!("{}", event.message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionStats {
    pub ontology_url: Option<String>,
    pub downloaded_bytes: Option<u64>,
    pub total_triples: usize,
    pub total_subjects: usize,
    pub categories: Vec<CategoryCount>,
    pub gene_sequences: usize,
    pub protein_sequences: usize,
    pub output_path: String,
    pub output_bytes: u64,
}

impl ConversionStats {
    pub fn category_count(&self, category: Category) -> Option<usize> {
        self.categories
            .iter()
            .find(|entry| entry.category == category.as_str())
            .map(|entry| entry.count)
    }
}

/// The in-memory result of a conversion, before anything is written.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: Document,
    pub gene_sequences: usize,
    pub protein_sequences: usize,
}

pub struct Converter<C: OntologyClient> {
    config: ResolvedConfig,
    client: C,
}

impl<C: OntologyClient> Converter<C> {
    pub fn new(config: ResolvedConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn download(&self, sink: &dyn ProgressSink) -> Result<u64, PanresError> {
        sink.event(ProgressEvent {
            message: format!("Downloading OWL file from: {}", self.config.ontology_url),
            elapsed: None,
        });
        let bytes = self
            .client
            .download(&self.config.ontology_url, &self.config.owl_file)?;
        sink.event(ProgressEvent {
            message: format!(
                "Downloaded {} ({:.2} KB)",
                self.config.owl_file,
                bytes as f64 / 1024.0
            ),
            elapsed: None,
        });
        Ok(bytes)
    }

    pub fn convert(&self, sink: &dyn ProgressSink) -> Result<Conversion, PanresError> {
        info!("loading OWL file: {}", self.config.owl_file);
        let graph = Graph::parse_file(&self.config.owl_file)?;
        info!(triples = graph.len(), "parsed ontology");

        let genes = load_fasta(&self.config.genes_fasta)?;
        let proteins = load_fasta(&self.config.proteins_fasta)?;

        let document = build_document(&graph, &self.config.namespaces, &genes, &proteins, sink);
        Ok(Conversion {
            document,
            gene_sequences: genes.len(),
            protein_sequences: proteins.len(),
        })
    }

    pub fn run(
        &self,
        options: RunOptions,
        sink: &dyn ProgressSink,
    ) -> Result<ConversionStats, PanresError> {
        let downloaded_bytes = if options.offline {
            None
        } else {
            Some(self.download(sink)?)
        };

        let Conversion {
            document,
            gene_sequences,
            protein_sequences,
        } = self.convert(sink)?;

        info!("writing JSON to: {}", self.config.json_output);
        let output_bytes = write_document(&self.config.json_output, &document)?;

        Ok(ConversionStats {
            ontology_url: (!options.offline).then(|| self.config.ontology_url.clone()),
            downloaded_bytes,
            total_triples: document.metadata.total_triples,
            total_subjects: document.metadata.total_subjects,
            categories: Category::ALL
                .iter()
                .map(|category| CategoryCount {
                    category: category.as_str().to_string(),
                    count: document.categories.get(*category).len(),
                })
                .collect(),
            gene_sequences,
            protein_sequences,
            output_path: self.config.json_output.to_string(),
            output_bytes,
        })
    }
}
