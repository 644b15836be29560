pub mod app;
pub mod classify;
pub mod collect;
pub mod config;
pub mod document;
pub mod domain;
pub mod download;
pub mod error;
pub mod fasta;
pub mod fs_util;
pub mod output;
pub mod rdf;
pub mod uri;
