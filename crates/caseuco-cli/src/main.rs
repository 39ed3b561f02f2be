//! `caseuco`: convert forensic records to and from CASE/UCO JSON-LD.
//!
//! # Usage
//!
//! ```text
//! caseuco export --records records.json --output case.jsonld
//! caseuco import --graph case.jsonld --records records.json --parent 1
//! ```
//!
//! Settings come from `caseuco.toml` (or the path given with `--config`) and
//! `CASEUCO_*` environment variables, e.g.
//! `CASEUCO_EXPORT__INCLUDE_PARENT_CHILD=false`.

use std::{
  fs,
  io::{self, Write as _},
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use caseuco_core::{
  event::EventTypeTable, memory::MemoryStore, node::CaseBundle,
  record::ArtifactRecord, record::RecordId,
};
use caseuco_mapping::{
  CandidatePolicy, Error, ExportConfig, Exporter, IdRegistry, Importer,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "CASE/UCO export and import")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "caseuco.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Export records to a JSON-LD bundle.
  Export {
    /// JSON array of records to export.
    #[arg(long, value_name = "FILE")]
    records: PathBuf,

    /// Where to write the bundle (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },

  /// Import a JSON-LD bundle as records.
  Import {
    /// The JSON-LD bundle to read.
    #[arg(long, value_name = "FILE")]
    graph: PathBuf,

    /// Existing records the graph may refer to.
    #[arg(long, value_name = "FILE")]
    records: Option<PathBuf>,

    /// Parent for records the graph does not place anywhere.
    #[arg(long, value_name = "ID")]
    parent: Option<i64>,

    /// Create a record for every kind that accepts a node, not just the
    /// first.
    #[arg(long)]
    all_candidates: bool,

    /// Where to write the created records (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
  export: ExportConfig,
  import: ImportSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportSettings {
  policy: CandidatePolicy,
}

fn load_settings(path: &Path) -> anyhow::Result<Settings> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("CASEUCO").separator("__"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise settings")
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays clean for output.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(&cli.config)?;
  let event_types = EventTypeTable::standard();

  match cli.command {
    Command::Export { records, output } => {
      let records: Vec<ArtifactRecord> = read_json(&records)?;
      let bundle = export(&records, &event_types, settings.export)?;
      write_json(output.as_deref(), &bundle)
    }
    Command::Import {
      graph,
      records,
      parent,
      all_candidates,
      output,
    } => {
      let bundle: CaseBundle = read_json(&graph)?;
      let existing: Vec<ArtifactRecord> = match records {
        Some(path) => read_json(&path)?,
        None => Vec::new(),
      };
      let policy = if all_candidates {
        CandidatePolicy::AllMatches
      } else {
        settings.import.policy
      };
      let created = import(
        &bundle,
        existing,
        &event_types,
        parent.map(RecordId),
        policy,
      )?;
      write_json(output.as_deref(), &created)
    }
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

fn export(
  records: &[ArtifactRecord],
  event_types: &EventTypeTable,
  config: ExportConfig,
) -> anyhow::Result<CaseBundle> {
  let store = MemoryStore::from_records(records.iter().cloned())
    .context("failed to load records")?;
  let mut exporter = Exporter::new(&store, event_types, config);

  let mut graph = Vec::new();
  for record in records {
    match exporter.export_entity(record) {
      Ok(nodes) => graph.extend(nodes),
      Err(Error::NotExportable { id, kind }) => {
        tracing::warn!(record = %id, %kind, "record has no graph shape, skipping");
      }
      Err(e) => {
        return Err(e).with_context(|| format!("failed to export record {}", record.id));
      }
    }
  }

  tracing::info!(records = records.len(), nodes = graph.len(), "export finished");
  Ok(CaseBundle::new(graph))
}

fn import(
  bundle: &CaseBundle,
  existing: Vec<ArtifactRecord>,
  event_types: &EventTypeTable,
  parent: Option<RecordId>,
  policy: CandidatePolicy,
) -> anyhow::Result<Vec<ArtifactRecord>> {
  let mut store =
    MemoryStore::from_records(existing).context("failed to load records")?;
  let registry = IdRegistry::seeded(store.records());

  let mut importer = Importer::new(event_types)
    .with_registry(registry)
    .with_default_parent(parent)
    .with_policy(policy);
  let report = importer
    .import_graph(&bundle.graph, &mut store)
    .context("failed to import graph")?;

  for node in &report.unmatched {
    tracing::debug!(%node, "node left unmatched");
  }
  if !report.unmatched.is_empty() {
    tracing::warn!(count = report.unmatched.len(), "some nodes matched no record kind");
  }
  Ok(report.created)
}

// ─── I/O helpers ─────────────────────────────────────────────────────────────

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
  let raw = fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  serde_json::from_str(&raw)
    .with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> anyhow::Result<()> {
  let mut json = serde_json::to_string_pretty(value).context("serialising output")?;
  json.push('\n');
  match path {
    Some(path) => fs::write(path, json)
      .with_context(|| format!("writing {}", path.display())),
    None => io::stdout()
      .lock()
      .write_all(json.as_bytes())
      .context("writing to stdout"),
  }
}

#[cfg(test)]
mod tests {
  use caseuco_core::record::{
    ArtifactKind, Attribute, AttributeType, AttributeValue, RecordKind,
  };

  use super::*;

  fn records() -> Vec<ArtifactRecord> {
    let source = ArtifactRecord::new(RecordId(1), RecordKind::DataSource, None, vec![
      Attribute::new(AttributeType::Name, "test", AttributeValue::Text("disk.e01".into())),
    ]);
    let bookmark = ArtifactRecord::new(
      RecordId(2),
      RecordKind::Artifact(ArtifactKind::WebBookmark),
      Some(RecordId(1)),
      vec![
        Attribute::new(
          AttributeType::Url,
          "test",
          AttributeValue::Text("https://example.com".into()),
        ),
        Attribute::new(
          AttributeType::ProgName,
          "test",
          AttributeValue::Text("Browser".into()),
        ),
      ],
    );
    let keyword = ArtifactRecord::new(
      RecordId(3),
      RecordKind::Artifact(ArtifactKind::KeywordHit),
      Some(RecordId(1)),
      Vec::new(),
    );
    vec![source, bookmark, keyword]
  }

  #[test]
  fn settings_default_to_containment() {
    let settings: Settings = config::Config::builder()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert!(settings.export.include_parent_child);
    assert_eq!(settings.import.policy, CandidatePolicy::FirstMatch);
  }

  #[test]
  fn settings_read_toml() {
    let settings: Settings = config::Config::builder()
      .add_source(config::File::from_str(
        "[export]\ninclude_parent_child = false\n[import]\npolicy = \"all_matches\"\n",
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert!(!settings.export.include_parent_child);
    assert_eq!(settings.import.policy, CandidatePolicy::AllMatches);
  }

  #[test]
  fn export_skips_records_without_a_shape() {
    let table = EventTypeTable::standard();
    let bundle = export(&records(), &table, ExportConfig::default()).unwrap();
    // Data source trace, bookmark trace, application satellite, and the
    // bookmark's containment edge.
    assert_eq!(bundle.graph.len(), 4);
  }

  #[test]
  fn import_restores_exported_bookmark() {
    let table = EventTypeTable::standard();
    let records = records();
    let bundle = export(&records[..2], &table, ExportConfig::default()).unwrap();
    let created = import(
      &bundle,
      records[..1].to_vec(),
      &table,
      None,
      CandidatePolicy::FirstMatch,
    )
    .unwrap();

    // The data source trace is content, not an artifact, so only the
    // bookmark comes back.
    let [bookmark] = created.as_slice() else {
      panic!("expected one record, got {created:?}")
    };
    assert_eq!(bookmark.kind, RecordKind::Artifact(ArtifactKind::WebBookmark));
    assert_eq!(bookmark.parent, Some(RecordId(1)));
    assert_eq!(bookmark.text(AttributeType::Url), Some("https://example.com"));
  }
}
