//! Content entities: the case, data sources, files and storage layers, and
//! content tags.

use caseuco_core::{
  facet::{
    ContentDataFacet, Facet, FileFacet, FileSystemFacet, HashFacet, UrlFacet,
    VolumeFacet,
  },
  node::{Annotation, CoreProperties, Node, NodeId, NodeRef},
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::Result;

/// Case databases on a server are recorded as a directory only.
const SERVER_DB_TYPE: &str = "postgresql";

fn forward_slashes(path: String) -> String {
  path.replace('\\', "/")
}

fn size_only(record: &ArtifactRecord) -> ContentDataFacet {
  ContentDataFacet {
    size_in_bytes: record.long(A::Size),
    ..Default::default()
  }
}

pub(super) fn case(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let directory = record.string(A::CaseDirectory).map(forward_slashes);
  let server_backed = record
    .text(A::DbType)
    .is_some_and(|t| t.eq_ignore_ascii_case(SERVER_DB_TYPE));

  let file = if server_backed {
    FileFacet {
      file_path: directory,
      is_directory: Some(true),
      ..Default::default()
    }
  } else {
    let path = match (directory, record.text(A::DatabaseName)) {
      (Some(dir), Some(db)) => Some(format!("{}/{db}", dir.trim_end_matches('/'))),
      (dir, db) => dir.or(db.map(str::to_string)),
    };
    FileFacet {
      file_path: path,
      is_directory: Some(false),
      ..Default::default()
    }
  };

  asm.primary(asm.trace().with_facet(file));
  Ok(())
}

pub(super) fn data_source(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let path = record
    .string(A::Path)
    .or_else(|| record.string(A::Name))
    .map(forward_slashes);
  let trace = asm
    .trace()
    .with_facet(FileFacet {
      file_path: path,
      ..Default::default()
    })
    .with_facet(size_only(record));
  asm.primary(trace);
  Ok(())
}

pub(super) fn file(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let local = record.string(A::LocalPath).map(|path| {
    asm.satellite_trace(UrlFacet {
      full_value: Some(path),
      user_name:  None,
    })
  });

  let hash = record
    .string(A::Md5Hash)
    .map(|md5| HashFacet {
      hash_method: Some("MD5".into()),
      hash_value:  Some(md5),
    })
    .into_iter()
    .collect();

  let content = ContentDataFacet {
    mime_type: record.string(A::MimeType),
    size_in_bytes: record.long(A::Size),
    hash,
    data_payload_reference_url: local,
    ..Default::default()
  };
  let file = Facet::from(FileFacet {
    file_path:     record.string(A::Path),
    file_name:     record.string(A::Name),
    extension:     record.string(A::Extension),
    is_directory:  record.integer(A::IsDirectory).map(|flag| flag != 0),
    size_in_bytes: record.long(A::Size),
    accessed_time: record.iso(A::DatetimeAccessed),
  })
  .with_created(record.iso(A::DatetimeCreated))
  .with_modified(record.iso(A::DatetimeModified));

  asm.primary(asm.trace().with_facet(content).with_facet(file));
  Ok(())
}

pub(super) fn file_system(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace().with_facet(FileSystemFacet {
    file_system_type: record.string(A::FsType),
    cluster_size:     record.long(A::BlockSize),
  }));
  Ok(())
}

pub(super) fn volume(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let sector_size = match (record.long(A::Size), record.long(A::Length)) {
    (Some(size), Some(length)) if length > 0 => Some(size / length),
    _ => None,
  };
  let trace = asm
    .trace()
    .with_facet(VolumeFacet { sector_size })
    .with_facet(size_only(record));
  asm.primary(trace);
  Ok(())
}

/// Volume systems and pools: only their size is carried.
pub(super) fn sized(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  asm.primary(asm.trace().with_facet(size_only(record)));
  Ok(())
}

pub(super) fn content_tag(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let object = record
    .parent
    .map(|parent| NodeRef::from(NodeId::for_record(parent)))
    .into_iter()
    .collect();
  asm.primary(Node::Annotation(Annotation {
    id: asm.id.clone(),
    core: CoreProperties {
      description: record.string(A::Comment),
      ..Default::default()
    },
    object,
    tags: record.string(A::TagName).into_iter().collect(),
  }));
  Ok(())
}
