//! Browser artifacts.

use caseuco_core::{
  facet::{
    ApplicationAccountFacet, ApplicationFacet, BrowserBookmarkFacet,
    BrowserCookieFacet, ContentDataFacet, DomainNameFacet, EmailAddressFacet,
    Facet, FacetBody, FileFacet, HttpConnectionFacet, NoteFacet,
    PathRelationFacet, PhoneAccountFacet, UrlFacet,
  },
  node::NodeRef,
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::Result;

/// Host part of a URL, without userinfo or port.
pub(crate) fn host_of(url: &str) -> Option<String> {
  let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
  let authority = rest.split(['/', '?', '#']).next()?;
  let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
  let host = match host.strip_prefix('[') {
    Some(v6) => v6.split(']').next()?,
    None => host.split(':').next()?,
  };
  (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

/// A satellite application trace named by the record's program name.
fn application(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Option<NodeRef> {
  Some(asm.satellite_trace(ApplicationFacet {
    application_identifier: record.string(A::ProgName),
    ..Default::default()
  }))
}

pub(super) fn web_bookmark(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let application = application(asm, record);
  let bookmark = Facet::from(BrowserBookmarkFacet {
    url_targeted: record.string(A::Url),
    application,
  })
  .with_name(record.string(A::Name))
  .with_created(record.iso(A::DatetimeCreated));

  let domain = record
    .string(A::Domain)
    .or_else(|| record.text(A::Url).and_then(host_of));

  let trace = asm
    .trace()
    .with_facet(bookmark)
    .with_facet(DomainNameFacet { value: domain });
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_cookie(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let cookie_domain = Some(asm.satellite_trace(DomainNameFacet {
    value: record.string(A::Domain),
  }));
  let application = application(asm, record);

  let cookie = Facet::from(BrowserCookieFacet {
    cookie_name: record.string(A::Name),
    cookie_domain,
    application,
    accessed_time: record.iso(A::DatetimeStart),
    expiration_time: record.iso(A::DatetimeEnd),
  })
  .with_created(record.iso(A::DatetimeCreated));

  let trace = asm
    .trace()
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  None,
    })
    .with_facet(ContentDataFacet {
      data_payload: record.string(A::Value),
      ..Default::default()
    })
    .with_facet(cookie);
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_history(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let user = Some(asm.satellite_trace(
    Facet::new(FacetBody::IdentityFacet).with_name(record.string(A::UserName)),
  ));

  let trace = asm
    .trace()
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  user,
    })
    .with_facet(DomainNameFacet {
      value: record.string(A::Domain),
    })
    .with_facet(ApplicationFacet {
      application_identifier: record.string(A::ProgName),
      ..Default::default()
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_download(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  None,
    })
    .with_facet(DomainNameFacet {
      value: record.string(A::Domain),
    })
    .with_facet(FileFacet {
      file_path: record.string(A::Path),
      ..Default::default()
    })
    .with_facet(ApplicationFacet {
      application_identifier: record.string(A::ProgName),
      ..Default::default()
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_search_query(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let application = application(asm, record);
  let trace = asm
    .trace()
    .with_facet(NoteFacet {
      text: record.string(A::Text),
    })
    .with_facet(DomainNameFacet {
      value: record.string(A::Domain),
    })
    .with_facet(ApplicationAccountFacet { application });
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_cache(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm
    .trace()
    .with_facet(PathRelationFacet {
      path: record.string(A::Path),
    })
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  None,
    })
    .with_facet(HttpConnectionFacet {
      http_request_header: record.string(A::Headers),
    });
  trace.core.created_time = record.iso(A::DatetimeCreated);
  asm.primary(trace);
  Ok(())
}

pub(super) fn web_form_address(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let person = asm.satellite_person(record.string(A::NamePerson));

  let mut trace = asm
    .trace()
    .with_facet(
      Facet::new(FacetBody::SimpleAddress)
        .with_description(record.string(A::Location)),
    )
    .with_facet(EmailAddressFacet {
      value: record.string(A::Email),
    })
    .with_facet(PhoneAccountFacet {
      phone_number: record.string(A::PhoneNumber),
    });
  trace.core.created_time = record.iso(A::DatetimeAccessed);
  trace.core.modified_time = record.iso(A::DatetimeModified);
  asm.primary(trace);

  let primary = asm.id.clone();
  asm.link(&person.id, &primary);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::host_of;

  #[test]
  fn host_is_extracted_from_urls() {
    assert_eq!(host_of("https://example.com").as_deref(), Some("example.com"));
    assert_eq!(
      host_of("http://user@Example.org:8080/a?b#c").as_deref(),
      Some("example.org")
    );
    assert_eq!(host_of("http://[::1]:80/").as_deref(), Some("::1"));
    assert_eq!(host_of("https:///nothing"), None);
  }
}
