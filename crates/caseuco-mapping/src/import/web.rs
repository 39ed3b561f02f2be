use caseuco_core::{
  facet::{
    ApplicationAccountFacet, ApplicationFacet, BrowserBookmarkFacet,
    BrowserCookieFacet, ContentDataFacet, DomainNameFacet, EmailAddressFacet,
    FacetKind, FileFacet, HttpConnectionFacet, NoteFacet, PathRelationFacet,
    PhoneAccountFacet, UrlFacet,
  },
  node::{Node, NodeKind, Trace},
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::{
  coerce::{text, timestamp},
  query::{first, first_facet_of_kind},
};

fn domain(trace: &Trace) -> Option<&str> {
  first::<DomainNameFacet>(trace).and_then(|(_, d)| d.value.as_deref())
}

pub(super) fn web_bookmark(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (facet, bookmark) = first::<BrowserBookmarkFacet>(trace)?;
  let application = cx.facet_at::<ApplicationFacet>(bookmark.application.as_ref())?;

  Some(RecordDraft::new(ArtifactKind::WebBookmark, [
    text(A::Url, bookmark.url_targeted.as_deref()),
    text(A::Name, facet.core.name.as_deref()),
    timestamp(A::DatetimeCreated, facet.core.created_time.as_deref()),
    text(A::ProgName, application.application_identifier.as_deref()),
    text(A::Domain, domain(trace)),
  ]))
}

pub(super) fn web_cookie(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (facet, cookie) = first::<BrowserCookieFacet>(trace)?;

  let url = first::<UrlFacet>(trace).and_then(|(_, u)| u.full_value.as_deref());
  let value =
    first::<ContentDataFacet>(trace).and_then(|(_, c)| c.data_payload.as_deref());
  let cookie_domain = cx
    .facet_at::<DomainNameFacet>(cookie.cookie_domain.as_ref())
    .and_then(|d| d.value.as_deref());
  let application = cx
    .facet_at::<ApplicationFacet>(cookie.application.as_ref())
    .and_then(|a| a.application_identifier.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebCookie, [
    text(A::Url, url),
    text(A::Value, value),
    text(A::Name, cookie.cookie_name.as_deref()),
    text(A::Domain, cookie_domain),
    text(A::ProgName, application),
    timestamp(A::DatetimeStart, cookie.accessed_time.as_deref()),
    timestamp(A::DatetimeEnd, cookie.expiration_time.as_deref()),
    timestamp(A::DatetimeCreated, facet.core.created_time.as_deref()),
  ]))
}

pub(super) fn web_history(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, url) = first::<UrlFacet>(trace)?;
  let full_value = url.full_value.as_deref()?;
  let (_, application) = first::<ApplicationFacet>(trace)?;
  let program = application.application_identifier.as_deref()?;

  let user_name = cx
    .graph
    .trace(url.user_name.as_ref())
    .and_then(|user| first_facet_of_kind(user, FacetKind::IdentityFacet))
    .and_then(|identity| identity.core.name.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebHistory, [
    text(A::Url, Some(full_value)),
    text(A::UserName, user_name),
    text(A::Domain, domain(trace)),
    text(A::ProgName, Some(program)),
  ]))
}

pub(super) fn web_download(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let url = first::<UrlFacet>(trace)?.1.full_value.as_deref()?;
  let path = first::<FileFacet>(trace)?.1.file_path.as_deref()?;
  let program = first::<ApplicationFacet>(trace)
    .and_then(|(_, a)| a.application_identifier.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebDownload, [
    text(A::Url, Some(url)),
    text(A::Domain, domain(trace)),
    text(A::Path, Some(path)),
    text(A::ProgName, program),
  ]))
}

pub(super) fn web_search_query(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let query = first::<NoteFacet>(trace)?.1.text.as_deref()?;
  let (_, account) = first::<ApplicationAccountFacet>(trace)?;
  let program = cx
    .facet_at::<ApplicationFacet>(account.application.as_ref())
    .and_then(|a| a.application_identifier.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebSearchQuery, [
    text(A::Text, Some(query)),
    text(A::Domain, domain(trace)),
    text(A::ProgName, program),
  ]))
}

pub(super) fn web_cache(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let path = first::<PathRelationFacet>(trace)?.1.path.as_deref()?;
  let url = first::<UrlFacet>(trace)?.1.full_value.as_deref()?;
  let headers = first::<HttpConnectionFacet>(trace)
    .and_then(|(_, h)| h.http_request_header.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebCache, [
    text(A::Path, Some(path)),
    text(A::Url, Some(url)),
    text(A::Headers, headers),
    timestamp(A::DatetimeCreated, trace.core.created_time.as_deref()),
  ]))
}

pub(super) fn web_form_address(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let location = first_facet_of_kind(trace, FacetKind::SimpleAddress)?
    .core
    .description
    .as_deref()?;

  let email =
    first::<EmailAddressFacet>(trace).and_then(|(_, e)| e.value.as_deref());
  let phone =
    first::<PhoneAccountFacet>(trace).and_then(|(_, p)| p.phone_number.as_deref());
  let person = cx
    .linked(&trace.id, NodeKind::Person)
    .into_iter()
    .find_map(|p| p.core().name.as_deref());

  Some(RecordDraft::new(ArtifactKind::WebFormAddress, [
    text(A::Location, Some(location)),
    text(A::Email, email),
    text(A::PhoneNumber, phone),
    timestamp(A::DatetimeAccessed, trace.core.created_time.as_deref()),
    timestamp(A::DatetimeModified, trace.core.modified_time.as_deref()),
    text(A::NamePerson, person),
  ]))
}
