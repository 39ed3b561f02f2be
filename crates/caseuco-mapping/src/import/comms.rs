use caseuco_core::{
  facet::{
    ApplicationFacet, AttachmentFacet, CalendarEntryFacet, ContactFacet,
    EmailAddressFacet, EmailMessageFacet, ExtractedStringFacet, Facet,
    FacetShape, FileFacet, MessageFacet, PhoneAccountFacet, PhoneCallFacet,
    SmsMessageFacet, UrlFacet,
  },
  node::{Node, NodeRef},
  payload::{MessageAttachments, UrlAttachment},
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::{
  Result,
  coerce::{integer, json, text, timestamp},
  export::comms::{HTML, RTF, TAG_HOME, TAG_MOBILE, TAG_WORK},
  query::{all, first},
};

fn address_at<'a>(
  cx: &ImportContext<'a>,
  reference: Option<&NodeRef>,
) -> Option<&'a str> {
  cx.facet_at::<EmailAddressFacet>(reference)?.value.as_deref()
}

fn number_at<'a>(
  cx: &ImportContext<'a>,
  reference: Option<&NodeRef>,
) -> Option<&'a str> {
  cx.facet_at::<PhoneAccountFacet>(reference)?
    .phone_number
    .as_deref()
}

/// The first facet whose tag matches `tag`; `None` matches untagged facets.
fn tagged<'a, T>(facets: &[(&'a Facet, &'a T)], tag: Option<&str>) -> Option<&'a T> {
  facets
    .iter()
    .find(|(facet, _)| match (facet.core.tag.as_deref(), tag) {
      (None, None) => true,
      (Some(have), Some(want)) => have.eq_ignore_ascii_case(want),
      _ => false,
    })
    .map(|(_, body)| *body)
}

/// Body attribute by declared content type. Unknown or missing types are
/// treated as plain text.
fn body_attribute(content_type: Option<&str>) -> A {
  match content_type {
    Some(t) if t.eq_ignore_ascii_case(HTML) => A::EmailContentHtml,
    Some(t) if t.eq_ignore_ascii_case(RTF) => A::EmailContentRtf,
    _ => A::EmailContentPlain,
  }
}

pub(super) fn email_msg(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, email) = first::<EmailMessageFacet>(trace)?;
  let has_content = email.body.is_some()
    || email.subject.is_some()
    || email.message_id.is_some()
    || email.sent_time.is_some()
    || email.received_time.is_some();
  if !has_content {
    return None;
  }

  let headers = cx
    .facet_at::<ExtractedStringFacet>(email.header_raw.as_ref())
    .and_then(|h| h.string_value.as_deref());
  let path = first::<FileFacet>(trace).and_then(|(_, f)| f.file_path.as_deref());

  Some(RecordDraft::new(ArtifactKind::EmailMsg, [
    text(body_attribute(email.content_type.as_deref()), email.body.as_deref()),
    timestamp(A::DatetimeRcvd, email.received_time.as_deref()),
    timestamp(A::DatetimeSent, email.sent_time.as_deref()),
    text(A::EmailBcc, address_at(cx, email.bcc.as_ref())),
    text(A::EmailCc, address_at(cx, email.cc.as_ref())),
    text(A::EmailFrom, address_at(cx, email.from.as_ref())),
    text(A::EmailTo, address_at(cx, email.to.as_ref())),
    text(A::Headers, headers),
    text(A::MsgId, email.message_id.as_deref()),
    text(A::Subject, email.subject.as_deref()),
    text(A::Path, path),
  ]))
}

pub(super) fn contact(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let name = first::<ContactFacet>(trace)?.1.contact_name.as_deref()?;

  let url = first::<UrlFacet>(trace).and_then(|(_, u)| u.full_value.as_deref());
  let emails = all::<EmailAddressFacet>(trace);
  let email = |tag| tagged(&emails, tag).and_then(|e| e.value.as_deref());
  let phones = all::<PhoneAccountFacet>(trace);
  let phone = |tag| tagged(&phones, tag).and_then(|p| p.phone_number.as_deref());

  Some(RecordDraft::new(ArtifactKind::Contact, [
    text(A::Name, Some(name)),
    text(A::Url, url),
    text(A::Email, email(None)),
    text(A::EmailHome, email(Some(TAG_HOME))),
    text(A::EmailOffice, email(Some(TAG_WORK))),
    text(A::PhoneNumber, phone(None)),
    text(A::PhoneNumberHome, phone(Some(TAG_HOME))),
    text(A::PhoneNumberOffice, phone(Some(TAG_WORK))),
    text(A::PhoneNumberMobile, phone(Some(TAG_MOBILE))),
  ]))
}

/// Attachment facets come back as URL attachments; the file/URL split does
/// not survive the graph.
pub(super) fn message(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Result<Option<RecordDraft>> {
  let Some(trace) = node.as_trace() else {
    return Ok(None);
  };
  let Some((facet, message)) = first::<MessageFacet>(trace) else {
    return Ok(None);
  };

  let program = cx
    .facet_at::<ApplicationFacet>(message.application.as_ref())
    .and_then(|a| a.application_identifier.as_deref());
  let sender = first::<EmailMessageFacet>(trace)
    .and_then(|(_, e)| address_at(cx, e.sender.as_ref()));
  let number =
    first::<PhoneAccountFacet>(trace).and_then(|(_, p)| p.phone_number.as_deref());
  let call = first::<PhoneCallFacet>(trace).map(|(_, c)| c);
  let read = first::<SmsMessageFacet>(trace).and_then(|(_, s)| s.is_read);

  let url_attachments: Vec<UrlAttachment> = all::<AttachmentFacet>(trace)
    .into_iter()
    .filter_map(|(_, a)| a.url.clone())
    .map(|url_string| UrlAttachment { url_string })
    .collect();
  let attachments = if url_attachments.is_empty() {
    None
  } else {
    let payload = MessageAttachments {
      file_attachments: Vec::new(),
      url_attachments,
    };
    Some(json(A::Attachments, &payload)?)
  };

  Ok(Some(RecordDraft::new(ArtifactKind::Message, [
    text(A::Text, message.message_text.as_deref()),
    text(A::MessageType, program),
    timestamp(A::Datetime, message.sent_time.as_deref()),
    text(A::Direction, message.message_type.as_deref()),
    text(A::ThreadId, facet.id.as_deref()),
    text(A::EmailFrom, sender),
    text(A::PhoneNumber, number),
    text(A::PhoneNumberFrom, call.and_then(|c| number_at(cx, c.from.as_ref()))),
    text(A::PhoneNumberTo, call.and_then(|c| number_at(cx, c.to.as_ref()))),
    integer(A::ReadStatus, read),
    attachments,
  ])))
}

pub(super) fn call_log(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, call) = first::<PhoneCallFacet>(trace)?;

  let number =
    first::<PhoneAccountFacet>(trace).and_then(|(_, p)| p.phone_number.as_deref());
  let name = first::<ContactFacet>(trace).and_then(|(_, c)| c.contact_name.as_deref());

  Some(RecordDraft::new(ArtifactKind::CallLog, [
    text(A::PhoneNumber, number),
    text(A::PhoneNumberFrom, number_at(cx, call.from.as_ref())),
    text(A::PhoneNumberTo, number_at(cx, call.to.as_ref())),
    timestamp(A::DatetimeStart, call.start_time.as_deref()),
    timestamp(A::DatetimeEnd, call.end_time.as_deref()),
    text(A::Direction, call.call_type.as_deref()),
    text(A::Name, name),
  ]))
}

pub(super) fn calendar_entry(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (facet, entry) = first::<CalendarEntryFacet>(trace)?;

  Some(RecordDraft::new(ArtifactKind::CalendarEntry, [
    timestamp(A::DatetimeStart, entry.start_time.as_deref()),
    timestamp(A::DatetimeEnd, entry.end_time.as_deref()),
    text(A::CalendarEntryType, entry.event_type.as_deref()),
    text(A::Description, facet.core.description.as_deref()),
    text(A::Location, cx.name_at(entry.location.as_ref())),
  ]))
}

/// A speed-dial entry carries a contact and a number and nothing else, which
/// sets it apart from a full contact card.
pub(super) fn speed_dial_entry(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, contact) = first::<ContactFacet>(trace)?;
  let (_, phone) = first::<PhoneAccountFacet>(trace)?;
  let only_contact_and_phone = trace
    .facets
    .iter()
    .all(|f| f.kind() == ContactFacet::KIND || f.kind() == PhoneAccountFacet::KIND);
  if !only_contact_and_phone {
    return None;
  }

  Some(RecordDraft::new(ArtifactKind::SpeedDialEntry, [
    text(A::NamePerson, contact.contact_name.as_deref()),
    text(A::PhoneNumber, phone.phone_number.as_deref()),
  ]))
}
