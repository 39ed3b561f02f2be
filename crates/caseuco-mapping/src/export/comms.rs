//! Email, messaging, calls, contacts and calendars.

use caseuco_core::{
  facet::{
    ApplicationFacet, AttachmentFacet, CalendarEntryFacet, ContactFacet,
    EmailAddressFacet, EmailMessageFacet, ExtractedStringFacet, Facet,
    FileFacet, MessageFacet, PhoneAccountFacet, PhoneCallFacet,
    SmsMessageFacet, UrlFacet,
  },
  node::NodeRef,
  payload::MessageAttachments,
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::{Result, coerce};

pub(crate) const HTML: &str = "text/html";
pub(crate) const RTF: &str = "text/rtf";
pub(crate) const PLAIN: &str = "text/plain";

/// Phone and email facet tags that qualify a contact's numbers and addresses.
pub(crate) const TAG_HOME: &str = "Home";
pub(crate) const TAG_WORK: &str = "Work";
pub(crate) const TAG_MOBILE: &str = "Mobile";

fn email_address(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
  attr_type: A,
) -> Option<NodeRef> {
  let value = record.string(attr_type)?;
  Some(asm.satellite_trace(EmailAddressFacet { value: Some(value) }))
}

fn phone_account(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
  attr_type: A,
) -> Option<NodeRef> {
  let number = record.string(attr_type)?;
  Some(asm.satellite_trace(PhoneAccountFacet {
    phone_number: Some(number),
  }))
}

pub(super) fn email_msg(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let bcc = email_address(asm, record, A::EmailBcc);
  let cc = email_address(asm, record, A::EmailCc);
  let from = email_address(asm, record, A::EmailFrom);
  let to = email_address(asm, record, A::EmailTo);
  let header_raw = record.string(A::Headers).map(|headers| {
    asm.satellite_trace(ExtractedStringFacet {
      string_value: Some(headers),
    })
  });

  // Richest body wins.
  let (body, content_type) = [
    (A::EmailContentHtml, HTML),
    (A::EmailContentRtf, RTF),
    (A::EmailContentPlain, PLAIN),
  ]
  .into_iter()
  .find_map(|(attr_type, mime)| {
    record.string(attr_type).map(|body| (body, mime.to_string()))
  })
  .unzip();

  let message = EmailMessageFacet {
    body,
    content_type,
    received_time: record.iso(A::DatetimeRcvd),
    sent_time: record.iso(A::DatetimeSent),
    bcc,
    cc,
    from,
    to,
    header_raw,
    message_id: record.string(A::MsgId),
    subject: record.string(A::Subject),
    ..Default::default()
  };

  let trace = asm.trace().with_facet(message).with_facet(FileFacet {
    file_path: record.string(A::Path),
    ..Default::default()
  });
  asm.primary(trace);
  Ok(())
}

pub(super) fn contact(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let email = |attr_type, tag: Option<&str>| {
    Facet::from(EmailAddressFacet {
      value: record.string(attr_type),
    })
    .with_tag(tag.map(str::to_string))
  };
  let phone = |attr_type, tag: Option<&str>| {
    Facet::from(PhoneAccountFacet {
      phone_number: record.string(attr_type),
    })
    .with_tag(tag.map(str::to_string))
  };

  let trace = asm
    .trace()
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  None,
    })
    .with_facet(email(A::Email, None))
    .with_facet(email(A::EmailHome, Some(TAG_HOME)))
    .with_facet(email(A::EmailOffice, Some(TAG_WORK)))
    .with_facet(ContactFacet {
      contact_name: record.string(A::Name),
    })
    .with_facet(phone(A::PhoneNumber, None))
    .with_facet(phone(A::PhoneNumberHome, Some(TAG_HOME)))
    .with_facet(phone(A::PhoneNumberOffice, Some(TAG_WORK)))
    .with_facet(phone(A::PhoneNumberMobile, Some(TAG_MOBILE)));
  asm.primary(trace);
  Ok(())
}

pub(super) fn message(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let attachments = record
    .json(A::Attachments)
    .map(|value| coerce::decode::<MessageAttachments>(A::Attachments, value))
    .transpose()?;

  let application = Some(asm.satellite_trace(ApplicationFacet {
    application_identifier: record.string(A::MessageType),
    ..Default::default()
  }));
  let sender = email_address(asm, record, A::EmailFrom);
  let from = phone_account(asm, record, A::PhoneNumberFrom);
  let to = phone_account(asm, record, A::PhoneNumberTo);

  let message = Facet::from(MessageFacet {
    message_text: record.string(A::Text),
    application,
    sent_time: record.iso(A::Datetime),
    message_type: record.string(A::Direction),
  })
  .with_id(record.string(A::ThreadId));

  let mut trace = asm
    .trace()
    .with_facet(message)
    .with_facet(EmailMessageFacet {
      sender,
      ..Default::default()
    })
    .with_facet(PhoneAccountFacet {
      phone_number: record.string(A::PhoneNumber),
    })
    .with_facet(PhoneCallFacet {
      from,
      to,
      ..Default::default()
    })
    .with_facet(SmsMessageFacet {
      is_read: record.integer(A::ReadStatus),
    });

  if let Some(attachments) = &attachments {
    for location in attachments.locations() {
      trace = trace.with_facet(AttachmentFacet {
        url: Some(location.to_string()),
      });
    }
  }

  asm.primary(trace);
  Ok(())
}

pub(super) fn call_log(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let from = phone_account(asm, record, A::PhoneNumberFrom);
  let to = phone_account(asm, record, A::PhoneNumberTo);

  let trace = asm
    .trace()
    .with_facet(PhoneAccountFacet {
      phone_number: record.string(A::PhoneNumber),
    })
    .with_facet(PhoneCallFacet {
      from,
      to,
      start_time: record.iso(A::DatetimeStart),
      end_time: record.iso(A::DatetimeEnd),
      call_type: record.string(A::Direction),
    })
    .with_facet(ContactFacet {
      contact_name: record.string(A::Name),
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn calendar_entry(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let location = record
    .string(A::Location)
    .map(|name| asm.satellite_location(Some(name)));

  let entry = Facet::from(CalendarEntryFacet {
    start_time: record.iso(A::DatetimeStart),
    end_time: record.iso(A::DatetimeEnd),
    event_type: record.string(A::CalendarEntryType),
    location,
  })
  .with_description(record.string(A::Description));

  asm.primary(asm.trace().with_facet(entry));
  Ok(())
}

pub(super) fn speed_dial_entry(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(ContactFacet {
      contact_name: record.string(A::NamePerson),
    })
    .with_facet(PhoneAccountFacet {
      phone_number: record.string(A::PhoneNumber),
    });
  asm.primary(trace);
  Ok(())
}
