use caseuco_core::{
  facet::{
    AccountAuthenticationFacet, AccountFacet, ActionArgumentFacet,
    ApplicationAccountFacet, ApplicationFacet, ComputerSpecificationFacet,
    ContentDataFacet, DeviceFacet, DigitalAccountFacet, DomainNameFacet,
    EmailAddressFacet, EmailMessageFacet, EnvironmentVariableFacet,
    ExtractedStringFacet, FacetKind, FileFacet, HashFacet, NoteFacet,
    OperatingSystemFacet, PathRelationFacet, UrlFacet, WindowsAccountFacet,
    WindowsComputerSpecificationFacet, WindowsRegistryValueFacet,
  },
  node::{Node, NodeKind, Trace},
  record::{ArtifactKind, AttributeType as A},
};

use super::{ImportContext, RecordDraft};
use crate::{
  coerce::{integer, long, text, timestamp},
  export::system::{LAST_AUTHOR, LAST_PRINTED, PHOTO_DNA},
  query::{all, all_facets_of_kind, first, first_facet_of_kind},
};

fn domain(trace: &Trace) -> Option<&str> {
  first::<DomainNameFacet>(trace).and_then(|(_, d)| d.value.as_deref())
}

pub(super) fn gen_info(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let hash = all::<HashFacet>(trace).into_iter().find_map(|(_, h)| {
    let photo_dna = h
      .hash_method
      .as_deref()
      .is_some_and(|m| m.eq_ignore_ascii_case(PHOTO_DNA));
    if photo_dna { h.hash_value.as_deref() } else { None }
  })?;

  Some(RecordDraft::new(ArtifactKind::GenInfo, [text(
    A::HashPhotoDna,
    Some(hash),
  )]))
}

pub(super) fn recent_object(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (registry_facet, registry_value) = first::<WindowsRegistryValueFacet>(trace)?;

  let program = first::<ApplicationFacet>(trace)
    .and_then(|(_, a)| a.application_identifier.as_deref());
  let file = first::<FileFacet>(trace);
  let comment = cx
    .linked(&trace.id, NodeKind::Assertion)
    .into_iter()
    .filter_map(Node::as_assertion)
    .find_map(|a| a.statement.as_deref());

  Some(RecordDraft::new(ArtifactKind::RecentObject, [
    text(A::ProgName, program),
    text(A::Value, registry_value.data.as_deref()),
    text(A::Name, registry_facet.core.name.as_deref()),
    timestamp(
      A::DatetimeAccessed,
      file.and_then(|(_, f)| f.accessed_time.as_deref()),
    ),
    timestamp(
      A::Datetime,
      file.and_then(|(f, _)| f.core.created_time.as_deref()),
    ),
    text(A::Comment, comment),
  ]))
}

/// The first file facet is the source path, the second the install path.
pub(super) fn installed_prog(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let name = first_facet_of_kind(trace, FacetKind::Software)?
    .core
    .name
    .as_deref()?;

  let files = all::<FileFacet>(trace);
  let source = files.first().and_then(|(_, f)| f.file_path.as_deref());
  let installed = files.get(1);

  Some(RecordDraft::new(ArtifactKind::InstalledProg, [
    text(A::ProgName, Some(name)),
    text(A::PathSource, source),
    text(A::Path, installed.and_then(|(_, f)| f.file_path.as_deref())),
    timestamp(
      A::Datetime,
      installed.and_then(|(f, _)| f.core.modified_time.as_deref()),
    ),
    timestamp(
      A::DatetimeCreated,
      installed.and_then(|(f, _)| f.core.created_time.as_deref()),
    ),
  ]))
}

pub(super) fn extracted_text(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let value = first::<ExtractedStringFacet>(trace)?.1.string_value.as_deref()?;
  Some(RecordDraft::new(ArtifactKind::ExtractedText, [text(
    A::Text,
    Some(value),
  )]))
}

pub(super) fn os_info(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (os_facet, os) = first::<OperatingSystemFacet>(trace)?;

  let serial = first::<DeviceFacet>(trace).and_then(|(_, d)| d.serial_number.as_deref());
  let computer = first::<ComputerSpecificationFacet>(trace).map(|(_, s)| s);
  let windows = first::<WindowsComputerSpecificationFacet>(trace).map(|(_, w)| w);
  let temp = windows
    .and_then(|w| cx.facet_at::<EnvironmentVariableFacet>(w.windows_temp_directory.as_ref()))
    .and_then(|v| v.value.as_deref());

  Some(RecordDraft::new(ArtifactKind::OsInfo, [
    timestamp(A::Datetime, os.install_date.as_deref()),
    text(A::Version, os.version.as_deref()),
    text(A::ProgName, os_facet.core.name.as_deref()),
    text(A::Domain, domain(trace)),
    text(A::ProductId, serial),
    text(A::Name, computer.and_then(|c| c.host_name.as_deref())),
    text(
      A::ProcessorArchitecture,
      computer.and_then(|c| c.processor_architecture.as_deref()),
    ),
    text(
      A::Owner,
      windows.and_then(|w| cx.name_at(w.registered_owner.as_ref())),
    ),
    text(
      A::Organization,
      windows.and_then(|w| cx.name_at(w.registered_organization.as_ref())),
    ),
    text(A::TempDir, temp),
  ]))
}

pub(super) fn os_account(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (account_facet, account) = first::<AccountFacet>(trace)?;
  let (digital_facet, digital) = first::<DigitalAccountFacet>(trace)?;

  let email = first::<EmailAddressFacet>(trace).and_then(|(_, e)| e.value.as_deref());
  let path = first::<PathRelationFacet>(trace).and_then(|(_, p)| p.path.as_deref());
  let groups = first::<WindowsAccountFacet>(trace).and_then(|(_, w)| w.groups.as_deref());

  Some(RecordDraft::new(ArtifactKind::OsAccount, [
    text(A::Email, email),
    text(A::Path, path),
    text(A::Groups, groups),
    text(A::Flag, trace.core.tag.as_deref()),
    text(A::DisplayName, digital.display_name.as_deref()),
    timestamp(A::DatetimeAccessed, digital.last_login_time.as_deref()),
    text(A::Description, digital_facet.core.description.as_deref()),
    text(A::Name, cx.name_at(account.owner.as_ref())),
    text(A::AccountType, account.account_type.as_deref()),
    text(A::UserId, account.account_identifier.as_deref()),
    timestamp(A::DatetimeCreated, account_facet.core.created_time.as_deref()),
  ]))
}

/// Digital accounts are positional: the first holds the display name, the
/// second the user name.
pub(super) fn service_account(
  node: &Node,
  cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (app_facet, app_account) = first::<ApplicationAccountFacet>(trace)?;

  let category = first::<AccountFacet>(trace).and_then(|(_, a)| a.account_type.as_deref());
  let reply_to = first::<EmailMessageFacet>(trace).and_then(|(_, e)| {
    cx.facet_at::<EmailAddressFacet>(e.in_reply_to.as_ref())?
      .value
      .as_deref()
  });
  let digital = all::<DigitalAccountFacet>(trace);
  let display = |index: usize| {
    digital
      .get(index)
      .and_then(|(_, d)| d.display_name.as_deref())
  };
  let password = first::<AccountAuthenticationFacet>(trace)
    .and_then(|(_, a)| a.password.as_deref());
  let path = first::<PathRelationFacet>(trace).and_then(|(_, p)| p.path.as_deref());
  let url = first::<UrlFacet>(trace).and_then(|(_, u)| u.full_value.as_deref());
  let program = cx
    .facet_at::<ApplicationFacet>(app_account.application.as_ref())
    .and_then(|a| a.application_identifier.as_deref());

  Some(RecordDraft::new(ArtifactKind::ServiceAccount, [
    text(A::Category, category),
    text(A::Domain, domain(trace)),
    text(A::EmailReplyto, reply_to),
    text(A::Name, display(0)),
    text(A::Password, password),
    text(A::Path, path),
    text(A::Url, url),
    text(A::UserName, display(1)),
    text(A::Description, trace.core.description.as_deref()),
    text(A::ProgName, program),
    text(A::UserId, app_facet.id.as_deref()),
    timestamp(A::DatetimeCreated, app_facet.core.created_time.as_deref()),
  ]))
}

/// A named account facet is a card: its identifier is the card number and
/// its name the card set. The card number, when present, doubles as the
/// account id.
pub(super) fn account(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let accounts = all::<AccountFacet>(trace);
  let account_type = accounts
    .iter()
    .find_map(|(_, a)| a.account_type.as_deref())?;

  let mut id = None;
  let mut card_number = None;
  let mut set_name = None;
  for (facet, account) in &accounts {
    match facet.core.name.as_deref() {
      Some(name) => {
        set_name = Some(name);
        card_number = account.account_identifier.as_deref();
      }
      None => id = id.or(account.account_identifier.as_deref()),
    }
  }

  Some(RecordDraft::new(ArtifactKind::Account, [
    text(A::AccountType, Some(account_type)),
    text(A::Id, card_number.or(id)),
    text(A::CardNumber, card_number),
    text(A::SetName, set_name),
  ]))
}

/// The first path is the remote one, the second the local mount.
pub(super) fn remote_drive(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let paths = all::<PathRelationFacet>(trace);
  let [(_, remote), (_, local), ..] = paths.as_slice() else {
    return None;
  };
  let remote = remote.path.as_deref()?;

  Some(RecordDraft::new(ArtifactKind::RemoteDrive, [
    text(A::RemotePath, Some(remote)),
    text(A::LocalPath, local.path.as_deref()),
  ]))
}

pub(super) fn prog_run(node: &Node, _cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, application) = first::<ApplicationFacet>(trace)?;
  let program = application.application_identifier.as_deref()?;

  Some(RecordDraft::new(ArtifactKind::ProgRun, [
    text(A::ProgName, Some(program)),
    integer(A::Count, application.number_of_launches),
  ]))
}

pub(super) fn data_source_usage(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let description = node.as_trace()?.core.description.as_deref()?;
  Some(RecordDraft::new(ArtifactKind::DataSourceUsage, [text(
    A::Description,
    Some(description),
  )]))
}

pub(super) fn clipboard_content(
  node: &Node,
  _cx: &ImportContext<'_>,
) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let note = first::<NoteFacet>(trace)?.1.text.as_deref()?;
  Some(RecordDraft::new(ArtifactKind::ClipboardContent, [text(
    A::Text,
    Some(note),
  )]))
}

/// General document fields come from the first untagged content-data facet;
/// the last-printed facet only contributes its time.
pub(super) fn metadata(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let trace = node.as_trace()?;
  let (_, application) = first::<ApplicationFacet>(trace)?;
  let contents = all::<ContentDataFacet>(trace);
  if contents.is_empty() {
    return None;
  }

  let is_last_printed = |tag: Option<&str>| {
    tag.is_some_and(|t| t.eq_ignore_ascii_case(LAST_PRINTED))
  };
  let general = contents
    .iter()
    .find(|(facet, _)| !is_last_printed(facet.core.tag.as_deref()));
  let printed = contents
    .iter()
    .find(|(facet, _)| is_last_printed(facet.core.tag.as_deref()))
    .and_then(|(facet, _)| facet.core.modified_time.as_deref());

  let linked_name = |kind: NodeKind, tag: Option<&str>| {
    cx.linked(&trace.id, kind)
      .into_iter()
      .filter(|n| {
        tag.is_none_or(|tag| {
          n.core().tag.as_deref().is_some_and(|t| t.eq_ignore_ascii_case(tag))
        })
      })
      .find_map(|n| n.core().name.as_deref())
  };

  Some(RecordDraft::new(ArtifactKind::Metadata, [
    text(A::ProgName, application.application_identifier.as_deref()),
    text(A::Version, application.version.as_deref()),
    timestamp(
      A::DatetimeCreated,
      general.and_then(|(f, _)| f.core.created_time.as_deref()),
    ),
    timestamp(
      A::DatetimeModified,
      general.and_then(|(f, _)| f.core.modified_time.as_deref()),
    ),
    text(
      A::Description,
      general.and_then(|(f, _)| f.core.description.as_deref()),
    ),
    text(A::Owner, general.and_then(|(_, c)| cx.name_at(c.owner.as_ref()))),
    timestamp(A::LastPrintedDatetime, printed),
    text(A::UserId, linked_name(NodeKind::Identity, Some(LAST_AUTHOR))),
    text(A::Organization, linked_name(NodeKind::Organization, None)),
  ]))
}

/// The event type comes back through the argument traces linked to the
/// action, looked up by display name.
pub(super) fn tl_event(node: &Node, cx: &ImportContext<'_>) -> Option<RecordDraft> {
  let Node::Action(action) = node else {
    return None;
  };

  let event_type = cx
    .linked(&action.id, NodeKind::Trace)
    .into_iter()
    .filter_map(Node::as_trace)
    .flat_map(|t| all_facets_of_kind(t, FacetKind::ActionArgument))
    .filter_map(|f| f.shape::<ActionArgumentFacet>()?.argument_name.as_deref())
    .find_map(|name| cx.event_types.id_for(name));

  Some(RecordDraft::new(ArtifactKind::TlEvent, [
    timestamp(A::Datetime, action.start_time.as_deref()),
    text(A::Description, action.core.description.as_deref()),
    long(A::TlEventType, event_type),
  ]))
}
