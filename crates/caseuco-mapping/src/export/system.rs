//! Operating system, accounts, programs and miscellaneous host artifacts.

use caseuco_core::{
  facet::{
    AccountAuthenticationFacet, AccountFacet, ActionArgumentFacet,
    ApplicationAccountFacet, ApplicationFacet, ComputerSpecificationFacet,
    ContentDataFacet, DeviceFacet, DigitalAccountFacet, DomainNameFacet,
    EmailAddressFacet, EmailMessageFacet, EnvironmentVariableFacet,
    ExtractedStringFacet, Facet, FacetBody, FileFacet, HashFacet, NoteFacet,
    OperatingSystemFacet, PathRelationFacet, UrlFacet,
    WindowsAccountFacet, WindowsComputerSpecificationFacet,
    WindowsRegistryValueFacet,
  },
  node::{Action, Assertion, CoreProperties, Identity, Node, NodeId},
  record::{ArtifactRecord, AttributeType as A},
};

use super::{Assembly, RecordExt};
use crate::Result;

pub(crate) const PHOTO_DNA: &str = "PhotoDNA";
pub(crate) const TEMP_VARIABLE: &str = "TEMP";
pub(crate) const LAST_PRINTED: &str = "Last Printed";
pub(crate) const LAST_AUTHOR: &str = "Last Author";

pub(super) fn gen_info(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  asm.primary(asm.trace().with_facet(HashFacet {
    hash_method: Some(PHOTO_DNA.to_string()),
    hash_value:  record.string(A::HashPhotoDna),
  }));
  Ok(())
}

pub(super) fn recent_object(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(ApplicationFacet {
      application_identifier: record.string(A::ProgName),
      ..Default::default()
    })
    .with_facet(
      Facet::from(WindowsRegistryValueFacet {
        data: record.string(A::Value),
      })
      .with_name(record.string(A::Name)),
    )
    .with_facet(
      Facet::from(FileFacet {
        accessed_time: record.iso(A::DatetimeAccessed),
        ..Default::default()
      })
      .with_created(record.iso(A::Datetime)),
    );
  asm.primary(trace);

  let comment = asm.satellite(Node::Assertion(Assertion {
    id:        NodeId::blank(),
    core:      CoreProperties::default(),
    statement: record.string(A::Comment),
  }));
  let primary = asm.id.clone();
  asm.link(&comment.id, &primary);
  Ok(())
}

/// The first file facet is where the program came from, the second where it
/// was installed.
pub(super) fn installed_prog(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(FileFacet {
      file_path: record.string(A::PathSource),
      ..Default::default()
    })
    .with_facet(Facet::new(FacetBody::Software).with_name(record.string(A::ProgName)))
    .with_facet(
      Facet::from(FileFacet {
        file_path: record.string(A::Path),
        ..Default::default()
      })
      .with_modified(record.iso(A::Datetime))
      .with_created(record.iso(A::DatetimeCreated)),
    );
  asm.primary(trace);
  Ok(())
}

pub(super) fn extracted_text(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace().with_facet(ExtractedStringFacet {
    string_value: record.string(A::Text),
  }));
  Ok(())
}

pub(super) fn os_info(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let registered_owner = Some(asm.satellite_identity(record.string(A::Owner)));
  let registered_organization =
    Some(asm.satellite_identity(record.string(A::Organization)));
  let windows_temp_directory = Some(asm.satellite_trace(
    Facet::from(EnvironmentVariableFacet {
      value: record.string(A::TempDir),
    })
    .with_name(Some(TEMP_VARIABLE.to_string())),
  ));

  let trace = asm
    .trace()
    .with_facet(
      Facet::from(OperatingSystemFacet {
        install_date: record.iso(A::Datetime),
        version:      record.string(A::Version),
      })
      .with_name(record.string(A::ProgName)),
    )
    .with_facet(DomainNameFacet {
      value: record.string(A::Domain),
    })
    .with_facet(DeviceFacet {
      serial_number: record.string(A::ProductId),
      ..Default::default()
    })
    .with_facet(ComputerSpecificationFacet {
      host_name:              record.string(A::Name),
      processor_architecture: record.string(A::ProcessorArchitecture),
    })
    .with_facet(WindowsComputerSpecificationFacet {
      registered_organization,
      registered_owner,
      windows_temp_directory,
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn os_account(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let owner = Some(asm.satellite_identity(record.string(A::Name)));

  let mut trace = asm
    .trace()
    .with_facet(EmailAddressFacet {
      value: record.string(A::Email),
    })
    .with_facet(PathRelationFacet {
      path: record.string(A::Path),
    })
    .with_facet(WindowsAccountFacet {
      groups: record.string(A::Groups),
    })
    .with_facet(
      Facet::from(DigitalAccountFacet {
        display_name:    record.string(A::DisplayName),
        last_login_time: record.iso(A::DatetimeAccessed),
      })
      .with_description(record.string(A::Description)),
    )
    .with_facet(
      Facet::from(AccountFacet {
        account_type: record.string(A::AccountType),
        account_identifier: record.string(A::UserId),
        owner,
      })
      .with_created(record.iso(A::DatetimeCreated)),
    );
  trace.core.tag = record.string(A::Flag);
  asm.primary(trace);
  Ok(())
}

/// Two digital-account facets, told apart by position: display name first,
/// user name second.
pub(super) fn service_account(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let application = Some(asm.satellite_trace(ApplicationFacet {
    application_identifier: record.string(A::ProgName),
    ..Default::default()
  }));
  let in_reply_to = record.string(A::EmailReplyto).map(|address| {
    asm.satellite_trace(EmailAddressFacet {
      value: Some(address),
    })
  });

  let mut trace = asm
    .trace()
    .with_facet(AccountFacet {
      account_type: record.string(A::Category),
      ..Default::default()
    })
    .with_facet(DomainNameFacet {
      value: record.string(A::Domain),
    })
    .with_facet(EmailMessageFacet {
      in_reply_to,
      ..Default::default()
    })
    .with_facet(DigitalAccountFacet {
      display_name: record.string(A::Name),
      ..Default::default()
    })
    .with_facet(AccountAuthenticationFacet {
      password: record.string(A::Password),
    })
    .with_facet(PathRelationFacet {
      path: record.string(A::Path),
    })
    .with_facet(UrlFacet {
      full_value: record.string(A::Url),
      user_name:  None,
    })
    .with_facet(DigitalAccountFacet {
      display_name: record.string(A::UserName),
      ..Default::default()
    })
    .with_facet(
      Facet::from(ApplicationAccountFacet { application })
        .with_id(record.string(A::UserId))
        .with_created(record.iso(A::DatetimeCreated)),
    );
  trace.core.description = record.string(A::Description);
  asm.primary(trace);
  Ok(())
}

/// A card number gets its own account facet, named by the card set.
pub(super) fn account(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let mut trace = asm.trace().with_facet(AccountFacet {
    account_type: record.string(A::AccountType),
    account_identifier: record.string(A::Id),
    ..Default::default()
  });
  if let Some(card_number) = record.string(A::CardNumber) {
    trace = trace.with_facet(
      Facet::from(AccountFacet {
        account_type: record.string(A::AccountType),
        account_identifier: Some(card_number),
        ..Default::default()
      })
      .with_name(record.string(A::SetName)),
    );
  }
  asm.primary(trace);
  Ok(())
}

pub(super) fn remote_drive(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let trace = asm
    .trace()
    .with_facet(PathRelationFacet {
      path: record.string(A::RemotePath),
    })
    .with_facet(PathRelationFacet {
      path: record.string(A::LocalPath),
    });
  asm.primary(trace);
  Ok(())
}

pub(super) fn prog_run(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  asm.primary(asm.trace().with_facet(ApplicationFacet {
    application_identifier: record.string(A::ProgName),
    number_of_launches: record.integer(A::Count),
    ..Default::default()
  }));
  Ok(())
}

pub(super) fn data_source_usage(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  let mut trace = asm.trace();
  trace.core.description = record.string(A::Description);
  asm.primary(trace);
  Ok(())
}

pub(super) fn clipboard_content(
  asm: &mut Assembly<'_>,
  record: &ArtifactRecord,
) -> Result<()> {
  asm.primary(asm.trace().with_facet(NoteFacet {
    text: record.string(A::Text),
  }));
  Ok(())
}

/// Document metadata. The last-printed time gets a content-data facet of
/// its own, tagged so the importer can tell it from the general one.
pub(super) fn metadata(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  let owner = Some(asm.satellite_identity(record.string(A::Owner)));

  let trace = asm
    .trace()
    .with_facet(ApplicationFacet {
      application_identifier: record.string(A::ProgName),
      version: record.string(A::Version),
      ..Default::default()
    })
    .with_facet(
      Facet::from(ContentDataFacet {
        owner,
        ..Default::default()
      })
      .with_created(record.iso(A::DatetimeCreated))
      .with_modified(record.iso(A::DatetimeModified))
      .with_description(record.string(A::Description)),
    )
    .with_facet(
      Facet::from(ContentDataFacet::default())
        .with_tag(Some(LAST_PRINTED.to_string()))
        .with_modified(record.iso(A::LastPrintedDatetime)),
    );
  asm.primary(trace);

  let primary = asm.id.clone();
  let author = asm.satellite(Node::Identity(Identity {
    id:   NodeId::blank(),
    core: CoreProperties {
      name: record.string(A::UserId),
      tag: Some(LAST_AUTHOR.to_string()),
      ..Default::default()
    },
  }));
  asm.link(&author.id, &primary);
  let organization = asm.satellite_organization(record.string(A::Organization));
  asm.link(&organization.id, &primary);
  Ok(())
}

/// The event type travels as an argument trace linked to the action.
pub(super) fn tl_event(asm: &mut Assembly<'_>, record: &ArtifactRecord) -> Result<()> {
  asm.primary(Action {
    id:         asm.id.clone(),
    core:       CoreProperties {
      description: record.string(A::Description),
      ..Default::default()
    },
    start_time: record.iso(A::Datetime),
    end_time:   None,
  });

  let argument_name = record
    .long(A::TlEventType)
    .and_then(|id| asm.event_types.display_name(id))
    .map(str::to_string);
  let argument = asm.satellite_trace(ActionArgumentFacet { argument_name });
  let primary = asm.id.clone();
  asm.link(&argument.id, &primary);
  Ok(())
}
