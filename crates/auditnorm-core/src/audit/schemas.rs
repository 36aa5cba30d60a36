//! Per-record-type enrichment pipelines.
//!
//! Only a handful of record types get extra fields; every other event code
//! passes through the dispatcher untouched.

use std::fmt;
use std::str::FromStr;

use crate::event::Event;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::steps::{AddFields, Convert, Mapper};
use crate::tables::FILE_OPERATIONS;

/// Event codes that have a dedicated enrichment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    ExchangeAdmin,
    ExchangeItem,
    AzureActiveDirectoryStsLogon,
    SharePointFileOperation,
}

impl Schema {
    pub const ALL: [Schema; 4] = [
        Schema::ExchangeAdmin,
        Schema::ExchangeItem,
        Schema::AzureActiveDirectoryStsLogon,
        Schema::SharePointFileOperation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Schema::ExchangeAdmin => "ExchangeAdmin",
            Schema::ExchangeItem => "ExchangeItem",
            Schema::AzureActiveDirectoryStsLogon => "AzureActiveDirectoryStsLogon",
            Schema::SharePointFileOperation => "SharePointFileOperation",
        }
    }

    /// The dispatch key for `event`, read from `event.code`.
    pub fn of(event: &Event) -> Option<Schema> {
        event.get_str("event.code")?.parse().ok()
    }

    /// Build the enrichment pipeline for this schema.
    pub fn pipeline(self, debug: bool) -> Pipeline {
        match self {
            Schema::ExchangeAdmin => exchange_admin(debug),
            Schema::ExchangeItem => exchange_mailbox(debug),
            Schema::AzureActiveDirectoryStsLogon => azure_ad_logon(debug),
            Schema::SharePointFileOperation => sharepoint_file_operation(debug),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schema {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schema::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or(())
    }
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

fn exchange_admin(debug: bool) -> Pipeline {
    PipelineBuilder::new("o365.audit.ExchangeAdmin", debug)
        .add(
            "saveFields",
            Convert::new()
                .field("o365audit.OrganizationName", "organization.name")
                .field("o365audit.OriginatingServer", "server.address"),
        )
        .build()
}

fn exchange_mailbox(debug: bool) -> Pipeline {
    PipelineBuilder::new("o365.audit.ExchangeItem", debug)
        .add(
            "saveFields",
            Convert::new()
                .field("o365audit.MailboxOwnerUPN", "user.email")
                .field("o365audit.LogonUserSid", "user.id")
                .field("o365audit.LogonUserDisplayName", "user.full_name")
                .field("o365audit.OrganizationName", "organization.name")
                .field("o365audit.OriginatingServer", "server.address")
                .field("o365audit.ClientIPAddress", "client.address")
                .field("o365audit.ClientProcessName", "process.name"),
        )
        .build()
}

fn azure_ad_logon(debug: bool) -> Pipeline {
    PipelineBuilder::new("o365.audit.AzureActiveDirectory", debug)
        .add("setEventAuthFields", |evt: &mut Event| {
            evt.put("event.category", "authentication");
            let outcome = evt.get_str("event.outcome").map(str::to_string);
            if let Some(outcome) = outcome.filter(|o| o != "unknown") {
                evt.put("event.type", format!("authentication_{outcome}"));
            }
        })
        .build()
}

fn sharepoint_file_operation(debug: bool) -> Pipeline {
    PipelineBuilder::new("o365.audit.SharePointFileOperation", debug)
        .add(
            "saveFields",
            Convert::new()
                .field("o365audit.ObjectId", "url.original")
                .field("o365audit.SourceRelativeUrl", "file.directory")
                .field("o365audit.SourceFileName", "file.name")
                .field("o365audit.SourceFileExtension", "file.extension"),
        )
        .add("setEventCategory", AddFields::new("event").field("category", "file"))
        .add(
            "mapEventType",
            Mapper::new("o365audit.Operation", "event.type", &FILE_OPERATIONS),
        )
        .build()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
