//! The top-level audit normalization pipeline.
//!
//! [`AuditProcessor`] is built once from a [`Config`] and then handed every
//! raw record. Raw fields live under `o365audit.`; the pipeline writes the
//! normalized fields next to them. Steps run in a fixed order:
//!
//! ```text
//! cleanupNulls ─► convertCommonAuditRecordFields ─► mapEventType ─► mapEventOutcome
//!   ─► setEventKind ─► setUserFieldsFromId ─► make*Dict (×3) ─► productSpecific
//!   ─► copyAddressFields ─► setNetworkType ─► setRelatedIP
//! ```
//!
//! The address-derived steps come last because `*.address` fields are
//! populated both by the common conversion and by the per-schema pipelines.

use serde_json::{Map, Value};
use std::net::IpAddr;

use crate::config::Config;
use crate::error::Result;
use crate::event::Event;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::steps::mapper::number_key;
use crate::steps::{
    AddFields, Condition, Conditional, Convert, ConvertType, Dissect, KvArrayToMap, Mapper,
    ModifiedPropertiesToMap,
};
use crate::tables::{OUTCOMES, RECORD_TYPES};

pub mod schemas;

pub use schemas::Schema;

/// Prefix under which the host stores the raw audit record.
pub const RAW_PREFIX: &str = "o365audit";

/// Placeholder strings the service uses for an unknown client IP.
const NULL_PLACEHOLDERS: [&str; 2] = ["null", "<null>"];

/// Wrap a raw audit record into an event under [`RAW_PREFIX`].
pub fn event_from_record(record: Map<String, Value>) -> Event {
    let mut fields = Map::new();
    fields.insert(RAW_PREFIX.to_string(), Value::Object(record));
    Event::from(fields)
}

/// The compiled audit pipeline. Immutable once built; safe to share across
/// threads.
#[derive(Debug)]
pub struct AuditProcessor {
    pipeline: Pipeline,
}

impl AuditProcessor {
    pub fn new(config: &Config) -> Result<Self> {
        let debug = config.debug;
        let pipeline = PipelineBuilder::new("o365.audit", debug)
            .add("cleanupNulls", cleanup_nulls)
            .add("convertCommonAuditRecordFields", common_fields())
            .add(
                "mapEventType",
                Mapper::new("o365audit.RecordType", "event.code", &RECORD_TYPES)
                    .default_with(passthrough_record_type),
            )
            .add(
                "mapEventOutcome",
                Mapper::new("o365audit.ResultStatus", "event.outcome", &OUTCOMES)
                    .lowercase(true)
                    .default_value("unknown")
                    .skip_missing(true),
            )
            .add("setEventKind", AddFields::new("event").field("kind", "event"))
            .add(
                "setUserFieldsFromId",
                Dissect::new("%{name}@%{domain}", "user.id", "user")?
                    .when(Condition::contains("user.id", "@")),
            )
            .add(
                "makeParametersDict",
                KvArrayToMap::new("o365audit.Parameters", "o365audit.Parameters"),
            )
            .add(
                "makeExtendedPropertiesDict",
                KvArrayToMap::new("o365audit.ExtendedProperties", "o365audit.ExtendedProperties"),
            )
            .add(
                "makeModifiedPropertyDict",
                ModifiedPropertiesToMap::new(
                    "o365audit.ModifiedProperties",
                    "o365audit.ModifiedProperties",
                ),
            )
            .add("productSpecific", product_specific(debug))
            .add("copyAddressFields", address_fields())
            .add("setNetworkType", set_network_type)
            .add("setRelatedIP", set_related_ip)
            .build();
        tracing::debug!(steps = pipeline.len(), debug = config.debug, "audit pipeline built");
        Ok(Self { pipeline })
    }

    /// Normalize `event` in place.
    pub fn process(&self, event: &mut Event) {
        self.pipeline.run(event);
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

fn cleanup_nulls(event: &mut Event) {
    let field = "o365audit.ClientIP";
    if event
        .get_str(field)
        .is_some_and(|v| NULL_PLACEHOLDERS.contains(&v))
    {
        event.delete(field);
    }
}

fn common_fields() -> Convert {
    Convert::new()
        .field("o365audit.Id", "event.id")
        .field("o365audit.ClientIP", "client.address")
        .field("o365audit.UserKey", "user.hash")
        .field("o365audit.UserId", "user.id")
        .field("o365audit.Workload", "event.provider")
        .field("o365audit.Operation", "event.action")
        .field("o365audit.OrganizationId", "organization.id")
        .field("o365audit.UserAgent", "user_agent.original")
}

/// Unknown record types keep their raw code as the event code.
fn passthrough_record_type(code: &Value) -> Option<Value> {
    match code {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(number_key(n))),
        _ => None,
    }
}

fn product_specific(debug: bool) -> Conditional<Schema> {
    Schema::ALL
        .into_iter()
        .fold(Conditional::new(Schema::of), |conditional, schema| {
            conditional.branch(schema, schema.pipeline(debug))
        })
}

fn address_fields() -> Convert {
    Convert::new()
        .typed("source.address", "source.ip", ConvertType::Ip)
        .typed("destination.address", "destination.ip", ConvertType::Ip)
        .typed("client.address", "client.ip", ConvertType::Ip)
        .typed("server.address", "server.ip", ConvertType::Ip)
}

fn set_network_type(event: &mut Event) {
    let Some(ip) = event.get_str("client.ip").filter(|ip| !ip.is_empty()) else {
        return;
    };
    let network_type = match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => "ipv4",
        Ok(IpAddr::V6(_)) => "ipv6",
        Err(_) if ip.contains('.') => "ipv4",
        Err(_) => "ipv6",
    };
    event.put("network.type", network_type);
}

fn set_related_ip(event: &mut Event) {
    for field in ["source.ip", "destination.ip"] {
        let Some(ip) = event.get(field).cloned() else {
            continue;
        };
        if ip.as_str().is_some_and(str::is_empty) {
            continue;
        }
        event.append_to("related.ip", ip);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
