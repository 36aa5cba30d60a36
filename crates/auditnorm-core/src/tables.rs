//! Static classification tables.
//!
//! Compiled into perfect-hash maps at build time. Downstream classification
//! depends on these exact keys and strings; change them only together with
//! the consumers.

use phf::phf_map;

/// Audit record type code → `event.code`.
pub static RECORD_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "1" => "ExchangeAdmin",
    "2" => "ExchangeItem",
    "3" => "ExchangeItemGroup",
    "4" => "SharePoint",
    "6" => "SharePointFileOperation",
    "8" => "AzureActiveDirectory",
    "9" => "AzureActiveDirectoryAccountLogon",
    "10" => "DataCenterSecurityCmdlet",
    "11" => "ComplianceDLPSharePoint",
    "12" => "Sway",
    "13" => "ComplianceDLPExchange",
    "14" => "SharePointSharingOperation",
    "15" => "AzureActiveDirectoryStsLogon",
    "18" => "SecurityComplianceCenterEOPCmdlet",
    "20" => "PowerBIAudit",
    "21" => "CRM",
    "22" => "Yammer",
    "23" => "SkypeForBusinessCmdlets",
    "24" => "Discovery",
    "25" => "MicrosoftTeams",
    "28" => "ThreatIntelligence",
    "30" => "MicrosoftFlow",
    "31" => "AeD",
    "32" => "MicrosoftStream",
    "33" => "ComplianceDLPSharePointClassification",
    "35" => "Project",
    "36" => "SharePointListOperation",
    "38" => "DataGovernance",
    "40" => "SecurityComplianceAlerts",
    "41" => "ThreatIntelligenceUrl",
    "42" => "SecurityComplianceInsights",
    "44" => "WorkplaceAnalytics",
    "45" => "PowerAppsApp",
    "47" => "ThreatIntelligenceAtpContent",
    "49" => "TeamsHealthcare",
    "52" => "DataInsightsRestApiAudit",
    "54" => "SharePointListItemOperation",
    "55" => "SharePointContentTypeOperation",
    "56" => "SharePointFieldOperation",
    "64" => "AirInvestigation",
    "66" => "MicrosoftForms",
};

/// Lower-cased result status → `event.outcome`.
pub static OUTCOMES: phf::Map<&'static str, &'static str> = phf_map! {
    "success" => "success",
    "succeeded" => "success",
    "partiallysucceeded" => "success",
    "true" => "success",
    "failed" => "failure",
    "false" => "failure",
};

/// SharePoint file operation → `event.type`.
pub static FILE_OPERATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "FileAccessed" => "access",
    "FileDeleted" => "deletion",
    "FileDownloaded" => "access",
    "FileModified" => "change",
    "FileMoved" => "change",
    "FileRenamed" => "change",
    "FileRestored" => "change",
    "FileUploaded" => "creation",
    "FolderCopied" => "creation",
    "FolderCreated" => "creation",
    "FolderDeleted" => "deletion",
    "FolderModified" => "change",
    "FolderMoved" => "change",
    "FolderRenamed" => "change",
    "FolderRestored" => "change",
};
