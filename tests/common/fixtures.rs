//! Static audit record corpora used across harnesses.
//!
//! Each record is one NDJSON line as the management activity API returns it.

/// Azure AD STS logon that succeeded from an IPv4 client.
pub const AZURE_AD_STS_LOGON: &str = r#"{"CreationTime":"2020-02-07T16:43:53","Id":"105f5a5b-e2e7-4e55-9e1c-2f9f5c1f3a00","Operation":"UserLoggedIn","OrganizationId":"b86ab9d4-fcf1-4b11-8a06-7a8f91b47fbd","RecordType":15,"ResultStatus":"Succeeded","UserKey":"10033FFF8B1DBDE2@contoso.onmicrosoft.com","UserType":0,"Version":1,"Workload":"AzureActiveDirectory","ClientIP":"79.159.11.115","ObjectId":"797f4846-ba00-4fd7-ba43-dac1f8f63013","UserId":"root@contoso.onmicrosoft.com","AzureActiveDirectoryEventType":1,"ExtendedProperties":[{"Name":"UserAgent","Value":"Mozilla/5.0 (Windows NT 10.0; Win64; x64)"},{"Name":"RequestType","Value":"OAuth2:Authorize"},{"Name":"ResultStatusDetail","Value":"Redirect"}],"ModifiedProperties":[],"Actor":[{"ID":"root@contoso.onmicrosoft.com","Type":5}]}"#;

/// SharePoint file download with an IPv6 client.
pub const SHAREPOINT_FILE_DOWNLOADED: &str = r#"{"CreationTime":"2020-02-07T16:39:40","Id":"3b9a5f0d-3a5b-4a8b-9d8e-e7f2e8b1c2d4","Operation":"FileDownloaded","OrganizationId":"b86ab9d4-fcf1-4b11-8a06-7a8f91b47fbd","RecordType":6,"UserKey":"i:0h.f|membership|10033fff8b1dbde2@live.com","UserType":0,"Version":1,"Workload":"OneDrive","ClientIP":"2a02:9008:f0:1:d0d6:bcf6:4f9b:5d55","ObjectId":"https://contoso-my.sharepoint.com/personal/root_contoso_onmicrosoft_com/Documents/Budget.xlsx","UserId":"root@contoso.onmicrosoft.com","SourceRelativeUrl":"Documents","SourceFileName":"Budget.xlsx","SourceFileExtension":"xlsx","UserAgent":"OneDriveMpc-Transform_Thumbnail/1.0"}"#;

/// Exchange admin cmdlet with parameters and an originating server that is
/// not an address.
pub const EXCHANGE_ADMIN: &str = r#"{"CreationTime":"2020-02-07T16:18:08","Id":"5d4c9f31-2a4f-4f2c-b8ac-08d7abe9c7e4","Operation":"Set-ConditionalAccessPolicy","OrganizationId":"b86ab9d4-fcf1-4b11-8a06-7a8f91b47fbd","RecordType":1,"ResultStatus":"True","UserKey":"NT AUTHORITY\\SYSTEM (Microsoft.Exchange.ServiceHost)","UserType":3,"Version":1,"Workload":"Exchange","ObjectId":"","UserId":"NT AUTHORITY\\SYSTEM (Microsoft.Exchange.ServiceHost)","ExternalAccess":true,"OrganizationName":"contoso.onmicrosoft.com","OriginatingServer":"VI1PR0801MB2191 (15.20.2707.017)","Parameters":[{"Name":"Identity","Value":"seqtoken:a1b2"},{"Name":"DatabaseId","Value":"2"},{"Name":"Force","Value":"True"},{"Name":"Identity","Value":"seqtoken:c3d4"}]}"#;

/// Exchange mailbox item access with a client IP address and a null
/// placeholder in ClientIP.
pub const EXCHANGE_ITEM: &str = r#"{"CreationTime":"2020-02-07T17:05:12","Id":"a5b3e9a1-8c3e-4c1b-91d7-6a5e9b0c1d2e","Operation":"Update","OrganizationId":"b86ab9d4-fcf1-4b11-8a06-7a8f91b47fbd","RecordType":2,"ResultStatus":"Succeeded","UserKey":"10033FFF8B1DBDE2","UserType":0,"Version":1,"Workload":"Exchange","ClientIP":"<null>","UserId":"root@contoso.onmicrosoft.com","ClientIPAddress":"192.0.2.44","ClientProcessName":"OUTLOOK.EXE","LogonUserSid":"S-1-5-21-1111111111-2222222222-333333333-4444","LogonUserDisplayName":"Root Admin","MailboxOwnerUPN":"root@contoso.onmicrosoft.com","OrganizationName":"contoso.onmicrosoft.com","OriginatingServer":"VI1PR0801MB2191 (15.20.2707.017)"}"#;

/// Azure AD directory change with modified properties.
pub const AZURE_AD_UPDATE_USER: &str = r#"{"CreationTime":"2020-02-07T18:01:00","Id":"c0ffee00-1111-2222-3333-444455556666","Operation":"Update user.","OrganizationId":"b86ab9d4-fcf1-4b11-8a06-7a8f91b47fbd","RecordType":8,"ResultStatus":"Success","UserKey":"10033FFF8B1DBDE2@contoso.onmicrosoft.com","UserType":0,"Version":1,"Workload":"AzureActiveDirectory","ClientIP":"203.0.113.5","UserId":"root@contoso.onmicrosoft.com","ModifiedProperties":[{"Name":"AccountEnabled","NewValue":"[true]","OldValue":"[false]"},{"Name":"Included Updated Properties","NewValue":"AccountEnabled","OldValue":""},{"Name":"AccountEnabled","NewValue":"[false]","OldValue":"[true]"}]}"#;

/// Every fixture, for corpus-wide invariants.
pub const CORPUS: &[&str] = &[
    AZURE_AD_STS_LOGON,
    SHAREPOINT_FILE_DOWNLOADED,
    EXCHANGE_ADMIN,
    EXCHANGE_ITEM,
    AZURE_AD_UPDATE_USER,
];

/// Generate `n` synthetic records cycling through common record types, for
/// throughput and stability tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let (record_type, status) = match i % 5 {
                0 => (15, "Succeeded"),
                1 => (6, "Succeeded"),
                2 => (1, "True"),
                3 => (8, "Failed"),
                _ => (999, "PartiallySucceeded"),
            };
            format!(
                r#"{{"Id":"rec-{i}","RecordType":{record_type},"ResultStatus":"{status}","ClientIP":"10.{}.{}.{}","UserId":"user{i}@contoso.com","Operation":"FileAccessed","ExtendedProperties":[{{"Name":"seq","Value":"{i}"}}]}}"#,
                i / 65536 % 256,
                i / 256 % 256,
                i % 256,
            )
        })
        .collect()
}
