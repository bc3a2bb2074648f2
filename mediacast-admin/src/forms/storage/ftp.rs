//! FTP storage engine configuration form
//!
//! Field groups: the engine-generic `specifics` (base path and RTMP server
//! URI) and the `ftp` group (server credentials, upload directory, retry
//! count, download URIs). The form's `rtmp_download_uri` field and the
//! engine's `rtmp_server_uri` setting are the same value under different
//! names, so both groups write through to the same key.

use super::StorageForm;
use crate::db::storage::StorageEngine;
use crate::forms::{normalize, FormErrors};
use serde::{Deserialize, Serialize};

// Engine data keys (owned by the FTP storage engine implementation)
pub const DATA_PATH: &str = "path";
pub const DATA_RTMP_SERVER_URI: &str = "rtmp_server_uri";
pub const DATA_FTP_SERVER: &str = "ftp_server";
pub const DATA_FTP_USER: &str = "ftp_user";
pub const DATA_FTP_PASSWORD: &str = "ftp_password";
pub const DATA_FTP_UPLOAD_DIR: &str = "ftp_upload_dir";
pub const DATA_FTP_UPLOAD_INTEGRITY_RETRIES: &str = "ftp_upload_integrity_retries";
pub const DATA_HTTP_DOWNLOAD_URI: &str = "http_download_uri";

/// FTP storage form values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FtpFormValues {
    #[serde(default)]
    pub specifics: SpecificsValues,
    #[serde(default)]
    pub ftp: FtpFieldValues,
}

/// Engine-generic `specifics` group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificsValues {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub rtmp_server_uri: Option<String>,
}

/// FTP server detail fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FtpFieldValues {
    /// Server hostname
    #[serde(default)]
    pub server: Option<String>,
    /// Username
    #[serde(default)]
    pub user: Option<String>,
    /// Password
    #[serde(default)]
    pub password: Option<String>,
    /// Subdirectory on server to upload to
    #[serde(default)]
    pub upload_dir: Option<String>,
    /// How many times to verify an FTP upload before declaring it a failure
    #[serde(default)]
    pub upload_integrity_retries: Option<String>,
    /// HTTP URL to access remotely stored files
    #[serde(default)]
    pub http_download_uri: Option<String>,
    /// RTMP server URL to stream remotely stored files (optional)
    #[serde(default)]
    pub rtmp_download_uri: Option<String>,
}

/// The FTP storage configuration form
#[derive(Debug, Default)]
pub struct FtpStorageForm;

impl StorageForm for FtpStorageForm {
    type Values = FtpFormValues;

    fn engine_type(&self) -> &'static str {
        "ftp"
    }

    /// Display the form with default values from the engine's settings
    fn display(&self, engine: &StorageEngine) -> FtpFormValues {
        FtpFormValues {
            specifics: SpecificsValues {
                path: engine.data_str(DATA_PATH).map(str::to_string),
                rtmp_server_uri: engine.data_str(DATA_RTMP_SERVER_URI).map(str::to_string),
            },
            ftp: FtpFieldValues {
                server: engine.data_str(DATA_FTP_SERVER).map(str::to_string),
                user: engine.data_str(DATA_FTP_USER).map(str::to_string),
                password: engine.data_str(DATA_FTP_PASSWORD).map(str::to_string),
                upload_dir: engine.data_str(DATA_FTP_UPLOAD_DIR).map(str::to_string),
                upload_integrity_retries: engine
                    .data_int(DATA_FTP_UPLOAD_INTEGRITY_RETRIES)
                    .map(|n| n.to_string()),
                http_download_uri: engine.data_str(DATA_HTTP_DOWNLOAD_URI).map(str::to_string),
                rtmp_download_uri: engine.data_str(DATA_RTMP_SERVER_URI).map(str::to_string),
            },
        }
    }

    /// Map validated field values back to the engine's settings.
    ///
    /// Field groups are named differently than the setting keys, so the
    /// mapping is written out explicitly. Empty submissions normalize to
    /// absent values.
    fn save_engine_params(
        &self,
        engine: &mut StorageEngine,
        values: FtpFormValues,
    ) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        let retries = match normalize(values.ftp.upload_integrity_retries.clone()) {
            Some(text) => match text.parse::<i64>() {
                Ok(n) if n >= 0 => Some(n),
                _ => {
                    errors.add(
                        "ftp.upload_integrity_retries",
                        "Enter a whole number of retries",
                    );
                    None
                }
            },
            None => None,
        };

        errors.into_result()?;

        engine.set_data(DATA_PATH, normalize(values.specifics.path).map(Into::into));
        engine.set_data(
            DATA_FTP_SERVER,
            normalize(values.ftp.server).map(Into::into),
        );
        engine.set_data(DATA_FTP_USER, normalize(values.ftp.user).map(Into::into));
        engine.set_data(
            DATA_FTP_PASSWORD,
            normalize(values.ftp.password).map(Into::into),
        );
        engine.set_data(
            DATA_FTP_UPLOAD_DIR,
            normalize(values.ftp.upload_dir).map(Into::into),
        );
        engine.set_data(
            DATA_FTP_UPLOAD_INTEGRITY_RETRIES,
            retries.map(serde_json::Value::from),
        );
        engine.set_data(
            DATA_HTTP_DOWNLOAD_URI,
            normalize(values.ftp.http_download_uri).map(Into::into),
        );

        // rtmp_server_uri: the dedicated form field wins; the specifics
        // group carries it for engines edited through the generic surface
        let rtmp = normalize(values.ftp.rtmp_download_uri)
            .or_else(|| normalize(values.specifics.rtmp_server_uri));
        engine.set_data(DATA_RTMP_SERVER_URI, rtmp.map(Into::into));

        Ok(())
    }
}
