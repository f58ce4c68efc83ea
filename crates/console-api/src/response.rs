//! Backend response envelopes

use console_shared::constants::{RESPONSE_CODE_SUCCESS, RESPONSE_CODE_UNAUTHORIZED};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Every backend response: `{code, msg, data}` or, for table listings,
/// `{code, msg, rows, total}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub rows: Option<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl Envelope {
    /// Maps the status code: 200 passes, 401 is an expired session,
    /// anything else is a business failure carrying `msg`.
    pub fn check(self) -> Result<Self, ApiError> {
        match self.code {
            RESPONSE_CODE_SUCCESS => Ok(self),
            RESPONSE_CODE_UNAUTHORIZED => Err(ApiError::Unauthorized),
            code => Err(ApiError::Business {
                code,
                msg: self.msg.filter(|m| !m.is_empty()).unwrap_or_else(|| "请求失败".to_string()),
            }),
        }
    }

    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.data)?)
    }

    /// Table payload from top-level `rows`/`total`, or from a `data`
    /// object carrying them.
    pub fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>, ApiError> {
        match self.rows {
            Some(rows) => Ok(Page {
                rows: serde_json::from_value(rows)?,
                total: self.total.unwrap_or_default(),
            }),
            None if self.data.is_null() => Ok(Page::default()),
            None => Ok(serde_json::from_value(self.data)?),
        }
    }
}

/// One page of a table listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), total: 0 }
    }
}
