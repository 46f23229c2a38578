use serde::{Deserialize, Serialize};

use crate::fetch::{api_url, build_client, map_reqwest_error, FetchSettings};
use crate::types::{CandidateRecord, FailureKind, FetchError, FileId};

/// A file group as the backend serializes it, membership included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub files: Vec<CandidateRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupPayload<'a> {
    name: &'a str,
    file_ids: &'a [FileId],
}

/// Client for the group create/update/fetch endpoints. The loader never calls
/// this; the enclosing editor does, on form commit and when seeding members.
#[derive(Debug, Clone)]
pub struct GroupClient {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl GroupClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { client, settings })
    }

    pub async fn fetch(&self, id: u64) -> Result<GroupRecord, FetchError> {
        let url = api_url(&self.settings.base_url, &format!("file-groups/{id}"))?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        decode_group(response).await
    }

    pub async fn create(&self, name: &str, file_ids: &[FileId]) -> Result<GroupRecord, FetchError> {
        let url = api_url(&self.settings.base_url, "file-groups")?;
        let response = self
            .client
            .post(url)
            .json(&GroupPayload { name, file_ids })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_group(response).await
    }

    pub async fn update(
        &self,
        id: u64,
        name: &str,
        file_ids: &[FileId],
    ) -> Result<GroupRecord, FetchError> {
        let url = api_url(&self.settings.base_url, &format!("file-groups/{id}"))?;
        let response = self
            .client
            .put(url)
            .json(&GroupPayload { name, file_ids })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_group(response).await
    }
}

async fn decode_group(response: reqwest::Response) -> Result<GroupRecord, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    response.json::<GroupRecord>().await.map_err(map_reqwest_error)
}
