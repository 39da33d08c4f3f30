//! In-memory stand-ins for the remote seams

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::builder::field_keys;
use super::models::PassRequest;
use super::service::{ImageSource, PassService};

/// Records every request; fails for configured member names
#[derive(Debug, Default)]
pub struct FakePassService {
    pass_ids: HashMap<String, String>,
    failing_members: HashSet<String>,
    fail_uploads: bool,
    requests: Mutex<Vec<PassRequest>>,
    uploads: Mutex<Vec<Vec<u8>>>,
}

impl FakePassService {
    pub fn with_pass_id(mut self, member: &str, pass_id: &str) -> Self {
        self.pass_ids.insert(member.to_string(), pass_id.to_string());
        self
    }

    pub fn failing_for(mut self, member: &str) -> Self {
        self.failing_members.insert(member.to_string());
        self
    }

    pub fn with_failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    /// Every create-pass body received, including failed ones
    pub fn requests(&self) -> Vec<PassRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len() + self.uploads().len()
    }
}

fn member_name(request: &PassRequest) -> String {
    request
        .fields
        .iter()
        .find(|f| f.key == field_keys::NAME)
        .map(|f| f.value.clone())
        .unwrap_or_default()
}

#[async_trait]
impl PassService for FakePassService {
    async fn upload_image(&self, bytes: Vec<u8>) -> Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(bytes);
        if self.fail_uploads {
            bail!("Pass2U returned 500 Internal Server Error: upload rejected");
        }
        Ok(format!("hex-{}", uploads.len()))
    }

    async fn create_pass(&self, request: &PassRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        let name = member_name(request);
        if self.failing_members.contains(&name) {
            bail!("Pass2U returned 503 Service Unavailable: try later");
        }
        Ok(self
            .pass_ids
            .get(&name)
            .cloned()
            .unwrap_or_else(|| format!("pass-{}", name.to_lowercase())))
    }
}

/// Serves the URL itself as the image bytes
#[derive(Debug, Default)]
pub struct FakeImages {
    fail: bool,
    fetched: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.fail {
            bail!("Image download failed: {}", url);
        }
        Ok(url.as_bytes().to_vec())
    }
}
