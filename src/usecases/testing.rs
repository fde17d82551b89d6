use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::gateways::{AvatarFetcher, Storage};
use crate::common::error::AvatarError;

#[derive(Debug, Clone)]
pub struct SavedObject {
    pub owner_id: u64,
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// In-memory storage collaborator for usecase tests.
#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<Vec<SavedObject>>,
    fail: bool,
}

impl FakeStorage {
    pub fn failing() -> FakeStorage {
        FakeStorage {
            objects: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn seed(&self, path: &str, body: Vec<u8>) {
        self.objects.lock().unwrap().push(SavedObject {
            owner_id: 0,
            path: path.to_string(),
            content_type: String::from("image/png"),
            body,
        });
    }

    pub fn saved(&self) -> Vec<SavedObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn save(
        &self,
        owner_id: u64,
        path: String,
        content_type: String,
        body: Vec<u8>,
    ) -> Result<String, String> {
        if self.fail {
            return Err(String::from("bucket unavailable"));
        }
        let mut objects = self.objects.lock().unwrap();
        objects.retain(|o| o.path != path);
        objects.push(SavedObject {
            owner_id,
            path: path.clone(),
            content_type,
            body,
        });
        Ok(path)
    }

    async fn load(&self, path: String) -> Result<Vec<u8>, String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.path == path)
            .map(|o| o.body.clone())
            .ok_or_else(|| format!("no such object: {}", path))
    }

    fn url_for(&self, path: &str) -> String {
        format!("https://fake.storage/{}", path)
    }
}

/// Scripted remote sources, counting calls so tests can assert on ordering.
#[derive(Default)]
pub struct FakeFetcher {
    gravatar: Option<Vec<u8>>,
    initials: Option<Vec<u8>>,
    fail: bool,
    gravatar_calls: AtomicUsize,
    initials_calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn failing() -> FakeFetcher {
        FakeFetcher {
            fail: true,
            ..FakeFetcher::default()
        }
    }

    pub fn with_gravatar(mut self, bytes: Vec<u8>) -> FakeFetcher {
        self.gravatar = Some(bytes);
        self
    }

    pub fn with_initials(mut self, bytes: Vec<u8>) -> FakeFetcher {
        self.initials = Some(bytes);
        self
    }

    pub fn gravatar_calls(&self) -> usize {
        self.gravatar_calls.load(Ordering::SeqCst)
    }

    pub fn initials_calls(&self) -> usize {
        self.initials_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvatarFetcher for FakeFetcher {
    async fn fetch_gravatar(&self, _email: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        self.gravatar_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AvatarError::RemoteFetch(String::from("connection timed out")));
        }
        Ok(self.gravatar.clone())
    }

    async fn fetch_initials(&self, _name: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        self.initials_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AvatarError::RemoteFetch(String::from("connection timed out")));
        }
        Ok(self.initials.clone())
    }
}
