//! In-process remote store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use zeroize::Zeroizing;

use super::RemoteStore;
use crate::error::{Result, StoreError};

/// A remote store held in memory.
///
/// Can be primed with secrets, and can be told to fail every call with a
/// given error to exercise fallback paths.
#[derive(Debug, Default)]
pub struct Memory {
    secrets: RefCell<BTreeMap<(String, String), Zeroizing<String>>>,
    failure: Option<StoreError>,
    writes: RefCell<Vec<MemoryWrite>>,
}

/// A recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryWrite {
    Create { name: String, region: String },
    Put { name: String, region: String },
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where every call fails with `error`.
    pub fn failing(error: StoreError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Seed a secret payload.
    pub fn with_secret(self, name: &str, region: &str, payload: &str) -> Self {
        self.secrets.borrow_mut().insert(
            (region.to_string(), name.to_string()),
            Zeroizing::new(payload.to_string()),
        );
        self
    }

    /// Current payload of a secret, if any.
    pub fn payload(&self, name: &str, region: &str) -> Option<String> {
        self.secrets
            .borrow()
            .get(&(region.to_string(), name.to_string()))
            .map(|p| p.to_string())
    }

    /// Mutating calls made so far, in order.
    pub fn writes(&self) -> Vec<MemoryWrite> {
        self.writes.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(err) => Err(err.clone().into()),
            None => Ok(()),
        }
    }

    fn key(name: &str, region: &str) -> (String, String) {
        (region.to_string(), name.to_string())
    }
}

impl RemoteStore for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn describe(&self, name: &str, region: &str) -> Result<bool> {
        self.check()?;
        Ok(self.secrets.borrow().contains_key(&Self::key(name, region)))
    }

    fn get(&self, name: &str, region: &str) -> Result<Zeroizing<String>> {
        self.check()?;
        self.secrets
            .borrow()
            .get(&Self::key(name, region))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    name: name.to_string(),
                    region: region.to_string(),
                }
                .into()
            })
    }

    fn create(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        self.check()?;
        let mut secrets = self.secrets.borrow_mut();
        let key = Self::key(name, region);
        if secrets.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
                region: region.to_string(),
            }
            .into());
        }
        secrets.insert(key, Zeroizing::new(payload.to_string()));
        self.writes.borrow_mut().push(MemoryWrite::Create {
            name: name.to_string(),
            region: region.to_string(),
        });
        Ok(())
    }

    fn put(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        self.check()?;
        let mut secrets = self.secrets.borrow_mut();
        let Some(slot) = secrets.get_mut(&Self::key(name, region)) else {
            return Err(StoreError::NotFound {
                name: name.to_string(),
                region: region.to_string(),
            }
            .into());
        };
        *slot = Zeroizing::new(payload.to_string());
        self.writes.borrow_mut().push(MemoryWrite::Put {
            name: name.to_string(),
            region: region.to_string(),
        });
        Ok(())
    }
}
