//! Startup resolution: remote first, local file as fallback, then validate.
//!
//! ```text
//! START -> TRY_REMOTE -> VALIDATE           (remote loaded)
//!                     -> TRY_FALLBACK       (any remote failure)
//! TRY_FALLBACK        -> VALIDATE | FAILED
//! VALIDATE            -> READY    | FAILED
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::domain::{RequiredKeySet, Resolution, SourceDescriptor};
use crate::core::loader::{load_from_file, load_from_remote};
use crate::core::remote::RemoteStore;
use crate::core::types::{Region, SecretName};
use crate::core::validate::validate;
use crate::error::{Error, Result};

/// Resolver states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    TryRemote,
    TryFallback,
    Validate,
    Ready,
    Failed,
}

/// Resolves secrets for application startup.
pub struct Resolver<'a> {
    store: &'a dyn RemoteStore,
    remote: Option<(SecretName, Region)>,
    fallback: PathBuf,
    required: RequiredKeySet,
}

/// Everything that happened during one resolution.
#[derive(Debug)]
pub struct Report {
    trail: Vec<State>,
    remote_error: Option<Error>,
    source: Option<SourceDescriptor>,
    outcome: Result<Resolution>,
}

impl<'a> Resolver<'a> {
    /// A resolver that only consults the local file.
    pub fn new(store: &'a dyn RemoteStore, fallback: impl AsRef<Path>) -> Self {
        Self {
            store,
            remote: None,
            fallback: fallback.as_ref().to_path_buf(),
            required: RequiredKeySet::default(),
        }
    }

    /// Try the named remote secret before the local file.
    pub fn remote(mut self, name: impl Into<SecretName>, region: impl Into<Region>) -> Self {
        self.remote = Some((name.into(), region.into()));
        self
    }

    /// Keys that must resolve to non-empty values.
    pub fn required(mut self, required: RequiredKeySet) -> Self {
        self.required = required;
        self
    }

    /// Run the state machine to a terminal state.
    pub fn run(&self) -> Report {
        let mut trail = vec![State::Start];
        let mut remote_error = None;
        let mut loaded = None;

        match &self.remote {
            Some((name, region)) => {
                enter(&mut trail, State::TryRemote);
                match load_from_remote(self.store, name, region) {
                    Ok(resolution) => loaded = Some(resolution),
                    Err(e) => {
                        warn!(
                            backend = self.store.name(),
                            name = name.as_str(),
                            region = region.as_str(),
                            error = %e,
                            "remote secret unavailable, falling back to local file"
                        );
                        remote_error = Some(e);
                    }
                }
            }
            None => debug!("no remote secret configured, using local file only"),
        }

        let resolution = match loaded {
            Some(resolution) => resolution,
            None => {
                enter(&mut trail, State::TryFallback);
                match load_from_file(&self.fallback) {
                    Ok(resolution) => resolution,
                    Err(e) => {
                        enter(&mut trail, State::Failed);
                        return Report {
                            trail,
                            remote_error,
                            source: None,
                            outcome: Err(e),
                        };
                    }
                }
            }
        };

        enter(&mut trail, State::Validate);
        let source = Some(resolution.source().clone());

        match validate(resolution.map(), &self.required) {
            Ok(()) => {
                enter(&mut trail, State::Ready);
                Report {
                    trail,
                    remote_error,
                    source,
                    outcome: Ok(resolution),
                }
            }
            Err(e) => {
                enter(&mut trail, State::Failed);
                Report {
                    trail,
                    remote_error,
                    source,
                    outcome: Err(e),
                }
            }
        }
    }

    /// Run and return the validated resolution.
    ///
    /// # Errors
    ///
    /// The fallback load error, or `MissingKeys` with every violation.
    pub fn resolve(&self) -> Result<Resolution> {
        self.run().into_result()
    }
}

fn enter(trail: &mut Vec<State>, state: State) {
    debug!(from = ?trail.last(), to = ?state, "resolver transition");
    trail.push(state);
}

impl Report {
    /// Terminal state.
    pub fn state(&self) -> State {
        self.trail.last().copied().unwrap_or(State::Start)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == State::Ready
    }

    /// States visited, in order.
    pub fn trail(&self) -> &[State] {
        &self.trail
    }

    /// Why the remote store was skipped, if it was tried and failed.
    pub fn remote_error(&self) -> Option<&Error> {
        self.remote_error.as_ref()
    }

    /// Source that was loaded, even if validation later failed.
    pub fn source(&self) -> Option<&SourceDescriptor> {
        self.source.as_ref()
    }

    /// The resolution, or the fatal error.
    pub fn outcome(&self) -> std::result::Result<&Resolution, &Error> {
        self.outcome.as_ref()
    }

    pub fn into_result(self) -> Result<Resolution> {
        self.outcome
    }
}
