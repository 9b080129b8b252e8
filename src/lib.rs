//! Tether - resolve deployment secrets from a remote store, with a local
//! `.env` fallback, and refuse to start without the required keys.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # Local file -> remote secret
//! │   ├── pull          # Remote secret -> local file
//! │   ├── backup        # Remote secret -> timestamped file
//! │   ├── compare       # Key-level diff of remote and local
//! │   ├── validate      # Full resolution with a pass/fail summary
//! │   ├── run           # Resolve, then launch a command with the secrets
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .tether.toml and effective settings
//!     ├── domain/       # SecretMap, RequiredKeySet, SourceDescriptor, ...
//!     ├── dotenv        # KEY=VALUE file parsing and writing
//!     ├── remote/       # Remote store trait and backends (aws, directory, memory)
//!     ├── loader        # Source -> SecretMap
//!     ├── merge         # diff / overwrite
//!     ├── validate      # Required-key validation
//!     ├── export        # SecretMap -> environment, file, remote payload
//!     ├── resolver      # Remote-then-fallback state machine
//!     └── sync          # push / pull / backup / compare
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tether::core::export::{to_process_environment, ProcessEnv};
//! use tether::core::remote::Directory;
//! use tether::core::resolver::Resolver;
//!
//! let store = Directory::new(".tether/store");
//! let resolution = Resolver::new(&store, ".env")
//!     .remote("myapp/production", "us-east-1")
//!     .resolve()?;
//! to_process_environment(resolution.map(), &mut ProcessEnv)?;
//! # Ok::<(), tether::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
