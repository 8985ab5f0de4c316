//! Domain Layer
//!
//! The core of ksy-manifest - rebuild rules without process or git I/O.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (Definition, CompiledArtifact, Manifest)
//! - `services/` - Domain services (license matching, staleness decision)
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
