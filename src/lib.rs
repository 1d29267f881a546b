//! Server side of the (Verifiable) Oblivious Pseudorandom Function protocol
//! as specified in [RFC 9497](https://www.rfc-editor.org/rfc/rfc9497.html).
//!
//! A [`Server`] owns a key pair and evaluates blinded elements sent by a client
//! without learning the client's input. In [`Verifiable`] mode every
//! [`Evaluation`] carries a [`Proof`] that the server's committed public key
//! was used.
//!
//! ```
//! # #[cfg(feature = "ristretto255-ciphersuite")]
//! # {
//! use oprf_server::group::ristretto255::Ristretto255;
//! use oprf_server::{Base, Server};
//!
//! let server = Server::<Ristretto255, Base>::from_seed(&[0; 32], b"").unwrap();
//! let output = server.full_evaluate(b"input", b"").unwrap();
//!
//! assert!(server.verify_finalize(b"input", &output, b""));
//! # }
//! ```
//!
//! # Features
//!
//! - `ristretto255`: the [`Ristretto255`](group::ristretto255::Ristretto255)
//!   [`Group`](group::Group).
//! - `ristretto255-ciphersuite`: the `ristretto255-SHA512` [`CipherSuite`].

#![no_std]
#![expect(clippy::cargo_common_metadata, reason = "not published")]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod cipher_suite;
pub mod common;
pub mod ct;
pub mod error;
pub mod group;
mod internal;
pub mod key;
pub mod mode;
pub mod server;
pub mod transcript;
mod util;

pub use cipher_suite::CipherSuite;
pub use common::{BlindedElement, Evaluation, EvaluationElement, Proof};
pub use error::{Error, Result};
pub use key::{KeyPair, PublicKey, SecretKey};
pub use mode::{Base, Mode, Verifiable};
pub use server::Server;
