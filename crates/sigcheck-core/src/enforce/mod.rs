//! Push enforcement
//!
//! Given an [`EffectivePolicy`](crate::resolve::EffectivePolicy) and a
//! [`PushEvent`], decide whether the push may proceed:
//!
//! 1. policy disabled -> allow
//! 2. branch matches no protected pattern -> allow
//! 3. every commit must verify under the policy's verification type;
//!    the first failure (in push order) rejects the push
//!
//! Verification is delegated to a [`SignatureVerifier`].

mod decision;
mod verifier;

pub use decision::{Decision, PushEvent, RejectReason, Verdict, decide, evaluate, requirement};
pub use verifier::{
    Commit, FnVerifier, Signature, SignatureStatus, SignatureStatusVerifier, SignatureVerifier,
    Verification, verifier_fn,
};
