//! Signature verification seam
//!
//! The engine never checks signatures itself. It asks a [`SignatureVerifier`]
//! whether a commit satisfies a [`VerificationType`]. A verifier answers with
//! a [`Verification`], or with an error when it could not decide at all
//! (a key server is down, a key lookup failed).

use serde::{Deserialize, Serialize};

use crate::error::VerifierError;
use crate::policy::VerificationType;

/// Outcome of checking one signature on a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureStatus {
    /// Signature is valid and its key is known.
    Verified,
    /// The signing key could not be found.
    NotFound,
    /// Signature does not match the commit.
    Invalid,
}

/// A signature attached to a commit, as already checked by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub key_id: String,
    pub status: SignatureStatus,
    /// Platform user owning the signing key, if any
    #[serde(default)]
    pub owner: Option<String>,
}

/// A commit in a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default)]
    pub signatures: Vec<Signature>,
}

impl Commit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            signatures: Vec::new(),
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }
}

/// Whether a commit satisfied the required verification type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Passed,
    Failed { message: String },
}

impl Verification {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Verification::Passed)
    }
}

impl From<bool> for Verification {
    fn from(passed: bool) -> Self {
        if passed {
            Verification::Passed
        } else {
            Verification::failed("signature could not be verified")
        }
    }
}

/// Capability that decides whether a commit carries an acceptable signature.
pub trait SignatureVerifier {
    /// Check `commit` against `verification_type`.
    ///
    /// Return `Err` only when no decision could be made; a commit that is
    /// simply not signed well enough is `Ok(Verification::Failed { .. })`.
    fn verify(
        &self,
        commit: &Commit,
        verification_type: VerificationType,
    ) -> std::result::Result<Verification, VerifierError>;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(
        &self,
        commit: &Commit,
        verification_type: VerificationType,
    ) -> std::result::Result<Verification, VerifierError> {
        (**self).verify(commit, verification_type)
    }
}

/// Adapter turning a `bool`-returning function into a [`SignatureVerifier`].
pub struct FnVerifier<F>(F);

/// Wrap a function as a verifier.
///
/// # Example
///
/// ```
/// use sigcheck_core::enforce::verifier_fn;
///
/// let verifier = verifier_fn(|commit, _| Ok(commit.id != "bad"));
/// # let _ = verifier;
/// ```
pub fn verifier_fn<F>(f: F) -> FnVerifier<F>
where
    F: Fn(&Commit, VerificationType) -> std::result::Result<bool, VerifierError>,
{
    FnVerifier(f)
}

impl<F> SignatureVerifier for FnVerifier<F>
where
    F: Fn(&Commit, VerificationType) -> std::result::Result<bool, VerifierError>,
{
    fn verify(
        &self,
        commit: &Commit,
        verification_type: VerificationType,
    ) -> std::result::Result<Verification, VerifierError> {
        (self.0)(commit, verification_type).map(Verification::from)
    }
}

/// Verifier for commits whose signatures were already checked upstream.
///
/// - a commit without any signature fails
/// - a commit with an invalid signature fails
/// - for [`VerificationType::ScmUserSignature`], every signature must be
///   verified and owned by a platform user
///
/// Unknown keys are accepted under [`VerificationType::AnySignature`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureStatusVerifier;

impl SignatureStatusVerifier {
    fn check(commit: &Commit, verification_type: VerificationType) -> Verification {
        if commit.signatures.is_empty() {
            return Verification::failed("missing a signature");
        }

        for signature in &commit.signatures {
            if signature.status == SignatureStatus::Invalid {
                return Verification::failed(format!(
                    "invalid signature (key {})",
                    signature.key_id
                ));
            }

            let owned = signature.owner.as_deref().is_some_and(|owner| !owner.is_empty());
            if verification_type == VerificationType::ScmUserSignature
                && (signature.status != SignatureStatus::Verified || !owned)
            {
                return Verification::failed(format!(
                    "does not have a valid signature from a scm user (key {})",
                    signature.key_id
                ));
            }
        }

        Verification::Passed
    }
}

impl SignatureVerifier for SignatureStatusVerifier {
    fn verify(
        &self,
        commit: &Commit,
        verification_type: VerificationType,
    ) -> std::result::Result<Verification, VerifierError> {
        Ok(Self::check(commit, verification_type))
    }
}
