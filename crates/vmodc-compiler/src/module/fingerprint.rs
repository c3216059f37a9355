use sha2::{Digest, Sha256};

/// Content identity of an interface description.
///
/// SHA-256 over the canonical line of every declaration, each followed by a
/// newline, as lowercase hex. Whitespace and documentation text do not
/// contribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FingerprintBuilder {
    hasher: Sha256,
}

impl FingerprintBuilder {
    pub fn update(&mut self, canonical_line: &str) {
        self.hasher.update(canonical_line.as_bytes());
        self.hasher.update(b"\n");
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(hex::encode(self.hasher.finalize()))
    }
}
