use std::collections::BTreeMap;

/// Signatures keyed by signer id: a card id for the owner, or an
/// authority/service id.
///
/// At most one signature per signer; inserting again replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSet(BTreeMap<String, Vec<u8>>);

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `signature` for `signer_id`, returning any signature it replaced.
    pub fn insert(&mut self, signer_id: impl Into<String>, signature: Vec<u8>) -> Option<Vec<u8>> {
        self.0.insert(signer_id.into(), signature)
    }

    pub fn get(&self, signer_id: &str) -> Option<&[u8]> {
        self.0.get(signer_id).map(Vec::as_slice)
    }

    pub fn contains(&self, signer_id: &str) -> bool {
        self.0.contains_key(signer_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signers in byte order of their ids.
    pub fn signer_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.0
    }
}

impl From<BTreeMap<String, Vec<u8>>> for SignatureSet {
    fn from(map: BTreeMap<String, Vec<u8>>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Vec<u8>)> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
