use crate::{CardError, CardId, CardRequest, SERVICE_CARD_ID};
use tracing::debug;
use vouch_crypto::{CryptoProvider, PrivateKey};

/// Attaches owner, authority and service signatures to card requests.
#[derive(Debug, Clone)]
pub struct RequestSigner<C> {
    crypto: C,
}

impl<C: CryptoProvider> RequestSigner<C> {
    pub fn new(crypto: C) -> Self {
        Self { crypto }
    }

    /// Sign the snapshot with the identity owner's key.
    ///
    /// The signature is stored under the request's own card id, which is
    /// returned for convenience.
    pub fn self_sign(
        &self,
        request: &mut CardRequest,
        private_key: &PrivateKey,
    ) -> Result<CardId, CardError> {
        check_inputs(request, private_key)?;

        let id = request.card_id(&self.crypto)?;
        let signature = self.crypto.sign(request.snapshot().as_bytes(), private_key)?;
        request.add_signature(id.as_str(), signature)?;

        debug!(card_id = %id, "self-signed card request");
        Ok(id)
    }

    /// Endorse the request as `authority_id`, signing snapshot ‖ card id.
    pub fn authority_sign(
        &self,
        request: &mut CardRequest,
        authority_id: &str,
        private_key: &PrivateKey,
    ) -> Result<(), CardError> {
        if authority_id.is_empty() {
            return Err(CardError::InvalidArgument("authority id is empty"));
        }
        check_inputs(request, private_key)?;

        let id = request.card_id(&self.crypto)?;
        let payload = request.snapshot().endorsement_payload(&id);
        let signature = self.crypto.sign(&payload, private_key)?;
        request.add_signature(authority_id, signature)?;

        debug!(card_id = %id, authority_id, "authority-signed card request");
        Ok(())
    }

    /// Endorse the request as the well-known card service.
    pub fn service_sign(
        &self,
        request: &mut CardRequest,
        private_key: &PrivateKey,
    ) -> Result<(), CardError> {
        self.authority_sign(request, SERVICE_CARD_ID, private_key)
    }
}

fn check_inputs(request: &CardRequest, private_key: &PrivateKey) -> Result<(), CardError> {
    if private_key.is_empty() {
        return Err(CardError::InvalidArgument("private key is empty"));
    }
    if request.snapshot().is_empty() {
        return Err(CardError::InvalidArgument("snapshot is empty"));
    }
    Ok(())
}
