use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::{aead::Aead, Aes256Gcm, KeyInit};
use anyhow::{anyhow, Context, Result};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// Hex-encoded key that overrides the key file
pub const KEY_ENV_VAR: &str = "NUTRIPARSE_LOG_KEY";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// AES-256-GCM key protecting meal text at rest.
///
/// Ciphertexts are laid out as `nonce || ciphertext+tag`, with a fresh random
/// nonce per message.
#[derive(Clone)]
pub struct LogCipher {
    key: [u8; KEY_LEN],
}

impl LogCipher {
    /// Fresh random key
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded.trim()).context("Invalid hex in audit log key")?;
        if bytes.len() != KEY_LEN {
            return Err(anyhow!(
                "Audit log key must be exactly {} bytes, got {} bytes",
                KEY_LEN,
                bytes.len()
            ));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self { key })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// Read the key stored at `path`, creating it on first use
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let encoded = std::fs::read_to_string(path)
                .context(format!("Failed to read audit log key: {}", path.display()))?;
            return Self::from_hex(&encoded)
                .context(format!("Corrupt audit log key: {}", path.display()));
        }

        let cipher = Self::generate();
        std::fs::write(path, cipher.to_hex())
            .context(format!("Failed to write audit log key: {}", path.display()))?;
        restrict_permissions(path)?;
        tracing::warn!(path = %path.display(), "Created new audit log key; keep it to read old logs");

        Ok(cipher)
    }

    /// Key from `NUTRIPARSE_LOG_KEY` when set, otherwise the key file at `path`
    pub fn from_env_or_file(path: impl AsRef<Path>) -> Result<Self> {
        match std::env::var(KEY_ENV_VAR) {
            Ok(encoded) => {
                tracing::debug!("Loading audit log key from {}", KEY_ENV_VAR);
                Self::from_hex(&encoded).context(format!("Invalid {}", KEY_ENV_VAR))
            }
            Err(_) => Self::load_or_create(path),
        }
    }

    /// Short fingerprint naming the key without revealing it
    pub fn key_id(&self) -> String {
        hex::encode(&Sha256::digest(self.key)[..8])
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(GenericArray::from_slice(&self.key));

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = GenericArray::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| anyhow!("Encryption failed: {}", e))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < NONCE_LEN {
            return Err(anyhow!("Encrypted data too short"));
        }

        let cipher = Aes256Gcm::new(GenericArray::from_slice(&self.key));
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);

        cipher
            .decrypt(GenericArray::from_slice(nonce), ciphertext)
            .map_err(|e| anyhow!("Decryption failed: {}", e))
    }
}

impl fmt::Debug for LogCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCipher")
            .field("key_id", &self.key_id())
            .finish()
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .context(format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
