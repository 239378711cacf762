//! AES-256-CBC helpers for the `encrypt-ajax.php` protocol

use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::ExtractorError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const KEY: &[u8; 32] = b"93422192433952489752342908585752";
const IV: &[u8; 16] = b"9262859232435825";

/// Encrypt `plain` and return standard base64.
pub fn encrypt(plain: &str) -> Result<String, ExtractorError> {
    let cipher = Aes256CbcEnc::new_from_slices(KEY, IV)
        .map_err(|e| ExtractorError::Decrypt(e.to_string()))?;
    let bytes = cipher.encrypt_padded_vec_mut::<Pkcs7>(plain.as_bytes());
    Ok(STANDARD.encode(bytes))
}

/// Decrypt standard base64 ciphertext into UTF-8 text.
pub fn decrypt(encoded: &str) -> Result<String, ExtractorError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ExtractorError::Decrypt(format!("invalid base64: {e}")))?;
    let cipher = Aes256CbcDec::new_from_slices(KEY, IV)
        .map_err(|e| ExtractorError::Decrypt(e.to_string()))?;
    let plain = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
        .map_err(|e| ExtractorError::Decrypt(e.to_string()))?;
    String::from_utf8(plain).map_err(|e| ExtractorError::Decrypt(format!("invalid utf-8: {e}")))
}
