//! Master entry point for constructing transforms

use crate::checksum::{Adler32, Crc, CrcSpec};
use crate::digests::{
    blake2b512, blake2s256, sha256, sha3_256, sha3_512, sha384, sha512, shake128, shake256,
    Blake2b512Transform, Blake2s256Transform, Sha256Transform, Sha384Transform, Sha3_256Transform,
    Sha3_512Transform, Sha512Transform, Shake128Transform, Shake256Transform,
};
use crate::mac::{Blake2bMacTransform, Blake2sMacTransform, Hmac, Kmac};
use crate::null::NullTransform;
use crate::{Result, Transform};

/// Entry point for hash operations.
///
/// Every method hands back a ready transform instance; feed it through
/// [`Transform::update`]/[`Transform::finalize`](crate::Transform::finalize)
/// or the [`TransformExt`](crate::TransformExt) conveniences.
pub struct Hash;

impl Hash {
    /// Use SHA-256
    #[must_use]
    pub fn sha256() -> Sha256Transform {
        sha256()
    }

    /// Use SHA-384
    #[must_use]
    pub fn sha384() -> Sha384Transform {
        sha384()
    }

    /// Use SHA-512
    #[must_use]
    pub fn sha512() -> Sha512Transform {
        sha512()
    }

    /// Use SHA3-256
    #[must_use]
    pub fn sha3_256() -> Sha3_256Transform {
        sha3_256()
    }

    /// Use SHA3-512
    #[must_use]
    pub fn sha3_512() -> Sha3_512Transform {
        sha3_512()
    }

    /// Use unkeyed Blake2b-512
    #[must_use]
    pub fn blake2b512() -> Blake2b512Transform {
        blake2b512()
    }

    /// Use unkeyed Blake2s-256
    #[must_use]
    pub fn blake2s256() -> Blake2s256Transform {
        blake2s256()
    }

    /// Use SHAKE128 extendable output (256-bit default length)
    #[must_use]
    pub fn shake128() -> Shake128Transform {
        shake128()
    }

    /// Use SHAKE256 extendable output (512-bit default length)
    #[must_use]
    pub fn shake256() -> Shake256Transform {
        shake256()
    }

    /// Use the Adler-32 rolling checksum
    #[must_use]
    pub fn adler32() -> Adler32 {
        Adler32::new()
    }

    /// Use a catalogued CRC variant
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an unsupported register width.
    pub fn crc(spec: CrcSpec) -> Result<Crc> {
        Crc::with_spec(spec)
    }

    /// Use the buffering passthrough transform
    #[must_use]
    pub fn null() -> NullTransform {
        NullTransform::new()
    }

    /// Compose HMAC over any block-structured inner transform
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the inner transform has no block size.
    pub fn hmac(inner: Box<dyn Transform>, key: &[u8]) -> Result<Hmac> {
        Hmac::new(inner, key)
    }

    /// HMAC-SHA-256 shorthand
    ///
    /// # Errors
    ///
    /// Propagates [`Hmac::new`] failures.
    pub fn hmac_sha256(key: &[u8]) -> Result<Hmac> {
        Hmac::new(Box::new(sha256()), key)
    }

    /// KMAC128 with a 256-bit default output
    ///
    /// # Errors
    ///
    /// Propagates [`Kmac`] construction failures.
    pub fn kmac128(key: &[u8], customization: &[u8]) -> Result<Kmac> {
        Kmac::v128(key, customization)
    }

    /// KMAC256 with a 512-bit default output
    ///
    /// # Errors
    ///
    /// Propagates [`Kmac`] construction failures.
    pub fn kmac256(key: &[u8], customization: &[u8]) -> Result<Kmac> {
        Kmac::v256(key, customization)
    }

    /// KMACXOF128 unbounded extendable output
    ///
    /// # Errors
    ///
    /// Propagates [`Kmac`] construction failures.
    pub fn kmacxof128(key: &[u8], customization: &[u8]) -> Result<Kmac> {
        Kmac::xof128(key, customization)
    }

    /// KMACXOF256 unbounded extendable output
    ///
    /// # Errors
    ///
    /// Propagates [`Kmac`] construction failures.
    pub fn kmacxof256(key: &[u8], customization: &[u8]) -> Result<Kmac> {
        Kmac::xof256(key, customization)
    }

    /// Blake2b keyed MAC (512-bit output)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for rejected key/salt/personalization lengths.
    pub fn blake2b_mac(key: &[u8], salt: &[u8], personalization: &[u8]) -> Result<Blake2bMacTransform> {
        Blake2bMacTransform::new(key, salt, personalization)
    }

    /// Blake2s keyed MAC (256-bit output)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for rejected key/salt/personalization lengths.
    pub fn blake2s_mac(key: &[u8], salt: &[u8], personalization: &[u8]) -> Result<Blake2sMacTransform> {
        Blake2sMacTransform::new(key, salt, personalization)
    }
}
