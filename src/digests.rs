//! Adapters exposing ecosystem digest and XOF implementations through the
//! incremental-transform contract
//!
//! The engine itself never depends on any concrete compression function;
//! these adapters let anything implementing the `digest` crate's traits
//! satisfy [`Transform`] (and [`XofTransform`] for sponge constructions), so
//! SHA-2, SHA-3, Blake2, and the SHAKE/cSHAKE family plug straight into the
//! composition layer.

use digest::core_api::BlockSizeUser;
use digest::{Digest, ExtendableOutput, Update, XofReader};
use sha3::{CShake128, CShake128Core, CShake256, CShake256Core};

use crate::transform::DEFAULT_BUFFER_SIZE;
use crate::{HashError, HashResult, Result, Transform, XofTransform};

/// Fixed-output digest adapter.
///
/// Holds the canonical start state alongside the working state, so reset
/// works uniformly for unkeyed and pre-configured digests alike.
#[derive(Clone)]
pub struct CoreDigest<D> {
    name: &'static str,
    initial: D,
    state: D,
    buffer_size: usize,
}

impl<D> CoreDigest<D>
where
    D: Digest + BlockSizeUser + Clone + Send + 'static,
{
    /// Wrap a pre-configured digest instance as its canonical start state.
    pub fn with_initial(name: &'static str, initial: D) -> Self {
        Self {
            name,
            state: initial.clone(),
            initial,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Construct from the digest's default start state.
    #[must_use]
    pub fn named(name: &'static str) -> Self
    where
        D: Default,
    {
        Self::with_initial(name, D::default())
    }
}

impl<D> Transform for CoreDigest<D>
where
    D: Digest + BlockSizeUser + Clone + Send + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn block_size(&self) -> Option<usize> {
        Some(<D as BlockSizeUser>::block_size())
    }

    fn output_size(&self) -> Option<usize> {
        Some(<D as Digest>::output_size())
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn set_buffer_size(&mut self, bytes: usize) -> Result<()> {
        if bytes == 0 {
            return Err(HashError::invalid_argument("buffer size must be non-zero"));
        }
        self.buffer_size = bytes;
        Ok(())
    }

    fn initialize(&mut self) {
        self.state = self.initial.clone();
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.state, data);
    }

    fn finalize(&mut self) -> Result<HashResult> {
        let state = std::mem::replace(&mut self.state, self.initial.clone());
        Ok(HashResult::new(state.finalize().to_vec()))
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}

/// SHA-256 transform
pub type Sha256Transform = CoreDigest<sha2::Sha256>;
/// SHA-384 transform
pub type Sha384Transform = CoreDigest<sha2::Sha384>;
/// SHA-512 transform
pub type Sha512Transform = CoreDigest<sha2::Sha512>;
/// SHA3-256 transform
pub type Sha3_256Transform = CoreDigest<sha3::Sha3_256>;
/// SHA3-512 transform
pub type Sha3_512Transform = CoreDigest<sha3::Sha3_512>;
/// Blake2b-512 transform (unkeyed)
pub type Blake2b512Transform = CoreDigest<blake2::Blake2b512>;
/// Blake2s-256 transform (unkeyed)
pub type Blake2s256Transform = CoreDigest<blake2::Blake2s256>;

/// Create a SHA-256 transform
#[must_use]
pub fn sha256() -> Sha256Transform {
    CoreDigest::named("SHA-256")
}

/// Create a SHA-384 transform
#[must_use]
pub fn sha384() -> Sha384Transform {
    CoreDigest::named("SHA-384")
}

/// Create a SHA-512 transform
#[must_use]
pub fn sha512() -> Sha512Transform {
    CoreDigest::named("SHA-512")
}

/// Create a SHA3-256 transform
#[must_use]
pub fn sha3_256() -> Sha3_256Transform {
    CoreDigest::named("SHA3-256")
}

/// Create a SHA3-512 transform
#[must_use]
pub fn sha3_512() -> Sha3_512Transform {
    CoreDigest::named("SHA3-512")
}

/// Create an unkeyed Blake2b-512 transform
#[must_use]
pub fn blake2b512() -> Blake2b512Transform {
    CoreDigest::named("Blake2b-512")
}

/// Create an unkeyed Blake2s-256 transform
#[must_use]
pub fn blake2s256() -> Blake2s256Transform {
    CoreDigest::named("Blake2s-256")
}

/// Sponge XOF adapter over the SHAKE/cSHAKE family.
///
/// Squeezing never consumes the absorbed state: each read re-finalizes a
/// clone and skips the bytes already drained, so the drain position is plain
/// per-instance state and clones diverge independently mid-drain.
#[derive(Clone)]
pub struct ShakeXof<X> {
    name: String,
    initial: X,
    state: X,
    output_bits: Option<usize>,
    drained: u64,
    buffer_size: usize,
}

impl<X> ShakeXof<X>
where
    X: Update + ExtendableOutput + BlockSizeUser + Clone + Send + 'static,
{
    fn from_initial(name: String, initial: X, output_bits: Option<usize>) -> Self {
        Self {
            name,
            state: initial.clone(),
            initial,
            output_bits,
            drained: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    fn squeeze_at(&self, skip: u64, out: &mut [u8]) {
        let mut reader = self.state.clone().finalize_xof();
        let mut scratch = [0u8; 512];
        let mut remaining = skip;
        while remaining > 0 {
            let n = remaining.min(scratch.len() as u64) as usize;
            reader.read(&mut scratch[..n]);
            remaining -= n as u64;
        }
        reader.read(out);
    }
}

impl<X> Transform for ShakeXof<X>
where
    X: Update + ExtendableOutput + BlockSizeUser + Clone + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn block_size(&self) -> Option<usize> {
        // The sponge rate: 168 for the 128-strength family, 136 for 256.
        Some(<X as BlockSizeUser>::block_size())
    }

    fn output_size(&self) -> Option<usize> {
        self.output_bits.map(|bits| bits / 8)
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn set_buffer_size(&mut self, bytes: usize) -> Result<()> {
        if bytes == 0 {
            return Err(HashError::invalid_argument("buffer size must be non-zero"));
        }
        self.buffer_size = bytes;
        Ok(())
    }

    fn initialize(&mut self) {
        self.state = self.initial.clone();
        self.drained = 0;
    }

    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.state, data);
    }

    fn finalize(&mut self) -> Result<HashResult> {
        let total = self.output_size_bytes()?;
        let remaining = total.saturating_sub(self.drained as usize);
        let mut out = vec![0u8; remaining];
        self.squeeze_at(self.drained, &mut out);
        self.initialize();
        Ok(HashResult::new(out))
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}

impl<X> XofTransform for ShakeXof<X>
where
    X: Update + ExtendableOutput + BlockSizeUser + Clone + Send + 'static,
{
    fn set_output_bits(&mut self, bits: usize) -> Result<()> {
        if bits == 0 {
            self.output_bits = None;
            return Ok(());
        }
        if bits % 8 != 0 {
            return Err(HashError::out_of_range(format!(
                "output length {bits} bits is not a multiple of 8"
            )));
        }
        self.output_bits = Some(bits);
        Ok(())
    }

    fn read(&mut self, out: &mut [u8]) -> Result<()> {
        if let Some(bits) = self.output_bits {
            let limit = (bits / 8) as u64;
            if self.drained + out.len() as u64 > limit {
                return Err(HashError::invalid_argument(format!(
                    "drain of {} bytes exceeds configured output of {limit} bytes",
                    out.len()
                )));
            }
        }
        self.squeeze_at(self.drained, out);
        self.drained += out.len() as u64;
        Ok(())
    }

    fn clone_xof(&self) -> Box<dyn XofTransform> {
        Box::new(self.clone())
    }
}

/// SHAKE128 transform, 256-bit default output
pub type Shake128Transform = ShakeXof<sha3::Shake128>;
/// SHAKE256 transform, 512-bit default output
pub type Shake256Transform = ShakeXof<sha3::Shake256>;
/// cSHAKE128 transform
pub type CShake128Transform = ShakeXof<CShake128>;
/// cSHAKE256 transform
pub type CShake256Transform = ShakeXof<CShake256>;

/// Create a SHAKE128 transform with a 256-bit default output length.
#[must_use]
pub fn shake128() -> Shake128Transform {
    ShakeXof::from_initial("SHAKE128".into(), sha3::Shake128::default(), Some(256))
}

/// Create a SHAKE256 transform with a 512-bit default output length.
#[must_use]
pub fn shake256() -> Shake256Transform {
    ShakeXof::from_initial("SHAKE256".into(), sha3::Shake256::default(), Some(512))
}

/// Create an unbounded cSHAKE128 transform with the given function name and
/// customization (both may be empty, which degrades to SHAKE128).
#[must_use]
pub fn cshake128(function_name: &[u8], customization: &[u8]) -> CShake128Transform {
    let core = CShake128Core::new_with_function_name(function_name, customization);
    ShakeXof::from_initial("cSHAKE128".into(), CShake128::from_core(core), None)
}

/// Create an unbounded cSHAKE256 transform with the given function name and
/// customization (both may be empty, which degrades to SHAKE256).
#[must_use]
pub fn cshake256(function_name: &[u8], customization: &[u8]) -> CShake256Transform {
    let core = CShake256Core::new_with_function_name(function_name, customization);
    ShakeXof::from_initial("cSHAKE256".into(), CShake256::from_core(core), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformExt;

    #[test]
    fn sha256_known_vector() {
        let result = sha256().compute(b"abc").expect("compute");
        assert_eq!(
            result.to_hex(false),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn shake_reads_compose() {
        let mut one = shake128();
        one.update(b"stream me");
        let mut whole = vec![0u8; 32];
        one.read(&mut whole).expect("read");

        let mut two = shake128();
        two.update(b"stream me");
        let mut first = vec![0u8; 10];
        let mut second = vec![0u8; 22];
        two.read(&mut first).expect("read");
        two.read(&mut second).expect("read");

        assert_eq!(whole[..10], first[..]);
        assert_eq!(whole[10..], second[..]);
    }

    #[test]
    fn bounded_shake_refuses_overdrain() {
        let mut xof = shake128();
        let mut out = vec![0u8; 33];
        assert!(matches!(
            xof.read(&mut out),
            Err(HashError::InvalidArgument(_))
        ));
    }
}
