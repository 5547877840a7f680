//! Blake2-family keyed MACs
//!
//! Thin wrappers: the key, salt, and personalization are baked into the
//! inner digest's configuration at construction, and the wrapper forwards
//! the incremental contract. A later `set_key` is stored for clone
//! propagation only — it never reconfigures an in-flight inner digest, so
//! the key must be supplied at construction time for correctness.

use blake2::digest::Mac;
use blake2::{Blake2bMac512, Blake2sMac256};

use super::KeyMaterial;
use crate::transform::DEFAULT_BUFFER_SIZE;
use crate::{HashError, HashResult, Result, Transform};

macro_rules! blake2_mac_transform {
    (
        $(#[$doc:meta])*
        $wrapper:ident, $inner:ty, $label:literal, $block:literal, $output:literal
    ) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $wrapper {
            initial: $inner,
            state: $inner,
            stored_key: KeyMaterial,
            buffer_size: usize,
        }

        impl $wrapper {
            /// Build the MAC with key, salt, and personalization fixed into
            /// the inner digest's configuration.
            ///
            /// # Errors
            ///
            /// `InvalidArgument` when the inner digest rejects the key,
            /// salt, or personalization length.
            pub fn new(key: &[u8], salt: &[u8], personalization: &[u8]) -> Result<Self> {
                let initial = <$inner>::new_with_salt_and_personal(key, salt, personalization)
                    .map_err(|_| {
                        HashError::invalid_argument(concat!(
                            $label,
                            " rejected the key, salt, or personalization length"
                        ))
                    })?;
                Ok(Self {
                    state: initial.clone(),
                    initial,
                    stored_key: KeyMaterial::new(key),
                    buffer_size: DEFAULT_BUFFER_SIZE,
                })
            }

            /// Store a new key for clone propagation.
            ///
            /// Does not reconfigure the in-flight inner digest.
            pub fn set_key(&mut self, key: &[u8]) {
                self.stored_key = KeyMaterial::new(key);
            }

            /// Defensive copy of the stored key.
            #[must_use]
            pub fn key(&self) -> zeroize::Zeroizing<Vec<u8>> {
                self.stored_key.value()
            }

            /// Zero the stored key copy in place. The inner digest's baked
            /// configuration is untouched.
            pub fn clear(&mut self) {
                self.stored_key.clear();
            }
        }

        impl Transform for $wrapper {
            fn name(&self) -> &str {
                $label
            }

            fn block_size(&self) -> Option<usize> {
                Some($block)
            }

            fn output_size(&self) -> Option<usize> {
                Some($output)
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
                Mac::update(&mut self.state, data);
            }

            fn finalize(&mut self) -> Result<HashResult> {
                let state = std::mem::replace(&mut self.state, self.initial.clone());
                Ok(HashResult::new(state.finalize().into_bytes().to_vec()))
            }

            fn clone_box(&self) -> Box<dyn Transform> {
                Box::new(self.clone())
            }
        }
    };
}

blake2_mac_transform!(
    /// Blake2b keyed MAC with a 512-bit output.
    Blake2bMacTransform,
    Blake2bMac512,
    "Blake2b-512-MAC",
    128,
    64
);

blake2_mac_transform!(
    /// Blake2s keyed MAC with a 256-bit output.
    Blake2sMacTransform,
    Blake2sMac256,
    "Blake2s-256-MAC",
    64,
    32
);
