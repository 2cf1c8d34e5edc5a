//! Fuzz target for `DescriptionHeader::parse`.
//!
//! The outermost header is the only thing ever parsed before any bound
//! check runs, so it must never panic or over-read on arbitrary bytes,
//! however short or malformed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sidp_proto::DescriptionHeader;

fuzz_target!(|data: &[u8]| {
    let _ = DescriptionHeader::parse(data);
});
