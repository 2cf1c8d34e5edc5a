//! Fuzz target for the full incoming chain (`pkt_recv`).
//!
//! Feeds arbitrary bytes as if they were a wire frame and drives them
//! through description-header parsing, bounds checking, session decap, and
//! (for `DATA` frames) decrypt/decompress. Must never panic; a malformed or
//! adversarial frame should only ever produce an `Err`.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use sidp_core::{Connection, ConnectionConfig, SystemEnvironment, pkt_recv};
use sidp_proto::ConnType;

fuzz_target!(|data: &[u8]| {
    let stream = Cursor::new(data.to_vec());
    let config = ConnectionConfig::builder(1, ConnType::Normal).peer_device(2).session_id(7).build();
    let mut conn = Connection::new(stream, SystemEnvironment, config);
    conn.set_key(b"fuzz target key material").expect("fixed key is within the cap");

    let _ = pkt_recv(&mut conn);
});
