//! Diffie-Hellman exchange between two threads
//!
//! The client picks the group and sends it over a loopback TCP connection;
//! each side then sends `generator ^ private mod modulus` and derives the
//! shared secret from the other side's public value. Values travel as 8-byte
//! little-endian words.

use crate::crypto::modmath::mod_exp;
use crate::error::{Error, Result};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

/// Group parameters for an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhParams {
    pub modulus: u64,
    pub generator: u64,
}

impl DhParams {
    /// The demo group: modulus 17, generator 3.
    pub fn demo() -> Self {
        DhParams {
            modulus: 17,
            generator: 3,
        }
    }
}

/// Verify that `generator ^ x mod modulus` is distinct for every exponent
/// in `1..modulus`, i.e. the generator covers the group.
pub fn check_generator(params: DhParams) -> Result<()> {
    let DhParams { modulus, generator } = params;
    let bad = || Error::BadGenerator { generator, modulus };

    if modulus < 2 || generator % modulus == 0 {
        return Err(bad());
    }

    let mut seen = vec![false; modulus as usize];
    for exp in 1..modulus {
        let residue = mod_exp(generator, exp, modulus) as usize;
        if seen[residue] {
            return Err(bad());
        }
        seen[residue] = true;
    }
    Ok(())
}

fn send_word(stream: &mut TcpStream, word: u64) -> std::io::Result<()> {
    stream.write_all(&word.to_le_bytes())
}

fn recv_word(stream: &mut TcpStream) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    stream.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn server_side(listener: TcpListener, private: u64) -> std::io::Result<u64> {
    let (mut stream, _peer) = listener.accept()?;

    let modulus = recv_word(&mut stream)?;
    let generator = recv_word(&mut stream)?;

    let public = mod_exp(generator, private, modulus);
    send_word(&mut stream, public)?;

    let peer_public = recv_word(&mut stream)?;
    Ok(mod_exp(peer_public, private, modulus))
}

fn client_side(mut stream: TcpStream, params: DhParams, private: u64) -> std::io::Result<u64> {
    send_word(&mut stream, params.modulus)?;
    send_word(&mut stream, params.generator)?;

    let public = mod_exp(params.generator, private, params.modulus);
    send_word(&mut stream, public)?;

    let peer_public = recv_word(&mut stream)?;
    Ok(mod_exp(peer_public, private, params.modulus))
}

/// Run a full exchange between a server thread and the calling thread.
///
/// Returns the shared secret after checking that both sides derived the
/// same value. The listener binds an ephemeral loopback port before the
/// server thread starts, so the client never races the accept.
pub fn exchange_over_tcp(params: DhParams, server_private: u64, client_private: u64) -> Result<u64> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(Error::Exchange)?;
    let addr = listener.local_addr().map_err(Error::Exchange)?;

    let server = std::thread::spawn(move || server_side(listener, server_private));

    let stream = TcpStream::connect(addr).map_err(Error::Exchange)?;
    let client_secret = client_side(stream, params, client_private).map_err(Error::Exchange)?;

    let server_secret = server
        .join()
        .expect("server thread panicked")
        .map_err(Error::Exchange)?;

    if server_secret != client_secret {
        return Err(Error::SecretMismatch {
            server: server_secret,
            client: client_secret,
        });
    }
    Ok(client_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_group_agrees_on_secret() {
        // The original demo exponents: server 5, client 3.
        let secret = exchange_over_tcp(DhParams::demo(), 5, 3).unwrap();
        // g^(a*b) mod p = 3^15 mod 17
        assert_eq!(secret, mod_exp(3, 15, 17));
    }

    #[test]
    fn larger_group_agrees_on_secret() {
        let params = DhParams {
            modulus: 2_147_483_647, // 2^31 - 1
            generator: 7,
        };
        let secret = exchange_over_tcp(params, 123_456, 654_321).unwrap();
        let expected = mod_exp(mod_exp(7, 123_456, params.modulus), 654_321, params.modulus);
        assert_eq!(secret, expected);
    }

    #[test]
    fn primitive_root_passes_check() {
        // 3 is a primitive root mod 19.
        check_generator(DhParams {
            modulus: 19,
            generator: 3,
        })
        .unwrap();
    }

    #[test]
    fn short_cycle_fails_check() {
        // 2 mod 10 cycles through 2, 4, 8, 6.
        let err = check_generator(DhParams {
            modulus: 10,
            generator: 2,
        })
        .unwrap_err();
        assert!(matches!(err, Error::BadGenerator { .. }));
    }

    #[test]
    fn degenerate_generator_fails_check() {
        let err = check_generator(DhParams {
            modulus: 7,
            generator: 14,
        })
        .unwrap_err();
        assert!(matches!(err, Error::BadGenerator { .. }));
    }
}
