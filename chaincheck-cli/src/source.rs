// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate sources: PEM files on disk and live TLS servers.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use chaincheck::{decode_der_certificates, decode_pem_certificates, Certificate};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, ClientConnection, DigitallySignedStruct, SignatureScheme};

/// Port used when a target has none.
pub const DEFAULT_PORT: u16 = 443;

/// Read and decode every certificate in a PEM file.
pub fn read_pem_file(path: &Path) -> Result<Vec<Certificate>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    decode_pem_certificates(&data)
        .with_context(|| format!("Failed to parse certificates in {}", path.display()))
}

/// Split `host[:port]` into its parts. IPv6 literals may be bracketed.
pub fn split_target(target: &str) -> Result<(String, u16)> {
    let parse_port = |port: &str| {
        port.parse::<u16>()
            .with_context(|| format!("Invalid port in target {}", target))
    };

    if let Some(rest) = target.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| anyhow!("Unterminated IPv6 literal in target {}", target))?;
        let port = match after.strip_prefix(':') {
            Some(port) => parse_port(port)?,
            None if after.is_empty() => DEFAULT_PORT,
            None => bail!("Invalid target {}", target),
        };
        return Ok((host.to_string(), port));
    }

    let (host, port) = match target.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => (host, parse_port(port)?),
        _ => (target, DEFAULT_PORT),
    };
    if host.is_empty() {
        bail!("Missing host in target {}", target);
    }
    Ok((host.to_string(), port))
}

/// Accepts any server certificate: the chain is fetched to be inspected, not trusted.
#[derive(Debug)]
struct NoVerifier(Arc<CryptoProvider>);

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

/// Time left before `deadline`; a `TimedOut` error once it has passed.
fn time_left(deadline: Instant, what: &str) -> io::Result<Duration> {
    match deadline.checked_duration_since(Instant::now()) {
        Some(left) if !left.is_zero() => Ok(left),
        _ => Err(io::Error::new(io::ErrorKind::TimedOut, format!("{} timed out", what))),
    }
}

fn connect(host: &str, port: u16, deadline: Instant) -> Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .with_context(|| format!("Failed to resolve {}", host))?
        .collect();

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, time_left(deadline, "connect")?) {
            Ok(stream) => {
                log::debug!("connected to {}", addr);
                return Ok(stream);
            }
            Err(e) => {
                log::debug!("connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e.into()),
        None => bail!("{} resolved to no addresses", host),
    }
}

/// Fetch the certificate chain a TLS server presents, leaf first, as DER.
///
/// Connecting and the TLS handshake share one deadline, `timeout` from the
/// call; every blocking connect, read and write only gets the time left
/// before it. Name resolution is not bounded by the deadline.
pub fn fetch_remote_chain_der(target: &str, timeout: Duration) -> Result<Vec<Vec<u8>>> {
    let fetch = || -> Result<Vec<Vec<u8>>> {
        let (host, port) = split_target(target)?;
        let deadline = Instant::now() + timeout;

        let mut stream = connect(&host, port, deadline)?;

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier(provider)))
            .with_no_client_auth();

        let server_name = ServerName::try_from(host.clone())
            .with_context(|| format!("Invalid server name {}", host))?;
        let mut conn = ClientConnection::new(Arc::new(config), server_name)?;

        while conn.is_handshaking() {
            let left = time_left(deadline, "TLS handshake")?;
            stream.set_read_timeout(Some(left))?;
            stream.set_write_timeout(Some(left))?;

            if conn.wants_write() {
                conn.write_tls(&mut stream).map_err(handshake_timeout)?;
            } else if conn.wants_read() {
                if conn.read_tls(&mut stream).map_err(handshake_timeout)? == 0 {
                    bail!("connection closed during the TLS handshake");
                }
                conn.process_new_packets()?;
            } else {
                break;
            }
        }

        let certificates: Vec<Vec<u8>> = conn
            .peer_certificates()
            .map(|certs| certs.iter().map(|c| c.as_ref().to_vec()).collect())
            .unwrap_or_default();
        log::info!("{} presented {} certificates", target, certificates.len());

        // Our Finished may still be queued; flush it with close_notify
        conn.send_close_notify();
        while conn.wants_write() {
            match conn.write_tls(&mut stream) {
                Ok(n) if n > 0 => {}
                _ => break,
            }
        }
        Ok(certificates)
    };

    fetch().with_context(|| format!("Failed to fetch certificates from {}", target))
}

fn handshake_timeout(e: io::Error) -> io::Error {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            io::Error::new(io::ErrorKind::TimedOut, "TLS handshake timed out")
        }
        _ => e,
    }
}

/// Fetch and decode the chain a TLS server presents, leaf first.
pub fn fetch_remote_chain(target: &str, timeout: Duration) -> Result<Vec<Certificate>> {
    let ders = fetch_remote_chain_der(target, timeout)?;
    decode_der_certificates(&ders)
        .with_context(|| format!("Failed to parse certificates presented by {}", target))
}
