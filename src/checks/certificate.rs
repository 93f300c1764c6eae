use crate::{configuration::CHECK_CONNECTION_TIMEOUT, products::unexpected::Unexpected};
use chrono::{DateTime, TimeZone, Utc};
use openssl::{
    asn1::{Asn1Time, Asn1TimeRef},
    ssl::{SslConnector, SslMethod},
};
use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};
use tracing::{debug, trace};


const SECONDS_PER_DAY: i64 = 86_400;


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// What a successful certificate fetch tells us
pub struct CertificateFacts {
    /// Leaf certificate not-after
    pub not_after: DateTime<Utc>,
}


/// Source of leaf certificate facts for a host
pub trait CertificateSource {
    /// Single attempt to fetch certificate facts of host:port
    fn fetch(&self, host: &str, port: u16) -> Result<CertificateFacts, Unexpected>;
}


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Fetches leaf certificates over TLS using OpenSSL and the system trust store
pub struct TlsFetcher {
    /// Connect and handshake timeout
    pub timeout: Duration,
}


impl Default for TlsFetcher {
    fn default() -> TlsFetcher {
        TlsFetcher::new(Duration::from_secs(CHECK_CONNECTION_TIMEOUT))
    }
}


impl TlsFetcher {
    /// New fetcher with given timeout
    pub fn new(timeout: Duration) -> TlsFetcher {
        TlsFetcher { timeout }
    }


    fn connect(&self, host: &str, port: u16) -> Result<TcpStream, String> {
        let addresses = (host, port)
            .to_socket_addrs()
            .map_err(|err| format!("Name resolution failed: {}", err))?;

        let mut last_error = String::from("No addresses resolved");
        for address in addresses {
            trace!("Connecting to: {} ({})", address, host);
            match TcpStream::connect_timeout(&address, self.timeout) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(Some(self.timeout))
                        .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
                        .map_err(|err| err.to_string())?;
                    return Ok(stream);
                }
                Err(err) => last_error = err.to_string(),
            }
        }
        Err(last_error)
    }


    fn not_after(&self, host: &str, port: u16) -> Result<DateTime<Utc>, String> {
        let stream = self.connect(host, port)?;
        let connector = SslConnector::builder(SslMethod::tls())
            .map_err(|err| err.to_string())?
            .build();
        let tls_stream = connector
            .connect(host, stream)
            .map_err(|err| err.to_string())?;
        let certificate = tls_stream
            .ssl()
            .peer_certificate()
            .ok_or_else(|| String::from("Certificate not found"))?;
        asn1_to_utc(certificate.not_after())
    }
}


impl CertificateSource for TlsFetcher {
    fn fetch(&self, host: &str, port: u16) -> Result<CertificateFacts, Unexpected> {
        debug!("Fetching certificate of: {}:{}", host, port);
        self.not_after(host, port)
            .map(|not_after| CertificateFacts { not_after })
            .map_err(|cause| {
                Unexpected::ConnectivityOrTls {
                    host: host.to_string(),
                    port,
                    cause,
                }
            })
    }
}


/// Convert ASN.1 time to UTC instant by diffing against the Unix epoch
fn asn1_to_utc(time: &Asn1TimeRef) -> Result<DateTime<Utc>, String> {
    let epoch = Asn1Time::from_unix(0).map_err(|err| err.to_string())?;
    let diff = epoch.diff(time).map_err(|err| err.to_string())?;
    let seconds = i64::from(diff.days) * SECONDS_PER_DAY + i64::from(diff.secs);
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| format!("Not-after out of range: {}", time))
}
