use crate::conf::types::{TlsSpec, TlsVersion};
use crate::tls::{
    TlsError, cipher_suite_by_name, load_ca_bundle, load_certs, load_private_key,
    protocol_version, suite_name, suite_supports_version,
};
use rustls::crypto::{CryptoProvider, ring};
use rustls::server::WebPkiClientVerifier;
use rustls::server::danger::ClientCertVerifier;
use rustls::{ServerConfig, SupportedCipherSuite, SupportedProtocolVersion};
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;

const ALPN_HTTP11: &[u8] = b"http/1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMode {
    Off,
    /// A certificate is requested and verified when offered.
    Optional,
    /// Handshakes without a valid client certificate fail.
    Required,
}

/// Ready-to-use server side TLS state, shared read-only by every connection.
#[derive(Clone)]
pub struct TlsContext {
    acceptor: TlsAcceptor,
    client_auth: ClientAuthMode,
    cipher_suites: Vec<String>,
}

impl TlsContext {
    pub fn acceptor(&self) -> &TlsAcceptor {
        &self.acceptor
    }

    pub fn client_auth(&self) -> ClientAuthMode {
        self.client_auth
    }

    /// Enabled suites in server preference order.
    pub fn cipher_suites(&self) -> &[String] {
        &self.cipher_suites
    }
}

impl std::fmt::Debug for TlsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsContext")
            .field("client_auth", &self.client_auth)
            .field("cipher_suites", &self.cipher_suites)
            .finish_non_exhaustive()
    }
}

pub struct TlsContextBuilder<'a> {
    spec: &'a TlsSpec,
}

impl<'a> TlsContextBuilder<'a> {
    pub fn new(spec: &'a TlsSpec) -> Self {
        Self { spec }
    }

    pub fn build(self) -> Result<TlsContext, TlsError> {
        let spec = self.spec;

        //--------------------------------------------------------------------------
        // Protocol versions and cipher suites
        //--------------------------------------------------------------------------
        let versions = self.protocol_versions()?;
        let suites = self.cipher_suites()?;

        let provider = Arc::new(CryptoProvider {
            cipher_suites: suites.clone(),
            ..ring::default_provider()
        });

        //--------------------------------------------------------------------------
        // Server identity
        //--------------------------------------------------------------------------
        let certs = load_certs(&spec.cert)?;
        let key = load_private_key(&spec.key)?;

        //--------------------------------------------------------------------------
        // Client certificate verification
        //--------------------------------------------------------------------------
        let (verifier, client_auth) = self.client_verifier(&provider)?;

        let builder =
            ServerConfig::builder_with_provider(provider).with_protocol_versions(&versions)?;

        let builder = match verifier {
            Some(verifier) => builder.with_client_cert_verifier(verifier),
            None => builder.with_no_client_auth(),
        };

        let mut config = builder
            .with_single_cert(certs, key)
            .map_err(|e| TlsError::certificate_load(&spec.key, e))?;

        config.ignore_client_order = true;
        config.alpn_protocols = vec![ALPN_HTTP11.to_vec()];

        let cipher_suites: Vec<String> = suites.iter().map(suite_name).collect();

        tracing::info!(
            min_version = %spec.min_version,
            max_version = %spec.max_version,
            cipher_suites = ?cipher_suites,
            client_auth = ?client_auth,
            "TLS context ready"
        );

        Ok(TlsContext {
            acceptor: TlsAcceptor::from(Arc::new(config)),
            client_auth,
            cipher_suites,
        })
    }

    fn protocol_versions(&self) -> Result<Vec<&'static SupportedProtocolVersion>, TlsError> {
        let (min, max) = (self.spec.min_version, self.spec.max_version);
        if min > max {
            return Err(TlsError::InvalidVersionRange { min, max });
        }

        Ok([TlsVersion::Tls12, TlsVersion::Tls13]
            .into_iter()
            .filter(|v| (min..=max).contains(v))
            .map(protocol_version)
            .collect())
    }

    /// Suites in configured order, restricted to the enabled versions.
    fn cipher_suites(&self) -> Result<Vec<SupportedCipherSuite>, TlsError> {
        let (min, max) = (self.spec.min_version, self.spec.max_version);

        let configured = if self.spec.cipher_suites.is_empty() {
            ring::default_provider().cipher_suites
        } else {
            self.spec
                .cipher_suites
                .iter()
                .map(|name| {
                    cipher_suite_by_name(name)
                        .ok_or_else(|| TlsError::UnknownCipherSuite(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let usable: Vec<_> = configured
            .into_iter()
            .filter(|suite| {
                [TlsVersion::Tls12, TlsVersion::Tls13]
                    .into_iter()
                    .filter(|v| (min..=max).contains(v))
                    .any(|v| suite_supports_version(suite, v))
            })
            .collect();

        if usable.is_empty() {
            return Err(TlsError::NoUsableCipherSuites { min, max });
        }

        Ok(usable)
    }

    fn client_verifier(
        &self,
        provider: &Arc<CryptoProvider>,
    ) -> Result<(Option<Arc<dyn ClientCertVerifier>>, ClientAuthMode), TlsError> {
        let Some(client_auth) = &self.spec.client_auth else {
            return Ok((None, ClientAuthMode::Off));
        };

        let ca_file = client_auth.ca_file.as_deref().ok_or_else(|| {
            TlsError::ca_bundle(None, "client_auth is enabled but no ca_file is configured")
        })?;

        let roots = load_ca_bundle(ca_file)?;
        let mut builder =
            WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider.clone());

        let mode = if client_auth.required {
            tracing::warn!(
                ca_file = %ca_file.display(),
                "client certificates are required; clients without one cannot connect"
            );
            ClientAuthMode::Required
        } else {
            builder = builder.allow_unauthenticated();
            ClientAuthMode::Optional
        };

        let verifier = builder
            .build()
            .map_err(|e| TlsError::ca_bundle(Some(ca_file), e))?;

        Ok((Some(verifier), mode))
    }
}
