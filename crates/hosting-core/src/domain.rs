//! Registrable-domain derivation
//!
//! Record operations address the provider API by domain (`/domains/{domain}/dns`),
//! while operators usually pass a fully-qualified record name. The domain is
//! recovered from the public suffix list: effective TLD plus one label.

use crate::error::{Error, Result};

/// Derive the registrable domain from a record name
///
/// Accepts bare names (`www.example.co.uk`) as well as names carrying a
/// scheme (`https://www.example.com/`). Trailing dots are ignored.
///
/// # Examples
///
/// ```
/// use hosting_core::domain::resolve_domain;
///
/// assert_eq!(resolve_domain("www.example.co.uk").unwrap(), "example.co.uk");
/// ```
pub fn resolve_domain(hostname: &str) -> Result<String> {
    let host = strip_scheme(hostname.trim())?;
    let host = host.trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() {
        return Err(Error::InvalidName(hostname.to_string()));
    }

    let domain = psl::domain_str(&host).ok_or_else(|| Error::InvalidName(hostname.to_string()))?;

    tracing::debug!("Resolved domain '{}' from '{}'", domain, hostname);
    Ok(domain.to_string())
}

fn strip_scheme(input: &str) -> Result<String> {
    if input.contains("://") {
        let url = url::Url::parse(input).map_err(|_| Error::InvalidName(input.to_string()))?;
        return url
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidName(input.to_string()));
    }

    // Bare names may still carry a path or port
    let host = input.split('/').next().unwrap_or_default();
    Ok(host.split(':').next().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_label_public_suffix() {
        assert_eq!(resolve_domain("www.example.co.uk").unwrap(), "example.co.uk");
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(resolve_domain("foo.example.com").unwrap(), "example.com");
        assert_eq!(resolve_domain("example.com").unwrap(), "example.com");
        assert_eq!(resolve_domain("a.b.c.example.nl").unwrap(), "example.nl");
    }

    #[test]
    fn test_scheme_and_trailing_dot() {
        assert_eq!(resolve_domain("https://www.example.com/path").unwrap(), "example.com");
        assert_eq!(resolve_domain("mail.example.org.").unwrap(), "example.org");
        assert_eq!(resolve_domain("WWW.Example.COM").unwrap(), "example.com");
    }

    #[test]
    fn test_no_registrable_domain() {
        assert!(matches!(resolve_domain(""), Err(Error::InvalidName(_))));
        assert!(matches!(resolve_domain("co.uk"), Err(Error::InvalidName(_))));
    }
}
