/// Address validation shared by the HTTP surface and the lookup entry point.
///
/// Accepted forms:
/// - IPv4 dotted quad, 1-3 digits per octet, each octet 0-255
/// - IPv6 full form, `::` compression, embedded IPv4 suffix
/// - IPv6 with a zone index suffix (`fe80::1%eth0`)
use crate::errors::ValidationError;
use regex::Regex;
use std::fmt;
use std::net::Ipv6Addr;
use std::sync::LazyLock;

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .expect("IPv4 pattern compiles")
});

static ZONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("zone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

/// An address that passed [`validate`]. Holds the trimmed input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidIp {
    address: String,
    version: IpVersion,
}

impl ValidIp {
    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }
}

impl fmt::Display for ValidIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Validate a candidate address.
///
/// Surrounding whitespace is ignored. Pure: no logging, no I/O.
pub fn validate(input: &str) -> Result<ValidIp, ValidationError> {
    let candidate = input.trim();
    if candidate.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let version = if is_ipv4(candidate) {
        IpVersion::V4
    } else if is_ipv6(candidate) {
        IpVersion::V6
    } else {
        return Err(ValidationError::MalformedAddress);
    };

    Ok(ValidIp {
        address: candidate.to_string(),
        version,
    })
}

/// Form-level convenience around [`validate`].
pub fn is_valid_ip(input: &str) -> bool {
    validate(input).is_ok()
}

fn is_ipv4(candidate: &str) -> bool {
    let Some(caps) = IPV4_REGEX.captures(candidate) else {
        return false;
    };

    caps.iter()
        .skip(1)
        .flatten()
        .all(|octet| octet.as_str().parse::<u16>().is_ok_and(|n| n <= 255))
}

fn is_ipv6(candidate: &str) -> bool {
    let address = match candidate.split_once('%') {
        Some((address, zone)) => {
            if !ZONE_REGEX.is_match(zone) {
                return false;
            }
            address
        }
        None => candidate,
    };

    // std accepts every textual form except the zone suffix handled above
    address.parse::<Ipv6Addr>().is_ok()
}
