/// Unit tests for address validation
/// Tests IPv4, IPv6 and zone-index forms accepted by the lookup entry point
use rust_ip_blacklist_api::errors::ValidationError;
use rust_ip_blacklist_api::validation::{is_valid_ip, validate, IpVersion};

#[cfg(test)]
mod ipv4_tests {
    use super::*;

    #[test]
    fn test_valid_ipv4() {
        assert!(is_valid_ip("8.8.8.8"));
        assert!(is_valid_ip("0.0.0.0"));
        assert!(is_valid_ip("255.255.255.255"));
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("01.02.03.004"));
    }

    #[test]
    fn test_invalid_ipv4() {
        assert!(!is_valid_ip("256.0.0.1"));
        assert!(!is_valid_ip("1.2.3"));
        assert!(!is_valid_ip("1.2.3.4.5"));
        assert!(!is_valid_ip("1.2.3.1000"));
        assert!(!is_valid_ip("1..2.3"));
        assert!(!is_valid_ip("-1.2.3.4"));
        assert!(!is_valid_ip("1.2.3.4/24"));
        assert!(!is_valid_ip("1.2.3.4:80"));
    }
}

#[cfg(test)]
mod ipv6_tests {
    use super::*;

    #[test]
    fn test_valid_ipv6() {
        // Full form
        assert!(is_valid_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        // Zero compression in different positions
        assert!(is_valid_ip("::"));
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("2001:db8::"));
        assert!(is_valid_ip("2001:4860:4860::8888"));
        assert!(is_valid_ip("2001:db8:0:0:1::1"));
        // Embedded IPv4
        assert!(is_valid_ip("::ffff:192.168.1.1"));
        assert!(is_valid_ip("64:ff9b::192.0.2.33"));
        // Zone index
        assert!(is_valid_ip("fe80::1ff:fe23:4567:890a%eth2"));
        assert!(is_valid_ip("fe80::1%3"));
    }

    #[test]
    fn test_invalid_ipv6() {
        assert!(!is_valid_ip("2001:db8::1::1"));
        assert!(!is_valid_ip("12345::1"));
        assert!(!is_valid_ip("gggg::1"));
        assert!(!is_valid_ip("1:2:3:4:5:6:7:8:9"));
        assert!(!is_valid_ip("[::1]"));
        assert!(!is_valid_ip("::ffff:999.1.1.1"));
        assert!(!is_valid_ip("fe80::1%"));
        assert!(!is_valid_ip("fe80::1%eth0%eth1"));
    }
}

#[test]
fn test_error_variants() {
    assert_eq!(validate(""), Err(ValidationError::EmptyInput));
    assert_eq!(validate(" \t "), Err(ValidationError::EmptyInput));
    assert_eq!(validate("hello"), Err(ValidationError::MalformedAddress));
}

#[test]
fn test_versions_and_echo() {
    let ip = validate("2001:4860:4860::8888").unwrap();
    assert_eq!(ip.version(), IpVersion::V6);
    assert_eq!(ip.to_string(), "2001:4860:4860::8888");

    let ip = validate(" 1.1.1.1 ").unwrap();
    assert_eq!(ip.version(), IpVersion::V4);
    assert_eq!(ip.as_str(), "1.1.1.1");
}
