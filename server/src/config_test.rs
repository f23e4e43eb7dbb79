use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn reads_host_and_port() {
    let config = ServerConfig::from_lookup(lookup(&[("HOST", "127.0.0.1"), ("PORT", "8080")])).unwrap();
    assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[("HOST", "  "), ("PORT", "")])).unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn trims_surrounding_whitespace() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", " 4000 ")])).unwrap();
    assert_eq!(config.port, 4000);
}

#[test]
fn rejects_non_numeric_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("http".into()));
}

#[test]
fn rejects_zero_and_out_of_range_ports() {
    for raw in ["0", "65536", "-1"] {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", raw)])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort(raw.into()), "expected rejection for {raw:?}");
    }
}

#[test]
fn rejects_hostname_in_host() {
    let err = ServerConfig::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidHost("localhost".into()));
}

#[test]
fn accepts_ipv6_host() {
    let config = ServerConfig::from_lookup(lookup(&[("HOST", "::1"), ("PORT", "3001")])).unwrap();
    assert_eq!(config.addr().to_string(), "[::1]:3001");
}
