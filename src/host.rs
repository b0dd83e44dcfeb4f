//! Host address resolution.
//!
//! An explicit override wins. Otherwise the source address of the route
//! towards a public address is used. Detection is best-effort and never
//! fails the process.

use crate::config::StackConfig;
use crate::runner::{CommandRunner, Invocation};

/// Destination used to pick the outbound interface. Nothing is sent to it.
const ROUTE_PROBE_DESTINATION: &str = "1.1.1.1";

/// Shown in URLs when no address is known.
pub const HOST_PLACEHOLDER: &str = "<host-ip>";

/// Resolve the address other devices use to reach this machine.
pub async fn resolve_host_address<R>(config: &StackConfig, runner: &R) -> Option<String>
where
    R: CommandRunner + ?Sized,
{
    if let Some(address) = &config.host.address {
        return Some(address.clone());
    }

    let inv = Invocation::new("ip").args(["route", "get", ROUTE_PROBE_DESTINATION]);
    let output = match runner.capture(&inv).await {
        Ok(output) if output.status.is_success() => output,
        Ok(output) => {
            tracing::debug!(status = %output.status, "Route lookup failed");
            return None;
        }
        Err(e) => {
            tracing::debug!(error = %e, "Route lookup unavailable");
            return None;
        }
    };

    let address = parse_route_source(&output.stdout);
    if address.is_none() {
        tracing::debug!("Route lookup returned no source address");
    }
    address
}

/// Extract the `src` address from `ip route get` output.
pub fn parse_route_source(output: &str) -> Option<String> {
    let mut tokens = output.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "src" {
            return tokens.next().map(str::to_string);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_source() {
        let output = "1.1.1.1 via 192.168.1.1 dev wlp2s0 src 192.168.1.42 uid 1000 \n    cache \n";
        assert_eq!(parse_route_source(output), Some("192.168.1.42".to_string()));
    }

    #[test]
    fn test_parse_route_source_direct_route() {
        let output = "1.1.1.1 dev eth0 src 10.0.3.15 uid 0";
        assert_eq!(parse_route_source(output), Some("10.0.3.15".to_string()));
    }

    #[test]
    fn test_parse_route_source_missing() {
        assert_eq!(parse_route_source("RTNETLINK answers: Network is unreachable"), None);
        assert_eq!(parse_route_source(""), None);
        // Trailing keyword with no value
        assert_eq!(parse_route_source("1.1.1.1 dev eth0 src"), None);
    }
}
