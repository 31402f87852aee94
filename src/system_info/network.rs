use anyhow::Result;
use get_if_addrs::get_if_addrs;

pub fn get_hostname() -> String {
    hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// First non-loopback IPv4 address, or `N/A` when the host has none yet.
pub fn get_ip_address() -> Result<String> {
    let interfaces = get_if_addrs()?;

    for interface in interfaces {
        if !interface.is_loopback() && interface.ip().is_ipv4() {
            return Ok(interface.ip().to_string());
        }
    }

    Ok("N/A".to_string())
}
