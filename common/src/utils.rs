use crate::constants::{BASE_PORT, SERVER_IP_ADDRESS};
use rand::random;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Returns `true` with the given probability.
pub fn random_bool_by_given_probability(probability: f32) -> bool {
    let rand_value: f32 = random();
    rand_value < probability
}

/// Address the reference order store listens on by default.
pub fn default_store_addr() -> SocketAddr {
    let ip = SERVER_IP_ADDRESS
        .parse::<IpAddr>()
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    SocketAddr::new(ip, BASE_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_and_impossible_probabilities() {
        for _ in 0..100 {
            assert!(random_bool_by_given_probability(1.0));
            assert!(!random_bool_by_given_probability(0.0));
        }
    }

    #[test]
    fn default_store_addr_uses_base_port() {
        assert_eq!(default_store_addr().port(), BASE_PORT);
    }
}
